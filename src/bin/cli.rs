use clap::{Parser, Subcommand};
use crud_app::{
    config::DatabaseConfig,
    db,
    models::UserFields,
    repositories::user_repository::SqlUserRepository,
    services::user_service::UserService,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "crud-app-cli")]
#[command(about = "CLI tool for managing the users table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List all users, newest first
    List,

    /// Create a new user
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: String,
    },

    /// Overwrite a user's fields
    Update {
        #[arg(long)]
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: String,
    },

    /// Delete a user
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Connect to database
    let db_config = DatabaseConfig::from_env();
    let pool = db::create_pool(&db_config)?;
    db::ensure_schema(&pool, db_config.backend()).await?;

    // Initialize services
    let user_repository = Arc::new(SqlUserRepository::new(pool));
    let user_service = UserService::new(user_repository);

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::List => {
                let users = user_service.list_users().await?;
                if users.is_empty() {
                    println!("No users found.");
                } else {
                    println!("{:<6} {:<30} {:<35} {}", "ID", "Name", "Email", "Phone");
                    println!("{}", "-".repeat(90));
                    for user in &users {
                        println!(
                            "{:<6} {:<30} {:<35} {}",
                            user.id, user.name, user.email, user.phone
                        );
                    }
                    println!("\n{} user(s)", user_service.count_users().await?);
                }
            }
            UserCommands::Create { name, email, phone } => {
                let fields = UserFields::new(name, email, phone);
                match user_service.create_user(&fields).await? {
                    Some(id) => println!("✅ User created successfully (ID: {})", id),
                    None => println!("✅ User created successfully"),
                }
            }
            UserCommands::Update {
                id,
                name,
                email,
                phone,
            } => {
                let fields = UserFields::new(name, email, phone);
                let affected = user_service.update_user(id, &fields).await?;
                if affected == 0 {
                    println!("No user with ID {} was changed", id);
                } else {
                    println!("✅ User {} updated successfully", id);
                }
            }
            UserCommands::Delete { id } => {
                let affected = user_service.delete_user(id).await?;
                if affected == 0 {
                    println!("No user with ID {} exists", id);
                } else {
                    println!("✅ User {} deleted successfully", id);
                }
            }
        },
    }

    Ok(())
}
