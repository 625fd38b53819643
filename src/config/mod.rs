pub mod database;
pub mod session;

pub use database::{Backend, DatabaseConfig};
pub use session::{SessionConfig, SessionLayer};
