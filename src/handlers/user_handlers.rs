use crate::db;
use crate::error::Result;
use crate::models::user::parse_id;
use crate::models::{Flash, User, UserForm};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{rejection::RawFormRejection, Query, RawForm, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, warn};

#[derive(Template, WebTemplate)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub flash: Option<Flash>,
    pub users: Vec<User>,
    pub edit_user: Option<User>,
    pub db_online: bool,
    pub user_count: i64,
    pub version: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub edit: Option<String>,
}

/// GET / - Render the form and the user table
pub async fn show_users_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let flash = Flash::take(&session).await.unwrap_or_else(|e| {
        warn!("Failed to read flash from session: {}", e);
        None
    });

    let db_online = db::is_online(&state.pool).await;

    let users = state.user_service.list_users().await.unwrap_or_else(|e| {
        warn!("Failed to list users: {}", e);
        Vec::new()
    });

    let user_count = state
        .user_service
        .count_users()
        .await
        .unwrap_or(users.len() as i64);

    let edit_user = match query.edit.as_deref() {
        Some(raw) => load_edit_user(&state, raw).await,
        None => None,
    };

    UsersTemplate {
        flash,
        users,
        edit_user,
        db_online,
        user_count,
        version: env!("CARGO_PKG_VERSION"),
    }
}

// Anything short of an existing record falls back to the create form.
async fn load_edit_user(state: &AppState, raw: &str) -> Option<User> {
    let id = match parse_id(Some(raw)) {
        Ok(id) => id,
        Err(e) => {
            debug!("Ignoring edit parameter: {}", e);
            return None;
        }
    };

    match state.user_service.find_user_by_id(id).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            debug!("No user {} to edit; showing create form", id);
            None
        }
        Err(e) => {
            warn!("Failed to load user {} for editing: {}", id, e);
            None
        }
    }
}

/// POST / - Apply a create/update/delete submission, then redirect back to /
///
/// The body is read leniently: a missing or non-form body counts as a
/// submission without an action, so every POST still ends in the redirect.
pub async fn submit_user_form(
    State(state): State<AppState>,
    session: Session,
    body: std::result::Result<RawForm, RawFormRejection>,
) -> Redirect {
    let form = match body {
        Ok(RawForm(bytes)) => UserForm::from_urlencoded(&bytes).unwrap_or_else(|e| {
            debug!("Ignoring undecodable form body: {}", e);
            UserForm::default()
        }),
        Err(rejection) => {
            debug!("Ignoring submission without a form body: {}", rejection);
            UserForm::default()
        }
    };

    let Some(action) = form.action() else {
        debug!("Ignoring submission without a recognised action");
        return Redirect::to("/");
    };

    let flash = match form.into_command(action) {
        Ok(command) => match state.user_service.execute(command).await {
            Ok(()) => Flash::success(action.success_message()),
            Err(e) => {
                warn!("{:?} failed: {}", action, e);
                Flash::error(action.failure_message())
            }
        },
        Err(e) => {
            warn!("Rejected {:?} submission: {}", action, e);
            Flash::error(action.failure_message())
        }
    };

    if let Err(e) = flash.store(&session).await {
        warn!("Failed to store flash in session: {}", e);
    }

    Redirect::to("/")
}

/// GET /health - Report whether the database answers
pub async fn health_handler(State(state): State<AppState>) -> Result<&'static str> {
    db::ping(&state.pool).await?;
    Ok("ok")
}
