use std::env;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use crud_app::{config::SessionConfig, models::Flash};
use serial_test::serial;
use tower::ServiceExt;
use tower_sessions::{cookie::SameSite, MemoryStore, Session};

async fn leave_flash(session: Session) -> &'static str {
    Flash::success("User created successfully!")
        .store(&session)
        .await
        .unwrap();
    "stored"
}

async fn read_flash(session: Session) -> String {
    match Flash::take(&session).await.unwrap() {
        Some(flash) => flash.message,
        None => "none".to_string(),
    }
}

fn flash_app(config: &SessionConfig, store: MemoryStore) -> Router {
    Router::new()
        .route("/leave", get(leave_flash))
        .route("/read", get(read_flash))
        .layer(config.create_layer(store))
}

fn request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Full `Set-Cookie` header produced when a flash is stored.
async fn set_cookie_header(app: &Router) -> String {
    let response = app.clone().oneshot(request("/leave", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("storing a flash issues a cookie")
        .to_str()
        .unwrap()
        .to_string()
}

async fn read(app: &Router, cookie: &str) -> String {
    let response = app
        .clone()
        .oneshot(request("/read", Some(cookie)))
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn name_value(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap()
}

fn with_secret(secret: &str) -> SessionConfig {
    SessionConfig {
        secret: Some(secret.to_string()),
        ..SessionConfig::development()
    }
}

#[tokio::test]
async fn test_development_cookie_is_http_only_and_lax() {
    let app = flash_app(&with_secret("dev"), MemoryStore::default());

    let cookie = set_cookie_header(&app).await;

    assert!(cookie.starts_with("crud_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_production_cookie_is_secure_and_strict() {
    let config = SessionConfig {
        secret: Some("prod".to_string()),
        ..SessionConfig::production()
    };
    let app = flash_app(&config, MemoryStore::default());

    let cookie = set_cookie_header(&app).await;

    assert!(cookie.starts_with("__Host-crud_session="));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_flash_survives_one_read_only() {
    let app = flash_app(&with_secret("once"), MemoryStore::default());
    let set_cookie = set_cookie_header(&app).await;
    let cookie = name_value(&set_cookie);

    assert_eq!(read(&app, cookie).await, "User created successfully!");
    assert_eq!(read(&app, cookie).await, "none");
}

#[tokio::test]
async fn test_tampered_cookie_carries_no_flash() {
    let app = flash_app(&with_secret("tamper"), MemoryStore::default());
    let set_cookie = set_cookie_header(&app).await;
    let cookie = name_value(&set_cookie);

    // Flip the last character of the signed value
    let mut tampered = cookie.to_string();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    assert_eq!(read(&app, &tampered).await, "none");
    assert_eq!(read(&app, cookie).await, "User created successfully!");
}

#[tokio::test]
async fn test_signing_key_follows_the_secret() {
    let store = MemoryStore::default();
    let writer = flash_app(&with_secret("shared"), store.clone());
    let set_cookie = set_cookie_header(&writer).await;
    let cookie = name_value(&set_cookie);

    // A layer rebuilt with another secret cannot verify the cookie
    let rotated = flash_app(&with_secret("rotated"), store.clone());
    assert_eq!(read(&rotated, cookie).await, "none");

    // A layer rebuilt with the same secret, as after a restart, can
    let restarted = flash_app(&with_secret("shared"), store);
    assert_eq!(read(&restarted, cookie).await, "User created successfully!");
}

/// Runs `check` with the given variables set, then restores the old values.
fn with_vars(vars: &[(&str, Option<&str>)], check: impl FnOnce()) {
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }

    check();

    for (key, value) in saved {
        match value {
            Some(value) => env::set_var(&key, value),
            None => env::remove_var(&key),
        }
    }
}

#[test]
#[serial]
fn test_from_env_defaults_to_development_without_secret() {
    with_vars(&[("ENVIRONMENT", None), ("SESSION_SECRET", None)], || {
        let config = SessionConfig::from_env();
        assert_eq!(config.cookie_name, "crud_session");
        assert!(!config.secure);
        assert_eq!(config.same_site, SameSite::Lax);
        assert!(config.secret.is_none());
    });
}

#[test]
#[serial]
fn test_from_env_reads_production_profile_and_secret() {
    with_vars(
        &[
            ("ENVIRONMENT", Some("production")),
            ("SESSION_SECRET", Some("flash-signing")),
        ],
        || {
            let config = SessionConfig::from_env();
            assert_eq!(config.cookie_name, "__Host-crud_session");
            assert!(config.secure);
            assert_eq!(config.same_site, SameSite::Strict);
            assert_eq!(config.secret.as_deref(), Some("flash-signing"));
        },
    );
}

#[test]
#[serial]
fn test_empty_secret_counts_as_unset() {
    with_vars(&[("SESSION_SECRET", Some(""))], || {
        assert!(SessionConfig::from_env().secret.is_none());
    });
}
