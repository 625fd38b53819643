use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::config::session::is_production;

// The page carries its own styles and the delete confirmation prompt inline.
const PAGE_CSP: &str = "default-src 'self'; script-src 'unsafe-inline'; \
                        style-src 'unsafe-inline'; form-action 'self'; frame-ancestors 'none'";

const BASE_HEADERS: [(&str, &str); 5] = [
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("content-security-policy", PAGE_CSP),
    ("referrer-policy", "same-origin"),
    // A cached page would replay an already-consumed flash on back navigation
    ("cache-control", "no-store"),
];

pub async fn add_security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in BASE_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    if is_production() {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000"),
        );
    }

    response
}
