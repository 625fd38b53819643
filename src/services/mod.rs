pub mod sanitizer;
pub mod user_service;

pub use sanitizer::{sanitize_fields, strip_tags};
pub use user_service::{UserService, UserServiceError};
