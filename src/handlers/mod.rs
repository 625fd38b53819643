pub mod user_handlers;

pub use user_handlers::{health_handler, show_users_page, submit_user_form, UsersTemplate};
