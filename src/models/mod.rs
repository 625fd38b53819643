pub mod flash;
pub mod user;

pub use flash::{Flash, FlashKind, FLASH_KEY};
pub use user::{FormError, User, UserAction, UserCommand, UserFields, UserForm};
