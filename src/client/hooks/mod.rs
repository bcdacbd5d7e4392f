pub mod auth;
pub mod keyboard;
pub mod toast;

pub use auth::{use_auth, use_auth_provider, AuthContext};
pub use keyboard::{use_keyboard_shortcuts, Shortcut};
pub use toast::{use_toast_provider, use_toasts, Toasts};
