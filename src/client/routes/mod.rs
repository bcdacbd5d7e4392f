pub mod callback;
pub mod inbox;
pub mod login;
pub mod not_found;
pub mod register;

pub use callback::AuthCallback;
pub use inbox::Inbox;
pub use login::Login;
pub use not_found::NotFound;
pub use register::Register;
