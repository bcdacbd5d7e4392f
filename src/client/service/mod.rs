pub mod api;
pub mod auth;
pub mod email;
pub mod jwt;

pub use auth::{AuthApi, AuthService, HttpAuthApi};
pub use email::EmailService;
