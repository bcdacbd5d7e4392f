pub mod google_button;
pub mod layout;
pub mod login_form;
pub mod register_form;

pub use google_button::GoogleAuthButton;
pub use layout::AuthLayout;
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
