pub mod action;
pub mod time;

pub use action::AsyncAction;
