pub mod auth;
pub mod dashboard;
pub mod page;
pub mod toaster;

pub use page::Page;
pub use toaster::Toaster;
