pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod hooks;
pub mod kanban;
pub mod router;
pub mod routes;
pub mod service;
pub mod session;
pub mod util;

pub use app::App;
