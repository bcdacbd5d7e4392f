//! Session persistence and cross-tab synchronization.
//!
//! Tokens live in cookies ([`tokens`]), tabs talk to each other through a
//! [`channel::SessionChannel`], and [`manager::SessionManager`] owns the session state the UI
//! observes.

pub mod channel;
pub mod cookie;
pub mod manager;
pub mod sync;
pub mod tokens;

pub use manager::{SessionManager, SessionState};
