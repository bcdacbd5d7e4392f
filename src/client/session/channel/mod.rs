//! Message channel between browser tabs of the same origin.
//!
//! A write by one tab is observed by every *other* tab as a [`StorageChange`], and only when
//! the stored value actually changes. This mirrors the semantics of the browser `storage`
//! event, which [`browser::LocalStorageChannel`] is built on.

#[cfg(feature = "web")]
pub mod browser;
pub mod memory;

use std::rc::Rc;

use chrono::Duration;

use crate::client::error::ClientError;

#[cfg(feature = "web")]
pub use browser::LocalStorageChannel;
pub use memory::{MemoryBus, MemoryChannel};

/// A change to a shared key as observed by another tab
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    /// `None` when the key was removed
    pub new_value: Option<String>,
}

pub type ChangeListener = Rc<dyn Fn(&StorageChange)>;

pub trait SessionChannel {
    fn read(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn write(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
    /// Removes `key` once `delay` has elapsed
    fn remove_after(&self, key: &str, delay: Duration);
    /// Registers a listener for changes made by other tabs
    fn subscribe(&self, listener: ChangeListener) -> Result<Subscription, ClientError>;
}

/// Keeps a listener registered until dropped
#[must_use = "the listener is removed when the subscription is dropped"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}
