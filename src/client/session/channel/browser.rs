use chrono::Duration;
use dioxus_logger::tracing;
use wasm_bindgen::{closure::Closure, JsCast};

use crate::client::{
    error::ClientError,
    session::channel::{ChangeListener, SessionChannel, StorageChange, Subscription},
};

/// Cross-tab channel over `window.localStorage` and the `storage` event
#[derive(Clone, Copy, Default)]
pub struct LocalStorageChannel;

impl LocalStorageChannel {
    fn window() -> Result<web_sys::Window, ClientError> {
        web_sys::window().ok_or(ClientError::Unavailable("window"))
    }

    fn storage() -> Result<web_sys::Storage, ClientError> {
        Self::window()?
            .local_storage()
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))?
            .ok_or(ClientError::Unavailable("localStorage"))
    }
}

impl SessionChannel for LocalStorageChannel {
    fn read(&self, key: &str) -> Result<Option<String>, ClientError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ClientError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn remove_after(&self, key: &str, delay: Duration) {
        let window = match Self::window() {
            Ok(window) => window,
            Err(e) => {
                tracing::error!("Failed to schedule removal of {}: {}", key, e);
                return;
            }
        };

        let key = key.to_string();
        let callback = Closure::once_into_js(move || {
            if let Err(e) = LocalStorageChannel.remove(&key) {
                tracing::error!("Failed to remove {}: {}", key, e);
            }
        });

        let timeout = delay.num_milliseconds().clamp(0, i32::MAX as i64) as i32;
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            timeout,
        ) {
            tracing::error!("Failed to schedule storage removal: {:?}", e);
        }
    }

    fn subscribe(&self, listener: ChangeListener) -> Result<Subscription, ClientError> {
        let window = Self::window()?;

        let handler = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(
            move |event: web_sys::StorageEvent| {
                if let Some(key) = event.key() {
                    listener(&StorageChange {
                        key,
                        new_value: event.new_value(),
                    });
                }
            },
        );

        window
            .add_event_listener_with_callback("storage", handler.as_ref().unchecked_ref())
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))?;

        Ok(Subscription::new(move || {
            if let Err(e) = window
                .remove_event_listener_with_callback("storage", handler.as_ref().unchecked_ref())
            {
                tracing::error!("Failed to remove storage listener: {:?}", e);
            }
        }))
    }
}
