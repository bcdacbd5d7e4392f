use std::{cell::RefCell, collections::HashMap, rc::Rc};

use chrono::Duration;

use crate::client::{
    error::ClientError,
    session::channel::{ChangeListener, SessionChannel, StorageChange, Subscription},
};

#[derive(Default)]
struct Bus {
    values: HashMap<String, String>,
    listeners: Vec<(usize, usize, ChangeListener)>,
    pending_removals: Vec<(usize, String)>,
    next_tab: usize,
    next_listener: usize,
}

/// In-process stand-in for same-origin shared storage
///
/// Each [`MemoryBus::tab`] behaves like one browser tab. Delayed removals are queued and
/// only applied by [`MemoryBus::tick`], which stands in for the timer firing.
#[derive(Clone, Default)]
pub struct MemoryBus(Rc<RefCell<Bus>>);

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> MemoryChannel {
        let mut bus = self.0.borrow_mut();
        let tab = bus.next_tab;
        bus.next_tab += 1;

        MemoryChannel {
            bus: self.clone(),
            tab,
        }
    }

    pub fn pending_removals(&self) -> usize {
        self.0.borrow().pending_removals.len()
    }

    /// Runs all queued removals, returns how many ran
    pub fn tick(&self) -> usize {
        let pending = std::mem::take(&mut self.0.borrow_mut().pending_removals);
        let count = pending.len();

        for (tab, key) in pending {
            let channel = MemoryChannel {
                bus: self.clone(),
                tab,
            };
            let _ = channel.remove(&key);
        }

        count
    }

    fn notify(&self, origin: usize, change: StorageChange) {
        // Listeners may write back into the bus, so release the borrow before calling them
        let listeners: Vec<ChangeListener> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|(_, tab, _)| *tab != origin)
            .map(|(_, _, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&change);
        }
    }
}

/// One tab's handle on a [`MemoryBus`]
#[derive(Clone)]
pub struct MemoryChannel {
    bus: MemoryBus,
    tab: usize,
}

impl SessionChannel for MemoryChannel {
    fn read(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.bus.0.borrow().values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let previous = self
            .bus
            .0
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());

        if previous.as_deref() != Some(value) {
            self.bus.notify(
                self.tab,
                StorageChange {
                    key: key.to_string(),
                    new_value: Some(value.to_string()),
                },
            );
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let previous = self.bus.0.borrow_mut().values.remove(key);

        if previous.is_some() {
            self.bus.notify(
                self.tab,
                StorageChange {
                    key: key.to_string(),
                    new_value: None,
                },
            );
        }

        Ok(())
    }

    fn remove_after(&self, key: &str, _delay: Duration) {
        self.bus
            .0
            .borrow_mut()
            .pending_removals
            .push((self.tab, key.to_string()));
    }

    fn subscribe(&self, listener: ChangeListener) -> Result<Subscription, ClientError> {
        let id = {
            let mut bus = self.bus.0.borrow_mut();
            let id = bus.next_listener;
            bus.next_listener += 1;
            bus.listeners.push((id, self.tab, listener));
            id
        };

        let bus = self.bus.clone();
        Ok(Subscription::new(move || {
            bus.0.borrow_mut().listeners.retain(|(lid, _, _)| *lid != id);
        }))
    }
}
