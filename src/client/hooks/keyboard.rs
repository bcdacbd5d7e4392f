//! Keyboard shortcuts.
//!
//! A [`ShortcutSet`] is an ordered list of [`Shortcut`]s. [`use_keyboard_shortcuts`] keeps a
//! single global `keydown` listener alive while enabled and dispatches through the latest
//! list on every key press, so re-rendering with new handlers never re-subscribes.

use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::client::{error::ClientError, session::channel::Subscription};

pub const ESCAPE: &str = "Escape";

/// Element that had focus when a key was pressed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    Other,
    Input,
    TextArea,
    ContentEditable,
}

impl FocusTarget {
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key`, e.g. `"k"` or `"Escape"`
    pub key: String,
    /// `KeyboardEvent.code`, e.g. `"KeyK"`
    pub code: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub target: FocusTarget,
}

impl KeyPress {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = code.to_string();
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_target(mut self, target: FocusTarget) -> Self {
        self.target = target;
        self
    }
}

/// A key combination bound to a handler
///
/// Modifiers left unset match whether or not they are held.
#[derive(Clone)]
pub struct Shortcut {
    pub key: String,
    pub ctrl: Option<bool>,
    pub shift: Option<bool>,
    pub alt: Option<bool>,
    pub meta: Option<bool>,
    pub description: String,
    pub prevent_default: bool,
    handler: Rc<dyn Fn()>,
}

impl Shortcut {
    pub fn new(key: &str, description: &str, handler: impl Fn() + 'static) -> Self {
        Self {
            key: key.to_string(),
            ctrl: None,
            shift: None,
            alt: None,
            meta: None,
            description: description.to_string(),
            prevent_default: true,
            handler: Rc::new(handler),
        }
    }

    pub fn ctrl(mut self, held: bool) -> Self {
        self.ctrl = Some(held);
        self
    }

    pub fn shift(mut self, held: bool) -> Self {
        self.shift = Some(held);
        self
    }

    pub fn alt(mut self, held: bool) -> Self {
        self.alt = Some(held);
        self
    }

    pub fn meta(mut self, held: bool) -> Self {
        self.meta = Some(held);
        self
    }

    /// Leaves the browser's default action for this key in place
    pub fn allow_default(mut self) -> Self {
        self.prevent_default = false;
        self
    }

    pub fn matches(&self, press: &KeyPress) -> bool {
        let key_match =
            self.key.to_lowercase() == press.key.to_lowercase() || self.key == press.code;
        let modifier = |wanted: Option<bool>, held: bool| wanted.map_or(true, |w| w == held);

        key_match
            && modifier(self.ctrl, press.ctrl)
            && modifier(self.shift, press.shift)
            && modifier(self.alt, press.alt)
            && modifier(self.meta, press.meta)
    }
}

impl std::fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shortcut")
            .field("key", &self.key)
            .field("ctrl", &self.ctrl)
            .field("shift", &self.shift)
            .field("alt", &self.alt)
            .field("meta", &self.meta)
            .field("description", &self.description)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Ignored,
    Handled { prevent_default: bool },
}

#[derive(Clone, Debug, Default)]
pub struct ShortcutSet(Vec<Shortcut>);

impl ShortcutSet {
    pub fn new(shortcuts: Vec<Shortcut>) -> Self {
        Self(shortcuts)
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.0
    }

    /// Runs the handler of the first shortcut matching `press`
    ///
    /// Shortcuts are tried in list order and the first one whose key and every specified
    /// modifier match wins, so more specific bindings must come before broader ones. Presses
    /// made while typing into an editable element are ignored, except `Escape`.
    pub fn dispatch(&self, press: &KeyPress) -> Dispatch {
        if press.target.is_editable() && press.key != ESCAPE {
            return Dispatch::Ignored;
        }

        match self.0.iter().find(|shortcut| shortcut.matches(press)) {
            Some(shortcut) => {
                (shortcut.handler)();
                Dispatch::Handled {
                    prevent_default: shortcut.prevent_default,
                }
            }
            None => Dispatch::Ignored,
        }
    }
}

pub type KeyHandler = Rc<dyn Fn(&KeyPress) -> Dispatch>;

/// Source of global key presses
pub trait KeySource {
    fn listen(&self, handler: KeyHandler) -> Result<Subscription, ClientError>;
}

/// Owns the listener of one [`use_keyboard_shortcuts`] call
pub struct ShortcutRegistry<S: KeySource> {
    source: S,
    shortcuts: Rc<RefCell<ShortcutSet>>,
    listener: RefCell<Option<Subscription>>,
}

impl<S: KeySource> ShortcutRegistry<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            shortcuts: Rc::new(RefCell::new(ShortcutSet::default())),
            listener: RefCell::new(None),
        }
    }

    /// Swaps the shortcut list seen by the active listener
    pub fn replace(&self, shortcuts: ShortcutSet) {
        *self.shortcuts.borrow_mut() = shortcuts;
    }

    pub fn is_listening(&self) -> bool {
        self.listener.borrow().is_some()
    }

    pub fn set_enabled(&self, enabled: bool) {
        if enabled == self.is_listening() {
            return;
        }

        if !enabled {
            self.listener.borrow_mut().take();
            return;
        }

        let shortcuts = self.shortcuts.clone();
        let handler: KeyHandler = Rc::new(move |press: &KeyPress| {
            // Clone out so a handler may replace the list while running
            let current = shortcuts.borrow().clone();
            current.dispatch(press)
        });

        match self.source.listen(handler) {
            Ok(subscription) => *self.listener.borrow_mut() = Some(subscription),
            Err(e) => tracing::error!("Failed to attach keyboard listener: {}", e),
        }
    }
}

/// `keydown` events of the browser window
#[cfg(feature = "web")]
#[derive(Clone, Copy, Default)]
pub struct WindowKeySource;

#[cfg(feature = "web")]
impl WindowKeySource {
    fn key_press(event: &web_sys::KeyboardEvent) -> KeyPress {
        use wasm_bindgen::JsCast;

        let target = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
            .map(|element| match element.tag_name().as_str() {
                "INPUT" => FocusTarget::Input,
                "TEXTAREA" => FocusTarget::TextArea,
                _ if element.is_content_editable() => FocusTarget::ContentEditable,
                _ => FocusTarget::Other,
            })
            .unwrap_or_default();

        KeyPress {
            key: event.key(),
            code: event.code(),
            ctrl: event.ctrl_key(),
            shift: event.shift_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
            target,
        }
    }
}

#[cfg(feature = "web")]
impl KeySource for WindowKeySource {
    fn listen(&self, handler: KeyHandler) -> Result<Subscription, ClientError> {
        use wasm_bindgen::{closure::Closure, JsCast};

        let window = web_sys::window().ok_or(ClientError::Unavailable("window"))?;

        let listener = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| {
                if let Dispatch::Handled {
                    prevent_default: true,
                } = handler(&Self::key_press(&event))
                {
                    event.prevent_default();
                }
            },
        );

        window
            .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            .map_err(|_| ClientError::Unavailable("keydown listener"))?;

        Ok(Subscription::new(move || {
            if let Err(e) = window
                .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            {
                tracing::error!("Failed to remove keyboard listener: {:?}", e);
            }
        }))
    }
}

/// Binds `shortcuts` to global key presses while `enabled`
#[cfg(feature = "web")]
pub fn use_keyboard_shortcuts(shortcuts: Vec<Shortcut>, enabled: bool) {
    let registry = use_hook(|| Rc::new(ShortcutRegistry::new(WindowKeySource)));

    registry.replace(ShortcutSet::new(shortcuts));
    registry.set_enabled(enabled);

    use_drop({
        let registry = registry.clone();
        move || registry.set_enabled(false)
    });
}

#[cfg(not(feature = "web"))]
pub fn use_keyboard_shortcuts(shortcuts: Vec<Shortcut>, enabled: bool) {
    let _ = (shortcuts, enabled);
}
