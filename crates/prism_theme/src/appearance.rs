//! Sources of the OS color scheme preference
//!
//! The controller only talks to [`SystemAppearance`]. Hosts pick the source
//! that matches how they learn about appearance changes:
//!
//! - [`ManualAppearance`]: the host forwards events from its windowing layer
//! - [`PollingAppearance`]: the host calls [`PollingAppearance::poll`] on a timer
//! - [`HeadlessAppearance`]: no OS to ask (CI, servers, tests)

use std::cell::Cell;

use tracing::debug;

use crate::listeners::{ListenerId, ListenerSet};
use crate::platform::detect_system_color_scheme;
use crate::theme::ColorScheme;

/// Callback invoked with the new effective scheme
pub type SchemeListener = Box<dyn FnMut(ColorScheme)>;

/// Read and observe the OS color scheme preference
pub trait SystemAppearance {
    /// Current preference, `None` when the environment cannot tell
    fn preferred_scheme(&self) -> Option<ColorScheme>;

    /// Register a change listener
    fn subscribe(&self, listener: SchemeListener) -> ListenerId;

    /// Remove a listener; `false` if it was not registered
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// Appearance source driven by explicit calls
pub struct ManualAppearance {
    preference: Cell<Option<ColorScheme>>,
    listeners: ListenerSet<ListenerId, ColorScheme>,
}

impl ManualAppearance {
    pub fn new(preference: Option<ColorScheme>) -> Self {
        Self {
            preference: Cell::new(preference),
            listeners: ListenerSet::new(),
        }
    }

    /// Record a new OS preference.
    ///
    /// Listeners are notified only when the effective scheme changes; an
    /// unknown preference counts as light.
    pub fn set_preference(&self, preference: Option<ColorScheme>) {
        let previous = self.preference.replace(preference);
        let before = previous.unwrap_or_default();
        let after = preference.unwrap_or_default();
        if before != after {
            debug!(from = %before, to = %after, "system color scheme changed");
            self.listeners.notify(after);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for ManualAppearance {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SystemAppearance for ManualAppearance {
    fn preferred_scheme(&self) -> Option<ColorScheme> {
        self.preference.get()
    }

    fn subscribe(&self, listener: SchemeListener) -> ListenerId {
        self.listeners.insert(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

/// No OS preference; listeners are accepted but never called
#[derive(Default)]
pub struct HeadlessAppearance {
    inner: ManualAppearance,
}

impl HeadlessAppearance {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SystemAppearance for HeadlessAppearance {
    fn preferred_scheme(&self) -> Option<ColorScheme> {
        None
    }

    fn subscribe(&self, listener: SchemeListener) -> ListenerId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.unsubscribe(id)
    }
}

/// Appearance source that re-probes the OS on demand
///
/// `preferred_scheme` reports the value seen by the most recent probe, so it
/// always agrees with what listeners were last told.
pub struct PollingAppearance {
    probe: Box<dyn Fn() -> Option<ColorScheme>>,
    inner: ManualAppearance,
}

impl PollingAppearance {
    /// Probe the real OS via [`detect_system_color_scheme`]
    pub fn new() -> Self {
        Self::with_probe(detect_system_color_scheme)
    }

    /// Use a custom probe; it is called once immediately
    pub fn with_probe(probe: impl Fn() -> Option<ColorScheme> + 'static) -> Self {
        let initial = probe();
        Self {
            probe: Box::new(probe),
            inner: ManualAppearance::new(initial),
        }
    }

    /// Probe again; returns `true` if the effective scheme changed
    pub fn poll(&self) -> bool {
        let before = self.inner.preferred_scheme().unwrap_or_default();
        let now = (self.probe)();
        self.inner.set_preference(now);
        before != now.unwrap_or_default()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }
}

impl Default for PollingAppearance {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemAppearance for PollingAppearance {
    fn preferred_scheme(&self) -> Option<ColorScheme> {
        self.inner.preferred_scheme()
    }

    fn subscribe(&self, listener: SchemeListener) -> ListenerId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.unsubscribe(id)
    }
}
