//! Theme controller
//!
//! [`ThemeController`] owns the selected mode and palette name, resolves the
//! scheme against the OS preference and keeps a [`VariableSurface`] in sync.
//!
//! The controller is an explicitly owned value: there is no process-wide
//! theme state, and independent controllers do not interfere. Its lifecycle
//! is three plain calls that any host can make at the right time:
//!
//! - [`ThemeControllerBuilder::initialize`] restores persisted state (no
//!   side effects beyond reading it)
//! - [`ThemeController::mount`] publishes variables and starts following the
//!   OS preference while in `system` mode
//! - [`ThemeController::dispose`] detaches the OS listener and stops
//!   publishing (dropping the last handle does the same)
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use prism_theme::{ColorScheme, ManualAppearance, SharedSurface, ThemeController, ThemeMode};
//!
//! let os = Rc::new(ManualAppearance::new(Some(ColorScheme::Light)));
//! let surface = SharedSurface::new();
//! let theme = ThemeController::builder()
//!     .appearance(os.clone())
//!     .surface(surface.clone())
//!     .initialize(ThemeMode::System, "default");
//! theme.mount();
//!
//! assert!(theme.set_theme_name("ocean"));
//! assert_eq!(surface.get("color.primary").as_deref(), Some("#0891b2"));
//!
//! os.set_preference(Some(ColorScheme::Dark));
//! assert_eq!(theme.resolved_scheme(), ColorScheme::Dark);
//! assert_eq!(surface.get("color.primary").as_deref(), Some("#22d3ee"));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use prism_core::Color;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::appearance::{HeadlessAppearance, SystemAppearance};
use crate::listeners::{ListenerId, ListenerSet, ObserverId};
use crate::registry::ThemeRegistry;
use crate::storage::{MemoryStorage, ThemeStorage, MODE_KEY, NAME_KEY};
use crate::surface::{SharedSurface, VariableSet, VariableSurface};
use crate::theme::{ColorScheme, ThemeMode};
use crate::tokens::{ColorToken, ColorTokens};

/// Observable controller state
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeSnapshot {
    pub mode: ThemeMode,
    pub theme_name: String,
    pub resolved: ColorScheme,
}

/// Collaborators for a [`ThemeController`]
///
/// Defaults: built-in presets, in-memory storage, a fresh [`SharedSurface`]
/// and no OS preference.
pub struct ThemeControllerBuilder {
    registry: Rc<ThemeRegistry>,
    storage: Box<dyn ThemeStorage>,
    surface: Box<dyn VariableSurface>,
    appearance: Rc<dyn SystemAppearance>,
}

impl Default for ThemeControllerBuilder {
    fn default() -> Self {
        Self {
            registry: Rc::new(ThemeRegistry::builtin()),
            storage: Box::new(MemoryStorage::new()),
            surface: Box::new(SharedSurface::new()),
            appearance: Rc::new(HeadlessAppearance::new()),
        }
    }
}

impl ThemeControllerBuilder {
    pub fn registry(mut self, registry: ThemeRegistry) -> Self {
        self.registry = Rc::new(registry);
        self
    }

    pub fn storage(mut self, storage: impl ThemeStorage + 'static) -> Self {
        self.storage = Box::new(storage);
        self
    }

    /// Where variables are published. The surface must not call back into
    /// the controller from `apply`.
    pub fn surface(mut self, surface: impl VariableSurface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    pub fn appearance<A: SystemAppearance + 'static>(mut self, appearance: Rc<A>) -> Self {
        self.appearance = appearance;
        self
    }

    /// Restore persisted state, falling back to the given defaults.
    ///
    /// A persisted name counts only if the registry knows it. Storage errors
    /// and unparsable values are logged and treated as unset. Nothing is
    /// published until [`ThemeController::mount`].
    pub fn initialize(self, default_mode: ThemeMode, default_name: &str) -> ThemeController {
        let Self {
            registry,
            storage,
            surface,
            appearance,
        } = self;

        let mode = restore_mode(&*storage).unwrap_or(default_mode);
        let theme_name = restore_name(&*storage, &registry)
            .unwrap_or_else(|| default_name_in(&registry, default_name));
        let resolved = match mode {
            ThemeMode::System => mode.resolve(appearance.preferred_scheme()),
            explicit => explicit.resolve(None),
        };
        debug!(%mode, theme = %theme_name, %resolved, "theme controller initialized");

        ThemeController {
            shared: Rc::new(Shared {
                registry,
                appearance,
                state: RefCell::new(ControllerState {
                    mode,
                    theme_name,
                    resolved,
                    mounted: false,
                    os_listener: None,
                    storage,
                    surface,
                }),
                observers: ListenerSet::new(),
                notifying: Cell::new(false),
            }),
        }
    }
}

/// Owns mode, theme name and resolved scheme for one host
///
/// Cloning yields another handle to the same controller. The controller is
/// single-threaded (`!Send`); every transition runs synchronously on the
/// caller's thread.
#[derive(Clone)]
pub struct ThemeController {
    shared: Rc<Shared>,
}

struct Shared {
    registry: Rc<ThemeRegistry>,
    appearance: Rc<dyn SystemAppearance>,
    state: RefCell<ControllerState>,
    observers: ListenerSet<ObserverId, ThemeSnapshot>,
    /// Set while observers run; nested transitions leave delivery to the
    /// outermost round
    notifying: Cell<bool>,
}

struct ControllerState {
    mode: ThemeMode,
    theme_name: String,
    resolved: ColorScheme,
    mounted: bool,
    os_listener: Option<ListenerId>,
    storage: Box<dyn ThemeStorage>,
    surface: Box<dyn VariableSurface>,
}

impl ControllerState {
    fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            mode: self.mode,
            theme_name: self.theme_name.clone(),
            resolved: self.resolved,
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.storage.store(key, value) {
            warn!(%err, key, "failed to persist theme state, continuing in memory");
        }
    }
}

impl ThemeController {
    pub fn builder() -> ThemeControllerBuilder {
        ThemeControllerBuilder::default()
    }

    /// Initialize with default collaborators
    pub fn initialize(default_mode: ThemeMode, default_name: &str) -> Self {
        Self::builder().initialize(default_mode, default_name)
    }

    /// Start publishing.
    ///
    /// Publishes the current variable set and, in `system` mode, attaches the
    /// OS listener and re-samples the preference. Calling it again while
    /// mounted does nothing.
    pub fn mount(&self) {
        let before = {
            let state = self.shared.state.borrow();
            if state.mounted {
                return;
            }
            state.snapshot()
        };

        {
            let mut state = self.shared.state.borrow_mut();
            state.mounted = true;
            if state.mode == ThemeMode::System {
                self.attach_listener(&mut state);
                let preferred = self.shared.appearance.preferred_scheme();
                state.resolved = ThemeMode::System.resolve(preferred);
            }
            self.publish(&mut state);
        }
        debug!("theme controller mounted");
        self.notify_if_changed(before);
    }

    /// Stop publishing and detach the OS listener.
    ///
    /// Setters keep updating and persisting state afterwards; publishing
    /// resumes on the next [`mount`](Self::mount).
    pub fn dispose(&self) {
        let mut state = self.shared.state.borrow_mut();
        if !state.mounted && state.os_listener.is_none() {
            return;
        }
        state.mounted = false;
        self.detach_listener(&mut state);
        debug!("theme controller disposed");
    }

    /// Select a mode, persist it and republish.
    ///
    /// `system` re-samples the OS preference and keeps following it while
    /// mounted; `light`/`dark` detach the OS listener.
    pub fn set_mode(&self, mode: ThemeMode) {
        let before = self.snapshot();
        {
            let mut state = self.shared.state.borrow_mut();
            state.mode = mode;
            state.persist(MODE_KEY, mode.as_str());

            match mode {
                ThemeMode::System => {
                    if state.mounted {
                        self.attach_listener(&mut state);
                    }
                    state.resolved = mode.resolve(self.shared.appearance.preferred_scheme());
                }
                explicit => {
                    self.detach_listener(&mut state);
                    state.resolved = explicit.resolve(None);
                }
            }
            debug!(%mode, resolved = %state.resolved, "theme mode set");
            self.publish(&mut state);
        }
        self.notify_if_changed(before);
    }

    /// Select a registered palette, persist it and republish.
    ///
    /// Returns `false` and changes nothing if `name` is not registered.
    pub fn set_theme_name(&self, name: &str) -> bool {
        if !self.shared.registry.contains(name) {
            debug!(theme = name, "ignoring unknown theme name");
            return false;
        }

        let before = self.snapshot();
        {
            let mut state = self.shared.state.borrow_mut();
            state.theme_name = name.to_string();
            state.persist(NAME_KEY, name);
            debug!(theme = name, "theme name set");
            self.publish(&mut state);
        }
        self.notify_if_changed(before);
        true
    }

    /// Switch to the explicit mode opposite the resolved scheme
    pub fn toggle(&self) -> ColorScheme {
        let next = self.resolved_scheme().toggle();
        self.set_mode(next.into());
        next
    }

    pub fn mode(&self) -> ThemeMode {
        self.shared.state.borrow().mode
    }

    pub fn theme_name(&self) -> String {
        self.shared.state.borrow().theme_name.clone()
    }

    pub fn resolved_scheme(&self) -> ColorScheme {
        self.shared.state.borrow().resolved
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.shared.state.borrow().snapshot()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.state.borrow().mounted
    }

    /// Whether the OS preference listener is attached
    pub fn is_listening(&self) -> bool {
        self.shared.state.borrow().os_listener.is_some()
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.shared.registry
    }

    /// The color set in effect
    pub fn colors(&self) -> ColorTokens {
        let state = self.shared.state.borrow();
        self.active_colors(&state).clone()
    }

    /// The variable set in effect, whether or not it has been published
    pub fn variables(&self) -> VariableSet {
        let state = self.shared.state.borrow();
        VariableSet::new(self.active_colors(&state))
    }

    pub fn color(&self, token: ColorToken) -> Color {
        let state = self.shared.state.borrow();
        self.active_colors(&state).get(token)
    }

    /// Call `observer` after every transition that changes the snapshot
    pub fn observe(&self, observer: impl FnMut(ThemeSnapshot) + 'static) -> ObserverId {
        self.shared.observers.insert(Box::new(observer))
    }

    pub fn unobserve(&self, id: ObserverId) -> bool {
        self.shared.observers.remove(id)
    }

    fn active_colors<'a>(&'a self, state: &ControllerState) -> &'a ColorTokens {
        self.shared
            .registry
            .color_set_or_fallback(&state.theme_name, state.resolved)
    }

    fn publish(&self, state: &mut ControllerState) {
        if !state.mounted {
            trace!("not mounted, skipping publish");
            return;
        }
        let vars = VariableSet::new(self.active_colors(state));
        state.surface.apply(&vars);
        trace!(theme = %state.theme_name, scheme = %state.resolved, "published color variables");
    }

    /// Deliver the current snapshot until it stops changing.
    ///
    /// Observers may transition the controller. Those nested transitions
    /// do not notify on their own; the outer loop sees the newer snapshot
    /// and runs another round, so every observer ends on the live state.
    fn notify_if_changed(&self, before: ThemeSnapshot) {
        if self.shared.notifying.get() {
            return;
        }
        let _round = NotifyGuard::enter(&self.shared.notifying);

        let mut delivered = before;
        loop {
            let current = self.snapshot();
            if current == delivered {
                break;
            }
            self.shared.observers.notify(current.clone());
            delivered = current;
        }
    }

    fn attach_listener(&self, state: &mut ControllerState) {
        if state.os_listener.is_some() {
            return;
        }
        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let id = self
            .shared
            .appearance
            .subscribe(Box::new(move |scheme| {
                if let Some(shared) = weak.upgrade() {
                    ThemeController { shared }.on_system_change(scheme);
                }
            }));
        state.os_listener = Some(id);
        trace!("attached system appearance listener");
    }

    fn detach_listener(&self, state: &mut ControllerState) {
        if let Some(id) = state.os_listener.take() {
            self.shared.appearance.unsubscribe(id);
            trace!("detached system appearance listener");
        }
    }

    fn on_system_change(&self, scheme: ColorScheme) {
        let mut next = Some(scheme);
        while let Some(scheme) = next.take() {
            let before = self.snapshot();
            {
                let mut state = self.shared.state.borrow_mut();
                if state.mode != ThemeMode::System || state.os_listener.is_none() {
                    trace!(%scheme, "ignoring system appearance change");
                    return;
                }
                if state.resolved == scheme {
                    return;
                }
                state.resolved = scheme;
                debug!(%scheme, "following system color scheme");
                self.publish(&mut state);
            }
            self.notify_if_changed(before);

            // This listener is skipped for changes made while it runs.
            let latest = ThemeMode::System.resolve(self.shared.appearance.preferred_scheme());
            if latest != self.resolved_scheme() {
                next = Some(latest);
            }
        }
    }
}

struct NotifyGuard<'a>(&'a Cell<bool>);

impl<'a> NotifyGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(id) = self.state.get_mut().os_listener.take() {
            self.appearance.unsubscribe(id);
        }
    }
}

fn restore_mode(storage: &dyn ThemeStorage) -> Option<ThemeMode> {
    match storage.load(MODE_KEY) {
        Ok(Some(raw)) => match raw.parse::<ThemeMode>() {
            Ok(mode) => Some(mode),
            Err(err) => {
                warn!(%err, "ignoring persisted theme mode");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(%err, "theme storage unavailable, using defaults");
            None
        }
    }
}

fn restore_name(storage: &dyn ThemeStorage, registry: &ThemeRegistry) -> Option<String> {
    match storage.load(NAME_KEY) {
        Ok(Some(name)) if registry.contains(&name) => Some(name),
        Ok(Some(name)) => {
            warn!(theme = %name, "ignoring persisted theme name not in registry");
            None
        }
        Ok(None) => None,
        Err(err) => {
            debug!(%err, "could not read persisted theme name");
            None
        }
    }
}

fn default_name_in(registry: &ThemeRegistry, default_name: &str) -> String {
    if registry.contains(default_name) {
        default_name.to_string()
    } else {
        let fallback = registry.fallback_name();
        warn!(
            theme = default_name,
            fallback, "default theme name not in registry, using fallback"
        );
        fallback.to_string()
    }
}
