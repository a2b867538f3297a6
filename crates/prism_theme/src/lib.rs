//! Prism Theme
//!
//! Theme-mode resolution and color-variable publishing for component
//! libraries.
//!
//! # Overview
//!
//! - **Modes**: `light`, `dark`, or follow the OS (`system`)
//! - **Palettes**: named light/dark color sets over a fixed role vocabulary
//! - **Persistence**: the selected mode and palette survive reloads
//! - **Published surface**: 31 `color.*` variables, written atomically
//!
//! # Quick Start
//!
//! ```rust
//! use prism_theme::{ColorScheme, SharedSurface, ThemeController, ThemeMode};
//!
//! let surface = SharedSurface::new();
//! let theme = ThemeController::builder()
//!     .surface(surface.clone())
//!     .initialize(ThemeMode::Dark, "ocean");
//! theme.mount();
//!
//! assert_eq!(theme.resolved_scheme(), ColorScheme::Dark);
//! assert_eq!(surface.get("color.primary").as_deref(), Some("#22d3ee"));
//! ```
//!
//! # Variables
//!
//! Consumers read colors by name from a [`VariableSurface`] and never reach
//! into the controller:
//!
//! - `color.{primary,secondary,success,warning,danger,info}` plus `.hover`
//!   and `.foreground`
//! - `color.background.{primary,secondary,tertiary,elevated,overlay,inverse}`
//! - `color.foreground.{primary,secondary,tertiary,inverse}`
//! - `color.border.{primary,secondary,tertiary}`
//!
//! Each also has a CSS spelling (`--color-primary-hover`); see
//! [`VariableSet::to_css`].
//!
//! # Custom palettes
//!
//! ```rust
//! use prism_theme::{ColorScheme, ThemeRegistry};
//!
//! let mut registry = ThemeRegistry::builtin();
//! registry
//!     .extend_from_toml(
//!         r##"
//! [themes.midnight]
//! extends = "default"
//! dark = { primary = "#818cf8" }
//! "##,
//!     )
//!     .unwrap();
//! let dark = registry.color_set("midnight", ColorScheme::Dark).unwrap();
//! assert_eq!(dark.primary.to_string(), "#818cf8");
//! ```

pub mod appearance;
pub mod controller;
pub mod error;
mod listeners;
pub mod platform;
pub mod presets;
pub mod registry;
pub mod storage;
pub mod surface;
pub mod theme;
pub mod tokens;
pub mod variant;

// Re-export commonly used types
pub use appearance::{
    HeadlessAppearance, ManualAppearance, PollingAppearance, SchemeListener, SystemAppearance,
};
pub use controller::{ThemeController, ThemeControllerBuilder, ThemeSnapshot};
pub use error::{PaletteError, Result, ThemeError};
pub use listeners::{ListenerId, ObserverId};
pub use platform::{detect_system_color_scheme, SCHEME_ENV};
pub use presets::{preset_bundle, ThemePreset};
pub use registry::ThemeRegistry;
pub use storage::{FileStorage, MemoryStorage, StorageError, ThemeStorage, UnavailableStorage};
pub use surface::{SharedSurface, VariableSet, VariableSurface, SURFACE_VERSION};
pub use theme::{ColorScheme, ThemeBundle, ThemeMode};
pub use tokens::*;
pub use variant::{ColorRef, Intent, ResolvedStyle, Size, SizeMetrics, StyleDescriptor, Variant};
