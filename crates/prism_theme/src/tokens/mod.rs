//! Design tokens for theming
//!
//! Prism palettes are purely chromatic: a palette is a pair of
//! [`ColorTokens`] (light and dark), each assigning a concrete color to
//! every semantic [`ColorToken`] role.

mod color;

pub use color::*;
