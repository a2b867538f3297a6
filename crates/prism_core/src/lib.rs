//! Prism Core
//!
//! Foundational value types shared by the Prism crates.
//!
//! - **Colors**: RGBA values with hex parsing, formatting and interpolation
//!
//! # Example
//!
//! ```rust
//! use prism_core::Color;
//!
//! let cyan: Color = "#0891b2".parse().unwrap();
//! assert_eq!(cyan.to_string(), "#0891b2");
//!
//! let half = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
//! assert_eq!(half.to_rgba8(), [128, 128, 128, 255]);
//! ```

pub mod color;

pub use color::{Color, ColorParseError};
