#![deny(unsafe_code)]
//! Core types for the flowfield vector-field visualizer.
//!
//! Provides the [`FlowField`] trait and built-in fields, the vector math
//! helpers (`vec2`), the magnitude colormap (`Rgba`, `ColorRange`),
//! `Xorshift64` PRNG, `SceneConfig`, and parameter helpers.

pub mod colormap;
pub mod error;
pub mod field;
pub mod params;
pub mod prng;
pub mod scene;
pub mod vec2;

pub use colormap::{color_from_magnitude, ColorRange, Rgba};
pub use error::FlowError;
pub use field::{FieldKind, FlowField};
pub use prng::Xorshift64;
pub use scene::SceneConfig;
