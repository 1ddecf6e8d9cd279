//! ReelFX Core - Foundation types for transcript-driven overlays
//!
//! This crate provides the fundamental types used throughout ReelFX:
//! - Frame timing (FrameRate, FrameWindow)
//! - Clamped range interpolation
//! - Spring physics for entry animations
//! - Hex colors carried in overlay props
//! - Stable hashing and seeded pseudo-randomness for replayable visuals

pub mod color;
pub mod error;
pub mod hash;
pub mod interpolate;
pub mod spring;
pub mod time;

pub use color::Color;
pub use error::{ReelError, Result};
pub use hash::{stable_hash, SeededRandom};
pub use interpolate::{interpolate, Extrapolate};
pub use spring::{spring, SpringConfig};
pub use time::{FrameRate, FrameWindow};
