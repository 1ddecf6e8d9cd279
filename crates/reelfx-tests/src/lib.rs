//! Integration test crate for ReelFX.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple reelfx crates to verify they work together.

#[cfg(test)]
mod assignment;

#[cfg(test)]
mod editing;

#[cfg(test)]
mod persistence;
