//! Sproutfield library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the interactive farm console.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can drive purchases, planting, and harvests headlessly.

pub mod shared;
pub mod data;
pub mod economy;
pub mod farming;
pub mod session;
pub mod weather;
pub mod advisor;
