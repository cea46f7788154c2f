//! Nullable infrastructure for deterministic testing.
//!
//! The engine's external dependencies (time, action targets) are abstracted
//! so tests can substitute implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the real clock or any external system
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod target;

pub use clock::NullClock;
pub use target::NullActionTarget;
