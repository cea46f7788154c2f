//! External collaborator boundary for the governance engine.
//!
//! The engine never creates or destroys the external asset; it only requests
//! transfers into its own custody through [`AssetToken`], and performs
//! value-bearing invocations against passed proposals' targets through
//! [`ActionTarget`]. Both are traits so tests can swap deterministic
//! implementations in.

pub mod error;
pub mod target;
pub mod token;

pub use error::AssetError;
pub use target::ActionTarget;
pub use token::{AssetToken, InMemoryToken};
