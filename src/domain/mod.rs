//! Domain layer - pure emotion fusion, risk, and profile logic.
//!
//! Nothing in this module performs I/O. All state flows in and out through
//! the application layer and the `ports` traits.

pub mod emotion;
pub mod foundation;
pub mod fusion;
pub mod profile;
pub mod risk;
