//! Ports - async trait boundaries between the engine and its adapters.

mod profile_store;

pub use profile_store::{ProfileStore, ProfileStoreError};
