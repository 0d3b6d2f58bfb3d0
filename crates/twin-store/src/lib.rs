//! # twin-store
//!
//! Port definition (abstract trait) for Twin record persistence.
//! Adapter crates implement `TwinStore`; an in-memory adapter lives here.

pub mod memory;
pub mod store;

pub use memory::MemoryTwinStore;
pub use store::{StoreError, TwinStore};
