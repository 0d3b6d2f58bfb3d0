//! # twin-types
//!
//! Domain types for the Twin MCP server.
//! Pure data types with no I/O; serde is the only notable dependency.

pub mod error;
pub mod record;

pub use error::{ErrorKind, TwinError};
pub use record::{TwinProfile, TwinRecord};
