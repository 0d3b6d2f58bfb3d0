//! CLI command definitions.

pub mod call;
pub mod query;
pub mod serve;
pub mod tools;
