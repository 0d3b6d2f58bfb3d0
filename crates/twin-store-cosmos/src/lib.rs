//! # twin-store-cosmos
//!
//! Azure Cosmos DB (SQL API) adapter for `TwinStore`, speaking the REST
//! interface directly with master-key request signing.

pub mod auth;
pub mod settings;
pub mod store;

pub use settings::CosmosSettings;
pub use store::CosmosTwinStore;
