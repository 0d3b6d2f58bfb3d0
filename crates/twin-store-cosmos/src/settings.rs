//! Connection settings for a Cosmos DB account.

/// Default database name.
pub const DEFAULT_DATABASE: &str = "TwinHumanDB";
/// Default container name.
pub const DEFAULT_CONTAINER: &str = "TwinHumanContainer";
/// Partition key path of the container; matches `TwinRecord::country_id`.
pub const PARTITION_KEY_PATH: &str = "/countryId";

/// Where and how to reach the account.
#[derive(Clone)]
pub struct CosmosSettings {
    /// Account endpoint, e.g. `https://acct.documents.azure.com:443/`.
    pub endpoint: String,
    /// Base64 master key.
    pub key: String,
    /// Database id.
    pub database: String,
    /// Container id.
    pub container: String,
}

impl std::fmt::Debug for CosmosSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosSettings")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .field("database", &self.database)
            .field("container", &self.container)
            .finish()
    }
}

impl CosmosSettings {
    /// Settings with the default database and container names.
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            key: key.into(),
            database: DEFAULT_DATABASE.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
        }
    }

    /// Endpoint without a trailing slash.
    pub(crate) fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// Resource link of the database (`dbs/{db}`).
    pub(crate) fn database_link(&self) -> String {
        format!("dbs/{}", self.database)
    }

    /// Resource link of the container (`dbs/{db}/colls/{coll}`).
    pub(crate) fn container_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    /// Resource link of one document.
    pub(crate) fn document_link(&self, id: &str) -> String {
        format!("{}/docs/{}", self.container_link(), id)
    }
}
