//! `TwinStore` implementation over the Cosmos DB REST API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use twin_store::{StoreError, TwinStore};
use twin_types::TwinRecord;

use crate::auth::{rfc1123, MasterKey};
use crate::settings::{CosmosSettings, PARTITION_KEY_PATH};

/// REST API version sent with every request.
const API_VERSION: &str = "2018-12-31";
/// Per-request timeout for the HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Twin store backed by one Cosmos DB container.
pub struct CosmosTwinStore {
    http: reqwest::Client,
    settings: CosmosSettings,
    key: MasterKey,
}

/// One page of a query response.
#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(rename = "Documents", default)]
    documents: Vec<Value>,
}

fn connection_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Connection {
        message: e.to_string(),
    }
}

fn storage_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Storage {
        message: e.to_string(),
    }
}

impl CosmosTwinStore {
    /// Connects to the account, creating the database and container when
    /// they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the key is malformed, the
    /// account is unreachable, or either resource cannot be created.
    pub async fn connect(settings: CosmosSettings) -> Result<Self, StoreError> {
        let key = MasterKey::from_base64(&settings.key).map_err(connection_err)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(connection_err)?;
        let store = Self {
            http,
            settings,
            key,
        };

        store
            .create_if_missing("dbs", "dbs", "", json!({ "id": store.settings.database }))
            .await?;
        let colls_path = format!("{}/colls", store.settings.database_link());
        store
            .create_if_missing(
                &colls_path,
                "colls",
                &store.settings.database_link(),
                json!({
                    "id": store.settings.container,
                    "partitionKey": { "paths": [PARTITION_KEY_PATH], "kind": "Hash" }
                }),
            )
            .await?;

        info!(
            database = %store.settings.database,
            container = %store.settings.container,
            "Cosmos DB store ready"
        );
        Ok(store)
    }

    /// Starts a signed request against `path` (relative to the endpoint).
    fn request(
        &self,
        method: Method,
        path: &str,
        resource_type: &str,
        resource_link: &str,
    ) -> Result<RequestBuilder, StoreError> {
        let date = rfc1123(Utc::now());
        let token = self
            .key
            .authorization(method.as_str(), resource_type, resource_link, &date)
            .map_err(connection_err)?;
        let url = format!("{}/{}", self.settings.base_url(), path);
        Ok(self
            .http
            .request(method, url)
            .header(AUTHORIZATION, token)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION))
    }

    async fn create_if_missing(
        &self,
        path: &str,
        resource_type: &str,
        resource_link: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        let resp = self
            .request(Method::POST, path, resource_type, resource_link)?
            .json(&body)
            .send()
            .await
            .map_err(connection_err)?;

        match resp.status() {
            StatusCode::CONFLICT => {
                debug!(path, "resource already exists");
                Ok(())
            }
            s if s.is_success() => {
                info!(path, "created resource");
                Ok(())
            }
            s => Err(StoreError::Connection {
                message: format!("creating {path} failed: {}", describe(s, resp).await),
            }),
        }
    }

    fn docs_path(&self) -> String {
        format!("{}/docs", self.settings.container_link())
    }

    fn partition_header(partition_key: &str) -> String {
        json!([partition_key]).to_string()
    }
}

/// Status plus whatever message body the service sent back.
async fn describe(status: StatusCode, resp: Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}

#[async_trait]
impl TwinStore for CosmosTwinStore {
    async fn upsert(&self, record: &TwinRecord) -> Result<(), StoreError> {
        let resp = self
            .request(
                Method::POST,
                &self.docs_path(),
                "docs",
                &self.settings.container_link(),
            )?
            .header("x-ms-documentdb-is-upsert", "True")
            .header(
                "x-ms-documentdb-partitionkey",
                Self::partition_header(record.partition_key()),
            )
            .json(record)
            .send()
            .await
            .map_err(storage_err)?;

        let status = resp.status();
        if status.is_success() {
            debug!(id = %record.id, partition = %record.country_id, "upserted record");
            Ok(())
        } else {
            Err(StoreError::Storage {
                message: describe(status, resp).await,
            })
        }
    }

    async fn read(&self, id: &str, partition_key: &str) -> Result<TwinRecord, StoreError> {
        let path = format!(
            "{}/docs/{}",
            self.settings.container_link(),
            urlencoding::encode(id)
        );
        let resp = self
            .request(Method::GET, &path, "docs", &self.settings.document_link(id))?
            .header(
                "x-ms-documentdb-partitionkey",
                Self::partition_header(partition_key),
            )
            .send()
            .await
            .map_err(storage_err)?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound {
                id: id.to_string(),
                partition_key: partition_key.to_string(),
            }),
            s if s.is_success() => resp.json::<TwinRecord>().await.map_err(storage_err),
            s => Err(StoreError::Storage {
                message: describe(s, resp).await,
            }),
        }
    }

    async fn list(&self) -> Result<Vec<TwinRecord>, StoreError> {
        let body = json!({ "query": "SELECT * FROM c", "parameters": [] }).to_string();
        let mut records = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut req = self
                .request(
                    Method::POST,
                    &self.docs_path(),
                    "docs",
                    &self.settings.container_link(),
                )?
                .header(CONTENT_TYPE, "application/query+json")
                .header("x-ms-documentdb-isquery", "True")
                .header("x-ms-documentdb-query-enablecrosspartition", "True")
                .body(body.clone());
            if let Some(token) = &continuation {
                req = req.header("x-ms-continuation", token);
            }

            let resp = req.send().await.map_err(storage_err)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(StoreError::Storage {
                    message: describe(status, resp).await,
                });
            }
            let next = resp
                .headers()
                .get("x-ms-continuation")
                .and_then(|v| v.to_str().ok())
                .map(String::from);

            let page: QueryPage = resp.json().await.map_err(storage_err)?;
            for doc in page.documents {
                let id = doc.get("id").cloned().unwrap_or(Value::Null);
                match serde_json::from_value::<TwinRecord>(doc) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!(%id, error = %e, "skipping document with unexpected shape"),
                }
            }

            match next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(records)
    }
}
