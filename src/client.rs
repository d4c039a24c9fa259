use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Operation, Result};
use crate::models::EntityId;

/// Shareable HTTP client for use across units
///
/// Wraps a pooled [`reqwest::Client`] together with the API base URL. Clones
/// share the underlying connection pool, so one `ApiClient` can back any
/// number of units.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given API base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client from environment configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::with_timeout(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, path: &str, id: &EntityId) -> String {
        format!("{}{}/{}", self.base_url, path, id)
    }

    /// GET the whole collection at `path` and decode it as a JSON sequence.
    ///
    /// # Errors
    /// Returns an error on a non-success status, a transport failure, or a
    /// body that is not a JSON sequence of `T`.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let op = Operation::Fetch;
        let url = self.collection_url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::transport(op, &url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {} failed with status {}", url, status);
            return Err(Error::Http { op, url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(op, &url, e))?;
        let items: Vec<T> = serde_json::from_str(&body).map_err(|e| Error::json(op, &url, e))?;

        tracing::debug!("GET {} returned {} items", url, items.len());
        Ok(items)
    }

    /// POST a JSON `payload` to `path` and decode the created record.
    ///
    /// # Errors
    /// Returns an error on a non-success status, a transport failure, or a
    /// body that does not decode as `T`.
    pub async fn post_json<P, T>(&self, path: &str, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let op = Operation::Create;
        let url = self.collection_url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::transport(op, &url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("POST {} failed with status {}", url, status);
            return Err(Error::Http { op, url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(op, &url, e))?;
        let created: T = serde_json::from_str(&body).map_err(|e| Error::json(op, &url, e))?;

        tracing::debug!("POST {} succeeded", url);
        Ok(created)
    }

    /// PUT a full JSON `payload` to `{path}/{id}`. The response body is
    /// ignored; any success status counts.
    ///
    /// # Errors
    /// Returns an error on a non-success status or a transport failure.
    pub async fn put_json<P>(&self, path: &str, id: &EntityId, payload: &P) -> Result<()>
    where
        P: Serialize + ?Sized,
    {
        let op = Operation::Update;
        let url = self.item_url(path, id);
        tracing::debug!("PUT {}", url);

        let response = self
            .http
            .put(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::transport(op, &url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("PUT {} failed with status {}", url, status);
            return Err(Error::Http { op, url, status });
        }

        tracing::debug!("PUT {} succeeded", url);
        Ok(())
    }

    /// DELETE `{path}/{id}`. The response body is ignored; any success
    /// status counts.
    ///
    /// # Errors
    /// Returns an error on a non-success status or a transport failure.
    pub async fn delete_item(&self, path: &str, id: &EntityId) -> Result<()> {
        let op = Operation::Delete;
        let url = self.item_url(path, id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::transport(op, &url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("DELETE {} failed with status {}", url, status);
            return Err(Error::Http { op, url, status });
        }

        tracing::debug!("DELETE {} succeeded", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use serde_json::Value;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn item_url_joins_numeric_and_string_ids() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(
            client.item_url("/clubs", &EntityId::Num(4)),
            "http://localhost:3000/clubs/4"
        );
        assert_eq!(
            client.item_url("/areas", &EntityId::from("a-1")),
            "http://localhost:3000/areas/a-1"
        );
    }

    #[tokio::test]
    async fn get_list_decodes_sequence() {
        let app = Router::new().route(
            "/clubs",
            get(|| async { axum::Json(serde_json::json!([{"id": 1}, {"id": 2}])) }),
        );
        let base = serve(app).await;

        let client = ApiClient::new(base).unwrap();
        let items: Vec<Value> = client.get_list("/clubs").await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn get_list_maps_non_success_status() {
        let app = Router::new().route(
            "/clubs",
            get(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(app).await;

        let client = ApiClient::new(base).unwrap();
        let err = client.get_list::<Value>("/clubs").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Http {
                op: Operation::Fetch,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn get_list_rejects_non_json_body() {
        let app = Router::new().route("/clubs", get(|| async { "not json" }));
        let base = serve(app).await;

        let client = ApiClient::new(base).unwrap();
        let err = client.get_list::<Value>("/clubs").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Json {
                op: Operation::Fetch,
                ..
            }
        ));
    }
}
