//! Cache Backends
//!
//! The key/value capability the order cache is built on, with an in-process
//! implementation and one that talks to a remote cache server over HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::cache::MemoryCache;
use crate::error::CacheError;

// == Cache Backend ==
/// Expiring key/value storage. Every call may fail independently of the
/// order store.
#[async_trait]
pub trait CacheBackend: Send + Sync + 'static {
    /// Returns the stored bytes, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value`, replacing any previous value, expiring after `ttl_secs`.
    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_secs: u64,
    ) -> Result<(), CacheError>;

    /// Removes `key`. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

// == Memory Backend ==
/// In-process backend sharing a [`MemoryCache`] behind a tokio `RwLock`.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    cache: Arc<RwLock<MemoryCache>>,
}

impl MemoryBackend {
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(MemoryCache::new(max_entries))),
        }
    }

    /// Handle to the underlying map, for the cleanup task.
    pub fn shared(&self) -> Arc<RwLock<MemoryCache>> {
        self.cache.clone()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        // Write lock: expired entries are dropped on read
        let mut cache = self.cache.write().await;
        Ok(cache.get(key))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        let mut cache = self.cache.write().await;
        cache.set(key, value, ttl_secs)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut cache = self.cache.write().await;
        cache.delete(key);
        Ok(())
    }
}

// == HTTP Backend ==
/// Body of `PUT /set` on the remote cache server.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteSetRequest {
    pub key: String,
    pub value: String,
    pub ttl: Option<u64>,
}

/// Body of a successful `GET /get/{key}` on the remote cache server.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteGetResponse {
    pub key: String,
    pub value: String,
}

/// Backend for a remote cache server exposing `PUT /set`,
/// `GET /get/{key}` and `DELETE /del/{key}`.
///
/// Values travel as JSON strings, so only UTF-8 payloads can be stored.
#[derive(Debug, Clone)]
pub struct HttpCacheBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCacheBackend {
    /// Creates a backend for the server at `base_url`. Every request is
    /// bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CacheError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CacheError::InvalidRequest(format!("bad cache URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CacheError::InvalidRequest(format!(
                "cache URL '{}' cannot be a base",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn transport_error(err: reqwest::Error) -> CacheError {
    CacheError::Unavailable(err.to_string())
}

async fn status_error(response: reqwest::Response) -> CacheError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status.is_client_error() {
        CacheError::InvalidRequest(format!("{}: {}", status, body))
    } else {
        CacheError::Unavailable(format!("{}: {}", status, body))
    }
}

#[async_trait]
impl CacheBackend for HttpCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let response = self
            .client
            .get(self.endpoint(&["get", key]))
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body: RemoteGetResponse = response
                    .json()
                    .await
                    .map_err(|e| CacheError::Corrupt(e.to_string()))?;
                Ok(Some(body.value.into_bytes()))
            }
            _ => Err(status_error(response).await),
        }
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        let value = String::from_utf8(value)
            .map_err(|_| CacheError::InvalidRequest("value is not valid UTF-8".to_string()))?;
        let body = RemoteSetRequest {
            key: key.to_string(),
            value,
            ttl: Some(ttl_secs),
        };

        let response = self
            .client
            .put(self.endpoint(&["set"]))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let response = self
            .client
            .delete(self.endpoint(&["del", key]))
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            _ => Err(status_error(response).await),
        }
    }
}
