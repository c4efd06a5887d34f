/*
[INPUT]:  HTTP configuration (service URL, access key, timeouts, table and bucket names)
[OUTPUT]: Configured reqwest client ready for table and storage calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{Result, SupabaseError};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::types::ApiErrorBody;

/// REST (PostgREST) path prefix
const REST_PREFIX: &str = "rest/v1/";
/// Object storage path prefix
const STORAGE_PREFIX: &str = "storage/v1/";

pub const DEFAULT_TABLE: &str = "tasks";
pub const DEFAULT_BUCKET: &str = "images";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Remote table holding task rows
    pub table: String,
    /// Storage bucket holding task images
    pub bucket: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            table: DEFAULT_TABLE.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }
}

/// HTTP client for the hosted backend (table API + object storage)
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http_client: Client,
    base_url: Url,
    table: String,
    bucket: String,
}

impl SupabaseClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_config(base_url, api_key, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// Every request carries the access key both as `apikey` and as a
    /// bearer token, which is what the gateway expects for anonymous keys.
    pub fn with_config(base_url: &str, api_key: &str, config: ClientConfig) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(SupabaseError::Config("service key is empty".to_string()));
        }
        if config.table.is_empty() || config.bucket.is_empty() {
            return Err(SupabaseError::Config(
                "table and bucket names must not be empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key)
            .map_err(|err| SupabaseError::Config(format!("invalid service key: {err}")))?;
        key_value.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|err| SupabaseError::Config(format!("invalid service key: {err}")))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            table: config.table,
            bucket: config.bucket,
        })
    }

    /// Service base URL, always ending with `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Build full URL for table endpoints
    fn rest_url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(REST_PREFIX)?.join(endpoint)
    }

    /// Build full URL for storage endpoints
    pub(crate) fn storage_url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(STORAGE_PREFIX)?.join(endpoint)
    }

    /// Build request builder for table endpoints
    pub(crate) fn rest_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.rest_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder for storage endpoints
    pub(crate) fn storage_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.storage_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build a plain GET request for an absolute URL (public objects)
    pub(crate) fn get_url(&self, url: Url) -> RequestBuilder {
        self.http_client.get(url)
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send_checked(builder).await?;
        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Send a request whose successful response carries no useful body
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send_checked(builder).await?;
        Ok(())
    }

    /// Send a request and return the raw body bytes
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = self.send_checked(builder).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                SupabaseError::Timeout
            } else {
                SupabaseError::Http(err)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body
                }
            });
        tracing::debug!(status = status.as_u16(), %message, "backend request failed");
        Err(SupabaseError::api_error(status, message))
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
