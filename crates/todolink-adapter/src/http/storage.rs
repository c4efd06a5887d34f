/*
[INPUT]:  Image bytes, content types and object keys
[OUTPUT]: Stored object paths, public object URLs and public object bytes
[POS]:    HTTP layer - object storage endpoints
[UPDATE]: When changing upload options or key generation
*/

use rand::Rng;
use rand::distributions::Alphanumeric;
use reqwest::{Method, Url};

use crate::http::{Result, SupabaseClient};
use crate::types::{StoredObject, UploadResponse};

/// Length of generated object keys
pub const OBJECT_KEY_LEN: usize = 32;

/// Cache lifetime sent with uploads, in seconds
const UPLOAD_CACHE_SECONDS: u32 = 3600;

/// Random `[0-9a-zA-Z]` key for a new object
pub fn random_object_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(OBJECT_KEY_LEN)
        .map(char::from)
        .collect()
}

impl SupabaseClient {
    /// Upload an object under `key`. Existing objects are never overwritten.
    ///
    /// POST /storage/v1/object/{bucket}/{key}
    pub async fn upload_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject> {
        let endpoint = format!("object/{}/{}", self.bucket(), key);
        let size = bytes.len();
        let builder = self
            .storage_request(Method::POST, &endpoint)?
            .header("cache-control", format!("max-age={UPLOAD_CACHE_SECONDS}"))
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);

        let response: UploadResponse = self.send_json(builder).await?;
        tracing::debug!(key = %response.key, size, "object uploaded");
        Ok(StoredObject {
            path: key.to_string(),
            key: response.key,
        })
    }

    /// Upload an image under a freshly generated random key
    pub async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> Result<StoredObject> {
        let key = random_object_key();
        self.upload_object(&key, bytes, content_type).await
    }

    /// Public URL of an object in the configured bucket
    ///
    /// {base}/storage/v1/object/public/{bucket}/{key}
    pub fn public_object_url(&self, key: &str) -> Result<Url> {
        let endpoint = format!("object/public/{}/{}", self.bucket(), key);
        Ok(self.storage_url(&endpoint)?)
    }

    /// Download an object through its public URL
    pub async fn download_public_object(&self, key: &str) -> Result<Vec<u8>> {
        let url = self.public_object_url(key)?;
        self.send_bytes(self.get_url(url)).await
    }
}
