/*
[INPUT]:  Built-in defaults, optional YAML file, TODOLINK_* environment variables
[OUTPUT]: Validated application configuration and a ready backend client
[POS]:    Configuration layer - service location, credentials, attachment limits
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat, Map};
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use todolink_adapter::{ClientConfig, SupabaseClient};
use url::Url;

use crate::attachments::{AttachmentLimits, MAX_FILE_SIZE, MAX_IMAGES};

/// Hosted project used when nothing else is configured
pub const DEFAULT_SERVICE_URL: &str = "https://abghecgrcejwvmgtliex.supabase.co";

/// Environment variable prefix (`TODOLINK_SERVICE_KEY`, ...)
pub const ENV_PREFIX: &str = "TODOLINK";

/// Most attachment slots the widget lays out side by side
pub const MAX_IMAGES_CEILING: usize = 16;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Base URL of the hosted backend
    #[serde(default = "default_service_url")]
    pub service_url: String,
    /// Public (anon) API key sent with every request
    #[serde(default)]
    pub service_key: String,
    /// Table holding task rows
    #[serde(default = "default_table")]
    pub table: String,
    /// Storage bucket for attached images
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Prefix for public image URLs; derived from the service URL when unset
    #[serde(default)]
    pub image_base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub attachments: AttachmentsConfig,
}

/// Attachment widget limits
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct AttachmentsConfig {
    #[serde(default = "default_max_images")]
    pub max_images: usize,
    /// Per-file limit in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_images: default_max_images(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            service_key: String::new(),
            table: default_table(),
            bucket: default_bucket(),
            image_base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            attachments: AttachmentsConfig::default(),
        }
    }
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_table() -> String {
    "tasks".to_string()
}

fn default_bucket() -> String {
    "images".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_images() -> usize {
    MAX_IMAGES
}

fn default_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

impl AppConfig {
    /// Load configuration from a YAML file only
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Default config file location: `<config_dir>/todolink/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("todolink").join("config.yaml"))
    }

    /// Load defaults, then the YAML file, then `TODOLINK_*` variables.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(path, None)
    }

    /// Like [`AppConfig::load`] with the environment replaced by `env`
    pub fn load_from(path: Option<&Path>, env: Option<Map<String, String>>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path.to_path_buf())
                        .format(FileFormat::Yaml)
                        .required(true),
                );
            }
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder.add_source(
                        File::from(default).format(FileFormat::Yaml).required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        tracing::debug!(service_url = %config.service_url, table = %config.table, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.service_key.trim().is_empty() {
            bail!("service_key is not set (use the config file or {ENV_PREFIX}_SERVICE_KEY)");
        }
        Url::parse(&self.service_url)
            .with_context(|| format!("service_url is not a valid URL: {}", self.service_url))?;
        if let Some(base) = &self.image_base_url {
            Url::parse(base).with_context(|| format!("image_base_url is not a valid URL: {base}"))?;
        }
        if self.table.trim().is_empty() {
            bail!("table must not be empty");
        }
        if self.bucket.trim().is_empty() {
            bail!("bucket must not be empty");
        }
        if !(1..=MAX_IMAGES_CEILING).contains(&self.attachments.max_images) {
            bail!(
                "attachments.max_images must be between 1 and {MAX_IMAGES_CEILING}, got {}",
                self.attachments.max_images
            );
        }
        if self.attachments.max_file_size == 0 {
            bail!("attachments.max_file_size must be at least 1");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            table: self.table.clone(),
            bucket: self.bucket.clone(),
        }
    }

    pub fn build_client(&self) -> anyhow::Result<SupabaseClient> {
        SupabaseClient::with_config(&self.service_url, &self.service_key, self.client_config())
            .context("failed to create backend client")
    }

    /// Prefix that image keys are appended to for display
    pub fn image_base_url(&self) -> String {
        match &self.image_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!(
                "{}/storage/v1/object/public/{}",
                self.service_url.trim_end_matches('/'),
                self.bucket
            ),
        }
    }

    pub fn attachment_limits(&self) -> AttachmentLimits {
        AttachmentLimits {
            max_images: self.attachments.max_images,
            max_file_size: self.attachments.max_file_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.table, "tasks");
        assert_eq!(config.bucket, "images");
        assert_eq!(config.attachment_limits(), AttachmentLimits::default());
        assert_eq!(config.attachments.max_file_size, 2_097_152);
        assert_eq!(
            config.image_base_url(),
            "https://abghecgrcejwvmgtliex.supabase.co/storage/v1/object/public/images"
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let file = yaml_file(
            "service_url: http://localhost:54321\nservice_key: anon\nattachments:\n  max_images: 2\n",
        );
        let config = AppConfig::from_file(file.path()).expect("parse");
        assert_eq!(config.service_url, "http://localhost:54321");
        assert_eq!(config.service_key, "anon");
        assert_eq!(config.attachments.max_images, 2);
        assert_eq!(config.attachments.max_file_size, MAX_FILE_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.yaml");
        let config = AppConfig::from_file(&path).expect("parse example");
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.attachment_limits(), AttachmentLimits::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = yaml_file("service_key: from-file\ntable: todos\n");
        let config = AppConfig::load_from(
            Some(file.path()),
            env(&[
                ("TODOLINK_SERVICE_KEY", "from-env"),
                ("TODOLINK_ATTACHMENTS__MAX_FILE_SIZE", "1024"),
            ]),
        )
        .expect("load");

        assert_eq!(config.service_key, "from-env");
        assert_eq!(config.table, "todos");
        assert_eq!(config.attachments.max_file_size, 1024);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.yaml");
        assert!(AppConfig::load_from(Some(&missing), env(&[])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig {
            service_key: "anon".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());

        config.service_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.service_url = DEFAULT_SERVICE_URL.to_string();
        config.attachments.max_images = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_max_images() {
        let mut config = AppConfig {
            service_key: "anon".to_string(),
            ..AppConfig::default()
        };
        config.attachments.max_images = MAX_IMAGES_CEILING;
        assert!(config.validate().is_ok());

        config.attachments.max_images = 1_000_000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("attachments.max_images"));
    }

    #[test]
    fn test_explicit_image_base_url() {
        let config = AppConfig {
            image_base_url: Some("https://cdn.example.com/images/".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.image_base_url(), "https://cdn.example.com/images");
    }

    #[test]
    fn test_client_config_carries_table_and_timeouts() {
        let config = AppConfig {
            service_key: "anon".to_string(),
            table: "todos".to_string(),
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        let client_config = config.client_config();
        assert_eq!(client_config.table, "todos");
        assert_eq!(client_config.timeout, Duration::from_secs(5));

        let client = config.build_client().expect("client");
        assert_eq!(client.table(), "todos");
    }
}
