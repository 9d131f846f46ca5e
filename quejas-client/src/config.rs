//! Client Configuration
//!
//! Loaded from environment variables with the `QUEJAS_` prefix. Every
//! required setting has a hardcoded fallback; a warning is logged whenever
//! the fallback is used.

use std::path::PathBuf;
use tracing::warn;

use crate::upload::UploadOptions;

/// Environment variable names
pub mod env_keys {
    pub const API_URL: &str = "QUEJAS_API_URL";
    pub const PUBLIC_API_KEY: &str = "QUEJAS_PUBLIC_API_KEY";
    pub const S3_ENDPOINT: &str = "QUEJAS_S3_ENDPOINT";
    pub const S3_REGION: &str = "QUEJAS_S3_REGION";
    pub const S3_BUCKET: &str = "QUEJAS_S3_BUCKET";
    pub const S3_ACCESS_KEY_ID: &str = "QUEJAS_S3_ACCESS_KEY_ID";
    pub const S3_SECRET_ACCESS_KEY: &str = "QUEJAS_S3_SECRET_ACCESS_KEY";
    pub const S3_PATH_STYLE: &str = "QUEJAS_S3_PATH_STYLE";
    pub const IMAGE_DOMAIN: &str = "QUEJAS_IMAGE_DOMAIN";
    pub const EMAIL_FROM: &str = "QUEJAS_EMAIL_FROM";
    pub const EMAIL_FROM_NAME: &str = "QUEJAS_EMAIL_FROM_NAME";
    pub const FRONTEND_URL: &str = "QUEJAS_FRONTEND_URL";
    pub const STATE_DIR: &str = "QUEJAS_STATE_DIR";
    pub const HTTP_TIMEOUT_SECS: &str = "QUEJAS_HTTP_TIMEOUT_SECS";
    pub const UPLOAD_MAX_MB: &str = "QUEJAS_UPLOAD_MAX_MB";
    pub const UPLOAD_ALLOWED_TYPES: &str = "QUEJAS_UPLOAD_ALLOWED_TYPES";
}

/// Fallback values
pub mod defaults {
    pub const API_URL: &str = "http://localhost:3001/api";
    pub const PUBLIC_API_KEY: &str = "quejas-public-readonly";
    pub const S3_ENDPOINT: &str = "https://s3.us-east-1.amazonaws.com";
    pub const S3_REGION: &str = "us-east-1";
    pub const S3_BUCKET: &str = "quejas-siclo";
    pub const IMAGE_DOMAIN: &str = "https://images.siclo.com";
    pub const EMAIL_FROM: &str = "no-reply@siclo.com";
    pub const EMAIL_FROM_NAME: &str = "Siclo";
    pub const FRONTEND_URL: &str = "http://localhost:3000";
    pub const STATE_DIR: &str = ".quejas";
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}

/// Object storage settings used to mint presigned URLs locally
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Use `<endpoint>/<bucket>/<key>` instead of `<bucket>.<host>/<key>`
    pub path_style: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::S3_ENDPOINT.to_string(),
            region: defaults::S3_REGION.to_string(),
            bucket: defaults::S3_BUCKET.to_string(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            path_style: true,
        }
    }
}

impl StorageConfig {
    /// Whether credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

/// Default sender for outgoing email
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub from_address: String,
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_address: defaults::EMAIL_FROM.to_string(),
            from_name: defaults::EMAIL_FROM_NAME.to_string(),
        }
    }
}

/// Full client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, including any `/api` prefix
    pub api_url: String,
    /// Bearer credential used when no user token is stored
    pub public_api_key: String,
    /// Transport timeout
    pub http_timeout_secs: u64,
    /// Directory holding the persisted token
    pub state_dir: PathBuf,
    pub storage: StorageConfig,
    /// Public domain serving uploaded images
    pub image_domain: String,
    pub email: EmailConfig,
    /// Dashboard URL linked from notification emails
    pub frontend_url: String,
    pub upload: UploadOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::API_URL.to_string(),
            public_api_key: defaults::PUBLIC_API_KEY.to_string(),
            http_timeout_secs: defaults::HTTP_TIMEOUT_SECS,
            state_dir: PathBuf::from(defaults::STATE_DIR),
            storage: StorageConfig::default(),
            image_domain: defaults::IMAGE_DOMAIN.to_string(),
            email: EmailConfig::default(),
            frontend_url: defaults::FRONTEND_URL.to_string(),
            upload: UploadOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = |key: &str, fallback: &str| match get(key) {
            Some(value) => value,
            None => {
                warn!(variable = key, fallback = fallback, "Environment variable not set, using fallback");
                fallback.to_string()
            }
        };

        let secret = |key: &str| match get(key) {
            Some(value) => value,
            None => {
                warn!(variable = key, "Environment variable not set, presigning will be unavailable");
                String::new()
            }
        };

        let storage = StorageConfig {
            endpoint: required(env_keys::S3_ENDPOINT, defaults::S3_ENDPOINT),
            region: required(env_keys::S3_REGION, defaults::S3_REGION),
            bucket: required(env_keys::S3_BUCKET, defaults::S3_BUCKET),
            access_key_id: secret(env_keys::S3_ACCESS_KEY_ID),
            secret_access_key: secret(env_keys::S3_SECRET_ACCESS_KEY),
            path_style: get(env_keys::S3_PATH_STYLE)
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(true),
        };

        let email = EmailConfig {
            from_address: required(env_keys::EMAIL_FROM, defaults::EMAIL_FROM),
            from_name: required(env_keys::EMAIL_FROM_NAME, defaults::EMAIL_FROM_NAME),
        };

        let mut upload = UploadOptions::default();
        if let Some(max) = get(env_keys::UPLOAD_MAX_MB).and_then(|v| v.trim().parse().ok()) {
            upload.max_file_size_mb = max;
        }
        if let Some(types) = get(env_keys::UPLOAD_ALLOWED_TYPES) {
            upload.allowed_types = types
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Self {
            api_url: required(env_keys::API_URL, defaults::API_URL),
            public_api_key: required(env_keys::PUBLIC_API_KEY, defaults::PUBLIC_API_KEY),
            http_timeout_secs: get(env_keys::HTTP_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults::HTTP_TIMEOUT_SECS),
            state_dir: get(env_keys::STATE_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(defaults::STATE_DIR)),
            storage,
            image_domain: required(env_keys::IMAGE_DOMAIN, defaults::IMAGE_DOMAIN),
            email,
            frontend_url: required(env_keys::FRONTEND_URL, defaults::FRONTEND_URL),
            upload,
        }
    }

    /// Override the API URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_fallbacks_when_unset() {
        let config = ClientConfig::from_lookup(|_| None);

        assert_eq!(config.api_url, defaults::API_URL);
        assert_eq!(config.public_api_key, defaults::PUBLIC_API_KEY);
        assert_eq!(config.image_domain, defaults::IMAGE_DOMAIN);
        assert_eq!(config.email.from_address, defaults::EMAIL_FROM);
        assert_eq!(config.http_timeout_secs, 30);
        assert!(!config.storage.has_credentials());
        assert_eq!(config.upload.max_file_size_mb, 10);
    }

    #[test]
    fn test_values_from_environment() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (env_keys::API_URL, "https://api.siclo.com"),
            (env_keys::S3_ACCESS_KEY_ID, "AKIA"),
            (env_keys::S3_SECRET_ACCESS_KEY, "secret"),
            (env_keys::S3_PATH_STYLE, "false"),
            (env_keys::UPLOAD_MAX_MB, "5"),
            (env_keys::UPLOAD_ALLOWED_TYPES, "image/png, image/jpeg"),
            (env_keys::STATE_DIR, "/tmp/quejas"),
        ]));

        assert_eq!(config.api_url, "https://api.siclo.com");
        assert!(config.storage.has_credentials());
        assert!(!config.storage.path_style);
        assert_eq!(config.upload.max_file_size_mb, 5);
        assert_eq!(config.upload.allowed_types, vec!["image/png", "image/jpeg"]);
        assert_eq!(config.state_dir, PathBuf::from("/tmp/quejas"));
    }

    #[test]
    fn test_blank_value_uses_fallback() {
        let config = ClientConfig::from_lookup(lookup_from(&[(env_keys::API_URL, "  ")]));
        assert_eq!(config.api_url, defaults::API_URL);
    }
}
