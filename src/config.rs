/// Configuration for the Write-Hub sync core
///
/// This module handles loading configuration for the remote service backends
/// from environment variables. Every value has a working default so local
/// development needs no setup.
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Remote auth provider settings
    pub auth: AuthConfig,
    /// Remote document store settings
    pub documents: DocumentStoreConfig,
    /// Remote object storage settings
    pub storage: StorageConfig,
    /// Local device storage settings
    pub device: DeviceConfig,
}

impl HubConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            auth: AuthConfig::from_env(),
            documents: DocumentStoreConfig::from_env(),
            storage: StorageConfig::from_env(),
            device: DeviceConfig::from_env(),
        }
    }
}

/// Remote auth provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the identity endpoints
    pub base_url: String,
    /// API key appended to every auth request
    pub api_key: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WRITEHUB_AUTH_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string()),
            api_key: std::env::var("WRITEHUB_AUTH_API_KEY").unwrap_or_default(),
        }
    }
}

/// Remote document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    /// Base URL of the document REST endpoints
    pub base_url: String,
}

impl DocumentStoreConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WRITEHUB_DOCUMENTS_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1/documents".to_string()),
        }
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name
    pub bucket: String,
    /// Base URL for public access (CDN domain)
    pub base_url: String,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            bucket: std::env::var("WRITEHUB_MEDIA_BUCKET")
                .unwrap_or_else(|_| "write-hub-media".to_string()),
            base_url: std::env::var("WRITEHUB_MEDIA_BASE_URL")
                .unwrap_or_else(|_| "https://s3.amazonaws.com".to_string()),
            path_style: std::env::var("WRITEHUB_MEDIA_PATH_STYLE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        }
    }

    /// Build the public URL of an uploaded object
    pub fn object_url(&self, key: &str) -> String {
        if self.path_style {
            format!("{}/{}/{}", self.base_url, self.bucket, key)
        } else {
            format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
        }
    }
}

/// Local device storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Path of the key/value file backing local device storage
    pub store_path: String,
    /// Fixed key the like record is stored under
    pub like_record_key: String,
}

impl DeviceConfig {
    pub fn from_env() -> Self {
        Self {
            store_path: std::env::var("WRITEHUB_DEVICE_STORE")
                .unwrap_or_else(|_| "write-hub-device.json".to_string()),
            like_record_key: "userLikes".to_string(),
        }
    }
}
