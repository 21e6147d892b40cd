pub mod alarm_store;
pub mod confirm;
pub mod instance_source;
pub mod topic_source;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub use alarm_store::AlarmStore;
pub use confirm::ConfirmProceed;
pub use instance_source::InstanceSource;
pub use topic_source::TopicSource;

/// Failure talking to a control-plane API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("not found or not authorized: {message}")]
    NotFound { message: String },

    #[error("HTTP {status} {code}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Failure loading local credentials or building the API client
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("OCI config file not found at {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read OCI config file {}: {source}", .path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("profile [{profile}] not found in {}", .path.display())]
    ProfileNotFound { profile: String, path: PathBuf },

    #[error("profile [{profile}] is missing required field '{field}'")]
    MissingField { profile: String, field: &'static str },

    #[error("failed to read API signing key {}: {source}", .path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API signing key is encrypted; only unencrypted RSA keys are supported")]
    EncryptedKey,

    #[error("invalid API signing key: {0}")]
    InvalidKey(String),

    #[error("failed to build API client: {0}")]
    Client(String),
}

impl AuthError {
    /// What the user can do about it, when there is something obvious
    pub fn remedy(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } | Self::ProfileNotFound { .. } | Self::MissingField { .. } => {
                Some("Run 'oci setup config' to create a valid OCI configuration.")
            }
            Self::EncryptedKey => Some("Point key_file at an unencrypted PEM copy of the API key."),
            _ => None,
        }
    }
}

/// Authenticated access to the control-plane services used by one run
#[derive(Clone)]
pub struct CloudHandle {
    pub instances: Arc<dyn InstanceSource>,
    pub alarms: Arc<dyn AlarmStore>,
    pub topics: Arc<dyn TopicSource>,
}
