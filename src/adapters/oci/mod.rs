mod client;
mod compute;
mod config_file;
mod monitoring;
mod notification;
mod signer;

use std::sync::Arc;

use tracing::info;

pub use client::{OciClient, ServiceEndpoints};
pub use compute::OciComputeSource;
pub use config_file::{default_config_path, OciProfile, DEFAULT_PROFILE};
pub use monitoring::OciAlarmStore;
pub use notification::OciTopicSource;
pub use signer::RequestSigner;

use crate::config::Config;
use crate::ports::{AuthError, CloudHandle};

/// Authenticated entry point to the OCI services
#[derive(Clone)]
pub struct OciAdapter {
    client: Arc<OciClient>,
}

impl OciAdapter {
    pub fn new(client: OciClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Load the configured profile and signing key
    pub fn connect(config: &Config) -> Result<Self, AuthError> {
        let profile = OciProfile::load(&config.config_file, &config.profile)?;
        let region = config.region.clone().unwrap_or_else(|| profile.region.clone());

        let signer = RequestSigner::from_profile(&profile)?;
        let client = OciClient::new(signer, ServiceEndpoints::for_region(&region)?)?;

        info!("✓ Loaded OCI profile [{}] (region {})", config.profile, region);
        Ok(Self::new(client))
    }

    pub fn compute_source(&self) -> OciComputeSource {
        OciComputeSource::new(self.client.clone())
    }

    pub fn alarm_store(&self) -> OciAlarmStore {
        OciAlarmStore::new(self.client.clone())
    }

    pub fn topic_source(&self) -> OciTopicSource {
        OciTopicSource::new(self.client.clone())
    }

    pub fn into_handle(self) -> CloudHandle {
        CloudHandle {
            instances: Arc::new(self.compute_source()),
            alarms: Arc::new(self.alarm_store()),
            topics: Arc::new(self.topic_source()),
        }
    }
}
