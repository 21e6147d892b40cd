use async_trait::async_trait;

use super::ApiError;
use crate::domain::{AlarmSpec, ExistingAlarm, ResourceIdentifier};

/// Port for reading and creating monitoring alarms
#[async_trait]
pub trait AlarmStore: Send + Sync {
    /// List alarms in a compartment whose display name matches
    async fn list_alarms(
        &self,
        compartment_id: &ResourceIdentifier,
        display_name: &str,
    ) -> Result<Vec<ExistingAlarm>, ApiError>;

    /// Create an alarm and return its OCID
    async fn create_alarm(&self, spec: &AlarmSpec) -> Result<ResourceIdentifier, ApiError>;
}
