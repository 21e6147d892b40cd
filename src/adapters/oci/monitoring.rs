use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::client::{endpoint, OciClient};
use crate::domain::{AlarmSpec, ExistingAlarm, ResourceIdentifier, ResourceKind};
use crate::ports::{AlarmStore, ApiError};

const API_VERSION: &str = "20180401";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlarmRecord {
    id: String,
    display_name: String,
}

fn alarm_id(raw: String) -> Result<ResourceIdentifier, ApiError> {
    ResourceIdentifier::validate(raw, ResourceKind::Alarm).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Alarm store backed by the Monitoring API
pub struct OciAlarmStore {
    client: Arc<OciClient>,
}

impl OciAlarmStore {
    pub fn new(client: Arc<OciClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlarmStore for OciAlarmStore {
    async fn list_alarms(
        &self,
        compartment_id: &ResourceIdentifier,
        display_name: &str,
    ) -> Result<Vec<ExistingAlarm>, ApiError> {
        let mut url = endpoint(&self.client.endpoints().monitoring, &[API_VERSION, "alarms"])?;
        url.query_pairs_mut()
            .append_pair("compartmentId", compartment_id.as_str())
            .append_pair("displayName", display_name);

        let records: Vec<AlarmRecord> = self.client.list_json(url).await?;
        records
            .into_iter()
            .map(|record| {
                Ok(ExistingAlarm {
                    id: alarm_id(record.id)?,
                    display_name: record.display_name,
                })
            })
            .collect()
    }

    async fn create_alarm(&self, spec: &AlarmSpec) -> Result<ResourceIdentifier, ApiError> {
        let url = endpoint(&self.client.endpoints().monitoring, &[API_VERSION, "alarms"])?;
        let created: AlarmRecord = self.client.post_json(url, spec).await?;
        alarm_id(created.id)
    }
}
