use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::client::{endpoint, OciClient};
use crate::domain::{InstanceState, ResourceIdentifier, ResourceKind, VmDescriptor};
use crate::ports::{ApiError, InstanceSource};

const API_VERSION: &str = "20160918";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstanceRecord {
    id: String,
    display_name: Option<String>,
    lifecycle_state: String,
    compartment_id: String,
    availability_domain: Option<String>,
}

impl InstanceRecord {
    fn into_descriptor(self) -> Result<VmDescriptor, ApiError> {
        let id = ResourceIdentifier::validate(self.id, ResourceKind::Instance)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let compartment_id = ResourceIdentifier::validate(self.compartment_id, ResourceKind::Compartment)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let display_name = self.display_name.unwrap_or_else(|| id.to_string());

        Ok(
            VmDescriptor::new(id, display_name, InstanceState::from_api(&self.lifecycle_state), compartment_id)
                .with_availability_domain(self.availability_domain),
        )
    }
}

/// Compute inventory backed by the Core Services API
pub struct OciComputeSource {
    client: Arc<OciClient>,
}

impl OciComputeSource {
    pub fn new(client: Arc<OciClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InstanceSource for OciComputeSource {
    async fn list_instances(&self, compartment_id: &ResourceIdentifier) -> Result<Vec<VmDescriptor>, ApiError> {
        let mut url = endpoint(&self.client.endpoints().compute, &[API_VERSION, "instances"])?;
        url.query_pairs_mut().append_pair("compartmentId", compartment_id.as_str());

        let records: Vec<InstanceRecord> = self.client.list_json(url).await?;
        records.into_iter().map(InstanceRecord::into_descriptor).collect()
    }

    async fn get_instance(&self, instance_id: &ResourceIdentifier) -> Result<VmDescriptor, ApiError> {
        let url = endpoint(
            &self.client.endpoints().compute,
            &[API_VERSION, "instances", instance_id.as_str()],
        )?;

        let record: InstanceRecord = self.client.get_json(url).await?;
        record.into_descriptor()
    }
}
