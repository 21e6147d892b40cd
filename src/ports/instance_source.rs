use async_trait::async_trait;

use super::ApiError;
use crate::domain::{ResourceIdentifier, VmDescriptor};

/// Port for reading the compute inventory
#[async_trait]
pub trait InstanceSource: Send + Sync {
    /// List every instance in a compartment, whatever its lifecycle state
    async fn list_instances(&self, compartment_id: &ResourceIdentifier) -> Result<Vec<VmDescriptor>, ApiError>;

    /// Fetch a single instance
    async fn get_instance(&self, instance_id: &ResourceIdentifier) -> Result<VmDescriptor, ApiError>;
}
