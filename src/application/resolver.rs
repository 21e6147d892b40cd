use std::sync::Arc;

use tracing::info;

use super::ProvisionError;
use crate::domain::{LifecycleWarning, ResourceIdentifier, VmDescriptor};
use crate::ports::InstanceSource;

/// What a run operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every running VM in a compartment
    Compartment(ResourceIdentifier),
    /// One VM; its compartment comes from the instance record
    Instance(ResourceIdentifier),
}

/// Resolved compartment and VM set
#[derive(Debug, Clone)]
pub struct Resolution {
    pub compartment_id: ResourceIdentifier,
    pub vms: Vec<VmDescriptor>,
    pub warning: Option<LifecycleWarning>,
}

/// Turns a target into concrete VMs. Read-only.
pub struct ResourceResolver {
    instances: Arc<dyn InstanceSource>,
}

impl ResourceResolver {
    pub fn new(instances: Arc<dyn InstanceSource>) -> Self {
        Self { instances }
    }

    pub async fn resolve(&self, target: &Target) -> Result<Resolution, ProvisionError> {
        match target {
            Target::Compartment(compartment_id) => self.resolve_compartment(compartment_id).await,
            Target::Instance(instance_id) => self.resolve_instance(instance_id).await,
        }
    }

    async fn resolve_compartment(&self, compartment_id: &ResourceIdentifier) -> Result<Resolution, ProvisionError> {
        info!("Fetching all VMs in compartment: {}", compartment_id);

        let vms: Vec<VmDescriptor> = self
            .instances
            .list_instances(compartment_id)
            .await
            .map_err(|source| ProvisionError::Inventory {
                compartment: compartment_id.clone(),
                source,
            })?
            .into_iter()
            .filter(|vm| vm.lifecycle_state.is_running())
            .collect();

        for vm in &vms {
            info!("Found VM: {} (ID: {})", vm.display_name, vm.id);
        }

        Ok(Resolution {
            compartment_id: compartment_id.clone(),
            vms,
            warning: None,
        })
    }

    async fn resolve_instance(&self, instance_id: &ResourceIdentifier) -> Result<Resolution, ProvisionError> {
        info!("Fetching VM: {}", instance_id);

        let vm = self
            .instances
            .get_instance(instance_id)
            .await
            .map_err(|source| ProvisionError::InstanceNotFound {
                id: instance_id.clone(),
                source,
            })?;

        info!(
            "Found VM: {} (State: {}, AD: {}), compartment {}",
            vm.display_name,
            vm.lifecycle_state,
            vm.availability_domain.as_deref().unwrap_or("unknown"),
            vm.compartment_id
        );

        let warning = (!vm.lifecycle_state.is_running()).then(|| LifecycleWarning {
            vm_name: vm.display_name.clone(),
            state: vm.lifecycle_state.clone(),
        });

        Ok(Resolution {
            compartment_id: vm.compartment_id.clone(),
            vms: vec![vm],
            warning,
        })
    }
}
