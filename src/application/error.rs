use thiserror::Error;

use crate::domain::{ResourceIdentifier, TopicState};
use crate::ports::ApiError;

/// Setup failures that end a run before any alarm is touched
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("VM not found or inaccessible: {id}: {source}")]
    InstanceNotFound {
        id: ResourceIdentifier,
        #[source]
        source: ApiError,
    },

    #[error("failed to list VMs in compartment {compartment}: {source}")]
    Inventory {
        compartment: ResourceIdentifier,
        #[source]
        source: ApiError,
    },

    #[error("unable to validate notification topic {id}: {source}")]
    TopicNotFound {
        id: ResourceIdentifier,
        #[source]
        source: ApiError,
    },

    #[error("notification topic {name} is not active (state: {state})")]
    TopicInactive { name: String, state: TopicState },

    #[error("failed to list notification topics in compartment {compartment}: {source}")]
    TopicListing {
        compartment: ResourceIdentifier,
        #[source]
        source: ApiError,
    },

    #[error("skipped alarm creation for non-running VM {vm}")]
    Declined { vm: String },
}
