use std::fmt;

use super::ResourceIdentifier;

/// Compute instance lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceState {
    Moving,
    Provisioning,
    Running,
    Starting,
    Stopping,
    Stopped,
    CreatingImage,
    Terminating,
    Terminated,
    Other(String),
}

impl InstanceState {
    pub fn from_api(state: &str) -> Self {
        match state {
            "MOVING" => Self::Moving,
            "PROVISIONING" => Self::Provisioning,
            "RUNNING" => Self::Running,
            "STARTING" => Self::Starting,
            "STOPPING" => Self::Stopping,
            "STOPPED" => Self::Stopped,
            "CREATING_IMAGE" => Self::CreatingImage,
            "TERMINATING" => Self::Terminating,
            "TERMINATED" => Self::Terminated,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            Self::Moving => "MOVING",
            Self::Provisioning => "PROVISIONING",
            Self::Running => "RUNNING",
            Self::Starting => "STARTING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::CreatingImage => "CREATING_IMAGE",
            Self::Terminating => "TERMINATING",
            Self::Terminated => "TERMINATED",
            Self::Other(state) => state,
        };
        f.write_str(state)
    }
}

/// A compute instance targeted for alarm provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmDescriptor {
    pub id: ResourceIdentifier,
    pub display_name: String,
    pub lifecycle_state: InstanceState,
    pub compartment_id: ResourceIdentifier,
    pub availability_domain: Option<String>,
}

impl VmDescriptor {
    pub fn new(
        id: ResourceIdentifier,
        display_name: String,
        lifecycle_state: InstanceState,
        compartment_id: ResourceIdentifier,
    ) -> Self {
        Self {
            id,
            display_name,
            lifecycle_state,
            compartment_id,
            availability_domain: None,
        }
    }

    pub fn with_availability_domain(mut self, availability_domain: Option<String>) -> Self {
        self.availability_domain = availability_domain;
        self
    }
}

/// Raised when a single targeted VM is not running; the caller decides whether to go on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleWarning {
    pub vm_name: String,
    pub state: InstanceState,
}

impl fmt::Display for LifecycleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VM {} is not in RUNNING state (current: {})",
            self.vm_name, self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_known_and_unknown_values() {
        assert_eq!(InstanceState::from_api("RUNNING"), InstanceState::Running);
        assert_eq!(InstanceState::from_api("CREATING_IMAGE").to_string(), "CREATING_IMAGE");
        assert_eq!(
            InstanceState::from_api("UNKNOWN_ENUM_VALUE"),
            InstanceState::Other("UNKNOWN_ENUM_VALUE".to_string())
        );
        assert!(!InstanceState::Stopped.is_running());
    }

    #[test]
    fn test_warning_message() {
        let warning = LifecycleWarning {
            vm_name: "web-1".to_string(),
            state: InstanceState::Stopped,
        };
        assert_eq!(warning.to_string(), "VM web-1 is not in RUNNING state (current: STOPPED)");
    }
}
