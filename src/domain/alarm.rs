use serde::Serialize;

use super::{ResourceIdentifier, VmDescriptor};

const ALARM_NAME_SUFFIX: &str = " - Unresponsive or Stopped Alert";

/// Metric namespace that publishes InstanceAccessibilityStatus
pub const HEALTH_NAMESPACE: &str = "oci_compute_instance_health";
pub const PENDING_DURATION: &str = "PT5M";
pub const MESSAGE_FORMAT: &str = "ONS_OPTIMIZED";
/// A VM that stops answering is always paged
pub const SEVERITY: &str = "CRITICAL";

/// Canonical display name of the liveness alarm for a VM
pub fn alarm_display_name(vm_name: &str) -> String {
    format!("{vm_name}{ALARM_NAME_SUFFIX}")
}

/// Fires when the instance reports itself inaccessible, or stops reporting for 10 minutes
pub fn liveness_query(vm_name: &str) -> String {
    format!(
        "InstanceAccessibilityStatus[5m]{{resourceDisplayName = \"{vm_name}\"}}.mean() > 0 || \
         InstanceAccessibilityStatus[5m]{{resourceDisplayName = \"{vm_name}\"}}.absent(10m) == 1"
    )
}

/// Alarm definition submitted to the monitoring service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmSpec {
    pub display_name: String,
    pub compartment_id: ResourceIdentifier,
    pub metric_compartment_id: ResourceIdentifier,
    pub namespace: String,
    pub query: String,
    pub severity: String,
    pub destinations: Vec<ResourceIdentifier>,
    pub is_enabled: bool,
    pub body: String,
    pub pending_duration: String,
    pub message_format: String,
}

impl AlarmSpec {
    pub fn for_vm(vm: &VmDescriptor, topic_id: &ResourceIdentifier) -> Self {
        let name = &vm.display_name;

        Self {
            display_name: alarm_display_name(name),
            compartment_id: vm.compartment_id.clone(),
            metric_compartment_id: vm.compartment_id.clone(),
            namespace: HEALTH_NAMESPACE.to_string(),
            query: liveness_query(name),
            severity: SEVERITY.to_string(),
            destinations: vec![topic_id.clone()],
            is_enabled: true,
            body: format!("VM {name} is unresponsive or in a stopped state. Please check the instance status."),
            pending_duration: PENDING_DURATION.to_string(),
            message_format: MESSAGE_FORMAT.to_string(),
        }
    }
}

/// Alarm already present in a compartment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingAlarm {
    pub id: ResourceIdentifier,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstanceState, ResourceKind};

    fn vm(name: &str) -> VmDescriptor {
        VmDescriptor::new(
            ResourceIdentifier::validate("ocid1.instance.oc1..vm1", ResourceKind::Instance).unwrap(),
            name.to_string(),
            InstanceState::Running,
            ResourceIdentifier::validate("ocid1.compartment.oc1..c1", ResourceKind::Compartment).unwrap(),
        )
    }

    #[test]
    fn test_query_matches_fixed_template() {
        assert_eq!(
            liveness_query("web-1"),
            "InstanceAccessibilityStatus[5m]{resourceDisplayName = \"web-1\"}.mean() > 0 || \
             InstanceAccessibilityStatus[5m]{resourceDisplayName = \"web-1\"}.absent(10m) == 1"
        );
    }

    #[test]
    fn test_spec_targets_vm_compartment_and_topic() {
        let topic = ResourceIdentifier::validate("ocid1.onstopic.oc1..t1", ResourceKind::Topic).unwrap();
        let spec = AlarmSpec::for_vm(&vm("web-1"), &topic);

        assert_eq!(spec.display_name, "web-1 - Unresponsive or Stopped Alert");
        assert_eq!(spec.compartment_id.as_str(), "ocid1.compartment.oc1..c1");
        assert_eq!(spec.metric_compartment_id, spec.compartment_id);
        assert_eq!(spec.destinations, vec![topic]);
        assert_eq!(spec.severity, "CRITICAL");
        assert!(spec.is_enabled);
    }

    #[test]
    fn test_spec_serializes_with_api_field_names() {
        let topic = ResourceIdentifier::validate("ocid1.onstopic.oc1..t1", ResourceKind::Topic).unwrap();
        let json = serde_json::to_value(AlarmSpec::for_vm(&vm("db"), &topic)).unwrap();

        assert_eq!(json["displayName"], "db - Unresponsive or Stopped Alert");
        assert_eq!(json["metricCompartmentId"], "ocid1.compartment.oc1..c1");
        assert_eq!(json["namespace"], "oci_compute_instance_health");
        assert_eq!(json["severity"], "CRITICAL");
        assert_eq!(json["destinations"][0], "ocid1.onstopic.oc1..t1");
        assert_eq!(json["isEnabled"], true);
        assert_eq!(json["pendingDuration"], "PT5M");
        assert_eq!(json["messageFormat"], "ONS_OPTIMIZED");
    }
}
