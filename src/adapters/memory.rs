//! In-memory cloud used by tests: implements every port and counts calls.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    AlarmSpec, ExistingAlarm, InstanceState, ResourceIdentifier, ResourceKind, TopicHandle, TopicState,
    VmDescriptor,
};
use crate::ports::{AlarmStore, ApiError, CloudHandle, InstanceSource, TopicSource};

pub const COMPARTMENT: &str = "ocid1.compartment.oc1..home";
pub const TOPIC: &str = "ocid1.onstopic.oc1..alerts";

/// Number of calls made against each operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_instances: usize,
    pub get_instance: usize,
    pub get_topic: usize,
    pub list_topics: usize,
    pub list_alarms: usize,
    pub create_alarm: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.list_instances + self.get_instance + self.get_topic + self.list_topics + self.list_alarms + self.create_alarm
    }
}

#[derive(Default)]
struct CloudState {
    instances: Vec<VmDescriptor>,
    topics: Vec<TopicHandle>,
    alarms: Vec<(ResourceIdentifier, ExistingAlarm)>,
    rejected_alarms: HashSet<String>,
    failing_alarm_lists: bool,
    failing_instance_lists: bool,
    created: Vec<AlarmSpec>,
    calls: CallCounts,
}

#[derive(Default)]
pub struct InMemoryCloud {
    state: Mutex<CloudState>,
}

impl InMemoryCloud {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn handle(self: &Arc<Self>) -> CloudHandle {
        CloudHandle {
            instances: self.clone(),
            alarms: self.clone(),
            topics: self.clone(),
        }
    }

    pub fn add_instance(&self, vm: VmDescriptor) {
        self.state.lock().unwrap().instances.push(vm);
    }

    pub fn add_topic(&self, topic: TopicHandle) {
        self.state.lock().unwrap().topics.push(topic);
    }

    pub fn add_alarm(&self, compartment_id: ResourceIdentifier, alarm: ExistingAlarm) {
        self.state.lock().unwrap().alarms.push((compartment_id, alarm));
    }

    /// Make create_alarm fail for this VM
    pub fn reject_alarms_for(&self, vm_name: &str) {
        self.state.lock().unwrap().rejected_alarms.insert(vm_name.to_string());
    }

    /// Make every list_alarms call fail, as if monitoring were unreachable
    pub fn fail_list_alarms(&self) {
        self.state.lock().unwrap().failing_alarm_lists = true;
    }

    /// Make every list_instances call fail
    pub fn fail_list_instances(&self) {
        self.state.lock().unwrap().failing_instance_lists = true;
    }

    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls
    }

    pub fn created(&self) -> Vec<AlarmSpec> {
        self.state.lock().unwrap().created.clone()
    }
}

#[async_trait]
impl InstanceSource for InMemoryCloud {
    async fn list_instances(&self, compartment_id: &ResourceIdentifier) -> Result<Vec<VmDescriptor>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_instances += 1;
        if state.failing_instance_lists {
            return Err(unavailable());
        }
        Ok(state
            .instances
            .iter()
            .filter(|vm| &vm.compartment_id == compartment_id)
            .cloned()
            .collect())
    }

    async fn get_instance(&self, instance_id: &ResourceIdentifier) -> Result<VmDescriptor, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.get_instance += 1;
        state
            .instances
            .iter()
            .find(|vm| &vm.id == instance_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                message: format!("instance {instance_id} not found"),
            })
    }
}

#[async_trait]
impl TopicSource for InMemoryCloud {
    async fn get_topic(&self, topic_id: &ResourceIdentifier) -> Result<TopicHandle, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.get_topic += 1;
        state
            .topics
            .iter()
            .find(|topic| &topic.id == topic_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                message: format!("topic {topic_id} not found"),
            })
    }

    async fn list_topics(&self, _compartment_id: &ResourceIdentifier) -> Result<Vec<TopicHandle>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_topics += 1;
        Ok(state.topics.clone())
    }
}

#[async_trait]
impl AlarmStore for InMemoryCloud {
    async fn list_alarms(
        &self,
        compartment_id: &ResourceIdentifier,
        display_name: &str,
    ) -> Result<Vec<ExistingAlarm>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_alarms += 1;
        if state.failing_alarm_lists {
            return Err(unavailable());
        }
        Ok(state
            .alarms
            .iter()
            .filter(|(compartment, alarm)| compartment == compartment_id && alarm.display_name == display_name)
            .map(|(_, alarm)| alarm.clone())
            .collect())
    }

    async fn create_alarm(&self, spec: &AlarmSpec) -> Result<ResourceIdentifier, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.create_alarm += 1;

        let rejected = state
            .rejected_alarms
            .iter()
            .any(|vm_name| spec.display_name == crate::domain::alarm_display_name(vm_name));
        if rejected {
            return Err(ApiError::Service {
                status: 404,
                code: "NotAuthorizedOrNotFound".to_string(),
                message: "Authorization failed or requested resource not found.".to_string(),
            });
        }

        let id = ResourceIdentifier::validate(format!("ocid1.alarm.oc1..{}", state.created.len() + 1), ResourceKind::Alarm)
            .expect("generated alarm id");
        state.alarms.push((
            spec.compartment_id.clone(),
            ExistingAlarm {
                id: id.clone(),
                display_name: spec.display_name.clone(),
            },
        ));
        state.created.push(spec.clone());
        Ok(id)
    }
}

fn unavailable() -> ApiError {
    ApiError::Service {
        status: 503,
        code: "ServiceUnavailable".to_string(),
        message: "down".to_string(),
    }
}

pub fn compartment() -> ResourceIdentifier {
    ResourceIdentifier::validate(COMPARTMENT, ResourceKind::Compartment).unwrap()
}

pub fn topic_id() -> ResourceIdentifier {
    ResourceIdentifier::validate(TOPIC, ResourceKind::Topic).unwrap()
}

pub fn vm(name: &str, state: InstanceState) -> VmDescriptor {
    VmDescriptor::new(
        ResourceIdentifier::validate(format!("ocid1.instance.oc1..{name}"), ResourceKind::Instance).unwrap(),
        name.to_string(),
        state,
        compartment(),
    )
}

pub fn topic(state: TopicState) -> TopicHandle {
    TopicHandle {
        id: topic_id(),
        name: "ops-alerts".to_string(),
        lifecycle_state: state,
        description: None,
    }
}
