pub mod alarm;
pub mod identifier;
pub mod instance;
pub mod outcome;
pub mod topic;

pub use alarm::{alarm_display_name, AlarmSpec, ExistingAlarm};
pub use identifier::{InvalidIdentifierError, ResourceIdentifier, ResourceKind};
pub use instance::{InstanceState, LifecycleWarning, VmDescriptor};
pub use outcome::{AlarmOutcome, RunSummary};
pub use topic::{TopicHandle, TopicState};
