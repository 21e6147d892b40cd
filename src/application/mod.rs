mod error;
mod provisioning;
mod reconciler;
mod report;
mod resolver;
mod topic;

pub use error::ProvisionError;
pub use provisioning::{ProvisioningService, RunRequest};
pub use reconciler::AlarmReconciler;
pub use report::{RunMode, RunReport, RunReporter};
pub use resolver::{ResourceResolver, Target};
pub use topic::TopicValidator;
