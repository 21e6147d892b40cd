use std::sync::Arc;

use tracing::{info, warn};

use super::{
    AlarmReconciler, ProvisionError, ResourceResolver, RunMode, RunReport, RunReporter, Target, TopicValidator,
};
use crate::domain::{ResourceIdentifier, TopicHandle};
use crate::ports::{CloudHandle, ConfirmProceed, TopicSource};

/// Validated input for one provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub target: Target,
    pub topic: ResourceIdentifier,
}

impl RunRequest {
    pub fn mode(&self) -> RunMode {
        match self.target {
            Target::Compartment(_) => RunMode::AllVms,
            Target::Instance(_) => RunMode::SingleVm,
        }
    }
}

/// Main application service: resolve, validate the topic, reconcile, report
pub struct ProvisioningService {
    resolver: ResourceResolver,
    topic_validator: TopicValidator,
    reconciler: AlarmReconciler,
    topics: Arc<dyn TopicSource>,
}

impl ProvisioningService {
    pub fn new(cloud: CloudHandle) -> Self {
        Self {
            resolver: ResourceResolver::new(cloud.instances),
            topic_validator: TopicValidator::new(cloud.topics.clone()),
            reconciler: AlarmReconciler::new(cloud.alarms),
            topics: cloud.topics,
        }
    }

    pub async fn run(&self, request: &RunRequest, confirm: &dyn ConfirmProceed) -> Result<RunReport, ProvisionError> {
        let resolution = self.resolver.resolve(&request.target).await?;

        // Must pass before any alarm is created
        let topic = self.topic_validator.validate_topic(&request.topic).await?;

        if let Some(warning) = &resolution.warning {
            warn!("⚠ {}", warning);
            if !confirm.confirm_proceed(warning) {
                return Err(ProvisionError::Declined {
                    vm: warning.vm_name.clone(),
                });
            }
        }

        let mut reporter = RunReporter::new(request.mode());

        if resolution.vms.is_empty() {
            warn!("No running VMs found in compartment {}", resolution.compartment_id);
            return Ok(reporter.finish());
        }

        self.reconciler.reconcile(&resolution.vms, &topic, &mut reporter).await;
        Ok(reporter.finish())
    }

    /// Topics in a compartment, to help pick the one passed to --topic
    pub async fn list_topics(&self, compartment_id: &ResourceIdentifier) -> Result<Vec<TopicHandle>, ProvisionError> {
        info!("Fetching notification topics in compartment: {}", compartment_id);

        self.topics
            .list_topics(compartment_id)
            .await
            .map_err(|source| ProvisionError::TopicListing {
                compartment: compartment_id.clone(),
                source,
            })
    }
}
