use std::sync::Arc;

use tracing::{debug, info};

use super::RunReporter;
use crate::domain::{alarm_display_name, AlarmOutcome, AlarmSpec, TopicHandle, VmDescriptor};
use crate::ports::AlarmStore;

/// Ensures each VM has its liveness alarm.
///
/// VMs are handled one at a time in the order given. A failure on one VM is
/// recorded as its outcome and the loop moves on; nothing is retried, and a
/// rerun is safe because existing alarms are detected by name.
pub struct AlarmReconciler {
    alarms: Arc<dyn AlarmStore>,
}

impl AlarmReconciler {
    pub fn new(alarms: Arc<dyn AlarmStore>) -> Self {
        Self { alarms }
    }

    pub async fn reconcile(&self, vms: &[VmDescriptor], topic: &TopicHandle, reporter: &mut RunReporter) {
        info!("Creating alarms for {} VM(s)...", vms.len());

        for vm in vms {
            let outcome = self.reconcile_vm(vm, topic).await;
            reporter.record(vm.clone(), outcome);
        }
    }

    pub async fn reconcile_vm(&self, vm: &VmDescriptor, topic: &TopicHandle) -> AlarmOutcome {
        let name = alarm_display_name(&vm.display_name);

        let existing = match self.alarms.list_alarms(&vm.compartment_id, &name).await {
            Ok(alarms) => alarms.into_iter().find(|alarm| alarm.display_name == name),
            Err(e) => return AlarmOutcome::Failed(format!("could not check existing alarms: {e}")),
        };

        if let Some(alarm) = existing {
            return AlarmOutcome::SkippedExisting(alarm.id);
        }

        let spec = AlarmSpec::for_vm(vm, &topic.id);
        debug!("Submitting alarm '{}' in {}", spec.display_name, spec.compartment_id);

        match self.alarms.create_alarm(&spec).await {
            Ok(id) => AlarmOutcome::Created(id),
            Err(e) => AlarmOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{compartment, topic, vm, InMemoryCloud};
    use crate::application::RunMode;
    use crate::domain::{ExistingAlarm, InstanceState, ResourceIdentifier, ResourceKind, TopicState};

    fn running(names: &[&str]) -> Vec<VmDescriptor> {
        names.iter().map(|name| vm(name, InstanceState::Running)).collect()
    }

    async fn run(cloud: &Arc<InMemoryCloud>, vms: &[VmDescriptor]) -> RunReporter {
        let reconciler = AlarmReconciler::new(cloud.handle().alarms);
        let mut reporter = RunReporter::new(RunMode::AllVms);
        reconciler.reconcile(vms, &topic(TopicState::Active), &mut reporter).await;
        reporter
    }

    #[tokio::test]
    async fn test_creates_missing_alarms() {
        let cloud = InMemoryCloud::new();
        let vms = running(&["a", "b"]);

        let report = run(&cloud, &vms).await.finish();

        assert_eq!(report.summary.created(), 2);
        let names: Vec<_> = cloud.created().into_iter().map(|spec| spec.display_name).collect();
        assert_eq!(
            names,
            vec!["a - Unresponsive or Stopped Alert", "b - Unresponsive or Stopped Alert"]
        );
    }

    #[tokio::test]
    async fn test_existing_alarm_is_skipped() {
        let cloud = InMemoryCloud::new();
        let existing = ResourceIdentifier::validate("ocid1.alarm.oc1..old", ResourceKind::Alarm).unwrap();
        cloud.add_alarm(
            compartment(),
            ExistingAlarm {
                id: existing.clone(),
                display_name: "a - Unresponsive or Stopped Alert".to_string(),
            },
        );

        let report = run(&cloud, &running(&["a"])).await.finish();

        assert_eq!(report.summary.entries()[0].1, AlarmOutcome::SkippedExisting(existing));
        assert_eq!(cloud.calls().create_alarm, 0);
    }

    #[tokio::test]
    async fn test_second_run_creates_nothing() {
        let cloud = InMemoryCloud::new();
        let vms = running(&["a", "b", "c"]);

        run(&cloud, &vms).await;
        let second = run(&cloud, &vms).await.finish();

        assert_eq!(second.summary.skipped(), 3);
        assert_eq!(second.summary.created(), 0);
        assert_eq!(cloud.calls().create_alarm, 3);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_remaining_vms() {
        let cloud = InMemoryCloud::new();
        cloud.reject_alarms_for("b");

        let report = run(&cloud, &running(&["a", "b", "c"])).await.finish();
        let outcomes: Vec<_> = report.summary.entries().iter().map(|(vm, o)| (vm.display_name.as_str(), o)).collect();

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], ("a", AlarmOutcome::Created(_))));
        assert!(matches!(outcomes[1], ("b", AlarmOutcome::Failed(_))));
        assert!(matches!(outcomes[2], ("c", AlarmOutcome::Created(_))));
        assert_eq!(cloud.calls().create_alarm, 3);
    }

    #[tokio::test]
    async fn test_unlisted_alarms_are_not_created_blind() {
        let cloud = InMemoryCloud::new();
        cloud.fail_list_alarms();

        let report = run(&cloud, &running(&["a", "b"])).await.finish();

        assert_eq!(report.summary.processed(), 2);
        assert_eq!(report.summary.failed(), 2);
        for (_, reason) in report.summary.failures() {
            assert_eq!(reason, "could not check existing alarms: HTTP 503 ServiceUnavailable: down");
        }
        assert_eq!(cloud.calls().list_alarms, 2);
        assert_eq!(cloud.calls().create_alarm, 0);
    }
}
