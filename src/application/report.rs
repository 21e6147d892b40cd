use std::fmt;

use tracing::{error, info};

use crate::domain::{AlarmOutcome, RunSummary, VmDescriptor};

const RULE: &str = "==================================================";

/// Which kind of target the run covered; decides what counts as failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    AllVms,
    SingleVm,
}

/// Collects outcomes as they arrive and logs progress
pub struct RunReporter {
    mode: RunMode,
    summary: RunSummary,
}

impl RunReporter {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            summary: RunSummary::new(),
        }
    }

    pub fn record(&mut self, vm: VmDescriptor, outcome: AlarmOutcome) {
        match &outcome {
            AlarmOutcome::Created(id) => {
                info!("✓ Alarm created successfully for {} (Alarm ID: {})", vm.display_name, id)
            }
            AlarmOutcome::SkippedExisting(id) => {
                info!("• Alarm already exists for {} (Alarm ID: {}), skipping", vm.display_name, id)
            }
            AlarmOutcome::Failed(reason) => error!("✗ Error creating alarm for {}: {}", vm.display_name, reason),
        }

        self.summary.push(vm, outcome);
    }

    pub fn finish(self) -> RunReport {
        RunReport {
            mode: self.mode,
            summary: self.summary,
        }
    }
}

/// Final result of a provisioning run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: RunMode,
    pub summary: RunSummary,
}

impl RunReport {
    /// Partial success counts as success; an empty compartment is not a failure
    pub fn succeeded(&self) -> bool {
        match self.mode {
            RunMode::SingleVm => self.summary.processed() > 0 && self.summary.failed() == 0,
            RunMode::AllVms => self.summary.processed() == 0 || self.summary.succeeded() > 0,
        }
    }

    /// Closing line for a single-VM run, worded after what happened to the VM
    pub fn verdict(&self) -> Option<&'static str> {
        if self.mode != RunMode::SingleVm {
            return None;
        }

        Some(match self.summary.entries().first().map(|(_, outcome)| outcome) {
            Some(AlarmOutcome::Created(_)) => "✓ Successfully created alarm for VM",
            Some(AlarmOutcome::SkippedExisting(_)) => "• Alarm already exists for VM; nothing to create",
            _ => "✗ Failed to create alarm for VM",
        })
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.summary;

        writeln!(f, "{RULE}")?;
        writeln!(f, "ALARM CREATION SUMMARY")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total VMs processed: {}", summary.processed())?;
        writeln!(f, "Alarms created: {}", summary.created())?;
        writeln!(f, "Existing alarms skipped: {}", summary.skipped())?;
        writeln!(f, "Failed alarm creations: {}", summary.failed())?;

        if summary.failed() > 0 {
            writeln!(f)?;
            writeln!(f, "Failed VMs:")?;
            for (vm, reason) in summary.failures() {
                writeln!(f, "  - {}: {}", vm.display_name, reason)?;
            }
        }

        Ok(())
    }
}
