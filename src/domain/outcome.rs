use super::{ResourceIdentifier, VmDescriptor};

/// Result of reconciling one VM's alarm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmOutcome {
    Created(ResourceIdentifier),
    SkippedExisting(ResourceIdentifier),
    Failed(String),
}

impl AlarmOutcome {
    /// The VM ends up with an alarm
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Per-VM outcomes in discovery order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    entries: Vec<(VmDescriptor, AlarmOutcome)>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, vm: VmDescriptor, outcome: AlarmOutcome) {
        self.entries.push((vm, outcome));
    }

    pub fn entries(&self) -> &[(VmDescriptor, AlarmOutcome)] {
        &self.entries
    }

    pub fn processed(&self) -> usize {
        self.entries.len()
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, AlarmOutcome::Created(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, AlarmOutcome::SkippedExisting(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AlarmOutcome::Failed(_)))
    }

    pub fn succeeded(&self) -> usize {
        self.count(AlarmOutcome::is_success)
    }

    /// Failed VMs with the reason reported for each
    pub fn failures(&self) -> impl Iterator<Item = (&VmDescriptor, &str)> {
        self.entries.iter().filter_map(|(vm, outcome)| match outcome {
            AlarmOutcome::Failed(reason) => Some((vm, reason.as_str())),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&AlarmOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, outcome)| predicate(outcome)).count()
    }
}
