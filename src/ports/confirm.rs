use crate::domain::LifecycleWarning;

/// Policy hook consulted before provisioning a VM that is not running
pub trait ConfirmProceed: Send + Sync {
    fn confirm_proceed(&self, warning: &LifecycleWarning) -> bool;
}
