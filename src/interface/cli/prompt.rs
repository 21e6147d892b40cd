use std::io::{self, BufRead, Write};

use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::info;

use crate::domain::LifecycleWarning;
use crate::ports::ConfirmProceed;

/// Asks on the terminal
pub struct StdinPrompt;

impl ConfirmProceed for StdinPrompt {
    fn confirm_proceed(&self, _warning: &LifecycleWarning) -> bool {
        blocking(|| ask(io::stdin().lock(), io::stdout()))
    }
}

/// Always proceeds; used with --non-interactive
pub struct AutoConfirm;

impl ConfirmProceed for AutoConfirm {
    fn confirm_proceed(&self, warning: &LifecycleWarning) -> bool {
        info!("Non-interactive mode: proceeding with {} anyway", warning.vm_name);
        true
    }
}

pub fn for_mode(non_interactive: bool) -> Box<dyn ConfirmProceed> {
    if non_interactive {
        Box::new(AutoConfirm)
    } else {
        Box::new(StdinPrompt)
    }
}

/// Only an explicit "y" proceeds; EOF and read errors decline
fn ask(mut input: impl BufRead, mut output: impl Write) -> bool {
    if write!(output, "Do you want to create an alarm anyway? (y/n): ")
        .and_then(|_| output.flush())
        .is_err()
    {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

/// Run a blocking read without stalling the other workers of a multi-threaded runtime.
/// block_in_place panics on a current-thread runtime, so that case runs inline.
fn blocking<T>(read: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => tokio::task::block_in_place(read),
        _ => read(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_only_yes_proceeds() {
        let mut shown = Vec::new();
        assert!(ask(Cursor::new("y\n"), &mut shown));
        assert_eq!(String::from_utf8(shown).unwrap(), "Do you want to create an alarm anyway? (y/n): ");

        assert!(ask(Cursor::new(" Y \n"), Vec::new()));
        assert!(!ask(Cursor::new("n\n"), Vec::new()));
        assert!(!ask(Cursor::new("yes please\n"), Vec::new()));
        assert!(!ask(Cursor::new(""), Vec::new()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_blocking_read_on_multi_thread_runtime() {
        assert!(blocking(|| ask(Cursor::new("y\n"), Vec::new())));
    }

    #[tokio::test]
    async fn test_blocking_read_on_current_thread_runtime() {
        assert!(!blocking(|| ask(Cursor::new("n\n"), Vec::new())));
    }

    #[test]
    fn test_blocking_read_outside_runtime() {
        assert_eq!(blocking(|| 7), 7);
    }
}
