use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::warn;
use txflow_types::ExecutionStatus;

/// Receives progress checkpoints while a transaction executes.
///
/// Notification is a side channel. A panicking observer is logged and
/// ignored; it never aborts the execution.
pub trait StatusObserver {
    /// Called at each checkpoint.
    fn notify(&self, status: &ExecutionStatus);
}

impl<F> StatusObserver for F
where
    F: Fn(&ExecutionStatus),
{
    fn notify(&self, status: &ExecutionStatus) {
        self(status)
    }
}

/// An observer that ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StatusObserver for NoopObserver {
    fn notify(&self, _status: &ExecutionStatus) {}
}

/// Notify `observer`, swallowing a panic.
pub(crate) fn emit<O>(observer: &O, status: ExecutionStatus)
where
    O: StatusObserver + ?Sized,
{
    if catch_unwind(AssertUnwindSafe(|| observer.notify(&status))).is_err() {
        warn!(?status, "status observer panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closure_observer_receives_status() {
        let seen = Mutex::new(Vec::new());
        let observer = |status: &ExecutionStatus| seen.lock().unwrap().push(status.clone());
        emit(&observer, ExecutionStatus::PendingSignature);
        assert_eq!(*seen.lock().unwrap(), vec![ExecutionStatus::PendingSignature]);
    }

    #[test]
    fn panicking_observer_is_contained() {
        let observer = |_: &ExecutionStatus| panic!("observer bug");
        emit(&observer, ExecutionStatus::PendingSignature);
    }
}
