//! Observers for asserting on execution checkpoints.
use std::sync::{Arc, Mutex};
use txflow_execution::StatusObserver;
use txflow_types::ExecutionStatus;

/// A [`StatusObserver`] that records every checkpoint.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ExecutionStatus>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checkpoints seen so far, in order.
    pub fn events(&self) -> Vec<ExecutionStatus> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusObserver for RecordingObserver {
    fn notify(&self, status: &ExecutionStatus) {
        self.events.lock().unwrap().push(status.clone());
    }
}

/// A [`StatusObserver`] that panics on every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingObserver;

impl StatusObserver for PanickingObserver {
    fn notify(&self, status: &ExecutionStatus) {
        panic!("observer failed on {status:?}");
    }
}
