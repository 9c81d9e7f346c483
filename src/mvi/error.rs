use thiserror::Error;

/// Errors returned by store handles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The dispatch loop has stopped; the action was not enqueued.
    #[error("store is closed")]
    Closed,
}
