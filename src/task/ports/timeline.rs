//! Repository port for the append-only timeline log.

use crate::task::domain::{TaskId, TimelineEntry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for timeline repository operations.
pub type TimelineRepositoryResult<T> = Result<T, TimelineRepositoryError>;

/// Timeline persistence contract.
///
/// Entries are append-only: implementations never update or delete them.
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// Appends an entry to the log.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineRepositoryError::Persistence`] on storage failure;
    /// appends are never rejected for any other reason.
    async fn append(&self, entry: &TimelineEntry) -> TimelineRepositoryResult<()>;

    /// Returns all entries for a task, ordered by creation timestamp
    /// ascending.
    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> TimelineRepositoryResult<Vec<TimelineEntry>>;
}

/// Errors returned by timeline repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TimelineRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TimelineRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
