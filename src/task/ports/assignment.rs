//! Repository port for task-contractor assignment records.

use crate::task::domain::{Assignment, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Assignment persistence contract.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Stores a new assignment record.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::DuplicatePair`] when a record
    /// for the same `(task, contractor)` pair already exists.
    async fn store(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()>;

    /// Finds the assignment linking a task and a contractor.
    ///
    /// Returns `None` when no such record exists.
    async fn find(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
    ) -> AssignmentRepositoryResult<Option<Assignment>>;

    /// Returns all live assignments for a task.
    async fn list_for_task(&self, task_id: TaskId) -> AssignmentRepositoryResult<Vec<Assignment>>;

    /// Deletes the assignment linking a task and a contractor.
    ///
    /// Returns whether a record was removed; deleting an absent pair is not
    /// an error.
    async fn delete(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
    ) -> AssignmentRepositoryResult<bool>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// An assignment for the `(task, contractor)` pair already exists.
    #[error("contractor {contractor_id} is already assigned to task {task_id}")]
    DuplicatePair {
        /// Task side of the duplicate pair.
        task_id: TaskId,
        /// Contractor side of the duplicate pair.
        contractor_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
