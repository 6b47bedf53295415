//! Assignment ledger: the task-contractor relation.

use crate::task::{
    domain::{Assignment, Task, TaskId, TaskStatus, TimelineAction, TimelineEntry, UserId},
    ports::{
        AssignmentRepository, AssignmentRepositoryError, TaskRepository, TaskRepositoryError,
        TimelineRepository, TimelineRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for assignment ledger operations.
#[derive(Debug, Error)]
pub enum AssignmentLedgerError {
    /// Assignment persistence failed.
    #[error(transparent)]
    Assignment(#[from] AssignmentRepositoryError),
    /// Task persistence failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// Timeline persistence failed.
    #[error(transparent)]
    Timeline(#[from] TimelineRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
}

/// Result type for assignment ledger operations.
pub type AssignmentLedgerResult<T> = Result<T, AssignmentLedgerError>;

/// Ledger of which contractors are responsible for which tasks.
///
/// Owns the many-to-many relation between tasks and contractors:
/// assignment is idempotent per `(task, contractor)` pair, and removing the
/// last assignment from a task still waiting on a proposal returns that
/// task to the request queue.
pub struct AssignmentLedger<A, T, L, C>
where
    A: AssignmentRepository,
    T: TaskRepository,
    L: TimelineRepository,
    C: Clock + Send + Sync,
{
    assignments: Arc<A>,
    tasks: Arc<T>,
    timeline: Arc<L>,
    clock: Arc<C>,
}

impl<A, T, L, C> Clone for AssignmentLedger<A, T, L, C>
where
    A: AssignmentRepository,
    T: TaskRepository,
    L: TimelineRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            assignments: Arc::clone(&self.assignments),
            tasks: Arc::clone(&self.tasks),
            timeline: Arc::clone(&self.timeline),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A, T, L, C> AssignmentLedger<A, T, L, C>
where
    A: AssignmentRepository,
    T: TaskRepository,
    L: TimelineRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment ledger.
    #[must_use]
    pub const fn new(assignments: Arc<A>, tasks: Arc<T>, timeline: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            assignments,
            tasks,
            timeline,
            clock,
        }
    }

    /// Links a contractor to a task.
    ///
    /// A pre-existing record for the pair is returned unchanged; the
    /// operation never creates duplicates. The storage-level uniqueness
    /// constraint covers the window between lookup and insert, and a
    /// duplicate rejection in that window resolves to the surviving record.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentLedgerError::Assignment`] when persistence
    /// fails.
    pub async fn assign(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
        assigned_by: UserId,
    ) -> AssignmentLedgerResult<Assignment> {
        if let Some(existing) = self.assignments.find(task_id, contractor_id).await? {
            debug!(%task_id, %contractor_id, "contractor already assigned");
            return Ok(existing);
        }

        let assignment = Assignment::new(task_id, contractor_id, assigned_by, &*self.clock);
        match self.assignments.store(&assignment).await {
            Ok(()) => Ok(assignment),
            Err(AssignmentRepositoryError::DuplicatePair { .. }) => self
                .assignments
                .find(task_id, contractor_id)
                .await?
                .ok_or_else(|| {
                    AssignmentLedgerError::Assignment(AssignmentRepositoryError::DuplicatePair {
                        task_id,
                        contractor_id,
                    })
                }),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes a contractor from a task.
    ///
    /// Deleting an absent pair is a no-op. When a record was removed, a
    /// timeline entry is appended, and a task left with no assignments
    /// while still in [`TaskStatus::AwaitingContractorProposal`] reverts to
    /// [`TaskStatus::Requested`]. Returns the refreshed task.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentLedgerError::TaskNotFound`] when the task does
    /// not exist, or persistence errors from the underlying stores.
    pub async fn unassign(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
        removed_by: UserId,
    ) -> AssignmentLedgerResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(AssignmentLedgerError::TaskNotFound(task_id))?;

        let removed = self.assignments.delete(task_id, contractor_id).await?;
        if removed {
            let entry = TimelineEntry::new(
                task_id,
                removed_by,
                TimelineAction::ContractorUnassigned,
                Some(format!("Contractor {contractor_id} unassigned")),
                &*self.clock,
            );
            self.timeline.append(&entry).await?;
        }

        let remaining = self.assignments.list_for_task(task_id).await?;
        if remaining.is_empty() && task.status() == TaskStatus::AwaitingContractorProposal {
            task.revert_to_requested(&*self.clock);
            self.tasks.update(&task).await?;
        }

        Ok(task)
    }

    /// Returns the live assignments for a task.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentLedgerError::Assignment`] when persistence
    /// fails.
    pub async fn assignments_for(&self, task_id: TaskId) -> AssignmentLedgerResult<Vec<Assignment>> {
        Ok(self.assignments.list_for_task(task_id).await?)
    }
}
