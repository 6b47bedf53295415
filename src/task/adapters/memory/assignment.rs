//! In-memory assignment repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Assignment, TaskId, UserId},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};

/// Thread-safe in-memory assignment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignmentRepository {
    state: Arc<RwLock<HashMap<(TaskId, UserId), Assignment>>>,
}

impl InMemoryAssignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contractor ids assigned to a task.
    pub(super) fn contractors_for(
        &self,
        task_id: TaskId,
    ) -> AssignmentRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(|err| {
            AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .values()
            .filter(|assignment| assignment.task_id() == task_id)
            .map(Assignment::contractor_id)
            .collect())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn store(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (assignment.task_id(), assignment.contractor_id());
        if state.contains_key(&key) {
            return Err(AssignmentRepositoryError::DuplicatePair {
                task_id: assignment.task_id(),
                contractor_id: assignment.contractor_id(),
            });
        }
        state.insert(key, assignment.clone());
        Ok(())
    }

    async fn find(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
    ) -> AssignmentRepositoryResult<Option<Assignment>> {
        let state = self.state.read().map_err(|err| {
            AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&(task_id, contractor_id)).cloned())
    }

    async fn list_for_task(&self, task_id: TaskId) -> AssignmentRepositoryResult<Vec<Assignment>> {
        let state = self.state.read().map_err(|err| {
            AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut assignments: Vec<Assignment> = state
            .values()
            .filter(|assignment| assignment.task_id() == task_id)
            .cloned()
            .collect();
        assignments.sort_by_key(Assignment::assigned_at);
        Ok(assignments)
    }

    async fn delete(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
    ) -> AssignmentRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.remove(&(task_id, contractor_id)).is_some())
    }
}
