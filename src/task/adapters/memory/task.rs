//! In-memory task repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::InMemoryAssignmentRepository;
use crate::task::{
    domain::{Task, TaskId, TaskVisibility},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Holds a handle to the assignment repository so contractor-scoped
/// listings can resolve which tasks a contractor is assigned to, mirroring
/// the join a database-backed adapter performs.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    assignments: InMemoryAssignmentRepository,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository sharing the given assignment store.
    #[must_use]
    pub fn new(assignments: InMemoryAssignmentRepository) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            assignments,
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_visible(&self, visibility: &TaskVisibility) -> TaskRepositoryResult<Vec<Task>> {
        let snapshot: Vec<Task> = {
            let state = self.state.read().map_err(|err| {
                TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            state.values().cloned().collect()
        };

        let mut visible = Vec::new();
        for task in snapshot {
            let contractors = self
                .assignments
                .contractors_for(task.id())
                .map_err(|err| {
                    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
                })?;
            if visibility.permits(task.client_id(), &contractors) {
                visible.push(task);
            }
        }

        visible.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(visible)
    }
}
