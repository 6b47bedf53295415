//! In-memory timeline repository for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskId, TimelineEntry},
    ports::{TimelineRepository, TimelineRepositoryError, TimelineRepositoryResult},
};

/// Thread-safe in-memory timeline log.
///
/// Entries are held in insertion order; listing filters by task and sorts
/// by creation timestamp, so same-instant entries keep their append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimelineRepository {
    state: Arc<RwLock<Vec<TimelineEntry>>>,
}

impl InMemoryTimelineRepository {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimelineRepository for InMemoryTimelineRepository {
    async fn append(&self, entry: &TimelineEntry) -> TimelineRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TimelineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.push(entry.clone());
        Ok(())
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> TimelineRepositoryResult<Vec<TimelineEntry>> {
        let state = self.state.read().map_err(|err| {
            TimelineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut entries: Vec<TimelineEntry> = state
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        entries.sort_by_key(TimelineEntry::created_at);
        Ok(entries)
    }
}
