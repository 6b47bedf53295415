//! `PostgreSQL` repository implementation for the timeline log.

use super::{
    models::{NewTimelineRow, TimelineRow},
    schema::task_timeline,
    support::{PgPool, get_conn_with, run_blocking_with},
};
use crate::task::{
    domain::{
        PersistedTimelineEntryData, TaskId, TimelineAction, TimelineEntry, TimelineEntryId, UserId,
    },
    ports::{TimelineRepository, TimelineRepositoryError, TimelineRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed timeline log.
#[derive(Debug, Clone)]
pub struct PostgresTimelineRepository {
    pool: PgPool,
}

impl PostgresTimelineRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> TimelineRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TimelineRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TimelineRepositoryError::persistence)?;
                f(&mut connection)
            },
            TimelineRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TimelineRepository for PostgresTimelineRepository {
    async fn append(&self, entry: &TimelineEntry) -> TimelineRepositoryResult<()> {
        let new_row = NewTimelineRow {
            id: entry.id().into_inner(),
            task_id: entry.task_id().into_inner(),
            action: entry.action().as_str().to_owned(),
            performed_by: entry.performed_by().into_inner(),
            details: entry.details().map(str::to_owned),
            created_at: entry.created_at(),
        };

        self.run(move |connection| {
            diesel::insert_into(task_timeline::table)
                .values(&new_row)
                .execute(connection)
                .map_err(TimelineRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> TimelineRepositoryResult<Vec<TimelineEntry>> {
        self.run(move |connection| {
            let rows = task_timeline::table
                .filter(task_timeline::task_id.eq(task_id.into_inner()))
                .order(task_timeline::created_at.asc())
                .select(TimelineRow::as_select())
                .load::<TimelineRow>(connection)
                .map_err(TimelineRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn row_to_entry(row: TimelineRow) -> TimelineRepositoryResult<TimelineEntry> {
    let action = TimelineAction::try_from(row.action.as_str())
        .map_err(TimelineRepositoryError::persistence)?;
    Ok(TimelineEntry::from_persisted(PersistedTimelineEntryData {
        id: TimelineEntryId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        action,
        performed_by: UserId::from_uuid(row.performed_by),
        details: row.details,
        created_at: row.created_at,
    }))
}
