//! `PostgreSQL` repository implementation for assignment storage.

use super::{
    models::{AssignmentRow, NewAssignmentRow},
    schema::task_assignments,
    support::{PgPool, get_conn_with, run_blocking_with},
};
use crate::task::{
    domain::{Assignment, AssignmentId, PersistedAssignmentData, TaskId, UserId},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed assignment repository.
///
/// Relies on a unique index over `(task_id, contractor_id)` to enforce the
/// one-record-per-pair invariant under concurrent writers.
#[derive(Debug, Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> AssignmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AssignmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, AssignmentRepositoryError::persistence)?;
                f(&mut connection)
            },
            AssignmentRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn store(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()> {
        let task_id = assignment.task_id();
        let contractor_id = assignment.contractor_id();
        let new_row = NewAssignmentRow {
            id: assignment.id().into_inner(),
            task_id: task_id.into_inner(),
            contractor_id: contractor_id.into_inner(),
            assigned_by: assignment.assigned_by().into_inner(),
            assigned_at: assignment.assigned_at(),
        };

        self.run(move |connection| {
            diesel::insert_into(task_assignments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AssignmentRepositoryError::DuplicatePair {
                            task_id,
                            contractor_id,
                        }
                    }
                    _ => AssignmentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
    ) -> AssignmentRepositoryResult<Option<Assignment>> {
        self.run(move |connection| {
            let row = task_assignments::table
                .filter(task_assignments::task_id.eq(task_id.into_inner()))
                .filter(task_assignments::contractor_id.eq(contractor_id.into_inner()))
                .select(AssignmentRow::as_select())
                .first::<AssignmentRow>(connection)
                .optional()
                .map_err(AssignmentRepositoryError::persistence)?;
            Ok(row.map(row_to_assignment))
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> AssignmentRepositoryResult<Vec<Assignment>> {
        self.run(move |connection| {
            let rows = task_assignments::table
                .filter(task_assignments::task_id.eq(task_id.into_inner()))
                .order(task_assignments::assigned_at.asc())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(AssignmentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_assignment).collect())
        })
        .await
    }

    async fn delete(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
    ) -> AssignmentRepositoryResult<bool> {
        self.run(move |connection| {
            let deleted = diesel::delete(
                task_assignments::table
                    .filter(task_assignments::task_id.eq(task_id.into_inner()))
                    .filter(task_assignments::contractor_id.eq(contractor_id.into_inner())),
            )
            .execute(connection)
            .map_err(AssignmentRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn row_to_assignment(row: AssignmentRow) -> Assignment {
    Assignment::from_persisted(PersistedAssignmentData {
        id: AssignmentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        contractor_id: UserId::from_uuid(row.contractor_id),
        assigned_by: UserId::from_uuid(row.assigned_by),
        assigned_at: row.assigned_at,
    })
}
