//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::{task_assignments, tasks},
    support::{PgPool, get_conn_with, run_blocking_with},
};
use crate::task::{
    domain::{
        DateWindow, HomeId, PersistedTaskData, ProposedSlot, ServiceId, Task, TaskId, TaskStatus,
        TaskVisibility, TimeOfDay, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_visible(&self, visibility: &TaskVisibility) -> TaskRepositoryResult<Vec<Task>> {
        let scope = *visibility;
        self.run(move |connection| {
            let rows = match scope {
                TaskVisibility::Client(client_id) => tasks::table
                    .filter(tasks::client_id.eq(client_id.into_inner()))
                    .order(tasks::created_at.desc())
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection),
                TaskVisibility::Contractor(contractor_id) => {
                    let assigned_tasks = task_assignments::table
                        .select(task_assignments::task_id)
                        .filter(task_assignments::contractor_id.eq(contractor_id.into_inner()));
                    tasks::table
                        .filter(tasks::id.eq_any(assigned_tasks))
                        .order(tasks::created_at.desc())
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(connection)
                }
                TaskVisibility::All => tasks::table
                    .order(tasks::created_at.desc())
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection),
            }
            .map_err(TaskRepositoryError::persistence)?;

            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        client_id: task.client_id().into_inner(),
        service_id: task.service_id().into_inner(),
        home_id: task.home_id().into_inner(),
        status: task.status().as_str().to_owned(),
        preferred_start: task.preferred_window().start(),
        preferred_end: task.preferred_window().end(),
        proposed_date: task.proposed().map(ProposedSlot::date),
        proposed_time: task.proposed().map(|slot| slot.time().as_str().to_owned()),
        approved_at: task.approved_at(),
        completed_at: task.completed_at(),
        client_notes: task.client_notes().map(str::to_owned),
        contractor_notes: task.contractor_notes().map(str::to_owned),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        status: task.status().as_str().to_owned(),
        proposed_date: task.proposed().map(ProposedSlot::date),
        proposed_time: task.proposed().map(|slot| slot.time().as_str().to_owned()),
        approved_at: task.approved_at(),
        completed_at: task.completed_at(),
        client_notes: task.client_notes().map(str::to_owned),
        contractor_notes: task.contractor_notes().map(str::to_owned),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        client_id,
        service_id,
        home_id,
        status: persisted_status,
        preferred_start,
        preferred_end,
        proposed_date,
        proposed_time,
        approved_at,
        completed_at,
        client_notes,
        contractor_notes,
        created_at,
        updated_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let preferred_window =
        DateWindow::new(preferred_start, preferred_end).map_err(TaskRepositoryError::persistence)?;

    // The two slot columns are written together; a row with only one set
    // is corrupt.
    let proposed = match (proposed_date, proposed_time) {
        (Some(date), Some(time)) => {
            let time_of_day = TimeOfDay::new(time).map_err(TaskRepositoryError::persistence)?;
            Some(ProposedSlot::new(date, time_of_day))
        }
        (None, None) => None,
        _ => {
            return Err(TaskRepositoryError::persistence(std::io::Error::other(
                format!("task {id} has a partial proposed slot"),
            )));
        }
    };

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        client_id: UserId::from_uuid(client_id),
        service_id: ServiceId::from_uuid(service_id),
        home_id: HomeId::from_uuid(home_id),
        status,
        preferred_window,
        proposed,
        approved_at,
        completed_at,
        client_notes,
        contractor_notes,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
