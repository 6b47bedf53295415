//! Diesel row models for task lifecycle persistence.

use super::schema::{task_assignments, task_timeline, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Requesting client.
    pub client_id: uuid::Uuid,
    /// Requested service offering.
    pub service_id: uuid::Uuid,
    /// Home the service applies to.
    pub home_id: uuid::Uuid,
    /// Workflow status.
    pub status: String,
    /// Preferred window start.
    pub preferred_start: DateTime<Utc>,
    /// Preferred window end.
    pub preferred_end: DateTime<Utc>,
    /// Proposed visit date.
    pub proposed_date: Option<DateTime<Utc>>,
    /// Proposed visit time.
    pub proposed_time: Option<String>,
    /// Timestamp of the first approval.
    pub approved_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Client's free-text notes.
    pub client_notes: Option<String>,
    /// Contractor's free-text notes.
    pub contractor_notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Requesting client.
    pub client_id: uuid::Uuid,
    /// Requested service offering.
    pub service_id: uuid::Uuid,
    /// Home the service applies to.
    pub home_id: uuid::Uuid,
    /// Workflow status.
    pub status: String,
    /// Preferred window start.
    pub preferred_start: DateTime<Utc>,
    /// Preferred window end.
    pub preferred_end: DateTime<Utc>,
    /// Proposed visit date.
    pub proposed_date: Option<DateTime<Utc>>,
    /// Proposed visit time.
    pub proposed_time: Option<String>,
    /// Timestamp of the first approval.
    pub approved_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Client's free-text notes.
    pub client_notes: Option<String>,
    /// Contractor's free-text notes.
    pub contractor_notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model writing the full mutable state of a task.
///
/// `None` values null their columns: the aggregate is the source of truth,
/// so a cleared slot or note must clear the stored column too.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Workflow status.
    pub status: String,
    /// Proposed visit date.
    pub proposed_date: Option<DateTime<Utc>>,
    /// Proposed visit time.
    pub proposed_time: Option<String>,
    /// Timestamp of the first approval.
    pub approved_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Client's free-text notes.
    pub client_notes: Option<String>,
    /// Contractor's free-text notes.
    pub contractor_notes: Option<String>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for assignment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignmentRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Assigned task.
    pub task_id: uuid::Uuid,
    /// Assigned contractor.
    pub contractor_id: uuid::Uuid,
    /// Actor that made the assignment.
    pub assigned_by: uuid::Uuid,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

/// Insert model for assignment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_assignments)]
pub struct NewAssignmentRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Assigned task.
    pub task_id: uuid::Uuid,
    /// Assigned contractor.
    pub contractor_id: uuid::Uuid,
    /// Actor that made the assignment.
    pub assigned_by: uuid::Uuid,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

/// Query result row for timeline entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_timeline)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimelineRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Recorded lifecycle action.
    pub action: String,
    /// Acting user.
    pub performed_by: uuid::Uuid,
    /// Free-text details.
    pub details: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for timeline entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_timeline)]
pub struct NewTimelineRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Recorded lifecycle action.
    pub action: String,
    /// Acting user.
    pub performed_by: uuid::Uuid,
    /// Free-text details.
    pub details: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
