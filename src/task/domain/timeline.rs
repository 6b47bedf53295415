//! Append-only timeline audit records.

use super::{ParseTimelineActionError, TaskId, TimelineEntryId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle action recorded on a task's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineAction {
    /// Client created the task.
    TaskCreated,
    /// An admin assigned a contractor.
    ContractorAssigned,
    /// An admin removed a contractor assignment.
    ContractorUnassigned,
    /// A contractor proposed a schedule.
    ScheduleProposed,
    /// A contractor accepted the task outright.
    TaskAccepted,
    /// The client approved the proposed schedule.
    ScheduleApproved,
    /// The client rejected the proposed schedule.
    ScheduleRejected,
    /// The status moved through the generic transition operation.
    StatusUpdated,
    /// The task was cancelled.
    TaskCancelled,
}

impl TimelineAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "task_created",
            Self::ContractorAssigned => "contractor_assigned",
            Self::ContractorUnassigned => "contractor_unassigned",
            Self::ScheduleProposed => "schedule_proposed",
            Self::TaskAccepted => "task_accepted",
            Self::ScheduleApproved => "schedule_approved",
            Self::ScheduleRejected => "schedule_rejected",
            Self::StatusUpdated => "status_updated",
            Self::TaskCancelled => "task_cancelled",
        }
    }
}

impl fmt::Display for TimelineAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimelineAction {
    type Error = ParseTimelineActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "task_created" => Ok(Self::TaskCreated),
            "contractor_assigned" => Ok(Self::ContractorAssigned),
            "contractor_unassigned" => Ok(Self::ContractorUnassigned),
            "schedule_proposed" => Ok(Self::ScheduleProposed),
            "task_accepted" => Ok(Self::TaskAccepted),
            "schedule_approved" => Ok(Self::ScheduleApproved),
            "schedule_rejected" => Ok(Self::ScheduleRejected),
            "status_updated" => Ok(Self::StatusUpdated),
            "task_cancelled" => Ok(Self::TaskCancelled),
            _ => Err(ParseTimelineActionError(value.to_owned())),
        }
    }
}

/// Immutable audit record of one lifecycle event on a task.
///
/// Entries are written once per mutating operation and never updated or
/// deleted; readers order them by creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    id: TimelineEntryId,
    task_id: TaskId,
    action: TimelineAction,
    performed_by: UserId,
    details: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTimelineEntryData {
    /// Persisted entry identifier.
    pub id: TimelineEntryId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted action label.
    pub action: TimelineAction,
    /// Persisted acting user.
    pub performed_by: UserId,
    /// Persisted free-text details.
    pub details: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TimelineEntry {
    /// Creates a new timeline entry.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        performed_by: UserId,
        action: TimelineAction,
        details: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TimelineEntryId::new(),
            task_id,
            action,
            performed_by,
            details,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTimelineEntryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            action: data.action,
            performed_by: data.performed_by,
            details: data.details,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TimelineEntryId {
        self.id
    }

    /// Returns the task this entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> TimelineAction {
        self.action
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn performed_by(&self) -> UserId {
        self.performed_by
    }

    /// Returns the free-text details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
