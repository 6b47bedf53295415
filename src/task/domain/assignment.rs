//! Task-contractor assignment record.

use super::{AssignmentId, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Link between a task and a contractor responsible for performing it.
///
/// At most one record exists per `(task_id, contractor_id)` pair; the
/// assignment ledger treats duplicate requests as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    id: AssignmentId,
    task_id: TaskId,
    contractor_id: UserId,
    assigned_by: UserId,
    assigned_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssignmentData {
    /// Persisted assignment identifier.
    pub id: AssignmentId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted contractor reference.
    pub contractor_id: UserId,
    /// Persisted assigning actor.
    pub assigned_by: UserId,
    /// Persisted assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates a new assignment record.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        contractor_id: UserId,
        assigned_by: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AssignmentId::new(),
            task_id,
            contractor_id,
            assigned_by,
            assigned_at: clock.utc(),
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            contractor_id: data.contractor_id,
            assigned_by: data.assigned_by,
            assigned_at: data.assigned_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the assigned task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assigned contractor.
    #[must_use]
    pub const fn contractor_id(&self) -> UserId {
        self.contractor_id
    }

    /// Returns the actor that made the assignment.
    #[must_use]
    pub const fn assigned_by(&self) -> UserId {
        self.assigned_by
    }

    /// Returns the assignment timestamp.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }
}
