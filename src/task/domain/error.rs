//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested status transition is not in the transition table.
    #[error("cannot transition task {task_id} from {from} to {to}")]
    InvalidStatusTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
    },

    /// A schedule proposal was made while the task was not awaiting one.
    #[error("task {task_id} is not awaiting a contractor proposal (status: {status})")]
    ProposalNotAllowed {
        /// Task the proposal targeted.
        task_id: TaskId,
        /// Status the task currently holds.
        status: TaskStatus,
    },

    /// A contractor tried to accept a task in a non-acceptable status.
    #[error("task {task_id} cannot be accepted in status {status}")]
    AcceptanceNotAllowed {
        /// Task the acceptance targeted.
        task_id: TaskId,
        /// Status the task currently holds.
        status: TaskStatus,
    },

    /// A schedule response was given while no proposal was outstanding.
    #[error("task {task_id} does not have a proposed schedule (status: {status})")]
    NoProposedSchedule {
        /// Task the response targeted.
        task_id: TaskId,
        /// Status the task currently holds.
        status: TaskStatus,
    },

    /// The preferred window ends before it starts.
    #[error("preferred window end {end} precedes start {start}")]
    InvalidDateWindow {
        /// Requested window start.
        start: DateTime<Utc>,
        /// Requested window end.
        end: DateTime<Utc>,
    },

    /// The time-of-day value does not follow the `HH:MM` 24-hour format.
    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTimeOfDay(String),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing user roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);

/// Error returned while parsing timeline actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown timeline action: {0}")]
pub struct ParseTimelineActionError(pub String);
