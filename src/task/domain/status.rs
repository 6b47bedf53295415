//! Task workflow status and the transition table.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task.
///
/// The status is the single source of truth for a task's position in the
/// engagement workflow. Legal direct transitions are defined by
/// [`TaskStatus::allowed_transitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been drafted but not yet submitted by the client.
    Draft,
    /// Client has requested the service.
    Requested,
    /// An admin assigned one or more contractors; a schedule proposal is due.
    AwaitingContractorProposal,
    /// A contractor proposed a schedule; the client must respond.
    Proposed,
    /// The schedule has been approved.
    Approved,
    /// Work has been scheduled.
    Scheduled,
    /// Work is underway.
    InProgress,
    /// Work has finished.
    Completed,
    /// The engagement was cancelled.
    Cancelled,
    /// The client rejected the proposed schedule.
    Rejected,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Requested => "requested",
            Self::AwaitingContractorProposal => "awaiting_contractor_proposal",
            Self::Proposed => "proposed",
            Self::Approved => "approved",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the statuses directly reachable from this status.
    ///
    /// This table is the authoritative transition mapping consulted by the
    /// generic status update operation. The named workflow operations
    /// (propose, accept, approve, reject) carry their own narrower guards,
    /// and contractor assignment and cancellation overwrite the status
    /// without consulting the table.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Requested, Self::Cancelled],
            Self::Requested => &[Self::AwaitingContractorProposal, Self::Cancelled],
            Self::AwaitingContractorProposal => {
                &[Self::Proposed, Self::Approved, Self::Cancelled]
            }
            Self::Proposed => &[
                Self::Approved,
                Self::Rejected,
                Self::AwaitingContractorProposal,
                Self::Proposed,
                Self::Cancelled,
            ],
            Self::Approved => &[Self::Scheduled, Self::Cancelled],
            Self::Scheduled => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
            Self::Rejected => &[Self::AwaitingContractorProposal, Self::Cancelled],
        }
    }

    /// Returns whether a direct transition to `target` is allowed.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Returns whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "requested" => Ok(Self::Requested),
            "awaiting_contractor_proposal" => Ok(Self::AwaitingContractorProposal),
            "proposed" => Ok(Self::Proposed),
            "approved" => Ok(Self::Approved),
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
