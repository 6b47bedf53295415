//! Task aggregate root.

use super::{
    DateWindow, HomeId, ProposedSlot, ServiceId, TaskDomainError, TaskId, TaskStatus, TimeOfDay,
    UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One client-requested service engagement.
///
/// The aggregate owns its status as the single source of truth for workflow
/// position. All mutation goes through the methods below; assignments and
/// timeline entries are satellite records keyed by the task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    client_id: UserId,
    service_id: ServiceId,
    home_id: HomeId,
    status: TaskStatus,
    preferred_window: DateWindow,
    proposed: Option<ProposedSlot>,
    approved_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    client_notes: Option<String>,
    contractor_notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted requesting client.
    pub client_id: UserId,
    /// Persisted service offering.
    pub service_id: ServiceId,
    /// Persisted client home.
    pub home_id: HomeId,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted preferred window.
    pub preferred_window: DateWindow,
    /// Persisted proposed slot, if any.
    pub proposed: Option<ProposedSlot>,
    /// Persisted first-approval timestamp, if any.
    pub approved_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted client notes.
    pub client_notes: Option<String>,
    /// Persisted contractor notes.
    pub contractor_notes: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Requested`].
    #[must_use]
    pub fn new(
        client_id: UserId,
        service_id: ServiceId,
        home_id: HomeId,
        preferred_window: DateWindow,
        client_notes: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            client_id,
            service_id,
            home_id,
            status: TaskStatus::Requested,
            preferred_window,
            proposed: None,
            approved_at: None,
            completed_at: None,
            client_notes,
            contractor_notes: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            service_id: data.service_id,
            home_id: data.home_id,
            status: data.status,
            preferred_window: data.preferred_window,
            proposed: data.proposed,
            approved_at: data.approved_at,
            completed_at: data.completed_at,
            client_notes: data.client_notes,
            contractor_notes: data.contractor_notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the requesting client.
    #[must_use]
    pub const fn client_id(&self) -> UserId {
        self.client_id
    }

    /// Returns the requested service offering.
    #[must_use]
    pub const fn service_id(&self) -> ServiceId {
        self.service_id
    }

    /// Returns the home the service applies to.
    #[must_use]
    pub const fn home_id(&self) -> HomeId {
        self.home_id
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the client's preferred window.
    #[must_use]
    pub const fn preferred_window(&self) -> DateWindow {
        self.preferred_window
    }

    /// Returns the currently proposed slot, if any.
    #[must_use]
    pub const fn proposed(&self) -> Option<&ProposedSlot> {
        self.proposed.as_ref()
    }

    /// Returns the timestamp of the first approval, if any.
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the client's notes, if any.
    #[must_use]
    pub fn client_notes(&self) -> Option<&str> {
        self.client_notes.as_deref()
    }

    /// Returns the contractor's notes, if any.
    #[must_use]
    pub fn contractor_notes(&self) -> Option<&str> {
        self.contractor_notes.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a contractor's schedule proposal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProposalNotAllowed`] unless the task is in
    /// [`TaskStatus::AwaitingContractorProposal`] or
    /// [`TaskStatus::Requested`].
    pub fn propose_schedule(
        &mut self,
        slot: ProposedSlot,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !matches!(
            self.status,
            TaskStatus::AwaitingContractorProposal | TaskStatus::Requested
        ) {
            return Err(TaskDomainError::ProposalNotAllowed {
                task_id: self.id,
                status: self.status,
            });
        }

        self.proposed = Some(slot);
        self.status = TaskStatus::Proposed;
        self.touch(clock);
        Ok(())
    }

    /// Records a contractor accepting the task outright.
    ///
    /// Accepting from [`TaskStatus::AwaitingContractorProposal`] or
    /// [`TaskStatus::Requested`] fills the slot from the preferred start
    /// date at the default start time; accepting an already-proposed task
    /// keeps the existing slot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AcceptanceNotAllowed`] for any other
    /// status.
    pub fn accept(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        match self.status {
            TaskStatus::Proposed => {}
            TaskStatus::AwaitingContractorProposal | TaskStatus::Requested => {
                self.proposed = Some(ProposedSlot::new(
                    self.preferred_window.start(),
                    TimeOfDay::default_start(),
                ));
            }
            status => {
                return Err(TaskDomainError::AcceptanceNotAllowed {
                    task_id: self.id,
                    status,
                });
            }
        }

        self.mark_approved(clock);
        Ok(())
    }

    /// Records the client approving the proposed schedule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoProposedSchedule`] unless the task is in
    /// [`TaskStatus::Proposed`].
    pub fn approve_schedule(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_proposed()?;
        self.mark_approved(clock);
        Ok(())
    }

    /// Records the client rejecting the proposed schedule.
    ///
    /// Clears the proposed slot and returns the task to the proposal queue.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoProposedSchedule`] unless the task is in
    /// [`TaskStatus::Proposed`].
    pub fn reject_schedule(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_proposed()?;
        self.proposed = None;
        self.status = TaskStatus::AwaitingContractorProposal;
        self.touch(clock);
        Ok(())
    }

    /// Applies a generic status transition via the transition table.
    ///
    /// Transitioning to [`TaskStatus::Completed`] stamps the completion
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the table
    /// does not permit the move.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        if target == TaskStatus::Completed {
            self.completed_at = Some(clock.utc());
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves the task into the proposal queue after contractor assignment.
    ///
    /// Direct override: assignment places the task in
    /// [`TaskStatus::AwaitingContractorProposal`] whatever its current
    /// status, without consulting the transition table.
    pub fn await_contractor_proposal(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::AwaitingContractorProposal;
        self.touch(clock);
    }

    /// Cancels the task.
    ///
    /// Direct override: cancellation is terminal and applies from any
    /// status, without consulting the transition table.
    pub fn cancel(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Cancelled;
        self.touch(clock);
    }

    /// Returns the task to [`TaskStatus::Requested`].
    ///
    /// Used when the last contractor is unassigned while the task is still
    /// waiting for a proposal.
    pub fn revert_to_requested(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Requested;
        self.touch(clock);
    }

    /// Sets the status to approved, stamping the first approval only.
    fn mark_approved(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Approved;
        if self.approved_at.is_none() {
            self.approved_at = Some(clock.utc());
        }
        self.touch(clock);
    }

    fn ensure_proposed(&self) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Proposed {
            return Ok(());
        }
        Err(TaskDomainError::NoProposedSchedule {
            task_id: self.id,
            status: self.status,
        })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
