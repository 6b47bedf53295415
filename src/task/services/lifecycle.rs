//! Service layer for the task lifecycle state machine.

use crate::task::{
    domain::{
        Assignment, DateWindow, HomeId, ProposedSlot, ServiceId, Task, TaskDomainError, TaskId,
        TaskStatus, TaskVisibility, TimeOfDay, TimelineAction, TimelineEntry, UserId, UserRole,
    },
    ports::{
        AssignmentRepository, ContractorDirectory, ContractorDirectoryError, TaskRepository,
        TaskRepositoryError, TimelineRepository, TimelineRepositoryError,
    },
    services::assignment::{AssignmentLedger, AssignmentLedgerError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    client_id: UserId,
    service_id: ServiceId,
    home_id: HomeId,
    preferred_start: DateTime<Utc>,
    preferred_end: DateTime<Utc>,
    client_notes: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub const fn new(
        client_id: UserId,
        service_id: ServiceId,
        home_id: HomeId,
        preferred_start: DateTime<Utc>,
        preferred_end: DateTime<Utc>,
    ) -> Self {
        Self {
            client_id,
            service_id,
            home_id,
            preferred_start,
            preferred_end,
            client_notes: None,
        }
    }

    /// Sets the client's free-text notes.
    #[must_use]
    pub fn with_client_notes(mut self, notes: impl Into<String>) -> Self {
        self.client_notes = Some(notes.into());
        self
    }
}

/// Request payload for a contractor's schedule proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposeScheduleRequest {
    task_id: TaskId,
    proposed_date: DateTime<Utc>,
    proposed_time: String,
    contractor_id: UserId,
}

impl ProposeScheduleRequest {
    /// Creates a proposal request.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        proposed_date: DateTime<Utc>,
        proposed_time: impl Into<String>,
        contractor_id: UserId,
    ) -> Self {
        Self {
            task_id,
            proposed_date,
            proposed_time: proposed_time.into(),
            contractor_id,
        }
    }
}

/// A task together with its satellite records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// The task aggregate.
    pub task: Task,
    /// Live contractor assignments for the task.
    pub assignments: Vec<Assignment>,
    /// Audit timeline, ordered by creation timestamp ascending.
    pub timeline: Vec<TimelineEntry>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation or state-machine check failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Assignment ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] AssignmentLedgerError),
    /// Timeline persistence failed.
    #[error(transparent)]
    Timeline(#[from] TimelineRepositoryError),
    /// Contractor directory lookup failed.
    #[error(transparent)]
    Directory(#[from] ContractorDirectoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// No contractor exists with the given identifier.
    #[error("contractor {0} not found")]
    ContractorNotFound(UserId),
    /// The acting user has no authority over the task.
    #[error("user {actor_id} is not the client for task {task_id}")]
    Forbidden {
        /// Task the actor tried to operate on.
        task_id: TaskId,
        /// The rejected actor.
        actor_id: UserId,
    },
}

/// Result type for task lifecycle service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task lifecycle orchestration service.
///
/// Enforces the legal status graph and produces an audit trail for every
/// transition. Contractor-relationship changes are delegated to the
/// [`AssignmentLedger`].
pub struct TaskLifecycleService<T, A, L, D, C>
where
    T: TaskRepository,
    A: AssignmentRepository,
    L: TimelineRepository,
    D: ContractorDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    ledger: AssignmentLedger<A, T, L, C>,
    timeline: Arc<L>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<T, A, L, D, C> Clone for TaskLifecycleService<T, A, L, D, C>
where
    T: TaskRepository,
    A: AssignmentRepository,
    L: TimelineRepository,
    D: ContractorDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            ledger: self.ledger.clone(),
            timeline: Arc::clone(&self.timeline),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, A, L, D, C> TaskLifecycleService<T, A, L, D, C>
where
    T: TaskRepository,
    A: AssignmentRepository,
    L: TimelineRepository,
    D: ContractorDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        ledger: AssignmentLedger<A, T, L, C>,
        timeline: Arc<L>,
        directory: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            ledger,
            timeline,
            directory,
            clock,
        }
    }

    /// Creates a task in [`TaskStatus::Requested`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when the preferred window is
    /// inverted, or persistence errors.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskWorkflowResult<Task> {
        let window = DateWindow::new(request.preferred_start, request.preferred_end)?;
        let task = Task::new(
            request.client_id,
            request.service_id,
            request.home_id,
            window,
            request.client_notes,
            &*self.clock,
        );
        self.tasks.store(&task).await?;
        self.record(
            task.id(),
            request.client_id,
            TimelineAction::TaskCreated,
            Some("Client requested service".to_owned()),
        )
        .await?;
        Ok(task)
    }

    /// Assigns a contractor and moves the task into the proposal queue.
    ///
    /// Delegates record creation to the ledger (idempotent), then forces
    /// the status to [`TaskStatus::AwaitingContractorProposal`] whatever
    /// the current status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] or
    /// [`TaskWorkflowError::ContractorNotFound`] when either party is
    /// missing, or persistence errors.
    pub async fn assign_contractor(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
        assigned_by: UserId,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        if !self.directory.contractor_exists(contractor_id).await? {
            return Err(TaskWorkflowError::ContractorNotFound(contractor_id));
        }

        self.ledger
            .assign(task_id, contractor_id, assigned_by)
            .await?;
        task.await_contractor_proposal(&*self.clock);
        self.tasks.update(&task).await?;
        self.record(
            task_id,
            assigned_by,
            TimelineAction::ContractorAssigned,
            Some(format!("Contractor {contractor_id} assigned")),
        )
        .await?;
        Ok(task)
    }

    /// Records a contractor's schedule proposal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when the time of day is
    /// malformed or the task is not awaiting a proposal, or persistence
    /// errors.
    pub async fn propose_schedule(
        &self,
        request: ProposeScheduleRequest,
    ) -> TaskWorkflowResult<Task> {
        let time = TimeOfDay::new(request.proposed_time)?;
        let slot = ProposedSlot::new(request.proposed_date, time);

        let mut task = self.find_task_or_error(request.task_id).await?;
        task.propose_schedule(slot.clone(), &*self.clock)?;
        self.tasks.update(&task).await?;
        self.record(
            task.id(),
            request.contractor_id,
            TimelineAction::ScheduleProposed,
            Some(format!("Proposed date: {slot}")),
        )
        .await?;
        Ok(task)
    }

    /// Records a contractor accepting the task outright.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when the current status does
    /// not admit acceptance, or persistence errors.
    pub async fn accept_task(
        &self,
        task_id: TaskId,
        contractor_id: UserId,
    ) -> TaskWorkflowResult<Task> {
        debug!(%task_id, %contractor_id, "contractor accepting task");
        let mut task = self.find_task_or_error(task_id).await?;
        task.accept(&*self.clock)?;
        self.tasks.update(&task).await?;
        self.record(
            task_id,
            contractor_id,
            TimelineAction::TaskAccepted,
            Some("Contractor accepted the task".to_owned()),
        )
        .await?;
        Ok(task)
    }

    /// Records the client approving the proposed schedule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when no proposal is
    /// outstanding, [`TaskWorkflowError::Forbidden`] when the caller is not
    /// the task's client, or persistence errors.
    pub async fn approve_schedule(
        &self,
        task_id: TaskId,
        client_id: UserId,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        ensure_outstanding_proposal(&task)?;
        ensure_client(&task, client_id)?;
        task.approve_schedule(&*self.clock)?;
        self.tasks.update(&task).await?;
        self.record(
            task_id,
            client_id,
            TimelineAction::ScheduleApproved,
            Some("Client approved the proposed schedule".to_owned()),
        )
        .await?;
        Ok(task)
    }

    /// Records the client rejecting the proposed schedule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when no proposal is
    /// outstanding, [`TaskWorkflowError::Forbidden`] when the caller is not
    /// the task's client, or persistence errors.
    pub async fn reject_schedule(
        &self,
        task_id: TaskId,
        client_id: UserId,
        reason: Option<String>,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        ensure_outstanding_proposal(&task)?;
        ensure_client(&task, client_id)?;
        task.reject_schedule(&*self.clock)?;
        self.tasks.update(&task).await?;
        self.record(
            task_id,
            client_id,
            TimelineAction::ScheduleRejected,
            Some(reason.unwrap_or_else(|| "Client rejected the proposed schedule".to_owned())),
        )
        .await?;
        Ok(task)
    }

    /// Applies a generic status transition via the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Domain`] when the table does not permit
    /// the move, or persistence errors. A rejected transition leaves the
    /// stored task unchanged.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        new_status: TaskStatus,
        actor_id: UserId,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.transition_to(new_status, &*self.clock)?;
        self.tasks.update(&task).await?;
        self.record(
            task_id,
            actor_id,
            TimelineAction::StatusUpdated,
            Some(format!("Status changed to {new_status}")),
        )
        .await?;
        Ok(task)
    }

    /// Cancels the task from any status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist, or persistence errors.
    pub async fn cancel(
        &self,
        task_id: TaskId,
        actor_id: UserId,
        reason: Option<String>,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.cancel(&*self.clock);
        self.tasks.update(&task).await?;
        self.record(
            task_id,
            actor_id,
            TimelineAction::TaskCancelled,
            Some(reason.unwrap_or_else(|| "Task was cancelled".to_owned())),
        )
        .await?;
        Ok(task)
    }

    /// Returns a task together with its assignments and timeline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist, or persistence errors.
    pub async fn find_one(&self, task_id: TaskId) -> TaskWorkflowResult<TaskDetails> {
        let task = self.find_task_or_error(task_id).await?;
        let assignments = self.ledger.assignments_for(task_id).await?;
        let timeline = self.timeline.list_for_task(task_id).await?;
        Ok(TaskDetails {
            task,
            assignments,
            timeline,
        })
    }

    /// Returns the tasks visible to a caller, newest first.
    ///
    /// Clients see their own tasks, contractors see tasks they are
    /// assigned to, admins see everything.
    ///
    /// # Errors
    ///
    /// Returns persistence errors from the repository.
    pub async fn find_all(
        &self,
        caller_id: UserId,
        caller_role: UserRole,
    ) -> TaskWorkflowResult<Vec<Task>> {
        let visibility = TaskVisibility::for_caller(caller_id, caller_role);
        Ok(self.tasks.list_visible(&visibility).await?)
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskWorkflowError::TaskNotFound(task_id))
    }

    async fn record(
        &self,
        task_id: TaskId,
        performed_by: UserId,
        action: TimelineAction,
        details: Option<String>,
    ) -> TaskWorkflowResult<()> {
        let entry = TimelineEntry::new(task_id, performed_by, action, details, &*self.clock);
        self.timeline.append(&entry).await?;
        Ok(())
    }
}

/// Validates that a proposal is outstanding before a client responds.
fn ensure_outstanding_proposal(task: &Task) -> TaskWorkflowResult<()> {
    if task.status() == TaskStatus::Proposed {
        return Ok(());
    }
    Err(TaskDomainError::NoProposedSchedule {
        task_id: task.id(),
        status: task.status(),
    }
    .into())
}

/// Validates that the caller owns the task.
fn ensure_client(task: &Task, client_id: UserId) -> TaskWorkflowResult<()> {
    if task.client_id() == client_id {
        return Ok(());
    }
    Err(TaskWorkflowError::Forbidden {
        task_id: task.id(),
        actor_id: client_id,
    })
}
