//! Unit tests for the status transition table.

use crate::task::domain::{
    DateWindow, HomeId, PersistedTaskData, ServiceId, Task, TaskDomainError, TaskId, TaskStatus,
    UserId,
};
use chrono::{TimeZone, Utc};
use eyre::{bail, ensure};
use mockable::{Clock, DefaultClock};
use rstest::rstest;

const ALL_STATUSES: [TaskStatus; 10] = [
    TaskStatus::Draft,
    TaskStatus::Requested,
    TaskStatus::AwaitingContractorProposal,
    TaskStatus::Proposed,
    TaskStatus::Approved,
    TaskStatus::Scheduled,
    TaskStatus::InProgress,
    TaskStatus::Completed,
    TaskStatus::Cancelled,
    TaskStatus::Rejected,
];

/// Every legal `(from, to)` pair in the transition table.
const LEGAL_PAIRS: [(TaskStatus, TaskStatus); 20] = [
    (TaskStatus::Draft, TaskStatus::Requested),
    (TaskStatus::Draft, TaskStatus::Cancelled),
    (TaskStatus::Requested, TaskStatus::AwaitingContractorProposal),
    (TaskStatus::Requested, TaskStatus::Cancelled),
    (TaskStatus::AwaitingContractorProposal, TaskStatus::Proposed),
    (TaskStatus::AwaitingContractorProposal, TaskStatus::Approved),
    (TaskStatus::AwaitingContractorProposal, TaskStatus::Cancelled),
    (TaskStatus::Proposed, TaskStatus::Approved),
    (TaskStatus::Proposed, TaskStatus::Rejected),
    (TaskStatus::Proposed, TaskStatus::AwaitingContractorProposal),
    (TaskStatus::Proposed, TaskStatus::Proposed),
    (TaskStatus::Proposed, TaskStatus::Cancelled),
    (TaskStatus::Approved, TaskStatus::Scheduled),
    (TaskStatus::Approved, TaskStatus::Cancelled),
    (TaskStatus::Scheduled, TaskStatus::InProgress),
    (TaskStatus::Scheduled, TaskStatus::Cancelled),
    (TaskStatus::InProgress, TaskStatus::Completed),
    (TaskStatus::InProgress, TaskStatus::Cancelled),
    (TaskStatus::Rejected, TaskStatus::AwaitingContractorProposal),
    (TaskStatus::Rejected, TaskStatus::Cancelled),
];

fn legal(from: TaskStatus, to: TaskStatus) -> bool {
    LEGAL_PAIRS.contains(&(from, to))
}

fn task_in(status: TaskStatus) -> Task {
    let clock = DefaultClock;
    let start = Utc
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let end = Utc
        .with_ymd_and_hms(2026, 1, 5, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let timestamp = clock.utc();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        client_id: UserId::new(),
        service_id: ServiceId::new(),
        home_id: HomeId::new(),
        status,
        preferred_window: DateWindow::new(start, end).expect("valid window"),
        proposed: None,
        approved_at: None,
        completed_at: None,
        client_notes: None,
        contractor_notes: None,
        created_at: timestamp,
        updated_at: timestamp,
    })
}

#[test]
fn transition_table_matches_expected_pairs() {
    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            assert_eq!(
                from.can_transition_to(to),
                legal(from, to),
                "unexpected verdict for {from} -> {to}",
            );
        }
    }
}

#[test]
fn every_legal_transition_applies() -> eyre::Result<()> {
    let clock = DefaultClock;
    for from in ALL_STATUSES {
        for to in from.allowed_transitions() {
            let mut task = task_in(from);
            task.transition_to(*to, &clock)?;
            ensure!(task.status() == *to, "transition {from} -> {to} not applied");
        }
    }
    Ok(())
}

#[test]
fn every_illegal_transition_is_rejected_without_mutation() -> eyre::Result<()> {
    let clock = DefaultClock;
    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            if legal(from, to) {
                continue;
            }
            let mut task = task_in(from);
            let task_id = task.id();
            let result = task.transition_to(to, &clock);
            let expected = Err(TaskDomainError::InvalidStatusTransition { task_id, from, to });
            if result != expected {
                bail!("expected {expected:?} for {from} -> {to}, got {result:?}");
            }
            ensure!(task.status() == from, "status mutated on rejected {from} -> {to}");
            ensure!(task.completed_at().is_none());
        }
    }
    Ok(())
}

#[rstest]
#[case(TaskStatus::Draft, false)]
#[case(TaskStatus::Requested, false)]
#[case(TaskStatus::AwaitingContractorProposal, false)]
#[case(TaskStatus::Proposed, false)]
#[case(TaskStatus::Approved, false)]
#[case(TaskStatus::Scheduled, false)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, true)]
#[case(TaskStatus::Cancelled, true)]
#[case(TaskStatus::Rejected, false)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[test]
fn completing_a_task_stamps_the_completion_date() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut task = task_in(TaskStatus::InProgress);

    task.transition_to(TaskStatus::Completed, &clock)?;

    ensure!(task.status() == TaskStatus::Completed);
    ensure!(task.completed_at().is_some());
    Ok(())
}

#[test]
fn non_completing_transitions_leave_completion_date_unset() -> eyre::Result<()> {
    let clock = DefaultClock;
    let mut task = task_in(TaskStatus::Approved);

    task.transition_to(TaskStatus::Scheduled, &clock)?;

    ensure!(task.completed_at().is_none());
    Ok(())
}

#[rstest]
#[case(TaskStatus::Draft, "draft")]
#[case(TaskStatus::Requested, "requested")]
#[case(
    TaskStatus::AwaitingContractorProposal,
    "awaiting_contractor_proposal"
)]
#[case(TaskStatus::Proposed, "proposed")]
#[case(TaskStatus::Approved, "approved")]
#[case(TaskStatus::Scheduled, "scheduled")]
#[case(TaskStatus::InProgress, "in_progress")]
#[case(TaskStatus::Completed, "completed")]
#[case(TaskStatus::Cancelled, "cancelled")]
#[case(TaskStatus::Rejected, "rejected")]
fn storage_representation_round_trips(#[case] status: TaskStatus, #[case] repr: &str) {
    assert_eq!(status.as_str(), repr);
    assert_eq!(TaskStatus::try_from(repr), Ok(status));
}

#[test]
fn unknown_status_representation_is_rejected() {
    assert!(TaskStatus::try_from("archived").is_err());
}
