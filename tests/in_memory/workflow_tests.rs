//! End-to-end engagement workflow scenarios.

use super::helpers::{Harness, contractor, create_request, date, harness};
use rstest::rstest;
use upkeep::task::{
    domain::{TaskStatus, TimelineAction, UserId},
    services::ProposeScheduleRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_engagement_runs_from_request_to_completion(harness: Harness) {
    let client = UserId::new();
    let admin = UserId::new();
    let worker = contractor(&harness);

    let task = harness
        .service
        .create(create_request(client))
        .await
        .expect("creation should succeed");
    assert_eq!(task.status(), TaskStatus::Requested);

    let task_id = task.id();
    let assigned = harness
        .service
        .assign_contractor(task_id, worker, admin)
        .await
        .expect("assignment should succeed");
    assert_eq!(assigned.status(), TaskStatus::AwaitingContractorProposal);

    let proposed = harness
        .service
        .propose_schedule(ProposeScheduleRequest::new(task_id, date(3), "10:00", worker))
        .await
        .expect("proposal should succeed");
    assert_eq!(proposed.status(), TaskStatus::Proposed);

    let approved = harness
        .service
        .approve_schedule(task_id, client)
        .await
        .expect("approval should succeed");
    assert_eq!(approved.status(), TaskStatus::Approved);
    assert!(approved.approved_at().is_some());

    let scheduled = harness
        .service
        .update_status(task_id, TaskStatus::Scheduled, admin)
        .await
        .expect("scheduling should succeed");
    assert_eq!(scheduled.status(), TaskStatus::Scheduled);

    let started = harness
        .service
        .update_status(task_id, TaskStatus::InProgress, admin)
        .await
        .expect("starting should succeed");
    assert_eq!(started.status(), TaskStatus::InProgress);

    let completed = harness
        .service
        .update_status(task_id, TaskStatus::Completed, admin)
        .await
        .expect("completion should succeed");
    assert_eq!(completed.status(), TaskStatus::Completed);
    assert!(completed.completed_at().is_some());

    let details = harness
        .service
        .find_one(task_id)
        .await
        .expect("lookup should succeed");
    assert_eq!(details.assignments.len(), 1);
    let first_assignment = details.assignments.first().expect("assignment should exist");
    assert_eq!(first_assignment.contractor_id(), worker);

    // One audit entry per mutating operation, in order.
    let actions: Vec<TimelineAction> = details
        .timeline
        .iter()
        .map(|entry| entry.action())
        .collect();
    assert_eq!(
        actions,
        vec![
            TimelineAction::TaskCreated,
            TimelineAction::ContractorAssigned,
            TimelineAction::ScheduleProposed,
            TimelineAction::ScheduleApproved,
            TimelineAction::StatusUpdated,
            TimelineAction::StatusUpdated,
            TimelineAction::StatusUpdated,
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contractor_acceptance_defaults_the_slot_from_the_preferred_window(harness: Harness) {
    let client = UserId::new();
    let admin = UserId::new();
    let worker = contractor(&harness);

    let task = harness
        .service
        .create(create_request(client))
        .await
        .expect("creation should succeed");
    harness
        .service
        .assign_contractor(task.id(), worker, admin)
        .await
        .expect("assignment should succeed");

    let accepted = harness
        .service
        .accept_task(task.id(), worker)
        .await
        .expect("acceptance should succeed");

    assert_eq!(accepted.status(), TaskStatus::Approved);
    assert!(accepted.approved_at().is_some());
    let slot = accepted.proposed().expect("slot should be defaulted");
    assert_eq!(slot.date(), date(1));
    assert_eq!(slot.time().as_str(), "09:00");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contractor_acceptance_preserves_an_existing_proposal(harness: Harness) {
    let client = UserId::new();
    let admin = UserId::new();
    let worker = contractor(&harness);

    let task = harness
        .service
        .create(create_request(client))
        .await
        .expect("creation should succeed");
    harness
        .service
        .assign_contractor(task.id(), worker, admin)
        .await
        .expect("assignment should succeed");
    harness
        .service
        .propose_schedule(ProposeScheduleRequest::new(
            task.id(),
            date(4),
            "13:30",
            worker,
        ))
        .await
        .expect("proposal should succeed");

    let accepted = harness
        .service
        .accept_task(task.id(), worker)
        .await
        .expect("acceptance should succeed");

    let slot = accepted.proposed().expect("slot should be preserved");
    assert_eq!(slot.date(), date(4));
    assert_eq!(slot.time().as_str(), "13:30");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_returns_the_task_to_the_proposal_queue(harness: Harness) {
    let client = UserId::new();
    let admin = UserId::new();
    let worker = contractor(&harness);

    let task = harness
        .service
        .create(create_request(client))
        .await
        .expect("creation should succeed");
    harness
        .service
        .assign_contractor(task.id(), worker, admin)
        .await
        .expect("assignment should succeed");
    harness
        .service
        .propose_schedule(ProposeScheduleRequest::new(
            task.id(),
            date(2),
            "08:00",
            worker,
        ))
        .await
        .expect("proposal should succeed");

    let rejected = harness
        .service
        .reject_schedule(task.id(), client, Some("Away that week".to_owned()))
        .await
        .expect("rejection should succeed");
    assert_eq!(rejected.status(), TaskStatus::AwaitingContractorProposal);
    assert!(rejected.proposed().is_none());

    // A fresh proposal can then be approved.
    harness
        .service
        .propose_schedule(ProposeScheduleRequest::new(
            task.id(),
            date(4),
            "11:00",
            worker,
        ))
        .await
        .expect("second proposal should succeed");
    let approved = harness
        .service
        .approve_schedule(task.id(), client)
        .await
        .expect("approval should succeed");
    assert_eq!(approved.status(), TaskStatus::Approved);

    let details = harness
        .service
        .find_one(task.id())
        .await
        .expect("lookup should succeed");
    let rejection_entry = details
        .timeline
        .iter()
        .find(|entry| entry.action() == TimelineAction::ScheduleRejected)
        .expect("rejection entry should exist");
    assert_eq!(rejection_entry.details(), Some("Away that week"));
    assert_eq!(rejection_entry.performed_by(), client);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancellation_records_the_default_reason(harness: Harness) {
    let client = UserId::new();
    let task = harness
        .service
        .create(create_request(client))
        .await
        .expect("creation should succeed");

    let cancelled = harness
        .service
        .cancel(task.id(), client, None)
        .await
        .expect("cancellation should succeed");
    assert_eq!(cancelled.status(), TaskStatus::Cancelled);

    let details = harness
        .service
        .find_one(task.id())
        .await
        .expect("lookup should succeed");
    let entry = details
        .timeline
        .iter()
        .find(|candidate| candidate.action() == TimelineAction::TaskCancelled)
        .expect("cancellation entry should exist");
    assert_eq!(entry.details(), Some("Task was cancelled"));
}
