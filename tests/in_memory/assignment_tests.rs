//! Ledger idempotency and unassignment reversal.

use super::helpers::{Harness, contractor, create_request, date, harness};
use rstest::rstest;
use upkeep::task::{
    domain::{TaskStatus, TimelineAction, UserId},
    services::ProposeScheduleRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn double_assignment_keeps_a_single_ledger_record(harness: Harness) {
    let admin = UserId::new();
    let worker = contractor(&harness);
    let task = harness
        .service
        .create(create_request(UserId::new()))
        .await
        .expect("creation should succeed");

    harness
        .service
        .assign_contractor(task.id(), worker, admin)
        .await
        .expect("first assignment should succeed");
    harness
        .service
        .assign_contractor(task.id(), worker, admin)
        .await
        .expect("repeat assignment should succeed");

    let details = harness
        .service
        .find_one(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(details.assignments.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigning_the_last_contractor_reverts_a_waiting_task(harness: Harness) {
    let admin = UserId::new();
    let worker = contractor(&harness);
    let task = harness
        .service
        .create(create_request(UserId::new()))
        .await
        .expect("creation should succeed");
    harness
        .service
        .assign_contractor(task.id(), worker, admin)
        .await
        .expect("assignment should succeed");

    let refreshed = harness
        .ledger
        .unassign(task.id(), worker, admin)
        .await
        .expect("unassignment should succeed");

    assert_eq!(refreshed.status(), TaskStatus::Requested);
    let details = harness
        .service
        .find_one(task.id())
        .await
        .expect("lookup should succeed");
    assert!(details.assignments.is_empty());
    let unassignment_entries = details
        .timeline
        .iter()
        .filter(|entry| entry.action() == TimelineAction::ContractorUnassigned)
        .count();
    assert_eq!(unassignment_entries, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigning_one_of_two_contractors_keeps_the_queue_status(harness: Harness) {
    let admin = UserId::new();
    let first_worker = contractor(&harness);
    let second_worker = contractor(&harness);
    let task = harness
        .service
        .create(create_request(UserId::new()))
        .await
        .expect("creation should succeed");
    harness
        .service
        .assign_contractor(task.id(), first_worker, admin)
        .await
        .expect("first assignment should succeed");
    harness
        .service
        .assign_contractor(task.id(), second_worker, admin)
        .await
        .expect("second assignment should succeed");

    let refreshed = harness
        .ledger
        .unassign(task.id(), first_worker, admin)
        .await
        .expect("unassignment should succeed");

    assert_eq!(refreshed.status(), TaskStatus::AwaitingContractorProposal);
    let details = harness
        .service
        .find_one(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(details.assignments.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassignment_does_not_disturb_a_proposed_task(harness: Harness) {
    let admin = UserId::new();
    let worker = contractor(&harness);
    let task = harness
        .service
        .create(create_request(UserId::new()))
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
            date(3),
            "10:00",
            worker,
        ))
        .await
        .expect("proposal should succeed");

    let refreshed = harness
        .ledger
        .unassign(task.id(), worker, admin)
        .await
        .expect("unassignment should succeed");

    assert_eq!(refreshed.status(), TaskStatus::Proposed);
}
