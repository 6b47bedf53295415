//! Role-scoped task listing.

use super::helpers::{Harness, contractor, create_request, harness};
use rstest::rstest;
use upkeep::task::domain::{Task, UserId, UserRole};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clients_see_only_their_own_tasks(harness: Harness) {
    let client = UserId::new();
    let other_client = UserId::new();

    let own = harness
        .service
        .create(create_request(client))
        .await
        .expect("creation should succeed");
    harness
        .service
        .create(create_request(other_client))
        .await
        .expect("creation should succeed");

    let visible = harness
        .service
        .find_all(client, UserRole::Client)
        .await
        .expect("listing should succeed");

    assert_eq!(visible.len(), 1);
    let first = visible.first().expect("task should exist");
    assert_eq!(first.id(), own.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contractors_see_only_assigned_tasks(harness: Harness) {
    let admin = UserId::new();
    let worker = contractor(&harness);

    let assigned = harness
        .service
        .create(create_request(UserId::new()))
        .await
        .expect("creation should succeed");
    harness
        .service
        .create(create_request(UserId::new()))
        .await
        .expect("creation should succeed");
    harness
        .service
        .assign_contractor(assigned.id(), worker, admin)
        .await
        .expect("assignment should succeed");

    let visible = harness
        .service
        .find_all(worker, UserRole::Contractor)
        .await
        .expect("listing should succeed");

    assert_eq!(visible.len(), 1);
    let first = visible.first().expect("task should exist");
    assert_eq!(first.id(), assigned.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admins_see_every_task_newest_first(harness: Harness) {
    let older = harness
        .service
        .create(create_request(UserId::new()))
        .await
        .expect("creation should succeed");
    let newer = harness
        .service
        .create(create_request(UserId::new()))
        .await
        .expect("creation should succeed");

    let visible = harness
        .service
        .find_all(UserId::new(), UserRole::Admin)
        .await
        .expect("listing should succeed");

    assert_eq!(visible.len(), 2);
    let ids: Vec<_> = visible.iter().map(Task::id).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
}
