//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use upkeep::task::{
    adapters::memory::{
        InMemoryAssignmentRepository, InMemoryContractorDirectory, InMemoryTaskRepository,
        InMemoryTimelineRepository,
    },
    domain::{HomeId, ServiceId, UserId},
    services::{AssignmentLedger, CreateTaskRequest, TaskLifecycleService},
};

/// Service type over the in-memory adapters.
pub type TestService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryAssignmentRepository,
    InMemoryTimelineRepository,
    InMemoryContractorDirectory,
    DefaultClock,
>;

/// Ledger type over the in-memory adapters.
pub type TestLedger = AssignmentLedger<
    InMemoryAssignmentRepository,
    InMemoryTaskRepository,
    InMemoryTimelineRepository,
    DefaultClock,
>;

/// Fully wired in-memory service stack.
pub struct Harness {
    /// Lifecycle service under test.
    pub service: TestService,
    /// Assignment ledger sharing the same stores.
    pub ledger: TestLedger,
    /// Contractor directory handle for registering accounts.
    pub directory: Arc<InMemoryContractorDirectory>,
}

/// Provides a fresh service stack for each test.
#[fixture]
pub fn harness() -> Harness {
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new((*assignments).clone()));
    let timeline = Arc::new(InMemoryTimelineRepository::new());
    let directory = Arc::new(InMemoryContractorDirectory::new());
    let clock = Arc::new(DefaultClock);
    let ledger = AssignmentLedger::new(assignments, tasks.clone(), timeline.clone(), clock.clone());
    let service = TaskLifecycleService::new(
        tasks,
        ledger.clone(),
        timeline,
        directory.clone(),
        clock,
    );
    Harness {
        service,
        ledger,
        directory,
    }
}

/// Builds a UTC midnight timestamp in January 2026.
pub fn date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a creation request with the standard test window.
pub fn create_request(client_id: UserId) -> CreateTaskRequest {
    CreateTaskRequest::new(client_id, ServiceId::new(), HomeId::new(), date(1), date(5))
}

/// Registers and returns a contractor account.
pub fn contractor(harness: &Harness) -> UserId {
    let contractor_id = UserId::new();
    harness
        .directory
        .register(contractor_id)
        .expect("registration should succeed");
    contractor_id
}
