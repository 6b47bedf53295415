//! Application services for the task lifecycle core.

mod assignment;
mod lifecycle;

pub use assignment::{AssignmentLedger, AssignmentLedgerError, AssignmentLedgerResult};
pub use lifecycle::{
    CreateTaskRequest, ProposeScheduleRequest, TaskDetails, TaskLifecycleService, TaskWorkflowError,
    TaskWorkflowResult,
};
