//! Port contracts for the task lifecycle core.
//!
//! Ports define infrastructure-agnostic interfaces used by the task
//! services; adapters supply the storage-backed implementations.

pub mod assignment;
pub mod directory;
pub mod repository;
pub mod timeline;

pub use assignment::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult};
pub use directory::{ContractorDirectory, ContractorDirectoryError, ContractorDirectoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use timeline::{TimelineRepository, TimelineRepositoryError, TimelineRepositoryResult};
