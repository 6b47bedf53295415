//! `PostgreSQL` adapters for task lifecycle persistence.

mod assignment;
mod directory;
mod models;
mod repository;
mod schema;
mod support;
mod timeline;

pub use assignment::PostgresAssignmentRepository;
pub use directory::PostgresContractorDirectory;
pub use repository::PostgresTaskRepository;
pub use support::PgPool;
pub use timeline::PostgresTimelineRepository;
