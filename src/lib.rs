//! Upkeep: service-marketplace backend core.
//!
//! This crate provides the domain core for a home-maintenance service
//! marketplace: the task lifecycle state machine, contractor assignment
//! bookkeeping, and the append-only audit timeline.
//!
//! # Architecture
//!
//! Upkeep follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! HTTP transport, authentication, file storage, and schema migration are
//! collaborator concerns that live outside this crate.

pub mod task;
