//! Task lifecycle management for Upkeep.
//!
//! This module implements the marketplace's engagement workflow: clients
//! request home-maintenance tasks, admins assign contractors, contractors
//! propose schedules, clients approve, and work proceeds to completion.
//! Every mutating operation appends an immutable timeline entry. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
