//! Port exposing the slice of the user store the task core needs.

use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type ContractorDirectoryResult<T> = Result<T, ContractorDirectoryError>;

/// Lookup contract for contractor accounts.
///
/// User management lives outside the core; assignment validation only needs
/// to know whether an identifier names an existing contractor.
#[async_trait]
pub trait ContractorDirectory: Send + Sync {
    /// Returns whether the identifier names an existing contractor account.
    async fn contractor_exists(
        &self,
        contractor_id: UserId,
    ) -> ContractorDirectoryResult<bool>;
}

/// Errors returned by contractor directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ContractorDirectoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ContractorDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
