//! In-memory contractor directory for tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::UserId,
    ports::{ContractorDirectory, ContractorDirectoryError, ContractorDirectoryResult},
};

/// Thread-safe in-memory contractor directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContractorDirectory {
    state: Arc<RwLock<HashSet<UserId>>>,
}

impl InMemoryContractorDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a contractor account.
    ///
    /// # Errors
    ///
    /// Returns [`ContractorDirectoryError::Persistence`] when the internal
    /// lock is poisoned.
    pub fn register(&self, contractor_id: UserId) -> ContractorDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ContractorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.insert(contractor_id);
        Ok(())
    }
}

#[async_trait]
impl ContractorDirectory for InMemoryContractorDirectory {
    async fn contractor_exists(
        &self,
        contractor_id: UserId,
    ) -> ContractorDirectoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            ContractorDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.contains(&contractor_id))
    }
}
