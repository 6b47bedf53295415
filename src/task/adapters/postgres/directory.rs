//! `PostgreSQL` contractor directory lookup.

use super::{
    schema::users,
    support::{PgPool, get_conn_with, run_blocking_with},
};
use crate::task::{
    domain::{UserId, UserRole},
    ports::{ContractorDirectory, ContractorDirectoryError, ContractorDirectoryResult},
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;

/// `PostgreSQL`-backed contractor directory.
///
/// Reads the user table owned by the excluded account-management layer;
/// the core only ever checks contractor existence.
#[derive(Debug, Clone)]
pub struct PostgresContractorDirectory {
    pool: PgPool,
}

impl PostgresContractorDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractorDirectory for PostgresContractorDirectory {
    async fn contractor_exists(
        &self,
        contractor_id: UserId,
    ) -> ContractorDirectoryResult<bool> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, ContractorDirectoryError::persistence)?;
                diesel::select(exists(
                    users::table
                        .filter(users::id.eq(contractor_id.into_inner()))
                        .filter(users::role.eq(UserRole::Contractor.as_str())),
                ))
                .get_result::<bool>(&mut connection)
                .map_err(ContractorDirectoryError::persistence)
            },
            ContractorDirectoryError::persistence,
        )
        .await
    }
}
