//! Business logic services

pub mod accounts;
pub mod catalog;
pub mod loans;

use crate::repository::{AccountsRepository, Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub accounts: accounts::AccountsService<AccountsRepository>,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            accounts: accounts::AccountsService::new(repository.accounts.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository),
        }
    }
}
