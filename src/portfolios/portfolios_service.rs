use log::info;
use std::sync::Arc;

use crate::auth::Principal;
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result};

use super::portfolios_model::{NewHolding, Portfolio};
use super::portfolios_repository::PortfolioRepositoryTrait;

/// Service for per-client holdings. Mutations are operator-only and follow
/// the read-modify-write contract: the caller supplies the version it
/// read, and a concurrent edit surfaces as `Error::Conflict`.
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
    ) -> Self {
        PortfolioService {
            repository,
            company_repository,
        }
    }

    pub fn get_portfolio(&self, principal: &Principal, client_id: &str) -> Result<Portfolio> {
        principal.ensure_self_or_admin(client_id)?;
        self.repository.get(client_id)
    }

    pub fn add_holding(
        &self,
        principal: &Principal,
        client_id: &str,
        new_holding: NewHolding,
        expected_version: i64,
    ) -> Result<Portfolio> {
        principal.ensure_admin()?;
        new_holding.validate()?;

        // The company must exist at add-time; its name and sector are
        // snapshotted onto the holding.
        let company = self.company_repository.get_by_id(&new_holding.company_id)?;

        let mut portfolio = self.repository.get(client_id)?;
        if portfolio.version != expected_version {
            return Err(Error::Conflict(format!(
                "portfolio of client {} was modified concurrently (expected version {}, found {}); re-read and retry",
                client_id, expected_version, portfolio.version
            )));
        }

        portfolio.holdings.push(new_holding.into_holding(&company));
        let saved =
            self.repository
                .save_holdings(client_id, portfolio.holdings, expected_version)?;

        info!(
            "Added holding in {} to portfolio of client {}",
            company.id, client_id
        );
        Ok(saved)
    }

    pub fn remove_holding(
        &self,
        principal: &Principal,
        client_id: &str,
        index: usize,
        expected_version: i64,
    ) -> Result<Portfolio> {
        principal.ensure_admin()?;

        let mut portfolio = self.repository.get(client_id)?;
        if portfolio.version != expected_version {
            return Err(Error::Conflict(format!(
                "portfolio of client {} was modified concurrently (expected version {}, found {}); re-read and retry",
                client_id, expected_version, portfolio.version
            )));
        }

        if index >= portfolio.holdings.len() {
            return Err(Error::NotFound(format!(
                "holding index {} does not exist in the current snapshot",
                index
            )));
        }

        let removed = portfolio.holdings.remove(index);
        let saved =
            self.repository
                .save_holdings(client_id, portfolio.holdings, expected_version)?;

        info!(
            "Removed holding in {} from portfolio of client {}",
            removed.company_id, client_id
        );
        Ok(saved)
    }
}
