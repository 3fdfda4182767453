use log::{debug, info};
use std::sync::Arc;

use crate::auth::Principal;
use crate::constants::VALUATION_FLOOR;
use crate::errors::{Error, Result, ValidationError};

use super::companies_model::{Company, CompanyUpdate, NewCompany};
use super::companies_repository::CompanyRepositoryTrait;

/// Service for the investee-company registry. All mutators are
/// operator-only; listing is the visibility boundary between roles.
pub struct CompanyService {
    repository: Arc<dyn CompanyRepositoryTrait>,
}

impl CompanyService {
    pub fn new(repository: Arc<dyn CompanyRepositoryTrait>) -> Self {
        CompanyService { repository }
    }

    pub fn create_company(&self, principal: &Principal, new_company: NewCompany) -> Result<Company> {
        principal.ensure_admin()?;
        debug!("Creating company '{}'", new_company.name);
        self.repository.create(new_company)
    }

    pub fn update_company(
        &self,
        principal: &Principal,
        company_id: &str,
        patch: CompanyUpdate,
    ) -> Result<Company> {
        principal.ensure_admin()?;
        self.repository.update(company_id, patch)
    }

    /// Valuation-only update. Guarded by the floor; on success every
    /// dependent portfolio reprices on its next read because derived
    /// numbers are never stored anywhere.
    pub fn reprice_company(
        &self,
        principal: &Principal,
        company_id: &str,
        new_valuation: i64,
    ) -> Result<Company> {
        principal.ensure_admin()?;

        if new_valuation < VALUATION_FLOOR {
            return Err(Error::Validation(ValidationError::BelowValuationFloor(
                new_valuation,
                VALUATION_FLOOR,
            )));
        }

        let company = self.repository.reprice(company_id, new_valuation)?;
        info!(
            "Repriced company {} to {}; portfolios reflect it on next read",
            company_id, new_valuation
        );
        Ok(company)
    }

    pub fn set_active(
        &self,
        principal: &Principal,
        company_id: &str,
        active: bool,
    ) -> Result<Company> {
        principal.ensure_admin()?;
        self.repository.set_active(company_id, active)
    }

    pub fn delete_company(&self, principal: &Principal, company_id: &str) -> Result<()> {
        principal.ensure_admin()?;
        self.repository.delete(company_id)?;
        info!("Deleted company {}", company_id);
        Ok(())
    }

    /// Clients only ever see companies marked visible; the operator sees
    /// everything.
    pub fn list_companies(&self, principal: &Principal) -> Result<Vec<Company>> {
        if principal.is_admin() {
            self.repository.list(None)
        } else {
            self.repository.list(Some(true))
        }
    }

    pub fn get_company(&self, principal: &Principal, company_id: &str) -> Result<Company> {
        let company = self.repository.get_by_id(company_id)?;
        if !principal.is_admin() && !company.active {
            return Err(Error::NotFound(format!(
                "Company with id {} not found",
                company_id
            )));
        }
        Ok(company)
    }
}
