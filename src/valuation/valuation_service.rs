use std::sync::Arc;

use crate::auth::Principal;
use crate::companies::CompanyRepositoryTrait;
use crate::errors::Result;
use crate::portfolios::PortfolioRepositoryTrait;

use super::valuation_calculator::ValuationCalculator;
use super::valuation_model::PortfolioSummary;

/// Read-side valuation. Each call re-joins the client's holdings against
/// the company records as they stand now; there is no derived state to
/// invalidate after a reprice.
pub struct ValuationService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
}

impl ValuationService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
    ) -> Self {
        ValuationService {
            portfolio_repository,
            company_repository,
        }
    }

    pub fn portfolio_summary(
        &self,
        principal: &Principal,
        client_id: &str,
    ) -> Result<PortfolioSummary> {
        principal.ensure_self_or_admin(client_id)?;
        let portfolio = self.portfolio_repository.get(client_id)?;
        // Pricing deliberately ignores the active flag: a delisted company
        // still prices holdings bought while it was listed.
        let companies = self.company_repository.list(None)?;
        Ok(ValuationCalculator::summarize(
            &portfolio.holdings,
            &companies,
        ))
    }
}
