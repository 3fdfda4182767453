use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::companies;
use crate::schema::companies::dsl::*;

use super::companies_model::{Company, CompanyDB, CompanyUpdate, NewCompany};

/// Contract for company storage. The registry is the single source of
/// truth for price; nothing here ever touches portfolios.
pub trait CompanyRepositoryTrait: Send + Sync {
    fn create(&self, new_company: NewCompany) -> Result<Company>;
    fn update(&self, company_id: &str, patch: CompanyUpdate) -> Result<Company>;
    fn reprice(&self, company_id: &str, new_valuation: i64) -> Result<Company>;
    fn set_active(&self, company_id: &str, active: bool) -> Result<Company>;
    fn delete(&self, company_id: &str) -> Result<usize>;
    fn get_by_id(&self, company_id: &str) -> Result<Company>;
    fn list(&self, active_filter: Option<bool>) -> Result<Vec<Company>>;
}

pub struct CompanyRepository {
    pool: Arc<DbPool>,
}

impl CompanyRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        CompanyRepository { pool }
    }
}

impl CompanyRepositoryTrait for CompanyRepository {
    fn create(&self, new_company: NewCompany) -> Result<Company> {
        new_company.validate()?;

        let now = chrono::Utc::now().naive_utc();
        let company_db = CompanyDB {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_company.name,
            sector: new_company.sector.to_string(),
            min_invest: new_company.min_invest,
            current_valuation: new_company.current_valuation,
            initial_valuation: new_company
                .initial_valuation
                .unwrap_or(new_company.current_valuation),
            expected_returns: new_company.expected_returns,
            risk: new_company.risk.to_string(),
            lot_size: new_company.lot_size,
            description: new_company.description,
            is_active: new_company.active,
            created_at: now,
            updated_at: now,
        };

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(companies::table)
            .values(&company_db)
            .execute(&mut conn)?;

        Ok(company_db.into())
    }

    fn update(&self, company_id: &str, patch: CompanyUpdate) -> Result<Company> {
        patch.validate()?;

        let mut conn = get_connection(&self.pool)?;
        let mut existing = find_db(&mut conn, company_id)?;

        if let Some(new_name) = patch.name {
            existing.name = new_name;
        }
        if let Some(new_sector) = patch.sector {
            existing.sector = new_sector.to_string();
        }
        if let Some(new_min) = patch.min_invest {
            existing.min_invest = new_min;
        }
        if let Some(new_valuation) = patch.current_valuation {
            existing.current_valuation = new_valuation;
        }
        if let Some(returns) = patch.expected_returns {
            existing.expected_returns = returns;
        }
        if let Some(new_risk) = patch.risk {
            existing.risk = new_risk.to_string();
        }
        if let Some(lot) = patch.lot_size {
            existing.lot_size = Some(lot);
        }
        if let Some(desc) = patch.description {
            existing.description = desc;
        }
        if let Some(visible) = patch.active {
            existing.is_active = visible;
        }
        existing.updated_at = chrono::Utc::now().naive_utc();

        diesel::update(companies.find(company_id))
            .set(&existing)
            .execute(&mut conn)?;

        Ok(existing.into())
    }

    fn reprice(&self, company_id: &str, new_valuation: i64) -> Result<Company> {
        let mut conn = get_connection(&self.pool)?;

        // The sole write that changes price. Dependent portfolios are never
        // touched; they reprice on their next read.
        let affected = diesel::update(companies.find(company_id))
            .set((
                current_valuation.eq(new_valuation),
                updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Company with id {} not found",
                company_id
            )));
        }

        find_db(&mut conn, company_id).map(Company::from)
    }

    fn set_active(&self, company_id: &str, active: bool) -> Result<Company> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::update(companies.find(company_id))
            .set((
                is_active.eq(active),
                updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Company with id {} not found",
                company_id
            )));
        }

        find_db(&mut conn, company_id).map(Company::from)
    }

    fn delete(&self, company_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        // Permanent and deliberately non-cascading: holdings keep their
        // buy-valuation snapshot and fall back to it for pricing.
        let affected = diesel::delete(companies.find(company_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Company with id {} not found",
                company_id
            )));
        }

        Ok(affected)
    }

    fn get_by_id(&self, company_id: &str) -> Result<Company> {
        let mut conn = get_connection(&self.pool)?;
        find_db(&mut conn, company_id).map(Company::from)
    }

    fn list(&self, active_filter: Option<bool>) -> Result<Vec<Company>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = companies::table.into_boxed();
        if let Some(visible) = active_filter {
            query = query.filter(is_active.eq(visible));
        }

        let rows = query
            .order(created_at.asc())
            .load::<CompanyDB>(&mut conn)?;

        Ok(rows.into_iter().map(Company::from).collect())
    }
}

fn find_db(conn: &mut crate::db::DbConnection, company_id: &str) -> Result<CompanyDB> {
    companies
        .find(company_id)
        .first::<CompanyDB>(conn)
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("Company with id {} not found", company_id)))
}
