use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::portfolios;
use crate::schema::portfolios::dsl::*;

use super::portfolios_model::{Holding, Portfolio, PortfolioDB};

/// Contract for portfolio storage. Writes always replace the whole
/// holdings list; the version the caller read must accompany the write.
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get(&self, for_client_id: &str) -> Result<Portfolio>;
    fn save_holdings(
        &self,
        for_client_id: &str,
        new_holdings: Vec<Holding>,
        expected_version: i64,
    ) -> Result<Portfolio>;
}

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PortfolioRepository { pool }
    }
}

impl PortfolioRepositoryTrait for PortfolioRepository {
    fn get(&self, for_client_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;

        let row = portfolios
            .find(for_client_id)
            .first::<PortfolioDB>(&mut conn)
            .optional()?;

        match row {
            Some(db) => Portfolio::try_from(db),
            // Lazily created: absent document reads as an empty portfolio.
            None => Ok(Portfolio::empty(for_client_id)),
        }
    }

    fn save_holdings(
        &self,
        for_client_id: &str,
        new_holdings: Vec<Holding>,
        expected_version: i64,
    ) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        let encoded = serde_json::to_string(&new_holdings)?;
        let now = chrono::Utc::now().naive_utc();

        conn.transaction::<Portfolio, Error, _>(|conn| {
            let current = portfolios
                .find(for_client_id)
                .first::<PortfolioDB>(conn)
                .optional()?;

            match current {
                None => {
                    if expected_version != 0 {
                        return Err(stale_version(for_client_id, expected_version, 0));
                    }
                    let row = PortfolioDB {
                        client_id: for_client_id.to_string(),
                        holdings: encoded.clone(),
                        version: 1,
                        updated_at: now,
                    };
                    diesel::insert_into(portfolios::table)
                        .values(&row)
                        .execute(conn)?;
                    Portfolio::try_from(row)
                }
                Some(existing) => {
                    if existing.version != expected_version {
                        return Err(stale_version(
                            for_client_id,
                            expected_version,
                            existing.version,
                        ));
                    }
                    let affected = diesel::update(
                        portfolios
                            .find(for_client_id)
                            .filter(version.eq(expected_version)),
                    )
                    .set((
                        holdings.eq(&encoded),
                        version.eq(expected_version + 1),
                        updated_at.eq(now),
                    ))
                    .execute(conn)?;

                    if affected == 0 {
                        return Err(stale_version(
                            for_client_id,
                            expected_version,
                            existing.version,
                        ));
                    }

                    Portfolio::try_from(PortfolioDB {
                        client_id: for_client_id.to_string(),
                        holdings: encoded.clone(),
                        version: expected_version + 1,
                        updated_at: now,
                    })
                }
            }
        })
    }
}

fn stale_version(for_client_id: &str, expected: i64, actual: i64) -> Error {
    Error::Conflict(format!(
        "portfolio of client {} was modified concurrently (expected version {}, found {}); re-read and retry",
        for_client_id, expected, actual
    ))
}
