use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::companies::{Company, Sector};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::format_utils::round_display;

/// One stake held by a client. `company_name` and `sector` are intentional
/// point-in-time snapshots taken when the holding is added; they do not
/// re-sync with the live company record. `buy_valuation` is the pricing
/// fallback when the referenced company no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub company_id: String,
    pub company_name: String,
    pub sector: Sector,
    pub stake: Decimal,
    pub buy_valuation: i64,
    pub invested_amt: i64,
    pub purchase_date: NaiveDate,
}

/// A client's portfolio document: the ordered holdings list plus the
/// version counter compared on every whole-list write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub client_id: String,
    pub holdings: Vec<Holding>,
    pub version: i64,
    pub updated_at: NaiveDateTime,
}

impl Portfolio {
    /// The empty portfolio handed out before any holding exists. Version 0
    /// tells the store the first write must create the document.
    pub fn empty(client_id: &str) -> Self {
        Portfolio {
            client_id: client_id.to_string(),
            holdings: Vec::new(),
            version: 0,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Input model for adding a holding. Snapshot fields are filled in by the
/// service from the live company record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub company_id: String,
    pub stake: Decimal,
    pub buy_valuation: i64,
    /// Defaults to round(stake/100 * buy_valuation) when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invested_amt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
}

impl NewHolding {
    pub fn validate(&self) -> Result<()> {
        if self.company_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "companyId".to_string(),
            )));
        }
        if self.stake <= Decimal::ZERO || self.stake > Decimal::ONE_HUNDRED {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Stake must be greater than 0 and at most 100 percent".to_string(),
            )));
        }
        if self.buy_valuation <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Buy valuation must be positive".to_string(),
            )));
        }
        Ok(())
    }

    /// Materializes the holding, snapshotting name and sector from the
    /// company as it stands right now.
    pub fn into_holding(self, company: &Company) -> Holding {
        let invested_amt = self.invested_amt.unwrap_or_else(|| {
            round_display(self.stake / Decimal::ONE_HUNDRED * Decimal::from(self.buy_valuation))
        });
        Holding {
            company_id: self.company_id,
            company_name: company.name.clone(),
            sector: company.sector,
            stake: self.stake,
            buy_valuation: self.buy_valuation,
            invested_amt,
            purchase_date: self
                .purchase_date
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        }
    }
}

/// Database model for portfolios. Holdings travel as one JSON document so
/// every write replaces the whole list atomically.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(primary_key(client_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub client_id: String,
    pub holdings: String,
    pub version: i64,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PortfolioDB> for Portfolio {
    type Error = Error;

    fn try_from(db: PortfolioDB) -> Result<Portfolio> {
        let holdings: Vec<Holding> = serde_json::from_str(&db.holdings)?;
        Ok(Portfolio {
            client_id: db.client_id,
            holdings,
            version: db.version,
            updated_at: db.updated_at,
        })
    }
}
