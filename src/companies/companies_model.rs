use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// Fixed sector taxonomy for investee companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Healthcare,
    Logistics,
    Infrastructure,
    Renewables,
    Finance,
    #[serde(rename = "FMCG")]
    Fmcg,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Others,
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sector::Technology => "Technology",
            Sector::Healthcare => "Healthcare",
            Sector::Logistics => "Logistics",
            Sector::Infrastructure => "Infrastructure",
            Sector::Renewables => "Renewables",
            Sector::Finance => "Finance",
            Sector::Fmcg => "FMCG",
            Sector::RealEstate => "Real Estate",
            Sector::Others => "Others",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Sector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Technology" => Ok(Sector::Technology),
            "Healthcare" => Ok(Sector::Healthcare),
            "Logistics" => Ok(Sector::Logistics),
            "Infrastructure" => Ok(Sector::Infrastructure),
            "Renewables" => Ok(Sector::Renewables),
            "Finance" => Ok(Sector::Finance),
            "FMCG" => Ok(Sector::Fmcg),
            "Real Estate" => Ok(Sector::RealEstate),
            "Others" => Ok(Sector::Others),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown sector '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Risk::Low => "Low",
            Risk::Medium => "Medium",
            Risk::High => "High",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Risk {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Low" => Ok(Risk::Low),
            "Medium" => Ok(Risk::Medium),
            "High" => Ok(Risk::High),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown risk level '{}'",
                other
            )))),
        }
    }
}

/// Domain model for an investee company. `current_valuation` is the single
/// source of truth for price; `initial_valuation` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub sector: Sector,
    pub min_invest: i64,
    pub current_valuation: i64,
    pub initial_valuation: i64,
    pub expected_returns: String,
    pub risk: Risk,
    pub lot_size: Option<String>,
    pub description: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub sector: Sector,
    pub min_invest: i64,
    pub current_valuation: i64,
    /// Defaults to `current_valuation` when omitted; immutable afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_valuation: Option<i64>,
    #[serde(default)]
    pub expected_returns: String,
    pub risk: Risk,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewCompany {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.min_invest <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Minimum investment must be positive".to_string(),
            )));
        }
        if self.current_valuation <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Valuation must be positive".to_string(),
            )));
        }
        if let Some(initial) = self.initial_valuation {
            if initial <= 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Initial valuation must be positive".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Patch model for the general edit operation. Absent fields keep their
/// stored value; `initial_valuation` is deliberately not editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub sector: Option<Sector>,
    pub min_invest: Option<i64>,
    pub current_valuation: Option<i64>,
    pub expected_returns: Option<String>,
    pub risk: Option<Risk>,
    pub lot_size: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl CompanyUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    "name".to_string(),
                )));
            }
        }
        if let Some(min_invest) = self.min_invest {
            if min_invest <= 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Minimum investment must be positive".to_string(),
                )));
            }
        }
        if let Some(valuation) = self.current_valuation {
            if valuation <= 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Valuation must be positive".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Database model for companies
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyDB {
    pub id: String,
    pub name: String,
    pub sector: String,
    pub min_invest: i64,
    pub current_valuation: i64,
    pub initial_valuation: i64,
    pub expected_returns: String,
    pub risk: String,
    pub lot_size: Option<String>,
    pub description: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<CompanyDB> for Company {
    fn from(db: CompanyDB) -> Self {
        Company {
            id: db.id,
            name: db.name,
            sector: Sector::from_str(&db.sector).unwrap_or(Sector::Others),
            min_invest: db.min_invest,
            current_valuation: db.current_valuation,
            initial_valuation: db.initial_valuation,
            expected_returns: db.expected_returns,
            risk: Risk::from_str(&db.risk).unwrap_or(Risk::Medium),
            lot_size: db.lot_size,
            description: db.description,
            active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
