use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::companies::Sector;

/// A holding priced against the company's live valuation. When the
/// company record is gone, pricing falls back to the holding's own
/// buy valuation and `priced_live` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub company_id: String,
    pub company_name: String,
    pub sector: Sector,
    pub stake: Decimal,
    pub purchase_date: NaiveDate,
    pub invested_amt: i64,
    pub current_value: i64,
    pub gain: i64,
    pub return_pct: Decimal,
    pub priced_live: bool,
    /// Display strings in en-IN conventions.
    pub invested_display: String,
    pub current_display: String,
    pub gain_display: String,
    pub return_display: String,
}

/// Portfolio-level totals. `total_gain` is always exactly
/// `total_current - total_invested`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_invested: i64,
    pub total_current: i64,
    pub total_gain: i64,
    pub total_return_pct: Decimal,
    pub total_invested_display: String,
    pub total_current_display: String,
    pub total_gain_display: String,
    pub total_return_display: String,
    pub positions: Vec<HoldingValuation>,
    pub allocation: Vec<SectorAllocation>,
}

/// Current value grouped by sector, largest bucket first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: Sector,
    pub current_value: i64,
    pub share_pct: Decimal,
}
