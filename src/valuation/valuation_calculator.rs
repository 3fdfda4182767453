use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

use crate::companies::{Company, Sector};
use crate::portfolios::Holding;
use crate::utils::format_utils::{format_inr, format_signed_pct, round_display};

use super::valuation_model::{HoldingValuation, PortfolioSummary, SectorAllocation};

/// Stateless pricing math. Every number is derived from the holding and
/// the current company record at call time; nothing is cached or stored,
/// so a company reprice is visible on the very next read.
pub struct ValuationCalculator;

impl ValuationCalculator {
    /// Unrounded current worth: stake percent applied to the company's
    /// live valuation. A deleted company freezes pricing at the holding's
    /// buy valuation.
    fn current_value_exact(holding: &Holding, company: Option<&Company>) -> Decimal {
        let valuation = company
            .map(|c| c.current_valuation)
            .unwrap_or(holding.buy_valuation);
        holding.stake / Decimal::ONE_HUNDRED * Decimal::from(valuation)
    }

    /// Unrounded amount the client put in, always derived from the stake
    /// and the buy valuation. `invested_amt` on the holding is a stored
    /// record field and takes no part in derived math.
    fn invested_value_exact(holding: &Holding) -> Decimal {
        holding.stake / Decimal::ONE_HUNDRED * Decimal::from(holding.buy_valuation)
    }

    pub fn current_value(holding: &Holding, company: Option<&Company>) -> i64 {
        round_display(Self::current_value_exact(holding, company))
    }

    pub fn invested_value(holding: &Holding) -> i64 {
        round_display(Self::invested_value_exact(holding))
    }

    pub fn gain(holding: &Holding, company: Option<&Company>) -> i64 {
        Self::current_value(holding, company) - Self::invested_value(holding)
    }

    /// How far the company has moved since this holding was bought,
    /// measured against the buy valuation. Zero-guarded.
    pub fn holding_change_pct(holding: &Holding, company: &Company) -> Decimal {
        if holding.buy_valuation == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(company.current_valuation - holding.buy_valuation)
            / Decimal::from(holding.buy_valuation)
            * Decimal::ONE_HUNDRED
    }

    /// Percentage return on the invested amount, zero when nothing was
    /// invested. Computed on unrounded values; rounding only ever applies
    /// to the whole-unit display amounts.
    pub fn return_pct(holding: &Holding, company: Option<&Company>) -> Decimal {
        let invested = Self::invested_value_exact(holding);
        if invested.is_zero() {
            return Decimal::ZERO;
        }
        (Self::current_value_exact(holding, company) - invested) / invested
            * Decimal::ONE_HUNDRED
    }

    /// Company-level appreciation since listing, zero-guarded against a
    /// zero initial valuation.
    pub fn valuation_change_pct(company: &Company) -> Decimal {
        if company.initial_valuation == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(company.current_valuation - company.initial_valuation)
            / Decimal::from(company.initial_valuation)
            * Decimal::ONE_HUNDRED
    }

    pub fn price_holding(holding: &Holding, company: Option<&Company>) -> HoldingValuation {
        // Percentages come from the exact figures; the whole-unit fields
        // are rounded at this boundary only.
        let invested = Self::invested_value(holding);
        let current_value = Self::current_value(holding, company);
        let gain = current_value - invested;
        let return_pct = Self::return_pct(holding, company);
        HoldingValuation {
            company_id: holding.company_id.clone(),
            company_name: holding.company_name.clone(),
            sector: holding.sector,
            stake: holding.stake,
            purchase_date: holding.purchase_date,
            invested_amt: invested,
            current_value,
            gain,
            return_pct,
            priced_live: company.is_some(),
            invested_display: format_inr(invested),
            current_display: format_inr(current_value),
            gain_display: format_inr(gain),
            return_display: format_signed_pct(return_pct),
        }
    }

    /// Prices every holding and rolls the totals up. The total return is
    /// computed on the summed amounts, not averaged per position.
    pub fn summarize(holdings: &[Holding], companies: &[Company]) -> PortfolioSummary {
        let by_id: HashMap<&str, &Company> =
            companies.iter().map(|c| (c.id.as_str(), c)).collect();

        let positions: Vec<HoldingValuation> = holdings
            .iter()
            .map(|h| Self::price_holding(h, by_id.get(h.company_id.as_str()).copied()))
            .collect();

        // Totals carry full precision until display; the return percentage
        // never sees a rounded amount.
        let total_invested_exact: Decimal =
            holdings.iter().map(Self::invested_value_exact).sum();
        let total_current_exact: Decimal = holdings
            .iter()
            .map(|h| Self::current_value_exact(h, by_id.get(h.company_id.as_str()).copied()))
            .sum();

        let total_invested = round_display(total_invested_exact);
        let total_current = round_display(total_current_exact);
        let total_gain = total_current - total_invested;
        let total_return_pct = if total_invested_exact.is_zero() {
            Decimal::ZERO
        } else {
            (total_current_exact - total_invested_exact) / total_invested_exact
                * Decimal::ONE_HUNDRED
        };

        let allocation = Self::sector_breakdown(&positions, total_current);

        PortfolioSummary {
            total_invested,
            total_current,
            total_gain,
            total_return_pct,
            total_invested_display: format_inr(total_invested),
            total_current_display: format_inr(total_current),
            total_gain_display: format_inr(total_gain),
            total_return_display: format_signed_pct(total_return_pct),
            positions,
            allocation,
        }
    }

    fn sector_breakdown(
        positions: &[HoldingValuation],
        total_current: i64,
    ) -> Vec<SectorAllocation> {
        let mut by_sector: HashMap<Sector, i64> = HashMap::new();
        for p in positions {
            *by_sector.entry(p.sector).or_insert(0) += p.current_value;
        }

        let mut allocation: Vec<SectorAllocation> = by_sector
            .into_iter()
            .map(|(sector, current_value)| {
                let share_pct = if total_current == 0 {
                    Decimal::ZERO
                } else {
                    (Decimal::from(current_value) / Decimal::from(total_current)
                        * Decimal::ONE_HUNDRED)
                        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                };
                SectorAllocation {
                    sector,
                    current_value,
                    share_pct,
                }
            })
            .collect();

        allocation.sort_by(|a, b| {
            b.current_value
                .cmp(&a.current_value)
                .then_with(|| a.sector.to_string().cmp(&b.sector.to_string()))
        });
        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::Risk;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn company(id: &str, sector: Sector, current: i64, initial: i64) -> Company {
        Company {
            id: id.to_string(),
            name: format!("{} Ltd", id),
            sector,
            min_invest: 50_000,
            current_valuation: current,
            initial_valuation: initial,
            expected_returns: "15-20%".to_string(),
            risk: Risk::Medium,
            lot_size: None,
            description: String::new(),
            active: true,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn holding(company_id: &str, sector: Sector, stake: Decimal, buy_valuation: i64) -> Holding {
        Holding {
            company_id: company_id.to_string(),
            company_name: format!("{} Ltd", company_id),
            sector,
            stake,
            buy_valuation,
            invested_amt: round_display(
                stake / Decimal::ONE_HUNDRED * Decimal::from(buy_valuation),
            ),
            purchase_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        }
    }

    #[test]
    fn one_percent_stake_prices_against_live_valuation() {
        let co = company("co-1", Sector::Technology, 5_000_000, 5_000_000);
        let h = holding("co-1", Sector::Technology, dec!(1), 5_000_000);

        assert_eq!(h.invested_amt, 50_000);
        assert_eq!(ValuationCalculator::current_value(&h, Some(&co)), 50_000);
        assert_eq!(ValuationCalculator::gain(&h, Some(&co)), 0);
        assert_eq!(ValuationCalculator::return_pct(&h, Some(&co)), dec!(0));
    }

    #[test]
    fn reprice_flows_through_without_touching_the_holding() {
        let mut co = company("co-1", Sector::Technology, 5_000_000, 5_000_000);
        let h = holding("co-1", Sector::Technology, dec!(1), 5_000_000);

        co.current_valuation = 6_000_000;

        assert_eq!(ValuationCalculator::current_value(&h, Some(&co)), 60_000);
        assert_eq!(ValuationCalculator::gain(&h, Some(&co)), 10_000);
        assert_eq!(ValuationCalculator::return_pct(&h, Some(&co)), dec!(20));
        assert_eq!(ValuationCalculator::valuation_change_pct(&co), dec!(20));
    }

    #[test]
    fn missing_company_falls_back_to_buy_valuation() {
        let h = holding("gone", Sector::Healthcare, dec!(2), 1_000_000);

        let priced = ValuationCalculator::price_holding(&h, None);
        assert!(!priced.priced_live);
        assert_eq!(priced.current_value, 20_000);
        assert_eq!(priced.gain, 0);
        assert_eq!(priced.return_display, "+0.00%");
    }

    #[test]
    fn zero_invested_amount_never_divides() {
        let mut h = holding("co-1", Sector::Finance, dec!(1), 5_000_000);
        h.buy_valuation = 0;
        h.invested_amt = 0;
        let co = company("co-1", Sector::Finance, 6_000_000, 5_000_000);
        assert_eq!(ValuationCalculator::return_pct(&h, Some(&co)), dec!(0));
    }

    #[test]
    fn invested_value_derives_from_stake_not_the_stored_amount() {
        let mut h = holding("co-1", Sector::Finance, dec!(1), 5_000_000);
        h.invested_amt = 48_000;

        let co = company("co-1", Sector::Finance, 6_000_000, 5_000_000);
        assert_eq!(ValuationCalculator::invested_value(&h), 50_000);
        assert_eq!(ValuationCalculator::gain(&h, Some(&co)), 10_000);
        assert_eq!(ValuationCalculator::return_pct(&h, Some(&co)), dec!(20));

        let priced = ValuationCalculator::price_holding(&h, Some(&co));
        assert_eq!(priced.invested_amt, 50_000);
        assert_eq!(priced.gain, 10_000);
    }

    #[test]
    fn tiny_stakes_keep_their_true_return() {
        // Amounts round to zero whole units, the percentage must not.
        let h = holding("co-1", Sector::Finance, dec!(0.001), 150);
        let co = company("co-1", Sector::Finance, 180, 150);

        assert_eq!(ValuationCalculator::invested_value(&h), 0);
        assert_eq!(ValuationCalculator::return_pct(&h, Some(&co)), dec!(20));

        let summary = ValuationCalculator::summarize(
            std::slice::from_ref(&h),
            std::slice::from_ref(&co),
        );
        assert_eq!(summary.total_return_pct, dec!(20));
        assert_eq!(summary.total_return_display, "+20.00%");
    }

    #[test]
    fn holding_change_tracks_the_buy_valuation() {
        let co = company("co-1", Sector::Technology, 6_000_000, 5_000_000);
        let h = holding("co-1", Sector::Technology, dec!(1), 5_000_000);
        assert_eq!(ValuationCalculator::holding_change_pct(&h, &co), dec!(20));

        let mut zero_buy = h.clone();
        zero_buy.buy_valuation = 0;
        assert_eq!(
            ValuationCalculator::holding_change_pct(&zero_buy, &co),
            dec!(0)
        );
    }

    #[test]
    fn zero_initial_valuation_never_divides() {
        let co = company("co-1", Sector::Finance, 6_000_000, 0);
        assert_eq!(ValuationCalculator::valuation_change_pct(&co), dec!(0));
    }

    #[test]
    fn summary_totals_are_sums_of_positions() {
        let companies = vec![
            company("co-1", Sector::Technology, 6_000_000, 5_000_000),
            company("co-2", Sector::Logistics, 2_000_000, 2_000_000),
        ];
        let holdings = vec![
            holding("co-1", Sector::Technology, dec!(1), 5_000_000),
            holding("co-2", Sector::Logistics, dec!(5), 2_000_000),
        ];

        let summary = ValuationCalculator::summarize(&holdings, &companies);

        assert_eq!(summary.total_invested, 150_000);
        assert_eq!(summary.total_current, 160_000);
        assert_eq!(summary.total_gain, 10_000);
        assert_eq!(
            summary.total_gain,
            summary.total_current - summary.total_invested
        );
        assert_eq!(summary.total_invested_display, "₹1,50,000");
        assert_eq!(summary.positions.len(), 2);
    }

    #[test]
    fn allocation_is_sorted_by_value_descending() {
        let companies = vec![
            company("co-1", Sector::Technology, 6_000_000, 5_000_000),
            company("co-2", Sector::Logistics, 2_000_000, 2_000_000),
        ];
        let holdings = vec![
            holding("co-1", Sector::Technology, dec!(1), 5_000_000),
            holding("co-2", Sector::Logistics, dec!(5), 2_000_000),
        ];

        let summary = ValuationCalculator::summarize(&holdings, &companies);

        assert_eq!(summary.allocation[0].sector, Sector::Logistics);
        assert_eq!(summary.allocation[0].current_value, 100_000);
        assert_eq!(summary.allocation[0].share_pct, dec!(62.50));
        assert_eq!(summary.allocation[1].sector, Sector::Technology);
    }

    #[test]
    fn empty_portfolio_summarizes_to_zeroes() {
        let summary = ValuationCalculator::summarize(&[], &[]);
        assert_eq!(summary.total_invested, 0);
        assert_eq!(summary.total_return_pct, dec!(0));
        assert!(summary.allocation.is_empty());
    }
}
