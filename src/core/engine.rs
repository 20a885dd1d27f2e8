use tracing::debug;

use super::catalog::{CATALOG, find_strategy};
use super::types::{ForecastResult, ProjectionPoint, StrategyDefinition, UserProfile};

pub const DEFAULT_TAX_RATE_PERCENT: f64 = 25.0;
/// No single strategy may claim more than this share of income.
pub const STRATEGY_INCOME_SHARE_CAP: f64 = 0.2;
/// Total savings may never exceed this share of the current tax bill.
pub const TAX_BILL_SAVINGS_CAP: f64 = 0.8;
/// Longer horizons are truncated to this many projection years.
pub const MAX_HORIZON_YEARS: u32 = 100;

#[derive(Debug, Clone, Copy)]
struct NormalizedInputs {
    income: f64,
    tax_rate_percent: f64,
    return_rate: f64,
    horizon_years: u32,
    reinvest: bool,
}

impl NormalizedInputs {
    fn from_profile(profile: &UserProfile) -> Self {
        let income = profile
            .annual_income
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
            .max(0.0);
        let tax_rate_percent = profile
            .current_tax_rate_percent
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_TAX_RATE_PERCENT)
            .clamp(0.0, 100.0);
        let return_rate = if profile.return_rate_percent.is_finite() {
            profile.return_rate_percent / 100.0
        } else {
            0.0
        };
        Self {
            income,
            tax_rate_percent,
            return_rate,
            horizon_years: profile.time_horizon_years.min(MAX_HORIZON_YEARS),
            reinvest: profile.reinvest_enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulators {
    cumulative_savings: f64,
    investment_value: f64,
}

impl Accumulators {
    fn advance(&mut self, annual_savings: f64, return_rate: f64, reinvest: bool) {
        self.cumulative_savings += annual_savings;
        if reinvest {
            // Contribution lands at year end, so it earns nothing in its own year.
            self.investment_value = self.investment_value * (1.0 + return_rate) + annual_savings;
        } else {
            self.investment_value = self.cumulative_savings;
        }
    }
}

pub fn compute_forecast(profile: &UserProfile) -> ForecastResult {
    compute_forecast_with_catalog(&CATALOG, profile)
}

pub fn compute_forecast_with_catalog(
    catalog: &[StrategyDefinition],
    profile: &UserProfile,
) -> ForecastResult {
    let inputs = NormalizedInputs::from_profile(profile);

    let current_tax_bill = inputs.income * inputs.tax_rate_percent / 100.0;
    let raw_strategy_savings =
        strategy_savings(catalog, &profile.selected_strategy_ids, inputs.income);
    let annual_tax_savings = raw_strategy_savings.min(current_tax_bill * TAX_BILL_SAVINGS_CAP);
    let optimized_tax_bill = current_tax_bill - annual_tax_savings;
    let effective_reduction_percent = if current_tax_bill > 0.0 {
        round_to_tenth(annual_tax_savings / current_tax_bill * 100.0)
    } else {
        0.0
    };

    let mut acc = Accumulators::default();
    let mut projections = Vec::with_capacity(inputs.horizon_years as usize);
    for year in 1..=inputs.horizon_years {
        acc.advance(annual_tax_savings, inputs.return_rate, inputs.reinvest);
        projections.push(ProjectionPoint {
            year,
            annual_savings: annual_tax_savings,
            cumulative_savings: acc.cumulative_savings,
            investment_value: acc.investment_value.round(),
        });
    }

    let lifetime_tax_savings = acc.cumulative_savings;
    let final_wealth_value = acc.investment_value;
    let wealth_multiplier = if lifetime_tax_savings > 0.0 {
        final_wealth_value / lifetime_tax_savings
    } else {
        0.0
    };

    debug!(
        income = inputs.income,
        selected = profile.selected_strategy_ids.len(),
        annual_tax_savings,
        horizon = inputs.horizon_years,
        "computed forecast"
    );

    ForecastResult {
        annual_tax_savings,
        lifetime_tax_savings,
        final_wealth_value,
        wealth_multiplier,
        current_tax_bill,
        optimized_tax_bill,
        effective_reduction_percent,
        projections,
    }
}

/// Sum of per-strategy claims, each capped at a share of income.
/// Ids missing from the catalog contribute nothing; repeats count once.
fn strategy_savings(catalog: &[StrategyDefinition], selected: &[String], income: f64) -> f64 {
    let per_strategy_cap = income * STRATEGY_INCOME_SHARE_CAP;
    selected
        .iter()
        .enumerate()
        .filter(|(i, id)| !selected[..*i].contains(*id))
        .filter_map(|(_, id)| find_strategy(catalog, id))
        .map(|strategy| strategy.max_savings.max(0.0).min(per_strategy_cap))
        .sum()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
