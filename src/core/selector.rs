use super::catalog::{CCORP_MSO_ID, DEFINED_BENEFIT_ID, REPS_QUALIFICATION_ID};
use super::types::{ApplicableStrategies, IncomeType, RealEstateStatus, StrategyDefinition, UserProfile};

const CORPORATE_RESTRUCTURE_MIN_INCOME: f64 = 500_000.0;
const HIGH_CONTRIBUTION_PLAN_MIN_INCOME: f64 = 200_000.0;

/// Filters the catalog down to the strategies a profile qualifies for.
///
/// An unset income imposes no minimum. Unknown income types match nothing.
/// Every category is present in the output, possibly empty.
pub fn select_applicable(
    catalog: &[StrategyDefinition],
    income_type: IncomeType,
    annual_income: Option<f64>,
) -> ApplicableStrategies<'_> {
    let mut applicable = ApplicableStrategies::default();
    for strategy in catalog {
        if strategy.applies_to(income_type, annual_income) {
            applicable.push(strategy);
        }
    }
    applicable
}

/// Heuristic starting selection so a fresh plan has a non-zero forecast.
///
/// Rules are evaluated independently and their matches returned in rule order.
/// The picks are not checked against eligibility.
pub fn auto_select(profile: &UserProfile) -> Vec<String> {
    let income = profile.annual_income.unwrap_or(0.0);
    let mut selected = Vec::new();

    if profile.income_type == IncomeType::Business && income >= CORPORATE_RESTRUCTURE_MIN_INCOME {
        selected.push(CCORP_MSO_ID.to_string());
    }

    if profile.income_type == IncomeType::W2 && profile.real_estate_status != RealEstateStatus::None
    {
        selected.push(REPS_QUALIFICATION_ID.to_string());
    }

    if income >= HIGH_CONTRIBUTION_PLAN_MIN_INCOME {
        selected.push(DEFINED_BENEFIT_ID.to_string());
    }

    selected
}
