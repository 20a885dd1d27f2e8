use serde::Serialize;

use super::engine::compute_forecast_with_catalog;
use super::progress::{ImplementationProgress, summarize};
use super::selector::{auto_select, select_applicable};
use super::types::{
    ApplicableStrategies, ForecastResult, ImplementationSummary, StrategyDefinition, UserProfile,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan<'a> {
    pub strategies: ApplicableStrategies<'a>,
    pub selected_strategy_ids: Vec<String>,
    pub auto_selected: bool,
    pub forecast: ForecastResult,
    pub summary: ImplementationSummary,
}

/// Selects, fills in a heuristic selection when the caller made none, then forecasts.
///
/// Selected ids only count toward the forecast and the summary when the
/// profile qualifies for them.
pub fn generate_plan<'a>(
    catalog: &'a [StrategyDefinition],
    profile: &UserProfile,
    progress: &ImplementationProgress,
) -> Plan<'a> {
    let strategies = select_applicable(catalog, profile.income_type, profile.annual_income);

    let auto_selected = profile.selected_strategy_ids.is_empty();
    let mut resolved = profile.clone();
    if auto_selected {
        for id in auto_select(profile) {
            resolved.select(&id);
        }
    }

    let eligible: Vec<StrategyDefinition> = strategies.iter().cloned().collect();
    let forecast = compute_forecast_with_catalog(&eligible, &resolved);
    let summary = summarize(&eligible, &resolved.selected_strategy_ids, progress);

    Plan {
        strategies,
        selected_strategy_ids: resolved.selected_strategy_ids,
        auto_selected,
        forecast,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{CATALOG, CCORP_MSO_ID, DEFINED_BENEFIT_ID, REPS_QUALIFICATION_ID};
    use crate::core::types::{IncomeType, RealEstateStatus};

    fn business_profile() -> UserProfile {
        UserProfile {
            income_type: IncomeType::Business,
            annual_income: Some(600_000.0),
            current_tax_rate_percent: Some(37.0),
            return_rate_percent: 6.0,
            time_horizon_years: 10,
            reinvest_enabled: true,
            real_estate_status: RealEstateStatus::None,
            selected_strategy_ids: Vec::new(),
        }
    }

    #[test]
    fn empty_selection_falls_back_to_heuristic() {
        let plan = generate_plan(&CATALOG, &business_profile(), &ImplementationProgress::new());

        assert!(plan.auto_selected);
        assert_eq!(plan.selected_strategy_ids, vec![CCORP_MSO_ID, DEFINED_BENEFIT_ID]);
        // 80000 + min(100000, 120000) = 180000; bill cap = 222000 * 0.8 = 177600
        assert!((plan.forecast.annual_tax_savings - 177_600.0).abs() < 1e-6);
        assert_eq!(plan.summary.active_strategies, 2);
        assert_eq!(plan.summary.total_potential_savings, 180_000.0);
        assert_eq!(plan.forecast.projections.len(), 10);
    }

    #[test]
    fn caller_selection_is_kept_verbatim() {
        let mut profile = business_profile();
        profile.selected_strategy_ids = vec!["scorp".to_string()];
        let plan = generate_plan(&CATALOG, &profile, &ImplementationProgress::new());

        assert!(!plan.auto_selected);
        assert_eq!(plan.selected_strategy_ids, vec!["scorp"]);
        assert!((plan.forecast.annual_tax_savings - 15_000.0).abs() < 1e-6);
    }

    #[test]
    fn ineligible_auto_pick_earns_nothing_for_w2_earner() {
        let profile = UserProfile {
            income_type: IncomeType::W2,
            annual_income: Some(250_000.0),
            current_tax_rate_percent: Some(37.0),
            ..business_profile()
        };
        let plan = generate_plan(&CATALOG, &profile, &ImplementationProgress::new());

        assert_eq!(plan.selected_strategy_ids, vec![DEFINED_BENEFIT_ID]);
        let eligible: Vec<&str> = plan.strategies.iter().map(|s| s.id).collect();
        assert_eq!(eligible, vec![REPS_QUALIFICATION_ID]);
        assert_eq!(plan.forecast.annual_tax_savings, 0.0);
        assert_eq!(plan.forecast.lifetime_tax_savings, 0.0);
        assert_eq!(plan.summary.active_strategies, 1);
        assert_eq!(plan.summary.total_potential_savings, 0.0);
    }

    #[test]
    fn only_eligible_picks_count_for_w2_investor_in_real_estate() {
        let profile = UserProfile {
            income_type: IncomeType::W2,
            annual_income: Some(250_000.0),
            current_tax_rate_percent: Some(37.0),
            real_estate_status: RealEstateStatus::Ltr,
            ..business_profile()
        };
        let plan = generate_plan(&CATALOG, &profile, &ImplementationProgress::new());

        assert_eq!(
            plan.selected_strategy_ids,
            vec![REPS_QUALIFICATION_ID, DEFINED_BENEFIT_ID]
        );
        // reps: min(60000, 250000 * 20%) = 50000; defined_benefit is not eligible
        assert!((plan.forecast.annual_tax_savings - 50_000.0).abs() < 1e-6);
        assert_eq!(plan.summary.total_potential_savings, 60_000.0);
    }

    #[test]
    fn plan_serializes_categories_and_camel_case_fields() {
        let plan = generate_plan(&CATALOG, &business_profile(), &ImplementationProgress::new());
        let json = serde_json::to_value(&plan).expect("plan should serialize");

        assert!(json["strategies"]["setup"].is_array());
        assert!(json["strategies"]["deductions"].is_array());
        assert!(json["strategies"]["exit"].is_array());
        assert_eq!(json["autoSelected"], serde_json::json!(true));
        assert!(json["forecast"]["annualTaxSavings"].is_number());
        assert!(json["forecast"]["projections"][0]["investmentValue"].is_number());
        assert!(json["summary"]["overallProgressPercent"].is_number());
        assert_eq!(
            json["strategies"]["setup"][0]["applicableIncomeTypes"],
            serde_json::json!(["business", "self-employed"])
        );
    }
}
