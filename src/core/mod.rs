mod catalog;
mod engine;
mod plan;
mod progress;
mod selector;
mod types;

pub use catalog::{CATALOG, CCORP_MSO_ID, DEFINED_BENEFIT_ID, REPS_QUALIFICATION_ID, find_strategy};
pub use engine::{
    DEFAULT_TAX_RATE_PERCENT, MAX_HORIZON_YEARS, STRATEGY_INCOME_SHARE_CAP, TAX_BILL_SAVINGS_CAP,
    compute_forecast, compute_forecast_with_catalog,
};
pub use plan::{Plan, generate_plan};
pub use progress::{COMPLETE_PERCENT, ImplementationProgress, STEP_PERCENT, summarize};
pub use selector::{auto_select, select_applicable};
pub use types::{
    ApplicableStrategies, Category, Complexity, ForecastResult, ImplementationSummary, IncomeType,
    ProjectionPoint, RealEstateStatus, StrategyDefinition, UserProfile,
};
