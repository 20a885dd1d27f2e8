use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeType {
    W2,
    Business,
    SelfEmployed,
    Investor,
    Mixed,
    /// A tag outside the known set. No catalog entry lists it, so it never matches.
    Unrecognized,
}

impl IncomeType {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "w2" | "w-2" => IncomeType::W2,
            "business" => IncomeType::Business,
            "self-employed" | "self_employed" | "selfemployed" => IncomeType::SelfEmployed,
            "investor" => IncomeType::Investor,
            "mixed" => IncomeType::Mixed,
            _ => IncomeType::Unrecognized,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            IncomeType::W2 => "w2",
            IncomeType::Business => "business",
            IncomeType::SelfEmployed => "self-employed",
            IncomeType::Investor => "investor",
            IncomeType::Mixed => "mixed",
            IncomeType::Unrecognized => "unrecognized",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Setup,
    Deductions,
    Exit,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Setup, Category::Deductions, Category::Exit];
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RealEstateStatus {
    #[default]
    None,
    Ltr,
    Str,
    Reps,
    Interested,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub complexity: Complexity,
    pub applicable_income_types: &'static [IncomeType],
    pub min_income: f64,
    pub max_savings: f64,
    pub category: Category,
    pub glossary_term: &'static str,
    pub module_link: &'static str,
    pub implementation_steps: &'static [&'static str],
}

impl StrategyDefinition {
    pub fn applies_to(&self, income_type: IncomeType, annual_income: Option<f64>) -> bool {
        let income_check = self.applicable_income_types.contains(&income_type);
        let min_income_check = annual_income.is_none_or(|income| income >= self.min_income);
        income_check && min_income_check
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub income_type: IncomeType,
    pub annual_income: Option<f64>,
    pub current_tax_rate_percent: Option<f64>,
    pub return_rate_percent: f64,
    pub time_horizon_years: u32,
    pub reinvest_enabled: bool,
    pub real_estate_status: RealEstateStatus,
    pub selected_strategy_ids: Vec<String>,
}

impl UserProfile {
    /// Records a selection, keeping first-seen order and ignoring duplicates.
    pub fn select(&mut self, id: &str) {
        if !self.selected_strategy_ids.iter().any(|s| s == id) {
            self.selected_strategy_ids.push(id.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub annual_savings: f64,
    pub cumulative_savings: f64,
    pub investment_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub annual_tax_savings: f64,
    pub lifetime_tax_savings: f64,
    pub final_wealth_value: f64,
    pub wealth_multiplier: f64,
    pub current_tax_bill: f64,
    pub optimized_tax_bill: f64,
    pub effective_reduction_percent: f64,
    pub projections: Vec<ProjectionPoint>,
}

/// Eligible strategies grouped by category, in catalog order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplicableStrategies<'a> {
    pub setup: Vec<&'a StrategyDefinition>,
    pub deductions: Vec<&'a StrategyDefinition>,
    pub exit: Vec<&'a StrategyDefinition>,
}

impl<'a> ApplicableStrategies<'a> {
    pub fn get(&self, category: Category) -> &[&'a StrategyDefinition] {
        match category {
            Category::Setup => &self.setup,
            Category::Deductions => &self.deductions,
            Category::Exit => &self.exit,
        }
    }

    pub(crate) fn push(&mut self, strategy: &'a StrategyDefinition) {
        match strategy.category {
            Category::Setup => self.setup.push(strategy),
            Category::Deductions => self.deductions.push(strategy),
            Category::Exit => self.exit.push(strategy),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a StrategyDefinition> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(|category| self.get(category).iter().copied())
    }

    pub fn len(&self) -> usize {
        self.setup.len() + self.deductions.len() + self.exit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationSummary {
    pub active_strategies: usize,
    pub total_potential_savings: f64,
    pub overall_progress_percent: u32,
}
