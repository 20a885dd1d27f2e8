use super::types::{Category, Complexity, IncomeType, StrategyDefinition};

pub const CCORP_MSO_ID: &str = "ccorp_mso";
pub const REPS_QUALIFICATION_ID: &str = "reps_qualification";
pub const DEFINED_BENEFIT_ID: &str = "defined_benefit";

pub static CATALOG: [StrategyDefinition; 10] = [
    StrategyDefinition {
        id: "scorp",
        title: "S-Corp Election",
        description: "Reduce self-employment tax through entity optimization",
        complexity: Complexity::Beginner,
        applicable_income_types: &[IncomeType::Business, IncomeType::SelfEmployed],
        min_income: 50_000.0,
        max_savings: 15_000.0,
        category: Category::Setup,
        glossary_term: "S-Corp Election",
        module_link: "Business Module 1: Entity Structuring",
        implementation_steps: &[
            "File Form 2553 with IRS",
            "Set reasonable salary for owner",
            "Establish separate business checking account",
            "Update bookkeeping for payroll",
        ],
    },
    StrategyDefinition {
        id: CCORP_MSO_ID,
        title: "C-Corp MSO Structure",
        description: "Capture income at 21% corporate rate vs 37%+ personal rates",
        complexity: Complexity::Advanced,
        applicable_income_types: &[IncomeType::Business, IncomeType::Mixed],
        min_income: 500_000.0,
        max_savings: 80_000.0,
        category: Category::Setup,
        glossary_term: "MSO (Management Services Organization)",
        module_link: "Business Module 1: Entity Structuring",
        implementation_steps: &[
            "Form C-Corporation",
            "Establish management services agreement",
            "Implement proper transfer pricing",
            "Set up corporate benefits package",
        ],
    },
    StrategyDefinition {
        id: "asset_protection_trust",
        title: "Asset Protection Trust",
        description: "Protect wealth from creditors while maintaining control",
        complexity: Complexity::Advanced,
        applicable_income_types: &[IncomeType::Business, IncomeType::Investor, IncomeType::Mixed],
        min_income: 1_000_000.0,
        max_savings: 0.0,
        category: Category::Setup,
        glossary_term: "Asset Protection Trust",
        module_link: "Business Module 7: Asset Protection",
        implementation_steps: &[
            "Select appropriate trust jurisdiction",
            "Draft trust documents with attorney",
            "Transfer assets to trust",
            "Maintain proper trust administration",
        ],
    },
    StrategyDefinition {
        id: DEFINED_BENEFIT_ID,
        title: "Defined Benefit Plan",
        description: "Maximize retirement contributions up to $330K annually",
        complexity: Complexity::Advanced,
        applicable_income_types: &[IncomeType::Business, IncomeType::SelfEmployed],
        min_income: 200_000.0,
        max_savings: 100_000.0,
        category: Category::Deductions,
        glossary_term: "Defined Benefit Plan",
        module_link: "Business Module 3: Strategic Deductions",
        implementation_steps: &[
            "Hire actuarial consultant",
            "Design plan based on income projections",
            "File required IRS documents",
            "Make annual contributions",
        ],
    },
    StrategyDefinition {
        id: "qof",
        title: "Qualified Opportunity Fund",
        description: "Defer and reduce capital gains through QOF investment",
        complexity: Complexity::Intermediate,
        applicable_income_types: &[IncomeType::Investor, IncomeType::Business, IncomeType::Mixed],
        min_income: 100_000.0,
        max_savings: 50_000.0,
        category: Category::Deductions,
        glossary_term: "QOF (Qualified Opportunity Fund)",
        module_link: "W-2 Module 2: Income & Timing",
        implementation_steps: &[
            "Identify qualifying capital gains",
            "Select appropriate QOF investment",
            "Complete investment within 180 days",
            "Hold investment for 10+ years",
        ],
    },
    StrategyDefinition {
        id: "cost_segregation",
        title: "Cost Segregation Study",
        description: "Accelerate depreciation on real estate investments",
        complexity: Complexity::Intermediate,
        applicable_income_types: &[IncomeType::Investor, IncomeType::Business],
        min_income: 150_000.0,
        max_savings: 75_000.0,
        category: Category::Deductions,
        glossary_term: "Cost Segregation (Cost Seg)",
        module_link: "W-2 Module 6: Short-Term Rentals",
        implementation_steps: &[
            "Hire qualified cost segregation engineer",
            "Complete property component analysis",
            "File Form 3115 for accounting method change",
            "Claim accelerated depreciation",
        ],
    },
    StrategyDefinition {
        id: "oil_gas_investment",
        title: "Oil & Gas IDC Strategy",
        description: "Immediate 100% deduction through Intangible Drilling Costs",
        complexity: Complexity::Advanced,
        applicable_income_types: &[IncomeType::W2, IncomeType::Business, IncomeType::Investor],
        min_income: 500_000.0,
        max_savings: 100_000.0,
        category: Category::Deductions,
        glossary_term: "IDC (Intangible Drilling Costs)",
        module_link: "W-2 Module 7: Oil & Gas Deductions",
        implementation_steps: &[
            "Research qualified drilling programs",
            "Complete investor qualification",
            "Review geological and financial projections",
            "Execute investment and claim deduction",
        ],
    },
    StrategyDefinition {
        id: REPS_QUALIFICATION_ID,
        title: "Real Estate Professional Status",
        description: "Unlock unlimited passive loss deductions",
        complexity: Complexity::Intermediate,
        applicable_income_types: &[IncomeType::W2, IncomeType::Business],
        min_income: 100_000.0,
        max_savings: 60_000.0,
        category: Category::Deductions,
        glossary_term: "REPS (Real Estate Professional Status)",
        module_link: "W-2 Module 4: Qualifying for REPS",
        implementation_steps: &[
            "Meet 750-hour annual requirement",
            "Document material participation",
            "Maintain detailed time logs",
            "File appropriate tax elections",
        ],
    },
    StrategyDefinition {
        id: "qsbs",
        title: "QSBS Qualification",
        description: "Exclude up to $10M+ in capital gains at business exit",
        complexity: Complexity::Advanced,
        applicable_income_types: &[IncomeType::Business],
        min_income: 200_000.0,
        max_savings: 2_000_000.0,
        category: Category::Exit,
        glossary_term: "QSBS (Qualified Small Business Stock)",
        module_link: "Business Module 3: Long-Term Wealth Creation",
        implementation_steps: &[
            "Ensure C-Corp qualification",
            "Maintain active business operations",
            "Hold stock for minimum 5 years",
            "Plan exit strategy timing",
        ],
    },
    StrategyDefinition {
        id: "installment_sale",
        title: "Installment Sale Strategy",
        description: "Spread capital gains over multiple years to reduce tax rates",
        complexity: Complexity::Intermediate,
        applicable_income_types: &[IncomeType::Business, IncomeType::Investor],
        min_income: 300_000.0,
        max_savings: 150_000.0,
        category: Category::Exit,
        glossary_term: "Installment Sale",
        module_link: "Business Module 8: The Exit Plan",
        implementation_steps: &[
            "Structure sale with payment terms",
            "Elect installment treatment",
            "Plan annual recognition amounts",
            "Coordinate with other income",
        ],
    },
];

pub fn find_strategy<'a>(
    catalog: &'a [StrategyDefinition],
    id: &str,
) -> Option<&'a StrategyDefinition> {
    catalog.iter().find(|strategy| strategy.id == id)
}
