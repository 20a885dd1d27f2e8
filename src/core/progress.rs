use std::collections::BTreeMap;

use super::catalog::find_strategy;
use super::types::{ImplementationSummary, StrategyDefinition};

pub const STEP_PERCENT: u32 = 25;
pub const COMPLETE_PERCENT: u32 = 100;

/// Percent complete per strategy id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplementationProgress {
    entries: BTreeMap<String, u32>,
}

impl ImplementationProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from caller-held state, clamping each entry into 0..=100.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, percent)| (id, percent.min(COMPLETE_PERCENT)))
                .collect(),
        }
    }

    pub fn percent(&self, id: &str) -> u32 {
        self.entries.get(id).copied().unwrap_or(0)
    }

    /// Marks one more implementation step done and returns the new percentage.
    pub fn complete_step(&mut self, id: &str) -> u32 {
        let entry = self.entries.entry(id.to_string()).or_insert(0);
        *entry = (*entry + STEP_PERCENT).min(COMPLETE_PERCENT);
        *entry
    }

    /// Rounded mean over tracked entries; zero when nothing is tracked.
    pub fn overall_percent(&self) -> u32 {
        if self.entries.is_empty() {
            return 0;
        }
        let total: u32 = self.entries.values().sum();
        (f64::from(total) / self.entries.len() as f64).round() as u32
    }

    pub fn entries(&self) -> &BTreeMap<String, u32> {
        &self.entries
    }
}

pub fn summarize(
    catalog: &[StrategyDefinition],
    selected_ids: &[String],
    progress: &ImplementationProgress,
) -> ImplementationSummary {
    let mut seen: Vec<&str> = Vec::with_capacity(selected_ids.len());
    for id in selected_ids {
        if !seen.contains(&id.as_str()) {
            seen.push(id);
        }
    }

    let total_potential_savings = seen
        .iter()
        .filter_map(|id| find_strategy(catalog, id))
        .map(|strategy| strategy.max_savings)
        .sum();

    ImplementationSummary {
        active_strategies: seen.len(),
        total_potential_savings,
        overall_progress_percent: progress.overall_percent(),
    }
}
