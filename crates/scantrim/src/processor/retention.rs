use std::collections::BTreeMap;

use crate::config::schema::{PageAggregation, DEFAULT_BLANK_THRESHOLD_PERCENT};

/// Keep/discard decision for a single image at the default 1% threshold.
pub fn should_keep_page(coverage_percent: f64) -> bool {
    coverage_percent >= DEFAULT_BLANK_THRESHOLD_PERCENT
}

#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    threshold_percent: f64,
    aggregation: PageAggregation,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BLANK_THRESHOLD_PERCENT, PageAggregation::default())
    }
}

impl RetentionPolicy {
    pub fn new(threshold_percent: f64, aggregation: PageAggregation) -> Self {
        Self {
            threshold_percent,
            aggregation,
        }
    }

    pub fn should_keep_page(&self, coverage_percent: f64) -> bool {
        coverage_percent >= self.threshold_percent
    }

    /// Folds one more image decision into the page's running decision.
    pub fn combine(&self, previous: Option<bool>, keep_image: bool) -> bool {
        match (self.aggregation, previous) {
            (_, None) | (PageAggregation::Last, Some(_)) => keep_image,
            (PageAggregation::All, Some(prev)) => prev && keep_image,
            (PageAggregation::Any, Some(prev)) => prev || keep_image,
        }
    }
}

/// Page number to keep/discard map. Pages without an entry are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionSet {
    pages: BTreeMap<u32, bool>,
}

impl RetentionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one image's outcome for `page`, combined per the policy.
    pub fn record(&mut self, policy: &RetentionPolicy, page: u32, keep_image: bool) -> bool {
        let decision = policy.combine(self.pages.get(&page).copied(), keep_image);
        self.pages.insert(page, decision);
        decision
    }

    pub fn get(&self, page: u32) -> Option<bool> {
        self.pages.get(&page).copied()
    }

    pub fn is_kept(&self, page: u32) -> bool {
        self.get(page).unwrap_or(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.pages.iter().map(|(page, keep)| (*page, *keep))
    }
}
