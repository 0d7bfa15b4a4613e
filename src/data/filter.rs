use std::collections::BTreeSet;

use super::model::{Dataset, Point};

// ---------------------------------------------------------------------------
// Filter criteria: category inclusion + name search
// ---------------------------------------------------------------------------

/// Current filter selections, rebuilt from the controls on every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// A point is visible only if its category is in this set.
    /// An empty set hides everything.
    pub allowed_categories: BTreeSet<String>,
    /// Case-insensitive substring matched against the point name.
    /// Empty (after trimming) matches every name.
    pub name_query: String,
}

impl FilterCriteria {
    /// Criteria that let every point of `dataset` through.
    pub fn allow_all(dataset: &Dataset) -> Self {
        FilterCriteria {
            allowed_categories: dataset.categories(),
            name_query: String::new(),
        }
    }

    /// Whether a single point passes both predicates.
    pub fn matches(&self, point: &Point) -> bool {
        if !self.allowed_categories.contains(&point.category) {
            return false;
        }
        let query = self.name_query.trim();
        query.is_empty() || point.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Return the visible subset of `dataset`, preserving order.
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    dataset
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}
