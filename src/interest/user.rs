use std::collections::{BTreeSet, HashMap};

use crate::graph::{Node, TimeSpan};

use super::weights::UserWeights;
use super::{DateRange, DoiParams};

/// Relevance of an empty query: neutral, nothing has been filtered yet.
pub const NEUTRAL_SEARCH_RELEVANCE: f32 = 0.5;

pub fn search_relevance(name: &str, lowered_query: &str) -> f32 {
    if lowered_query.is_empty() {
        NEUTRAL_SEARCH_RELEVANCE
    } else if name.to_lowercase().contains(lowered_query) {
        1.0
    } else {
        0.0
    }
}

pub fn archetype_relevance(group: u32, selected: &BTreeSet<u32>) -> f32 {
    if selected.contains(&group) { 1.0 } else { 0.0 }
}

/// Nodes without any timestamp are treated as dated at the epoch.
pub const UNDATED_SPAN: TimeSpan = TimeSpan { begin: 0, end: 0 };

pub fn date_relevance(timespan: Option<TimeSpan>, range: DateRange) -> f32 {
    if range.contains_span(timespan.unwrap_or(UNDATED_SPAN)) {
        1.0
    } else {
        0.0
    }
}

pub(super) fn user_interest(
    node: &Node,
    lowered_query: &str,
    params: &DoiParams,
    weights: UserWeights,
) -> f32 {
    search_relevance(&node.name, lowered_query) * weights.search
        + archetype_relevance(node.group, &params.selected_archetypes) * weights.archetype
        + date_relevance(node.timespan, params.date_range) * weights.date
}

/// The filter tuple a user-interest cache was computed for.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FilterKey {
    query: String,
    archetypes: BTreeSet<u32>,
    date_range: DateRange,
}

impl FilterKey {
    fn of(params: &DoiParams) -> Self {
        Self {
            query: params.search_query.clone(),
            archetypes: params.selected_archetypes.clone(),
            date_range: params.date_range,
        }
    }

    fn matches(&self, params: &DoiParams) -> bool {
        self.query == params.search_query
            && self.archetypes == params.selected_archetypes
            && self.date_range == params.date_range
    }
}

pub(super) struct UserInterestCache {
    key: FilterKey,
    lowered_query: String,
    by_id: HashMap<String, f32>,
}

impl UserInterestCache {
    pub(super) fn new(params: &DoiParams) -> Self {
        Self {
            key: FilterKey::of(params),
            lowered_query: params.search_query.to_lowercase(),
            by_id: HashMap::new(),
        }
    }

    pub(super) fn matches(&self, params: &DoiParams) -> bool {
        self.key.matches(params)
    }

    pub(super) fn get_or_compute(
        &mut self,
        node: &Node,
        params: &DoiParams,
        weights: UserWeights,
    ) -> f32 {
        if let Some(&value) = self.by_id.get(&node.id) {
            return value;
        }
        let value = user_interest(node, &self.lowered_query, params, weights);
        self.by_id.insert(node.id.clone(), value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive_substring() {
        assert_eq!(search_relevance("Charles Babbage", "babb"), 1.0);
        assert_eq!(search_relevance("Charles Babbage", "lovelace"), 0.0);
        assert_eq!(search_relevance("anything", ""), 0.5);
    }

    #[test]
    fn date_requires_span_inside_range() {
        let range = DateRange { min: 10, max: 20 };
        assert_eq!(date_relevance(Some(TimeSpan { begin: 10, end: 20 }), range), 1.0);
        assert_eq!(date_relevance(Some(TimeSpan { begin: 15, end: 15 }), range), 1.0);
        assert_eq!(date_relevance(Some(TimeSpan { begin: 5, end: 15 }), range), 0.0);
        assert_eq!(date_relevance(Some(TimeSpan { begin: 15, end: 25 }), range), 0.0);
        assert_eq!(date_relevance(None, range), 0.0);
    }

    #[test]
    fn undated_node_sits_at_epoch() {
        assert_eq!(date_relevance(None, DateRange { min: -10, max: 10 }), 1.0);
        assert_eq!(date_relevance(None, DateRange { min: 1, max: 10 }), 0.0);
    }

    #[test]
    fn key_compares_set_contents() {
        let mut params = DoiParams::new(DateRange { min: 0, max: 1 });
        params.selected_archetypes = [2, 1].into_iter().collect();
        let cache = UserInterestCache::new(&params);

        let mut same = params.clone();
        same.selected_archetypes = [1, 2].into_iter().collect();
        assert!(cache.matches(&same));

        let mut changed = params.clone();
        changed.selected_archetypes.insert(3);
        assert!(!cache.matches(&changed));

        let mut focused = params.clone();
        focused.focus = Some("a".to_owned());
        assert!(cache.matches(&focused));
    }
}
