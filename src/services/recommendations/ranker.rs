use std::collections::{HashMap, HashSet};

use crate::{
    error::AppResult,
    models::{PageRequest, PriceRange, PropertyRecord, RESULT_LIMIT},
    repositories::PropertyRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub property_id: i64,
    pub score: u32,
}

/// Orders scores highest first, ties broken by ascending property id
pub fn rank(scores: &HashMap<i64, u32>) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = scores
        .iter()
        .map(|(&property_id, &score)| ScoredCandidate { property_id, score })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.property_id.cmp(&b.property_id))
    });

    ranked
}

/// Turns a ranking into at most [`RESULT_LIMIT`] distinct listings
pub struct Ranker<'a> {
    properties: &'a dyn PropertyRepository,
}

impl<'a> Ranker<'a> {
    pub fn new(properties: &'a dyn PropertyRepository) -> Self {
        Self { properties }
    }

    /// Resolves the top-ranked ids, then backfills from the newest listings
    /// in `range` until the list is full or the store runs dry
    pub async fn select(
        &self,
        ranked: &[ScoredCandidate],
        range: PriceRange,
    ) -> AppResult<Vec<PropertyRecord>> {
        let mut seen = HashSet::new();
        let mut selected = self.resolve_top(ranked, &mut seen).await?;
        let resolved = selected.len();

        if selected.len() < RESULT_LIMIT {
            // A full page always suffices: at most `selected.len()` of its entries repeat
            let recent = self
                .properties
                .find_properties_by_price_range_recent(range, PageRequest::first(RESULT_LIMIT as u32))
                .await?;

            for property in recent.items {
                if selected.len() == RESULT_LIMIT {
                    break;
                }
                if seen.insert(property.id) {
                    selected.push(property);
                }
            }
        }

        tracing::debug!(
            ranked = ranked.len(),
            resolved,
            backfilled = selected.len() - resolved,
            "Selected recommendations"
        );

        Ok(selected)
    }

    /// Fetches the top-ranked listings and puts them back in rank order
    ///
    /// Ids the store no longer knows are skipped.
    async fn resolve_top(
        &self,
        ranked: &[ScoredCandidate],
        seen: &mut HashSet<i64>,
    ) -> AppResult<Vec<PropertyRecord>> {
        let top_ids: Vec<i64> = ranked
            .iter()
            .take(RESULT_LIMIT)
            .map(|c| c.property_id)
            .collect();

        if top_ids.is_empty() {
            return Ok(Vec::new());
        }

        let page = self
            .properties
            .find_properties_by_id_set(&top_ids, PageRequest::first(RESULT_LIMIT as u32))
            .await?;

        let mut by_id: HashMap<i64, PropertyRecord> =
            page.items.into_iter().map(|p| (p.id, p)).collect();

        let ordered = top_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .filter(|p| seen.insert(p.id))
            .collect();

        Ok(ordered)
    }
}
