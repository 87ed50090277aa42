//! Personalized listing recommendations
//!
//! A request folds the user's action history into a [`PreferenceProfile`],
//! pulls a page of listings matching the profile's locations and price
//! window, scores and ranks them, backfills short lists with recent
//! listings in the same window, and renders the result. Users without any
//! history get the newest listings instead.
//!
//! Everything computed here lives for one request only.

use std::sync::Arc;

use tracing::instrument;

use crate::{
    error::AppResult,
    models::{PageRequest, RecommendationResult, RESULT_LIMIT},
    repositories::{ActionRepository, LayoutRepository, PropertyRepository},
};

pub mod aggregator;
pub mod assembler;
pub mod ranker;
pub mod retriever;
pub mod scoring;

pub use aggregator::{aggregate, PreferenceProfile};
pub use ranker::{rank, Ranker, ScoredCandidate};

/// Entry point wiring the recommendation stages to their data stores
#[derive(Clone)]
pub struct RecommendationEngine {
    actions: Arc<dyn ActionRepository>,
    properties: Arc<dyn PropertyRepository>,
    layouts: Arc<dyn LayoutRepository>,
}

impl RecommendationEngine {
    pub fn new(
        actions: Arc<dyn ActionRepository>,
        properties: Arc<dyn PropertyRepository>,
        layouts: Arc<dyn LayoutRepository>,
    ) -> Self {
        Self {
            actions,
            properties,
            layouts,
        }
    }

    /// Builds an engine reading every store from a single backend
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: ActionRepository + PropertyRepository + LayoutRepository + 'static,
    {
        Self {
            actions: store.clone(),
            properties: store.clone(),
            layouts: store,
        }
    }

    /// Recommends up to [`RESULT_LIMIT`] distinct listings for `user_id`
    ///
    /// `page` selects which page of location/price candidates is scored.
    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<RecommendationResult> {
        let actions = self.actions.find_actions_by_user(user_id).await?;

        let Some(profile) = aggregate(&actions) else {
            tracing::info!("No recorded actions, serving newest listings");
            return self.cold_start().await;
        };

        let range = profile.price_range();
        tracing::info!(
            actions = actions.len(),
            average_price = profile.average_price,
            lower = range.lower,
            upper = range.upper,
            "Built preference profile"
        );

        let candidates =
            retriever::retrieve_candidates(self.properties.as_ref(), &profile, page).await?;
        let scores = scoring::score_candidates(&profile, &candidates.items);
        let ranked = rank(&scores);
        let selected = Ranker::new(self.properties.as_ref())
            .select(&ranked, range)
            .await?;

        tracing::info!(
            candidates = candidates.items.len(),
            scored = ranked.len(),
            returned = selected.len(),
            "Recommendations ranked"
        );

        assembler::assemble(self.layouts.clone(), selected).await
    }

    async fn cold_start(&self) -> AppResult<RecommendationResult> {
        let newest = self
            .properties
            .find_recent_properties(PageRequest::first(RESULT_LIMIT as u32))
            .await?;

        assembler::assemble(self.layouts.clone(), newest.items).await
    }
}
