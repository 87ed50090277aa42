use crate::{
    error::AppResult,
    models::{Page, PageRequest, PropertyRecord},
    repositories::PropertyRepository,
};

use super::aggregator::PreferenceProfile;

/// Fetches one page of listings in the user's cities and districts, priced
/// inside the profile's window
///
/// Only the requested page is examined. An empty page is a valid outcome.
pub async fn retrieve_candidates(
    properties: &dyn PropertyRepository,
    profile: &PreferenceProfile,
    page: PageRequest,
) -> AppResult<Page<PropertyRecord>> {
    let range = profile.price_range();

    let candidates = properties
        .find_candidates_by_location_and_price_range(
            &profile.cities,
            &profile.districts,
            range,
            page,
        )
        .await?;

    tracing::debug!(
        cities = profile.cities.len(),
        districts = profile.districts.len(),
        lower = range.lower,
        upper = range.upper,
        page = page.page,
        candidates = candidates.items.len(),
        "Retrieved candidate page"
    );

    Ok(candidates)
}
