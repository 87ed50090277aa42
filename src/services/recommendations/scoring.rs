use std::collections::HashMap;

use crate::models::PropertyRecord;

use super::aggregator::PreferenceProfile;

/// Flat bonus for a candidate priced inside the profile window
pub const PRICE_WINDOW_BONUS: u32 = 5;

/// Adds profile-derived bonuses for each candidate to the seeded scores
///
/// Every candidate gains its type affinity plus [`PRICE_WINDOW_BONUS`].
/// Candidates come from a query already bounded by the same window, so the
/// window bonus applies to all of them. Scores accumulate onto whatever the
/// action history seeded.
pub fn score_candidates(
    profile: &PreferenceProfile,
    candidates: &[PropertyRecord],
) -> HashMap<i64, u32> {
    let mut scores = profile.scores.clone();
    let range = profile.price_range();

    for candidate in candidates {
        debug_assert!(
            range.contains(candidate.price),
            "candidate {} priced outside the retrieval window",
            candidate.id
        );

        let bonus = profile.type_affinity(&candidate.property_type) + PRICE_WINDOW_BONUS;
        *scores.entry(candidate.id).or_insert(0) += bonus;
    }

    scores
}
