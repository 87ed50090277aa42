use std::collections::{HashMap, HashSet};

use crate::models::{ActionRecord, PriceRange};

/// What a user's interaction history says about their interests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceProfile {
    /// Accumulated action weight per listing the user touched
    pub scores: HashMap<i64, u32>,
    /// How many actions involved each property type
    pub type_counts: HashMap<String, u32>,
    pub districts: HashSet<String>,
    pub cities: HashSet<String>,
    /// Mean price over all actions, truncated
    pub average_price: i64,
}

impl PreferenceProfile {
    pub fn price_range(&self) -> PriceRange {
        PriceRange::around(self.average_price)
    }

    /// Historical occurrence count for a property type, 0 if never seen
    pub fn type_affinity(&self, property_type: &str) -> u32 {
        self.type_counts.get(property_type).copied().unwrap_or(0)
    }
}

/// Folds a user's actions into a profile
///
/// Returns `None` for an empty history; callers take the cold-start path
/// and the average price is never computed.
pub fn aggregate(actions: &[ActionRecord]) -> Option<PreferenceProfile> {
    if actions.is_empty() {
        return None;
    }

    let mut scores: HashMap<i64, u32> = HashMap::new();
    let mut type_counts: HashMap<String, u32> = HashMap::new();
    let mut districts = HashSet::new();
    let mut cities = HashSet::new();
    let mut price_sum: i64 = 0;

    for action in actions {
        *scores.entry(action.property_id).or_insert(0) += action.action_type.weight();
        *type_counts
            .entry(action.property.property_type.clone())
            .or_insert(0) += 1;
        districts.insert(action.property.district_name.clone());
        cities.insert(action.property.city_name.clone());
        price_sum += i64::from(action.property.price);
    }

    let average_price = price_sum / actions.len() as i64;

    Some(PreferenceProfile {
        scores,
        type_counts,
        districts,
        cities,
        average_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActedProperty, ActionType};

    fn action(property_id: i64, action_type: ActionType, price: i32, kind: &str) -> ActionRecord {
        ActionRecord {
            user_id: 1,
            property_id,
            action_type,
            property: ActedProperty {
                city_name: "C".to_string(),
                district_name: format!("D{}", property_id % 2),
                price,
                property_type: kind.to_string(),
            },
        }
    }

    #[test]
    fn test_empty_history_yields_no_profile() {
        assert_eq!(aggregate(&[]), None);
    }

    #[test]
    fn test_single_view() {
        let profile = aggregate(&[action(7, ActionType::View, 10000, "APARTMENT")]).unwrap();

        assert_eq!(profile.scores.get(&7), Some(&1));
        assert_eq!(profile.type_affinity("APARTMENT"), 1);
        assert_eq!(profile.type_affinity("SUITE"), 0);
        assert_eq!(profile.average_price, 10000);
        assert_eq!(profile.price_range(), PriceRange { lower: 8000, upper: 12000 });
    }

    #[test]
    fn test_scores_sum_weights_per_property() {
        let actions = vec![
            action(1, ActionType::View, 10000, "APARTMENT"),
            action(1, ActionType::Favorite, 10000, "APARTMENT"),
            action(1, ActionType::Contact, 10000, "APARTMENT"),
            action(2, ActionType::View, 20000, "SUITE"),
            action(2, ActionType::View, 20000, "SUITE"),
            action(3, ActionType::Other, 30000, "SUITE"),
        ];

        let profile = aggregate(&actions).unwrap();

        assert_eq!(profile.scores[&1], 16);
        assert_eq!(profile.scores[&2], 2);
        // Weightless actions still register the listing
        assert_eq!(profile.scores[&3], 0);
        assert_eq!(profile.type_counts["APARTMENT"], 3);
        assert_eq!(profile.type_counts["SUITE"], 3);
    }

    #[test]
    fn test_locations_are_distinct() {
        let actions = vec![
            action(1, ActionType::View, 10000, "APARTMENT"),
            action(3, ActionType::View, 10000, "APARTMENT"),
            action(2, ActionType::View, 10000, "APARTMENT"),
        ];

        let profile = aggregate(&actions).unwrap();

        assert_eq!(profile.cities, HashSet::from(["C".to_string()]));
        assert_eq!(
            profile.districts,
            HashSet::from(["D0".to_string(), "D1".to_string()])
        );
    }

    #[test]
    fn test_average_price_truncates() {
        let actions = vec![
            action(1, ActionType::View, 10000, "APARTMENT"),
            action(2, ActionType::View, 10001, "APARTMENT"),
        ];

        let profile = aggregate(&actions).unwrap();
        assert_eq!(profile.average_price, 10000);
    }
}
