use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Kind of interaction a user had with a listing
///
/// Closed set: anything the action store records that is not one of the
/// known kinds collapses to `Other` and carries no weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    View,
    Favorite,
    Contact,
    #[serde(other)]
    Other,
}

impl ActionType {
    /// Score contributed by a single action of this kind
    pub const fn weight(self) -> u32 {
        match self {
            ActionType::View => 1,
            ActionType::Favorite => 5,
            ActionType::Contact => 10,
            ActionType::Other => 0,
        }
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        match value {
            "VIEW" => ActionType::View,
            "FAVORITE" => ActionType::Favorite,
            "CONTACT" => ActionType::Contact,
            _ => ActionType::Other,
        }
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::View => write!(f, "VIEW"),
            ActionType::Favorite => write!(f, "FAVORITE"),
            ActionType::Contact => write!(f, "CONTACT"),
            ActionType::Other => write!(f, "OTHER"),
        }
    }
}

/// Attributes of the acted-upon listing, captured alongside the action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActedProperty {
    pub city_name: String,
    pub district_name: String,
    pub price: i32,
    pub property_type: String,
}

/// A single recorded interaction between a user and a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub user_id: i64,
    pub property_id: i64,
    pub action_type: ActionType,
    pub property: ActedProperty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_table() {
        assert_eq!(ActionType::View.weight(), 1);
        assert_eq!(ActionType::Favorite.weight(), 5);
        assert_eq!(ActionType::Contact.weight(), 10);
        assert_eq!(ActionType::Other.weight(), 0);
    }

    #[test]
    fn test_parse_known_action_types() {
        assert_eq!(ActionType::from("VIEW"), ActionType::View);
        assert_eq!(ActionType::from("FAVORITE"), ActionType::Favorite);
        assert_eq!(ActionType::from("CONTACT"), ActionType::Contact);
    }

    #[test]
    fn test_unknown_action_type_is_weightless() {
        let action = ActionType::from("SHARE");
        assert_eq!(action, ActionType::Other);
        assert_eq!(action.weight(), 0);

        // Case matters: the action store writes upper-case tags
        assert_eq!(ActionType::from("view"), ActionType::Other);
    }

    #[test]
    fn test_action_type_serde() {
        let json = serde_json::to_string(&ActionType::Favorite).unwrap();
        assert_eq!(json, r#""FAVORITE""#);

        let parsed: ActionType = serde_json::from_str(r#""REPORT""#).unwrap();
        assert_eq!(parsed, ActionType::Other);
    }
}
