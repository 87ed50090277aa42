use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A listing as read from the property store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyRecord {
    pub id: i64,
    pub title: String,
    pub city_name: String,
    pub district_name: String,
    pub road_name: String,
    pub address: Option<String>,
    pub price: i32,
    pub property_type: String,
    pub building_type: String,
    pub area: f64,
    pub floor: i32,
    pub status: String,
    pub main_image: String,
    pub created_at: NaiveDateTime,
}

/// Room breakdown of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LayoutRecord {
    pub property_id: i64,
    pub living_room_count: i32,
    pub bathroom_count: i32,
    pub balcony_count: i32,
    pub kitchen_count: i32,
}

/// Layout as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutView {
    pub living_room_count: i32,
    pub bathroom_count: i32,
    pub balcony_count: i32,
    pub kitchen_count: i32,
}

impl From<LayoutRecord> for LayoutView {
    fn from(layout: LayoutRecord) -> Self {
        Self {
            living_room_count: layout.living_room_count,
            bathroom_count: layout.bathroom_count,
            balcony_count: layout.balcony_count,
            kitchen_count: layout.kitchen_count,
        }
    }
}

/// Listing as exposed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub id: i64,
    pub title: String,
    pub city_name: String,
    pub district_name: String,
    pub road_name: String,
    pub address: Option<String>,
    pub price: i32,
    pub property_type: String,
    pub building_type: String,
    pub area: f64,
    pub floor: i32,
    pub status: String,
    pub main_image: String,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_layout: Option<LayoutView>,
}

impl PropertyView {
    pub fn new(property: PropertyRecord, layout: Option<LayoutRecord>) -> Self {
        Self {
            id: property.id,
            title: property.title,
            city_name: property.city_name,
            district_name: property.district_name,
            road_name: property.road_name,
            address: property.address,
            price: property.price,
            property_type: property.property_type,
            building_type: property.building_type,
            area: property.area,
            floor: property.floor,
            status: property.status,
            main_image: property.main_image,
            created_at: property.created_at,
            property_layout: layout.map(LayoutView::from),
        }
    }
}
