use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{ActionRecord, LayoutRecord, Page, PageRequest, PriceRange, PropertyRecord},
};

use super::{ActionRepository, LayoutRepository, PropertyRepository};

/// In-process store holding listings, layouts and actions
///
/// Mirrors the ordering rules of the Postgres queries so tests and local
/// runs see the same pages production would.
#[derive(Default)]
pub struct InMemoryStore {
    properties: RwLock<Vec<PropertyRecord>>,
    layouts: RwLock<HashMap<i64, LayoutRecord>>,
    actions: RwLock<Vec<ActionRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_property(&self, property: PropertyRecord) {
        let mut properties = self.properties.write().await;
        properties.retain(|p| p.id != property.id);
        properties.push(property);
    }

    pub async fn insert_layout(&self, layout: LayoutRecord) {
        let mut layouts = self.layouts.write().await;
        layouts.insert(layout.property_id, layout);
    }

    pub async fn record_action(&self, action: ActionRecord) {
        let mut actions = self.actions.write().await;
        actions.push(action);
    }

    /// Filters, sorts and slices the listings into one page
    async fn page_of<F, S>(&self, page: PageRequest, filter: F, sort: S) -> Page<PropertyRecord>
    where
        F: Fn(&PropertyRecord) -> bool,
        S: FnMut(&PropertyRecord, &PropertyRecord) -> std::cmp::Ordering,
    {
        let properties = self.properties.read().await;
        let mut matching: Vec<PropertyRecord> =
            properties.iter().filter(|p| filter(p)).cloned().collect();
        matching.sort_by(sort);

        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();

        Page::new(items, page)
    }
}

fn newest_first(a: &PropertyRecord, b: &PropertyRecord) -> std::cmp::Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

fn by_id(a: &PropertyRecord, b: &PropertyRecord) -> std::cmp::Ordering {
    a.id.cmp(&b.id)
}

#[async_trait::async_trait]
impl ActionRepository for InMemoryStore {
    async fn find_actions_by_user(&self, user_id: i64) -> AppResult<Vec<ActionRecord>> {
        let actions = self.actions.read().await;
        Ok(actions
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl PropertyRepository for InMemoryStore {
    async fn find_recent_properties(&self, page: PageRequest) -> AppResult<Page<PropertyRecord>> {
        Ok(self.page_of(page, |_| true, newest_first).await)
    }

    async fn find_candidates_by_location_and_price_range(
        &self,
        cities: &HashSet<String>,
        districts: &HashSet<String>,
        range: PriceRange,
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>> {
        let matches = |p: &PropertyRecord| {
            cities.contains(&p.city_name)
                && districts.contains(&p.district_name)
                && range.contains(p.price)
        };
        Ok(self.page_of(page, matches, by_id).await)
    }

    async fn find_properties_by_id_set(
        &self,
        ids: &[i64],
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>> {
        let ids: HashSet<i64> = ids.iter().copied().collect();
        Ok(self.page_of(page, |p| ids.contains(&p.id), by_id).await)
    }

    async fn find_properties_by_price_range_recent(
        &self,
        range: PriceRange,
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>> {
        Ok(self
            .page_of(page, |p| range.contains(p.price), newest_first)
            .await)
    }
}

#[async_trait::async_trait]
impl LayoutRepository for InMemoryStore {
    async fn find_layout_by_property(&self, property_id: i64) -> AppResult<Option<LayoutRecord>> {
        let layouts = self.layouts.read().await;
        Ok(layouts.get(&property_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn property(id: i64, city: &str, district: &str, price: i32, day: u32) -> PropertyRecord {
        PropertyRecord {
            id,
            title: format!("Listing {}", id),
            city_name: city.to_string(),
            district_name: district.to_string(),
            road_name: "Main Rd".to_string(),
            address: None,
            price,
            property_type: "APARTMENT".to_string(),
            building_type: "ELEVATOR".to_string(),
            area: 20.0,
            floor: 2,
            status: "AVAILABLE".to_string(),
            main_image: format!("img/{}.jpg", id),
            created_at: at(day),
        }
    }

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_property(property(1, "C", "D", 9000, 1)).await;
        store.insert_property(property(2, "C", "D", 15000, 3)).await;
        store.insert_property(property(3, "C", "E", 10000, 2)).await;
        store.insert_property(property(4, "X", "D", 10000, 5)).await;
        store.insert_property(property(5, "C", "D", 11000, 4)).await;
        store
    }

    fn ids(page: &Page<PropertyRecord>) -> Vec<i64> {
        page.items.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_recent_properties_newest_first() {
        let store = seeded().await;
        let page = store
            .find_recent_properties(PageRequest::first(3))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![4, 5, 2]);

        let next = store
            .find_recent_properties(PageRequest::new(1, 3))
            .await
            .unwrap();
        assert_eq!(ids(&next), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_candidates_filter_location_and_price() {
        let store = seeded().await;
        let cities = HashSet::from(["C".to_string()]);
        let districts = HashSet::from(["D".to_string()]);

        let page = store
            .find_candidates_by_location_and_price_range(
                &cities,
                &districts,
                PriceRange::around(10000),
                PageRequest::first(10),
            )
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![1, 5]);
    }

    #[tokio::test]
    async fn test_candidates_empty_page_when_nothing_matches() {
        let store = seeded().await;
        let cities = HashSet::from(["Nowhere".to_string()]);
        let districts = HashSet::from(["D".to_string()]);

        let page = store
            .find_candidates_by_location_and_price_range(
                &cities,
                &districts,
                PriceRange::around(10000),
                PageRequest::first(10),
            )
            .await
            .unwrap();

        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_id_set_skips_unknown_ids() {
        let store = seeded().await;
        let page = store
            .find_properties_by_id_set(&[5, 99, 2], PageRequest::first(10))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![2, 5]);
    }

    #[tokio::test]
    async fn test_price_range_recent() {
        let store = seeded().await;
        let page = store
            .find_properties_by_price_range_recent(PriceRange::around(10000), PageRequest::first(10))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![4, 5, 3, 1]);
    }

    #[tokio::test]
    async fn test_layout_lookup() {
        let store = seeded().await;
        store
            .insert_layout(LayoutRecord {
                property_id: 2,
                living_room_count: 1,
                bathroom_count: 1,
                balcony_count: 1,
                kitchen_count: 1,
            })
            .await;

        assert!(store.find_layout_by_property(2).await.unwrap().is_some());
        assert!(store.find_layout_by_property(1).await.unwrap().is_none());
    }
}
