use std::collections::HashSet;

use sqlx::PgPool;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::AppResult,
    models::{
        ActedProperty, ActionRecord, ActionType, LayoutRecord, Page, PageRequest, PriceRange,
        PropertyRecord,
    },
};

use super::{ActionRepository, LayoutRepository, PropertyRepository};

/// Column list shared by every listing query; joins resolve location names
const PROPERTY_SELECT: &str = r#"
    SELECT p.id, p.title, c.city_name, d.district_name, r.road_name, p.address,
           p.price, p.property_type, p.building_type, p.area::float8 AS area,
           p.floor, p.status, p.main_image, p.created_at
    FROM property p
    JOIN city c ON c.id = p.city_id
    JOIN district d ON d.id = p.district_id
    JOIN road r ON r.id = p.road_id
"#;

#[derive(sqlx::FromRow)]
struct ActionRow {
    user_id: i64,
    property_id: i64,
    action_type: String,
    city_name: String,
    district_name: String,
    price: i32,
    property_type: String,
}

impl From<ActionRow> for ActionRecord {
    fn from(row: ActionRow) -> Self {
        ActionRecord {
            user_id: row.user_id,
            property_id: row.property_id,
            action_type: ActionType::from(row.action_type.as_str()),
            property: ActedProperty {
                city_name: row.city_name,
                district_name: row.district_name,
                price: row.price,
                property_type: row.property_type,
            },
        }
    }
}

/// Postgres-backed implementation of every store the engine reads from
///
/// Layout lookups go through Redis when a cache is configured.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    layout_cache: Option<(Cache, u64)>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            layout_cache: None,
        }
    }

    /// Enables read-through caching of layouts with the given TTL in seconds
    pub fn with_layout_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.layout_cache = Some((cache, ttl));
        self
    }

    async fn load_layout(&self, property_id: i64) -> AppResult<Option<LayoutRecord>> {
        let layout = sqlx::query_as::<_, LayoutRecord>(
            r#"
            SELECT property_id, living_room_count, bathroom_count, balcony_count, kitchen_count
            FROM property_layout
            WHERE property_id = $1
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(layout)
    }
}

fn limit_offset(page: PageRequest) -> (i64, i64) {
    (i64::from(page.size), page.offset() as i64)
}

#[async_trait::async_trait]
impl ActionRepository for PgStore {
    async fn find_actions_by_user(&self, user_id: i64) -> AppResult<Vec<ActionRecord>> {
        let rows = sqlx::query_as::<_, ActionRow>(
            r#"
            SELECT a.user_id, a.property_id, a.action_type,
                   c.city_name, d.district_name, p.price, p.property_type
            FROM user_action a
            JOIN property p ON p.id = a.property_id
            JOIN city c ON c.id = p.city_id
            JOIN district d ON d.id = p.district_id
            WHERE a.user_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ActionRecord::from).collect())
    }
}

#[async_trait::async_trait]
impl PropertyRepository for PgStore {
    async fn find_recent_properties(&self, page: PageRequest) -> AppResult<Page<PropertyRecord>> {
        let sql = format!(
            "{PROPERTY_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT $1 OFFSET $2"
        );
        let (limit, offset) = limit_offset(page);

        let items = sqlx::query_as::<_, PropertyRecord>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page))
    }

    async fn find_candidates_by_location_and_price_range(
        &self,
        cities: &HashSet<String>,
        districts: &HashSet<String>,
        range: PriceRange,
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>> {
        let sql = format!(
            "{PROPERTY_SELECT} \
             WHERE c.city_name = ANY($1) AND d.district_name = ANY($2) \
               AND p.price BETWEEN $3 AND $4 \
             ORDER BY p.id LIMIT $5 OFFSET $6"
        );
        let cities: Vec<String> = cities.iter().cloned().collect();
        let districts: Vec<String> = districts.iter().cloned().collect();
        let (limit, offset) = limit_offset(page);

        let items = sqlx::query_as::<_, PropertyRecord>(&sql)
            .bind(cities)
            .bind(districts)
            .bind(range.lower)
            .bind(range.upper)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page))
    }

    async fn find_properties_by_id_set(
        &self,
        ids: &[i64],
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>> {
        if ids.is_empty() {
            return Ok(Page::empty(page));
        }

        let sql = format!("{PROPERTY_SELECT} WHERE p.id = ANY($1) ORDER BY p.id LIMIT $2 OFFSET $3");
        let (limit, offset) = limit_offset(page);

        let items = sqlx::query_as::<_, PropertyRecord>(&sql)
            .bind(ids.to_vec())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page))
    }

    async fn find_properties_by_price_range_recent(
        &self,
        range: PriceRange,
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>> {
        let sql = format!(
            "{PROPERTY_SELECT} WHERE p.price BETWEEN $1 AND $2 \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $3 OFFSET $4"
        );
        let (limit, offset) = limit_offset(page);

        let items = sqlx::query_as::<_, PropertyRecord>(&sql)
            .bind(range.lower)
            .bind(range.upper)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page))
    }
}

#[async_trait::async_trait]
impl LayoutRepository for PgStore {
    async fn find_layout_by_property(&self, property_id: i64) -> AppResult<Option<LayoutRecord>> {
        match &self.layout_cache {
            Some((cache, ttl)) => {
                cached!(cache, CacheKey::Layout(property_id), *ttl, async move {
                    self.load_layout(property_id).await
                })
            }
            None => self.load_layout(property_id).await,
        }
    }
}
