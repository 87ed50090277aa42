//! Read-only data access used by the recommendation engine
//!
//! Each store is a trait so the engine can run against Postgres in
//! production and against in-memory fixtures in tests. All operations are
//! plain reads; failures surface as `AppError` and are never retried here.

use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{ActionRecord, LayoutRecord, Page, PageRequest, PriceRange, PropertyRecord},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// Source of recorded user interactions
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ActionRepository: Send + Sync {
    /// All actions the user has taken, each joined with the acted-upon listing
    async fn find_actions_by_user(&self, user_id: i64) -> AppResult<Vec<ActionRecord>>;
}

/// Source of listings
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Listings ordered by creation time, newest first
    async fn find_recent_properties(&self, page: PageRequest) -> AppResult<Page<PropertyRecord>>;

    /// Listings located in one of `cities` and one of `districts`, priced inside `range`
    async fn find_candidates_by_location_and_price_range(
        &self,
        cities: &HashSet<String>,
        districts: &HashSet<String>,
        range: PriceRange,
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>>;

    /// Listings whose id is in `ids`, in no particular order
    async fn find_properties_by_id_set(
        &self,
        ids: &[i64],
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>>;

    /// Listings priced inside `range`, newest first
    async fn find_properties_by_price_range_recent(
        &self,
        range: PriceRange,
        page: PageRequest,
    ) -> AppResult<Page<PropertyRecord>>;
}

/// Source of listing layouts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LayoutRepository: Send + Sync {
    async fn find_layout_by_property(&self, property_id: i64) -> AppResult<Option<LayoutRecord>>;
}
