use serde::{Deserialize, Serialize};

pub mod action;
pub mod property;

pub use action::{ActedProperty, ActionRecord, ActionType};
pub use property::{LayoutRecord, LayoutView, PropertyRecord, PropertyView};

/// Number of listings a recommendation response aims for
pub const RESULT_LIMIT: usize = 10;

/// Zero-based page selector passed through to the stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// First page holding `size` entries
    pub fn first(size: u32) -> Self {
        Self { page: 0, size }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(RESULT_LIMIT as u32)
    }
}

/// One page of store results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest) -> Self {
        Self { items, request }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            request,
        }
    }
}

/// Inclusive price window derived from a user's average observed price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower: i64,
    pub upper: i64,
}

impl PriceRange {
    /// Window of 80%..=120% around `average`, truncated to whole units
    ///
    /// Integer arithmetic keeps the bounds exact; prices are never negative
    /// so truncation equals floor.
    pub fn around(average: i64) -> Self {
        Self {
            lower: average * 4 / 5,
            upper: average * 6 / 5,
        }
    }

    pub fn contains(&self, price: i32) -> bool {
        let price = i64::from(price);
        price >= self.lower && price <= self.upper
    }
}

/// Response envelope for the recommendation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub status_code: u16,
    pub items: Vec<PropertyView>,
}

impl RecommendationResult {
    pub fn ok(items: Vec<PropertyView>) -> Self {
        Self {
            status_code: 200,
            items,
        }
    }
}
