use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{PageRequest, RecommendationResult, RESULT_LIMIT},
    routes::AppState,
};

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    RESULT_LIMIT as u32
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = AppError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        if query.size == 0 || query.size > MAX_PAGE_SIZE {
            return Err(AppError::InvalidInput(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(PageRequest::new(query.page, query.size))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Handler for the per-user recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    user_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResult>> {
    let Path(user_id) = user_id?;
    let Query(query) = query?;
    let page = PageRequest::try_from(query)?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        page = page.page,
        size = page.size,
        "Processing recommendation request"
    );

    let result = state.engine.recommend(user_id, page).await?;

    tracing::info!(
        request_id = %request_id,
        items = result.items.len(),
        "Recommendation request completed"
    );

    Ok(Json(result))
}
