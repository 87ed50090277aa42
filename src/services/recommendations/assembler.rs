use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{
    error::{AppError, AppResult},
    models::{PropertyRecord, PropertyView, RecommendationResult},
    repositories::LayoutRepository,
};

/// Builds the response for an ordered list of listings
///
/// Layouts are looked up concurrently, one task per listing; the response
/// keeps the input order. A listing without a layout is rendered without
/// one. The first failed lookup fails the whole assembly and aborts the
/// lookups still in flight, as does dropping the returned future.
pub async fn assemble(
    layouts: Arc<dyn LayoutRepository>,
    properties: Vec<PropertyRecord>,
) -> AppResult<RecommendationResult> {
    let mut slots: Vec<Option<PropertyView>> = properties.iter().map(|_| None).collect();
    let mut tasks = JoinSet::new();

    for (index, property) in properties.into_iter().enumerate() {
        let layouts = Arc::clone(&layouts);
        tasks.spawn(async move {
            let layout = layouts.find_layout_by_property(property.id).await?;
            Ok::<_, AppError>((index, PropertyView::new(property, layout)))
        });
    }

    // Returning early drops the set, which aborts the remaining tasks
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok((index, view))) => slots[index] = Some(view),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Layout lookup failed");
                return Err(e);
            }
            Err(e) => {
                tracing::error!(error = %e, "Layout task join error");
                return Err(AppError::Internal(e.to_string()));
            }
        }
    }

    Ok(RecommendationResult::ok(slots.into_iter().flatten().collect()))
}
