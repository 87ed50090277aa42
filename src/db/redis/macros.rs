/// Read-through caching against a [`Cache`](crate::db::Cache).
///
/// Returns the cached value when present. Otherwise awaits `$block`, queues
/// the result for a background write with the given TTL (seconds) and
/// returns it. A failed cache read is logged and treated as a miss. Intended as the tail expression of a function returning
/// `AppResult`.
///
/// # Example
/// ```rust,ignore
/// async fn layout(&self, id: i64) -> AppResult<Option<LayoutRecord>> {
///     cached!(self.cache, CacheKey::Layout(id), 3600, async move {
///         self.load_layout(id).await
///     })
/// }
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.get_from_cache(&$key).await {
            Ok(Some(cached)) => Ok(cached),
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(error = %e, key = %$key, "Cache read failed, loading from source");
                }
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
