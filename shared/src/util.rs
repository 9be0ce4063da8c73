/// Clamp client-supplied pagination to sane bounds.
///
/// Returns `(skip, limit)` with `limit` in `1..=max_limit`.
pub fn page_bounds(
    skip: Option<i64>,
    limit: Option<i64>,
    default_limit: i64,
    max_limit: i64,
) -> (i64, i64) {
    let skip = skip.unwrap_or(0).max(0);
    let limit = limit.unwrap_or(default_limit).clamp(1, max_limit);
    (skip, limit)
}
