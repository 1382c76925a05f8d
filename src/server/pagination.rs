pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the 1-based `page` of `items`, [`QUESTIONS_PER_PAGE`] at a time.
/// Pages before the first or past the last are empty.
pub fn paginate<T>(page: i64, items: Vec<T>) -> Vec<T> {
    if page < 1 {
        return vec![];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
        .unwrap_or(usize::MAX);
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
