use serde::{Deserialize, Deserializer};

pub fn first_page() -> i64 {
    1
}

/// Integers too large for `i64` saturate so they still land past the last page.
fn parse_page(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(page) = value.parse::<i64>() {
        return Some(page);
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

// `?page=abc` falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .as_deref()
        .and_then(parse_page)
        .unwrap_or_else(first_page))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    fn parse(query: &str) -> PageQuery {
        let uri: Uri = format!("/questions?{query}").parse().unwrap();
        Query::<PageQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(parse("").page, 1);
        assert_eq!(parse("page=abc").page, 1);
        assert_eq!(parse("page=").page, 1);
    }

    #[test]
    fn page_is_parsed() {
        assert_eq!(parse("page=3").page, 3);
        assert_eq!(parse("page=-2").page, -2);
        assert_eq!(parse("page=+4").page, 4);
    }

    #[test]
    fn oversized_pages_saturate() {
        assert_eq!(parse("page=99999999999999999999").page, i64::MAX);
        assert_eq!(parse("page=-99999999999999999999").page, i64::MIN);
        assert_eq!(parse("page=9999999999999999999x").page, 1);
    }
}
