use std::collections::HashMap;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 1000;
const FILTER_PREFIX: &str = "filter_";

/// Raw list query string: `limit`, `offset` and `filter_*` parameters.
#[derive(Debug, Default)]
pub struct Query {
    filters: HashMap<String, String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryNormalized {
    pub filters: HashMap<String, String>,
    limit: i64,
    offset: i64,
}

impl QueryNormalized {
    pub fn limit(&self) -> i64 {
        self.limit
    }
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Query {
    pub fn from_params(params: HashMap<String, String>) -> Self {
        let mut q = Query::default();
        for (name, value) in params {
            if let Some(filter) = strip_filter_prefix(&name) {
                q.filters.insert(filter.to_string(), value);
            } else if name == "limit" {
                q.limit = value.trim().parse().ok();
            } else if name == "offset" {
                q.offset = value.trim().parse().ok();
            }
        }
        q
    }

    pub fn normalize(self) -> QueryNormalized {
        QueryNormalized {
            filters: self.filters,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

/// Matches the prefix case-insensitively and keeps the filter name as sent.
fn strip_filter_prefix(name: &str) -> Option<&str> {
    name.get(..FILTER_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(FILTER_PREFIX))
        .map(|_| &name[FILTER_PREFIX.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let q = Query::from_params(HashMap::new()).normalize();
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), 0);
        assert!(q.filters.is_empty());
    }

    #[test]
    fn filters_are_stripped_of_prefix() {
        let q = Query::from_params(params(&[
            ("filter_transaction_date", "2025-01-06"),
            ("sort_id", "desc"),
            ("limit", "5"),
            ("offset", "20"),
        ]))
        .normalize();
        assert_eq!(q.filters.get("transaction_date").unwrap(), "2025-01-06");
        assert_eq!(q.filters.len(), 1);
        assert_eq!(q.limit(), 5);
        assert_eq!(q.offset(), 20);
    }

    #[test]
    fn filter_prefix_ignores_case_but_name_keeps_it() {
        let q = Query::from_params(params(&[
            ("FILTER_transaction_date", "2025-01-06"),
            ("Filter_Description", "Lunch"),
            ("filterX", "ignored"),
            ("çfilter_x", "ignored"),
        ]))
        .normalize();
        assert_eq!(q.filters.get("transaction_date").unwrap(), "2025-01-06");
        assert_eq!(q.filters.get("Description").unwrap(), "Lunch");
        assert_eq!(q.filters.len(), 2);
    }

    #[test]
    fn out_of_range_and_garbage_values() {
        let q = Query::from_params(params(&[("limit", "0"), ("offset", "-3")])).normalize();
        assert_eq!(q.limit(), 1);
        assert_eq!(q.offset(), 0);

        let q = Query::from_params(params(&[("limit", "999999"), ("offset", "abc")])).normalize();
        assert_eq!(q.limit(), MAX_LIMIT);
        assert_eq!(q.offset(), 0);

        let q = Query::from_params(params(&[("limit", "ten")])).normalize();
        assert_eq!(q.limit(), DEFAULT_LIMIT);
    }
}
