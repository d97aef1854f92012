use serde::Serialize;

use crate::config::QueryFilters;
use crate::contract::PageRequest;

/// Query string parameters for one leaderboard page, serialized by `reqwest`/serde.
///
/// Booleans go over the wire as `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub category: u8,
    pub sort: u8,
    pub min_star: u32,
    pub max_star: u32,
    pub page: u32,
    pub qualified: u8,
    pub ranked: u8,
    pub verified: u8,
}

impl LeaderboardQuery {
    pub fn for_page(request: &PageRequest, filters: &QueryFilters) -> Self {
        Self {
            category: filters.category,
            sort: filters.sort,
            min_star: request.min_star,
            max_star: request.max_star,
            page: request.page,
            qualified: u8::from(filters.qualified),
            ranked: u8::from(filters.ranked),
            verified: u8::from(filters.verified),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_integer_parameters() {
        let request = PageRequest::first(7, 14).next();
        let query = LeaderboardQuery::for_page(&request, &QueryFilters::default());

        let built = reqwest::Client::new()
            .get("https://example.invalid/api/leaderboards")
            .query(&query)
            .build()
            .unwrap();

        assert_eq!(
            built.url().query(),
            Some("category=3&sort=1&minStar=7&maxStar=8&page=2&qualified=0&ranked=1&verified=1")
        );
    }

    #[test]
    fn filters_flow_through() {
        let filters = QueryFilters {
            category: 1,
            sort: 0,
            qualified: true,
            ranked: false,
            verified: false,
        };
        let query = LeaderboardQuery::for_page(&PageRequest::first(0, 14), &filters);
        assert_eq!(query.category, 1);
        assert_eq!(query.sort, 0);
        assert_eq!(query.min_star, 0);
        assert_eq!(query.max_star, 1);
        assert_eq!((query.qualified, query.ranked, query.verified), (1, 0, 0));
    }
}
