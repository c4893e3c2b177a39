use serde::Deserialize;

/// `?startDate=&endDate=` as sent by the dashboard date picker.
#[derive(Debug, Default, Deserialize)]
pub struct MealRangeQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    #[test]
    fn camel_case_params() {
        let uri: Uri = "/meals?startDate=2024-01-01&endDate=2024-01-31".parse().unwrap();
        let Query(q) = Query::<MealRangeQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(q.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(q.end_date.as_deref(), Some("2024-01-31"));

        let uri: Uri = "/meals".parse().unwrap();
        let Query(none) = Query::<MealRangeQuery>::try_from_uri(&uri).unwrap();
        assert!(none.start_date.is_none() && none.end_date.is_none());
    }
}
