//! Request parameter validation
//!
//! Handlers extract raw values and validate them here before the cache or
//! the query engine is consulted. Every failing field is reported, not just
//! the first.

use crate::error::{ApiError, FieldError, Location};
use axum::{extract::rejection::JsonRejection, http::StatusCode};
use edudir_core::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string accepted by the paginated GET endpoints
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// JSON body of `POST /colleges/search`
///
/// Fields stay untyped so wrong types surface as field errors instead of a
/// generic body rejection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keyword: Option<Value>,
    pub page: Option<Value>,
    pub limit: Option<Value>,
}

/// A search request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSearch {
    pub keyword: String,
    pub page: PageRequest,
}

/// A raw parameter as it arrived
#[derive(Debug, Clone, Copy)]
enum RawParam<'a> {
    Json(&'a Value),
    Text(&'a str),
}

impl RawParam<'_> {
    fn as_integer(&self) -> Option<i128> {
        match self {
            RawParam::Json(Value::Number(n)) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < 1e18)
                        .map(|f| f as i128)
                }),
            RawParam::Json(Value::String(s)) => parse_integer(s),
            RawParam::Json(_) => None,
            RawParam::Text(s) => parse_integer(s),
        }
    }

    fn echo(&self) -> Value {
        match self {
            RawParam::Json(v) => (*v).clone(),
            RawParam::Text(s) => Value::String((*s).to_string()),
        }
    }
}

fn parse_integer(s: &str) -> Option<i128> {
    s.trim().parse::<i128>().ok()
}

fn validate_page(raw: Option<RawParam<'_>>, location: Location) -> Result<usize, FieldError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE);
    };
    raw.as_integer()
        .filter(|n| *n >= 1)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            FieldError::new(
                "page",
                location,
                "page must be an integer greater than or equal to 1",
            )
            .with_value(raw.echo())
        })
}

fn validate_limit(raw: Option<RawParam<'_>>, location: Location) -> Result<usize, FieldError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LIMIT);
    };
    raw.as_integer()
        .filter(|n| (1..=MAX_LIMIT as i128).contains(n))
        .map(|n| n as usize)
        .ok_or_else(|| {
            FieldError::new(
                "limit",
                location,
                format!("limit must be an integer between 1 and {}", MAX_LIMIT),
            )
            .with_value(raw.echo())
        })
}

fn page_request(
    page: Option<RawParam<'_>>,
    limit: Option<RawParam<'_>>,
    location: Location,
    errors: &mut Vec<FieldError>,
) -> Option<PageRequest> {
    let page = validate_page(page, location).map_err(|e| errors.push(e)).ok();
    let limit = validate_limit(limit, location)
        .map_err(|e| errors.push(e))
        .ok();

    match (page, limit) {
        (Some(page), Some(limit)) => PageRequest::new(page, limit).ok(),
        _ => None,
    }
}

impl PageQuery {
    /// Validate `page` and `limit` from a query string
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` listing each invalid parameter.
    pub fn validate(&self) -> Result<PageRequest, ApiError> {
        let mut errors = Vec::new();
        let request = page_request(
            self.page.as_deref().map(RawParam::Text),
            self.limit.as_deref().map(RawParam::Text),
            Location::Query,
            &mut errors,
        );

        match request {
            Some(request) if errors.is_empty() => Ok(request),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

impl SearchRequest {
    /// Validate the keyword plus optional `page` and `limit`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` when the keyword is missing, blank or
    /// not a string, or when `page`/`limit` are out of range.
    pub fn validate(&self) -> Result<ValidSearch, ApiError> {
        let mut errors = Vec::new();

        let keyword = match &self.keyword {
            None => {
                errors.push(FieldError::new(
                    "keyword",
                    Location::Body,
                    "keyword is required",
                ));
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.push(
                    FieldError::new("keyword", Location::Body, "keyword cannot be empty")
                        .with_value(Value::String(s.clone())),
                );
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                errors.push(
                    FieldError::new("keyword", Location::Body, "keyword must be a string")
                        .with_value(other.clone()),
                );
                None
            }
        };

        let page = page_request(
            self.page.as_ref().map(RawParam::Json),
            self.limit.as_ref().map(RawParam::Json),
            Location::Body,
            &mut errors,
        );

        match (keyword, page) {
            (Some(keyword), Some(page)) if errors.is_empty() => Ok(ValidSearch { keyword, page }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Field error for a request body that could not be decoded at all
pub fn body_rejection(message: impl Into<String>) -> ApiError {
    ApiError::field(FieldError::new("body", Location::Body, message))
}

/// Map a JSON extractor rejection, keeping the size limit distinct
pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        body_rejection(rejection.body_text())
    }
}

/// Field error for a query string that could not be decoded at all
pub fn query_rejection(message: impl Into<String>) -> ApiError {
    ApiError::field(FieldError::new("query", Location::Query, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {}", other),
        }
    }

    fn search(body: Value) -> Result<ValidSearch, ApiError> {
        serde_json::from_value::<SearchRequest>(body).unwrap().validate()
    }

    #[test]
    fn test_page_query_defaults() {
        let request = PageQuery::default().validate().unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn test_page_query_parses_numbers() {
        let query = PageQuery {
            page: Some("3".to_string()),
            limit: Some("25".to_string()),
        };
        let request = query.validate().unwrap();
        assert_eq!(request.page(), 3);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn test_page_query_rejects_bad_values() {
        let query = PageQuery {
            page: Some("abc".to_string()),
            limit: Some("0".to_string()),
        };
        assert_eq!(fields(query.validate().unwrap_err()), vec!["page", "limit"]);

        let query = PageQuery {
            page: Some("0".to_string()),
            limit: None,
        };
        assert_eq!(fields(query.validate().unwrap_err()), vec!["page"]);

        let query = PageQuery {
            page: None,
            limit: Some("101".to_string()),
        };
        assert_eq!(fields(query.validate().unwrap_err()), vec!["limit"]);

        let query = PageQuery {
            page: Some("-2".to_string()),
            limit: Some("1.5".to_string()),
        };
        assert_eq!(fields(query.validate().unwrap_err()), vec!["page", "limit"]);
    }

    #[test]
    fn test_limit_bounds_inclusive() {
        for limit in ["1", "100"] {
            let query = PageQuery {
                page: None,
                limit: Some(limit.to_string()),
            };
            assert!(query.validate().is_ok(), "limit {} should be valid", limit);
        }
    }

    #[test]
    fn test_huge_page_is_accepted() {
        let query = PageQuery {
            page: Some("1000000000".to_string()),
            limit: None,
        };
        assert_eq!(query.validate().unwrap().page(), 1_000_000_000);
    }

    #[test]
    fn test_search_valid() {
        let valid = search(json!({"keyword": "abc", "page": 2, "limit": "5"})).unwrap();
        assert_eq!(valid.keyword, "abc");
        assert_eq!(valid.page.page(), 2);
        assert_eq!(valid.page.limit(), 5);

        let defaults = search(json!({"keyword": "abc"})).unwrap();
        assert_eq!(defaults.page, PageRequest::default());
    }

    #[test]
    fn test_search_accepts_integral_float() {
        let valid = search(json!({"keyword": "abc", "limit": 20.0})).unwrap();
        assert_eq!(valid.page.limit(), 20);
    }

    #[test]
    fn test_search_keyword_errors() {
        assert_eq!(fields(search(json!({})).unwrap_err()), vec!["keyword"]);
        assert_eq!(
            fields(search(json!({"keyword": "   "})).unwrap_err()),
            vec!["keyword"]
        );
        assert_eq!(
            fields(search(json!({"keyword": 42})).unwrap_err()),
            vec!["keyword"]
        );
        assert_eq!(
            fields(search(json!({"keyword": null})).unwrap_err()),
            vec!["keyword"]
        );
    }

    #[test]
    fn test_search_reports_every_field() {
        let err = search(json!({"keyword": "", "page": 0, "limit": 500})).unwrap_err();
        assert_eq!(fields(err), vec!["keyword", "page", "limit"]);
    }

    #[test]
    fn test_search_rejects_non_numeric_types() {
        let err = search(json!({"keyword": "abc", "page": true, "limit": [1]})).unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].value, Some(json!(true)));
                assert_eq!(errors[0].location, Location::Body);
            }
            other => panic!("unexpected: {}", other),
        }
    }

    #[test]
    fn test_rejection_helpers() {
        assert_eq!(fields(body_rejection("bad json")), vec!["body"]);
        assert_eq!(fields(query_rejection("bad query")), vec!["query"]);
    }
}
