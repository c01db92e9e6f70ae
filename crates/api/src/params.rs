//! Request parameters as they arrive from a client.
//!
//! Everything here is loosely typed; `into_query` validates it against the
//! configured limits and produces the typed query.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use tabula_core::{Error, Result};
use tabula_query::ast::{AggregateOp, AggregateQuery, ListQuery, RowFilter, SortOrder};

use crate::config::ApiConfig;

/// Query string of a row listing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub filter_column: Option<String>,
    pub filter_value: Option<String>,
}

impl ListParams {
    pub fn into_query(self, config: &ApiConfig) -> Result<ListQuery> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(config.default_limit as i64);
        let order: SortOrder = match self.sort_order.as_deref() {
            Some(s) => s.parse()?,
            None => SortOrder::Asc,
        };

        let mut query = ListQuery::bounded(skip, limit, config.max_limit)?;
        if let Some(column) = self.sort_by.filter(|c| !c.is_empty()) {
            query = query.sort(column, order);
        }
        Ok(query.with_filter(RowFilter::from_parts(
            self.search,
            self.filter_column,
            self.filter_value,
        )))
    }
}

/// Query string of an analytics request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateParams {
    pub group_by: String,
    pub aggregate_column: Option<String>,
    pub operation: Option<String>,
    pub search: Option<String>,
    pub filter_column: Option<String>,
    pub filter_value: Option<String>,
}

impl AggregateParams {
    pub fn into_query(self, config: &ApiConfig) -> Result<AggregateQuery> {
        let op: AggregateOp = match self.operation.as_deref() {
            Some(s) => s.parse()?,
            None => AggregateOp::Count,
        };
        let mut query = AggregateQuery::new(self.group_by)?
            .operation(op)
            .policy(config.coercion_policy()?);
        if let Some(column) = self.aggregate_column.filter(|c| !c.is_empty()) {
            query = query.column(column);
        }
        Ok(query.with_filter(RowFilter::from_parts(
            self.search,
            self.filter_column,
            self.filter_value,
        )))
    }
}

/// A parsed upload.
///
/// File bytes are decoded by the transport layer; this carries the header
/// row and one JSON object per record, plus the size of the original file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub size: u64,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub records: Vec<Map<String, Json>>,
}

/// Body of a rename request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameRequest {
    pub new_filename: String,
}

/// Body of an email change request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailUpdate {
    pub email: String,
}

/// Strips an optional `Bearer ` scheme from an `Authorization` value.
pub fn bearer_token(header: &str) -> Result<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim();
    if token.is_empty() {
        return Err(Error::Unauthenticated);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_query::ast::CoercionPolicy;

    #[test]
    fn test_list_defaults() {
        let query = ListParams::default().into_query(&ApiConfig::default()).unwrap();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 10);
        assert_eq!(query.sort_by, None);
        assert!(query.filter.is_identity());
    }

    #[test]
    fn test_list_from_json() {
        let params: ListParams = serde_json::from_str(
            r#"{"skip": 20, "limit": 5, "sort_by": "age", "sort_order": "desc", "search": "ann"}"#,
        )
        .unwrap();
        let query = params.into_query(&ApiConfig::default()).unwrap();
        assert_eq!((query.skip, query.limit), (20, 5));
        assert_eq!(query.sort_by.as_deref(), Some("age"));
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert!(!query.filter.is_identity());
    }

    #[test]
    fn test_list_validation() {
        let config = ApiConfig::default();
        let bad = |p: ListParams| p.into_query(&config).unwrap_err();

        assert!(matches!(bad(ListParams { skip: Some(-1), ..Default::default() }), Error::InvalidArgument { .. }));
        assert!(matches!(bad(ListParams { limit: Some(0), ..Default::default() }), Error::InvalidArgument { .. }));
        assert!(matches!(bad(ListParams { limit: Some(101), ..Default::default() }), Error::InvalidArgument { .. }));
        assert!(matches!(
            bad(ListParams { sort_order: Some("DESC".into()), ..Default::default() }),
            Error::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_list_uses_configured_limits() {
        let config = ApiConfig {
            default_limit: 3,
            max_limit: 5,
            ..ApiConfig::default()
        };
        assert_eq!(ListParams::default().into_query(&config).unwrap().limit, 3);
        let over = ListParams { limit: Some(6), ..Default::default() };
        assert!(over.into_query(&config).is_err());
    }

    #[test]
    fn test_aggregate_params() {
        let params: AggregateParams =
            serde_json::from_str(r#"{"group_by": "team", "aggregate_column": "score", "operation": "avg"}"#).unwrap();
        let query = params.into_query(&ApiConfig::default()).unwrap();
        assert_eq!(query.group_by, "team");
        assert_eq!(query.operation, AggregateOp::Avg);
        assert_eq!(query.value_column().unwrap(), Some("score"));
        assert_eq!(query.policy, CoercionPolicy::ZeroRow);
    }

    #[test]
    fn test_aggregate_validation() {
        let config = ApiConfig::default();
        assert!(AggregateParams::default().into_query(&config).is_err());

        let unknown_op = AggregateParams {
            group_by: "team".into(),
            operation: Some("median".into()),
            ..Default::default()
        };
        assert!(unknown_op.into_query(&config).is_err());

        // A missing value column is reported when the query runs.
        let no_column = AggregateParams {
            group_by: "team".into(),
            operation: Some("sum".into()),
            aggregate_column: Some(String::new()),
            ..Default::default()
        };
        assert!(no_column.into_query(&config).unwrap().value_column().is_err());
    }

    #[test]
    fn test_aggregate_policy_from_config() {
        let config = ApiConfig {
            aggregate_coercion: "zero_group".into(),
            ..ApiConfig::default()
        };
        let params = AggregateParams { group_by: "team".into(), ..Default::default() };
        assert_eq!(params.into_query(&config).unwrap().policy, CoercionPolicy::ZeroGroup);
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token("abc").unwrap(), "abc");
        assert_eq!(bearer_token("Bearer  ").unwrap_err(), Error::Unauthenticated);
        assert!(bearer_token("").is_err());
    }
}
