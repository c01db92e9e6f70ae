//! Response bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use tabula_core::Dataset;
use tabula_query::executor::{Group, RowPage};

use crate::convert::{row_to_json, value_to_json};

type JsonRow = Map<String, Json>;

/// A plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub email: String,
}

/// Result of an email change. Carries a fresh credential when the identity
/// provider issued one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailUpdated {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: String,
    pub filename: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub uploaded_by: String,
}

/// A whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetView {
    pub id: String,
    pub user_email: String,
    pub filename: String,
    pub data: Vec<JsonRow>,
    pub columns: Vec<String>,
}

impl From<&Dataset> for DatasetView {
    fn from(ds: &Dataset) -> Self {
        Self {
            id: ds.id().to_string(),
            user_email: ds.owner().to_string(),
            filename: ds.filename().to_string(),
            data: ds.rows().iter().map(|r| row_to_json(ds.columns(), r)).collect(),
            columns: ds.columns().to_vec(),
        }
    }
}

/// One page of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowsResponse {
    pub id: String,
    pub filename: String,
    pub columns: Vec<String>,
    pub data: Vec<JsonRow>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl RowsResponse {
    pub fn new(ds: &Dataset, page: &RowPage<'_>) -> Self {
        Self {
            id: ds.id().to_string(),
            filename: ds.filename().to_string(),
            columns: page.columns.to_vec(),
            data: page.rows.iter().map(|r| row_to_json(page.columns, r)).collect(),
            total_count: page.info.total_count,
            page: page.info.page,
            page_size: page.info.page_size,
            total_pages: page.info.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub label: String,
    pub value: Json,
}

impl From<&Group> for GroupView {
    fn from(group: &Group) -> Self {
        Self {
            label: group.label.clone(),
            value: value_to_json(&group.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub group_by: String,
    pub aggregate_column: Option<String>,
    pub operation: String,
    pub data: Vec<GroupView>,
}
