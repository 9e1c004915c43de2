//! API client for tables and rows.
//!
//! Every call logs its outcome and returns the `ApiError` to the caller
//! unmodified; views decide what to tell the user.

use crate::shared::api_utils::{api_url, delete_json, get_json, logged, send_json};
use contracts::domain::a001_tables::aggregate::{
    CreateTableRequest, FixLegacyResult, RowPayload, SchemaResponse, TableListResponse,
};
use contracts::domain::a001_tables::{TableDataResponse, TableKey};
use contracts::shared::api_error::ApiError;
use gloo_net::http::Method;
use serde_json::{Map, Value};

/// Liveness check used once at startup
pub async fn check_backend() -> Result<Value, ApiError> {
    logged("GET /", get_json("/").await)
}

pub async fn list_tables() -> Result<TableListResponse, ApiError> {
    logged("GET /tables", get_json("/tables").await)
}

/// Both values must already be trimmed and non-empty.
pub async fn create_table(region: &str, assembly: &str) -> Result<Value, ApiError> {
    let body = CreateTableRequest {
        region: region.to_string(),
        assembly: assembly.to_string(),
    };
    logged("POST /tables", send_json(Method::POST, "/tables", &body).await)
}

pub async fn delete_table(key: &TableKey) -> Result<Value, ApiError> {
    let path = key.api_path();
    logged(&format!("DELETE {}", path), delete_json(&path).await)
}

/// Rows come back numbered by their position in this response.
pub async fn get_table_data(key: &TableKey) -> Result<TableDataResponse, ApiError> {
    let path = key.api_path();
    let data: TableDataResponse = logged(&format!("GET {}", path), get_json(&path).await)?;
    Ok(data.with_row_indices())
}

pub async fn get_table_schema(key: &TableKey) -> Result<Vec<String>, ApiError> {
    let path = format!("{}/schema", key.api_path());
    let schema: SchemaResponse = logged(&format!("GET {}", path), get_json(&path).await)?;
    Ok(schema.headers)
}

/// Headers missing from `row` are not sent; explicit nulls are.
pub async fn add_row(key: &TableKey, row: Map<String, Value>) -> Result<Value, ApiError> {
    let path = format!("{}/rows", key.api_path());
    let body = RowPayload { row };
    logged(&format!("POST {}", path), send_json(Method::POST, &path, &body).await)
}

/// `row_index` must come from the latest `get_table_data` of this table.
pub async fn update_row(
    key: &TableKey,
    row_index: usize,
    row: Map<String, Value>,
) -> Result<Value, ApiError> {
    let path = format!("{}/rows/{}", key.api_path(), row_index);
    let body = RowPayload { row };
    logged(&format!("PUT {}", path), send_json(Method::PUT, &path, &body).await)
}

pub async fn fix_legacy_tables() -> Result<FixLegacyResult, ApiError> {
    logged(
        "POST /tables/fix-legacy",
        send_json(Method::POST, "/tables/fix-legacy", &Value::Null).await,
    )
}

/// Opens the database export in a new browsing context; nothing to await.
pub fn download_database() {
    let url = match api_url("/download") {
        Ok(url) => url,
        Err(e) => {
            log::error!("[API] GET /download error: {}", e);
            return;
        }
    };
    match web_sys::window() {
        Some(window) => {
            if let Err(e) = window.open_with_url_and_target(&url, "_blank") {
                log::error!("[API] GET /download error: {:?}", e);
            }
        }
        None => log::error!("[API] GET /download error: no window"),
    }
}
