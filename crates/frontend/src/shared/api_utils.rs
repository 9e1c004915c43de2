//! API utilities for frontend-backend communication
//!
//! Resolves service URLs from the build-time configuration and turns
//! responses into `Result<T, ApiError>`: 2xx bodies are decoded as JSON,
//! anything else goes through `decode_error`.

use contracts::shared::api_error::{decode_body, decode_error, ApiError};
use contracts::shared::config::{ApiConfig, ConfigError};
use gloo_net::http::{Method, Request, RequestBuilder, Response};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

static CONFIG: OnceCell<Result<ApiConfig, ConfigError>> = OnceCell::new();

/// Service configuration, validated on first access
pub fn api_config() -> Result<&'static ApiConfig, &'static ConfigError> {
    CONFIG
        .get_or_init(|| ApiConfig::from_raw(option_env!("EXCELDB_API_URL")))
        .as_ref()
}

/// Build a full service URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/tables")?;
/// ```
pub fn api_url(path: &str) -> Result<String, ApiError> {
    api_config()
        .map(|config| config.url(path))
        .map_err(|e| ApiError::Config(e.to_string()))
}

/// GET `path` and decode the JSON body
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::get(&api_url(path)?)
        .send()
        .await
        .map_err(transport)?;
    read_json(response).await
}

/// DELETE `path` and decode the JSON body
pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::delete(&api_url(path)?)
        .send()
        .await
        .map_err(transport)?;
    read_json(response).await
}

/// Send `body` as JSON with `method` and decode the JSON reply
pub async fn send_json<B, T>(method: Method, path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = RequestBuilder::new(&api_url(path)?)
        .method(method)
        .json(body)
        .map_err(|e| ApiError::Decode(format!("failed to serialize request: {}", e)))?;
    let response = request.send().await.map_err(transport)?;
    read_json(response).await
}

/// POST a multipart form; the browser sets the boundary header
pub async fn post_form<T: DeserializeOwned>(path: &str, form: web_sys::FormData) -> Result<T, ApiError> {
    let request = RequestBuilder::new(&api_url(path)?)
        .method(Method::POST)
        .body(form)
        .map_err(transport)?;
    let response = request.send().await.map_err(transport)?;
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await.map_err(transport)?;
    if !response.ok() {
        return Err(decode_error(response.status(), &response.status_text(), &text));
    }
    decode_body(&text)
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Logs the outcome of a call and hands it back unchanged.
pub fn logged<T: Debug>(endpoint: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    match &result {
        Ok(data) => log::debug!("[API] {}: {:?}", endpoint, data),
        Err(e) => log::error!("[API] {} error: {}", endpoint, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_passes_result_through() {
        let ok: Result<u8, ApiError> = Ok(3);
        assert_eq!(logged("GET /tables", ok), Ok(3));

        let err: Result<u8, ApiError> = Err(ApiError::Transport("offline".into()));
        assert_eq!(
            logged("GET /tables", err),
            Err(ApiError::Transport("offline".into()))
        );
    }
}
