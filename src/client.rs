//! HTTP boundary to the simplification service.
//!
//! Two request/response endpoints: `POST /simplify` with the serialized map
//! and form mode, and `POST /explain` which relies on session context held
//! by the service. Calls block, so they always run on the background
//! executor; the grid entity applies results back on the main thread.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::RawSimplifyResponse;
use crate::state::FormMode;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("simplification service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("simplification service returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Serialize)]
pub struct SimplifyRequest {
    pub map: Vec<String>,
    #[serde(rename = "type")]
    pub form: FormMode,
}

#[derive(Debug, Default, Deserialize)]
struct ExplainResponse {
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Clone)]
pub struct SimplifyClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl SimplifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Base URL from `KMAPS_SERVER_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("KMAPS_SERVER_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url.trim_end_matches('/').to_string())
    }

    pub fn simplify(&self, request: &SimplifyRequest) -> Result<RawSimplifyResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/simplify", self.base_url))
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(response.json()?)
    }

    pub fn explain(&self) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/explain", self.base_url))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        let body: ExplainResponse = response.json()?;
        Ok(body
            .explanation
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| "No explanation available.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simplify_request_wire_shape() {
        let request = SimplifyRequest {
            map: vec!["0".into(), "1".into(), "X".into(), "0".into()],
            form: FormMode::Pos,
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({ "map": ["0", "1", "X", "0"], "type": "POS" })
        );
    }

    #[test]
    fn explain_response_tolerates_missing_field() {
        let body: ExplainResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.explanation, None);
    }
}
