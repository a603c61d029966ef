//! Weather API error types.
//!
//! Every failure leaving [`crate::NwsClient`] is one of three shapes: the
//! request never produced a response, the body was not the JSON we expected,
//! or the server answered with a non-success status and a problem document.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NwsError {
    /// Transport failure before a complete response was read.
    #[error("Network error while fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body was not valid JSON, or not the expected document.
    #[error("Invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        text: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-success status with the server's problem details.
    #[error("Server returned {status} for {url}: {}", .details.summary())]
    Response {
        status: u16,
        url: String,
        details: ProblemDetails,
    },
}

/// RFC 7807 problem document returned with error statuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemDetails {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameter_errors: Vec<ParameterError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterError {
    pub parameter: String,
    pub message: String,
}

impl ProblemDetails {
    /// Interpret an error body. Members are read one at a time, so a
    /// mistyped member is dropped without losing the rest. Bodies that are
    /// not problem documents still produce details, titled with the status'
    /// reason phrase.
    pub fn from_body(status: StatusCode, body: serde_json::Value) -> Self {
        let mut details = match body {
            serde_json::Value::Object(members) => Self::from_members(&members),
            _ => Self::default(),
        };
        if details.title.is_none() {
            details.title = status.canonical_reason().map(str::to_string);
        }
        if details.status.is_none() {
            details.status = Some(status.as_u16());
        }
        details
    }

    fn from_members(members: &serde_json::Map<String, serde_json::Value>) -> Self {
        let text = |name: &str| members.get(name).and_then(|v| v.as_str()).map(str::to_string);
        let status = members.get("status").and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });
        let parameter_errors: Vec<ParameterError> = members
            .get("parameterErrors")
            .and_then(|v| v.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            kind: text("type"),
            title: text("title"),
            status,
            detail: text("detail"),
            instance: text("instance"),
            correlation_id: text("correlationId"),
            parameter_errors,
        }
    }

    /// Title and detail on one line.
    pub fn summary(&self) -> String {
        match (self.title.as_deref(), self.detail.as_deref()) {
            (Some(title), Some(detail)) => format!("{} ({})", title, detail),
            (Some(title), None) => title.to_string(),
            (None, Some(detail)) => detail.to_string(),
            (None, None) => "unknown error".to_string(),
        }
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.summary())
    }
}
