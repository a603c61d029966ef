//! api.weather.gov HTTP client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::{debug, instrument, warn};

use crate::error::{NwsError, ProblemDetails};
use crate::resources::Resource;

pub const NWS_API_ORIGIN: &str = "https://api.weather.gov";
const GEO_JSON: &str = "application/geo+json";

/// Connection settings for [`NwsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub origin: String,
    pub user_agent: String,
    /// Unset means requests wait indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(user_agent: &str) -> Self {
        Self {
            origin: NWS_API_ORIGIN.to_string(),
            user_agent: user_agent.to_string(),
            timeout: None,
        }
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct NwsClient {
    client: reqwest::Client,
    origin: String,
}

impl NwsClient {
    /// Build a client. Fails only if the user agent is not a valid header
    /// value or the TLS backend cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            origin: config.origin.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a resource and deserialize it into the descriptor's output.
    #[instrument(skip(self, resource), fields(path = %resource.path()), level = "debug")]
    pub async fn get<R: Resource>(&self, resource: &R) -> Result<R::Output, NwsError> {
        let url = format!("{}{}", self.origin, resource.path());
        debug!(%url, "GET");

        let mut request = self.client.get(&url);
        for (name, value) in resource.headers() {
            request = request.header(*name, *value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(NwsError::Fetch { url, source }),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(source) => return Err(NwsError::Fetch { url, source }),
        };

        let json: serde_json::Value = match serde_json::from_str(&text) {
            Ok(json) => json,
            Err(source) => return Err(NwsError::Parse { url, text, source }),
        };

        if !status.is_success() {
            let details = ProblemDetails::from_body(status, json);
            warn!(%url, status = status.as_u16(), title = ?details.title, "Request failed");
            return Err(NwsError::Response {
                status: status.as_u16(),
                url,
                details,
            });
        }

        serde_json::from_value(json).map_err(|source| NwsError::Parse { url, text, source })
    }
}
