//! Request executor
//!
//! Sends exactly one authenticated request per call and reads the whole
//! body. No retries: a failure to complete the round trip is a transport
//! error, an error status is left for the classifier.

use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};

use crate::error::{Error, Result};

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate a body and strip control characters before it goes to the log
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A completed response with its body fully read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// HTTP executor for API calls
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Send `method url` with the session token and an optional JSON body
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        tracing::debug!("{} {}", method, url);

        if token.is_empty() {
            tracing::warn!("Sending {} {} without a session token", method, url);
        }

        let mut request = self
            .client
            .request(method.clone(), url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json");

        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        tracing::debug!("{} {} -> {} ({} bytes)", method, url, status, body.len());

        Ok(RawResponse { status, body })
    }

    /// Underlying reqwest client, shared with the login exchange
    pub(crate) fn inner(&self) -> &Client {
        &self.client
    }
}
