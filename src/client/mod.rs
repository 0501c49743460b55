//! API client
//!
//! The [`Client`] combines the session credential, the request executor and
//! the response classifier. Services in [`crate::service`] build on its
//! [`Client::request`] helper.
//!
//! # Module Structure
//!
//! - [`auth`] - OAuth client-credentials login that yields the session token
//! - [`classify`] - Success/error classification of completed responses
//! - [`credential`] - Shared session token holder
//! - [`http`] - Single-request executor
//!
//! # Example
//!
//! ```ignore
//! use megaport::{Client, ClientConfig, Environment};
//!
//! async fn example() -> megaport::Result<()> {
//!     let client = Client::new(ClientConfig::for_environment(Environment::Staging)?)?;
//!     client.set_session_token("token").await;
//!     let ports = client.ports().list_ports().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod classify;
pub mod credential;
pub mod http;

use reqwest::{Method, StatusCode};

use self::credential::SessionCredential;
use self::http::{HttpExecutor, RawResponse};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::service::{PortService, ProductService};

/// Main API client
#[derive(Clone, Debug)]
pub struct Client {
    pub config: ClientConfig,
    pub http: HttpExecutor,
    pub credential: SessionCredential,
}

impl Client {
    /// Create a client with an empty session token
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpExecutor::new(&config.user_agent, config.timeout)?;

        Ok(Self {
            config,
            http,
            credential: SessionCredential::default(),
        })
    }

    pub async fn set_session_token(&self, token: impl Into<String>) {
        self.credential.set(token).await;
    }

    /// Absolute URL for an API path such as `/v2/products`
    pub fn url(&self, path: &str) -> Result<String> {
        Ok(self
            .config
            .base_url
            .join(path.trim_start_matches('/'))?
            .to_string())
    }

    /// Execute one request and classify it against `expected`.
    ///
    /// On success the response body is returned intact for parsing.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        expected: StatusCode,
    ) -> Result<RawResponse> {
        let url = self.url(path)?;
        let token = self.credential.current().await;

        let response = self.http.execute(method, &url, &token, body).await?;

        match classify::classify(response, expected) {
            Ok(response) => Ok(response),
            Err(api) if token.is_empty() && api.is_unauthorized() => {
                Err(Error::MissingSessionToken { status: api.status })
            }
            Err(api) => Err(Error::Api(api)),
        }
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    pub fn ports(&self) -> PortService<'_> {
        PortService::new(self)
    }
}

/// Encode a product id for use as a path segment
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn client(base: &str) -> Client {
        let config = ClientConfig::for_environment(Environment::Staging)
            .unwrap()
            .with_base_url(base)
            .unwrap();
        Client::new(config).unwrap()
    }

    #[test]
    fn test_url_joins_relative_paths() {
        let client = client("https://api-staging.megaport.com");
        assert_eq!(
            client.url("/v2/product/abc").unwrap(),
            "https://api-staging.megaport.com/v2/product/abc"
        );
    }

    #[test]
    fn test_url_keeps_base_prefix() {
        let client = client("http://localhost:8080/proxy");
        assert_eq!(
            client.url("/v2/products").unwrap(),
            "http://localhost:8080/proxy/v2/products"
        );
    }

    #[test]
    fn test_segment_encodes_reserved_characters() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("0b4a8d3c-5f5e"), "0b4a8d3c-5f5e");
    }
}
