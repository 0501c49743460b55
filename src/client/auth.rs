//! Login
//!
//! Exchanges an access/secret key pair for a session token with the OAuth
//! client-credentials grant, then stores the token on the client. The token
//! itself is opaque to the rest of the crate.

use reqwest::StatusCode;
use serde::Deserialize;

use super::classify::classify;
use super::credential::is_guid;
use super::http::RawResponse;
use super::Client;
use crate::config::ApiKeys;
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    token_type: Option<String>,
}

impl Client {
    /// Log in with API keys and keep the returned session token.
    ///
    /// The token is not refreshed; log in again once it expires.
    pub async fn login_oauth(&self, keys: &ApiKeys) -> Result<String> {
        let url = self.config.token_url.as_str();
        tracing::debug!("POST {} (client credentials)", url);

        let response = self
            .http
            .inner()
            .post(url)
            .basic_auth(&keys.access_key, Some(&keys.secret_key))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();
        let response = classify(RawResponse::new(status, body), StatusCode::OK)?;

        let token: TokenResponse = response.json()?;
        if token.access_token.is_empty() {
            return Err(Error::Config("login returned an empty access token".to_string()));
        }
        if !is_guid(&token.access_token) {
            tracing::debug!("Session token is not GUID-shaped, using it as-is");
        }

        tracing::info!(
            "Logged in, token type {}, expires in {}s",
            token.token_type.as_deref().unwrap_or("bearer"),
            token.expires_in.unwrap_or_default()
        );

        self.set_session_token(token.access_token.clone()).await;
        Ok(token.access_token)
    }
}
