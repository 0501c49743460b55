//! Error types
//!
//! Every operation in the crate returns [`Error`]. The variants follow the
//! failure classes of the API: transport, classification (API errors),
//! decoding, local validation, state conflicts and provisioning timeouts.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::types::ProductType;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A per-field validation failure reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

/// Structured failure built by the response classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status returned by the server
    pub status: StatusCode,
    /// Machine message (or the fallback description when the body could not be parsed)
    pub message: String,
    /// Free-form detail string from the envelope's `data` field
    pub detail: Option<String>,
    /// Nested validation errors, when the server sent them
    pub field_errors: Vec<FieldError>,
    pub trace_id: Option<String>,
    /// Raw body text, kept only when the envelope could not be parsed
    pub raw_body: Option<String>,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED || self.status == StatusCode::FORBIDDEN
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw) = &self.raw_body {
            // Fallback shape: the envelope did not parse
            return write!(
                f,
                "status code '{}' received from api and there has been an error parsing an error: {}. \
                 The error body was:\nBEGIN\n{}\nEND",
                self.status.as_u16(),
                self.message,
                raw
            );
        }

        write!(f, "{} ({})", self.message, self.status.as_u16())?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        for fe in &self.field_errors {
            match &fe.field {
                Some(field) => write!(f, "; {}: {}", field, fe.message)?,
                None => write!(f, "; {}", fe.message)?,
            }
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " [trace {}]", trace_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Client errors
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP round trip could not be completed
    #[error("could not reach the API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an unexpected status
    #[error("{0}")]
    Api(ApiError),

    /// The server rejected a request that was sent without a session token
    #[error("no session token set, log in before calling the API ({status})")]
    MissingSessionToken { status: StatusCode },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid term {0}, valid values are 1, 12, 24, and 36")]
    InvalidTerm(u32),

    #[error("sorry you can only update Ports and MCR2 using this method (got {0})")]
    WrongProductModify(ProductType),

    #[error("that {family} is already locked, cannot lock")]
    AlreadyLocked { family: ProductType, product_id: String },

    #[error("that {family} is not locked, cannot unlock")]
    NotLocked { family: ProductType, product_id: String },

    #[error("the {family} took too long to provision ({attempts} status checks over {elapsed:?})")]
    ProvisionTimeout {
        family: ProductType,
        product_id: String,
        attempts: u32,
        elapsed: Duration,
    },

    #[error("order was accepted but the response carried no confirmation")]
    EmptyOrderResponse,

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the server reported that the product does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_not_found())
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("invalid URL: {}", err))
    }
}
