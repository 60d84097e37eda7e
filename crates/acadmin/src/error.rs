//! Error types shared by the transport client and the view layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Fallback message used when a failure response carries no usable message.
pub const FALLBACK_MESSAGE: &str = "an unexpected error occurred";

/// The uniform error shape every failure is reduced to.
///
/// Matches the envelope the records API sends on validation and not-found
/// responses; transport-level failures are folded into the same shape so the
/// view layer only ever deals with one representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: String,

    /// Field name -> validation messages, when the server provides them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,

    /// HTTP status, filled in client-side (the body itself never carries it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorEnvelope {
    /// Builds an envelope holding only a message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            status: None,
        }
    }
}

/// Errors that can occur while talking to the records API.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// Request never produced a response (connect failure, timeout, ...)
    #[error("network error: {message}")]
    Network { message: String },

    /// Server answered with a non-2xx status
    #[error("{}", .envelope.message)]
    Status { status: u16, envelope: ErrorEnvelope },

    /// Response body could not be decoded into the expected type
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Base URL or endpoint path could not be parsed
    #[error("url error: {message}")]
    Url { message: String },
}

impl ApiError {
    /// Reduces any variant to the uniform envelope shape.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            ApiError::Status { envelope, .. } => envelope.clone(),
            ApiError::Network { message }
            | ApiError::Decode { message }
            | ApiError::Url { message } => ErrorEnvelope::from_message(message.clone()),
        }
    }

    /// HTTP status of the failure, if the server got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server reported the record as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Url {
            message: err.to_string(),
        }
    }
}
