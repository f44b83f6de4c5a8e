//! Error types for sifctl-registry

use thiserror::Error;

/// Result type alias using sifctl-registry's error type
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Registry client errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Image reference is not `[docker:][/]*namespace/repository:tag`
    #[error("Unsupported image name: {reference}")]
    InvalidReference { reference: String },

    /// Token endpoint did not answer 200
    #[error("Failed to get token (status={status}, url={url}, response={body})")]
    TokenRequestFailed { status: u16, url: String, body: String },

    /// Manifest endpoint did not answer 200
    #[error("Failed to get image manifest (status={status}, url={url}, response={body})")]
    ManifestRequestFailed { status: u16, url: String, body: String },

    /// Transport-level failure (connect, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The registry answered 200 with an unusable body
    #[error("Invalid registry response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

impl RegistryError {
    /// Create an invalid reference error
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status of a rejected request, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::TokenRequestFailed { status, .. } | Self::ManifestRequestFailed { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
