use async_trait::async_trait;
use thiserror::Error;
use wayroute_core::GeoPoint;

/// Queries shorter than this (after trimming) are never sent upstream.
pub const MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("address must be at least {MIN_QUERY_LEN} characters")]
    InvalidInput,

    #[error("location not found")]
    NotFound,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Incomplete response")]
    IncompleteResponse,
}

/// Resolves free-text addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the first usable coordinate for `address`.
    ///
    /// Fails with [`GeocodingError::InvalidInput`] when the trimmed text is
    /// shorter than [`MIN_QUERY_LEN`], before any request is issued, and
    /// with [`GeocodingError::NotFound`] when the upstream lookup returns
    /// nothing usable.
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError>;
}

/// Produces ordered, human-readable completions for a partial address.
#[async_trait]
pub trait AddressCompleter: Send + Sync {
    async fn complete(&self, query: &str) -> Result<Vec<String>, GeocodingError>;
}

pub(crate) fn validate_address(address: &str) -> Result<&str, GeocodingError> {
    let trimmed = address.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Err(GeocodingError::InvalidInput);
    }
    Ok(trimmed)
}
