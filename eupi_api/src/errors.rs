//! Error types for the API client.

/// Errors that can occur when building or sending API requests.
///
/// Undecodable response bodies are not errors: they are normalized into
/// [`Envelope::Error`](crate::Envelope::Error).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A filter value failed local validation. No request was sent.
    #[error("Invalid search query: {0}")]
    InvalidSearchQuery(String),
    /// The base URL or a resolved endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The request could not be sent or its body could not be read.
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}
