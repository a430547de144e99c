use thiserror::Error;

/// Errors returned by the reverse-geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The response was not JSON.
    #[error("unexpected response format (content type: {content_type})")]
    UnexpectedFormat { content_type: String },

    /// The body was JSON but not the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Malformed {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
