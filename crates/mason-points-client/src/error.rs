//! Client error types.

/// Errors that can occur when using the mason-points client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Insufficient points for a redemption.
    #[error("insufficient points: balance={balance}, required={required}")]
    InsufficientPoints {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Not enough reward stock.
    #[error("insufficient stock: available={available}, requested={requested}")]
    InsufficientStock {
        /// Units in stock.
        available: i64,
        /// Units requested.
        requested: i64,
    },

    /// Slab already claimed by this mason.
    #[error("already claimed: {message}")]
    AlreadyClaimed {
        /// Server-provided description.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
