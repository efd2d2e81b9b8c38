//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists or invalid state transition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Slab already claimed by this mason.
    #[error("already claimed: mason {mason_id} slab {slab_id}")]
    AlreadyClaimed {
        /// The claiming mason.
        mason_id: String,
        /// The slab.
        slab_id: String,
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

    /// Reward is not redeemable.
    #[error("reward inactive: {0}")]
    RewardInactive(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            Self::AlreadyClaimed { mason_id, slab_id } => (
                StatusCode::CONFLICT,
                "already_claimed",
                self.to_string(),
                Some(serde_json::json!({
                    "mason_id": mason_id,
                    "slab_id": slab_id
                })),
            ),
            Self::InsufficientPoints { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_points",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required
                })),
            ),
            Self::InsufficientStock {
                available,
                requested,
            } => (
                StatusCode::CONFLICT,
                "insufficient_stock",
                self.to_string(),
                Some(serde_json::json!({
                    "available": available,
                    "requested": requested
                })),
            ),
            Self::RewardInactive(id) => (
                StatusCode::CONFLICT,
                "reward_inactive",
                format!("Reward {id} is not redeemable"),
                None,
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<mason_points_store::StoreError> for ApiError {
    fn from(err: mason_points_store::StoreError) -> Self {
        use mason_points_store::StoreError;
        match err {
            StoreError::Validation(msg) => Self::BadRequest(msg),
            StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            StoreError::AlreadyExists { entity, id } => {
                Self::Conflict(format!("{entity} already exists: {id}"))
            }
            StoreError::InvalidTransition { entity, from, to } => {
                Self::Conflict(format!("{entity} cannot move from {from} to {to}"))
            }
            StoreError::AlreadyClaimed { mason_id, slab_id } => {
                Self::AlreadyClaimed { mason_id, slab_id }
            }
            StoreError::InsufficientPoints { balance, required } => {
                Self::InsufficientPoints { balance, required }
            }
            StoreError::InsufficientStock {
                available,
                requested,
            } => Self::InsufficientStock {
                available,
                requested,
            },
            StoreError::RewardInactive { reward_id } => Self::RewardInactive(reward_id),
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}
