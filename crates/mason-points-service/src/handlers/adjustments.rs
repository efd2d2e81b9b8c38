//! Manual adjustment handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mason_points_core::MasonId;
use mason_points_store::{LedgerCommand, Store};

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Manual adjustment request.
#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    /// Signed points delta; must be non-zero.
    pub points: i64,
    /// Reason, recorded on the ledger entry.
    pub memo: String,
}

/// Manual adjustment response.
#[derive(Debug, Serialize)]
pub struct AdjustResponse {
    /// The adjusted mason.
    pub mason_id: String,
    /// Applied delta.
    pub points: i64,
    /// Balance after the adjustment.
    pub points_balance: i64,
}

/// Apply a manual adjustment to a mason's balance.
///
/// Not idempotent: a retried request posts a second entry. Callers must
/// not resubmit on timeout without checking the ledger first.
pub async fn adjust(
    State(state): State<Arc<AppState>>,
    auth: OperatorAuth,
    Path(id): Path<String>,
    Json(body): Json<AdjustRequest>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let mason_id = id
        .parse::<MasonId>()
        .map_err(|_| ApiError::BadRequest("invalid mason ID".into()))?;

    if body.memo.trim().is_empty() {
        return Err(ApiError::BadRequest("memo must not be empty".into()));
    }

    let applied = state.store.apply(LedgerCommand::Adjust {
        mason_id,
        points: body.points,
        memo: body.memo,
        now: chrono::Utc::now(),
    })?;

    tracing::info!(
        mason_id = %mason_id,
        operator_id = %auth.operator_id,
        points = %body.points,
        balance_after = %applied.balance_after,
        "Manual adjustment applied"
    );

    Ok(Json(AdjustResponse {
        mason_id: mason_id.to_string(),
        points: body.points,
        points_balance: applied.balance_after,
    }))
}
