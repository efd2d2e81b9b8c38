//! Scheme slab and achievement claim handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mason_points_core::{SchemeSlab, SchemeSlabId};
use mason_points_store::{LedgerCommand, Store};

use crate::auth::{MasonAuth, OperatorAuth};
use crate::error::ApiError;
use crate::state::AppState;

/// Scheme slab response.
#[derive(Debug, Serialize)]
pub struct SlabResponse {
    /// Slab ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Bag threshold for the best-dealer category.
    pub min_bags_best: i64,
    /// Bag threshold for other categories.
    pub min_bags_others: i64,
    /// One-time bonus for reaching the slab.
    pub points_earned: i64,
}

impl From<&SchemeSlab> for SlabResponse {
    fn from(slab: &SchemeSlab) -> Self {
        Self {
            id: slab.id.to_string(),
            name: slab.name.clone(),
            min_bags_best: slab.min_bags_best,
            min_bags_others: slab.min_bags_others,
            points_earned: slab.points_earned,
        }
    }
}

/// Slab upsert request.
#[derive(Debug, Deserialize)]
pub struct UpsertSlabRequest {
    /// Existing slab ID to update; omitted for creation.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Bag threshold for the best-dealer category.
    pub min_bags_best: i64,
    /// Bag threshold for other categories.
    pub min_bags_others: i64,
    /// One-time bonus for reaching the slab.
    pub points_earned: i64,
}

/// Create or update a scheme slab.
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    _auth: OperatorAuth,
    Json(body): Json<UpsertSlabRequest>,
) -> Result<Json<SlabResponse>, ApiError> {
    if body.points_earned <= 0 {
        return Err(ApiError::BadRequest(format!(
            "points earned must be positive, got {}",
            body.points_earned
        )));
    }
    if body.min_bags_best <= 0 || body.min_bags_others <= 0 {
        return Err(ApiError::BadRequest(
            "bag thresholds must be positive".into(),
        ));
    }

    let id = match body.id {
        Some(id) => {
            let slab_id = id
                .parse::<SchemeSlabId>()
                .map_err(|_| ApiError::BadRequest("invalid slab ID".into()))?;
            // Updates must target an existing slab.
            state
                .store
                .get_slab(&slab_id)?
                .ok_or_else(|| ApiError::NotFound(format!("scheme slab not found: {slab_id}")))?;
            slab_id
        }
        None => SchemeSlabId::generate(),
    };

    let slab = SchemeSlab {
        id,
        name: body.name,
        min_bags_best: body.min_bags_best,
        min_bags_others: body.min_bags_others,
        points_earned: body.points_earned,
        created_at: chrono::Utc::now(),
    };
    state.store.put_slab(&slab)?;

    tracing::info!(slab_id = %slab.id, points_earned = %slab.points_earned, "Slab upserted");

    Ok(Json(SlabResponse::from(&slab)))
}

/// List scheme slabs.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SlabResponse>>, ApiError> {
    let slabs = state.store.list_slabs()?;
    Ok(Json(slabs.iter().map(SlabResponse::from).collect()))
}

/// Claim response.
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    /// The claimed slab.
    pub slab_id: String,
    /// Points credited by the claim.
    pub points_awarded: i64,
    /// Mason balance after the credit.
    pub points_balance: i64,
}

/// Claim a slab achievement bonus.
///
/// Each `(mason, slab)` pair pays exactly once; a second claim surfaces
/// the `already_claimed` outcome.
pub async fn claim(
    State(state): State<Arc<AppState>>,
    auth: MasonAuth,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let slab_id = id
        .parse::<SchemeSlabId>()
        .map_err(|_| ApiError::BadRequest("invalid slab ID".into()))?;

    let applied = state.store.apply(LedgerCommand::ClaimSlab {
        mason_id: auth.mason_id,
        scheme_slab_id: slab_id,
        now: chrono::Utc::now(),
    })?;

    let points_awarded = applied.entries.iter().map(|e| e.points).sum();

    tracing::info!(
        mason_id = %auth.mason_id,
        slab_id = %slab_id,
        points_awarded = %points_awarded,
        "Slab achievement claimed"
    );

    Ok(Json(ClaimResponse {
        slab_id: slab_id.to_string(),
        points_awarded,
        points_balance: applied.balance_after,
    }))
}
