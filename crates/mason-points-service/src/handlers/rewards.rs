//! Reward catalogue handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mason_points_core::{Reward, RewardId};
use mason_points_store::Store;

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Reward response.
#[derive(Debug, Serialize)]
pub struct RewardResponse {
    /// Reward ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cost per unit in points.
    pub point_cost: i64,
    /// Units in stock.
    pub stock: i64,
    /// Whether the reward is redeemable.
    pub is_active: bool,
}

impl From<&Reward> for RewardResponse {
    fn from(reward: &Reward) -> Self {
        Self {
            id: reward.id.to_string(),
            name: reward.name.clone(),
            point_cost: reward.point_cost,
            stock: reward.stock,
            is_active: reward.is_active,
        }
    }
}

/// Reward upsert request.
#[derive(Debug, Deserialize)]
pub struct UpsertRewardRequest {
    /// Existing reward ID to update; omitted for creation.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Cost per unit in points.
    pub point_cost: i64,
    /// Units in stock.
    pub stock: i64,
    /// Whether the reward is redeemable (defaults to true).
    pub is_active: Option<bool>,
}

/// Create or update a catalogue reward.
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    _auth: OperatorAuth,
    Json(body): Json<UpsertRewardRequest>,
) -> Result<Json<RewardResponse>, ApiError> {
    if body.point_cost <= 0 {
        return Err(ApiError::BadRequest(format!(
            "point cost must be positive, got {}",
            body.point_cost
        )));
    }
    if body.stock < 0 {
        return Err(ApiError::BadRequest(format!(
            "stock must not be negative, got {}",
            body.stock
        )));
    }

    let now = chrono::Utc::now();
    let reward = match body.id {
        Some(id) => {
            let reward_id = id
                .parse::<RewardId>()
                .map_err(|_| ApiError::BadRequest("invalid reward ID".into()))?;
            let mut reward = state
                .store
                .get_reward(&reward_id)?
                .ok_or_else(|| ApiError::NotFound(format!("reward not found: {reward_id}")))?;

            reward.name = body.name;
            reward.point_cost = body.point_cost;
            reward.stock = body.stock;
            reward.is_active = body.is_active.unwrap_or(reward.is_active);
            reward.updated_at = now;
            reward
        }
        None => {
            let mut reward = Reward::new(
                RewardId::generate(),
                body.name,
                body.point_cost,
                body.stock,
                now,
            );
            reward.is_active = body.is_active.unwrap_or(true);
            reward
        }
    };

    state.store.put_reward(&reward)?;

    tracing::info!(
        reward_id = %reward.id,
        point_cost = %reward.point_cost,
        stock = %reward.stock,
        "Reward upserted"
    );

    Ok(Json(RewardResponse::from(&reward)))
}

/// Get a single reward.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RewardResponse>, ApiError> {
    let reward_id = id
        .parse::<RewardId>()
        .map_err(|_| ApiError::BadRequest("invalid reward ID".into()))?;

    let reward = state
        .store
        .get_reward(&reward_id)?
        .ok_or_else(|| ApiError::NotFound(format!("reward not found: {reward_id}")))?;

    Ok(Json(RewardResponse::from(&reward)))
}

/// List the catalogue (active rewards only).
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RewardResponse>>, ApiError> {
    let rewards = state.store.list_rewards()?;
    Ok(Json(
        rewards
            .iter()
            .filter(|r| r.is_active)
            .map(RewardResponse::from)
            .collect(),
    ))
}
