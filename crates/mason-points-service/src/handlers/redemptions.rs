//! Reward redemption handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mason_points_core::{DeliveryDetails, Redemption, RedemptionId, RedemptionStatus, RewardId};
use mason_points_store::{LedgerCommand, Store};

use crate::auth::{MasonAuth, OperatorAuth};
use crate::error::ApiError;
use crate::state::AppState;

/// Redemption placement request.
#[derive(Debug, Deserialize)]
pub struct PlaceRedemptionRequest {
    /// Reward to redeem.
    pub reward_id: String,
    /// Units requested.
    pub quantity: i64,
    /// Optional delivery details.
    pub delivery: Option<DeliveryRequest>,
}

/// Delivery details in request format.
#[derive(Debug, Deserialize)]
pub struct DeliveryRequest {
    /// Street address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
}

/// Redemption response.
#[derive(Debug, Serialize)]
pub struct RedemptionResponse {
    /// Redemption ID.
    pub id: String,
    /// Mason ID.
    pub mason_id: String,
    /// Reward ID.
    pub reward_id: String,
    /// Units requested.
    pub quantity: i64,
    /// Points held by this redemption.
    pub points_debited: i64,
    /// Fulfilment status.
    pub status: String,
    /// Created timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<&Redemption> for RedemptionResponse {
    fn from(redemption: &Redemption) -> Self {
        Self {
            id: redemption.id.to_string(),
            mason_id: redemption.mason_id.to_string(),
            reward_id: redemption.reward_id.to_string(),
            quantity: redemption.quantity,
            points_debited: redemption.points_debited,
            status: format!("{:?}", redemption.status).to_lowercase(),
            created_at: redemption.created_at.to_rfc3339(),
            updated_at: redemption.updated_at.to_rfc3339(),
        }
    }
}

/// Placement response, including the balance after the debit.
#[derive(Debug, Serialize)]
pub struct PlaceRedemptionResponse {
    /// The placed redemption.
    #[serde(flatten)]
    pub redemption: RedemptionResponse,
    /// Mason balance after the hold.
    pub points_balance: i64,
}

/// Place a redemption, debiting the catalogue cost immediately.
pub async fn place(
    State(state): State<Arc<AppState>>,
    auth: MasonAuth,
    Json(body): Json<PlaceRedemptionRequest>,
) -> Result<Json<PlaceRedemptionResponse>, ApiError> {
    let reward_id = body
        .reward_id
        .parse::<RewardId>()
        .map_err(|_| ApiError::BadRequest("invalid reward ID".into()))?;

    let delivery = body.delivery.map(|d| DeliveryDetails {
        address: d.address,
        phone: d.phone,
    });

    let redemption_id = RedemptionId::generate();
    let applied = state.store.apply(LedgerCommand::PlaceRedemption {
        redemption_id,
        mason_id: auth.mason_id,
        reward_id,
        quantity: body.quantity,
        delivery,
        now: chrono::Utc::now(),
    })?;

    tracing::info!(
        redemption_id = %redemption_id,
        mason_id = %auth.mason_id,
        reward_id = %reward_id,
        quantity = %body.quantity,
        balance_after = %applied.balance_after,
        "Redemption placed"
    );

    let redemption = state
        .store
        .get_redemption(&redemption_id)?
        .ok_or_else(|| ApiError::Internal("placed redemption missing".into()))?;

    Ok(Json(PlaceRedemptionResponse {
        redemption: RedemptionResponse::from(&redemption),
        points_balance: applied.balance_after,
    }))
}

/// Fulfilment transition request.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status (`approved`, `shipped`, `delivered`, `rejected`).
    pub status: RedemptionStatus,
}

/// Advance a redemption through its fulfilment states.
///
/// `placed → approved → shipped → delivered`, with rejection allowed from
/// `placed` or `approved`. Rejection refunds the held points.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    _auth: OperatorAuth,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<RedemptionResponse>, ApiError> {
    let redemption_id = id
        .parse::<RedemptionId>()
        .map_err(|_| ApiError::BadRequest("invalid redemption ID".into()))?;

    state.store.apply(LedgerCommand::AdvanceRedemption {
        redemption_id,
        new_status: body.status,
        now: chrono::Utc::now(),
    })?;

    tracing::info!(
        redemption_id = %redemption_id,
        status = ?body.status,
        "Redemption status updated"
    );

    let redemption = state
        .store
        .get_redemption(&redemption_id)?
        .ok_or_else(|| ApiError::NotFound("redemption not found".into()))?;

    Ok(Json(RedemptionResponse::from(&redemption)))
}

/// List the authenticated mason's redemptions.
pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    auth: MasonAuth,
) -> Result<Json<Vec<RedemptionResponse>>, ApiError> {
    let redemptions = state.store.list_redemptions_by_mason(&auth.mason_id)?;
    Ok(Json(redemptions.iter().map(RedemptionResponse::from).collect()))
}
