//! Bag lift submission and approval handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mason_points_core::{rules, BagLift, BagLiftId, DealerId};
use mason_points_store::{LedgerCommand, Store};

use crate::auth::{MasonAuth, OperatorAuth};
use crate::error::ApiError;
use crate::state::AppState;

/// Maximum bags accepted in a single submission.
///
/// Field agents occasionally fat-finger quantities; a single lift above
/// this is a data-entry error, not a purchase.
const MAX_BAGS_PER_LIFT: i64 = 10_000;

/// Bag lift submission request.
#[derive(Debug, Deserialize)]
pub struct SubmitLiftRequest {
    /// The dealer the bags were purchased from.
    pub dealer_id: String,
    /// Number of bags.
    pub bag_count: i64,
    /// Purchase date (defaults to now).
    pub purchase_date: Option<DateTime<Utc>>,
}

/// Bag lift response.
#[derive(Debug, Serialize)]
pub struct LiftResponse {
    /// Lift ID.
    pub id: String,
    /// Mason ID.
    pub mason_id: String,
    /// Dealer ID.
    pub dealer_id: String,
    /// Number of bags.
    pub bag_count: i64,
    /// Points locked in for this lift (credited on approval).
    pub points_credited: i64,
    /// Approval status.
    pub status: String,
    /// Purchase date.
    pub purchase_date: String,
    /// Submission timestamp.
    pub created_at: String,
}

impl From<&BagLift> for LiftResponse {
    fn from(lift: &BagLift) -> Self {
        Self {
            id: lift.id.to_string(),
            mason_id: lift.mason_id.to_string(),
            dealer_id: lift.dealer_id.to_string(),
            bag_count: lift.bag_count,
            points_credited: lift.points_credited,
            status: format!("{:?}", lift.status).to_lowercase(),
            purchase_date: lift.purchase_date.to_rfc3339(),
            created_at: lift.created_at.to_rfc3339(),
        }
    }
}

/// Submit a pending bag lift.
///
/// The points are computed once at submission from the mason's current
/// lifetime bag total (base + bonanza + slab-crossing + referral) and
/// snapshotted on the lift; approval credits exactly this snapshot.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    auth: MasonAuth,
    Json(body): Json<SubmitLiftRequest>,
) -> Result<Json<LiftResponse>, ApiError> {
    if body.bag_count <= 0 {
        return Err(ApiError::BadRequest(format!(
            "bag count must be positive, got {}",
            body.bag_count
        )));
    }
    if body.bag_count > MAX_BAGS_PER_LIFT {
        return Err(ApiError::BadRequest(format!(
            "bag count exceeds the per-lift maximum of {MAX_BAGS_PER_LIFT}"
        )));
    }

    let dealer_id = body
        .dealer_id
        .parse::<DealerId>()
        .map_err(|_| ApiError::BadRequest("invalid dealer ID".into()))?;

    let mason = state
        .store
        .get_mason(&auth.mason_id)?
        .ok_or_else(|| ApiError::NotFound("mason not found".into()))?;

    let now = chrono::Utc::now();
    let purchase_date = body.purchase_date.unwrap_or(now);
    let points = rules::submission_points(
        &state.config.rules,
        mason.bags_lifted,
        body.bag_count,
        purchase_date,
    );

    let lift = BagLift::new(
        BagLiftId::generate(),
        mason.id,
        dealer_id,
        body.bag_count,
        purchase_date,
        points,
        now,
    );
    state.store.put_bag_lift(&lift)?;

    tracing::info!(
        lift_id = %lift.id,
        mason_id = %mason.id,
        bag_count = %lift.bag_count,
        points_credited = %lift.points_credited,
        "Bag lift submitted"
    );

    Ok(Json(LiftResponse::from(&lift)))
}

/// Decision response for approval and rejection.
#[derive(Debug, Serialize)]
pub struct LiftDecisionResponse {
    /// The lift after the decision.
    #[serde(flatten)]
    pub lift: LiftResponse,
    /// Mason balance after the decision.
    pub points_balance: i64,
}

/// Approve a pending bag lift, crediting its snapshot.
pub async fn approve(
    State(state): State<Arc<AppState>>,
    auth: OperatorAuth,
    Path(id): Path<String>,
) -> Result<Json<LiftDecisionResponse>, ApiError> {
    let lift_id = parse_lift_id(&id)?;

    let applied = state.store.apply(LedgerCommand::ApproveBagLift {
        lift_id,
        approved_by: auth.operator_id,
        now: chrono::Utc::now(),
    })?;

    tracing::info!(
        lift_id = %lift_id,
        operator_id = %auth.operator_id,
        balance_after = %applied.balance_after,
        "Bag lift approved"
    );

    decision_response(&state, &lift_id, applied.balance_after)
}

/// Reject a bag lift.
///
/// A pending lift just flips status; an approved lift additionally gets a
/// compensating ledger entry reversing its credit.
pub async fn reject(
    State(state): State<Arc<AppState>>,
    auth: OperatorAuth,
    Path(id): Path<String>,
) -> Result<Json<LiftDecisionResponse>, ApiError> {
    let lift_id = parse_lift_id(&id)?;

    let applied = state.store.apply(LedgerCommand::RejectBagLift {
        lift_id,
        rejected_by: auth.operator_id,
        now: chrono::Utc::now(),
    })?;

    tracing::info!(
        lift_id = %lift_id,
        operator_id = %auth.operator_id,
        reversed = %(!applied.entries.is_empty()),
        "Bag lift rejected"
    );

    decision_response(&state, &lift_id, applied.balance_after)
}

/// Lift listing query parameters.
#[derive(Debug, Deserialize)]
pub struct LiftsQuery {
    /// Filter by status (`pending`, `approved`, `rejected`).
    pub status: Option<String>,
}

/// List the authenticated mason's bag lifts.
pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    auth: MasonAuth,
    Query(query): Query<LiftsQuery>,
) -> Result<Json<Vec<LiftResponse>>, ApiError> {
    let lifts = state.store.list_bag_lifts_by_mason(&auth.mason_id)?;

    let responses = lifts
        .iter()
        .map(LiftResponse::from)
        .filter(|r| query.status.as_ref().map_or(true, |s| *s == r.status))
        .collect();

    Ok(Json(responses))
}

fn parse_lift_id(id: &str) -> Result<BagLiftId, ApiError> {
    id.parse::<BagLiftId>()
        .map_err(|_| ApiError::BadRequest("invalid lift ID".into()))
}

fn decision_response(
    state: &AppState,
    lift_id: &BagLiftId,
    points_balance: i64,
) -> Result<Json<LiftDecisionResponse>, ApiError> {
    let lift = state
        .store
        .get_bag_lift(lift_id)?
        .ok_or_else(|| ApiError::NotFound("bag lift not found".into()))?;

    Ok(Json(LiftDecisionResponse {
        lift: LiftResponse::from(&lift),
        points_balance,
    }))
}
