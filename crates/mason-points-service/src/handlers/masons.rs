//! Mason enrollment and profile handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mason_points_core::{rules, LedgerEntry, Mason, MasonId};
use mason_points_store::{LedgerCommand, Store};

use crate::auth::{MasonAuth, OperatorAuth};
use crate::error::ApiError;
use crate::state::AppState;

/// Default ledger page size.
const DEFAULT_LEDGER_LIMIT: usize = 50;

/// Maximum ledger page size.
const MAX_LEDGER_LIMIT: usize = 500;

/// Mason profile response.
#[derive(Debug, Serialize)]
pub struct MasonResponse {
    /// Mason ID.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Current points balance.
    pub points_balance: i64,
    /// Lifetime approved bags.
    pub bags_lifted: i64,
    /// KYC status.
    pub kyc_status: String,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&Mason> for MasonResponse {
    fn from(mason: &Mason) -> Self {
        Self {
            id: mason.id.to_string(),
            name: mason.name.clone(),
            phone: mason.phone.clone(),
            points_balance: mason.points_balance,
            bags_lifted: mason.bags_lifted,
            kyc_status: format!("{:?}", mason.kyc_status).to_lowercase(),
            created_at: mason.created_at.to_rfc3339(),
        }
    }
}

/// Enrollment request.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
}

/// Enrollment response.
#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    /// The created mason.
    #[serde(flatten)]
    pub mason: MasonResponse,
    /// Joining bonus credited (zero outside the campaign window).
    pub joining_bonus_points: i64,
}

/// Enroll a new mason.
///
/// Credits the joining bonus atomically with the profile insert when
/// enrollment falls inside the configured campaign window.
pub async fn enroll(
    State(state): State<Arc<AppState>>,
    _auth: OperatorAuth,
    Json(body): Json<EnrollRequest>,
) -> Result<Json<EnrollResponse>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }
    if body.phone.trim().is_empty() {
        return Err(ApiError::BadRequest("phone must not be empty".into()));
    }

    let now = chrono::Utc::now();
    let mason = Mason::new(MasonId::generate(), body.name, body.phone, now);
    let bonus = rules::joining_bonus(&state.config.rules, now);

    state.store.apply(LedgerCommand::Enroll {
        mason: mason.clone(),
        joining_bonus_points: bonus,
    })?;

    tracing::info!(
        mason_id = %mason.id,
        joining_bonus = %bonus,
        "Mason enrolled"
    );

    let mason = state
        .store
        .get_mason(&mason.id)?
        .ok_or_else(|| ApiError::Internal("enrolled mason missing".into()))?;

    Ok(Json(EnrollResponse {
        mason: MasonResponse::from(&mason),
        joining_bonus_points: bonus,
    }))
}

/// Get the authenticated mason's profile and balance.
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth: MasonAuth,
) -> Result<Json<MasonResponse>, ApiError> {
    let mason = state
        .store
        .get_mason(&auth.mason_id)?
        .ok_or_else(|| ApiError::NotFound("mason not found".into()))?;

    Ok(Json(MasonResponse::from(&mason)))
}

/// Ledger history query parameters.
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    /// Maximum entries to return.
    pub limit: Option<usize>,
    /// Entries to skip.
    pub offset: Option<usize>,
}

/// A single ledger entry in a history response.
#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    /// Entry ID (time-ordered).
    pub id: String,
    /// Signed points delta.
    pub points: i64,
    /// Source kind.
    pub source_type: String,
    /// Human-readable description.
    pub memo: String,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&LedgerEntry> for LedgerEntryResponse {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            points: entry.points,
            source_type: format!("{:?}", entry.source.source_type()).to_lowercase(),
            memo: entry.memo.clone(),
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// Ledger history response.
#[derive(Debug, Serialize)]
pub struct LedgerHistoryResponse {
    /// Entries, newest first.
    pub entries: Vec<LedgerEntryResponse>,
    /// Balance the entries sum to.
    pub points_balance: i64,
}

/// List the authenticated mason's ledger history, newest first.
pub async fn list_ledger(
    State(state): State<Arc<AppState>>,
    auth: MasonAuth,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerHistoryResponse>, ApiError> {
    let mason = state
        .store
        .get_mason(&auth.mason_id)?
        .ok_or_else(|| ApiError::NotFound("mason not found".into()))?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_LEDGER_LIMIT)
        .min(MAX_LEDGER_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let entries = state
        .store
        .list_ledger_by_mason(&auth.mason_id, limit, offset)?;

    Ok(Json(LedgerHistoryResponse {
        entries: entries.iter().map(LedgerEntryResponse::from).collect(),
        points_balance: mason.points_balance,
    }))
}
