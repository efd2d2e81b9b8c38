//! Request and response types for the mason-points client.

use chrono::{DateTime, Utc};
use mason_points_core::RedemptionStatus;
use serde::{Deserialize, Serialize};

/// Enrollment request (operator).
#[derive(Debug, Clone, Serialize)]
pub struct EnrollMasonRequest {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
}

/// Mason profile.
#[derive(Debug, Clone, Deserialize)]
pub struct MasonProfile {
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
}

/// Enrollment response.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrolledMason {
    /// Mason ID.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Current points balance.
    pub points_balance: i64,
    /// Joining bonus credited at enrollment.
    pub joining_bonus_points: i64,
}

/// Bag lift submission request.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitLiftRequest {
    /// Dealer the bags were purchased from.
    pub dealer_id: String,
    /// Number of bags.
    pub bag_count: i64,
    /// Purchase date (defaults to now on the server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
}

/// A bag lift as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Lift {
    /// Lift ID.
    pub id: String,
    /// Mason ID.
    pub mason_id: String,
    /// Number of bags.
    pub bag_count: i64,
    /// Points locked in for this lift.
    pub points_credited: i64,
    /// Approval status.
    pub status: String,
}

/// Approval/rejection outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct LiftDecision {
    /// Lift ID.
    pub id: String,
    /// Approval status after the decision.
    pub status: String,
    /// Mason balance after the decision.
    pub points_balance: i64,
}

/// Redemption placement request.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceRedemptionRequest {
    /// Reward to redeem.
    pub reward_id: String,
    /// Units requested.
    pub quantity: i64,
    /// Optional delivery details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
}

/// Delivery details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    /// Street address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
}

/// A redemption as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct RedemptionRecord {
    /// Redemption ID.
    pub id: String,
    /// Reward ID.
    pub reward_id: String,
    /// Units requested.
    pub quantity: i64,
    /// Points held by this redemption.
    pub points_debited: i64,
    /// Fulfilment status.
    pub status: String,
    /// Mason balance after placement (placement responses only).
    #[serde(default)]
    pub points_balance: Option<i64>,
}

/// Fulfilment transition request.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRedemptionStatusRequest {
    /// Target status.
    pub status: RedemptionStatus,
}

/// A catalogue reward.
#[derive(Debug, Clone, Deserialize)]
pub struct RewardItem {
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

/// Slab claim outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimOutcome {
    /// The claimed slab.
    pub slab_id: String,
    /// Points credited by the claim.
    pub points_awarded: i64,
    /// Mason balance after the credit.
    pub points_balance: i64,
}

/// Manual adjustment request (operator).
#[derive(Debug, Clone, Serialize)]
pub struct AdjustRequest {
    /// Signed points delta.
    pub points: i64,
    /// Reason, recorded on the ledger entry.
    pub memo: String,
}

/// Manual adjustment outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustOutcome {
    /// The adjusted mason.
    pub mason_id: String,
    /// Applied delta.
    pub points: i64,
    /// Balance after the adjustment.
    pub points_balance: i64,
}

/// A ledger entry in a history response.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntryRecord {
    /// Entry ID (time-ordered).
    pub id: String,
    /// Signed points delta.
    pub points: i64,
    /// Source kind.
    pub source_type: String,
    /// Human-readable description.
    pub memo: String,
}

/// Ledger history response.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerHistory {
    /// Entries, newest first.
    pub entries: Vec<LedgerEntryRecord>,
    /// Balance the entries sum to.
    pub points_balance: i64,
}

/// API error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error body.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Structured details, when the code carries them.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
