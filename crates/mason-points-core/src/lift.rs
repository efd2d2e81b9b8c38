//! Bag lift (purchase event) types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BagLiftId, DealerId, MasonId, OperatorId};

/// A recorded purchase event, subject to TSO approval.
///
/// `points_credited` is a snapshot of the rule-engine output at submission
/// time; approval credits exactly that amount regardless of how the rules
/// configuration changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BagLift {
    /// The bag lift ID.
    pub id: BagLiftId,

    /// The purchasing mason.
    pub mason_id: MasonId,

    /// The dealer the bags were bought from.
    pub dealer_id: DealerId,

    /// Number of bags purchased.
    pub bag_count: i64,

    /// Date of purchase (drives the bonanza window check).
    pub purchase_date: DateTime<Utc>,

    /// Points snapshot computed at submission.
    pub points_credited: i64,

    /// Approval status.
    pub status: BagLiftStatus,

    /// Operator who approved or rejected the lift.
    pub approved_by: Option<OperatorId>,

    /// When the lift was approved or rejected.
    pub approved_at: Option<DateTime<Utc>>,

    /// When the lift was submitted.
    pub created_at: DateTime<Utc>,
}

impl BagLift {
    /// Create a pending bag lift with its submission-time points snapshot.
    #[must_use]
    pub fn new(
        id: BagLiftId,
        mason_id: MasonId,
        dealer_id: DealerId,
        bag_count: i64,
        purchase_date: DateTime<Utc>,
        points_credited: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            mason_id,
            dealer_id,
            bag_count,
            purchase_date,
            points_credited,
            status: BagLiftStatus::Pending,
            approved_by: None,
            approved_at: None,
            created_at: now,
        }
    }
}

/// Approval status of a bag lift.
///
/// `pending → approved → rejected` (reversal) and `pending → rejected`;
/// `rejected` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BagLiftStatus {
    /// Submitted, awaiting review. No points credited yet.
    Pending,

    /// Approved; points have been credited.
    Approved,

    /// Rejected. Terminal.
    Rejected,
}

impl BagLiftStatus {
    /// Check whether a transition to `next` is legal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Rejected)
        )
    }

    /// Check if this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected)
    }
}
