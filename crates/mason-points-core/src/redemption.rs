//! Reward redemption (spend event) types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MasonId, RedemptionId, RewardId};

/// A spend event exchanging points for a catalogue reward.
///
/// `points_debited` is computed server-side from the reward's authoritative
/// `point_cost × quantity`; the debit is applied at placement so the points
/// are held up front, while stock is only decremented at approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redemption {
    /// The redemption ID.
    pub id: RedemptionId,

    /// The redeeming mason.
    pub mason_id: MasonId,

    /// The reward being redeemed.
    pub reward_id: RewardId,

    /// Number of reward units.
    pub quantity: i64,

    /// Points held at placement (positive magnitude).
    pub points_debited: i64,

    /// Fulfilment status.
    pub status: RedemptionStatus,

    /// Optional delivery details.
    pub delivery: Option<DeliveryDetails>,

    /// When the redemption was placed.
    pub created_at: DateTime<Utc>,

    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl Redemption {
    /// Create a newly placed redemption with its server-computed debit.
    #[must_use]
    pub fn new(
        id: RedemptionId,
        mason_id: MasonId,
        reward_id: RewardId,
        quantity: i64,
        points_debited: i64,
        delivery: Option<DeliveryDetails>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            mason_id,
            reward_id,
            quantity,
            points_debited,
            status: RedemptionStatus::Placed,
            delivery,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Delivery details supplied at placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryDetails {
    /// Street address.
    pub address: String,

    /// Contact phone for the courier.
    pub phone: String,
}

/// Fulfilment status of a redemption.
///
/// `placed → approved → shipped → delivered`, with rejection allowed from
/// `placed` or `approved`. `delivered` and `rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    /// Placed; points held.
    Placed,

    /// Approved by a TSO; stock decremented.
    Approved,

    /// Handed to the courier.
    Shipped,

    /// Received by the mason. Terminal.
    Delivered,

    /// Rejected; held points released. Terminal.
    Rejected,
}

impl RedemptionStatus {
    /// Check whether a transition to `next` is legal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Placed, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Shipped | Self::Rejected)
                | (Self::Shipped, Self::Delivered)
        )
    }

    /// Check if this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected)
    }
}
