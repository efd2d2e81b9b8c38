//! Ledger commands: the transactional vocabulary of the coordinator.
//!
//! Each command is one all-or-nothing unit of work against the store. The
//! store re-checks every guard (status, uniqueness, balance, stock) under
//! its write lock before committing, so a stale pre-check by the caller can
//! never double-apply an effect.

use chrono::{DateTime, Utc};

use mason_points_core::{
    BagLiftId, DeliveryDetails, LedgerEntry, Mason, MasonId, OperatorId, RedemptionId,
    RedemptionStatus, RewardId, SchemeSlabId,
};

/// An atomic unit of ledger work.
///
/// All timestamps are supplied by the caller so command execution is
/// deterministic and testable against fixed clocks.
#[derive(Debug, Clone)]
pub enum LedgerCommand {
    /// Enroll a new mason, crediting the joining bonus atomically with the
    /// profile insert when `joining_bonus_points > 0`.
    Enroll {
        /// The mason profile to create (zero balance; the store applies
        /// the bonus).
        mason: Mason,
        /// Joining bonus computed by the rule engine at enrollment time.
        joining_bonus_points: i64,
    },

    /// Credit a pending bag lift: flip to approved, insert the credit
    /// entry, and apply the submission-time points snapshot to the balance.
    ApproveBagLift {
        /// The lift to approve.
        lift_id: BagLiftId,
        /// The approving operator.
        approved_by: OperatorId,
        /// Approval timestamp.
        now: DateTime<Utc>,
    },

    /// Reject a bag lift. From `pending` this is a plain status flip with
    /// no ledger effect; from `approved` it issues a compensating negative
    /// entry of equal magnitude (a reversal).
    RejectBagLift {
        /// The lift to reject.
        lift_id: BagLiftId,
        /// The rejecting operator.
        rejected_by: OperatorId,
        /// Rejection timestamp.
        now: DateTime<Utc>,
    },

    /// Place a redemption: hold the server-computed cost up front by
    /// debiting the balance and inserting the redemption + debit entry.
    /// Stock is not touched here.
    PlaceRedemption {
        /// Caller-generated redemption ID.
        redemption_id: RedemptionId,
        /// The redeeming mason.
        mason_id: MasonId,
        /// The reward to redeem; pricing and availability are read from
        /// the authoritative catalogue record.
        reward_id: RewardId,
        /// Units requested.
        quantity: i64,
        /// Optional delivery details.
        delivery: Option<DeliveryDetails>,
        /// Placement timestamp.
        now: DateTime<Utc>,
    },

    /// Move a redemption along its fulfilment machine. Approval decrements
    /// stock; rejection releases the held points (and restores stock when
    /// the redemption had already been approved).
    AdvanceRedemption {
        /// The redemption to advance.
        redemption_id: RedemptionId,
        /// The requested status.
        new_status: RedemptionStatus,
        /// Transition timestamp.
        now: DateTime<Utc>,
    },

    /// Claim a slab achievement: unique per `(mason, slab)`; inserts the
    /// claim record and its paired credit entry.
    ClaimSlab {
        /// The claiming mason.
        mason_id: MasonId,
        /// The slab being claimed.
        scheme_slab_id: SchemeSlabId,
        /// Claim timestamp.
        now: DateTime<Utc>,
    },

    /// Manual TSO adjustment with a signed, non-zero delta.
    Adjust {
        /// The mason to adjust.
        mason_id: MasonId,
        /// Signed points delta.
        points: i64,
        /// Reason, recorded on the entry.
        memo: String,
        /// Adjustment timestamp.
        now: DateTime<Utc>,
    },
}

impl LedgerCommand {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Enroll { .. } => "enroll",
            Self::ApproveBagLift { .. } => "approve_bag_lift",
            Self::RejectBagLift { .. } => "reject_bag_lift",
            Self::PlaceRedemption { .. } => "place_redemption",
            Self::AdvanceRedemption { .. } => "advance_redemption",
            Self::ClaimSlab { .. } => "claim_slab",
            Self::Adjust { .. } => "adjust",
        }
    }
}

/// Receipt for an applied ledger command.
#[derive(Debug, Clone)]
pub struct Applied {
    /// The affected mason.
    pub mason_id: MasonId,

    /// Balance after the command committed.
    pub balance_after: i64,

    /// Ledger entries created by the command (may be empty, e.g. for a
    /// pending-lift rejection or a shipped/delivered transition).
    pub entries: Vec<LedgerEntry>,
}
