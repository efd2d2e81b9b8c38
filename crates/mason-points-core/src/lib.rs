//! Core types and rule engine for mason-points.
//!
//! This crate provides the foundational types used throughout the
//! mason-points loyalty platform:
//!
//! - **Identifiers**: `MasonId`, `LedgerEntryId`, `BagLiftId`, `RewardId`, ...
//! - **Masons**: `Mason`, `KycStatus`
//! - **Ledger**: `LedgerEntry`, `LedgerSource`
//! - **Events**: `BagLift`, `Redemption`, `SlabAchievement`
//! - **Catalogue**: `Reward`, `SchemeSlab`
//! - **Rules**: `LoyaltyRulesConfig` and the pure point computations
//!
//! # Points
//!
//! Points are signed `i64` values. A positive ledger entry is a credit, a
//! negative one a debit. A mason's `points_balance` is kept equal to the
//! sum of the mason's ledger entries by the storage layer; nothing in this
//! crate mutates a balance directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod ledger;
pub mod lift;
pub mod mason;
pub mod redemption;
pub mod reward;
pub mod rules;
pub mod scheme;

pub use ids::{
    AchievementId, AdjustmentId, BagLiftId, DealerId, IdError, LedgerEntryId, MasonId, OperatorId,
    RedemptionId, RewardId, SchemeSlabId,
};
pub use ledger::{LedgerEntry, LedgerSource, SourceType};
pub use lift::{BagLift, BagLiftStatus};
pub use mason::{KycStatus, Mason};
pub use redemption::{DeliveryDetails, Redemption, RedemptionStatus};
pub use reward::Reward;
pub use rules::{
    bag_lift_points, joining_bonus, redemption_cost, referral_bonus, slab_crossing_bonus,
    submission_points, BonusWindow, LoyaltyRulesConfig,
};
pub use scheme::{SchemeSlab, SlabAchievement};
