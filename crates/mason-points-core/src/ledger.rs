//! Ledger entry types for mason-points.
//!
//! This module defines the immutable, append-only point transaction records
//! that are the system's source of truth for balances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AchievementId, AdjustmentId, BagLiftId, LedgerEntryId, MasonId, RedemptionId};

/// An immutable point transaction record.
///
/// Every change to a mason's balance creates exactly one entry inside the
/// same atomic write that applies the balance delta. Entries are never
/// updated or deleted; corrections are expressed as compensating entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique entry ID (ULID for time-ordering).
    pub id: LedgerEntryId,

    /// The mason whose balance was affected.
    pub mason_id: MasonId,

    /// The originating record.
    pub source: LedgerSource,

    /// Points delta. Positive = credit, negative = debit.
    pub points: i64,

    /// Human-readable description.
    pub memo: String,

    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Create a credit entry for an approved bag lift.
    #[must_use]
    pub fn bag_lift_credit(
        mason_id: MasonId,
        lift_id: BagLiftId,
        points: i64,
        bag_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::generate(),
            mason_id,
            source: LedgerSource::BagLift(lift_id),
            points: points.abs(),
            memo: format!("Bag lift approved: {bag_count} bags"),
            created_at,
        }
    }

    /// Create a compensating entry reversing a previously approved bag lift.
    ///
    /// The entry carries a fresh adjustment source so the original credit
    /// entry stays untouched; `original_points` is the magnitude that was
    /// credited.
    #[must_use]
    pub fn bag_lift_reversal(
        mason_id: MasonId,
        adjustment_id: AdjustmentId,
        lift_id: BagLiftId,
        original_points: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::generate(),
            mason_id,
            source: LedgerSource::Adjustment(adjustment_id),
            points: -original_points.abs(),
            memo: format!("Reversal of bag lift {lift_id}"),
            created_at,
        }
    }

    /// Create a debit entry for a placed redemption.
    #[must_use]
    pub fn redemption_debit(
        mason_id: MasonId,
        redemption_id: RedemptionId,
        cost: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::generate(),
            mason_id,
            source: LedgerSource::Redemption(redemption_id),
            points: -cost.abs(),
            memo: format!("Redemption {redemption_id} placed"),
            created_at,
        }
    }

    /// Create a credit entry releasing the points held by a rejected redemption.
    #[must_use]
    pub fn redemption_refund(
        mason_id: MasonId,
        redemption_id: RedemptionId,
        held_points: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::generate(),
            mason_id,
            source: LedgerSource::Redemption(redemption_id),
            points: held_points.abs(),
            memo: format!("Redemption {redemption_id} rejected"),
            created_at,
        }
    }

    /// Create a credit entry for a claimed slab achievement.
    #[must_use]
    pub fn achievement_credit(
        mason_id: MasonId,
        achievement_id: AchievementId,
        points: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::generate(),
            mason_id,
            source: LedgerSource::Achievement(achievement_id),
            points: points.abs(),
            memo: "Slab achievement bonus".to_string(),
            created_at,
        }
    }

    /// Create a manual adjustment entry with a signed delta.
    #[must_use]
    pub fn adjustment(
        mason_id: MasonId,
        adjustment_id: AdjustmentId,
        points: i64,
        memo: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::generate(),
            mason_id,
            source: LedgerSource::Adjustment(adjustment_id),
            points,
            memo,
            created_at,
        }
    }

    /// Create the one-shot joining bonus credit issued at enrollment.
    #[must_use]
    pub fn joining_bonus(
        mason_id: MasonId,
        adjustment_id: AdjustmentId,
        points: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LedgerEntryId::generate(),
            mason_id,
            source: LedgerSource::Adjustment(adjustment_id),
            points: points.abs(),
            memo: "Joining bonus".to_string(),
            created_at,
        }
    }

    /// Check if this entry adds points.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        self.points > 0
    }

    /// Check if this entry removes points.
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        self.points < 0
    }
}

/// The record a ledger entry originates from.
///
/// Each variant carries the ID of the originating record, replacing the
/// usual `source_type`/`source_id` column pair with a typed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum LedgerSource {
    /// An approved bag lift.
    BagLift(BagLiftId),

    /// A reward redemption.
    Redemption(RedemptionId),

    /// A claimed slab achievement.
    Achievement(AchievementId),

    /// A free-standing adjustment (manual, reversal, or joining bonus).
    Adjustment(AdjustmentId),
}

impl LedgerSource {
    /// The source kind, without the ID.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        match self {
            Self::BagLift(_) => SourceType::BagLift,
            Self::Redemption(_) => SourceType::Redemption,
            Self::Achievement(_) => SourceType::Achievement,
            Self::Adjustment(_) => SourceType::Adjustment,
        }
    }
}

/// The kind of record a ledger entry originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Points earned from an approved purchase.
    BagLift,

    /// Points spent on a reward.
    Redemption,

    /// Points earned from a slab milestone claim.
    Achievement,

    /// Manual or compensating adjustment.
    Adjustment,
}
