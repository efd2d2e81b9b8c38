//! Mason (loyalty-program member) types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::MasonId;

/// A loyalty-program member.
///
/// The mason tracks the authoritative current point balance and a lifetime
/// bag counter. Both are mutated only through ledger commands executed by
/// the storage layer, never directly; `points_balance` is kept equal to the
/// sum of the mason's ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mason {
    /// The mason ID.
    pub id: MasonId,

    /// Display name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Current point balance. Positive ledger entries add, negative subtract.
    pub points_balance: i64,

    /// Lifetime count of bags lifted across approved purchases.
    pub bags_lifted: i64,

    /// KYC verification status.
    pub kyc_status: KycStatus,

    /// When the mason enrolled.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Mason {
    /// Create a new mason with zero balance, enrolled at `now`.
    #[must_use]
    pub fn new(id: MasonId, name: String, phone: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            phone,
            points_balance: 0,
            bags_lifted: 0,
            kyc_status: KycStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the mason has sufficient points for a debit.
    #[must_use]
    pub fn has_sufficient_points(&self, points: i64) -> bool {
        self.points_balance >= points
    }
}

/// KYC verification status of a mason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    /// Documents submitted, not yet reviewed.
    Pending,

    /// Identity verified.
    Verified,

    /// Verification rejected.
    Rejected,
}
