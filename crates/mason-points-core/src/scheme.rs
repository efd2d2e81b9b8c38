//! Scheme slab (milestone) and achievement claim types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AchievementId, MasonId, SchemeSlabId};

/// A milestone definition within a scheme.
///
/// A slab pays `points_earned` once when a mason's lifetime bag count
/// reaches its threshold. The threshold differs by dealer category
/// ("best" vs other dealers), matching the scheme card the program prints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeSlab {
    /// The slab ID.
    pub id: SchemeSlabId,

    /// Display name (e.g. "Silver", "Gold").
    pub name: String,

    /// Bag threshold for purchases from best dealers.
    pub min_bags_best: i64,

    /// Bag threshold for purchases from other dealers.
    pub min_bags_others: i64,

    /// One-time bonus paid on claiming the slab.
    pub points_earned: i64,

    /// When the slab was configured.
    pub created_at: DateTime<Utc>,
}

/// A claim record pairing a mason with a slab, unique per `(mason, slab)`.
///
/// Snapshots `points_awarded` at claim time and is always paired 1:1 with
/// one achievement-sourced ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabAchievement {
    /// The achievement ID.
    pub id: AchievementId,

    /// The claiming mason.
    pub mason_id: MasonId,

    /// The claimed slab.
    pub scheme_slab_id: SchemeSlabId,

    /// Points awarded, snapshotted from the slab at claim time.
    pub points_awarded: i64,

    /// When the claim was made.
    pub created_at: DateTime<Utc>,
}

impl SlabAchievement {
    /// Create a claim record snapshotting the slab's configured bonus.
    #[must_use]
    pub fn new(mason_id: MasonId, slab: &SchemeSlab, now: DateTime<Utc>) -> Self {
        Self {
            id: AchievementId::generate(),
            mason_id,
            scheme_slab_id: slab.id,
            points_awarded: slab.points_earned,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_snapshots_slab_points() {
        let slab = SchemeSlab {
            id: SchemeSlabId::generate(),
            name: "Gold".into(),
            min_bags_best: 500,
            min_bags_others: 600,
            points_earned: 1500,
            created_at: Utc::now(),
        };
        let claim = SlabAchievement::new(MasonId::generate(), &slab, Utc::now());
        assert_eq!(claim.points_awarded, 1500);
        assert_eq!(claim.scheme_slab_id, slab.id);
    }
}
