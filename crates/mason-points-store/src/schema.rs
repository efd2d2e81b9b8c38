//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Mason profiles, keyed by `mason_id`.
    pub const MASONS: &str = "masons";

    /// Ledger entries, keyed by `ledger_entry_id` (ULID).
    pub const LEDGER: &str = "ledger";

    /// Index: ledger entries by mason, keyed by `mason_id || ledger_entry_id`.
    /// Value is empty (index only).
    pub const LEDGER_BY_MASON: &str = "ledger_by_mason";

    /// Bag lifts, keyed by `bag_lift_id`.
    pub const BAG_LIFTS: &str = "bag_lifts";

    /// Index: bag lifts by mason, keyed by `mason_id || bag_lift_id`.
    pub const BAG_LIFTS_BY_MASON: &str = "bag_lifts_by_mason";

    /// Redemptions, keyed by `redemption_id`.
    pub const REDEMPTIONS: &str = "redemptions";

    /// Index: redemptions by mason, keyed by `mason_id || redemption_id`.
    pub const REDEMPTIONS_BY_MASON: &str = "redemptions_by_mason";

    /// Reward catalogue, keyed by `reward_id`.
    pub const REWARDS: &str = "rewards";

    /// Scheme slabs, keyed by `scheme_slab_id`.
    pub const SCHEME_SLABS: &str = "scheme_slabs";

    /// Slab achievements, keyed by `achievement_id`.
    pub const ACHIEVEMENTS: &str = "achievements";

    /// Claim-uniqueness index, keyed by `mason_id || scheme_slab_id`.
    /// Value is the achievement ID. Stands in for the relational unique
    /// constraint on `(mason_id, scheme_slab_id)`.
    pub const ACHIEVEMENT_CLAIMS: &str = "achievement_claims";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::MASONS,
        cf::LEDGER,
        cf::LEDGER_BY_MASON,
        cf::BAG_LIFTS,
        cf::BAG_LIFTS_BY_MASON,
        cf::REDEMPTIONS,
        cf::REDEMPTIONS_BY_MASON,
        cf::REWARDS,
        cf::SCHEME_SLABS,
        cf::ACHIEVEMENTS,
        cf::ACHIEVEMENT_CLAIMS,
    ]
}
