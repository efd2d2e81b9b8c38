//! `RocksDB` storage layer and ledger transaction coordinator for mason-points.
//!
//! This crate provides persistent storage for masons, bag lifts,
//! redemptions, rewards, scheme slabs, achievements, and the append-only
//! point ledger, using `RocksDB` with column families for indexing.
//!
//! # Coordinator
//!
//! All balance-affecting work goes through [`Store::apply`] as a
//! [`LedgerCommand`]: one command is one atomic `WriteBatch`, preceded by
//! guard checks (status, claim uniqueness, balance, stock) performed under
//! the store's write lock. Every balance delta is committed together with
//! the ledger entry that explains it, which is what keeps the invariant
//! `mason.points_balance == sum(entries.points)` true at all times.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use mason_points_core::{Mason, MasonId};
//! use mason_points_store::{LedgerCommand, RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/mason-points-db").unwrap();
//!
//! let mason = Mason::new(MasonId::generate(), "Ravi".into(), "+91-90000".into(), Utc::now());
//! let applied = store
//!     .apply(LedgerCommand::Enroll { mason, joining_bonus_points: 100 })
//!     .unwrap();
//! assert_eq!(applied.balance_after, 100);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use command::{Applied, LedgerCommand};
pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use mason_points_core::{
    AchievementId, BagLift, BagLiftId, LedgerEntry, LedgerEntryId, Mason, MasonId, Redemption,
    RedemptionId, Reward, RewardId, SchemeSlab, SchemeSlabId, SlabAchievement,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, keeping the service handlers
/// engine-agnostic. All mutations of balances and statuses go through
/// [`Store::apply`]; the putters exist for records with no ledger effect
/// (profiles, catalogue, pending submissions).
pub trait Store: Send + Sync {
    // =========================================================================
    // Mason Operations
    // =========================================================================

    /// Insert or update a mason profile.
    ///
    /// This does not touch the balance; use [`Store::apply`] with
    /// [`LedgerCommand::Enroll`] to create masons.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_mason(&self, mason: &Mason) -> Result<()>;

    /// Get a mason by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_mason(&self, mason_id: &MasonId) -> Result<Option<Mason>>;

    // =========================================================================
    // Catalogue Operations
    // =========================================================================

    /// Insert or update a reward.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_reward(&self, reward: &Reward) -> Result<()>;

    /// Get a reward by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_reward(&self, reward_id: &RewardId) -> Result<Option<Reward>>;

    /// List all rewards.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_rewards(&self) -> Result<Vec<Reward>>;

    /// Insert or update a scheme slab.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_slab(&self, slab: &SchemeSlab) -> Result<()>;

    /// Get a scheme slab by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_slab(&self, slab_id: &SchemeSlabId) -> Result<Option<SchemeSlab>>;

    /// List all scheme slabs.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_slabs(&self) -> Result<Vec<SchemeSlab>>;

    // =========================================================================
    // Event Record Operations
    // =========================================================================

    /// Insert a submitted (pending) bag lift.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_bag_lift(&self, lift: &BagLift) -> Result<()>;

    /// Get a bag lift by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_bag_lift(&self, lift_id: &BagLiftId) -> Result<Option<BagLift>>;

    /// List bag lifts for a mason.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_bag_lifts_by_mason(&self, mason_id: &MasonId) -> Result<Vec<BagLift>>;

    /// Get a redemption by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_redemption(&self, redemption_id: &RedemptionId) -> Result<Option<Redemption>>;

    /// List redemptions for a mason.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_redemptions_by_mason(&self, mason_id: &MasonId) -> Result<Vec<Redemption>>;

    /// Get an achievement by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_achievement(&self, achievement_id: &AchievementId) -> Result<Option<SlabAchievement>>;

    /// Check whether a `(mason, slab)` pair has already been claimed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn has_claimed(&self, mason_id: &MasonId, slab_id: &SchemeSlabId) -> Result<bool>;

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Get a ledger entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_ledger_entry(&self, entry_id: &LedgerEntryId) -> Result<Option<LedgerEntry>>;

    /// List ledger entries for a mason, ordered by time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_ledger_by_mason(
        &self,
        mason_id: &MasonId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LedgerEntry>>;

    // =========================================================================
    // Coordinator
    // =========================================================================

    /// Execute a ledger command as one atomic unit of work.
    ///
    /// On any guard failure nothing is written; on success the balance
    /// delta, the ledger entries explaining it, and all record updates
    /// commit together.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if a referenced record doesn't exist.
    /// - [`StoreError::AlreadyExists`] on duplicate enrollment.
    /// - [`StoreError::InvalidTransition`] on illegal or repeated status
    ///   transitions (double approval, re-rejection).
    /// - [`StoreError::AlreadyClaimed`] on a duplicate slab claim.
    /// - [`StoreError::InsufficientPoints`] / [`StoreError::InsufficientStock`] /
    ///   [`StoreError::RewardInactive`] on redemption guards.
    /// - [`StoreError::Validation`] on malformed input (zero adjustment,
    ///   non-positive quantity).
    fn apply(&self, command: LedgerCommand) -> Result<Applied>;
}
