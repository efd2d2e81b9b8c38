//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store`
//! trait. Plain reads go straight to `RocksDB`; ledger commands serialize
//! on an internal write lock so their read-guard-write sequences cannot
//! interleave, then commit as a single `WriteBatch`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use chrono::{DateTime, Utc};
use mason_points_core::rules;
use mason_points_core::{
    AchievementId, AdjustmentId, BagLift, BagLiftId, BagLiftStatus, DeliveryDetails, LedgerEntry,
    LedgerEntryId, Mason, MasonId, OperatorId, Redemption, RedemptionId, RedemptionStatus, Reward,
    RewardId, SchemeSlab, SchemeSlabId, SlabAchievement,
};

use crate::command::{Applied, LedgerCommand};
use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes ledger commands. `RocksDB` batches are atomic but the
    /// guard reads preceding them are not; the lock makes the whole
    /// read-guard-write sequence a critical section.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read one record by key from a column family.
    fn get_record<T: serde::de::DeserializeOwned>(
        &self,
        cf_name: &str,
        key: &[u8],
    ) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Collect all records of a column family.
    fn scan_all<T: serde::de::DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            records.push(Self::deserialize(&value)?);
        }
        Ok(records)
    }

    /// Collect the 16-byte record IDs behind a mason-scoped index prefix.
    fn scan_index_suffixes(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<[u8; 16]>> {
        let cf = self.cf(cf_name)?;
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(prefix, rocksdb::Direction::Forward));

        let mut suffixes = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(prefix) {
                break;
            }
            suffixes.push(
                keys::extract_uuid_suffix(&key)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?,
            );
        }
        Ok(suffixes)
    }

    /// Fetch a mason or fail with a not-found outcome.
    fn require_mason(&self, mason_id: &MasonId) -> Result<Mason> {
        self.get_mason(mason_id)?.ok_or(StoreError::NotFound {
            entity: "mason",
            id: mason_id.to_string(),
        })
    }

    /// Stage a ledger entry and its mason index into a batch.
    fn batch_put_entry(&self, batch: &mut WriteBatch, entry: &LedgerEntry) -> Result<()> {
        let cf_ledger = self.cf(cf::LEDGER)?;
        let cf_index = self.cf(cf::LEDGER_BY_MASON)?;
        batch.put_cf(&cf_ledger, keys::ledger_key(&entry.id), Self::serialize(entry)?);
        batch.put_cf(
            &cf_index,
            keys::mason_ledger_key(&entry.mason_id, &entry.id),
            [],
        );
        Ok(())
    }

    /// Stage a mason record into a batch.
    fn batch_put_mason(&self, batch: &mut WriteBatch, mason: &Mason) -> Result<()> {
        let cf_masons = self.cf(cf::MASONS)?;
        batch.put_cf(&cf_masons, keys::mason_key(&mason.id), Self::serialize(mason)?);
        Ok(())
    }

    /// Commit a prepared batch.
    fn commit(&self, batch: WriteBatch) -> Result<()> {
        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    // =========================================================================
    // Command Execution (called with the write lock held)
    // =========================================================================

    fn apply_enroll(&self, mason: Mason, joining_bonus_points: i64) -> Result<Applied> {
        if self.get_mason(&mason.id)?.is_some() {
            return Err(StoreError::AlreadyExists {
                entity: "mason",
                id: mason.id.to_string(),
            });
        }

        let mut mason = mason;
        let mut entries = Vec::new();
        if joining_bonus_points > 0 {
            let entry = LedgerEntry::joining_bonus(
                mason.id,
                AdjustmentId::generate(),
                joining_bonus_points,
                mason.created_at,
            );
            mason.points_balance += entry.points;
            entries.push(entry);
        }

        let mut batch = WriteBatch::default();
        self.batch_put_mason(&mut batch, &mason)?;
        for entry in &entries {
            self.batch_put_entry(&mut batch, entry)?;
        }
        self.commit(batch)?;

        Ok(Applied {
            mason_id: mason.id,
            balance_after: mason.points_balance,
            entries,
        })
    }

    fn apply_approve_lift(
        &self,
        lift_id: BagLiftId,
        approved_by: OperatorId,
        now: DateTime<Utc>,
    ) -> Result<Applied> {
        let mut lift = self.get_bag_lift(&lift_id)?.ok_or(StoreError::NotFound {
            entity: "bag lift",
            id: lift_id.to_string(),
        })?;

        if !lift.status.can_transition_to(BagLiftStatus::Approved) {
            return Err(StoreError::InvalidTransition {
                entity: "bag lift",
                from: status_name(lift.status),
                to: status_name(BagLiftStatus::Approved),
            });
        }

        let mut mason = self.require_mason(&lift.mason_id)?;

        let entry = LedgerEntry::bag_lift_credit(
            lift.mason_id,
            lift.id,
            lift.points_credited,
            lift.bag_count,
            now,
        );

        lift.status = BagLiftStatus::Approved;
        lift.approved_by = Some(approved_by);
        lift.approved_at = Some(now);

        mason.points_balance += entry.points;
        mason.bags_lifted += lift.bag_count;
        mason.updated_at = now;

        let mut batch = WriteBatch::default();
        let cf_lifts = self.cf(cf::BAG_LIFTS)?;
        batch.put_cf(&cf_lifts, keys::bag_lift_key(&lift.id), Self::serialize(&lift)?);
        self.batch_put_entry(&mut batch, &entry)?;
        self.batch_put_mason(&mut batch, &mason)?;
        self.commit(batch)?;

        Ok(Applied {
            mason_id: mason.id,
            balance_after: mason.points_balance,
            entries: vec![entry],
        })
    }

    fn apply_reject_lift(
        &self,
        lift_id: BagLiftId,
        rejected_by: OperatorId,
        now: DateTime<Utc>,
    ) -> Result<Applied> {
        let mut lift = self.get_bag_lift(&lift_id)?.ok_or(StoreError::NotFound {
            entity: "bag lift",
            id: lift_id.to_string(),
        })?;

        // Re-rejection is an error, not a no-op: a silent second reversal
        // would hide a double-submitted request from the caller.
        if !lift.status.can_transition_to(BagLiftStatus::Rejected) {
            return Err(StoreError::InvalidTransition {
                entity: "bag lift",
                from: status_name(lift.status),
                to: status_name(BagLiftStatus::Rejected),
            });
        }

        let was_approved = lift.status == BagLiftStatus::Approved;
        let mut mason = self.require_mason(&lift.mason_id)?;

        lift.status = BagLiftStatus::Rejected;
        lift.approved_by = Some(rejected_by);
        lift.approved_at = Some(now);

        let mut entries = Vec::new();
        if was_approved {
            let entry = LedgerEntry::bag_lift_reversal(
                lift.mason_id,
                AdjustmentId::generate(),
                lift.id,
                lift.points_credited,
                now,
            );
            mason.points_balance += entry.points;
            mason.bags_lifted -= lift.bag_count;
            entries.push(entry);
        }
        mason.updated_at = now;

        let mut batch = WriteBatch::default();
        let cf_lifts = self.cf(cf::BAG_LIFTS)?;
        batch.put_cf(&cf_lifts, keys::bag_lift_key(&lift.id), Self::serialize(&lift)?);
        for entry in &entries {
            self.batch_put_entry(&mut batch, entry)?;
        }
        self.batch_put_mason(&mut batch, &mason)?;
        self.commit(batch)?;

        Ok(Applied {
            mason_id: mason.id,
            balance_after: mason.points_balance,
            entries,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_place_redemption(
        &self,
        redemption_id: RedemptionId,
        mason_id: MasonId,
        reward_id: RewardId,
        quantity: i64,
        delivery: Option<DeliveryDetails>,
        now: DateTime<Utc>,
    ) -> Result<Applied> {
        if quantity <= 0 {
            return Err(StoreError::Validation(format!(
                "redemption quantity must be positive, got {quantity}"
            )));
        }

        let reward = self.get_reward(&reward_id)?.ok_or(StoreError::NotFound {
            entity: "reward",
            id: reward_id.to_string(),
        })?;
        if !reward.is_active {
            return Err(StoreError::RewardInactive {
                reward_id: reward_id.to_string(),
            });
        }
        if reward.stock < quantity {
            return Err(StoreError::InsufficientStock {
                available: reward.stock,
                requested: quantity,
            });
        }

        let mut mason = self.require_mason(&mason_id)?;

        // Pricing comes from the catalogue record, never from the caller.
        let cost = -rules::redemption_cost(reward.point_cost, quantity);
        if mason.points_balance < cost {
            return Err(StoreError::InsufficientPoints {
                balance: mason.points_balance,
                required: cost,
            });
        }

        let redemption = Redemption::new(
            redemption_id,
            mason_id,
            reward_id,
            quantity,
            cost,
            delivery,
            now,
        );
        let entry = LedgerEntry::redemption_debit(mason_id, redemption_id, cost, now);

        mason.points_balance += entry.points;
        mason.updated_at = now;

        let mut batch = WriteBatch::default();
        let cf_redemptions = self.cf(cf::REDEMPTIONS)?;
        let cf_index = self.cf(cf::REDEMPTIONS_BY_MASON)?;
        batch.put_cf(
            &cf_redemptions,
            keys::redemption_key(&redemption.id),
            Self::serialize(&redemption)?,
        );
        batch.put_cf(&cf_index, keys::mason_redemption_key(&mason_id, &redemption.id), []);
        self.batch_put_entry(&mut batch, &entry)?;
        self.batch_put_mason(&mut batch, &mason)?;
        self.commit(batch)?;

        Ok(Applied {
            mason_id,
            balance_after: mason.points_balance,
            entries: vec![entry],
        })
    }

    fn apply_advance_redemption(
        &self,
        redemption_id: RedemptionId,
        new_status: RedemptionStatus,
        now: DateTime<Utc>,
    ) -> Result<Applied> {
        let mut redemption =
            self.get_redemption(&redemption_id)?
                .ok_or(StoreError::NotFound {
                    entity: "redemption",
                    id: redemption_id.to_string(),
                })?;

        if !redemption.status.can_transition_to(new_status) {
            return Err(StoreError::InvalidTransition {
                entity: "redemption",
                from: status_name(redemption.status),
                to: status_name(new_status),
            });
        }

        let mut mason = self.require_mason(&redemption.mason_id)?;
        let mut batch = WriteBatch::default();
        let mut entries = Vec::new();

        match new_status {
            RedemptionStatus::Approved => {
                // Stock is decremented here, decoupled from placement, so a
                // rejection never has to un-hold stock.
                let mut reward =
                    self.get_reward(&redemption.reward_id)?
                        .ok_or(StoreError::NotFound {
                            entity: "reward",
                            id: redemption.reward_id.to_string(),
                        })?;
                if reward.stock < redemption.quantity {
                    return Err(StoreError::InsufficientStock {
                        available: reward.stock,
                        requested: redemption.quantity,
                    });
                }
                reward.stock -= redemption.quantity;
                reward.updated_at = now;
                let cf_rewards = self.cf(cf::REWARDS)?;
                batch.put_cf(&cf_rewards, keys::reward_key(&reward.id), Self::serialize(&reward)?);
            }
            RedemptionStatus::Rejected => {
                // Release the held points; restore stock only if the
                // approval step had already taken it.
                let entry = LedgerEntry::redemption_refund(
                    redemption.mason_id,
                    redemption.id,
                    redemption.points_debited,
                    now,
                );
                mason.points_balance += entry.points;
                entries.push(entry);

                if redemption.status == RedemptionStatus::Approved {
                    let mut reward =
                        self.get_reward(&redemption.reward_id)?
                            .ok_or(StoreError::NotFound {
                                entity: "reward",
                                id: redemption.reward_id.to_string(),
                            })?;
                    reward.stock += redemption.quantity;
                    reward.updated_at = now;
                    let cf_rewards = self.cf(cf::REWARDS)?;
                    batch.put_cf(
                        &cf_rewards,
                        keys::reward_key(&reward.id),
                        Self::serialize(&reward)?,
                    );
                }
            }
            RedemptionStatus::Shipped | RedemptionStatus::Delivered | RedemptionStatus::Placed => {}
        }

        redemption.status = new_status;
        redemption.updated_at = now;
        mason.updated_at = now;

        let cf_redemptions = self.cf(cf::REDEMPTIONS)?;
        batch.put_cf(
            &cf_redemptions,
            keys::redemption_key(&redemption.id),
            Self::serialize(&redemption)?,
        );
        for entry in &entries {
            self.batch_put_entry(&mut batch, entry)?;
        }
        self.batch_put_mason(&mut batch, &mason)?;
        self.commit(batch)?;

        Ok(Applied {
            mason_id: mason.id,
            balance_after: mason.points_balance,
            entries,
        })
    }

    fn apply_claim_slab(
        &self,
        mason_id: MasonId,
        slab_id: SchemeSlabId,
        now: DateTime<Utc>,
    ) -> Result<Applied> {
        // The claim index is the uniqueness constraint: an existing key is
        // the expected "already claimed" outcome, not a generic failure.
        if self.has_claimed(&mason_id, &slab_id)? {
            return Err(StoreError::AlreadyClaimed {
                mason_id: mason_id.to_string(),
                slab_id: slab_id.to_string(),
            });
        }

        let slab = self.get_slab(&slab_id)?.ok_or(StoreError::NotFound {
            entity: "scheme slab",
            id: slab_id.to_string(),
        })?;
        let mut mason = self.require_mason(&mason_id)?;

        let achievement = SlabAchievement::new(mason_id, &slab, now);
        let entry = LedgerEntry::achievement_credit(
            mason_id,
            achievement.id,
            achievement.points_awarded,
            now,
        );

        mason.points_balance += entry.points;
        mason.updated_at = now;

        let mut batch = WriteBatch::default();
        let cf_achievements = self.cf(cf::ACHIEVEMENTS)?;
        let cf_claims = self.cf(cf::ACHIEVEMENT_CLAIMS)?;
        batch.put_cf(
            &cf_achievements,
            keys::achievement_key(&achievement.id),
            Self::serialize(&achievement)?,
        );
        batch.put_cf(
            &cf_claims,
            keys::claim_key(&mason_id, &slab_id),
            achievement.id.as_bytes(),
        );
        self.batch_put_entry(&mut batch, &entry)?;
        self.batch_put_mason(&mut batch, &mason)?;
        self.commit(batch)?;

        Ok(Applied {
            mason_id,
            balance_after: mason.points_balance,
            entries: vec![entry],
        })
    }

    fn apply_adjust(
        &self,
        mason_id: MasonId,
        points: i64,
        memo: String,
        now: DateTime<Utc>,
    ) -> Result<Applied> {
        if points == 0 {
            return Err(StoreError::Validation(
                "adjustment delta must be non-zero".into(),
            ));
        }

        let mut mason = self.require_mason(&mason_id)?;
        let entry = LedgerEntry::adjustment(mason_id, AdjustmentId::generate(), points, memo, now);

        mason.points_balance += entry.points;
        mason.updated_at = now;

        let mut batch = WriteBatch::default();
        self.batch_put_entry(&mut batch, &entry)?;
        self.batch_put_mason(&mut batch, &mason)?;
        self.commit(batch)?;

        Ok(Applied {
            mason_id,
            balance_after: mason.points_balance,
            entries: vec![entry],
        })
    }
}

/// A lowercase status name for error reporting.
fn status_name<S: std::fmt::Debug>(status: S) -> String {
    format!("{status:?}").to_lowercase()
}

impl Store for RocksStore {
    // =========================================================================
    // Mason Operations
    // =========================================================================

    fn put_mason(&self, mason: &Mason) -> Result<()> {
        let cf = self.cf(cf::MASONS)?;
        self.db
            .put_cf(&cf, keys::mason_key(&mason.id), Self::serialize(mason)?)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_mason(&self, mason_id: &MasonId) -> Result<Option<Mason>> {
        self.get_record(cf::MASONS, &keys::mason_key(mason_id))
    }

    // =========================================================================
    // Catalogue Operations
    // =========================================================================

    fn put_reward(&self, reward: &Reward) -> Result<()> {
        let cf = self.cf(cf::REWARDS)?;
        self.db
            .put_cf(&cf, keys::reward_key(&reward.id), Self::serialize(reward)?)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_reward(&self, reward_id: &RewardId) -> Result<Option<Reward>> {
        self.get_record(cf::REWARDS, &keys::reward_key(reward_id))
    }

    fn list_rewards(&self) -> Result<Vec<Reward>> {
        self.scan_all(cf::REWARDS)
    }

    fn put_slab(&self, slab: &SchemeSlab) -> Result<()> {
        let cf = self.cf(cf::SCHEME_SLABS)?;
        self.db
            .put_cf(&cf, keys::slab_key(&slab.id), Self::serialize(slab)?)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_slab(&self, slab_id: &SchemeSlabId) -> Result<Option<SchemeSlab>> {
        self.get_record(cf::SCHEME_SLABS, &keys::slab_key(slab_id))
    }

    fn list_slabs(&self) -> Result<Vec<SchemeSlab>> {
        self.scan_all(cf::SCHEME_SLABS)
    }

    // =========================================================================
    // Event Record Operations
    // =========================================================================

    fn put_bag_lift(&self, lift: &BagLift) -> Result<()> {
        let cf_lifts = self.cf(cf::BAG_LIFTS)?;
        let cf_index = self.cf(cf::BAG_LIFTS_BY_MASON)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_lifts, keys::bag_lift_key(&lift.id), Self::serialize(lift)?);
        batch.put_cf(&cf_index, keys::mason_bag_lift_key(&lift.mason_id, &lift.id), []);
        self.commit(batch)
    }

    fn get_bag_lift(&self, lift_id: &BagLiftId) -> Result<Option<BagLift>> {
        self.get_record(cf::BAG_LIFTS, &keys::bag_lift_key(lift_id))
    }

    fn list_bag_lifts_by_mason(&self, mason_id: &MasonId) -> Result<Vec<BagLift>> {
        let prefix = mason_id.as_bytes().to_vec();
        let mut lifts = Vec::new();
        for suffix in self.scan_index_suffixes(cf::BAG_LIFTS_BY_MASON, &prefix)? {
            let lift_id = BagLiftId::from_uuid(uuid::Uuid::from_bytes(suffix));
            if let Some(lift) = self.get_bag_lift(&lift_id)? {
                lifts.push(lift);
            }
        }
        Ok(lifts)
    }

    fn get_redemption(&self, redemption_id: &RedemptionId) -> Result<Option<Redemption>> {
        self.get_record(cf::REDEMPTIONS, &keys::redemption_key(redemption_id))
    }

    fn list_redemptions_by_mason(&self, mason_id: &MasonId) -> Result<Vec<Redemption>> {
        let prefix = mason_id.as_bytes().to_vec();
        let mut redemptions = Vec::new();
        for suffix in self.scan_index_suffixes(cf::REDEMPTIONS_BY_MASON, &prefix)? {
            let redemption_id = RedemptionId::from_uuid(uuid::Uuid::from_bytes(suffix));
            if let Some(redemption) = self.get_redemption(&redemption_id)? {
                redemptions.push(redemption);
            }
        }
        Ok(redemptions)
    }

    fn get_achievement(&self, achievement_id: &AchievementId) -> Result<Option<SlabAchievement>> {
        self.get_record(cf::ACHIEVEMENTS, &keys::achievement_key(achievement_id))
    }

    fn has_claimed(&self, mason_id: &MasonId, slab_id: &SchemeSlabId) -> Result<bool> {
        let cf = self.cf(cf::ACHIEVEMENT_CLAIMS)?;
        let exists = self
            .db
            .get_cf(&cf, keys::claim_key(mason_id, slab_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        Ok(exists)
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    fn get_ledger_entry(&self, entry_id: &LedgerEntryId) -> Result<Option<LedgerEntry>> {
        self.get_record(cf::LEDGER, &keys::ledger_key(entry_id))
    }

    fn list_ledger_by_mason(
        &self,
        mason_id: &MasonId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LedgerEntry>> {
        let cf_index = self.cf(cf::LEDGER_BY_MASON)?;
        let prefix = keys::mason_ledger_prefix(mason_id);

        let iter = self.db.iterator_cf(
            &cf_index,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // ULID suffixes are time-ordered, so collecting forward and
        // reversing yields newest first.
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            all_keys.push(key.to_vec());
        }
        all_keys.reverse();

        let mut entries = Vec::new();
        for key in all_keys.into_iter().skip(offset) {
            if entries.len() >= limit {
                break;
            }
            let entry_id = keys::extract_ledger_id_from_mason_key(&key)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            if let Some(entry) = self.get_ledger_entry(&entry_id)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    // =========================================================================
    // Coordinator
    // =========================================================================

    fn apply(&self, command: LedgerCommand) -> Result<Applied> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))?;

        tracing::debug!(command = command.name(), "applying ledger command");

        match command {
            LedgerCommand::Enroll {
                mason,
                joining_bonus_points,
            } => self.apply_enroll(mason, joining_bonus_points),
            LedgerCommand::ApproveBagLift {
                lift_id,
                approved_by,
                now,
            } => self.apply_approve_lift(lift_id, approved_by, now),
            LedgerCommand::RejectBagLift {
                lift_id,
                rejected_by,
                now,
            } => self.apply_reject_lift(lift_id, rejected_by, now),
            LedgerCommand::PlaceRedemption {
                redemption_id,
                mason_id,
                reward_id,
                quantity,
                delivery,
                now,
            } => self.apply_place_redemption(redemption_id, mason_id, reward_id, quantity, delivery, now),
            LedgerCommand::AdvanceRedemption {
                redemption_id,
                new_status,
                now,
            } => self.apply_advance_redemption(redemption_id, new_status, now),
            LedgerCommand::ClaimSlab {
                mason_id,
                scheme_slab_id,
                now,
            } => self.apply_claim_slab(mason_id, scheme_slab_id, now),
            LedgerCommand::Adjust {
                mason_id,
                points,
                memo,
                now,
            } => self.apply_adjust(mason_id, points, memo, now),
        }
    }
}
