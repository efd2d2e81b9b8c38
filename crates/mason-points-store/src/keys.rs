//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in
//! column families. Mason-scoped indexes concatenate the 16-byte mason
//! UUID with the 16-byte record ID; ledger index keys use the entry ULID
//! so a prefix scan yields entries in chronological order.

use mason_points_core::{
    AchievementId, BagLiftId, IdError, LedgerEntryId, MasonId, RedemptionId, RewardId,
    SchemeSlabId,
};

/// Create a mason key from a mason ID.
#[must_use]
pub fn mason_key(mason_id: &MasonId) -> Vec<u8> {
    mason_id.as_bytes().to_vec()
}

/// Create a ledger entry key from an entry ID.
#[must_use]
pub fn ledger_key(entry_id: &LedgerEntryId) -> Vec<u8> {
    entry_id.to_bytes().to_vec()
}

/// Create a mason-ledger index key.
///
/// Format: `mason_id (16 bytes) || ledger_entry_id (16 bytes)`
///
/// Since ULIDs are time-ordered, a mason's entries sort chronologically.
#[must_use]
pub fn mason_ledger_key(mason_id: &MasonId, entry_id: &LedgerEntryId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(mason_id.as_bytes());
    key.extend_from_slice(&entry_id.to_bytes());
    key
}

/// Create a prefix for iterating all ledger entries of a mason.
#[must_use]
pub fn mason_ledger_prefix(mason_id: &MasonId) -> Vec<u8> {
    mason_id.as_bytes().to_vec()
}

/// Extract the ledger entry ID from a mason-ledger index key.
///
/// # Errors
///
/// Returns an error if the key is shorter than 32 bytes.
pub fn extract_ledger_id_from_mason_key(key: &[u8]) -> Result<LedgerEntryId, IdError> {
    let slice = key.get(16..32).ok_or(IdError::InvalidUlid)?;
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(slice);
    LedgerEntryId::from_bytes(bytes)
}

/// Create a bag lift key from a bag lift ID.
#[must_use]
pub fn bag_lift_key(lift_id: &BagLiftId) -> Vec<u8> {
    lift_id.as_bytes().to_vec()
}

/// Create a mason-bag-lift index key.
#[must_use]
pub fn mason_bag_lift_key(mason_id: &MasonId, lift_id: &BagLiftId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(mason_id.as_bytes());
    key.extend_from_slice(lift_id.as_bytes());
    key
}

/// Create a redemption key from a redemption ID.
#[must_use]
pub fn redemption_key(redemption_id: &RedemptionId) -> Vec<u8> {
    redemption_id.as_bytes().to_vec()
}

/// Create a mason-redemption index key.
#[must_use]
pub fn mason_redemption_key(mason_id: &MasonId, redemption_id: &RedemptionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(mason_id.as_bytes());
    key.extend_from_slice(redemption_id.as_bytes());
    key
}

/// Create a reward key from a reward ID.
#[must_use]
pub fn reward_key(reward_id: &RewardId) -> Vec<u8> {
    reward_id.as_bytes().to_vec()
}

/// Create a scheme slab key from a slab ID.
#[must_use]
pub fn slab_key(slab_id: &SchemeSlabId) -> Vec<u8> {
    slab_id.as_bytes().to_vec()
}

/// Create an achievement key from an achievement ID.
#[must_use]
pub fn achievement_key(achievement_id: &AchievementId) -> Vec<u8> {
    achievement_id.as_bytes().to_vec()
}

/// Create the claim-uniqueness key for a `(mason, slab)` pair.
///
/// Format: `mason_id (16 bytes) || scheme_slab_id (16 bytes)`
#[must_use]
pub fn claim_key(mason_id: &MasonId, slab_id: &SchemeSlabId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(mason_id.as_bytes());
    key.extend_from_slice(slab_id.as_bytes());
    key
}

/// Extract the trailing 16-byte record ID from a 32-byte index key.
///
/// # Errors
///
/// Returns an error if the key is shorter than 32 bytes.
pub fn extract_uuid_suffix(key: &[u8]) -> Result<[u8; 16], IdError> {
    let slice = key.get(16..32).ok_or(IdError::InvalidUuid)?;
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(slice);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mason_ledger_key_roundtrip() {
        let mason_id = MasonId::generate();
        let entry_id = LedgerEntryId::generate();
        let key = mason_ledger_key(&mason_id, &entry_id);

        assert_eq!(key.len(), 32);
        assert!(key.starts_with(mason_id.as_bytes()));
        assert_eq!(extract_ledger_id_from_mason_key(&key).unwrap(), entry_id);
    }

    #[test]
    fn short_index_key_is_rejected() {
        assert!(extract_ledger_id_from_mason_key(&[0u8; 16]).is_err());
        assert!(extract_uuid_suffix(&[0u8; 20]).is_err());
    }

    #[test]
    fn claim_key_is_stable_per_pair() {
        let mason_id = MasonId::generate();
        let slab_id = SchemeSlabId::generate();
        assert_eq!(claim_key(&mason_id, &slab_id), claim_key(&mason_id, &slab_id));

        let other_slab = SchemeSlabId::generate();
        assert_ne!(claim_key(&mason_id, &slab_id), claim_key(&mason_id, &other_slab));
    }

    #[test]
    fn uuid_suffix_extraction() {
        let mason_id = MasonId::generate();
        let lift_id = BagLiftId::generate();
        let key = mason_bag_lift_key(&mason_id, &lift_id);
        assert_eq!(&extract_uuid_suffix(&key).unwrap(), lift_id.as_bytes());
    }
}
