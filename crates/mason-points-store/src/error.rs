//! Error types for mason-points storage.
//!
//! Every constraint the coordinator enforces inside a transaction surfaces
//! as its own variant, so callers can tell "that action already happened"
//! from "you don't have enough points/stock" from "try again later"
//! without inspecting engine-specific error strings.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed. Not attributable to caller input.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Malformed command input, rejected before any write.
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record (mason, reward, scheme slab, ...).
        entity: &'static str,
        /// The ID that was not found.
        id: String,
    },

    /// Record already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// The kind of record.
        entity: &'static str,
        /// The ID that already exists.
        id: String,
    },

    /// Illegal status transition, including repeats of an already-applied
    /// transition (double approval, re-rejection).
    #[error("{entity} cannot transition from {from} to {to}")]
    InvalidTransition {
        /// The kind of record.
        entity: &'static str,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// The `(mason, slab)` pair already has an achievement record.
    #[error("slab {slab_id} already claimed by mason {mason_id}")]
    AlreadyClaimed {
        /// The claiming mason.
        mason_id: String,
        /// The slab that was already claimed.
        slab_id: String,
    },

    /// Insufficient point balance for a debit.
    #[error("insufficient points: balance={balance}, required={required}")]
    InsufficientPoints {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Insufficient reward stock.
    #[error("insufficient stock: available={available}, requested={requested}")]
    InsufficientStock {
        /// Units available.
        available: i64,
        /// Units requested.
        requested: i64,
    },

    /// The reward exists but is not currently redeemable.
    #[error("reward not active: {reward_id}")]
    RewardInactive {
        /// The inactive reward.
        reward_id: String,
    },
}
