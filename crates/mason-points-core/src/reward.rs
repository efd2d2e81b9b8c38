//! Reward catalogue types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RewardId;

/// A catalogue item masons can redeem points against.
///
/// `point_cost`, `stock`, and `is_active` are the authoritative inputs for
/// redemption pricing and availability; client-supplied prices are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    /// The reward ID.
    pub id: RewardId,

    /// Display name.
    pub name: String,

    /// Cost per unit in points.
    pub point_cost: i64,

    /// Units available for redemption.
    pub stock: i64,

    /// Whether the reward can currently be redeemed.
    pub is_active: bool,

    /// When the reward was added to the catalogue.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reward {
    /// Create a new active reward.
    #[must_use]
    pub fn new(id: RewardId, name: String, point_cost: i64, stock: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            point_cost,
            stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if `quantity` units can currently be redeemed.
    #[must_use]
    pub fn is_available(&self, quantity: i64) -> bool {
        self.is_active && quantity > 0 && self.stock >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability() {
        let mut reward = Reward::new(RewardId::generate(), "Drill kit".into(), 500, 3, Utc::now());
        assert!(reward.is_available(3));
        assert!(!reward.is_available(4));
        assert!(!reward.is_available(0));

        reward.is_active = false;
        assert!(!reward.is_available(1));
    }
}
