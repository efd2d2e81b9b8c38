//! The points rule engine.
//!
//! Pure functions computing how many points an event is worth. All inputs,
//! including "now" and transaction dates, are parameters; nothing here
//! reads the wall clock or performs I/O, so every windowed rule can be
//! exercised against arbitrary dates in tests.
//!
//! All functions guard against zero or negative counts/quantities by
//! returning zero (or a zero cost) rather than producing a positive point
//! side effect.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive date window gating a bonus rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusWindow {
    /// First instant at which the bonus applies.
    pub start: DateTime<Utc>,

    /// Last instant at which the bonus applies.
    pub end: DateTime<Utc>,
}

impl BonusWindow {
    /// Check whether `at` falls inside the window. Both endpoints are
    /// inclusive.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Configuration for all point rules.
///
/// Passed explicitly into every rule function. The service loads this from
/// a JSON file or falls back to [`LoyaltyRulesConfig::default`], which
/// carries the current program constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyRulesConfig {
    /// Points per bag on every approved lift.
    pub base_points_per_bag: i64,

    /// Extra points per bag during the bonanza window, added on top of the
    /// base (additive, not a substitute multiplier).
    pub bonanza_additional_points_per_bag: i64,

    /// Window during which the bonanza addition applies, checked against
    /// the purchase date.
    pub bonanza_window: BonusWindow,

    /// Fixed credit issued at enrollment inside the joining window.
    pub joining_bonus_points: i64,

    /// Window during which enrollments earn the joining bonus.
    pub joining_bonus_window: BonusWindow,

    /// Bag-count width of one slab for the crossing bonus.
    pub slab_size: i64,

    /// Points paid per whole slab boundary crossed.
    pub points_per_slab: i64,

    /// Window during which slab crossings pay out, checked against the
    /// purchase date.
    pub slab_bonus_window: BonusWindow,

    /// Lifetime bag count at which the referral bonus fires, once.
    pub referral_threshold_bags: i64,

    /// Fixed bonus paid when the referral threshold is crossed.
    pub referral_bonus_points: i64,
}

impl Default for LoyaltyRulesConfig {
    fn default() -> Self {
        Self {
            base_points_per_bag: 1,
            bonanza_additional_points_per_bag: 3,
            bonanza_window: BonusWindow {
                start: utc_date(2025, 9, 1),
                end: utc_date(2025, 10, 31),
            },
            joining_bonus_points: 100,
            joining_bonus_window: BonusWindow {
                start: utc_date(2025, 4, 1),
                end: utc_date(2025, 12, 31),
            },
            slab_size: 250,
            points_per_slab: 500,
            slab_bonus_window: BonusWindow {
                start: utc_date(2025, 4, 1),
                end: utc_date(2026, 3, 31),
            },
            referral_threshold_bags: 200,
            referral_bonus_points: 1000,
        }
    }
}

fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Joining bonus for an enrollment at `now`.
///
/// Returns the fixed bonus when `now` falls inside the joining window,
/// zero otherwise. One-shot: callers apply this only at mason creation.
#[must_use]
pub fn joining_bonus(config: &LoyaltyRulesConfig, now: DateTime<Utc>) -> i64 {
    if config.joining_bonus_window.contains(now) {
        config.joining_bonus_points
    } else {
        0
    }
}

/// Base plus bonanza points for a bag lift.
///
/// `bag_count × base`, plus `bag_count × bonanza_additional` when the
/// purchase date falls inside the bonanza window.
#[must_use]
pub fn bag_lift_points(
    config: &LoyaltyRulesConfig,
    bag_count: i64,
    purchase_date: DateTime<Utc>,
) -> i64 {
    if bag_count <= 0 {
        return 0;
    }

    let mut points = bag_count * config.base_points_per_bag;
    if config.bonanza_window.contains(purchase_date) {
        points += bag_count * config.bonanza_additional_points_per_bag;
    }
    points
}

/// Extra bonus for crossing whole slab boundaries.
///
/// Pays `points_per_slab` once per boundary crossed between the old and new
/// cumulative totals, supporting multi-slab jumps in a single event. Zero
/// when no boundary is crossed or the date is outside the slab window.
#[must_use]
pub fn slab_crossing_bonus(
    config: &LoyaltyRulesConfig,
    old_total_bags: i64,
    new_bag_count: i64,
    transaction_date: DateTime<Utc>,
) -> i64 {
    if new_bag_count <= 0 || config.slab_size <= 0 {
        return 0;
    }
    if !config.slab_bonus_window.contains(transaction_date) {
        return 0;
    }

    let old_total = old_total_bags.max(0);
    let old_index = old_total / config.slab_size;
    let new_index = (old_total + new_bag_count) / config.slab_size;
    (new_index - old_index) * config.points_per_slab
}

/// One-shot referral bonus trigger.
///
/// Binary, not proportional: fires exactly when the cumulative total
/// crosses the threshold (`old < threshold ≤ old + new`), never again once
/// the threshold is already behind the mason.
#[must_use]
pub fn referral_bonus(config: &LoyaltyRulesConfig, old_total_bags: i64, new_bag_count: i64) -> i64 {
    if new_bag_count <= 0 {
        return 0;
    }

    let threshold = config.referral_threshold_bags;
    if old_total_bags < threshold && old_total_bags + new_bag_count >= threshold {
        config.referral_bonus_points
    } else {
        0
    }
}

/// Full submission-time snapshot for a bag lift.
///
/// The sum of base + bonanza, slab-crossing, and referral components given
/// the mason's lifetime bag total before this event. The caller persists
/// the result as the lift's `points_credited`; approval credits exactly
/// this amount.
#[must_use]
pub fn submission_points(
    config: &LoyaltyRulesConfig,
    old_total_bags: i64,
    bag_count: i64,
    purchase_date: DateTime<Utc>,
) -> i64 {
    bag_lift_points(config, bag_count, purchase_date)
        + slab_crossing_bonus(config, old_total_bags, bag_count, purchase_date)
        + referral_bonus(config, old_total_bags, bag_count)
}

/// Redemption cost as a negative delta.
///
/// `point_cost × quantity`, negated, for the caller to apply as a debit.
/// No-ops (returns zero) on non-positive cost or quantity.
#[must_use]
pub fn redemption_cost(point_cost: i64, quantity: i64) -> i64 {
    if point_cost <= 0 || quantity <= 0 {
        return 0;
    }
    -(point_cost * quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LoyaltyRulesConfig {
        LoyaltyRulesConfig::default()
    }

    #[test]
    fn joining_bonus_inside_window() {
        let cfg = config();
        assert_eq!(joining_bonus(&cfg, utc_date(2025, 6, 15)), 100);
    }

    #[test]
    fn joining_bonus_window_endpoints_inclusive() {
        let cfg = config();
        assert_eq!(joining_bonus(&cfg, cfg.joining_bonus_window.start), 100);
        assert_eq!(joining_bonus(&cfg, cfg.joining_bonus_window.end), 100);
        assert_eq!(
            joining_bonus(&cfg, cfg.joining_bonus_window.end + chrono::Duration::seconds(1)),
            0
        );
    }

    #[test]
    fn base_points_outside_bonanza() {
        let cfg = config();
        assert_eq!(bag_lift_points(&cfg, 10, utc_date(2025, 5, 1)), 10);
    }

    #[test]
    fn bonanza_is_additive() {
        let cfg = config();
        // 10 × 1 base + 10 × 3 bonanza, independently verifiable components.
        let inside = bag_lift_points(&cfg, 10, utc_date(2025, 9, 15));
        let outside = bag_lift_points(&cfg, 10, utc_date(2025, 5, 1));
        assert_eq!(inside, 40);
        assert_eq!(inside - outside, 10 * cfg.bonanza_additional_points_per_bag);
    }

    #[test]
    fn bonanza_window_endpoints_inclusive() {
        let cfg = config();
        assert_eq!(bag_lift_points(&cfg, 10, cfg.bonanza_window.start), 40);
        assert_eq!(bag_lift_points(&cfg, 10, cfg.bonanza_window.end), 40);
    }

    #[test]
    fn non_positive_bag_count_earns_nothing() {
        let cfg = config();
        assert_eq!(bag_lift_points(&cfg, 0, utc_date(2025, 9, 15)), 0);
        assert_eq!(bag_lift_points(&cfg, -5, utc_date(2025, 9, 15)), 0);
    }

    #[test]
    fn slab_single_boundary() {
        let cfg = config();
        // 240 → 260 crosses 250 once.
        assert_eq!(slab_crossing_bonus(&cfg, 240, 20, utc_date(2025, 6, 1)), 500);
    }

    #[test]
    fn slab_multi_boundary_jump() {
        let cfg = config();
        // 240 → 760 crosses 250 and 500 and 750: three boundaries.
        assert_eq!(
            slab_crossing_bonus(&cfg, 240, 520, utc_date(2025, 6, 1)),
            1500
        );
        // 240 → 740 crosses 250 and 500: two boundaries.
        assert_eq!(
            slab_crossing_bonus(&cfg, 240, 500, utc_date(2025, 6, 1)),
            1000
        );
    }

    #[test]
    fn slab_no_boundary() {
        let cfg = config();
        assert_eq!(slab_crossing_bonus(&cfg, 10, 5, utc_date(2025, 6, 1)), 0);
    }

    #[test]
    fn slab_outside_window() {
        let cfg = config();
        assert_eq!(slab_crossing_bonus(&cfg, 240, 20, utc_date(2024, 6, 1)), 0);
    }

    #[test]
    fn slab_guards_non_positive_inputs() {
        let cfg = config();
        assert_eq!(slab_crossing_bonus(&cfg, 240, 0, utc_date(2025, 6, 1)), 0);
        assert_eq!(slab_crossing_bonus(&cfg, 240, -20, utc_date(2025, 6, 1)), 0);
    }

    #[test]
    fn referral_fires_on_crossing() {
        let cfg = config();
        // 190 < 200 ≤ 205
        assert_eq!(referral_bonus(&cfg, 190, 15), 1000);
        // Landing exactly on the threshold counts.
        assert_eq!(referral_bonus(&cfg, 190, 10), 1000);
    }

    #[test]
    fn referral_does_not_refire() {
        let cfg = config();
        assert_eq!(referral_bonus(&cfg, 205, 10), 0);
        assert_eq!(referral_bonus(&cfg, 200, 10), 0);
    }

    #[test]
    fn referral_does_not_fire_short() {
        let cfg = config();
        assert_eq!(referral_bonus(&cfg, 190, 5), 0);
        assert_eq!(referral_bonus(&cfg, 190, 0), 0);
    }

    #[test]
    fn submission_points_sums_components() {
        let cfg = config();
        // 20 bags at 240 lifetime, inside the bonanza window:
        // base 20×1 + bonanza 20×3 + one slab boundary (250) crossed.
        assert_eq!(
            submission_points(&cfg, 240, 20, utc_date(2025, 9, 15)),
            20 + 60 + 500
        );
        // Crossing the referral threshold adds the one-shot bonus.
        assert_eq!(
            submission_points(&cfg, 190, 15, utc_date(2025, 5, 1)),
            15 + 1000
        );
    }

    #[test]
    fn redemption_cost_is_negative() {
        assert_eq!(redemption_cost(250, 2), -500);
    }

    #[test]
    fn redemption_cost_guards_non_positive() {
        assert_eq!(redemption_cost(250, 0), 0);
        assert_eq!(redemption_cost(250, -1), 0);
        assert_eq!(redemption_cost(0, 3), 0);
        assert_eq!(redemption_cost(-250, 3), 0);
    }
}
