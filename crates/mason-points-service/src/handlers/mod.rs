//! HTTP request handlers.

pub mod adjustments;
pub mod health;
pub mod lifts;
pub mod masons;
pub mod redemptions;
pub mod rewards;
pub mod slabs;
