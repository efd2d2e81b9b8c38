//! Mason-Points Client SDK.
//!
//! This crate provides a client library for field apps and back-office
//! tools to interact with the mason-points API.
//!
//! # Example
//!
//! ```no_run
//! use mason_points_client::{MasonPointsClient, SubmitLiftRequest};
//!
//! # async fn example() -> Result<(), mason_points_client::ClientError> {
//! let client = MasonPointsClient::new("http://mason-points.loyalty.svc:8080");
//!
//! // Submit a purchase for approval
//! let lift = client.submit_lift("mason-jwt", SubmitLiftRequest {
//!     dealer_id: "dealer-uuid".to_string(),
//!     bag_count: 20,
//!     purchase_date: None,
//! }).await?;
//!
//! println!("Pending lift {} worth {} points", lift.id, lift.points_credited);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, MasonPointsClient};
pub use error::ClientError;
pub use types::*;
