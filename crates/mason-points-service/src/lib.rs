//! Mason Points HTTP API Service.
//!
//! This crate provides the HTTP API for the mason loyalty program,
//! including:
//!
//! - Mason enrollment and profile queries
//! - Bag lift submission, approval and rejection
//! - Reward redemption and fulfilment
//! - Slab achievement claims
//! - Manual adjustments and catalogue administration
//!
//! # Authentication
//!
//! The service supports two authentication methods:
//!
//! 1. **Mason JWT tokens** - HS256 bearer tokens for field-app requests
//! 2. **Operator API keys** - For back-office (TSO) requests
//!
//! All point movements go through ledger commands executed atomically by
//! the store; handlers only validate input, run the rule engine, and map
//! outcomes to HTTP responses.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Some handlers are async only for routing consistency

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
