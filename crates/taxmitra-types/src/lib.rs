//! Shared domain types for TaxMitra.
//!
//! This crate contains the core domain types used across the TaxMitra chat
//! core: conversation turns, the business profile, runtime configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod profile;
