//! Conversation logic and persistence ports for TaxMitra.
//!
//! This crate holds the message-formatting pipeline, the rule-based response
//! engine, the in-memory session stores, and the `SlotStore` "port" that the
//! infrastructure layer implements. It depends only on `taxmitra-types` --
//! never on `taxmitra-infra` or any IO crate beyond the async runtime.

pub mod controller;
pub mod engine;
pub mod markup;
pub mod persistence;
pub mod store;
