//! Observability setup for TaxMitra.

pub mod tracing_setup;
