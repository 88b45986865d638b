//! # tenet-core
//!
//! Shared foundation for the Tenet standards-audit engine: error taxonomy,
//! layered configuration, event handler trait, and tracing setup.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
