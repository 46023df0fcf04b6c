//! # Phaseline application library
//!
//! Exposes the HTTP API and CLI modules for the `phaseline` binary
//! and for integration tests (`phaseline::api::*`).

pub mod api;
pub mod cli;
