//! Sprout CLI library.
//!
//! Command implementations for the `sprout` binary: listing the catalog,
//! rendering sounds and sequences to WAV, and editing persisted settings.

pub mod commands;
pub mod logging;
