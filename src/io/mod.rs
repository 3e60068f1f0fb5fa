//! Persistence, rendering, command-line handling and errors

/// Command-line interface and run orchestration
pub mod cli;
/// Sampler constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG rendering of tilings
pub mod image;
/// Label to colour mapping
pub mod palette;
/// Snapshot files
pub mod persistence;
/// Progress bar for sampler runs
pub mod progress;
/// Checkpoint animation capture
pub mod visualization;
