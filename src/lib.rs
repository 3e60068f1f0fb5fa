//! Markov chain Monte Carlo sampling of lozenge tilings of a hexagon
//!
//! A tiling is stored as a grid of triangle labels. The sampler repeatedly
//! finds every vertex where three lozenges form a flippable hexagon, proposes
//! one at random, and applies it subject to a volume-tilting bias.

#![forbid(unsafe_code)]

/// Flip-site search, bias policies and the sampler driver
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Hexagonal domain geometry and the mutable tiling state
pub mod lattice;
/// Geometry and probability helpers
pub mod math;

pub use io::error::{LozengeError, Result};
