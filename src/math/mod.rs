//! Mathematical utilities for the sampler and the renderer

/// Planar embedding of the triangular lattice
pub mod geometry;
/// Acceptance probabilities for the volume-tilted chain
pub mod probability;
