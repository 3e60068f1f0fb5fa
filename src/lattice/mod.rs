//! Lattice geometry and tiling state
//!
//! This module contains:
//! - The hexagonal domain and its minimal tiling
//! - The mutable label grid with the hexagon flip

/// Domain membership, sectors and the minimal tiling
pub mod domain;
/// Label grid, flips and snapshots
pub mod tiling;

pub use domain::HexDomain;
pub use tiling::{Snapshot, TilingState};
