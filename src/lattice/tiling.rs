//! Mutable lozenge tiling state
//!
//! Every triangle of the padded box carries a label: 0 outside the hexagon,
//! 1..=3 for the orientation of the lozenge that covers it inside. The only
//! mutation the sampler performs is the hexagon flip, which rotates the three
//! lozenges around a lattice vertex.

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::algorithm::sites::{FlipDirection, classify};
use crate::io::error::{LozengeError, Result, out_of_range};
use crate::lattice::domain::HexDomain;

/// Offsets `(dx, dy, orientation)` of the six triangles around a vertex
///
/// Walking this ring, triangles `i` and `i + 1` share an edge incident to
/// the vertex. The flip swaps triangle `i` with triangle `i + 3`.
pub const HEXAGON_RING: [(isize, isize, usize); 6] = [
    (0, 0, 0),
    (-1, 0, 1),
    (-1, 0, 0),
    (-1, -1, 1),
    (0, -1, 0),
    (0, -1, 1),
];

/// Owned copy of a tiling, used for persistence and rollback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Side length of the hexagon the labels belong to
    pub size: usize,
    /// Labels indexed by (x, y, orientation)
    pub cells: Array3<u8>,
}

/// Current tiling of a hexagonal domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilingState {
    domain: HexDomain,
    cells: Array3<u8>,
}

impl TilingState {
    /// Create a domain of the given side length filled with the minimal tiling
    ///
    /// # Errors
    ///
    /// Returns an error if the size is rejected by [`HexDomain::new`]
    pub fn new(size: usize) -> Result<Self> {
        let domain = HexDomain::new(size)?;
        Ok(Self::minimal(domain))
    }

    /// Fill a grid for `domain` with its minimal tiling
    pub fn minimal(domain: HexDomain) -> Self {
        let cells = Array3::from_shape_fn(domain.dimensions(), |(x, y, o)| {
            domain.minimal_label(x, y, o)
        });
        Self { domain, cells }
    }

    /// Reset every cell to the minimal tiling
    pub fn fill_minimal(&mut self) {
        let domain = self.domain;
        self.cells
            .indexed_iter_mut()
            .for_each(|((x, y, o), label)| *label = domain.minimal_label(x, y, o));
    }

    /// Domain geometry
    pub const fn domain(&self) -> &HexDomain {
        &self.domain
    }

    /// Side length of the hexagon
    pub const fn size(&self) -> usize {
        self.domain.size()
    }

    /// Read-only view of the label grid
    pub const fn labels(&self) -> &Array3<u8> {
        &self.cells
    }

    /// Label at a coordinate of the padded box
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the padded box
    pub fn get(&self, x: usize, y: usize, orientation: usize) -> Result<u8> {
        self.cells
            .get([x, y, orientation])
            .copied()
            .ok_or_else(|| out_of_range((x, y, orientation), self.domain.dimensions()))
    }

    /// Overwrite the label at a coordinate
    ///
    /// Bypasses tiling validity; intended for constructing states by hand.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the padded box
    pub fn set(&mut self, x: usize, y: usize, orientation: usize, label: u8) -> Result<()> {
        let dimensions = self.domain.dimensions();
        let cell = self
            .cells
            .get_mut([x, y, orientation])
            .ok_or_else(|| out_of_range((x, y, orientation), dimensions))?;
        *cell = label;
        Ok(())
    }

    /// Coordinates of the six triangles around vertex `(x, y)` in ring order
    ///
    /// # Errors
    ///
    /// Returns `SiteOutOfRange` if any of the six triangles falls outside
    /// the box
    pub fn hexagon_cells(&self, x: usize, y: usize) -> Result<[(usize, usize, usize); 6]> {
        let mut coordinates = [(0, 0, 0); 6];
        for (slot, &(dx, dy, o)) in coordinates.iter_mut().zip(HEXAGON_RING.iter()) {
            let cx = x.checked_add_signed(dx);
            let cy = y.checked_add_signed(dy);
            match (cx, cy) {
                (Some(cx), Some(cy)) if self.domain.in_bounds(cx, cy, o) => *slot = (cx, cy, o),
                _ => {
                    return Err(LozengeError::SiteOutOfRange {
                        site: (x, y),
                        extent: self.domain.extent(),
                    });
                }
            }
        }
        Ok(coordinates)
    }

    /// Labels of the six triangles around vertex `(x, y)` in ring order
    ///
    /// # Errors
    ///
    /// Returns `SiteOutOfRange` if the vertex has no complete ring inside the box
    pub fn hexagon(&self, x: usize, y: usize) -> Result<[u8; 6]> {
        let coordinates = self.hexagon_cells(x, y)?;
        let mut labels = [0; 6];
        for (label, &(cx, cy, o)) in labels.iter_mut().zip(coordinates.iter()) {
            *label = self.get(cx, cy, o)?;
        }
        Ok(labels)
    }

    /// Flip the hexagon around `(x, y)` after checking that it is flippable
    ///
    /// Returns the direction of the flip that was applied. Applying the flip
    /// twice restores the original labels.
    ///
    /// # Errors
    ///
    /// - `SiteOutOfRange` if the vertex has no complete ring inside the box
    /// - `InvalidFlip` if the six labels match neither flip pattern; the
    ///   state is left untouched
    pub fn apply_flip(&mut self, x: usize, y: usize) -> Result<FlipDirection> {
        let labels = self.hexagon(x, y)?;
        let direction = classify(&labels).ok_or(LozengeError::InvalidFlip {
            site: (x, y),
            labels,
        })?;
        self.apply_flip_unchecked(x, y)?;
        Ok(direction)
    }

    /// Swap triangle `i` with triangle `i + 3` around `(x, y)` without
    /// checking the flip patterns
    ///
    /// Applied at a site that is not flippable this breaks the tiling, so
    /// callers must take the site from the flip-site finder.
    ///
    /// # Errors
    ///
    /// Returns `SiteOutOfRange` if the vertex has no complete ring inside the box
    pub fn apply_flip_unchecked(&mut self, x: usize, y: usize) -> Result<()> {
        let coordinates = self.hexagon_cells(x, y)?;
        for i in 0..3 {
            let (Some(&a), Some(&b)) = (coordinates.get(i), coordinates.get(i + 3)) else {
                continue;
            };
            let first = self.get(a.0, a.1, a.2)?;
            let second = self.get(b.0, b.1, b.2)?;
            self.set(a.0, a.1, a.2, second)?;
            self.set(b.0, b.1, b.2, first)?;
        }
        Ok(())
    }

    /// Copy the full label grid out
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size(),
            cells: self.cells.clone(),
        }
    }

    /// Replace the full label grid with a snapshot
    ///
    /// # Errors
    ///
    /// Returns `SnapshotMismatch` if the snapshot was taken from a domain of
    /// another size or its grid has the wrong shape; the state is unchanged
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let (ex, ey, eo) = self.domain.dimensions();
        if snapshot.size != self.size() || snapshot.cells.shape() != [ex, ey, eo] {
            return Err(LozengeError::SnapshotMismatch {
                expected: self.size(),
                found: snapshot.size,
            });
        }
        self.cells.assign(&snapshot.cells);
        Ok(())
    }

    /// Build a state directly from a snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot size is invalid or its grid shape does
    /// not match that size
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut state = Self::new(snapshot.size)?;
        state.restore(snapshot)?;
        Ok(state)
    }

    /// Iterate over `(x, y, orientation, label)` for every cell of the box
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize, u8)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y, o), &label)| (x, y, o, label))
    }

    /// Number of triangles carrying each label, indexed by label
    pub fn label_counts(&self) -> Vec<usize> {
        let max_label = self.max_label() as usize;
        let mut counts = vec![0; max_label + 1];
        for &label in &self.cells {
            if let Some(count) = counts.get_mut(label as usize) {
                *count += 1;
            }
        }
        counts
    }

    /// Largest label present in the grid
    pub fn max_label(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Check that labels agree with the domain
    ///
    /// Every triangle of the hexagon must be covered (label >= 1) and every
    /// triangle outside it must be empty (label 0).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending coordinate
    pub fn check_invariants(&self) -> Result<()> {
        for ((x, y, o), &label) in self.cells.indexed_iter() {
            let inside = self.domain.is_in_domain(x, y, o);
            if inside == (label == 0) {
                return Err(crate::io::error::invalid_parameter(
                    "label",
                    &format!("{label} at ({x}, {y}, {o})"),
                    &if inside {
                        "triangle inside the hexagon is uncovered"
                    } else {
                        "triangle outside the hexagon is covered"
                    },
                ));
            }
        }
        Ok(())
    }
}
