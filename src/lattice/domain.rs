//! Hexagonal domain geometry over the triangular lattice
//!
//! Triangles are addressed as `(x, y, orientation)` inside a padded
//! `2N x 2N x 2` box. Orientation 0 is the up triangle with lattice vertices
//! `(x, y), (x+1, y), (x, y+1)`; orientation 1 is the down triangle with
//! vertices `(x+1, y), (x+1, y+1), (x, y+1)`. The hexagon of side `N` is the
//! band `N <= x + y + orientation < 3N` of that box.

use crate::io::configuration::MAX_DOMAIN_SIZE;
use crate::io::error::{Result, invalid_parameter};

/// Number of triangle orientations per unit cell
pub const ORIENTATIONS: usize = 2;

/// Number of rotational sectors of the hexagon
pub const SECTOR_COUNT: u8 = 6;

/// Largest label produced by the minimal tiling
pub const MAX_LOZENGE_LABEL: u8 = 3;

/// Geometry of a hexagon with side length `size`
///
/// All predicates are pure functions of the coordinates; the domain owns no
/// cell data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexDomain {
    size: usize,
}

impl HexDomain {
    /// Create a domain with the given side length
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or exceeds `MAX_DOMAIN_SIZE`
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(invalid_parameter(
                "size",
                &size,
                &"hexagon side length must be positive",
            ));
        }
        if size > MAX_DOMAIN_SIZE {
            return Err(invalid_parameter(
                "size",
                &size,
                &format!("hexagon side length must not exceed {MAX_DOMAIN_SIZE}"),
            ));
        }
        Ok(Self { size })
    }

    /// Side length of the hexagon
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Extent of the padded box along x and y
    pub const fn extent(&self) -> usize {
        2 * self.size
    }

    /// Shape of the backing grid as (x, y, orientation)
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        (self.extent(), self.extent(), ORIENTATIONS)
    }

    /// Whether the coordinate lies in the padded box
    pub const fn in_bounds(&self, x: usize, y: usize, orientation: usize) -> bool {
        x < self.extent() && y < self.extent() && orientation < ORIENTATIONS
    }

    /// Whether the triangle belongs to the hexagon
    pub const fn is_in_domain(&self, x: usize, y: usize, orientation: usize) -> bool {
        if !self.in_bounds(x, y, orientation) {
            return false;
        }
        let level = x + y + orientation;
        self.size <= level && level < 3 * self.size
    }

    /// Sector of the hexagon containing the triangle, in `0..6`
    ///
    /// Three half-plane tests (`x < N`, `x + y + o >= 2N`, `y >= N`) are
    /// folded into an index that steps by one across every sector boundary.
    pub const fn sector(&self, x: usize, y: usize, orientation: usize) -> u8 {
        let left = (x < self.size) as i64;
        let upper = (x + y + orientation >= 2 * self.size) as i64;
        let top = (y >= self.size) as i64;
        let crossings = left + upper + top;

        let raw = -2 + 6 * (1 - upper) + (2 * upper - 1) * crossings;
        raw.rem_euclid(SECTOR_COUNT as i64) as u8
    }

    /// Label of the triangle in the minimal ("empty room") tiling
    ///
    /// Returns 0 outside the hexagon.
    pub const fn minimal_label(&self, x: usize, y: usize, orientation: usize) -> u8 {
        if self.is_in_domain(x, y, orientation) {
            1 + self.sector(x, y, orientation) / 2
        } else {
            0
        }
    }

    /// Iterate over every coordinate of the padded box
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + use<> {
        let extent = self.extent();
        (0..extent).flat_map(move |x| {
            (0..extent).flat_map(move |y| (0..ORIENTATIONS).map(move |o| (x, y, o)))
        })
    }

    /// Count the triangles inside the hexagon by enumeration
    pub fn domain_cell_count(&self) -> usize {
        self.cells()
            .filter(|&(x, y, o)| self.is_in_domain(x, y, o))
            .count()
    }

    /// Vertex at the centre of the hexagon
    pub const fn center(&self) -> (usize, usize) {
        (self.size, self.size)
    }
}
