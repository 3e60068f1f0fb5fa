use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over the vertices of a square grid
///
/// Vertex `(x, y)` is stored at bit `x * extent + y`, so a vertex is either
/// present or absent and can never be counted twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteSet {
    bits: BitVec,
    extent: usize,
}

impl SiteSet {
    /// Create a set with no vertices present
    pub fn new(extent: usize) -> Self {
        Self {
            bits: bitvec![0; extent * extent],
            extent,
        }
    }

    /// Side length of the vertex grid
    pub const fn extent(&self) -> usize {
        self.extent
    }

    /// Insert a vertex; positions outside the grid are ignored
    pub fn insert(&mut self, x: usize, y: usize) {
        if x < self.extent && y < self.extent {
            self.bits.set(x * self.extent + y, true);
        }
    }

    /// Remove a vertex
    pub fn remove(&mut self, x: usize, y: usize) {
        if x < self.extent && y < self.extent {
            self.bits.set(x * self.extent + y, false);
        }
    }

    /// Test vertex membership
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.extent
            && y < self.extent
            && self.bits.get(x * self.extent + y).as_deref() == Some(&true)
    }

    /// Add every vertex of `other`
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Test if no vertices are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count vertices in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The `index`-th vertex in row-major order
    pub fn nth(&self, index: usize) -> Option<(usize, usize)> {
        self.iter().nth(index)
    }

    /// Iterate over present vertices in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let extent = self.extent;
        self.bits
            .iter_ones()
            .map(move |index| (index / extent, index % extent))
    }

    /// Collect all present vertices
    pub fn to_vec(&self) -> Vec<(usize, usize)> {
        self.iter().collect()
    }
}

impl fmt::Display for SiteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SiteSet({} sites: {:?})", self.count(), self.to_vec())
    }
}
