//! Flip-site detection
//!
//! A lattice vertex is a flip site when the six triangles around it are
//! covered by exactly three lozenges. Walking the ring `tri0..tri5`, the
//! labels then form three equal adjacent pairs, each pair differing from its
//! neighbours. Pairs starting at even positions describe a concave corner
//! (a cube can be added); pairs starting at odd positions describe a convex
//! corner (a cube can be removed).

use ndarray::{Array2, ArrayView2, Axis, Slice, Zip};

use crate::algorithm::bitset::SiteSet;
use crate::lattice::tiling::TilingState;

/// Direction of a hexagon flip in the stacked-cube picture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipDirection {
    /// Pairs (tri0, tri1), (tri2, tri3), (tri4, tri5): adds a unit cube
    Raise,
    /// Pairs (tri1, tri2), (tri3, tri4), (tri5, tri0): removes a unit cube
    Lower,
}

impl FlipDirection {
    /// Direction the same site has after the flip
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Raise => Self::Lower,
            Self::Lower => Self::Raise,
        }
    }

    /// Change in cube count caused by a flip in this direction
    pub const fn volume_change(self) -> i64 {
        match self {
            Self::Raise => 1,
            Self::Lower => -1,
        }
    }
}

/// Classify the six labels around a vertex
///
/// Returns `None` when the ring matches neither pattern. Unlabelled
/// triangles (0) never take part in a flip.
pub fn classify(labels: &[u8; 6]) -> Option<FlipDirection> {
    let paired = |i: usize| -> bool {
        let a = labels.get(i).copied().unwrap_or(0);
        let b = labels.get((i + 1) % 6).copied().unwrap_or(0);
        a != 0 && a == b
    };

    let even = paired(0) && paired(2) && paired(4);
    let odd = paired(1) && paired(3) && paired(5);
    let any_even = paired(0) || paired(2) || paired(4);
    let any_odd = paired(1) || paired(3) || paired(5);

    if even && !any_odd {
        Some(FlipDirection::Raise)
    } else if odd && !any_even {
        Some(FlipDirection::Lower)
    } else {
        None
    }
}

/// All flip sites of a tiling, split by direction
///
/// Each vertex appears at most once: a vertex matches at most one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipSites {
    raise: SiteSet,
    lower: SiteSet,
}

impl FlipSites {
    /// Empty site collection over a vertex grid of the given extent
    pub fn new(extent: usize) -> Self {
        Self {
            raise: SiteSet::new(extent),
            lower: SiteSet::new(extent),
        }
    }

    /// Number of sites in either direction
    pub fn len(&self) -> usize {
        self.raise.count() + self.lower.count()
    }

    /// Whether no flip is possible
    pub fn is_empty(&self) -> bool {
        self.raise.is_empty() && self.lower.is_empty()
    }

    /// Number of sites where a cube can be added
    pub fn raise_count(&self) -> usize {
        self.raise.count()
    }

    /// Number of sites where a cube can be removed
    pub fn lower_count(&self) -> usize {
        self.lower.count()
    }

    /// Sites where a cube can be added
    pub const fn raise_sites(&self) -> &SiteSet {
        &self.raise
    }

    /// Sites where a cube can be removed
    pub const fn lower_sites(&self) -> &SiteSet {
        &self.lower
    }

    /// Whether `(x, y)` is a flip site in either direction
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.direction_of(x, y).is_some()
    }

    /// Direction of the flip available at `(x, y)`, if any
    pub fn direction_of(&self, x: usize, y: usize) -> Option<FlipDirection> {
        if self.raise.contains(x, y) {
            Some(FlipDirection::Raise)
        } else if self.lower.contains(x, y) {
            Some(FlipDirection::Lower)
        } else {
            None
        }
    }

    /// The `index`-th site, raise sites first
    pub fn get(&self, index: usize) -> Option<((usize, usize), FlipDirection)> {
        let raised = self.raise.count();
        if index < raised {
            self.raise.nth(index).map(|site| (site, FlipDirection::Raise))
        } else {
            self.lower
                .nth(index - raised)
                .map(|site| (site, FlipDirection::Lower))
        }
    }

    /// Iterate over all sites with their direction
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), FlipDirection)> + '_ {
        self.raise
            .iter()
            .map(|site| (site, FlipDirection::Raise))
            .chain(self.lower.iter().map(|site| (site, FlipDirection::Lower)))
    }

    /// All site positions regardless of direction
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.iter().map(|(site, _)| site).collect()
    }

    fn insert(&mut self, x: usize, y: usize, direction: FlipDirection) {
        match direction {
            FlipDirection::Raise => self.raise.insert(x, y),
            FlipDirection::Lower => self.lower.insert(x, y),
        }
    }
}

/// Mask of `a == b && a != 0` over two aligned views
fn paired_mask(a: &ArrayView2<'_, u8>, b: &ArrayView2<'_, u8>) -> Array2<bool> {
    Zip::from(a)
        .and(b)
        .map_collect(|&first, &second| first != 0 && first == second)
}

/// Vertex offsets whose hexagons share a triangle with the hexagon at the
/// origin: the vertex itself and its six lattice neighbours
///
/// A flip only changes labels seen by these seven vertices, so no other
/// vertex can gain or lose a flip site.
pub const FLIP_NEIGHBOURHOOD: [(isize, isize); 7] =
    [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// Restrict a vertex-indexed view to `x` along axis 0 and `y` along axis 1
fn shifted(view: ArrayView2<'_, u8>, x: Slice, y: Slice) -> ArrayView2<'_, u8> {
    view.slice_axis_move(Axis(0), x).slice_axis_move(Axis(1), y)
}

/// Find every flip site of the tiling
///
/// Compares six shifted views of the label grid in bulk; view `i` holds
/// `tri_i` for every vertex `(x, y)` with `1 <= x, y < 2N`. The result
/// matches [`classify`] applied vertex by vertex.
pub fn find_flip_sites(state: &TilingState) -> FlipSites {
    let labels = state.labels();
    let extent = state.domain().extent();
    let mut sites = FlipSites::new(extent);
    if extent < 2 {
        return sites;
    }

    let up = labels.index_axis(Axis(2), 0);
    let down = labels.index_axis(Axis(2), 1);

    let head = || Slice::from(1_isize..);
    let tail = || Slice::from(..-1_isize);
    let ring = [
        shifted(up, head(), head()),
        shifted(down, tail(), head()),
        shifted(up, tail(), head()),
        shifted(down, tail(), tail()),
        shifted(up, head(), tail()),
        shifted(down, head(), tail()),
    ];

    let [t0, t1, t2, t3, t4, t5] = &ring;
    let pairs = [
        paired_mask(t0, t1),
        paired_mask(t1, t2),
        paired_mask(t2, t3),
        paired_mask(t3, t4),
        paired_mask(t4, t5),
        paired_mask(t5, t0),
    ];
    let [p0, p1, p2, p3, p4, p5] = &pairs;

    let even_all = Zip::from(p0)
        .and(p2)
        .and(p4)
        .map_collect(|&a, &b, &c| a && b && c);
    let odd_all = Zip::from(p1)
        .and(p3)
        .and(p5)
        .map_collect(|&a, &b, &c| a && b && c);
    let even_any = Zip::from(p0)
        .and(p2)
        .and(p4)
        .map_collect(|&a, &b, &c| a || b || c);
    let odd_any = Zip::from(p1)
        .and(p3)
        .and(p5)
        .map_collect(|&a, &b, &c| a || b || c);

    let directions = Zip::from(&even_all)
        .and(&odd_all)
        .and(&even_any)
        .and(&odd_any)
        .map_collect(|&even, &odd, &any_even, &any_odd| {
            if even && !any_odd {
                Some(FlipDirection::Raise)
            } else if odd && !any_even {
                Some(FlipDirection::Lower)
            } else {
                None
            }
        });

    for ((i, j), direction) in directions.indexed_iter() {
        if let Some(direction) = *direction {
            sites.insert(i + 1, j + 1, direction);
        }
    }

    sites
}

/// Reference implementation of [`find_flip_sites`] classifying one vertex at
/// a time
pub fn find_flip_sites_scalar(state: &TilingState) -> FlipSites {
    let extent = state.domain().extent();
    let mut sites = FlipSites::new(extent);
    for x in 1..extent {
        for y in 1..extent {
            let direction = state.hexagon(x, y).ok().and_then(|labels| classify(&labels));
            if let Some(direction) = direction {
                sites.insert(x, y, direction);
            }
        }
    }
    sites
}

/// Number of flip sites among `(x, y)` and its six neighbours
///
/// Vertices without a complete ring inside the box are skipped. Counting
/// before and after a flip at `(x, y)` gives the change in the total number
/// of sites without a full search.
pub fn count_sites_near(state: &TilingState, x: usize, y: usize) -> usize {
    FLIP_NEIGHBOURHOOD
        .iter()
        .filter_map(|&(dx, dy)| Some((x.checked_add_signed(dx)?, y.checked_add_signed(dy)?)))
        .filter(|&(nx, ny)| {
            state
                .hexagon(nx, ny)
                .ok()
                .and_then(|labels| classify(&labels))
                .is_some()
        })
        .count()
}
