//! Planar embedding of the triangular lattice
//!
//! Lattice vertex `(i, j)` sits at `i * E0 - j * E240`, where `E0`, `E120`
//! and `E240` are the unit vectors at 0°, 120° and 240°. The three vectors
//! sum to zero, so the same embedding can be written with any two of them.

/// Unit vector at 0°
pub const E0: [f64; 2] = [1.0, 0.0];
/// Unit vector at 120°
pub const E120: [f64; 2] = [-0.5, 0.866_025_403_784_438_6];
/// Unit vector at 240°
pub const E240: [f64; 2] = [-0.5, -0.866_025_403_784_438_6];

/// Map a lattice vertex to the plane
pub fn lattice_to_plane(i: f64, j: f64) -> [f64; 2] {
    [
        i.mul_add(E0[0], -j * E240[0]),
        i.mul_add(E0[1], -j * E240[1]),
    ]
}

/// Corners of triangle `(x, y, orientation)` in the plane
///
/// Orientation 0 spans lattice vertices `(x, y), (x+1, y), (x, y+1)`;
/// orientation 1 spans `(x+1, y), (x+1, y+1), (x, y+1)`.
pub fn triangle_corners(x: usize, y: usize, orientation: usize) -> [[f64; 2]; 3] {
    let (i, j) = (x as f64, y as f64);
    if orientation == 0 {
        [
            lattice_to_plane(i, j),
            lattice_to_plane(i + 1.0, j),
            lattice_to_plane(i, j + 1.0),
        ]
    } else {
        [
            lattice_to_plane(i + 1.0, j),
            lattice_to_plane(i + 1.0, j + 1.0),
            lattice_to_plane(i, j + 1.0),
        ]
    }
}

fn edge_side(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    (b[0] - a[0]).mul_add(p[1] - a[1], -((b[1] - a[1]) * (p[0] - a[0])))
}

/// Whether `point` lies inside or on the boundary of `triangle`
pub fn triangle_contains(triangle: &[[f64; 2]; 3], point: [f64; 2]) -> bool {
    let [a, b, c] = *triangle;
    let d1 = edge_side(a, b, point);
    let d2 = edge_side(b, c, point);
    let d3 = edge_side(c, a, point);

    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

/// Axis-aligned bounds `(min, max)` of a set of points
pub fn bounds(points: impl IntoIterator<Item = [f64; 2]>) -> Option<([f64; 2], [f64; 2])> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((min, max)) => Some((
            [min[0].min(p[0]), min[1].min(p[1])],
            [max[0].max(p[0]), max[1].max(p[1])],
        )),
    })
}
