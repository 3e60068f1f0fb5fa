/// Probability of accepting a raise proposal under a volume tilt of `q`
///
/// The ratio to [`lower_acceptance`] is `q`. Combined with
/// [`site_count_correction`] the chain weights a tiling by `q^volume`, and
/// `q = 1` gives one half in both directions.
pub fn raise_acceptance(q: f64) -> f64 {
    q / (1.0 + q)
}

/// Probability of accepting a lower proposal under a volume tilt of `q`
pub fn lower_acceptance(q: f64) -> f64 {
    1.0 / (1.0 + q)
}

/// Hastings factor for proposals drawn uniformly from the current site set
///
/// A move is proposed with probability `1 / current` and its reverse with
/// `1 / proposed`, so acceptance is scaled by `min(1, current / proposed)`.
/// An empty proposed set cannot follow a flip and is treated as no
/// correction.
pub fn site_count_correction(current: usize, proposed: usize) -> f64 {
    if proposed == 0 || proposed <= current {
        1.0
    } else {
        current as f64 / proposed as f64
    }
}

/// Check that a bias parameter can be used as a tilt
pub fn is_valid_bias(q: f64) -> bool {
    q.is_finite() && q > 0.0
}
