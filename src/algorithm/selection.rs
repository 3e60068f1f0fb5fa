use crate::{
    algorithm::sites::{FlipDirection, FlipSites},
    io::error::{Result, invalid_parameter},
    math::probability::{is_valid_bias, lower_acceptance, raise_acceptance},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Acceptance rule deciding whether a proposed flip is applied
pub trait BiasPolicy {
    /// Probability of applying a proposed flip in `direction`
    fn acceptance(&self, direction: FlipDirection) -> f64;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Metropolis coin tilted towards adding (`q > 1`) or removing (`q < 1`) cubes
///
/// A raise is accepted with probability `q / (1 + q)` and a lower with
/// probability `1 / (1 + q)`, before the sampler's site-count correction;
/// `q = 1` is the unbiased chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetropolisBias {
    q: f64,
}

impl MetropolisBias {
    /// Create a tilted acceptance rule
    ///
    /// # Errors
    ///
    /// Returns an error if `q` is not a finite positive number
    pub fn new(q: f64) -> Result<Self> {
        if !is_valid_bias(q) {
            return Err(invalid_parameter(
                "bias",
                &q,
                &"bias must be a finite positive number",
            ));
        }
        Ok(Self { q })
    }

    /// The tilt parameter
    pub const fn q(&self) -> f64 {
        self.q
    }
}

impl Default for MetropolisBias {
    fn default() -> Self {
        Self { q: 1.0 }
    }
}

impl BiasPolicy for MetropolisBias {
    fn acceptance(&self, direction: FlipDirection) -> f64 {
        match direction {
            FlipDirection::Raise => raise_acceptance(self.q),
            FlipDirection::Lower => lower_acceptance(self.q),
        }
    }

    fn name(&self) -> &'static str {
        "metropolis"
    }
}

/// Never rejects on direction
///
/// Only the sampler's site-count correction can reject a proposal, so the
/// chain is uniform over tilings with fewer rejections than `q = 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysAccept;

impl BiasPolicy for AlwaysAccept {
    fn acceptance(&self, _direction: FlipDirection) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "always"
    }
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one flip site uniformly at random
    pub fn choose_site(&mut self, sites: &FlipSites) -> Option<((usize, usize), FlipDirection)> {
        if sites.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..sites.len());
        sites.get(index)
    }

    /// Draw a coin that lands true with the given probability
    ///
    /// Probabilities outside `[0, 1]` are clamped.
    pub fn accept(&mut self, probability: f64) -> bool {
        let p = probability.clamp(0.0, 1.0);
        self.rng.random::<f64>() < p
    }
}
