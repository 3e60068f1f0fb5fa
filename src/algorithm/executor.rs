use crate::{
    algorithm::selection::{BiasPolicy, MetropolisBias, RandomSelector},
    algorithm::sites::{FlipDirection, count_sites_near, find_flip_sites},
    io::configuration::{DEFAULT_BIAS, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_SEED},
    io::error::{Result, invalid_parameter},
    lattice::tiling::TilingState,
    math::probability::{is_valid_bias, site_count_correction},
};

/// Sampler parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Volume tilt `q`; 1 samples uniformly
    pub bias: f64,
    /// Iterations between checkpoints
    pub checkpoint_interval: usize,
    /// Seed of the random generator
    pub seed: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            bias: DEFAULT_BIAS,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            seed: DEFAULT_SEED,
        }
    }
}

impl SamplerConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the bias is not a finite positive number or the
    /// checkpoint interval is zero
    pub fn validate(&self) -> Result<()> {
        if !is_valid_bias(self.bias) {
            return Err(invalid_parameter(
                "bias",
                &self.bias,
                &"bias must be a finite positive number",
            ));
        }
        if self.checkpoint_interval == 0 {
            return Err(invalid_parameter(
                "checkpoint_interval",
                &self.checkpoint_interval,
                &"checkpoint interval must be at least one iteration",
            ));
        }
        Ok(())
    }
}

/// Result of a single sampler iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A flip was proposed and applied
    Flipped {
        /// Vertex that was flipped
        site: (usize, usize),
        /// Direction of the applied flip
        direction: FlipDirection,
    },
    /// A flip was proposed and rejected by the bias policy
    Rejected {
        /// Vertex that was proposed
        site: (usize, usize),
        /// Direction of the rejected flip
        direction: FlipDirection,
    },
    /// The tiling had no flip site
    NoMoves,
}

/// Running totals over the lifetime of a sampler
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplerStats {
    /// Applied flips that added a cube
    pub raises: usize,
    /// Applied flips that removed a cube
    pub lowers: usize,
    /// Proposals rejected by the bias policy
    pub rejections: usize,
    /// Iterations that found no flip site
    pub idle: usize,
}

impl SamplerStats {
    /// Total applied flips
    pub const fn flips(&self) -> usize {
        self.raises + self.lowers
    }

    /// Cubes added minus cubes removed
    pub const fn net_volume(&self) -> i64 {
        self.raises as i64 - self.lowers as i64
    }

    fn record(&mut self, outcome: IterationOutcome) {
        match outcome {
            IterationOutcome::Flipped {
                direction: FlipDirection::Raise,
                ..
            } => self.raises += 1,
            IterationOutcome::Flipped {
                direction: FlipDirection::Lower,
                ..
            } => self.lowers += 1,
            IterationOutcome::Rejected { .. } => self.rejections += 1,
            IterationOutcome::NoMoves => self.idle += 1,
        }
    }
}

/// Checkpoint handed to observers every `checkpoint_interval` iterations
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint<'a> {
    /// Iteration that just completed
    pub iteration: usize,
    /// Tiling after that iteration
    pub state: &'a TilingState,
    /// Totals so far
    pub stats: SamplerStats,
}

/// Markov chain over lozenge tilings driven by hexagon flips
///
/// Each iteration finds every flip site and proposes one uniformly at random.
/// The proposal is accepted with the bias policy's probability scaled by
/// `min(1, n / n')`, where `n` and `n'` are the site counts before and after
/// the flip. With [`MetropolisBias`] the stationary weight of a tiling is
/// `q^volume`.
pub struct LozengeSampler<P: BiasPolicy = MetropolisBias> {
    /// Current tiling
    pub state: TilingState,
    /// Acceptance rule for proposals
    pub policy: P,
    /// Random number generator for site choice and acceptance
    pub random_selector: RandomSelector,
    /// Sampler parameters
    pub config: SamplerConfig,
    /// Completed iterations
    pub iteration: usize,
    /// Running totals
    pub stats: SamplerStats,
}

impl LozengeSampler<MetropolisBias> {
    /// Create a sampler with the Metropolis tilt from `config.bias`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(state: TilingState, config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        let policy = MetropolisBias::new(config.bias)?;
        Self::with_policy(state, config, policy)
    }
}

impl<P: BiasPolicy> LozengeSampler<P> {
    /// Create a sampler with a custom acceptance rule
    ///
    /// `config.bias` is only validated; the policy decides acceptance.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_policy(state: TilingState, config: SamplerConfig, policy: P) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            size = state.size(),
            bias = config.bias,
            checkpoint_interval = config.checkpoint_interval,
            seed = config.seed,
            policy = policy.name(),
            "sampler created"
        );
        Ok(Self {
            state,
            policy,
            random_selector: RandomSelector::new(config.seed),
            config,
            iteration: 0,
            stats: SamplerStats::default(),
        })
    }

    /// Access the current tiling
    pub const fn state(&self) -> &TilingState {
        &self.state
    }

    /// Consume the sampler and return the tiling
    pub fn into_state(self) -> TilingState {
        self.state
    }

    /// Run a single find, select, apply step
    ///
    /// The chosen flip is applied tentatively to count the sites of the
    /// proposed tiling around it; a rejected flip is swapped back.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen site fails validation, which means the
    /// tiling was corrupted between finding and applying
    pub fn run_iteration(&mut self) -> Result<IterationOutcome> {
        self.iteration += 1;

        let sites = find_flip_sites(&self.state);
        let Some((site, direction)) = self.random_selector.choose_site(&sites) else {
            self.stats.record(IterationOutcome::NoMoves);
            return Ok(IterationOutcome::NoMoves);
        };
        let (x, y) = site;

        let current = sites.len();
        let before = count_sites_near(&self.state, x, y);
        let applied = self.state.apply_flip(x, y)?;
        let after = count_sites_near(&self.state, x, y);
        let proposed = current.saturating_sub(before) + after;

        let probability =
            self.policy.acceptance(direction) * site_count_correction(current, proposed);
        let outcome = if self.random_selector.accept(probability) {
            IterationOutcome::Flipped {
                site,
                direction: applied,
            }
        } else {
            self.state.apply_flip_unchecked(x, y)?;
            IterationOutcome::Rejected { site, direction }
        };

        tracing::trace!(
            iteration = self.iteration,
            current,
            proposed,
            ?outcome,
            "iteration"
        );
        self.stats.record(outcome);
        Ok(outcome)
    }

    /// Whether the last completed iteration falls on a checkpoint
    pub const fn at_checkpoint(&self) -> bool {
        self.iteration > 0
            && matches!(self.iteration.checked_rem(self.config.checkpoint_interval), Some(0))
    }

    /// Current checkpoint view
    pub const fn checkpoint(&self) -> Checkpoint<'_> {
        Checkpoint {
            iteration: self.iteration,
            state: &self.state,
            stats: self.stats,
        }
    }

    /// Run `iterations` steps, calling `on_checkpoint` at every checkpoint
    ///
    /// # Errors
    ///
    /// Returns the first error from an iteration or from the observer
    pub fn run<F>(&mut self, iterations: usize, mut on_checkpoint: F) -> Result<SamplerStats>
    where
        F: FnMut(Checkpoint<'_>) -> Result<()>,
    {
        for _ in 0..iterations {
            self.run_iteration()?;
            if self.at_checkpoint() {
                on_checkpoint(self.checkpoint())?;
            }
        }
        Ok(self.stats)
    }
}
