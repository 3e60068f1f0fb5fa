//! Command-line interface for running the sampler and writing its outputs

use crate::algorithm::executor::{LozengeSampler, SamplerConfig, SamplerStats};
use crate::io::configuration::{
    ANIMATION_SUFFIX, DEFAULT_BIAS, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_IMAGE_PIXELS,
    DEFAULT_ITERATIONS, DEFAULT_RUN_NAME, DEFAULT_SEED, GIF_FRAME_DELAY_MS, IMAGE_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{RenderConfig, export_tiling_as_png};
use crate::io::palette::Palette;
use crate::io::persistence::{load_snapshot, save_snapshot};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::lattice::tiling::TilingState;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lozenge")]
#[command(
    author,
    version,
    about = "Sample random lozenge tilings of a hexagon by Markov chain Monte Carlo"
)]
/// Command-line arguments for the sampler
// Output toggles are independent switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Side length of the hexagon
    #[arg(value_name = "SIZE")]
    pub size: usize,

    /// Number of sampler iterations
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Random seed for reproducible sampling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Volume tilt q (1 is unbiased, >1 favours adding cubes)
    #[arg(short, long, default_value_t = DEFAULT_BIAS)]
    pub bias: f64,

    /// Iterations between checkpoints (snapshot, image and animation frame)
    #[arg(short, long, default_value_t = DEFAULT_CHECKPOINT_INTERVAL)]
    pub checkpoint_interval: usize,

    /// Name used for snapshot and image files
    #[arg(short, long, default_value = DEFAULT_RUN_NAME)]
    pub name: String,

    /// Directory for all outputs
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Continue from the snapshot saved under NAME instead of the minimal tiling
    #[arg(short, long)]
    pub resume: bool,

    /// Record checkpoints as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Colour labels along a continuous ramp instead of the discrete palette
    #[arg(long)]
    pub continuous: bool,

    /// Discrete palette as comma separated hex colours, label 0 first
    #[arg(long, value_delimiter = ',')]
    pub palette: Option<Vec<String>>,

    /// Width of rendered images in pixels
    #[arg(short, long, default_value_t = DEFAULT_IMAGE_PIXELS)]
    pub pixels: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-run details
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for the chosen verbosity
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Sampler parameters from the arguments
    pub const fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            bias: self.bias,
            checkpoint_interval: self.checkpoint_interval,
            seed: self.seed,
        }
    }

    /// Rendering parameters from the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if a palette entry is not a valid hex colour
    pub fn render_config(&self) -> Result<RenderConfig> {
        let palette = if self.continuous {
            Palette::Continuous
        } else if let Some(entries) = &self.palette {
            Palette::from_hex(entries)?
        } else {
            Palette::default()
        };
        Ok(RenderConfig {
            pixels: self.pixels,
            palette,
        })
    }

    /// Path of the rendered tiling
    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}{IMAGE_SUFFIX}", self.name))
    }

    /// Path of the checkpoint animation
    pub fn animation_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}{ANIMATION_SUFFIX}", self.name))
    }
}

/// Files written and totals collected by a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Totals over the run
    pub stats: SamplerStats,
    /// Iterations performed
    pub iterations: usize,
    /// Final snapshot file
    pub snapshot_path: PathBuf,
    /// Final rendered image
    pub image_path: PathBuf,
    /// Checkpoint animation, when requested
    pub animation_path: Option<PathBuf>,
}

/// Orchestrates one sampler run with checkpoints and outputs
pub struct SamplingRun {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SamplingRun {
    /// Create a run for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli
            .should_show_progress()
            .then(|| ProgressManager::new(cli.iterations));

        Self {
            cli,
            progress_manager,
        }
    }

    /// Starting tiling: the saved snapshot when resuming, otherwise minimal
    ///
    /// # Errors
    ///
    /// Returns an error if the size is invalid, or when resuming, if the
    /// snapshot cannot be read or belongs to a different size
    pub fn initial_state(&self) -> Result<TilingState> {
        let mut state = TilingState::new(self.cli.size)?;
        if self.cli.resume {
            let snapshot = load_snapshot(&self.cli.output_dir, &self.cli.name)?;
            state.restore(&snapshot)?;
            state.check_invariants()?;
            tracing::info!(name = %self.cli.name, "resumed from snapshot");
        }
        Ok(state)
    }

    /// Run the sampler, saving and rendering at every checkpoint and at the end
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation, a flip, or any output
    /// write fails
    pub fn process(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let render_config = self.cli.render_config()?;
        let state = self.initial_state()?;
        let mut sampler = LozengeSampler::new(state, self.cli.sampler_config())?;

        let mut visualization = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(render_config.clone()));
        if let Some(viz) = visualization.as_mut() {
            viz.record(0, sampler.state())?;
        }

        let mut snapshot_path = None;
        for _ in 0..self.cli.iterations {
            sampler.run_iteration()?;

            if let Some(ref pm) = self.progress_manager {
                pm.update(sampler.iteration, &sampler.stats);
            }

            if sampler.at_checkpoint() {
                snapshot_path = Some(self.write_outputs(&sampler, &render_config)?);
                if let Some(viz) = visualization.as_mut() {
                    viz.record(sampler.iteration, sampler.state())?;
                }
                tracing::info!(
                    iteration = sampler.iteration,
                    flips = sampler.stats.flips(),
                    net_volume = sampler.stats.net_volume(),
                    "checkpoint saved"
                );
            }
        }

        let snapshot_path = match snapshot_path {
            Some(path) if sampler.at_checkpoint() => path,
            _ => self.write_outputs(&sampler, &render_config)?,
        };

        let animation_path = match visualization {
            Some(mut viz) => {
                if !sampler.at_checkpoint() {
                    viz.record(sampler.iteration, sampler.state())?;
                }
                let path = self.cli.animation_path();
                viz.export_gif(&path, GIF_FRAME_DELAY_MS)?;
                Some(path)
            }
            None => None,
        };

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if sampler.stats.flips() == 0 && self.cli.iterations > 0 {
            tracing::warn!(
                iterations = self.cli.iterations,
                "no flip was applied during the run"
            );
        }

        tracing::info!(
            iterations = sampler.iteration,
            raises = sampler.stats.raises,
            lowers = sampler.stats.lowers,
            rejections = sampler.stats.rejections,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "sampling finished"
        );

        Ok(RunSummary {
            stats: sampler.stats,
            iterations: sampler.iteration,
            snapshot_path,
            image_path: self.cli.image_path(),
            animation_path,
        })
    }

    fn write_outputs(
        &self,
        sampler: &LozengeSampler,
        render_config: &RenderConfig,
    ) -> Result<PathBuf> {
        let path = save_snapshot(
            &self.cli.output_dir,
            &self.cli.name,
            &sampler.state().snapshot(),
        )?;
        export_tiling_as_png(sampler.state(), render_config, &self.cli.image_path())?;
        Ok(path)
    }
}
