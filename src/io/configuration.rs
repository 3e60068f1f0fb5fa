//! Sampler constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed hexagon side length
pub const MAX_DOMAIN_SIZE: usize = 2_000;

// Default values for configurable parameters
/// Fixed seed for reproducible sampling
pub const DEFAULT_SEED: u64 = 42;

/// Default number of sampler iterations
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Default volume tilt (unbiased)
pub const DEFAULT_BIAS: f64 = 1.0;

/// Default number of iterations between checkpoints
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 1_000;

/// Default name used for snapshot and image files
pub const DEFAULT_RUN_NAME: &str = "hexagon";

// Output settings
/// Suffix of snapshot files
pub const SNAPSHOT_SUFFIX: &str = "_points.bin";
/// Suffix of rendered images
pub const IMAGE_SUFFIX: &str = "_tiling.png";
/// Suffix of checkpoint animations
pub const ANIMATION_SUFFIX: &str = "_checkpoints.gif";
/// Default width of rendered images in pixels
pub const DEFAULT_IMAGE_PIXELS: u32 = 1_000;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 200;

// Colouring
/// Default discrete palette indexed by label: background then the three
/// lozenge orientations
pub const DEFAULT_PALETTE: [&str; 4] = ["#000000", "#ff7f50", "#f8c537", "#25ced1"];

/// Anchor colours of the continuous ramp, from low to high labels
pub const CONTINUOUS_RAMP: [[u8; 3]; 5] = [
    [0, 0, 4],
    [87, 16, 110],
    [188, 55, 84],
    [249, 142, 9],
    [252, 255, 164],
];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
