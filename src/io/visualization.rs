//! Checkpoint frame capture and GIF export

use crate::io::error::{LozengeError, Result};
use crate::io::image::{RenderConfig, render_tiling};
use crate::lattice::tiling::TilingState;
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// How many times longer the last frame stays on screen
const FINAL_FRAME_HOLD: u32 = 10;

/// Captures rendered tilings at sampler checkpoints
///
/// Each capture renders the tiling immediately, so later flips do not
/// affect earlier frames.
pub struct VisualizationCapture {
    frames: Vec<(usize, RgbaImage)>,
    render_config: RenderConfig,
}

impl VisualizationCapture {
    /// Create an empty capture rendering with the given configuration
    pub const fn new(render_config: RenderConfig) -> Self {
        Self {
            frames: Vec::new(),
            render_config,
        }
    }

    /// Render and store the tiling as seen at `iteration`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails
    pub fn record(&mut self, iteration: usize, state: &TilingState) -> Result<()> {
        let frame = render_tiling(state, &self.render_config)?;
        self.frames.push((iteration, frame));
        Ok(())
    }

    /// Iterations at which frames were captured
    pub fn iterations(&self) -> Vec<usize> {
        self.frames.iter().map(|(iteration, _)| *iteration).collect()
    }

    /// Returns the total number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(LozengeError::InvalidParameter {
                parameter: "visualization",
                value: "0 frames".to_string(),
                reason: "No checkpoints captured for visualization".to_string(),
            });
        }

        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(index, (_, img))| {
            let delay = if index == last {
                frame_delay_ms.saturating_mul(FINAL_FRAME_HOLD)
            } else {
                frame_delay_ms
            };
            Frame::from_parts(img.clone(), 0, 0, Delay::from_numer_denom_ms(delay, 1))
        });

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LozengeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| LozengeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| LozengeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
