//! Rasterization of tilings to PNG

use crate::io::configuration::DEFAULT_IMAGE_PIXELS;
use crate::io::error::{LozengeError, Result, invalid_parameter};
use crate::io::palette::Palette;
use crate::lattice::tiling::TilingState;
use crate::math::geometry::{bounds, triangle_contains, triangle_corners};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Margin around the hexagon in pixels
const MARGIN: f64 = 4.0;

/// Rendering parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Image width in pixels; the height follows from the hexagon's aspect
    pub pixels: u32,
    /// Colour mapping for labels
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels: DEFAULT_IMAGE_PIXELS,
            palette: Palette::default(),
        }
    }
}

/// Maps plane coordinates to pixel coordinates
struct Viewport {
    min: [f64; 2],
    scale: f64,
    height: u32,
}

impl Viewport {
    fn to_pixel(&self, point: [f64; 2]) -> [f64; 2] {
        let px = (point[0] - self.min[0]).mul_add(self.scale, MARGIN);
        let py = (point[1] - self.min[1]).mul_add(self.scale, MARGIN);
        // Image rows grow downwards
        [px, f64::from(self.height) - py]
    }
}

fn viewport(state: &TilingState, pixels: u32) -> Result<Viewport> {
    let domain = *state.domain();
    let corners = domain
        .cells()
        .filter(|&(x, y, o)| domain.is_in_domain(x, y, o))
        .flat_map(|(x, y, o)| triangle_corners(x, y, o));
    let (min, max) = bounds(corners)
        .ok_or_else(|| invalid_parameter("size", &domain.size(), &"domain has no triangles"))?;

    let usable = f64::from(pixels) - 2.0 * MARGIN;
    if usable < 1.0 {
        return Err(invalid_parameter(
            "pixels",
            &pixels,
            &"image is too small to hold the hexagon",
        ));
    }
    let scale = usable / (max[0] - min[0]);
    let height = (max[1] - min[1]).mul_add(scale, 2.0 * MARGIN).ceil() as u32;

    Ok(Viewport { min, scale, height })
}

/// Render the tiling to an RGBA image
///
/// Every triangle is filled with the palette colour of its label; pixels not
/// covered by a labelled triangle get the colour of label 0.
///
/// # Errors
///
/// Returns an error if:
/// - The image width is too small to hold the hexagon
/// - A label has no colour in a discrete palette
pub fn render_tiling(state: &TilingState, config: &RenderConfig) -> Result<RgbaImage> {
    let view = viewport(state, config.pixels)?;
    let max_label = state.max_label();
    let background = config.palette.color(0, max_label)?;

    let mut img: RgbaImage = ImageBuffer::from_pixel(config.pixels, view.height, Rgba(background));

    for (x, y, o, label) in state.cells() {
        if label == 0 {
            continue;
        }
        let color = Rgba(config.palette.color(label, max_label)?);
        let [a, b, c] = triangle_corners(x, y, o);
        let triangle = [view.to_pixel(a), view.to_pixel(b), view.to_pixel(c)];
        let Some((min, max)) = bounds(triangle) else {
            continue;
        };

        let col_start = min[0].floor().max(0.0) as u32;
        let col_end = (max[0].ceil().max(0.0) as u32).min(img.width());
        let row_start = min[1].floor().max(0.0) as u32;
        let row_end = (max[1].ceil().max(0.0) as u32).min(img.height());

        for row in row_start..row_end {
            for col in col_start..col_end {
                let center = [f64::from(col) + 0.5, f64::from(row) + 0.5];
                if triangle_contains(&triangle, center) {
                    img.put_pixel(col, row, color);
                }
            }
        }
    }

    Ok(img)
}

/// Render the tiling and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see [`render_tiling`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tiling_as_png(
    state: &TilingState,
    config: &RenderConfig,
    output_path: &Path,
) -> Result<()> {
    let img = render_tiling(state, config)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LozengeError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| LozengeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
