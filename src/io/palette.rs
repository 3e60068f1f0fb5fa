//! Label to colour mapping for rendered tilings

use crate::io::configuration::{CONTINUOUS_RAMP, DEFAULT_PALETTE};
use crate::io::error::{Result, invalid_parameter};

/// Colour used for label 0 when no palette entry exists
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// How labels are turned into colours
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Palette {
    /// Fixed RGBA colour per label, indexed by label
    Discrete(Vec<[u8; 4]>),
    /// Label 0 is background; positive labels are spread over a colour ramp
    /// by `label / max_label`
    Continuous,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = DEFAULT_PALETTE
            .iter()
            .filter_map(|hex| parse_hex_color(hex).ok())
            .collect();
        Self::Discrete(colors)
    }
}

impl Palette {
    /// Build a discrete palette from `#rrggbb` or `#rrggbbaa` strings
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is not a valid hex colour
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let colors = entries
            .iter()
            .map(|entry| parse_hex_color(entry.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::Discrete(colors))
    }

    /// Colour of `label` given the largest label in the tiling
    ///
    /// # Errors
    ///
    /// Returns an error if a discrete palette has no entry for `label`
    pub fn color(&self, label: u8, max_label: u8) -> Result<[u8; 4]> {
        match self {
            Self::Discrete(colors) => colors.get(label as usize).copied().ok_or_else(|| {
                invalid_parameter(
                    "palette",
                    &label,
                    &format!("no colour for label (palette has {} entries)", colors.len()),
                )
            }),
            Self::Continuous => {
                if label == 0 {
                    Ok(BACKGROUND)
                } else {
                    let t = f64::from(label) / f64::from(max_label.max(label));
                    let [r, g, b] = ramp(t);
                    Ok([r, g, b, 255])
                }
            }
        }
    }
}

/// Piecewise linear interpolation along the continuous ramp, `t` in `[0, 1]`
pub fn ramp(t: f64) -> [u8; 3] {
    let segments = (CONTINUOUS_RAMP.len() - 1) as f64;
    let position = t.clamp(0.0, 1.0) * segments;
    let lower = position.floor() as usize;
    let fraction = position - position.floor();

    let start = CONTINUOUS_RAMP.get(lower).copied().unwrap_or([0, 0, 0]);
    let end = CONTINUOUS_RAMP.get(lower + 1).copied().unwrap_or(start);

    let mix = |a: u8, b: u8| -> u8 {
        fraction
            .mul_add(f64::from(b) - f64::from(a), f64::from(a))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    [
        mix(start[0], end[0]),
        mix(start[1], end[1]),
        mix(start[2], end[2]),
    ]
}

/// Parse `#rrggbb` or `#rrggbbaa` into RGBA
///
/// # Errors
///
/// Returns an error if the string is not a hex colour of that form
pub fn parse_hex_color(text: &str) -> Result<[u8; 4]> {
    let invalid = || invalid_parameter("color", &text, &"expected #rrggbb or #rrggbbaa");
    let digits = text.strip_prefix('#').unwrap_or(text);
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return Err(invalid());
    }

    let mut rgba = [0, 0, 0, 255];
    for (channel, slot) in rgba.iter_mut().enumerate().take(digits.len() / 2) {
        let pair = digits
            .get(channel * 2..channel * 2 + 2)
            .ok_or_else(invalid)?;
        *slot = u8::from_str_radix(pair, 16).map_err(|_parse| invalid())?;
    }
    Ok(rgba)
}
