use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RetouchError;
use crate::geometry::Size;

/// Width:height pairs printed by name rather than as a decimal.
const NAMED_RATIOS: &[(u32, u32)] = &[(1, 1), (3, 4), (4, 3), (3, 2), (2, 3), (16, 9), (9, 16), (21, 9)];

/// Crop aspect-ratio constraint. `Fixed` holds a pixel width/height ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    #[default]
    Free,
    /// The base image's own aspect ratio.
    Original,
    Fixed(f32),
}

impl AspectRatio {
    pub const PRESETS: &'static [Self] = &[
        Self::Free,
        Self::Original,
        Self::Fixed(1.0),
        Self::Fixed(3.0 / 4.0),
        Self::Fixed(4.0 / 3.0),
        Self::Fixed(16.0 / 9.0),
        Self::Fixed(9.0 / 16.0),
    ];

    /// Pixel width/height ratio, or `None` for free.
    pub fn ratio(&self, image: Size) -> Option<f32> {
        match self {
            Self::Free => None,
            Self::Original => (!image.is_empty()).then(|| image.aspect()),
            Self::Fixed(r) => Some(*r),
        }
    }

    /// Ratio expressed in normalized crop coordinates for an image of
    /// `image` pixels.
    pub fn normalized(&self, image: Size) -> Option<f32> {
        if image.is_empty() {
            return None;
        }
        self.ratio(image).map(|r| r / image.aspect())
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Original => write!(f, "Original"),
            Self::Fixed(r) => {
                match NAMED_RATIOS
                    .iter()
                    .find(|(w, h)| (*w as f32 / *h as f32 - r).abs() < 1e-4)
                {
                    Some((w, h)) => write!(f, "{w}:{h}"),
                    None => write!(f, "{r}"),
                }
            }
        }
    }
}

impl FromStr for AspectRatio {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bad = || RetouchError::InvalidAspectRatio(s.to_string());

        match trimmed.to_ascii_lowercase().as_str() {
            "free" => return Ok(Self::Free),
            "original" => return Ok(Self::Original),
            _ => {}
        }

        let ratio = match trimmed.split_once(':') {
            Some((w, h)) => {
                let w: f32 = w.trim().parse().map_err(|_| bad())?;
                let h: f32 = h.trim().parse().map_err(|_| bad())?;
                w / h
            }
            None => trimmed.parse().map_err(|_| bad())?,
        };

        if ratio > 0.0 && ratio.is_finite() {
            Ok(Self::Fixed(ratio))
        } else {
            Err(bad())
        }
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = RetouchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.to_string()
    }
}
