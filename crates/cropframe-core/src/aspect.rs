//! Target aspect ratio for aspect-locked resizing.
//!
//! Hosts pass the ratio as a string such as `"1:1"` or `"16:9"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// A width:height ratio with both terms strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio {
    x: f64,
    y: f64,
}

impl AspectRatio {
    /// Create a ratio `x:y`.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidConfig` if either term is zero, negative or not finite.
    pub fn new(x: f64, y: f64) -> Result<Self, CropError> {
        if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
            return Err(CropError::InvalidConfig(format!(
                "aspect ratio terms must be positive, got {x}:{y}"
            )));
        }
        Ok(Self { x, y })
    }

    /// Square `1:1`.
    pub fn square() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Height for a given width (`width * y / x`).
    pub fn height_for(&self, width: f64) -> f64 {
        width * (self.y / self.x)
    }

    /// Width for a given height (`height * x / y`).
    pub fn width_for(&self, height: f64) -> f64 {
        height * (self.x / self.y)
    }
}

impl FromStr for AspectRatio {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CropError::InvalidConfig(format!("aspect ratio must look like \"16:9\", got {s:?}"));

        let (x, y) = s.split_once(':').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        Self::new(x, y)
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = CropError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.to_string()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}
