//! Density buckets for panel content.
//!
//! Panel bodies adapt their internal density (column count, font scale, ...)
//! to the space they are given.  [`SizeClass::classify`] maps the pixel size
//! of a panel's region to one of four buckets; it is a pure function so the
//! renderer can call it on every resize.

use serde::{Deserialize, Serialize};

/// Width breakpoints in pixels: below the first is `Xs`, below the second `Sm`, ...
const WIDTH_BREAKPOINTS: [f64; 3] = [360.0, 560.0, 800.0];

/// Height breakpoints in pixels.
const HEIGHT_BREAKPOINTS: [f64; 3] = [200.0, 320.0, 480.0];

/// Coarse size bucket of a panel region, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Xs,
    Sm,
    Md,
    Lg,
}

impl SizeClass {
    /// Classifies a region; the tighter of the two dimensions wins.
    pub fn classify(width: f64, height: f64) -> SizeClass {
        Self::bucket(width, &WIDTH_BREAKPOINTS).min(Self::bucket(height, &HEIGHT_BREAKPOINTS))
    }

    fn bucket(value: f64, breakpoints: &[f64; 3]) -> SizeClass {
        if value.is_nan() || value < breakpoints[0] {
            SizeClass::Xs
        } else if value < breakpoints[1] {
            SizeClass::Sm
        } else if value < breakpoints[2] {
            SizeClass::Md
        } else {
            SizeClass::Lg
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SizeClass::Xs => "xs",
            SizeClass::Sm => "sm",
            SizeClass::Md => "md",
            SizeClass::Lg => "lg",
        }
    }
}
