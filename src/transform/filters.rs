use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::RasterError;

/// Resampling kernel used by filtered scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Nearest sample box, support 0.5.
    Box,
    /// Linear tent, support 1.
    Triangle,
    /// Quadratic bell (box convolved three times), support 1.5.
    Bell,
    /// Cubic B-spline, support 2.
    #[serde(alias = "b-spline")]
    BSpline,
    /// Windowed sinc with three lobes, support 3.
    Lanczos3,
    /// Mitchell-Netravali cubic with `B = C = 1/3`, support 2.
    #[default]
    Mitchell,
}

const MITCHELL_B: f64 = 1.0 / 3.0;
const MITCHELL_C: f64 = 1.0 / 3.0;

fn sinc(x: f64) -> f64 {
    let x = x * PI;
    if x > 1.0e-9 { x.sin() / x } else { 1.0 }
}

impl Filter {
    /// Every filter, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Box,
        Self::Triangle,
        Self::Bell,
        Self::BSpline,
        Self::Lanczos3,
        Self::Mitchell,
    ];

    /// Radius outside which [`Filter::weight`] is zero.
    pub fn support(self) -> f64 {
        match self {
            Self::Box => 0.5,
            Self::Triangle => 1.0,
            Self::Bell => 1.5,
            Self::BSpline => 2.0,
            Self::Lanczos3 => 3.0,
            Self::Mitchell => 2.0,
        }
    }

    /// Kernel value at distance `t` from the sample center.
    pub fn weight(self, t: f64) -> f64 {
        match self {
            // Half-open so adjacent boxes do not overlap.
            Self::Box => {
                if t > -0.5 && t <= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Triangle => {
                let t = t.abs();
                if t < 1.0 { 1.0 - t } else { 0.0 }
            }
            Self::Bell => {
                let t = t.abs();
                if t < 0.5 {
                    0.75 - t * t
                } else if t < 1.5 {
                    let t = t - 1.5;
                    0.5 * t * t
                } else {
                    0.0
                }
            }
            Self::BSpline => {
                let t = t.abs();
                if t < 1.0 {
                    let tt = t * t;
                    0.5 * tt * t - tt + 2.0 / 3.0
                } else if t < 2.0 {
                    let t = 2.0 - t;
                    t * t * t / 6.0
                } else {
                    0.0
                }
            }
            Self::Lanczos3 => {
                let t = t.abs();
                if t < 3.0 { sinc(t) * sinc(t / 3.0) } else { 0.0 }
            }
            Self::Mitchell => {
                let (b, c) = (MITCHELL_B, MITCHELL_C);
                let t = t.abs();
                let tt = t * t;
                if t < 1.0 {
                    ((12.0 - 9.0 * b - 6.0 * c) * (t * tt)
                        + (-18.0 + 12.0 * b + 6.0 * c) * tt
                        + (6.0 - 2.0 * b))
                        / 6.0
                } else if t < 2.0 {
                    ((-b - 6.0 * c) * (t * tt)
                        + (6.0 * b + 30.0 * c) * tt
                        + (-12.0 * b - 48.0 * c) * t
                        + (8.0 * b + 24.0 * c))
                        / 6.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Triangle => "triangle",
            Self::Bell => "bell",
            Self::BSpline => "bspline",
            Self::Lanczos3 => "lanczos3",
            Self::Mitchell => "mitchell",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "b-spline" {
            return Ok(Self::BSpline);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| RasterError::validation(format!("unknown filter \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/filters.rs"]
mod tests;
