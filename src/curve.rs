//! Easing curves
//!
//! A [`Curve`] maps linear progress through an interval to eased progress.
//! Both domain and range are 16-bit fixed-point fractions (0-65535), and
//! every curve keeps the endpoints: `scale(0) == 0`, `scale(65535) == 65535`.
//!
//! The smooth curves are the CSS cubic-bezier timing functions.

use serde::{Deserialize, Serialize};

use crate::math8::high_byte;

/// Newton iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const EPSILON: f64 = 1e-7;

/// Named easing function
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    /// cubic-bezier(0.25, 0.1, 0.25, 1)
    Ease,
    /// cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
    /// cubic-bezier(0, 0, 0.58, 1)
    #[default]
    EaseOut,
    /// cubic-bezier(0.42, 0, 0.58, 1)
    EaseInOut,
    /// Identity mapping
    #[serde(alias = "direct")]
    Linear,
    /// Jumps to the end as soon as progress is not zero
    StepStart,
    /// Jumps to the end at the midpoint
    StepMiddle,
    /// Stays at the start until progress is complete
    StepEnd,
}

impl Curve {
    /// All curves, in wire order
    pub const ALL: [Self; 8] = [
        Self::Ease,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Linear,
        Self::StepStart,
        Self::StepMiddle,
        Self::StepEnd,
    ];

    /// Map linear progress to eased progress
    pub fn scale(self, progress: u16) -> u16 {
        if progress == 0 {
            return 0;
        }
        if progress == u16::MAX {
            return u16::MAX;
        }
        match self {
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, progress),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, progress),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, progress),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, progress),
            Self::Linear => progress,
            Self::StepStart => u16::MAX,
            Self::StepMiddle => {
                if progress < 0x8000 {
                    0
                } else {
                    u16::MAX
                }
            }
            Self::StepEnd => 0,
        }
    }

    /// Map linear progress to an 8-bit blend weight
    pub fn scale8(self, progress: u16) -> u8 {
        high_byte(self.scale(progress))
    }
}

/// Evaluate a unit cubic bezier (anchored at 0,0 and 1,1) at `progress`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: u16) -> u16 {
    let x = f64::from(progress) / 65535.0;
    let t = UnitBezier::new(x1, x2).solve(x);
    let y = UnitBezier::new(y1, y2).sample(t);
    libm::floor(y.clamp(0.0, 1.0) * 65535.0 + 0.5) as u16
}

/// One axis of a unit cubic bezier in polynomial form
#[derive(Clone, Copy)]
struct UnitBezier {
    a: f64,
    b: f64,
    c: f64,
}

impl UnitBezier {
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    fn sample(self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn derivative(self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Find `t` such that `sample(t) == x`
    fn solve(self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = self.sample(t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.derivative(t);
            if slope.abs() < EPSILON {
                break;
            }
            t -= error / slope;
        }

        let (mut low, mut high) = (0.0, 1.0);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = self.sample(t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_axis_is_anchored() {
        let axis = UnitBezier::new(0.42, 0.58);
        assert!(axis.sample(0.0).abs() < EPSILON);
        assert!((axis.sample(1.0) - 1.0).abs() < EPSILON);
        let t = axis.solve(0.5);
        assert!((axis.sample(t) - 0.5).abs() < 1e-6);
    }
}
