//! Benchmark loss surfaces for the descent simulator.
//!
//! The four classics: a convex bowl as the baseline, Rosenbrock's banana
//! valley, Beale, and Himmelblau. Each carries the recommended starting
//! point and the empirically tuned display constants the heatmap uses.

use bevy_math::DVec2;
use serde::{Deserialize, Serialize};

/// Per-surface display tuning.
///
/// `zoom_divisor` sets pixels-per-unit as `min(w, h) / zoom_divisor`,
/// `view_range` bounds the integer grid lines, and `color_scale` feeds the
/// log-compressed heat shading. Tuned for readable contour bands, not
/// derived from anything.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SurfaceDisplay {
    pub zoom_divisor: f64,
    pub view_range: i32,
    pub color_scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Bowl,
    Rosenbrock,
    Beale,
    Himmelblau,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 4] = [
        SurfaceKind::Bowl,
        SurfaceKind::Rosenbrock,
        SurfaceKind::Beale,
        SurfaceKind::Himmelblau,
    ];

    pub fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            SurfaceKind::Bowl => 0.1 * (x * x + y * y),
            SurfaceKind::Rosenbrock => {
                let (a, b) = (1.0, 100.0);
                (a - x).powi(2) + b * (y - x * x).powi(2)
            }
            SurfaceKind::Beale => {
                (1.5 - x + x * y).powi(2)
                    + (2.25 - x + x * y * y).powi(2)
                    + (2.625 - x + x * y * y * y).powi(2)
            }
            SurfaceKind::Himmelblau => {
                (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2)
            }
        }
    }

    /// Recommended starting point for the simulator.
    pub fn start(&self) -> DVec2 {
        match self {
            SurfaceKind::Bowl => DVec2::new(3.0, 3.0),
            SurfaceKind::Rosenbrock => DVec2::new(-1.5, 2.0),
            SurfaceKind::Beale => DVec2::new(-2.0, 2.0),
            SurfaceKind::Himmelblau => DVec2::new(-4.0, -4.0),
        }
    }

    /// Known global minima, for reference markers only.
    pub fn minima(&self) -> &'static [(f64, f64)] {
        match self {
            SurfaceKind::Bowl => &[(0.0, 0.0)],
            SurfaceKind::Rosenbrock => &[(1.0, 1.0)],
            SurfaceKind::Beale => &[(3.0, 0.5)],
            SurfaceKind::Himmelblau => &[
                (3.0, 2.0),
                (-2.805118, 3.131312),
                (-3.779310, -3.283186),
                (3.584428, -1.848126),
            ],
        }
    }

    pub fn display(&self) -> SurfaceDisplay {
        match self {
            SurfaceKind::Bowl => SurfaceDisplay {
                zoom_divisor: 10.0,
                view_range: 5,
                color_scale: 30.0,
            },
            SurfaceKind::Rosenbrock => SurfaceDisplay {
                zoom_divisor: 8.0,
                view_range: 4,
                color_scale: 0.02,
            },
            SurfaceKind::Beale => SurfaceDisplay {
                zoom_divisor: 12.0,
                view_range: 6,
                color_scale: 0.1,
            },
            SurfaceKind::Himmelblau => SurfaceDisplay {
                zoom_divisor: 12.0,
                view_range: 6,
                color_scale: 0.3,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceKind::Bowl => "Simple bowl",
            SurfaceKind::Rosenbrock => "Rosenbrock (banana)",
            SurfaceKind::Beale => "Beale",
            SurfaceKind::Himmelblau => "Himmelblau",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SurfaceKind::Bowl => "Convex baseline. Global minimum at (0, 0).",
            SurfaceKind::Rosenbrock => {
                "Long narrow valley. Plain descent zigzags, momentum flows. Minimum at (1, 1)."
            }
            SurfaceKind::Beale => "Multimodal with steep rims. Minimum at (3, 0.5).",
            SurfaceKind::Himmelblau => {
                "Four symmetric global minima. Different starts land in different basins."
            }
        }
    }

    /// Cycle to the next benchmark (1-2-3-4 order).
    pub fn next(&self) -> SurfaceKind {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bowl_minimum_is_unique_at_origin() {
        assert_eq!(SurfaceKind::Bowl.eval(0.0, 0.0), 0.0);
        for &(x, y) in &[(0.1, 0.0), (0.0, -0.1), (3.0, 3.0), (-2.0, 5.0), (1e-4, 1e-4)] {
            assert!(SurfaceKind::Bowl.eval(x, y) > 0.0, "bowl({x},{y}) not positive");
        }
    }

    #[test]
    fn known_minima_evaluate_to_zero() {
        assert_eq!(SurfaceKind::Rosenbrock.eval(1.0, 1.0), 0.0);
        assert_eq!(SurfaceKind::Beale.eval(3.0, 0.5), 0.0);
        assert_eq!(SurfaceKind::Himmelblau.eval(3.0, 2.0), 0.0);
        for &(x, y) in SurfaceKind::Himmelblau.minima() {
            assert!(SurfaceKind::Himmelblau.eval(x, y) < 1e-3, "({x},{y}) is not a minimum");
        }
    }

    #[test]
    fn start_points_match_the_lessons() {
        assert_eq!(SurfaceKind::Bowl.start(), DVec2::new(3.0, 3.0));
        assert_eq!(SurfaceKind::Rosenbrock.start(), DVec2::new(-1.5, 2.0));
    }

    #[test]
    fn surface_cycling_visits_all() {
        let mut kind = SurfaceKind::Bowl;
        let mut seen = vec![kind];
        for _ in 0..3 {
            kind = kind.next();
            seen.push(kind);
        }
        assert_eq!(kind.next(), SurfaceKind::Bowl);
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
