//! Dot-product geometry for the projection visualizer.
//!
//! A is fixed along +x; B is swept by a single angle in [0°, 180°]. Both are
//! recomputed from the angle on every change, so there is no incremental
//! state to drift.

use bevy_math::DVec2;
use serde::{Deserialize, Serialize};

/// Magnitude of the fixed vector A.
pub const A_LEN: f64 = 100.0;
/// Magnitude of the swept vector B.
pub const B_LEN: f64 = 80.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VectorPair {
    pub angle_deg: f64,
}

impl VectorPair {
    pub fn new(angle_deg: f64) -> Self {
        Self {
            angle_deg: angle_deg.clamp(0.0, 180.0),
        }
    }

    pub fn set_angle(&mut self, angle_deg: f64) {
        self.angle_deg = angle_deg.clamp(0.0, 180.0);
    }

    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }

    pub fn a(&self) -> DVec2 {
        DVec2::new(A_LEN, 0.0)
    }

    pub fn b(&self) -> DVec2 {
        let theta = self.angle_rad();
        DVec2::new(B_LEN * theta.cos(), B_LEN * theta.sin())
    }

    pub fn dot(&self) -> f64 {
        self.a().dot(self.b())
    }

    pub fn cos_theta(&self) -> f64 {
        self.angle_rad().cos()
    }

    /// Signed length of B's shadow along A: `A·B / |A| = |B|·cos θ`.
    pub fn projection_scalar(&self) -> f64 {
        self.dot() / A_LEN
    }

    /// The projection of B onto A as a point on A's line.
    pub fn projection_point(&self) -> DVec2 {
        DVec2::new(self.projection_scalar(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn perpendicular_vectors_have_zero_dot() {
        let pair = VectorPair::new(90.0);
        assert!(pair.dot().abs() < TOL, "dot at 90° = {}", pair.dot());
        assert!(pair.projection_scalar().abs() < TOL);
    }

    #[test]
    fn aligned_and_opposed_extremes() {
        let aligned = VectorPair::new(0.0);
        assert!((aligned.dot() - A_LEN * B_LEN).abs() < TOL);

        let opposed = VectorPair::new(180.0);
        assert!((opposed.dot() + A_LEN * B_LEN).abs() < TOL);
    }

    #[test]
    fn dot_equals_magnitudes_times_cosine() {
        for deg in [0.0, 15.0, 45.0, 60.0, 120.0, 175.0] {
            let pair = VectorPair::new(deg);
            let expected = A_LEN * B_LEN * pair.cos_theta();
            assert!((pair.dot() - expected).abs() < 1e-6, "mismatch at {deg}°");
        }
    }

    #[test]
    fn angle_clamps_to_half_turn() {
        let mut pair = VectorPair::new(300.0);
        assert_eq!(pair.angle_deg, 180.0);
        pair.set_angle(-20.0);
        assert_eq!(pair.angle_deg, 0.0);
    }
}
