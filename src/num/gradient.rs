//! Central-difference gradient estimation.

use bevy_math::DVec2;

use super::SurfaceKind;

/// Fixed finite-difference step. No adaptive sizing; the stepper tolerates
/// the resulting gradient noise.
pub const DIFF_STEP: f64 = 1e-3;

/// Estimate `∇f` at `(x, y)` by symmetric differences with [`DIFF_STEP`].
pub fn central_diff<F>(f: F, x: f64, y: f64) -> DVec2
where
    F: Fn(f64, f64) -> f64,
{
    let h = DIFF_STEP;
    let dfdx = (f(x + h, y) - f(x - h, y)) / (2.0 * h);
    let dfdy = (f(x, y + h) - f(x, y - h)) / (2.0 * h);
    DVec2::new(dfdx, dfdy)
}

/// Gradient of a benchmark surface at `p`.
pub fn surface_gradient(surface: SurfaceKind, p: DVec2) -> DVec2 {
    central_diff(|x, y| surface.eval(x, y), p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_analytic_bowl_gradient() {
        // ∇bowl = (0.2x, 0.2y); central differences are exact on quadratics
        // up to rounding, comfortably inside the 1e-3 budget.
        for &(x, y) in &[(0.0, 0.0), (1.7, -2.3), (3.0, 3.0), (-4.2, 0.9)] {
            let g = central_diff(|x, y| SurfaceKind::Bowl.eval(x, y), x, y);
            assert!((g.x - 0.2 * x).abs() < 1e-3, "dfdx at ({x},{y}): {}", g.x);
            assert!((g.y - 0.2 * y).abs() < 1e-3, "dfdy at ({x},{y}): {}", g.y);
        }
    }

    #[test]
    fn points_uphill_on_rosenbrock() {
        let p = DVec2::new(-1.5, 2.0);
        let g = surface_gradient(SurfaceKind::Rosenbrock, p);
        // Known slope at the lesson start point: steeply downhill in +x.
        assert!(g.x < -100.0);
        assert!(g.y < 0.0);
    }
}
