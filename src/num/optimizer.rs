//! The descent stepper: a small state machine over position/velocity/path.
//!
//! One `tick` is atomic — gradient, update, path append, convergence check —
//! so a frame can never observe a half-applied step.

use bevy_math::DVec2;

use super::gradient::surface_gradient;
use super::SurfaceKind;

/// Momentum coefficient for the velocity-accumulating variant.
pub const MOMENTUM: f64 = 0.9;
/// A run stops once the loss drops below this.
pub const CONVERGENCE_LOSS: f64 = 1e-3;
/// Hard cap on the path; divergent runs stop here rather than erroring.
pub const MAX_PATH_LEN: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    /// Reached the loss threshold or the step cap. Equivalent to Paused;
    /// state is kept around for inspection.
    Converged,
}

/// Mutable simulation state, owned by one descent tile.
///
/// Mutated only by the stepper; the renderer reads it. `path` is append-only
/// while running and cleared on reset, never compacted.
#[derive(Clone, Debug)]
pub struct OptimizerState {
    pub surface: SurfaceKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub path: Vec<DVec2>,
    pub step_count: u32,
    pub phase: Phase,
}

impl OptimizerState {
    pub fn new(surface: SurfaceKind) -> Self {
        Self {
            surface,
            position: surface.start(),
            velocity: DVec2::ZERO,
            path: Vec::new(),
            step_count: 0,
            phase: Phase::Idle,
        }
    }

    pub fn loss(&self) -> f64 {
        self.surface.eval(self.position.x, self.position.y)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Idle/Paused → Running. Seeds the path with the current position on a
    /// fresh run; resuming from Paused does not reseed.
    pub fn start(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Paused => {
                if self.path.is_empty() {
                    self.path.push(self.position);
                }
                self.phase = Phase::Running;
            }
            Phase::Running | Phase::Converged => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Back to Idle at the surface's start point with a cleared trail.
    pub fn reset(&mut self) {
        self.position = self.surface.start();
        self.velocity = DVec2::ZERO;
        self.path.clear();
        self.step_count = 0;
        self.phase = Phase::Idle;
    }

    /// Switching surfaces invalidates everything: forced reset.
    pub fn set_surface(&mut self, surface: SurfaceKind) {
        self.surface = surface;
        self.reset();
    }

    /// One descent step. No-op unless Running.
    ///
    /// Plain: `p -= lr·∇f`. Momentum: `v = 0.9v − lr·∇f; p += v`.
    /// Divergence is not detected beyond the step cap — a blown-up run just
    /// walks to the cap and parks in `Converged`.
    pub fn tick(&mut self, learning_rate: f64, momentum: bool) -> Phase {
        if self.phase != Phase::Running {
            return self.phase;
        }

        let grad = surface_gradient(self.surface, self.position);
        if momentum {
            self.velocity = MOMENTUM * self.velocity - learning_rate * grad;
            self.position += self.velocity;
        } else {
            self.position -= learning_rate * grad;
        }
        self.path.push(self.position);
        self.step_count += 1;

        let loss = self.loss();
        if loss < CONVERGENCE_LOSS || self.path.len() > MAX_PATH_LEN {
            self.phase = Phase::Converged;
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(surface: SurfaceKind, lr: f64, momentum: bool, ticks: usize) -> OptimizerState {
        let mut state = OptimizerState::new(surface);
        state.start();
        for _ in 0..ticks {
            if state.tick(lr, momentum) != Phase::Running {
                break;
            }
        }
        state
    }

    #[test]
    fn bowl_converges_before_the_cap() {
        let state = run(SurfaceKind::Bowl, 0.1, false, 1000);
        assert_eq!(state.phase, Phase::Converged);
        assert!(state.loss() < CONVERGENCE_LOSS);
        assert!(state.path.len() < MAX_PATH_LEN, "took {} steps", state.path.len());
        // Ends near the origin, well inside the starting quadrant.
        assert!(state.position.length() < 0.2);
    }

    #[test]
    fn momentum_outruns_plain_descent_in_the_valley() {
        // At lr 0.001 plain descent crawls along Rosenbrock's valley floor
        // while momentum rides it; both stay finite. (Larger rates such as
        // 0.05 blow up under either rule, which is the step-cap's job.)
        let plain = run(SurfaceKind::Rosenbrock, 0.001, false, 500);
        let with_momentum = run(SurfaceKind::Rosenbrock, 0.001, true, 500);

        assert!(plain.loss().is_finite());
        assert!(with_momentum.loss().is_finite());
        assert!(
            with_momentum.loss() < plain.loss(),
            "momentum {} vs plain {}",
            with_momentum.loss(),
            plain.loss()
        );
    }

    #[test]
    fn divergent_runs_stop_at_the_cap_without_erroring() {
        let state = run(SurfaceKind::Rosenbrock, 0.05, false, 2000);
        assert_eq!(state.phase, Phase::Converged);
        assert_eq!(state.path.len(), MAX_PATH_LEN + 1);
    }

    #[test]
    fn start_seeds_path_once() {
        let mut state = OptimizerState::new(SurfaceKind::Bowl);
        state.start();
        assert_eq!(state.path.len(), 1);
        state.tick(0.1, false);
        state.pause();
        assert_eq!(state.phase, Phase::Paused);
        let len = state.path.len();
        state.start();
        assert_eq!(state.path.len(), len, "resume must not reseed");
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn reset_restores_start_and_clears_path() {
        let mut state = run(SurfaceKind::Himmelblau, 0.01, true, 40);
        assert!(!state.path.is_empty());
        state.reset();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.position, SurfaceKind::Himmelblau.start());
        assert_eq!(state.velocity, DVec2::ZERO);
        assert_eq!(state.path.len(), 0);
        assert_eq!(state.step_count, 0);
    }

    #[test]
    fn surface_switch_forces_reset_while_running() {
        let mut state = run(SurfaceKind::Bowl, 0.1, false, 10);
        assert_eq!(state.phase, Phase::Running);
        state.set_surface(SurfaceKind::Beale);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.position, SurfaceKind::Beale.start());
        assert!(state.path.is_empty());
    }

    #[test]
    fn tick_is_a_no_op_outside_running() {
        let mut state = OptimizerState::new(SurfaceKind::Bowl);
        let before = state.position;
        state.tick(0.1, false);
        assert_eq!(state.position, before);
        assert!(state.path.is_empty());
    }
}
