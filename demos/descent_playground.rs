//! Descent Playground
//!
//! Two gradient-descent simulators over the same Rosenbrock valley, one with
//! plain descent and one with momentum, next to the dot-product visualizer.
//! Hover a simulator and press Space to run it; 1-4 switch surfaces.

use gradi::core::Color;
use gradi::num::SurfaceKind;
use gradi::prelude::*;

fn main() {
    studio()
        .background_color(Color::INK)
        .columns(3)
        .descent(|d| {
            d.surface(SurfaceKind::Rosenbrock)
                .learning_rate(0.05)
                .momentum(false)
                .title("Plain descent")
                .description("zigzags across the valley")
        })
        .descent(|d| {
            d.surface(SurfaceKind::Rosenbrock)
                .learning_rate(0.05)
                .momentum(true)
                .title("With momentum")
                .description("velocity carries it along the floor")
        })
        .vectors(|v| v.angle(45.0).title("Dot product as projection"))
        .run_local();
}
