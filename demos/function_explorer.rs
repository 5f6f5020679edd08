//! Function Explorer
//!
//! The single-variable plots from the math-foundations module, side by side:
//! linear, quadratic, exponential, sigmoid, relu, plus the derivative
//! explorer. Hover a tile and use ↑/↓ (or ←/→ on the tangent tile) to play
//! with its parameter.

use gradi::core::Color;
use gradi::num::FunctionSpec;
use gradi::prelude::*;

fn main() {
    studio()
        .background_color(Color::INK)
        .columns(3)
        .function(|p| {
            p.spec(FunctionSpec::linear())
                .title("Linear")
                .description("y = kx — slope is the whole story")
        })
        .function(|p| {
            p.spec(FunctionSpec::quadratic())
                .title("Quadratic")
                .description("y = x² — always the square")
        })
        .function(|p| {
            p.spec(FunctionSpec::exponential())
                .title("Exponential")
                .description("y = a·eˣ — clips instead of overflowing the tile")
        })
        .function(|p| {
            p.spec(FunctionSpec::sigmoid())
                .title("Sigmoid")
                .description("squashes ℝ into (0, 1)")
        })
        .function(|p| p.spec(FunctionSpec::Relu).title("ReLU"))
        .tangent(|t| {
            t.probe(1.0)
                .secant(true, 1.0)
                .title("Derivative = tangent slope")
        })
        .run_local();
}
