pub mod common;
pub mod descent;
pub mod function_plot;
pub mod tangent;
pub mod vector;

pub use common::*;
pub use descent::draw_descent;
pub use function_plot::draw_function_plot;
pub use tangent::draw_tangent;
pub use vector::draw_vectors;
