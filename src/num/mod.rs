//! Pure numeric core: function evaluators, benchmark loss surfaces,
//! finite-difference gradients, the descent stepper, and vector math.
//!
//! Nothing in here touches the renderer; every function is total and
//! synchronous so the draw code can call it freely on every frame.

pub mod functions;
pub mod gradient;
pub mod optimizer;
pub mod surfaces;
pub mod vector;

pub use functions::FunctionSpec;
pub use gradient::{central_diff, DIFF_STEP};
pub use optimizer::{OptimizerState, Phase};
pub use surfaces::{SurfaceDisplay, SurfaceKind};
pub use vector::VectorPair;
