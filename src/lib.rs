pub mod catalog;
pub mod core;
pub mod num;
pub mod render;
pub mod runtime;
pub mod studio;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

use std::fmt;

#[derive(Debug)]
pub struct GradiError;

impl fmt::Display for GradiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GradiError")
    }
}

impl std::error::Error for GradiError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<GradiError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::core::*;
    pub use crate::num::*;
    pub use crate::render::*;
    pub use crate::runtime::*;
    pub use crate::studio::*;
}
