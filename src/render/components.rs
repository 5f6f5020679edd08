use bevy::prelude::*;
use bevy_camera::Viewport;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::num::{FunctionSpec, OptimizerState, SurfaceKind};

#[derive(Component, Clone, Copy, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct VizId(pub u64);

impl Default for VizId {
    fn default() -> Self {
        static CTR: AtomicU32 = AtomicU32::new(1);
        Self(CTR.fetch_add(1, Ordering::Relaxed).into())
    }
}

impl VizId {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Component)]
pub struct VizTile {
    pub id: VizId,
    pub index: usize,
    pub kind: VizKind,
}

#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum VizKind {
    FunctionPlot,
    Descent,
    VectorDot,
    Tangent,
}

#[derive(Component)]
pub struct TileRect {
    pub world_center: Vec2,
    pub world_size: Vec2,
    pub viewport: Viewport,
}

#[derive(Component)]
pub struct TileRenderRoot;

#[derive(Component)]
pub struct TileCamera;

/// Live controls of a function-plot tile. Seeded from the studio config at
/// spawn; the keyboard mutates it afterwards.
#[derive(Component, Clone)]
pub struct PlotControls {
    pub spec: FunctionSpec,
    pub style: crate::core::Style,
}

/// Live controls of a descent tile.
#[derive(Component, Clone)]
pub struct SimControls {
    pub learning_rate: f64,
    pub momentum: bool,
}

impl SimControls {
    pub const LR_MIN: f64 = 0.01;
    pub const LR_MAX: f64 = 0.2;
    pub const LR_STEP: f64 = 0.01;
}

/// The simulation state machine, owned by its descent tile. Dropped with the
/// tile, which is all the cancellation an unmount needs.
#[derive(Component)]
pub struct SimState(pub OptimizerState);

impl SimState {
    pub fn new(surface: SurfaceKind) -> Self {
        Self(OptimizerState::new(surface))
    }
}

/// Live controls of a vector tile.
#[derive(Component, Clone)]
pub struct VectorControls {
    pub angle_deg: f64,
    pub show_projection: bool,
}

/// Live controls of a tangent-explorer tile.
#[derive(Component, Clone)]
pub struct TangentControls {
    pub probe_x: f64,
    pub show_secant: bool,
    pub secant_h: f64,
}
