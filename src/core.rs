use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::GradiError;
use crate::num::{FunctionSpec, SurfaceKind};

/// Common metadata for all visualization types
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VizMeta {
    /// Title displayed at the top of the tile
    pub title: Option<String>,
    /// Optional description displayed below the title
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn with_a(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // Course palette (keep it small; add more as lessons need them)
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const INK: Self = Self::rgb(0.05, 0.066, 0.09);
    pub const CYAN: Self = Self::rgb(0.0, 0.83, 1.0);
    pub const VIOLET: Self = Self::rgb(0.486, 0.227, 0.929);
    pub const EMERALD: Self = Self::rgb(0.063, 0.725, 0.506);
    pub const AMBER: Self = Self::rgb(0.96, 0.62, 0.043);
    pub const SLATE: Self = Self::rgb(0.627, 0.627, 0.69);
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::srgba(c.r, c.g, c.b, c.a)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    pub size: f32,    // line width / point radius / etc
    pub opacity: f32, // multiplied into alpha
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: 2.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    #[inline]
    pub const fn color(mut self, c: Color) -> Self {
        self.color = c;
        self
    }

    #[inline]
    pub const fn rgb(self, r: f32, g: f32, b: f32) -> Self {
        self.color(Color::rgb(r, g, b))
    }
}

/// Log-compressed shading of a scalar loss field.
///
/// Large benchmark values (Rosenbrock grows past 1e3 inside the view) are
/// squashed with `ln(z + 1)` before being scaled by the per-surface
/// `color_scale` constant, so the contour bands stay readable on every
/// surface. The RGB ramp runs ink-blue to bright blue.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LossShading {
    pub color_scale: f64,
}

impl LossShading {
    pub const fn new(color_scale: f64) -> Self {
        Self { color_scale }
    }

    /// Map a loss value to a display color.
    pub fn sample(&self, z: f64) -> Color {
        let log_z = (z.max(0.0) + 1.0).ln();
        let intensity = (log_z * self.color_scale * 50.0).min(255.0) as f32;
        let r = (10.0 + intensity * 0.4) / 255.0;
        let g = (15.0 + intensity * 0.15) / 255.0;
        let b = (40.0 + (intensity * 0.9).min(200.0)) / 255.0;
        Color::rgb(r, g, b)
    }
}

/// One interactive visualization tile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Viz {
    FunctionPlot(FunctionPlot),
    Descent(DescentSim),
    VectorDot(VectorDot),
    Tangent(TangentExplorer),
}

impl Viz {
    pub fn meta(&self) -> &VizMeta {
        match self {
            Viz::FunctionPlot(v) => &v.meta,
            Viz::Descent(v) => &v.meta,
            Viz::VectorDot(v) => &v.meta,
            Viz::Tangent(v) => &v.meta,
        }
    }
}

/// Interactive single-variable function plot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionPlot {
    #[serde(default)]
    pub meta: VizMeta,
    pub spec: FunctionSpec,
    #[serde(default)]
    pub style: Style,
}

impl FunctionPlot {
    pub fn new(spec: FunctionSpec) -> Self {
        Self {
            meta: VizMeta::default(),
            spec,
            style: Style {
                color: Color::CYAN,
                size: 3.0,
                opacity: 1.0,
            },
        }
    }
}

/// Gradient-descent simulator over a benchmark loss surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DescentSim {
    #[serde(default)]
    pub meta: VizMeta,
    pub surface: SurfaceKind,
    pub learning_rate: f64,
    pub momentum: bool,
}

impl DescentSim {
    pub fn new(surface: SurfaceKind) -> Self {
        Self {
            meta: VizMeta::default(),
            surface,
            learning_rate: 0.05,
            momentum: false,
        }
    }
}

/// Dot-product / projection visualizer: A fixed, B swept by one angle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VectorDot {
    #[serde(default)]
    pub meta: VizMeta,
    pub angle_deg: f64,
    pub show_projection: bool,
}

impl VectorDot {
    pub fn new() -> Self {
        Self {
            meta: VizMeta::default(),
            angle_deg: 45.0,
            show_projection: true,
        }
    }
}

impl Default for VectorDot {
    fn default() -> Self {
        Self::new()
    }
}

/// Tangent/secant explorer on f(x) = x².
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TangentExplorer {
    #[serde(default)]
    pub meta: VizMeta,
    pub probe_x: f64,
    pub show_secant: bool,
    pub secant_h: f64,
}

impl TangentExplorer {
    pub fn new() -> Self {
        Self {
            meta: VizMeta::default(),
            probe_x: 1.0,
            show_secant: false,
            secant_h: 1.0,
        }
    }
}

impl Default for TangentExplorer {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of visualization tiles rendered together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Studio {
    pub background: Color,
    pub vizzes: Vec<Viz>,
    /// Number of columns per row (default: auto based on tile count)
    pub columns: Option<usize>,
}

impl Default for Studio {
    fn default() -> Self {
        Self {
            background: Color::rgba(0.05, 0.066, 0.09, 1.0),
            vizzes: vec![],
            columns: None,
        }
    }
}

impl Studio {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(Report::from)
            .change_context(GradiError)
            .attach_printable("failed to parse studio JSON")
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self)
            .map_err(Report::from)
            .change_context(GradiError)
            .attach_printable("failed to serialize studio")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shading_is_monotone_in_loss() {
        let shading = LossShading::new(0.3);
        let low = shading.sample(0.5);
        let high = shading.sample(500.0);
        assert!(high.b >= low.b);
        assert!(high.r >= low.r);
    }

    #[test]
    fn shading_clips_huge_values() {
        let shading = LossShading::new(30.0);
        let c = shading.sample(f64::INFINITY);
        assert!(c.r <= 1.0 && c.g <= 1.0 && c.b <= 1.0);
    }

    #[test]
    fn studio_json_round_trip() {
        let studio = Studio {
            vizzes: vec![
                Viz::Descent(DescentSim::new(SurfaceKind::Rosenbrock)),
                Viz::VectorDot(VectorDot::new()),
            ],
            ..Studio::default()
        };
        let json = studio.to_json().unwrap();
        let back = Studio::from_json(&json).unwrap();
        assert_eq!(back.vizzes.len(), 2);
        match &back.vizzes[0] {
            Viz::Descent(sim) => assert!(matches!(sim.surface, SurfaceKind::Rosenbrock)),
            other => panic!("unexpected viz: {other:?}"),
        }
    }

    #[test]
    fn bad_studio_json_is_reported() {
        assert!(Studio::from_json("{not json").is_err());
    }
}
