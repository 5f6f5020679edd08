use crate::core::{Color, DescentSim, FunctionPlot, Studio, TangentExplorer, VectorDot, Viz};
use crate::num::{FunctionSpec, SurfaceKind};

pub fn studio() -> StudioBuilder {
    StudioBuilder {
        studio: Studio::default(),
    }
}

pub struct StudioBuilder {
    studio: Studio,
}

impl StudioBuilder {
    pub fn background_color(mut self, c: Color) -> Self {
        self.studio.background = c;
        self
    }

    /// Set the number of columns per row (default: auto based on tile count)
    pub fn columns(mut self, cols: usize) -> Self {
        self.studio.columns = Some(cols.max(1));
        self
    }

    pub fn function<F>(mut self, f: F) -> Self
    where
        F: FnOnce(FunctionPlotBuilder) -> FunctionPlotBuilder,
    {
        let b = f(FunctionPlotBuilder::new());
        self.studio.vizzes.push(Viz::FunctionPlot(b.plot));
        self
    }

    pub fn descent<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DescentBuilder) -> DescentBuilder,
    {
        let b = f(DescentBuilder::new());
        self.studio.vizzes.push(Viz::Descent(b.sim));
        self
    }

    pub fn vectors<F>(mut self, f: F) -> Self
    where
        F: FnOnce(VectorDotBuilder) -> VectorDotBuilder,
    {
        let b = f(VectorDotBuilder::new());
        self.studio.vizzes.push(Viz::VectorDot(b.viz));
        self
    }

    pub fn tangent<F>(mut self, f: F) -> Self
    where
        F: FnOnce(TangentBuilder) -> TangentBuilder,
    {
        let b = f(TangentBuilder::new());
        self.studio.vizzes.push(Viz::Tangent(b.viz));
        self
    }

    /// Add an already-configured visualization (e.g. from a lesson widget).
    pub fn viz(mut self, viz: Viz) -> Self {
        self.studio.vizzes.push(viz);
        self
    }

    /// Get the built Studio without running it
    pub fn build(self) -> Studio {
        self.studio
    }

    /// Run the studio locally using Bevy (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run_local(self) {
        crate::runtime::run_studio(self.studio);
    }
}

pub struct FunctionPlotBuilder {
    plot: FunctionPlot,
}

impl FunctionPlotBuilder {
    fn new() -> Self {
        Self {
            plot: FunctionPlot::new(FunctionSpec::linear()),
        }
    }

    pub fn spec(mut self, spec: FunctionSpec) -> Self {
        self.plot.spec = spec;
        self
    }

    pub fn style(mut self, style: crate::core::Style) -> Self {
        self.plot.style = style;
        self
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.plot.meta.title = Some(t.into());
        self
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.plot.meta.description = Some(d.into());
        self
    }
}

pub struct DescentBuilder {
    sim: DescentSim,
}

impl DescentBuilder {
    fn new() -> Self {
        Self {
            sim: DescentSim::new(SurfaceKind::Bowl),
        }
    }

    pub fn surface(mut self, surface: SurfaceKind) -> Self {
        self.sim.surface = surface;
        self
    }

    /// Clamped to the control range [0.01, 0.2].
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.sim.learning_rate = lr.clamp(0.01, 0.2);
        self
    }

    pub fn momentum(mut self, enabled: bool) -> Self {
        self.sim.momentum = enabled;
        self
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.sim.meta.title = Some(t.into());
        self
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.sim.meta.description = Some(d.into());
        self
    }
}

pub struct VectorDotBuilder {
    viz: VectorDot,
}

impl VectorDotBuilder {
    fn new() -> Self {
        Self {
            viz: VectorDot::new(),
        }
    }

    pub fn angle(mut self, deg: f64) -> Self {
        self.viz.angle_deg = deg.clamp(0.0, 180.0);
        self
    }

    pub fn show_projection(mut self, show: bool) -> Self {
        self.viz.show_projection = show;
        self
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.viz.meta.title = Some(t.into());
        self
    }
}

pub struct TangentBuilder {
    viz: TangentExplorer,
}

impl TangentBuilder {
    fn new() -> Self {
        Self {
            viz: TangentExplorer::new(),
        }
    }

    pub fn probe(mut self, x: f64) -> Self {
        self.viz.probe_x = x.clamp(-3.0, 3.0);
        self
    }

    pub fn secant(mut self, show: bool, h: f64) -> Self {
        self.viz.show_secant = show;
        self.viz.secant_h = h.clamp(0.05, 2.0);
        self
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.viz.meta.title = Some(t.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_tiles_in_order() {
        let s = studio()
            .columns(2)
            .descent(|d| d.surface(SurfaceKind::Rosenbrock).momentum(true))
            .vectors(|v| v.angle(90.0))
            .build();
        assert_eq!(s.columns, Some(2));
        assert_eq!(s.vizzes.len(), 2);
        assert!(matches!(&s.vizzes[0], Viz::Descent(d) if d.momentum));
    }

    #[test]
    fn learning_rate_is_clamped() {
        let s = studio().descent(|d| d.learning_rate(5.0)).build();
        let Viz::Descent(sim) = &s.vizzes[0] else {
            panic!("expected descent tile");
        };
        assert_eq!(sim.learning_rate, 0.2);
    }

    #[test]
    fn titles_land_on_the_tile() {
        let s = studio()
            .function(|f| f.spec(FunctionSpec::sigmoid()).title("Sigmoid"))
            .build();
        assert_eq!(s.vizzes[0].meta().title.as_deref(), Some("Sigmoid"));
    }
}
