//! Derivative explorer tile: f(x) = x² with its tangent at a movable probe
//! point and an optional secant that collapses onto the tangent as h → 0.

#![allow(clippy::too_many_arguments)]

use super::common::*;
use crate::core::VizMeta;
use crate::render::{TangentControls, TileRect, UnitMeshes};
use bevy::prelude::*;
use bevy_camera::visibility::RenderLayers;
use bevy_math::DVec2;

fn f(x: f64) -> f64 {
    x * x
}

fn f_prime(x: f64) -> f64 {
    2.0 * x
}

pub fn draw_tangent(
    commands: &mut Commands,
    root: Entity,
    meta: Option<&VizMeta>,
    controls: &TangentControls,
    rect: &TileRect,
    unit: &UnitMeshes,
    materials: &mut Assets<ColorMaterial>,
    layers: RenderLayers,
) {
    draw_tile_border(
        commands,
        root,
        rect,
        unit,
        materials,
        layers.clone(),
        Color::srgb(0.3, 0.3, 0.4),
        1.0,
    );
    if let Some(meta) = meta {
        draw_viz_title(commands, root, meta, rect, layers.clone());
    }

    // Origin sits low in the tile so the parabola has headroom.
    let origin = rect.world_center + Vec2::new(0.0, -rect.world_size.y * 0.25);
    let view = ViewTransform::new(origin, Vec2::new(50.0, 30.0));

    draw_grid_lines(commands, root, rect, &view, unit, materials, layers.clone());
    draw_axes(commands, root, rect, &view, unit, materials, layers.clone());

    let half = rect.world_size * 0.5;
    let min = rect.world_center - half;
    let max = rect.world_center + half;

    let curve_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::CYAN)));
    let tangent_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::EMERALD)));
    let secant_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::AMBER)));
    let probe_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::VIOLET)));

    let x0 = controls.probe_x;
    let probe = view.to_screen(DVec2::new(x0, f(x0)));

    commands.entity(root).with_children(|parent| {
        // The parabola, one sample per pixel column
        let mut prev: Option<Vec2> = None;
        let mut sx = min.x;
        while sx <= max.x {
            let x = view.to_math(Vec2::new(sx, 0.0)).x;
            let p = view.to_screen(DVec2::new(x, f(x)));
            let point =
                ((p.y - rect.world_center.y).abs() <= half.y + 50.0).then_some(p);
            if let (Some(a), Some(b)) = (prev, point) {
                spawn_segment(parent, unit, &curve_mat, a, b, 3.0, 1.0, &layers);
            }
            prev = point;
            sx += 1.0;
        }

        // Secant through (x0, f(x0)) and (x0+h, f(x0+h)), extended past both
        if controls.show_secant && controls.secant_h > 0.01 {
            let h = controls.secant_h;
            let x1 = x0 + h;
            let slope = (f(x1) - f(x0)) / h;

            let xa = x0 - 2.0;
            let xb = x1 + 2.0;
            let a = view.to_screen(DVec2::new(xa, f(x0) + slope * (xa - x0)));
            let b = view.to_screen(DVec2::new(xb, f(x0) + slope * (xb - x0)));
            spawn_dashed_segment(parent, unit, &secant_mat, a, b, 2.0, 1.3, &layers);

            let second = view.to_screen(DVec2::new(x1, f(x1)));
            spawn_marker(parent, unit, &secant_mat, second, 12.0, 2.4, &layers);
            spawn_label(
                parent,
                format!("secant (h = {h:.2})"),
                Vec2::new(rect.world_center.x, max.y - 40.0),
                11.0,
                Color::from(crate::core::Color::AMBER),
                &layers,
            );
        }

        // Tangent at the probe point
        let slope = f_prime(x0);
        let ta = view.to_screen(DVec2::new(x0 - 2.0, f(x0) - slope * 2.0));
        let tb = view.to_screen(DVec2::new(x0 + 2.0, f(x0) + slope * 2.0));
        spawn_segment(parent, unit, &tangent_mat, ta, tb, 2.0, 1.4, &layers);

        spawn_marker(parent, unit, &probe_mat, probe, 16.0, 2.5, &layers);
        spawn_label(
            parent,
            format!("({:.1}, {:.1})", x0, f(x0)),
            probe + Vec2::new(30.0, 16.0),
            11.0,
            Color::srgba(0.94, 0.94, 0.94, 1.0),
            &layers,
        );

        spawn_label(
            parent,
            format!("tangent slope = {slope:.2}"),
            Vec2::new(rect.world_center.x - half.x * 0.5, min.y + 26.0),
            11.0,
            Color::from(crate::core::Color::EMERALD),
            &layers,
        );
        spawn_label(
            parent,
            "←/→ point · s secant · ↑/↓ h",
            Vec2::new(rect.world_center.x, min.y + 12.0),
            10.0,
            Color::srgba(0.627, 0.627, 0.69, 0.9),
            &layers,
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secant_slope_approaches_tangent_slope() {
        let x0 = 1.0;
        let mut prev_gap = f64::INFINITY;
        for h in [2.0, 1.0, 0.5, 0.1, 0.05] {
            let secant = (f(x0 + h) - f(x0)) / h;
            let gap = (secant - f_prime(x0)).abs();
            assert!(gap < prev_gap, "gap grew at h={h}");
            prev_gap = gap;
        }
        // For f(x)=x² the secant slope is exactly 2x+h.
        assert!(((f(1.0 + 0.05) - f(1.0)) / 0.05 - 2.05).abs() < 1e-9);
    }
}
