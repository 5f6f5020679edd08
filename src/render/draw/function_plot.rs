//! Interactive single-variable function plot.

#![allow(clippy::too_many_arguments)]

use super::common::*;
use crate::core::VizMeta;
use crate::render::{PlotControls, TileRect, UnitMeshes};
use bevy::prelude::*;
use bevy_camera::visibility::RenderLayers;
use bevy_math::DVec2;

/// How far past the tile edge a sample may map before the curve is broken
/// (the canvas original used the same 100 px slack).
const CLIP_MARGIN: f32 = 100.0;

pub fn draw_function_plot(
    commands: &mut Commands,
    root: Entity,
    meta: Option<&VizMeta>,
    controls: &PlotControls,
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

    let spec = &controls.spec;
    let view = ViewTransform::new(
        rect.world_center,
        Vec2::new(40.0, spec.display_scale_y() as f32),
    );

    draw_grid_lines(commands, root, rect, &view, unit, materials, layers.clone());
    draw_axes(commands, root, rect, &view, unit, materials, layers.clone());

    let style = controls.style;
    let curve_mat = materials.add(ColorMaterial::from(Color::from(
        style.color.with_a(style.opacity),
    )));

    let half = rect.world_size * 0.5;
    let min = rect.world_center - half;
    let max = rect.world_center + half;

    // Sample one point per world-pixel column; break the strip where the
    // curve leaves the tile (exponential blow-up) instead of failing.
    commands.entity(root).with_children(|parent| {
        let mut prev: Option<Vec2> = None;
        let mut sx = min.x;
        while sx <= max.x {
            let x = view.to_math(Vec2::new(sx, 0.0)).x;
            let y = spec.eval(x);

            let point = if y.is_finite() {
                let p = view.to_screen(DVec2::new(x, y));
                ((p.y - rect.world_center.y).abs() <= half.y + CLIP_MARGIN).then_some(p)
            } else {
                None
            };

            if let (Some(a), Some(b)) = (prev, point) {
                spawn_segment(parent, unit, &curve_mat, a, b, style.size, 1.0, &layers);
            }
            prev = point;
            sx += 1.0;
        }

        // Axis names and integer x markers
        let origin = view.to_screen(DVec2::ZERO);
        spawn_label(
            parent,
            "x",
            Vec2::new(max.x - 15.0, origin.y + 10.0),
            12.0,
            Color::srgba(0.627, 0.627, 0.69, 1.0),
            &layers,
        );
        spawn_label(
            parent,
            "y",
            Vec2::new(origin.x + 10.0, max.y - 15.0),
            12.0,
            Color::srgba(0.627, 0.627, 0.69, 1.0),
            &layers,
        );
        for i in -5..=5i32 {
            if i == 0 {
                continue;
            }
            let px = view.to_screen(DVec2::new(i as f64, 0.0)).x;
            if px < min.x + 8.0 || px > max.x - 8.0 {
                continue;
            }
            spawn_label(
                parent,
                i.to_string(),
                Vec2::new(px, origin.y - 12.0),
                10.0,
                Color::srgba(0.627, 0.627, 0.69, 0.9),
                &layers,
            );
        }

        // Formula readout, plus the control hint when there is a knob to turn
        let mut caption = spec.label();
        if let Some(name) = spec.param_name() {
            caption.push_str(&format!("   (↑/↓ adjusts {name})"));
        }
        spawn_label(
            parent,
            caption,
            Vec2::new(rect.world_center.x, min.y + 14.0),
            12.0,
            Color::from(style.color),
            &layers,
        );
    });
}
