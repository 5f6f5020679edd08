//! Gradient-descent simulator tile: loss heatmap, integer grid, the descent
//! trail, the ball, reference minima, and a status readout.

#![allow(clippy::too_many_arguments)]

use super::common::*;
use crate::core::{LossShading, VizMeta};
use crate::num::OptimizerState;
use crate::render::{SimControls, TileRect, UnitMeshes};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_camera::visibility::RenderLayers;
use bevy_math::DVec2;
use bevy_mesh::{Indices, PrimitiveTopology};

use crate::num::Phase;

/// Heatmap sampling stride in world pixels. The canvas original sampled
/// every 3rd pixel; slightly coarser cells read the same at mesh density.
const HEAT_STRIDE: f32 = 4.0;

pub fn draw_descent(
    commands: &mut Commands,
    root: Entity,
    meta: Option<&VizMeta>,
    controls: &SimControls,
    state: &OptimizerState,
    rect: &TileRect,
    unit: &UnitMeshes,
    meshes: &mut Assets<Mesh>,
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

    let surface = state.surface;
    let display = surface.display();
    let pixels_per_unit =
        (rect.world_size.x.min(rect.world_size.y) as f64 / display.zoom_divisor) as f32;
    let view = ViewTransform::centered(rect, pixels_per_unit);

    draw_heatmap(commands, root, state, &view, rect, meshes, materials, &layers);
    draw_grid_lines(commands, root, rect, &view, unit, materials, layers.clone());

    let half = rect.world_size * 0.5;
    let min = rect.world_center - half;

    commands.entity(root).with_children(|parent| {
        // Descent trail; color tells the update rule apart at a glance
        let trail_color = if controls.momentum {
            crate::core::Color::EMERALD
        } else {
            crate::core::Color::AMBER
        };
        let trail_mat = materials.add(ColorMaterial::from(Color::from(trail_color)));
        for window in state.path.windows(2) {
            let a = view.to_screen(window[0]);
            let b = view.to_screen(window[1]);
            if !inside_tile(rect, a, 0.0) && !inside_tile(rect, b, 0.0) {
                continue;
            }
            spawn_segment(parent, unit, &trail_mat, a, b, 2.0, 1.5, &layers);
        }

        // Reference minima
        let min_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::EMERALD)));
        for &(mx, my) in surface.minima() {
            let p = view.to_screen(DVec2::new(mx, my));
            if !inside_tile(rect, p, 0.0) {
                continue;
            }
            spawn_ring(parent, unit, &min_mat, p, 12.0, 2.0, 2.0, &layers);
            spawn_label(
                parent,
                "min",
                p + Vec2::new(0.0, -22.0),
                10.0,
                Color::from(crate::core::Color::EMERALD),
                &layers,
            );
        }

        // The ball, with a soft halo under it
        let ball = view.to_screen(state.position);
        if inside_tile(rect, ball, CLIP_SLACK) {
            let halo_mat = materials.add(ColorMaterial::from(Color::srgba(0.0, 0.83, 1.0, 0.25)));
            spawn_marker(parent, unit, &halo_mat, ball, 40.0, 2.4, &layers);
            let ball_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::CYAN)));
            spawn_marker(parent, unit, &ball_mat, ball, 16.0, 2.5, &layers);
        }

        // Status readout
        let text_color = Color::srgba(0.94, 0.94, 0.94, 1.0);
        let lines = [
            format!(
                "pos ({:.2}, {:.2})   loss {:.4}",
                state.position.x,
                state.position.y,
                state.loss()
            ),
            format!(
                "steps {}   lr {:.2}   momentum {}",
                state.step_count,
                controls.learning_rate,
                if controls.momentum { "on" } else { "off" }
            ),
            format!("{} — {}", surface.name(), phase_label(state.phase)),
        ];
        for (i, line) in lines.iter().enumerate() {
            spawn_label(
                parent,
                line.clone(),
                Vec2::new(
                    rect.world_center.x,
                    rect.world_center.y + half.y - 40.0 - 16.0 * i as f32,
                ),
                11.0,
                text_color,
                &layers,
            );
        }
        spawn_label(
            parent,
            surface.description(),
            Vec2::new(rect.world_center.x, min.y + 26.0),
            10.0,
            Color::srgba(0.7, 0.7, 0.7, 0.85),
            &layers,
        );
        spawn_label(
            parent,
            "space run/pause · r reset · m momentum · 1-4 surface · ↑/↓ lr",
            Vec2::new(rect.world_center.x, min.y + 12.0),
            10.0,
            Color::srgba(0.627, 0.627, 0.69, 0.9),
            &layers,
        );
    });
}

const CLIP_SLACK: f32 = 30.0;

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Running => "running",
        Phase::Paused => "paused",
        Phase::Converged => "stopped",
    }
}

/// Sample the loss surface on a fixed-stride grid and upload it as a single
/// vertex-colored mesh. Per-cell quads (the labelled-heatmap approach) would
/// mean thousands of materials per redraw at this resolution.
fn draw_heatmap(
    commands: &mut Commands,
    root: Entity,
    state: &OptimizerState,
    view: &ViewTransform,
    rect: &TileRect,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    layers: &RenderLayers,
) {
    let surface = state.surface;
    let shading = LossShading::new(surface.display().color_scale);

    let cols = (rect.world_size.x / HEAT_STRIDE).ceil() as usize;
    let rows = (rect.world_size.y / HEAT_STRIDE).ceil() as usize;
    if cols == 0 || rows == 0 {
        return;
    }

    let half = rect.world_size * 0.5;
    let origin = rect.world_center - half;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(rows * cols * 4);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(rows * cols * 4);
    let mut indices: Vec<u32> = Vec::with_capacity(rows * cols * 6);

    for row in 0..rows {
        for col in 0..cols {
            let x0 = origin.x + col as f32 * HEAT_STRIDE;
            let y0 = origin.y + row as f32 * HEAT_STRIDE;
            let x1 = (x0 + HEAT_STRIDE).min(origin.x + rect.world_size.x);
            let y1 = (y0 + HEAT_STRIDE).min(origin.y + rect.world_size.y);

            let center = view.to_math(Vec2::new((x0 + x1) * 0.5, (y0 + y1) * 0.5));
            let c = shading.sample(surface.eval(center.x, center.y));
            let rgba = [c.r, c.g, c.b, 1.0];

            let base = positions.len() as u32;
            positions.extend_from_slice(&[
                [x0, y0, 0.0],
                [x1, y0, 0.0],
                [x1, y1, 0.0],
                [x0, y1, 0.0],
            ]);
            colors.extend_from_slice(&[rgba; 4]);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    let vertex_count = positions.len();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; vertex_count];
    let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; vertex_count];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));

    let heat_mesh = meshes.add(mesh);
    let heat_mat = materials.add(ColorMaterial::from(Color::WHITE));

    commands.entity(root).with_children(|parent| {
        parent.spawn((
            Mesh2d(heat_mesh),
            MeshMaterial2d(heat_mat),
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.0)),
            layers.clone(),
        ));
    });
}
