//! Dot-product / projection tile: the fixed vector A, the swept vector B,
//! B's shadow on A, the angle arc, and the numeric readout.

#![allow(clippy::too_many_arguments)]

use super::common::*;
use crate::core::VizMeta;
use crate::num::VectorPair;
use crate::render::{TileRect, UnitMeshes, VectorControls};
use bevy::prelude::*;
use bevy_camera::visibility::RenderLayers;

pub fn draw_vectors(
    commands: &mut Commands,
    root: Entity,
    meta: Option<&VizMeta>,
    controls: &VectorControls,
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

    let pair = VectorPair::new(controls.angle_deg);

    // Anchor the tails low-left so B has room to sweep the upper half-plane.
    let half = rect.world_size * 0.5;
    let anchor = rect.world_center + Vec2::new(-half.x * 0.6, -half.y * 0.4);
    // A spans 100 units; scale so it takes ~55% of the tile width.
    let view = ViewTransform::new(
        anchor,
        Vec2::splat(rect.world_size.x * 0.55 / crate::num::vector::A_LEN as f32),
    );

    let a_tip = view.to_screen(pair.a());
    let b_tip = view.to_screen(pair.b());
    let proj = view.to_screen(pair.projection_point());

    let a_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::CYAN)));
    let b_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::VIOLET)));
    let proj_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::EMERALD)));
    let helper_mat = materials.add(ColorMaterial::from(Color::srgba(0.627, 0.627, 0.69, 0.3)));
    let axis_mat = materials.add(ColorMaterial::from(Color::srgba(0.627, 0.627, 0.69, 0.5)));
    let arc_mat = materials.add(ColorMaterial::from(Color::from(crate::core::Color::AMBER)));

    // Perpendicular at 90° collapses the shadow to a point; skip it there,
    // like the lesson does.
    let projecting = controls.show_projection && (controls.angle_deg - 90.0).abs() > f64::EPSILON;

    commands.entity(root).with_children(|parent| {
        // Baseline through A
        spawn_segment(
            parent,
            unit,
            &axis_mat,
            anchor - Vec2::new(20.0, 0.0),
            Vec2::new(a_tip.x + 40.0, anchor.y),
            1.0,
            0.5,
            &layers,
        );

        if projecting {
            // Drop line from B's tip onto A's line
            spawn_dashed_segment(parent, unit, &helper_mat, b_tip, proj, 1.0, 0.8, &layers);
            // The shadow itself
            spawn_segment(parent, unit, &proj_mat, anchor, proj, 4.0, 1.2, &layers);
            spawn_label(
                parent,
                "projection",
                Vec2::new((anchor.x + proj.x) * 0.5, anchor.y - 16.0),
                11.0,
                Color::from(crate::core::Color::EMERALD),
                &layers,
            );
        }

        // Angle arc between A and B
        spawn_arc(
            parent,
            unit,
            &arc_mat,
            anchor,
            30.0,
            pair.angle_rad() as f32,
            2.0,
            1.4,
            &layers,
        );
        spawn_label(
            parent,
            format!("θ = {:.0}°", pair.angle_deg),
            anchor + Vec2::new(52.0, 18.0),
            11.0,
            Color::from(crate::core::Color::AMBER),
            &layers,
        );
    });

    spawn_arrow(
        commands, root, unit, meshes, &a_mat, anchor, a_tip, 3.0, 1.6, &layers,
    );
    spawn_arrow(
        commands, root, unit, meshes, &b_mat, anchor, b_tip, 3.0, 1.6, &layers,
    );

    commands.entity(root).with_children(|parent| {
        spawn_label(
            parent,
            "A",
            a_tip + Vec2::new(14.0, 10.0),
            14.0,
            Color::from(crate::core::Color::CYAN),
            &layers,
        );
        spawn_label(
            parent,
            "B",
            b_tip + Vec2::new(10.0, 12.0),
            14.0,
            Color::from(crate::core::Color::VIOLET),
            &layers,
        );

        // Numeric readout, top-right
        let info_x = rect.world_center.x + half.x - 90.0;
        let info_y = rect.world_center.y + half.y - 28.0;
        let lines = [
            (format!("A·B = {:.0}", pair.dot()), crate::core::Color::CYAN),
            (format!("|A| = {:.0}", crate::num::vector::A_LEN), crate::core::Color::SLATE),
            (format!("|B| = {:.0}", crate::num::vector::B_LEN), crate::core::Color::SLATE),
            (format!("cos(θ) = {:.3}", pair.cos_theta()), crate::core::Color::AMBER),
        ];
        for (i, (line, color)) in lines.iter().enumerate() {
            spawn_label(
                parent,
                line.clone(),
                Vec2::new(info_x, info_y - 15.0 * i as f32),
                11.0,
                Color::from(*color),
                &layers,
            );
        }

        spawn_label(
            parent,
            "←/→ angle · p projection",
            Vec2::new(rect.world_center.x, rect.world_center.y - half.y + 12.0),
            10.0,
            Color::srgba(0.627, 0.627, 0.69, 0.9),
            &layers,
        );
    });
}
