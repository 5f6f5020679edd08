//! Shared drawing utilities: the math-to-screen transform, borders, titles,
//! segments, arrows, grid and axes.

use crate::render::{TileRect, UnitMeshes};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_camera::visibility::RenderLayers;
use bevy_math::DVec2;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Linear map from math space to a tile's world space.
///
/// `screen = origin + point * scale`, componentwise. Scales are strictly
/// positive; the constructor clamps rather than trusting the caller. Every
/// element of a tile (grid, axes, curve, markers) goes through the same
/// instance, so they cannot desync. The old canvas version negated y here
/// because screen y grows downward; world space is y-up, so the camera
/// carries that flip instead.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    pub origin: Vec2,
    pub scale: Vec2,
}

impl ViewTransform {
    const MIN_SCALE: f32 = 1e-6;

    pub fn new(origin: Vec2, scale: Vec2) -> Self {
        Self {
            origin,
            scale: scale.max(Vec2::splat(Self::MIN_SCALE)),
        }
    }

    /// Uniform scale centered on the tile.
    pub fn centered(rect: &TileRect, pixels_per_unit: f32) -> Self {
        Self::new(rect.world_center, Vec2::splat(pixels_per_unit))
    }

    #[inline]
    pub fn to_screen(&self, p: DVec2) -> Vec2 {
        self.origin + Vec2::new(p.x as f32 * self.scale.x, p.y as f32 * self.scale.y)
    }

    #[inline]
    pub fn to_math(&self, screen: Vec2) -> DVec2 {
        let d = screen - self.origin;
        DVec2::new((d.x / self.scale.x) as f64, (d.y / self.scale.y) as f64)
    }
}

/// Whether a world point is inside the tile, with `margin` px of slack.
pub fn inside_tile(rect: &TileRect, p: Vec2, margin: f32) -> bool {
    let half = rect.world_size * 0.5 + Vec2::splat(margin);
    (p - rect.world_center).abs().cmple(half).all()
}

/// Draw a border around a tile rect.
pub fn draw_tile_border(
    commands: &mut Commands,
    root: Entity,
    rect: &TileRect,
    unit: &UnitMeshes,
    materials: &mut Assets<ColorMaterial>,
    layers: RenderLayers,
    color: Color,
    z: f32,
) {
    let border_mat = materials.add(ColorMaterial::from(color));
    let border_thickness = 2.0;

    commands.entity(root).with_children(|parent| {
        for (dx, dy) in [(0.0, 0.5), (0.0, -0.5), (-0.5, 0.0), (0.5, 0.0)] {
            parent.spawn((
                Mesh2d(unit.quad.clone()),
                MeshMaterial2d(border_mat.clone()),
                Transform {
                    translation: Vec3::new(
                        rect.world_center.x + dx * rect.world_size.x,
                        rect.world_center.y + dy * rect.world_size.y,
                        z,
                    ),
                    scale: if dx == 0.0 {
                        Vec3::new(rect.world_size.x, border_thickness, 1.0)
                    } else {
                        Vec3::new(border_thickness, rect.world_size.y, 1.0)
                    },
                    ..default()
                },
                layers.clone(),
            ));
        }
    });
}

/// Draw title and description for a tile.
/// Returns the height used by the title area.
pub fn draw_viz_title(
    commands: &mut Commands,
    root: Entity,
    meta: &crate::core::VizMeta,
    rect: &TileRect,
    layers: RenderLayers,
) -> f32 {
    let mut title_height = 0.0;

    if meta.title.is_none() && meta.description.is_none() {
        return title_height;
    }

    let title_y = rect.world_center.y + rect.world_size.y * 0.5 - 18.0;

    commands.entity(root).with_children(|parent| {
        if let Some(title) = &meta.title {
            parent.spawn((
                Text2d::new(title.clone()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.95)),
                Transform::from_translation(Vec3::new(rect.world_center.x, title_y, 3.0)),
                layers.clone(),
            ));
            title_height += 22.0;
        }

        if let Some(desc) = &meta.description {
            let desc_y = title_y - if meta.title.is_some() { 16.0 } else { 0.0 };
            parent.spawn((
                Text2d::new(desc.clone()),
                TextFont {
                    font_size: 10.0,
                    ..default()
                },
                TextColor(Color::srgba(0.7, 0.7, 0.7, 0.85)),
                Transform::from_translation(Vec3::new(rect.world_center.x, desc_y, 3.0)),
                layers,
            ));
            title_height += 14.0;
        }
    });

    title_height
}

/// Spawn one line segment as a rotated unit quad.
pub fn spawn_segment(
    parent: &mut ChildSpawnerCommands,
    unit: &UnitMeshes,
    mat: &Handle<ColorMaterial>,
    a: Vec2,
    b: Vec2,
    thickness: f32,
    z: f32,
    layers: &RenderLayers,
) {
    let length = a.distance(b);
    if length <= f32::EPSILON {
        return;
    }
    let angle = (b.y - a.y).atan2(b.x - a.x);

    parent.spawn((
        Mesh2d(unit.quad.clone()),
        MeshMaterial2d(mat.clone()),
        Transform {
            translation: ((a + b) * 0.5).extend(z),
            rotation: Quat::from_rotation_z(angle),
            scale: Vec3::new(length, thickness, 1.0),
        },
        layers.clone(),
    ));
}

/// Spawn a dashed segment between two points (4 px dashes, 3 px gaps).
pub fn spawn_dashed_segment(
    parent: &mut ChildSpawnerCommands,
    unit: &UnitMeshes,
    mat: &Handle<ColorMaterial>,
    a: Vec2,
    b: Vec2,
    thickness: f32,
    z: f32,
    layers: &RenderLayers,
) {
    let dash = 4.0;
    let gap = 3.0;
    let total = a.distance(b);
    if total <= f32::EPSILON {
        return;
    }
    let dir = (b - a) / total;

    let mut t = 0.0;
    while t < total {
        let end = (t + dash).min(total);
        spawn_segment(parent, unit, mat, a + dir * t, a + dir * end, thickness, z, layers);
        t += dash + gap;
    }
}

/// Spawn a filled dot.
pub fn spawn_marker(
    parent: &mut ChildSpawnerCommands,
    unit: &UnitMeshes,
    mat: &Handle<ColorMaterial>,
    pos: Vec2,
    diameter: f32,
    z: f32,
    layers: &RenderLayers,
) {
    parent.spawn((
        Mesh2d(unit.circle.clone()),
        MeshMaterial2d(mat.clone()),
        Transform {
            translation: pos.extend(z),
            scale: Vec3::splat(diameter),
            ..default()
        },
        layers.clone(),
    ));
}

/// Spawn a ring (unfilled circle) as short segments.
pub fn spawn_ring(
    parent: &mut ChildSpawnerCommands,
    unit: &UnitMeshes,
    mat: &Handle<ColorMaterial>,
    center: Vec2,
    radius: f32,
    thickness: f32,
    z: f32,
    layers: &RenderLayers,
) {
    let segments = 24;
    for i in 0..segments {
        let t0 = i as f32 / segments as f32 * std::f32::consts::TAU;
        let t1 = (i + 1) as f32 / segments as f32 * std::f32::consts::TAU;
        let a = center + Vec2::new(t0.cos(), t0.sin()) * radius;
        let b = center + Vec2::new(t1.cos(), t1.sin()) * radius;
        spawn_segment(parent, unit, mat, a, b, thickness, z, layers);
    }
}

/// Spawn a counterclockwise arc from angle 0 to `angle_rad`.
pub fn spawn_arc(
    parent: &mut ChildSpawnerCommands,
    unit: &UnitMeshes,
    mat: &Handle<ColorMaterial>,
    center: Vec2,
    radius: f32,
    angle_rad: f32,
    thickness: f32,
    z: f32,
    layers: &RenderLayers,
) {
    if angle_rad <= 0.0 {
        return;
    }
    let segments = ((angle_rad / std::f32::consts::TAU * 32.0).ceil() as usize).max(1);
    for i in 0..segments {
        let t0 = angle_rad * i as f32 / segments as f32;
        let t1 = angle_rad * (i + 1) as f32 / segments as f32;
        let a = center + Vec2::new(t0.cos(), t0.sin()) * radius;
        let b = center + Vec2::new(t1.cos(), t1.sin()) * radius;
        spawn_segment(parent, unit, mat, a, b, thickness, z, layers);
    }
}

/// Spawn an arrow: shaft segment plus a filled triangular head.
pub fn spawn_arrow(
    commands: &mut Commands,
    root: Entity,
    unit: &UnitMeshes,
    meshes: &mut Assets<Mesh>,
    mat: &Handle<ColorMaterial>,
    from: Vec2,
    to: Vec2,
    thickness: f32,
    z: f32,
    layers: &RenderLayers,
) {
    let head_len = 10.0;
    let dir = to - from;
    if dir.length() <= f32::EPSILON {
        return;
    }
    let angle = dir.y.atan2(dir.x);

    commands.entity(root).with_children(|parent| {
        spawn_segment(parent, unit, mat, from, to, thickness, z, layers);
    });

    // Filled head as a one-off triangle mesh
    let left = Vec2::new(
        to.x - head_len * (angle - std::f32::consts::FRAC_PI_6).cos(),
        to.y - head_len * (angle - std::f32::consts::FRAC_PI_6).sin(),
    );
    let right = Vec2::new(
        to.x - head_len * (angle + std::f32::consts::FRAC_PI_6).cos(),
        to.y - head_len * (angle + std::f32::consts::FRAC_PI_6).sin(),
    );

    let positions = vec![
        [to.x, to.y, 0.0],
        [left.x, left.y, 0.0],
        [right.x, right.y, 0.0],
    ];
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; 3];
    let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; 3];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(vec![0, 1, 2]));

    let head = meshes.add(mesh);
    commands.entity(root).with_children(|parent| {
        parent.spawn((
            Mesh2d(head),
            MeshMaterial2d(mat.clone()),
            Transform::from_translation(Vec3::new(0.0, 0.0, z)),
            layers.clone(),
        ));
    });
}

/// Integer-spaced grid lines across the tile.
pub fn draw_grid_lines(
    commands: &mut Commands,
    root: Entity,
    rect: &TileRect,
    view: &ViewTransform,
    unit: &UnitMeshes,
    materials: &mut Assets<ColorMaterial>,
    layers: RenderLayers,
) {
    let grid_mat = materials.add(ColorMaterial::from(Color::srgba(0.39, 0.39, 0.59, 0.25)));

    let half = rect.world_size * 0.5;
    let min = rect.world_center - half;
    let max = rect.world_center + half;

    let lo = view.to_math(min);
    let hi = view.to_math(max);

    commands.entity(root).with_children(|parent| {
        for i in (lo.x.floor() as i32)..=(hi.x.ceil() as i32) {
            let x = view.to_screen(DVec2::new(i as f64, 0.0)).x;
            if x < min.x || x > max.x {
                continue;
            }
            spawn_segment(
                parent,
                unit,
                &grid_mat,
                Vec2::new(x, min.y),
                Vec2::new(x, max.y),
                1.0,
                0.3,
                &layers,
            );
        }
        for j in (lo.y.floor() as i32)..=(hi.y.ceil() as i32) {
            let y = view.to_screen(DVec2::new(0.0, j as f64)).y;
            if y < min.y || y > max.y {
                continue;
            }
            spawn_segment(
                parent,
                unit,
                &grid_mat,
                Vec2::new(min.x, y),
                Vec2::new(max.x, y),
                1.0,
                0.3,
                &layers,
            );
        }
    });
}

/// Axis lines through the math origin, clipped to the tile.
pub fn draw_axes(
    commands: &mut Commands,
    root: Entity,
    rect: &TileRect,
    view: &ViewTransform,
    unit: &UnitMeshes,
    materials: &mut Assets<ColorMaterial>,
    layers: RenderLayers,
) {
    let axis_mat = materials.add(ColorMaterial::from(Color::srgba(0.627, 0.627, 0.69, 0.8)));
    let origin = view.to_screen(DVec2::ZERO);

    let half = rect.world_size * 0.5;
    let min = rect.world_center - half;
    let max = rect.world_center + half;

    commands.entity(root).with_children(|parent| {
        if origin.y >= min.y && origin.y <= max.y {
            spawn_segment(
                parent,
                unit,
                &axis_mat,
                Vec2::new(min.x, origin.y),
                Vec2::new(max.x, origin.y),
                2.0,
                0.5,
                &layers,
            );
        }
        if origin.x >= min.x && origin.x <= max.x {
            spawn_segment(
                parent,
                unit,
                &axis_mat,
                Vec2::new(origin.x, min.y),
                Vec2::new(origin.x, max.y),
                2.0,
                0.5,
                &layers,
            );
        }
    });
}

/// Small monospace-style annotation.
pub fn spawn_label(
    parent: &mut ChildSpawnerCommands,
    text: impl Into<String>,
    pos: Vec2,
    font_size: f32,
    color: Color,
    layers: &RenderLayers,
) {
    parent.spawn((
        Text2d::new(text.into()),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Transform::from_translation(pos.extend(3.0)),
        layers.clone(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_camera::Viewport;
    use bevy_math::UVec2;

    fn rect() -> TileRect {
        TileRect {
            world_center: Vec2::new(10.0, -20.0),
            world_size: Vec2::new(400.0, 300.0),
            viewport: Viewport {
                physical_position: UVec2::ZERO,
                physical_size: UVec2::new(400, 300),
                depth: 0.0..1.0,
            },
        }
    }

    #[test]
    fn transform_round_trips() {
        let view = ViewTransform::centered(&rect(), 40.0);
        for p in [DVec2::new(0.0, 0.0), DVec2::new(2.5, -1.25), DVec2::new(-3.0, 4.0)] {
            let back = view.to_math(view.to_screen(p));
            assert!((back - p).length() < 1e-5, "{p:?} -> {back:?}");
        }
    }

    #[test]
    fn scale_is_forced_positive() {
        let view = ViewTransform::new(Vec2::ZERO, Vec2::new(-5.0, 0.0));
        assert!(view.scale.x > 0.0);
        assert!(view.scale.y > 0.0);
    }

    #[test]
    fn unit_step_moves_by_scale() {
        let view = ViewTransform::new(Vec2::new(100.0, 50.0), Vec2::new(40.0, 15.0));
        let a = view.to_screen(DVec2::new(1.0, 0.0));
        let b = view.to_screen(DVec2::new(2.0, 1.0));
        assert!((b.x - a.x - 40.0).abs() < 1e-4);
        assert!((b.y - a.y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn inside_tile_respects_margin() {
        let r = rect();
        assert!(inside_tile(&r, r.world_center, 0.0));
        let outside = r.world_center + Vec2::new(201.0, 0.0);
        assert!(!inside_tile(&r, outside, 0.0));
        assert!(inside_tile(&r, outside, 10.0));
    }
}
