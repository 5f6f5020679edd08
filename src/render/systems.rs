//! Tile lifecycle, input, and the frame loop.
//!
//! Controls target the hovered tile (tile 0 when nothing is hovered):
//! - descent: Space start/pause, R reset, M momentum, 1-4 surface,
//!   Up/Down learning rate
//! - function plot: Up/Down coefficient
//! - vectors: Left/Right angle, P projection on/off
//! - tangent: Left/Right probe point, S secant on/off, Up/Down secant h

use super::components::*;
use super::draw::*;
use super::resources::*;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_camera::visibility::RenderLayers;
use bevy_camera::{OrthographicProjection, Projection, ScalingMode, Viewport};
use bevy_math::UVec2;
use std::collections::HashSet;

use crate::core::Viz;
use crate::num::{Phase, SurfaceKind};

/// Core system: sync studio vizzes to tile entities
pub fn sync_vizzes_to_tiles(
    mut commands: Commands,
    studio: Res<StudioRes>,
    mut registry: ResMut<TileRegistry>,
    existing: Query<(Entity, &VizTile)>,
) {
    let viz_ids: Vec<VizId> = studio
        .0
        .vizzes
        .iter()
        .enumerate()
        .map(|(i, _)| VizId(i as u64))
        .collect();

    // Remove tiles for vizzes that no longer exist
    for (entity, tile) in existing.iter() {
        if !viz_ids.contains(&tile.id) {
            cleanup_tile(&mut commands, &mut registry, entity, tile.id);
        }
    }

    // Create missing tiles
    for (i, viz) in studio.0.vizzes.iter().enumerate() {
        let id = VizId(i as u64);

        if !registry.by_viz.contains_key(&id) {
            let tile = spawn_tile(&mut commands, id, i, viz);
            registry.by_viz.insert(id, tile);
            registry.dirty.push_back(id);
        }
    }
}

fn spawn_tile(commands: &mut Commands, id: VizId, index: usize, viz: &Viz) -> Entity {
    let kind = match viz {
        Viz::FunctionPlot(_) => VizKind::FunctionPlot,
        Viz::Descent(_) => VizKind::Descent,
        Viz::VectorDot(_) => VizKind::VectorDot,
        Viz::Tangent(_) => VizKind::Tangent,
    };

    let tile = commands
        .spawn((
            VizTile { id, index, kind },
            kind, // separate component for queries
            TileRect {
                world_center: Vec2::ZERO,
                world_size: Vec2::new(100.0, 100.0),
                viewport: Viewport {
                    physical_position: UVec2::ZERO,
                    physical_size: UVec2::new(100, 100),
                    depth: 0.0..1.0,
                },
            },
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    // Seed the live controls from the studio config
    match viz {
        Viz::FunctionPlot(plot) => {
            commands.entity(tile).insert(PlotControls {
                spec: plot.spec,
                style: plot.style,
            });
        }
        Viz::Descent(sim) => {
            commands.entity(tile).insert((
                SimControls {
                    learning_rate: sim.learning_rate,
                    momentum: sim.momentum,
                },
                SimState::new(sim.surface),
            ));
        }
        Viz::VectorDot(v) => {
            commands.entity(tile).insert(VectorControls {
                angle_deg: v.angle_deg,
                show_projection: v.show_projection,
            });
        }
        Viz::Tangent(t) => {
            commands.entity(tile).insert(TangentControls {
                probe_x: t.probe_x,
                show_secant: t.show_secant,
                secant_h: t.secant_h,
            });
        }
    }

    // Fresh render root child; redraws replace it wholesale
    let root = commands
        .spawn((TileRenderRoot, Transform::default(), Visibility::default()))
        .id();
    commands.entity(tile).add_child(root);

    tile
}

/// Update tile layout when the window resizes
pub fn update_tile_layout(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut registry: ResMut<TileRegistry>,
    mut tiles: Query<(&VizTile, &mut TileRect)>,
    studio: Res<StudioRes>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let n = studio.0.vizzes.len();
    if n == 0 {
        return;
    }

    let (cols, rows) = match studio.0.columns {
        Some(cols) => {
            let cols = cols.min(n).max(1);
            (cols, n.div_ceil(cols))
        }
        None => grid_dims(n, window.width() / window.height()),
    };

    let margin = 20.0;
    let gap = 10.0;

    let avail_w = window.width() - 2.0 * margin;
    let avail_h = window.height() - 2.0 * margin;

    let tile_w = (avail_w - (cols - 1) as f32 * gap) / cols as f32;
    let tile_h = (avail_h - (rows - 1) as f32 * gap) / rows as f32;

    for (tile, mut rect) in tiles.iter_mut() {
        let col = tile.index % cols;
        let row = tile.index / cols;

        // Viewport in physical pixels
        let vp_x = margin + col as f32 * (tile_w + gap);
        let vp_y = margin + row as f32 * (tile_h + gap);

        let scale = window.resolution.scale_factor() as f32;
        let phys_pos = UVec2::new((vp_x * scale).round() as u32, (vp_y * scale).round() as u32);
        let phys_size = UVec2::new(
            (tile_w * scale).round() as u32,
            (tile_h * scale).round() as u32,
        );

        // World coordinates (centered origin)
        let world_center = Vec2::new(
            vp_x + tile_w * 0.5 - window.width() * 0.5,
            window.height() * 0.5 - vp_y - tile_h * 0.5,
        );

        let new_size = Vec2::new(tile_w, tile_h);

        let changed = rect.world_center != world_center
            || rect.world_size != new_size
            || rect.viewport.physical_position != phys_pos
            || rect.viewport.physical_size != phys_size;

        if changed {
            rect.world_center = world_center;
            rect.world_size = new_size;
            rect.viewport = Viewport {
                physical_position: phys_pos,
                physical_size: phys_size,
                depth: 0.0..1.0,
            };

            registry.dirty.push_back(tile.id);
        }
    }
}

/// Create/update a 2D camera per tile
pub fn sync_tile_cameras(
    mut commands: Commands,
    mut registry: ResMut<TileRegistry>,
    tiles: Query<(&VizTile, &TileRect)>,
    existing: Query<Entity, With<TileCamera>>,
) {
    let mut used = HashSet::new();

    for (tile, rect) in tiles.iter() {
        // One layer per tile index (0..31); hard RenderLayers limitation.
        let layer = (tile.index % 32) as u8;
        let layers = RenderLayers::layer(layer.into());

        let cam_entity = if let Some(&cam) = registry.camera_of.get(&tile.id) {
            cam
        } else {
            let cam = commands.spawn((TileCamera, Transform::default())).id();
            registry.camera_of.insert(tile.id, cam);
            cam
        };

        used.insert(cam_entity);

        let mut ortho = OrthographicProjection::default_2d();
        ortho.scaling_mode = ScalingMode::FixedVertical {
            viewport_height: rect.world_size.y,
        };

        commands.entity(cam_entity).insert((
            Camera2d::default(),
            Camera {
                viewport: Some(rect.viewport.clone()),
                order: 10 + tile.index as isize,
                ..default()
            },
            Projection::from(ortho),
            Transform::from_translation(rect.world_center.extend(1000.0)),
            layers,
        ));
    }

    for cam_entity in existing.iter() {
        if !used.contains(&cam_entity) {
            commands.entity(cam_entity).despawn();
        }
    }
}

/// Hover detection; controls go to the hovered tile
pub fn update_hovered_tile(
    windows: Query<&Window>,
    tiles: Query<(&VizTile, &TileRect)>,
    mut hovered: ResMut<HoveredTile>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    hovered.0 = tiles
        .iter()
        .find(|(_, rect)| {
            let half = rect.world_size * 0.5;
            let min = rect.world_center - half;
            let max = rect.world_center + half;

            let world_x = cursor.x - window.width() * 0.5;
            let world_y = window.height() * 0.5 - cursor.y;

            world_x >= min.x && world_x <= max.x && world_y >= min.y && world_y <= max.y
        })
        .map(|(tile, _)| tile.index);
}

/// Map keyboard input onto the targeted tile's controls.
///
/// Mutations apply synchronously to the components the next tick/draw reads,
/// so the latest input always wins before the next frame.
pub fn handle_controls(
    mut tiles: Query<(
        &VizTile,
        Option<&mut PlotControls>,
        Option<&mut SimControls>,
        Option<&mut SimState>,
        Option<&mut VectorControls>,
        Option<&mut TangentControls>,
    )>,
    mut registry: ResMut<TileRegistry>,
    hovered: Res<HoveredTile>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    if keys.get_just_pressed().next().is_none() {
        return;
    }

    let target = hovered.0.unwrap_or(0);

    for (tile, plot, sim_controls, sim_state, vector, tangent) in tiles.iter_mut() {
        if tile.index != target {
            continue;
        }

        let mut changed = false;

        if let (Some(mut controls), Some(mut state)) = (sim_controls, sim_state) {
            let state = &mut state.0;

            if keys.just_pressed(KeyCode::Space) {
                if state.is_running() {
                    state.pause();
                } else {
                    state.start();
                }
                changed = true;
            }
            if keys.just_pressed(KeyCode::KeyR) {
                state.reset();
                changed = true;
            }
            if keys.just_pressed(KeyCode::KeyM) {
                // Toggling the update rule invalidates the trail
                controls.momentum = !controls.momentum;
                state.reset();
                changed = true;
            }
            for (key, surface) in [
                (KeyCode::Digit1, SurfaceKind::Bowl),
                (KeyCode::Digit2, SurfaceKind::Rosenbrock),
                (KeyCode::Digit3, SurfaceKind::Beale),
                (KeyCode::Digit4, SurfaceKind::Himmelblau),
            ] {
                if keys.just_pressed(key) && state.surface != surface {
                    state.set_surface(surface);
                    changed = true;
                }
            }
            if keys.just_pressed(KeyCode::ArrowUp) {
                controls.learning_rate = (controls.learning_rate + SimControls::LR_STEP)
                    .clamp(SimControls::LR_MIN, SimControls::LR_MAX);
                changed = true;
            }
            if keys.just_pressed(KeyCode::ArrowDown) {
                controls.learning_rate = (controls.learning_rate - SimControls::LR_STEP)
                    .clamp(SimControls::LR_MIN, SimControls::LR_MAX);
                changed = true;
            }
        } else if let Some(mut plot) = plot {
            let step = 0.1;
            if keys.just_pressed(KeyCode::ArrowUp) {
                if let Some(p) = plot.spec.param() {
                    plot.spec.set_param(p + step);
                    changed = true;
                }
            }
            if keys.just_pressed(KeyCode::ArrowDown) {
                if let Some(p) = plot.spec.param() {
                    plot.spec.set_param(p - step);
                    changed = true;
                }
            }
        } else if let Some(mut vector) = vector {
            if keys.just_pressed(KeyCode::ArrowRight) {
                vector.angle_deg = (vector.angle_deg + 5.0).clamp(0.0, 180.0);
                changed = true;
            }
            if keys.just_pressed(KeyCode::ArrowLeft) {
                vector.angle_deg = (vector.angle_deg - 5.0).clamp(0.0, 180.0);
                changed = true;
            }
            if keys.just_pressed(KeyCode::KeyP) {
                vector.show_projection = !vector.show_projection;
                changed = true;
            }
        } else if let Some(mut tangent) = tangent {
            if keys.just_pressed(KeyCode::ArrowRight) {
                tangent.probe_x = (tangent.probe_x + 0.1).clamp(-3.0, 3.0);
                changed = true;
            }
            if keys.just_pressed(KeyCode::ArrowLeft) {
                tangent.probe_x = (tangent.probe_x - 0.1).clamp(-3.0, 3.0);
                changed = true;
            }
            if keys.just_pressed(KeyCode::KeyS) {
                tangent.show_secant = !tangent.show_secant;
                changed = true;
            }
            if keys.just_pressed(KeyCode::ArrowUp) {
                tangent.secant_h = (tangent.secant_h + 0.05).clamp(0.05, 2.0);
                changed = true;
            }
            if keys.just_pressed(KeyCode::ArrowDown) {
                tangent.secant_h = (tangent.secant_h - 0.05).clamp(0.05, 2.0);
                changed = true;
            }
        }

        if changed {
            registry.dirty.push_back(tile.id);
        }
    }
}

/// Advance every running simulation one step per frame.
///
/// The tick is atomic (gradient, update, path append, convergence check)
/// and the tile is redrawn in the same frame by `draw_dirty_tiles`.
pub fn advance_simulations(
    mut registry: ResMut<TileRegistry>,
    mut sims: Query<(&VizTile, &SimControls, &mut SimState)>,
) {
    for (tile, controls, mut state) in sims.iter_mut() {
        if !state.0.is_running() {
            continue;
        }

        let phase = state.0.tick(controls.learning_rate, controls.momentum);
        registry.dirty.push_back(tile.id);

        if phase == Phase::Converged {
            info!(
                "descent on {} stopped after {} steps (loss {:.6})",
                state.0.surface.name(),
                state.0.step_count,
                state.0.loss()
            );
        }
    }
}

/// Redraw dirty tiles from scratch: despawn the tile's render root, spawn a
/// fresh one, repaint everything. No partial invalidation.
pub fn draw_dirty_tiles(
    mut commands: Commands,
    mut registry: ResMut<TileRegistry>,
    tiles: Query<(
        Entity,
        &VizTile,
        &TileRect,
        Option<&PlotControls>,
        Option<&SimControls>,
        Option<&SimState>,
        Option<&VectorControls>,
        Option<&TangentControls>,
    )>,
    children_q: Query<&Children>,
    is_root_q: Query<(), With<TileRenderRoot>>,
    studio: Res<StudioRes>,
    unit: Res<UnitMeshes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // A tile can be queued more than once per frame (tick + control change);
    // draw it once.
    let mut drawn = HashSet::new();

    while let Some(id) = registry.dirty.pop_front() {
        if !drawn.insert(id) {
            continue;
        }

        let Some(&tile_entity) = registry.by_viz.get(&id) else {
            continue;
        };

        let Ok((_e, tile, rect, plot, sim_controls, sim_state, vector, tangent)) =
            tiles.get(tile_entity)
        else {
            continue;
        };

        // 1) Remove previous render root(s) under this tile (keep the tile)
        if let Ok(children) = children_q.get(tile_entity) {
            for child in children.iter() {
                if is_root_q.get(child).is_ok() {
                    commands.entity(child).try_despawn();
                }
            }
        }

        // 2) Fresh render root
        let root = commands
            .spawn((TileRenderRoot, Transform::default(), Visibility::default()))
            .id();
        commands.entity(tile_entity).add_child(root);

        // 3) Repaint by kind
        let meta = studio.0.vizzes.get(tile.index).map(Viz::meta);
        let layers = RenderLayers::layer(tile.index % 32);

        match tile.kind {
            VizKind::FunctionPlot => {
                if let Some(plot) = plot {
                    draw_function_plot(
                        &mut commands,
                        root,
                        meta,
                        plot,
                        rect,
                        &unit,
                        &mut materials,
                        layers,
                    );
                }
            }
            VizKind::Descent => {
                if let (Some(controls), Some(state)) = (sim_controls, sim_state) {
                    draw_descent(
                        &mut commands,
                        root,
                        meta,
                        controls,
                        &state.0,
                        rect,
                        &unit,
                        &mut meshes,
                        &mut materials,
                        layers,
                    );
                }
            }
            VizKind::VectorDot => {
                if let Some(vector) = vector {
                    draw_vectors(
                        &mut commands,
                        root,
                        meta,
                        vector,
                        rect,
                        &unit,
                        &mut meshes,
                        &mut materials,
                        layers,
                    );
                }
            }
            VizKind::Tangent => {
                if let Some(tangent) = tangent {
                    draw_tangent(
                        &mut commands,
                        root,
                        meta,
                        tangent,
                        rect,
                        &unit,
                        &mut materials,
                        layers,
                    );
                }
            }
        }
    }
}

// Utility functions for grid layout
fn grid_dims(n: usize, aspect: f32) -> (usize, usize) {
    match n {
        0 => (0, 0),
        1 => (1, 1),
        2 => {
            if aspect > 1.35 {
                (2, 1)
            } else {
                (1, 2)
            }
        }
        3 => {
            if aspect > 1.35 {
                (3, 1)
            } else {
                (2, 2)
            }
        }
        _ => {
            let cols = (n as f32).sqrt().ceil() as usize;
            let rows = n.div_ceil(cols);
            (cols, rows)
        }
    }
}

fn cleanup_tile(commands: &mut Commands, registry: &mut TileRegistry, entity: Entity, id: VizId) {
    commands.entity(entity).despawn();
    registry.by_viz.remove(&id);
    registry.camera_of.remove(&id);
}
