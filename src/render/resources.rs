use super::components::VizId;
use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};

#[derive(Resource, Clone)]
pub struct StudioRes(pub crate::core::Studio);

impl StudioRes {
    pub fn new(studio: crate::core::Studio) -> Self {
        Self(studio)
    }
}

#[derive(Resource, Default)]
pub struct TileRegistry {
    pub by_viz: HashMap<VizId, Entity>,
    pub camera_of: HashMap<VizId, Entity>,
    pub dirty: VecDeque<VizId>,
}

#[derive(Resource, Default)]
pub struct HoveredTile(pub Option<usize>);

#[derive(Resource)]
pub struct UnitMeshes {
    pub quad: Handle<Mesh>,
    pub circle: Handle<Mesh>,
}

pub fn setup_unit_meshes(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let quad = meshes.add(Mesh::from(Rectangle::new(1.0, 1.0)));
    let circle = meshes.add(Mesh::from(Circle::new(0.5)));
    commands.insert_resource(UnitMeshes { quad, circle });
}
