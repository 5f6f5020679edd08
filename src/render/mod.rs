pub mod components;
pub mod draw;
pub mod resources;
pub mod systems;

use components::*;
use draw::*;
pub use resources::*;
use systems::*;

use bevy::prelude::*;

#[derive(Default)]
pub struct StudioRenderPlugin;

impl Plugin for StudioRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileRegistry>()
            .init_resource::<HoveredTile>()
            .add_systems(Startup, setup_unit_meshes)
            .add_systems(
                Update,
                (
                    sync_vizzes_to_tiles,
                    update_tile_layout,
                    sync_tile_cameras,
                    update_hovered_tile,
                    handle_controls,
                    advance_simulations,
                    draw_dirty_tiles,
                )
                    .chain(),
            );
    }
}
