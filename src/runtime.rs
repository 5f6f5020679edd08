use bevy::prelude::*;
use parking_lot::Once;

use crate::core::Studio;
use crate::render::{StudioRenderPlugin, StudioRes};

static RUNTIME_INIT: Once = Once::new();

/// Process-wide one-time setup (panic hook on wasm, a startup log line).
///
/// Explicit and idempotent so embedding pages can call it eagerly at startup
/// instead of relying on module-load side effects; `run_studio` also calls it,
/// so casual callers never have to.
pub fn init_runtime() {
    RUNTIME_INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        info!("gradi runtime initialized");
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_studio(studio: Studio) {
    init_runtime();
    let bg = studio.background;
    App::new()
        .insert_resource(ClearColor(Color::srgb(bg.r, bg.g, bg.b)))
        .insert_resource(StudioRes::new(studio))
        .add_plugins((
            DefaultPlugins.set(ImagePlugin::default_nearest()),
            StudioRenderPlugin,
        ))
        .run();
}

#[cfg(target_arch = "wasm32")]
pub fn run_studio(studio: Studio, canvas_id: &str) {
    init_runtime();
    let bg = studio.background;
    App::new()
        .insert_resource(ClearColor(Color::srgb(bg.r, bg.g, bg.b)))
        .insert_resource(StudioRes::new(studio))
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        canvas: Some(format!("#{}", canvas_id)),
                        fit_canvas_to_parent: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
            StudioRenderPlugin,
        ))
        .run();
}
