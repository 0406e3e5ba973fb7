use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use gadget::debug::DebugDumpPlugin;
use gadget::gameplay::{GameSet, GameplayPlugin};
use gadget::settings::loader::{self as settings_loader, SETTINGS_DIR};
use gadget::ui::{
    render_collider_gizmos, setup_debug_overlay, spawn_hud, toggle_debug_views, update_debug_overlay,
    update_hud,
};

mod app;
use app::{follow_player, setup};

fn main() {
    let settings = settings_loader::load_settings_from_dir(SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(SETTINGS_DIR).unwrap_or_else(|e| {
        eprintln!("settings hot-reload disabled: {e}");
        settings_loader::SettingsWatcher::stub()
    });

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Gadget".to_string(),
            position: WindowPosition::Centered(MonitorSelection::Primary),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(FrameTimeDiagnosticsPlugin)
    .add_plugins(LogDiagnosticsPlugin::default())
    .add_plugins(GameplayPlugin)
    .add_plugins(DebugDumpPlugin);

    app.insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)));
    app.insert_resource(settings);
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup_debug_overlay);
    app.add_systems(Startup, spawn_hud);
    app.add_systems(Startup, setup);
    app.add_systems(Update, settings_loader::check_settings_changes.before(GameSet::Sense));
    app.add_systems(Update, toggle_debug_views);
    app.add_systems(Update, update_debug_overlay);
    app.add_systems(Update, update_hud.after(GameSet::React));
    app.add_systems(Update, render_collider_gizmos);
    app.add_systems(Update, follow_player.after(GameSet::Physics));

    app.run();
}
