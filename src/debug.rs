//! Debug dump (F3 default): writes diagnostics, player state and process
//! memory to a timestamped text file in `./debug-dumps/`.
use crate::physics::{Body2d, GroundSensor};
use crate::player::{GameOutcome, Player, PlayerController};
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};
use sysinfo::{Pid, ProcessExt, System, SystemExt};

pub const DUMP_DIR: &str = "debug-dumps";

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_input_system);
    }
}

/// Snapshot of one player for the dump.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDump {
    pub health: u32,
    pub alive: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub grounded: bool,
}

/// Convert kilobytes to a megabyte string, e.g. "123.45 MB".
fn kb_to_mb(kb: u64) -> String {
    format!("{:.2} MB", (kb as f64) / 1024.0)
}

/// Render the dump body.
#[must_use]
pub fn format_dump(
    human_ts: &str,
    fps: f64,
    frame_time: f64,
    entity_count: usize,
    outcome: GameOutcome,
    players: &[PlayerDump],
    settings: &Settings,
) -> String {
    let mut out = String::new();
    writeln!(out, "Timestamp: {human_ts}").ok();
    writeln!(out, "FPS: {fps:.1}, frame_time: {:.4} ms", frame_time * 1000.0).ok();
    writeln!(out, "Entities: {entity_count}").ok();
    writeln!(out, "Outcome: {outcome:?}").ok();

    writeln!(out, "\nPlayers:").ok();
    if players.is_empty() {
        writeln!(out, "  (none)").ok();
    }
    for p in players {
        writeln!(
            out,
            "  health={} alive={} pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) gravity_scale={:.2} grounded={}",
            p.health, p.alive, p.position.x, p.position.y, p.velocity.x, p.velocity.y, p.gravity_scale, p.grounded
        )
        .ok();
    }

    let t = &settings.player;
    writeln!(out, "\nTuning:").ok();
    writeln!(
        out,
        "  jump_height={} walk_speed={} fall_speed={} shooting_angle={} shooting_speed={}",
        t.jump_height, t.walk_speed, t.fall_speed, t.shooting_angle, t.shooting_speed
    )
    .ok();
    out
}

/// Listen for the dump key and write a dump file.
#[allow(clippy::needless_pass_by_value)]
fn debug_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    diagnostics: Res<DiagnosticsStore>,
    outcome: Res<GameOutcome>,
    query_entities: Query<Entity>,
    players: Query<(&PlayerController, &Transform, &Body2d, &GroundSensor), With<Player>>,
) {
    if !keys.just_pressed(settings.controls.key_for("dump_debug", KeyCode::F3)) {
        return;
    }

    let now = SystemTime::now();
    let ts_secs = now.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
    let dt: DateTime<Utc> = DateTime::from(now);
    let human_ts = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let fname = format!("{DUMP_DIR}/debug-{ts_secs}.txt");

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let player_dumps: Vec<PlayerDump> = players
        .iter()
        .map(|(c, tf, body, sensor)| PlayerDump {
            health: c.health(),
            alive: c.is_alive(),
            position: tf.translation.truncate(),
            velocity: body.velocity,
            gravity_scale: body.gravity_scale,
            grounded: sensor.overlapping,
        })
        .collect();

    let mut out = format_dump(
        &human_ts,
        fps,
        frame_time,
        query_entities.iter().count(),
        *outcome,
        &player_dumps,
        &settings,
    );

    let mut sys = System::new_all();
    sys.refresh_all();
    let proc = sys.process(Pid::from(std::process::id() as usize));
    writeln!(
        out,
        "\nProcess memory: {} (virtual {})",
        kb_to_mb(proc.map_or(0, |p| p.memory())),
        kb_to_mb(proc.map_or(0, |p| p.virtual_memory()))
    )
    .ok();
    writeln!(out, "System memory: total={} used={}", kb_to_mb(sys.total_memory()), kb_to_mb(sys.used_memory())).ok();

    if let Err(e) = fs::create_dir_all(DUMP_DIR) {
        error!("debug dump: failed to create dir '{}': {}", DUMP_DIR, e);
        return;
    }
    if let Err(e) = fs::write(&fname, out) {
        error!("debug dump: failed to write {}: {}", fname, e);
    } else {
        info!("wrote debug dump: {}", fname);
    }
}
