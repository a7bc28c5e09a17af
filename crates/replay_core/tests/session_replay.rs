//! End-to-end replay over a synthetic stream: correlation, the builtin
//! plugin set, playback to the last frame, and persistence of the
//! plugin set across sessions.

use replay_core::capture::SyntheticCapture;
use replay_core::correlate::GazeIndex;
use replay_core::models::GazeSample;
use replay_core::plugins::{PluginCatalog, PluginScheduler, DEFAULT_PLUGINS};
use replay_core::session::{HeadlessDisplay, SessionReport, SessionRuntime};
use replay_core::settings::SettingsManager;

fn timestamps(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64 * 0.004).collect()
}

/// One centered gaze sample per frame timestamp.
fn gaze_for(timestamps: &[f64]) -> Vec<GazeSample> {
    timestamps
        .iter()
        .map(|&ts| GazeSample::new(ts, 0.5, 0.5))
        .collect()
}

fn replay_with_defaults(frame_count: usize) -> SessionReport {
    let ts = timestamps(frame_count);
    let gaze = GazeIndex::build(&gaze_for(&ts), &ts);
    let capture = SyntheticCapture::new(ts, (320, 240));
    let display = HeadlessDisplay::new((320, 240)).close_after_frame(frame_count - 1);

    let mut scheduler = PluginScheduler::new(PluginCatalog::builtin());
    scheduler.open_defaults();

    let mut runtime = SessionRuntime::new(capture, display, gaze, scheduler);
    runtime.set_playing(true);
    runtime.run().unwrap()
}

#[test]
fn full_replay_presents_every_frame_once() {
    let ts = timestamps(5);
    let gaze = GazeIndex::build(&gaze_for(&ts), &ts);
    assert_eq!(gaze.frame_count(), 5);
    assert_eq!(gaze.sample_count(), 5);

    let capture = SyntheticCapture::new(ts, (320, 240));
    let display = HeadlessDisplay::new((320, 240)).close_after_frame(4);
    let mut scheduler = PluginScheduler::new(PluginCatalog::builtin());
    scheduler.open_defaults();

    let mut runtime = SessionRuntime::new(capture, display, gaze, scheduler);
    runtime.set_playing(true);
    let report = runtime.run().unwrap();

    assert_eq!(report.frames_presented, 5);
    assert_eq!(runtime.display().last_presented_index(), Some(4));
}

#[test]
fn default_plugins_survive_a_session_in_execution_order() {
    let report = replay_with_defaults(3);

    let names: Vec<&str> = report
        .plugin_initializers
        .iter()
        .map(|init| init.name.as_str())
        .collect();
    // Execution order follows the order keys, not the default list.
    assert_eq!(names, vec!["scan_path", "gaze_polyline", "gaze_circle"]);
}

#[test]
fn plugin_set_round_trips_through_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session_settings.json");

    // First session: no saved state, the defaults run and are persisted.
    let mut settings = SettingsManager::new(&path);
    settings.load_or_create().unwrap();
    assert!(settings.settings().plugins.is_none());

    let report = replay_with_defaults(3);
    settings.settings_mut().plugins = Some(report.plugin_initializers);
    settings.save().unwrap();

    // Second session: the saved set is restored instead of the defaults.
    let mut settings = SettingsManager::new(&path);
    settings.load_or_create().unwrap();
    let saved = settings.settings().plugins.clone().expect("saved plugin set");
    assert_eq!(saved.len(), DEFAULT_PLUGINS.len());

    let mut scheduler = PluginScheduler::new(PluginCatalog::builtin());
    scheduler.restore(&saved);
    assert_eq!(
        scheduler.live_kinds(),
        vec!["scan_path", "gaze_polyline", "gaze_circle"]
    );
}
