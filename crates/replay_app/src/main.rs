//! gaze-replay entry point.
//!
//! Wires a recording directory into a replay session: loads and
//! validates the recording, correlates gaze to frames, restores the
//! plugin set from the previous run, replays the stream, and persists
//! the surviving plugin set for the next run.
//!
//! Usage:
//!   gaze-replay <recording-dir>

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use directories::ProjectDirs;

use replay_core::capture::SyntheticCapture;
use replay_core::correlate::GazeIndex;
use replay_core::plugins::{PluginCatalog, PluginScheduler};
use replay_core::recording::Recording;
use replay_core::session::{HeadlessDisplay, SessionResult, SessionRuntime};
use replay_core::settings::{window_scale, SettingsManager};

const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// World camera resolution the synthetic decoder reports.
const FRAME_SIZE: (u32, u32) = (1280, 720);

fn main() -> ExitCode {
    let Some(recording_dir) = parse_args() else {
        eprintln!("Usage: gaze-replay <recording-dir>");
        return ExitCode::from(2);
    };

    let dirs = ProjectDirs::from("io.github", "wingedonezero", "gaze-replay");
    let (settings_path, log_dir) = match &dirs {
        Some(d) => (
            d.config_dir().join("session_settings.json"),
            d.data_dir().join("logs"),
        ),
        None => (
            PathBuf::from("session_settings.json"),
            PathBuf::from("logs"),
        ),
    };

    let _log_guard = match replay_core::logging::init_with_file(&log_dir, DEFAULT_LOG_DIRECTIVE) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging unavailable: {}. Using stderr only.", e);
            replay_core::logging::init_tracing(DEFAULT_LOG_DIRECTIVE);
            None
        }
    };

    tracing::info!("gaze-replay {} starting", replay_core::version());
    tracing::info!("recording: {}", recording_dir.display());
    tracing::info!("settings: {}", settings_path.display());

    match run(&recording_dir, &settings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("session failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Option<PathBuf> {
    let mut args = std::env::args_os().skip(1);
    let dir = args.next()?;
    if args.next().is_some() {
        return None;
    }
    Some(PathBuf::from(dir))
}

fn run(recording_dir: &Path, settings_path: &Path) -> SessionResult<()> {
    let recording = Recording::load(recording_dir)?;
    let gaze = GazeIndex::build(&recording.gaze, &recording.timestamps);
    tracing::info!(
        "correlated {} gaze samples over {} frames",
        gaze.sample_count(),
        gaze.frame_count()
    );

    let capture = SyntheticCapture::new(recording.timestamps.clone(), FRAME_SIZE);

    let mut settings = SettingsManager::new(settings_path);
    settings.load_or_create()?;

    let mut scheduler = PluginScheduler::new(PluginCatalog::builtin());
    match settings.settings().plugins.as_deref() {
        Some(saved) => scheduler.restore(saved),
        None => scheduler.open_defaults(),
    }

    let scale = window_scale(settings.settings().window_size);
    let window = (
        (FRAME_SIZE.0 as f64 * scale).round() as u32,
        (FRAME_SIZE.1 as f64 * scale).round() as u32,
    );
    // Replay the full stream once, then shut down.
    let last_frame = recording.frame_count().saturating_sub(1);
    let display = HeadlessDisplay::new(window).close_after_frame(last_frame);

    let mut runtime = SessionRuntime::new(capture, display, gaze, scheduler);
    runtime.set_playing(true);
    let report = runtime.run()?;
    tracing::info!("presented {} frames", report.frames_presented);

    settings.settings_mut().plugins = Some(report.plugin_initializers);
    settings.settings_mut().last_run = Some(run_stamp());
    settings.save()?;

    Ok(())
}

/// RFC 3339 wall-clock stamp persisted as `last_run`.
fn run_stamp() -> String {
    chrono::Local::now().to_rfc3339()
}
