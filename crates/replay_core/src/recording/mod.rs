//! Recording directory layout and loading.
//!
//! A recording directory contains:
//! - `world.<ext>`       the video stream
//! - `timestamps`        one float64 per frame, recording-relative seconds
//! - `gaze_positions`    rows of `timestamp x y [extras...]`
//! - `info`              tab-separated key/value metadata
//!
//! Validation is a boolean predicate gating execution; a directory missing
//! required files is a fatal, user-reported condition, not a crash.

mod info;
mod loader;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use info::{patch_info, RecordingInfo, KEY_RECORDING_NAME, KEY_SOFTWARE_VERSION};
pub use loader::{load_gaze_positions, load_timestamps};

use crate::models::GazeSample;

/// Video container extensions accepted for the `world` stream.
pub const VIDEO_EXTENSIONS: &[&str] = &["avi", "mkv", "mp4", "mov"];

/// Errors raised while validating or loading a recording directory.
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("not a recording directory (required files missing): {0}")]
    InvalidDirectory(PathBuf),

    #[error("required file not found: {0}")]
    MissingFile(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {file} line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    #[error("{file} is not sorted by timestamp at row {row}")]
    Unordered { file: String, row: usize },
}

/// Result type for recording operations.
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Locate the `world.<ext>` video file in a recording directory.
pub fn find_world_video(dir: &Path) -> Option<PathBuf> {
    VIDEO_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("world.{ext}")))
        .find(|p| p.is_file())
}

/// Whether the directory holds all files a recording requires.
pub fn is_recording_dir(dir: &Path) -> bool {
    dir.is_dir()
        && find_world_video(dir).is_some()
        && dir.join("timestamps").is_file()
        && dir.join("gaze_positions").is_file()
        && dir.join("info").is_file()
}

/// A fully loaded recording, immutable for the rest of the session.
#[derive(Debug, Clone)]
pub struct Recording {
    /// Recording directory.
    pub dir: PathBuf,
    /// Path to the world video stream.
    pub video_path: PathBuf,
    /// Per-frame timestamps, recording-relative seconds, indexed 0..N-1.
    pub timestamps: Vec<f64>,
    /// Gaze samples sorted by timestamp.
    pub gaze: Vec<GazeSample>,
    /// Parsed metadata from the `info` file.
    pub info: RecordingInfo,
}

impl Recording {
    /// Validate and load a recording directory.
    ///
    /// Applies the one-time backward-compatibility metadata patch before
    /// parsing the `info` file.
    pub fn load(dir: impl Into<PathBuf>) -> RecordingResult<Self> {
        let dir = dir.into();
        if !is_recording_dir(&dir) {
            return Err(RecordingError::InvalidDirectory(dir));
        }

        if patch_info(&dir)? {
            tracing::debug!("patched legacy metadata in {}", dir.display());
        }

        let video_path = find_world_video(&dir).ok_or_else(|| {
            RecordingError::MissingFile(dir.join("world.<ext>"))
        })?;
        let timestamps = load_timestamps(&dir.join("timestamps"))?;
        let gaze = load_gaze_positions(&dir.join("gaze_positions"))?;
        let info = RecordingInfo::load(&dir.join("info"))?;

        tracing::debug!(
            "loaded recording '{}': {} frames, {} gaze samples, software version {:?}",
            info.recording_name().unwrap_or("<unnamed>"),
            timestamps.len(),
            gaze.len(),
            info.software_version_number(),
        );

        Ok(Self {
            dir,
            video_path,
            timestamps,
            gaze,
            info,
        })
    }

    /// Number of video frames.
    pub fn frame_count(&self) -> usize {
        self.timestamps.len()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn valid_directory_is_recognized() {
        let dir = tempdir().unwrap();
        test_support::write_recording(dir.path());

        assert!(is_recording_dir(dir.path()));
    }

    #[test]
    fn directory_without_video_is_rejected() {
        let dir = tempdir().unwrap();
        test_support::write_recording(dir.path());
        std::fs::remove_file(dir.path().join("world.avi")).unwrap();

        assert!(!is_recording_dir(dir.path()));
    }

    #[test]
    fn load_reads_all_streams() {
        let dir = tempdir().unwrap();
        test_support::write_recording(dir.path());

        let rec = Recording::load(dir.path()).unwrap();

        assert_eq!(rec.frame_count(), 3);
        assert_eq!(rec.gaze.len(), 2);
        assert_eq!(rec.gaze[0].extras, vec![0.98]);
        assert_eq!(rec.info.recording_name(), Some("test recording"));
        assert!(rec.video_path.ends_with("world.avi"));
    }

    #[test]
    fn load_rejects_invalid_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Recording::load(dir.path()),
            Err(RecordingError::InvalidDirectory(_))
        ));
    }
}
