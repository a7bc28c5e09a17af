//! Array-file loaders for timestamps and gaze positions.

use std::fs;
use std::path::Path;

use crate::models::GazeSample;

use super::{RecordingError, RecordingResult};

fn read_file(path: &Path) -> RecordingResult<String> {
    fs::read_to_string(path).map_err(|source| RecordingError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load per-frame timestamps: one float per line, blank lines skipped.
///
/// The sequence must be non-decreasing; it is used for correlation and
/// pacing and never mutated after load.
pub fn load_timestamps(path: &Path) -> RecordingResult<Vec<f64>> {
    let content = read_file(path)?;
    let file = file_label(path);

    let mut timestamps = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let ts: f64 = line.parse().map_err(|_| RecordingError::Parse {
            file: file.clone(),
            line: lineno + 1,
            message: format!("expected a float, got '{line}'"),
        })?;
        if let Some(&prev) = timestamps.last() {
            if ts < prev {
                return Err(RecordingError::Unordered {
                    file,
                    row: timestamps.len(),
                });
            }
        }
        timestamps.push(ts);
    }

    Ok(timestamps)
}

/// Load gaze samples: whitespace-separated rows of
/// `timestamp norm_x norm_y [extras...]`, sorted by timestamp.
///
/// Trailing columns are carried through unmodified as the sample's opaque
/// payload.
pub fn load_gaze_positions(path: &Path) -> RecordingResult<Vec<GazeSample>> {
    let content = read_file(path)?;
    let file = file_label(path);

    let mut samples: Vec<GazeSample> = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parse_field = |field: &str| -> RecordingResult<f64> {
            field.parse().map_err(|_| RecordingError::Parse {
                file: file.clone(),
                line: lineno + 1,
                message: format!("expected a float, got '{field}'"),
            })
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(RecordingError::Parse {
                file,
                line: lineno + 1,
                message: format!("expected at least 3 columns, got {}", fields.len()),
            });
        }

        let timestamp = parse_field(fields[0])?;
        let x = parse_field(fields[1])?;
        let y = parse_field(fields[2])?;
        let extras = fields[3..]
            .iter()
            .map(|f| parse_field(f))
            .collect::<RecordingResult<Vec<f64>>>()?;

        if let Some(prev) = samples.last() {
            if timestamp < prev.timestamp {
                return Err(RecordingError::Unordered {
                    file,
                    row: samples.len(),
                });
            }
        }

        samples.push(GazeSample {
            timestamp,
            norm_pos: (x, y),
            extras,
        });
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn timestamps_parse_and_skip_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timestamps");
        fs::write(&path, "0.0\n\n0.04\n0.08\n").unwrap();

        let ts = load_timestamps(&path).unwrap();
        assert_eq!(ts, vec![0.0, 0.04, 0.08]);
    }

    #[test]
    fn decreasing_timestamps_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timestamps");
        fs::write(&path, "0.0\n0.08\n0.04\n").unwrap();

        assert!(matches!(
            load_timestamps(&path),
            Err(RecordingError::Unordered { row: 2, .. })
        ));
    }

    #[test]
    fn garbage_timestamp_reports_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timestamps");
        fs::write(&path, "0.0\nnot-a-number\n").unwrap();

        assert!(matches!(
            load_timestamps(&path),
            Err(RecordingError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn gaze_rows_carry_extras() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaze_positions");
        fs::write(&path, "0.01 0.5 0.5 0.98 2.4\n0.02 0.4 0.4\n").unwrap();

        let gaze = load_gaze_positions(&path).unwrap();

        assert_eq!(gaze.len(), 2);
        assert_eq!(gaze[0].extras, vec![0.98, 2.4]);
        assert!(gaze[1].extras.is_empty());
    }

    #[test]
    fn short_gaze_row_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaze_positions");
        fs::write(&path, "0.01 0.5\n").unwrap();

        assert!(matches!(
            load_gaze_positions(&path),
            Err(RecordingError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn unsorted_gaze_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaze_positions");
        fs::write(&path, "0.05 0.5 0.5\n0.01 0.4 0.4\n").unwrap();

        assert!(matches!(
            load_gaze_positions(&path),
            Err(RecordingError::Unordered { row: 1, .. })
        ));
    }
}
