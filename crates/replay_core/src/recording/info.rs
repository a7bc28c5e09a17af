//! Recording metadata (`info` file) parsing and legacy patching.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{RecordingError, RecordingResult};

/// Metadata key for the capture software version.
pub const KEY_SOFTWARE_VERSION: &str = "Capture Software Version";
/// Metadata key for the recording name.
pub const KEY_RECORDING_NAME: &str = "Recording Name";

/// Parsed `info` metadata: tab-separated key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct RecordingInfo {
    fields: BTreeMap<String, String>,
}

impl RecordingInfo {
    /// Parse an `info` file. Lines without a tab separator are rejected.
    pub fn load(path: &Path) -> RecordingResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| RecordingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|(line, message)| RecordingError::Parse {
            file: "info".to_string(),
            line,
            message,
        })
    }

    fn parse(content: &str) -> Result<Self, (usize, String)> {
        let mut fields = BTreeMap::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once('\t')
                .ok_or_else(|| (lineno + 1, "expected tab-separated key/value".to_string()))?;
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { fields })
    }

    /// Look up a metadata field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The recording name, if recorded.
    pub fn recording_name(&self) -> Option<&str> {
        self.get(KEY_RECORDING_NAME)
    }

    /// The raw capture software version string.
    pub fn software_version(&self) -> Option<&str> {
        self.get(KEY_SOFTWARE_VERSION)
    }

    /// Capture software version as a comparable number: the first three
    /// digits of the version string over 100, so "v0.3.7" becomes 0.37.
    pub fn software_version_number(&self) -> Option<f64> {
        let digits: String = self
            .software_version()?
            .chars()
            .filter(char::is_ascii_digit)
            .take(3)
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse::<f64>().ok().map(|v| v / 100.0)
    }
}

/// One-time backward-compatibility patch for legacy recordings.
///
/// Early capture versions wrote `info` without a `Recording Name`; fill it
/// in from the directory name so the rest of the player can rely on the
/// field. Returns whether the file was rewritten.
pub fn patch_info(dir: &Path) -> RecordingResult<bool> {
    let path = dir.join("info");
    let info = RecordingInfo::load(&path)?;
    if info.recording_name().is_some() {
        return Ok(false);
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());

    let mut content = fs::read_to_string(&path).map_err(|source| RecordingError::Io {
        path: path.clone(),
        source,
    })?;
    if !content.ends_with('\n') && !content.is_empty() {
        content.push('\n');
    }
    content.push_str(&format!("{KEY_RECORDING_NAME}\t{name}\n"));

    fs::write(&path, content).map_err(|source| RecordingError::Io { path, source })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_tab_separated_fields() {
        let info = RecordingInfo::parse(
            "Capture Software Version\tv0.3.7\nRecording Name\tdesk session\n",
        )
        .unwrap();

        assert_eq!(info.software_version(), Some("v0.3.7"));
        assert_eq!(info.recording_name(), Some("desk session"));
    }

    #[test]
    fn version_number_takes_first_three_digits() {
        let info = RecordingInfo::parse("Capture Software Version\tv0.3.7\n").unwrap();
        assert!((info.software_version_number().unwrap() - 0.37).abs() < 1e-9);

        let info = RecordingInfo::parse("Capture Software Version\t1.12.4\n").unwrap();
        assert!((info.software_version_number().unwrap() - 1.12).abs() < 1e-9);
    }

    #[test]
    fn line_without_tab_is_rejected() {
        assert!(RecordingInfo::parse("no separator here\n").is_err());
    }

    #[test]
    fn patch_fills_missing_recording_name() {
        let dir = tempdir().unwrap();
        let rec_dir = dir.path().join("session_007");
        std::fs::create_dir(&rec_dir).unwrap();
        std::fs::write(rec_dir.join("info"), "Capture Software Version\tv0.2\n").unwrap();

        assert!(patch_info(&rec_dir).unwrap());

        let info = RecordingInfo::load(&rec_dir.join("info")).unwrap();
        assert_eq!(info.recording_name(), Some("session_007"));

        // Second run is a no-op.
        assert!(!patch_info(&rec_dir).unwrap());
    }
}
