//! Builtin visualization plugin set.
//!
//! Order keys follow the dependency contract: the scan path (0.1) feeds
//! the fixation filter (0.7), which feeds the polyline (0.8) and circle
//! (0.9) renderers later in the same pass.

mod fixation_filter;
mod gaze_circle;
mod gaze_polyline;
mod scan_path;

pub use fixation_filter::FixationFilter;
pub use gaze_circle::GazeCircle;
pub use gaze_polyline::GazePolyline;
pub use scan_path::ScanPath;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{PluginArgs, PluginError, PluginEvent, PluginKind, PluginResult};
use crate::models::GazeSample;

/// All plugin types this build ships with.
pub fn builtin_kinds() -> Vec<PluginKind> {
    vec![
        PluginKind {
            name: ScanPath::KIND,
            additive: false,
            factory: ScanPath::from_args,
        },
        PluginKind {
            name: FixationFilter::KIND,
            additive: false,
            factory: FixationFilter::from_args,
        },
        PluginKind {
            name: GazePolyline::KIND,
            additive: true,
            factory: GazePolyline::from_args,
        },
        PluginKind {
            name: GazeCircle::KIND,
            additive: true,
            factory: GazeCircle::from_args,
        },
    ]
}

/// Deserialize a constructor-argument mapping into a plugin's typed args.
fn parse_args<T: DeserializeOwned>(kind: &str, args: &PluginArgs) -> PluginResult<T> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| PluginError::invalid_args(kind, e.to_string()))
}

/// The gaze list a visualization should draw: the most recently emitted
/// filtered set or trail wins over the raw per-frame samples.
fn display_gaze<'a>(events: &'a [PluginEvent], raw: &'a [GazeSample]) -> &'a [GazeSample] {
    for event in events.iter().rev() {
        match event {
            PluginEvent::FilteredGaze(samples) | PluginEvent::GazeTrail(samples) => {
                return samples;
            }
            PluginEvent::Custom(..) => {}
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_gaze_prefers_latest_event() {
        let raw = [GazeSample::new(0.0, 0.5, 0.5)];
        let trail = vec![GazeSample::new(0.1, 0.1, 0.1)];
        let filtered = vec![GazeSample::new(0.2, 0.2, 0.2)];
        let events = vec![
            PluginEvent::GazeTrail(trail),
            PluginEvent::FilteredGaze(filtered.clone()),
        ];

        assert_eq!(display_gaze(&events, &raw), filtered.as_slice());
    }

    #[test]
    fn display_gaze_falls_back_to_raw() {
        let raw = [GazeSample::new(0.0, 0.5, 0.5)];
        assert_eq!(display_gaze(&[], &raw), &raw);
    }
}
