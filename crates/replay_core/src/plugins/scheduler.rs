//! Plugin registry and per-frame scheduler.

use crate::models::{Canvas, ClickAction, Frame, GazeSample, MouseButton};

use super::{PluginArgs, PluginCatalog, PluginError, PluginEvent, PluginInit, PluginResult};

/// Plugin types opened on first run, when no saved settings exist.
pub const DEFAULT_PLUGINS: &[&str] = &["scan_path", "gaze_polyline", "gaze_circle"];

struct Slot {
    id: u64,
    plugin: Box<dyn super::Plugin>,
    /// Set when a fault terminated the instance at the scheduler boundary.
    faulted: bool,
}

impl Slot {
    fn live(&self) -> bool {
        !self.faulted && self.plugin.alive()
    }
}

/// Owns the ordered collection of live plugin instances.
///
/// Invariant: the collection is always sorted by order key (stable, so
/// ties keep insertion order); insertion triggers a re-sort rather than a
/// positional insert.
pub struct PluginScheduler {
    catalog: PluginCatalog,
    slots: Vec<Slot>,
    next_id: u64,
}

impl PluginScheduler {
    /// Create a scheduler over a catalog of known plugin types.
    pub fn new(catalog: PluginCatalog) -> Self {
        Self {
            catalog,
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Open a plugin instance by type name.
    ///
    /// Returns `Ok(true)` if an instance was created. Opening an exclusive
    /// type that already has a live instance is a silent no-op (`Ok(false)`,
    /// not an error). An unknown type or a failing constructor is an error.
    pub fn open(&mut self, name: &str, args: &PluginArgs) -> PluginResult<bool> {
        let kind = self
            .catalog
            .get(name)
            .ok_or_else(|| PluginError::UnknownType(name.to_string()))?;

        if !kind.additive
            && self
                .slots
                .iter()
                .any(|s| s.live() && s.plugin.kind() == name)
        {
            tracing::debug!("plugin '{}' is exclusive and already open", name);
            return Ok(false);
        }

        let plugin = (kind.factory)(args)?;
        tracing::debug!("opening plugin '{}'", name);

        let id = self.next_id;
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            plugin,
            faulted: false,
        });
        self.sort_by_order();

        // The GUI hook runs exactly once, immediately after insertion.
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.plugin.init_gui();
        }

        Ok(true)
    }

    fn sort_by_order(&mut self) {
        // Stable sort: equal order keys keep insertion order.
        self.slots
            .sort_by(|a, b| a.plugin.order().total_cmp(&b.plugin.order()));
    }

    /// Number of live instances.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.live()).count()
    }

    /// Type names of live instances, in execution order.
    pub fn live_kinds(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|s| s.live())
            .map(|s| s.plugin.kind())
            .collect()
    }

    /// Run the update pass: every live instance, in order, against the
    /// per-iteration frame copy, gaze list, and shared event sink.
    ///
    /// A fault is caught here, logged with the plugin's identity, and
    /// terminates only that instance; the pass continues.
    pub fn update(&mut self, frame: &mut Frame, gaze: &[GazeSample], events: &mut Vec<PluginEvent>) {
        for slot in &mut self.slots {
            if !slot.live() {
                continue;
            }
            if let Err(e) = slot.plugin.update(frame, gaze, events) {
                tracing::warn!(
                    "plugin '{}' faulted during update: {}",
                    slot.plugin.kind(),
                    e
                );
                slot.faulted = true;
            }
        }
    }

    /// Run the render pass: same order, read-only over frame and gaze,
    /// output through the canvas. Faults are isolated exactly as in
    /// `update`; instances terminated earlier this iteration are skipped.
    pub fn render(&mut self, frame: &Frame, canvas: &mut Canvas) {
        for slot in &mut self.slots {
            if !slot.live() {
                continue;
            }
            if let Err(e) = slot.plugin.render(frame, canvas) {
                tracing::warn!(
                    "plugin '{}' faulted during render: {}",
                    slot.plugin.kind(),
                    e
                );
                slot.faulted = true;
            }
        }
    }

    /// Broadcast a pointer event to every live instance, in order. All
    /// plugins always see the event; there is no consumption.
    pub fn click(&mut self, pos: (f64, f64), button: MouseButton, action: ClickAction) {
        for slot in &mut self.slots {
            if slot.live() {
                slot.plugin.on_click(pos, button, action);
            }
        }
    }

    /// Remove instances that are no longer alive, running each one's
    /// teardown exactly once. Returns the number of instances removed.
    pub fn reap(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain_mut(|slot| {
            if slot.live() {
                true
            } else {
                tracing::debug!("reaping plugin '{}'", slot.plugin.kind());
                slot.plugin.close();
                false
            }
        });
        before - self.slots.len()
    }

    /// Capture initializers for every live, persistable instance in
    /// current order. Instances without the capability are skipped.
    pub fn serialize(&self) -> Vec<PluginInit> {
        self.slots
            .iter()
            .filter(|s| s.live())
            .filter_map(|s| {
                s.plugin
                    .init_args()
                    .map(|args| PluginInit::new(s.plugin.kind(), args))
            })
            .collect()
    }

    /// Re-open plugins from saved initializers. A failing entry (unknown
    /// type, bad arguments) is logged and skipped; the remaining entries
    /// still load.
    pub fn restore(&mut self, saved: &[PluginInit]) {
        for init in saved {
            match self.open(&init.name, &init.args) {
                Ok(true) => tracing::debug!("restored plugin '{}'", init.name),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("plugin '{}' failed to load from settings: {}", init.name, e);
                }
            }
        }
    }

    /// Open the hard-coded default plugin set (first run, no saved list).
    pub fn open_defaults(&mut self) {
        for name in DEFAULT_PLUGINS {
            if let Err(e) = self.open(name, &PluginArgs::new()) {
                tracing::warn!("default plugin '{}' failed to open: {}", name, e);
            }
        }
    }

    /// Tear down every remaining instance (session shutdown). Teardown
    /// still runs exactly once per instance.
    pub fn close_all(&mut self) {
        for mut slot in self.slots.drain(..) {
            slot.plugin.close();
        }
    }
}
