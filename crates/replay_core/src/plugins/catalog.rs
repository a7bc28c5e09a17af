//! Catalog of known plugin types.

use super::{Plugin, PluginArgs, PluginResult};

/// Factory constructing a plugin instance from saved or user-supplied
/// arguments.
pub type PluginFactory = fn(&PluginArgs) -> PluginResult<Box<dyn Plugin>>;

/// One registered plugin type.
pub struct PluginKind {
    /// Stable type name, used in settings and open requests.
    pub name: &'static str,
    /// Whether multiple simultaneous instances are permitted.
    pub additive: bool,
    /// Constructor.
    pub factory: PluginFactory,
}

/// Fixed set of plugin types known to this build.
#[derive(Default)]
pub struct PluginCatalog {
    kinds: Vec<PluginKind>,
}

impl PluginCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog containing the builtin visualization set.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for kind in super::vis::builtin_kinds() {
            catalog.register(kind);
        }
        catalog
    }

    /// Register a plugin type. A duplicate name is ignored with a debug
    /// log; the first registration wins.
    pub fn register(&mut self, kind: PluginKind) {
        if self.get(kind.name).is_some() {
            tracing::debug!("plugin type '{}' already registered, ignoring", kind.name);
            return;
        }
        self.kinds.push(kind);
    }

    /// Look up a plugin type by name.
    pub fn get(&self, name: &str) -> Option<&PluginKind> {
        self.kinds.iter().find(|k| k.name == name)
    }

    /// Registered type names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|k| k.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Canvas, Frame, GazeSample};
    use crate::plugins::{PluginEvent, PluginResult};

    struct Noop;

    impl Plugin for Noop {
        fn kind(&self) -> &'static str {
            "noop"
        }
        fn order(&self) -> f64 {
            0.5
        }
        fn update(
            &mut self,
            _frame: &mut Frame,
            _gaze: &[GazeSample],
            _events: &mut Vec<PluginEvent>,
        ) -> PluginResult<()> {
            Ok(())
        }
        fn render(&mut self, _frame: &Frame, _canvas: &mut Canvas) -> PluginResult<()> {
            Ok(())
        }
    }

    fn noop_factory(_args: &PluginArgs) -> PluginResult<Box<dyn Plugin>> {
        Ok(Box::new(Noop))
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut catalog = PluginCatalog::new();
        catalog.register(PluginKind {
            name: "noop",
            additive: true,
            factory: noop_factory,
        });
        catalog.register(PluginKind {
            name: "noop",
            additive: false,
            factory: noop_factory,
        });

        assert_eq!(catalog.names(), vec!["noop"]);
        assert!(catalog.get("noop").unwrap().additive);
    }

    #[test]
    fn builtin_catalog_has_the_default_set() {
        let catalog = PluginCatalog::builtin();
        for name in crate::plugins::DEFAULT_PLUGINS {
            assert!(catalog.get(name).is_some(), "missing builtin '{}'", name);
        }
    }
}
