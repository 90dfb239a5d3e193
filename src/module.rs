//! Reusable modules that block definitions can be bound to.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// A module hosting block definitions, e.g. `AcmeBlogBundle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Registry name, also the translation domain of its blocks
    pub name: String,
    /// Canonical namespace, e.g. `Acme\BlogBundle`
    pub namespace: String,
    /// Module root directory
    pub path: PathBuf,
}

impl Module {
    pub fn new<N, S, P>(name: N, namespace: S, path: P) -> Self
    where
        N: Into<String>,
        S: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Directory holding the module's configuration, views and templates.
    pub fn resource_path(&self) -> PathBuf {
        self.path.join("Resources")
    }
}

/// Trait for looking modules up by name.
pub trait ModuleRegistry {
    /// Returns the module registered as `name`, if any.
    fn find_module(&self, name: &str) -> Option<Module>;
}

/// Registry backed by a fixed list of modules.
#[derive(Debug, Default)]
pub struct StaticModuleRegistry {
    modules: IndexMap<String, Module>,
}

impl StaticModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module`, replacing any module of the same name.
    pub fn register(&mut self, module: Module) {
        self.modules.insert(module.name.clone(), module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<Module> for StaticModuleRegistry {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        let mut registry = Self::new();
        for module in iter {
            registry.register(module);
        }
        registry
    }
}

impl ModuleRegistry for StaticModuleRegistry {
    fn find_module(&self, name: &str) -> Option<Module> {
        self.modules.get(name).cloned()
    }
}
