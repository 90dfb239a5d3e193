#![allow(dead_code)]

use blocksmith::error::{Error, Result};
use blocksmith::module::{Module, StaticModuleRegistry};
use blocksmith::template::{DocumentReader, TemplateResolver};
use blocksmith::workspace::Workspace;
use serde_yaml::Value;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

pub const PROJECT_DIR: &str = "/proj";
pub const TEMPLATE_MODULE_DIR: &str = "/proj/vendor/block-bundle";

/// Documents kept in memory, keyed by path.
#[derive(Default)]
pub struct MemoryReader {
    documents: HashMap<PathBuf, Value>,
}

impl MemoryReader {
    pub fn with<P: Into<PathBuf>>(mut self, path: P, document: &str) -> Self {
        self.documents.insert(path.into(), yaml(document));
        self
    }
}

impl DocumentReader for MemoryReader {
    fn exists(&self, path: &Path) -> bool {
        self.documents.contains_key(path)
    }

    fn read_document(&self, path: &Path) -> Result<Value> {
        let missing = || io::Error::new(io::ErrorKind::NotFound, "no document");
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| Error::IoError(missing()))
    }
}

pub fn yaml(source: &str) -> Value {
    serde_yaml::from_str(source).unwrap()
}

pub fn blog_module() -> Module {
    Module::new(
        "AcmeBlogBundle",
        r"Acme\BlogBundle",
        "/proj/src/Acme/BlogBundle",
    )
}

/// Workspace rooted at `/proj` with `AcmeBlogBundle` registered.
pub fn workspace(reader: MemoryReader) -> Workspace {
    let registry: StaticModuleRegistry = vec![blog_module()].into_iter().collect();
    let module_dir = Some(PathBuf::from(TEMPLATE_MODULE_DIR));
    let templates = TemplateResolver::new(PROJECT_DIR, module_dir, Box::new(reader));
    Workspace::new(PROJECT_DIR, Box::new(registry), templates)
}
