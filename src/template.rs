//! Property template lookup.
//! Templates are structured documents that a property can reference by name
//! and that provide the base configuration the property config is merged onto.

use crate::constants::{MODULE_TEMPLATE_DIR, PROJECT_TEMPLATE_DIR, TEMPLATE_EXTENSION};
use crate::error::{Error, Result};
use log::debug;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for reading structured documents.
pub trait DocumentReader {
    /// Returns true when a document exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads and parses the document at `path`.
    ///
    /// # Arguments
    /// * `path` - Location of the document
    ///
    /// # Returns
    /// * `Result<Value>` - Parsed document
    fn read_document(&self, path: &Path) -> Result<Value>;
}

/// Reads YAML (and therefore JSON) documents from the local filesystem.
#[derive(Debug, Default)]
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for FileSystemReader {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_document(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(Error::IoError)?;
        serde_yaml::from_str(&content).map_err(|source| Error::DocumentParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Finds property templates by name.
///
/// Candidate locations, first hit wins:
/// 1. `<project>/<name>.yaml`
/// 2. `<project>/config/block/templates/<name>.yaml`
/// 3. `<template module>/Resources/block/templates/<name>.yaml`
pub struct TemplateResolver {
    project_dir: PathBuf,
    module_dir: Option<PathBuf>,
    reader: Box<dyn DocumentReader>,
}

impl TemplateResolver {
    /// Creates a resolver. Without `module_dir` only the project locations are searched.
    pub fn new<P: Into<PathBuf>>(
        project_dir: P,
        module_dir: Option<PathBuf>,
        reader: Box<dyn DocumentReader>,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            module_dir,
            reader,
        }
    }

    /// Lists the locations searched for `template`, in priority order.
    pub fn candidates(&self, template: &str) -> Vec<PathBuf> {
        let file_name = format!("{template}.{TEMPLATE_EXTENSION}");
        let mut paths = vec![
            self.project_dir.join(&file_name),
            self.project_dir.join(PROJECT_TEMPLATE_DIR).join(&file_name),
        ];
        if let Some(module_dir) = &self.module_dir {
            paths.push(module_dir.join(MODULE_TEMPLATE_DIR).join(&file_name));
        }
        paths
    }

    /// Returns the first existing location of `template`.
    pub fn find(&self, template: &str) -> Option<PathBuf> {
        self.candidates(template)
            .into_iter()
            .find(|path| self.reader.exists(path))
    }

    /// Loads the template document.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if no candidate location exists
    /// * Reader errors if the document cannot be read or parsed
    pub fn resolve(&self, template: &str) -> Result<Value> {
        let Some(path) = self.find(template) else {
            return Err(Error::TemplateNotFound {
                template: template.to_string(),
            });
        };
        debug!("Loading template '{}' from {}", template, path.display());
        self.reader.read_document(&path)
    }
}
