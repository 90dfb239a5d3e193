//! Project configuration for blocksmith.
//! This module loads the optional project configuration file that declares
//! modules, the default namespace and application name normalization.

use crate::constants::{CONFIG_FILES, DEFAULT_MODULE_SUFFIX, DEFAULT_NAMESPACE, NAMESPACE_SEPARATOR};
use crate::error::{Error, Result};
use crate::module::Module;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Module declaration in the project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleConfig {
    /// Canonical namespace of the module
    pub namespace: String,
    /// Module root, relative to the project directory.
    /// Defaults to `src/<namespace as path>`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ModuleConfig {
    /// Builds the module registered as `name` for a project rooted at `project_dir`.
    pub fn to_module<P: AsRef<Path>>(&self, name: &str, project_dir: P) -> Module {
        let relative = match &self.path {
            Some(path) => path.clone(),
            None => Path::new("src").join(namespace_to_path(&self.namespace)),
        };
        let path = project_dir.as_ref().join(relative);
        Module::new(name, self.namespace.clone(), path)
    }
}

/// Top level project configuration. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MakerConfig {
    /// Namespace of descriptions that do not declare one
    pub default_namespace: String,
    /// Namespaces ending with this suffix are resolved through the module registry
    pub module_suffix: String,
    /// Module providing the default property templates
    pub template_module: Option<String>,
    /// Prefixes removed from application names when deriving table names
    pub strip_application_prefixes: Vec<String>,
    /// Registered modules by name
    pub modules: IndexMap<String, ModuleConfig>,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            module_suffix: DEFAULT_MODULE_SUFFIX.to_string(),
            template_module: None,
            strip_application_prefixes: Vec::new(),
            modules: IndexMap::new(),
        }
    }
}

/// Converts a namespace to a relative path: `Acme\BlogBundle` -> `Acme/BlogBundle`.
pub fn namespace_to_path(namespace: &str) -> String {
    namespace.replace(NAMESPACE_SEPARATOR, "/")
}

/// Returns the first configuration file present in `project_dir`.
pub fn find_config_file<P: AsRef<Path>>(project_dir: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|file| project_dir.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<MakerConfig> {
    if content.trim().is_empty() {
        return Ok(MakerConfig::default());
    }
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the project configuration.
///
/// # Arguments
/// * `project_dir` - Project root directory
///
/// # Returns
/// * `Result<MakerConfig>` - Parsed configuration, or the defaults when the
///   project has no configuration file
pub fn load_config<P: AsRef<Path>>(project_dir: P) -> Result<MakerConfig> {
    match find_config_file(&project_dir) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(&path).map_err(Error::IoError)?;
            parse_config(&content)
        }
        None => {
            debug!(
                "No configuration file found in {} (tried: {})",
                project_dir.as_ref().display(),
                CONFIG_FILES.join(", ")
            );
            Ok(MakerConfig::default())
        }
    }
}
