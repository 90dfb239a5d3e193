//! The context block definitions are resolved against.

use crate::config::{load_config, MakerConfig};
use crate::constants::{DEFAULT_MODULE_SUFFIX, DEFAULT_NAMESPACE};
use crate::error::{Error, Result};
use crate::module::{Module, ModuleRegistry, StaticModuleRegistry};
use crate::template::{FileSystemReader, TemplateResolver};
use std::path::{Path, PathBuf};

/// Deployment specific normalization of application names.
///
/// Applied to the snake cased application name before it becomes the prefix
/// of a table name.
pub trait ApplicationNameNormalizer {
    fn normalize(&self, application_name: &str) -> String;
}

/// Removes configured prefixes from the start of application names,
/// e.g. `enhavo_` turns `enhavo_block` into `block`.
#[derive(Debug, Default, Clone)]
pub struct StripPrefixes {
    prefixes: Vec<String>,
}

impl StripPrefixes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl ApplicationNameNormalizer for StripPrefixes {
    fn normalize(&self, application_name: &str) -> String {
        let mut name = application_name;
        for prefix in &self.prefixes {
            if let Some(rest) = name.strip_prefix(prefix.as_str()) {
                name = rest;
            }
        }
        name.to_string()
    }
}

/// Shared read-only state of one resolution run: the project, its modules and
/// the template search locations.
pub struct Workspace {
    project_dir: PathBuf,
    modules: Box<dyn ModuleRegistry>,
    templates: TemplateResolver,
    normalizer: Box<dyn ApplicationNameNormalizer>,
    default_namespace: String,
    module_suffix: String,
}

impl Workspace {
    pub fn new<P: Into<PathBuf>>(
        project_dir: P,
        modules: Box<dyn ModuleRegistry>,
        templates: TemplateResolver,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            modules,
            templates,
            normalizer: Box::new(StripPrefixes::default()),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            module_suffix: DEFAULT_MODULE_SUFFIX.to_string(),
        }
    }

    /// Builds a filesystem backed workspace from a project configuration.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `template_module` names a module that is not declared
    pub fn from_config<P: AsRef<Path>>(project_dir: P, config: &MakerConfig) -> Result<Self> {
        let project_dir = project_dir.as_ref();
        let registry: StaticModuleRegistry = config
            .modules
            .iter()
            .map(|(name, module)| module.to_module(name, project_dir))
            .collect();

        let template_module_dir = match &config.template_module {
            Some(name) => {
                let module = registry.find_module(name).ok_or_else(|| {
                    Error::ConfigError(format!("template module '{name}' is not declared"))
                })?;
                Some(module.path)
            }
            None => None,
        };
        let templates = TemplateResolver::new(
            project_dir,
            template_module_dir,
            Box::new(FileSystemReader::new()),
        );

        let normalizer = StripPrefixes::new(config.strip_application_prefixes.iter().cloned());

        Ok(Self::new(project_dir, Box::new(registry), templates)
            .with_default_namespace(config.default_namespace.clone())
            .with_module_suffix(config.module_suffix.clone())
            .with_normalizer(Box::new(normalizer)))
    }

    /// Loads the project configuration from `project_dir` and builds the workspace.
    pub fn load<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        let config = load_config(&project_dir)?;
        Self::from_config(project_dir, &config)
    }

    pub fn with_default_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    pub fn with_module_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.module_suffix = suffix.into();
        self
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn ApplicationNameNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn templates(&self) -> &TemplateResolver {
        &self.templates
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub fn module_suffix(&self) -> &str {
        &self.module_suffix
    }

    pub fn find_module(&self, name: &str) -> Option<Module> {
        self.modules.find_module(name)
    }

    /// Removes the module suffix from a module name: `AcmeBlogBundle` -> `AcmeBlog`.
    pub fn module_name_without_suffix<'a>(&self, name: &'a str) -> &'a str {
        name.strip_suffix(self.module_suffix.as_str())
            .unwrap_or(name)
    }

    pub fn normalize_application_name(&self, application_name: &str) -> String {
        self.normalizer.normalize(application_name)
    }
}
