//! Common constants used throughout blocksmith.

/// Supported project configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["blocksmith.yaml", "blocksmith.yml", "blocksmith.json"];

/// Namespace used when a description does not declare one
pub const DEFAULT_NAMESPACE: &str = "App";

/// Namespaces ending with this suffix are looked up in the module registry
pub const DEFAULT_MODULE_SUFFIX: &str = "Bundle";

/// Separator between namespace segments of the generated classes
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Extension of template documents
pub const TEMPLATE_EXTENSION: &str = "yaml";

/// Project-relative directory holding project block templates
pub const PROJECT_TEMPLATE_DIR: &str = "config/block/templates";

/// Module-relative directory holding default block templates
pub const MODULE_TEMPLATE_DIR: &str = "Resources/block/templates";
