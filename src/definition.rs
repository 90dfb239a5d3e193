//! Block definitions: the resolution of one block description into the names,
//! paths and property lists of its generated artifacts.
//!
//! A [`BlockDefinition`] is resolved eagerly. Module binding and property
//! templates are handled in [`BlockDefinition::new`], so any failure surfaces
//! before a single path is derived. Afterwards the definition is read-only
//! except for its two import sets, which nested classes extend.

use crate::config::namespace_to_path;
use crate::constants::NAMESPACE_SEPARATOR;
use crate::descriptor::{ClassMethods, FormType, PersistenceMapping, PhpClass};
use crate::error::{Error, Result};
use crate::merge::merge;
use crate::module::Module;
use crate::naming::{camel_case, kebab_case, snake_case};
use crate::property::{collect_uses, Property};
use crate::workspace::Workspace;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Form specific options of a block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Imports of the form type class
    #[serde(rename = "use")]
    pub uses: Vec<String>,
}

/// Configuration of one block, as written in a description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub namespace: Option<String>,
    pub label: Option<String>,
    pub implements: Option<String>,
    pub traits: Vec<String>,
    pub groups: Option<Vec<String>>,
    pub block_type: bool,
    /// Imports of the entity class
    #[serde(rename = "use")]
    pub uses: Vec<String>,
    pub form: FormConfig,
    /// Raw property configs; a `template` key pulls in a template document
    pub properties: IndexMap<String, Value>,
    /// Nested blocks generated alongside this one
    pub classes: IndexMap<String, BlockConfig>,
}

/// A named block configuration: `{ "gallery_block/item": { ... } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub name: String,
    pub config: BlockConfig,
}

impl Description {
    pub fn new<S: Into<String>>(name: S, config: BlockConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Reads a description from a single entry mapping.
    ///
    /// # Errors
    /// * `Error::InvalidDescription` if the mapping does not have exactly one
    ///   entry, the key is not a non-empty string, the name has an empty
    ///   `/` segment or the config is malformed
    pub fn from_mapping(mapping: Mapping) -> Result<Self> {
        if mapping.len() != 1 {
            return Err(invalid(format!(
                "expected exactly one block, found {}",
                mapping.len()
            )));
        }
        let Some((key, value)) = mapping.into_iter().next() else {
            return Err(invalid("expected exactly one block, found 0"));
        };
        let name = match key {
            Value::String(name) if !name.is_empty() => name,
            other => {
                return Err(invalid(format!(
                    "block name must be a non-empty string, got {other:?}"
                )))
            }
        };
        if name.split('/').any(str::is_empty) {
            let reason = format!("block name '{name}' has an empty segment");
            return Err(invalid(reason));
        }
        let config = match value {
            Value::Null => BlockConfig::default(),
            value => serde_yaml::from_value(value)
                .map_err(|e| invalid(format!("block '{name}': {e}")))?,
        };
        Ok(Self { name, config })
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(mapping) => Self::from_mapping(mapping),
            _ => Err(invalid("a description must be a mapping")),
        }
    }
}

impl FromStr for Description {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(s).map_err(|e| invalid(e.to_string()))?;
        Self::from_value(value)
    }
}

fn invalid<S: Into<String>>(reason: S) -> Error {
    Error::InvalidDescription {
        reason: reason.into(),
    }
}

/// Ordered, duplicate free set of fully qualified class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportSet(IndexSet<String>);

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `class`, returns false if it was already present.
    pub fn insert<S: Into<String>>(&mut self, class: S) -> bool {
        self.0.insert(class.into())
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> Extend<S> for ImportSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for class in iter {
            self.insert(class);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ImportSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Identifies a generated class by namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRef {
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
    }
}

/// A resolved block.
pub struct BlockDefinition<'w> {
    workspace: &'w Workspace,
    name: String,
    sub_directories: Vec<String>,
    namespace: String,
    path: String,
    module: Option<Module>,
    config: BlockConfig,
    properties: IndexMap<String, Property>,
    uses: ImportSet,
    form_uses: ImportSet,
    parent: Option<ClassRef>,
}

impl<'w> BlockDefinition<'w> {
    /// Resolves `description` against `workspace`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if a property references a template that
    ///   cannot be located
    /// * `Error::InvalidDescription` if a property's `template` is not a string
    /// * Reader errors if a template document cannot be read or parsed
    pub fn new(workspace: &'w Workspace, description: Description) -> Result<Self> {
        let Description { name: raw_name, mut config } = description;

        let raw_namespace = config
            .namespace
            .clone()
            .unwrap_or_else(|| workspace.default_namespace().to_string());
        let module = bind_module(workspace, &raw_namespace);
        let namespace = match &module {
            Some(module) => module.namespace.clone(),
            None => raw_namespace,
        };

        let mut sub_directories: Vec<String> = raw_name.split('/').map(str::to_string).collect();
        let name = sub_directories.pop().unwrap_or_default();
        let path = namespace_to_path(&namespace);

        let uses: ImportSet = std::mem::take(&mut config.uses).into_iter().collect();
        let form_uses: ImportSet = std::mem::take(&mut config.form.uses).into_iter().collect();
        let raw_properties = std::mem::take(&mut config.properties);

        let mut definition = Self {
            workspace,
            name,
            sub_directories,
            namespace,
            path,
            module,
            config,
            properties: IndexMap::with_capacity(raw_properties.len()),
            uses,
            form_uses,
            parent: None,
        };
        for (key, raw) in raw_properties {
            definition.load_property(key, raw)?;
        }

        debug!(
            "Resolved block '{}' in namespace '{}' ({} properties)",
            definition.name,
            definition.namespace,
            definition.properties.len()
        );
        Ok(definition)
    }

    fn load_property(&mut self, key: String, raw: Value) -> Result<()> {
        let template = match raw.get("template") {
            None | Some(Value::Null) => None,
            Some(Value::String(template)) => Some(template.clone()),
            Some(other) => {
                return Err(invalid(format!(
                    "property '{key}': template must be a string, got {other:?}"
                )))
            }
        };
        let config = match template {
            Some(template) => {
                let document = self.workspace.templates().resolve(&template)?;
                debug!("Applying template '{}' to property '{}'", template, key);
                without_template_key(merge(&document, &raw))
            }
            None => without_template_key(raw),
        };
        let property = Property::new(key.clone(), config);

        let mut uses = Vec::new();
        if let Some(value) = property.lookup(&["type_options", "use"]) {
            collect_uses(value, &mut uses);
        }
        self.uses.extend(uses);

        let mut form_uses = Vec::new();
        if let Some(value) = property.lookup(&["form", "use"]) {
            collect_uses(value, &mut form_uses);
        }
        self.form_uses.extend(form_uses);

        self.properties.insert(key, property);
        Ok(())
    }

    /// Leaf name of the block, without sub directories.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sub_directories(&self) -> &[String] {
        &self.sub_directories
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The namespace as a relative path: `Acme\BlogBundle` -> `Acme/BlogBundle`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn is_module_bound(&self) -> bool {
        self.module.is_some()
    }

    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    pub fn properties(&self) -> &IndexMap<String, Property> {
        &self.properties
    }

    pub fn property_list(&self) -> Vec<Property> {
        self.properties.values().cloned().collect()
    }

    /// The block this one was expanded from, if it is a nested class.
    pub fn parent(&self) -> Option<&ClassRef> {
        self.parent.as_ref()
    }

    pub fn uses(&self) -> &ImportSet {
        &self.uses
    }

    pub fn form_uses(&self) -> &ImportSet {
        &self.form_uses
    }

    pub fn add_use<S: Into<String>>(&mut self, class: S) {
        self.uses.insert(class);
    }

    pub fn add_form_use<S: Into<String>>(&mut self, class: S) {
        self.form_uses.insert(class);
    }

    pub fn snake_name(&self) -> String {
        snake_case(&self.name).replace("_block", "")
    }

    pub fn camel_name(&self) -> String {
        camel_case(&self.name)
    }

    pub fn kebab_name(&self) -> String {
        kebab_case(&self.name)
    }

    pub fn form_type_name(&self) -> String {
        format!("{}Type", self.camel_name())
    }

    pub fn application_name(&self) -> String {
        match &self.module {
            Some(module) => {
                snake_case(self.workspace.module_name_without_suffix(&module.name))
            }
            None => {
                let leading = self
                    .namespace
                    .split(NAMESPACE_SEPARATOR)
                    .next()
                    .unwrap_or_default();
                snake_case(leading)
            }
        }
    }

    pub fn label(&self) -> String {
        self.config
            .label
            .clone()
            .unwrap_or_else(|| self.camel_name())
    }

    pub fn translation_domain(&self) -> Option<&str> {
        self.module.as_ref().map(|module| module.name.as_str())
    }

    pub fn implements(&self) -> Option<&str> {
        self.config.implements.as_deref()
    }

    pub fn traits(&self) -> &[String] {
        &self.config.traits
    }

    pub fn groups(&self) -> Option<&[String]> {
        self.config.groups.as_deref()
    }

    /// Groups formatted as an inline list: `[ 'content', 'layout' ]`.
    pub fn groups_string(&self) -> Option<String> {
        self.groups()
            .map(|groups| format!("[ '{}' ]\n", groups.join("', '")))
    }

    pub fn block_type(&self) -> bool {
        self.config.block_type
    }

    pub fn entity_namespace(&self) -> String {
        format!(
            "{}{sep}Entity{}",
            self.namespace,
            self.namespace_suffix(),
            sep = NAMESPACE_SEPARATOR
        )
    }

    pub fn form_namespace(&self) -> String {
        format!(
            "{}{sep}Form{sep}Type{}",
            self.namespace,
            self.namespace_suffix(),
            sep = NAMESPACE_SEPARATOR
        )
    }

    pub fn class_ref(&self) -> ClassRef {
        ClassRef {
            namespace: self.entity_namespace(),
            name: self.name.clone(),
        }
    }

    pub fn doctrine_orm_file_path(&self) -> PathBuf {
        let mut file_name = String::new();
        for directory in &self.sub_directories {
            file_name.push_str(directory);
            file_name.push('.');
        }
        file_name.push_str(&format!("{}.orm.yml", self.camel_name()));

        let root = match &self.module {
            Some(module) => module.resource_path(),
            None => self.workspace.project_dir().to_path_buf(),
        };
        root.join("config").join("doctrine").join(file_name)
    }

    pub fn entity_file_path(&self) -> PathBuf {
        let file_name = format!("{}.php", self.camel_name());
        self.source_dir()
            .join("Entity")
            .join(self.nested_file(file_name))
    }

    pub fn form_type_file_path(&self) -> PathBuf {
        let file_name = format!("{}.php", self.form_type_name());
        self.source_dir()
            .join("Form")
            .join("Type")
            .join(self.nested_file(file_name))
    }

    /// View template name relative to the views root.
    pub fn template_file_name(&self) -> String {
        let name = self.kebab_name().replace("-block", "");
        format!("theme/block/{name}.html.twig")
    }

    pub fn template_file_path(&self) -> PathBuf {
        let root = match &self.module {
            Some(module) => module.resource_path().join("views"),
            None => self.workspace.project_dir().join("templates"),
        };
        root.join(self.template_file_name())
    }

    pub fn type_file_path(&self) -> PathBuf {
        let file_name = format!("{}Type.php", self.name);
        self.source_dir().join("Block").join(file_name)
    }

    /// Expands the nested `classes` into definitions of their own.
    ///
    /// Children are processed in declaration order. Each child imports this
    /// block's entity and this block imports each child's entity.
    pub fn classes(&mut self) -> Result<Vec<BlockDefinition<'w>>> {
        let classes = self.config.classes.clone();
        let mut definitions = Vec::with_capacity(classes.len());

        for (key, config) in classes {
            debug!("Expanding class '{}' of block '{}'", key, self.name);
            let description = Description::new(key, config);
            let mut definition = BlockDefinition::new(self.workspace, description)?;

            let parent = self.class_ref();
            definition.add_use(parent.to_string());
            definition.parent = Some(parent);
            self.add_use(definition.class_ref().to_string());

            definitions.push(definition);
        }

        Ok(definitions)
    }

    pub fn entity_php_class(&self) -> PhpClass {
        PhpClass {
            namespace: self.entity_namespace(),
            name: self.name.clone(),
            implements: self.config.implements.clone(),
            uses: self.uses.to_vec(),
            traits: self.config.traits.clone(),
            properties: self.property_list(),
            generate: ClassMethods::all(),
        }
    }

    pub fn form_type_php_class(&self) -> PhpClass {
        PhpClass {
            namespace: self.form_namespace(),
            name: self.form_type_name(),
            implements: None,
            uses: self.form_uses.to_vec(),
            traits: Vec::new(),
            properties: Vec::new(),
            generate: ClassMethods::default(),
        }
    }

    pub fn persistence_mapping(&self) -> PersistenceMapping {
        let application_name = self
            .workspace
            .normalize_application_name(&snake_case(&self.application_name()));
        let properties = self.property_list();

        PersistenceMapping {
            table_name: format!("{}_{}", application_name, snake_case(&self.name)),
            fields: properties.iter().map(Property::orm_field).collect(),
            properties,
        }
    }

    pub fn form_type(&self) -> FormType {
        FormType {
            block_prefix: format!(
                "{}_{}",
                snake_case(&self.application_name()),
                snake_case(&self.name)
            ),
            properties: self.property_list(),
        }
    }

    /// Module root for module bound blocks, `<project>/src` otherwise.
    fn source_dir(&self) -> PathBuf {
        match &self.module {
            Some(module) => module.path.clone(),
            None => self.workspace.project_dir().join("src"),
        }
    }

    fn nested_file(&self, file_name: String) -> PathBuf {
        let mut path: PathBuf = self.sub_directories.iter().collect();
        path.push(file_name);
        path
    }

    fn namespace_suffix(&self) -> String {
        self.sub_directories
            .iter()
            .map(|directory| format!("{NAMESPACE_SEPARATOR}{directory}"))
            .collect()
    }
}

impl fmt::Debug for BlockDefinition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockDefinition")
            .field("name", &self.name)
            .field("sub_directories", &self.sub_directories)
            .field("namespace", &self.namespace)
            .field("module", &self.module)
            .field("properties", &self.properties)
            .field("uses", &self.uses)
            .field("form_uses", &self.form_uses)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

fn bind_module(workspace: &Workspace, namespace: &str) -> Option<Module> {
    if !namespace.ends_with(workspace.module_suffix()) {
        return None;
    }
    match workspace.find_module(namespace) {
        Some(module) => {
            debug!(
                "Namespace '{}' bound to module at {}",
                namespace,
                module.path.display()
            );
            Some(module)
        }
        None => {
            warn!(
                "No module named '{}' is registered, resolving as project block",
                namespace
            );
            None
        }
    }
}

fn without_template_key(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .filter(|(key, _)| key.as_str() != Some("template"))
                .collect(),
        ),
        other => other,
    }
}
