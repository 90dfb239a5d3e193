//! Serializable snapshot of a resolved block tree.
//! This is what an emitter consumes: every name, every target path and every
//! artifact descriptor of a block and, recursively, of its nested classes.

use crate::definition::{BlockDefinition, ClassRef};
use crate::descriptor::{FormType, PersistenceMapping, PhpClass};
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockNames {
    pub name: String,
    pub camel: String,
    pub snake: String,
    pub kebab: String,
    pub label: String,
    pub form_type: String,
    pub application: String,
    pub translation_domain: Option<String>,
    pub entity_namespace: String,
    pub form_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockPaths {
    pub doctrine_orm: PathBuf,
    pub entity: PathBuf,
    pub form_type: PathBuf,
    pub template: PathBuf,
    pub template_name: String,
    pub block_type: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockPlan {
    pub names: BlockNames,
    pub module_bound: bool,
    pub block_type: bool,
    pub groups: Option<Vec<String>>,
    pub parent: Option<ClassRef>,
    pub paths: BlockPaths,
    pub entity: PhpClass,
    pub form_type_class: PhpClass,
    pub persistence_mapping: PersistenceMapping,
    pub form_type: FormType,
    pub classes: Vec<BlockPlan>,
}

impl BlockPlan {
    /// Builds the plan of `definition` and its nested classes.
    ///
    /// Nested classes are expanded before the snapshot is taken, so the
    /// entity imports already reference the children.
    pub fn build(definition: &mut BlockDefinition<'_>) -> Result<Self> {
        let classes = definition
            .classes()?
            .iter_mut()
            .map(BlockPlan::build)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            names: BlockNames {
                name: definition.name().to_string(),
                camel: definition.camel_name(),
                snake: definition.snake_name(),
                kebab: definition.kebab_name(),
                label: definition.label(),
                form_type: definition.form_type_name(),
                application: definition.application_name(),
                translation_domain: definition.translation_domain().map(str::to_string),
                entity_namespace: definition.entity_namespace(),
                form_namespace: definition.form_namespace(),
            },
            module_bound: definition.is_module_bound(),
            block_type: definition.block_type(),
            groups: definition.groups().map(<[String]>::to_vec),
            parent: definition.parent().cloned(),
            paths: BlockPaths {
                doctrine_orm: definition.doctrine_orm_file_path(),
                entity: definition.entity_file_path(),
                form_type: definition.form_type_file_path(),
                template: definition.template_file_path(),
                template_name: definition.template_file_name(),
                block_type: definition.type_file_path(),
            },
            entity: definition.entity_php_class(),
            form_type_class: definition.form_type_php_class(),
            persistence_mapping: definition.persistence_mapping(),
            form_type: definition.form_type(),
            classes,
        })
    }

    /// Iterates over this plan and all nested plans, depth first.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &BlockPlan> + '_> {
        let nested = self.classes.iter().flat_map(BlockPlan::iter);
        Box::new(std::iter::once(self).chain(nested))
    }
}
