//! Value objects handed to the emitters of the generated artifacts.

use crate::property::{OrmField, Property};
use serde::Serialize;

/// Methods a class emitter should generate besides the properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassMethods {
    pub constructor: bool,
    /// Getters and setters
    pub accessors: bool,
    /// Adders and removers for list typed properties
    pub adders_removers: bool,
}

impl ClassMethods {
    pub fn all() -> Self {
        Self {
            constructor: true,
            accessors: true,
            adders_removers: true,
        }
    }
}

/// A PHP class to emit, either an entity or a form type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhpClass {
    pub namespace: String,
    pub name: String,
    /// Interface or parent type the class implements
    pub implements: Option<String>,
    pub uses: Vec<String>,
    pub traits: Vec<String>,
    pub properties: Vec<Property>,
    pub generate: ClassMethods,
}

impl PhpClass {
    pub fn fully_qualified_name(&self) -> String {
        format!("{}\\{}", self.namespace, self.name)
    }
}

/// A persistence mapping document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistenceMapping {
    pub table_name: String,
    pub fields: Vec<OrmField>,
    pub properties: Vec<Property>,
}

/// A form binding class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormType {
    pub block_prefix: String,
    pub properties: Vec<Property>,
}
