//! Resolved block properties.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// One block property after template expansion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub config: Mapping,
}

impl Property {
    /// Wraps a property config. Anything but a mapping yields an empty config.
    pub fn new<S: Into<String>>(name: S, config: Value) -> Self {
        let config = match config {
            Value::Mapping(mapping) => mapping,
            _ => Mapping::new(),
        };
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Follows `path` through nested mappings.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.config.get(*first)?, |value, key| value.get(*key))
    }

    /// The declared `type`.
    pub fn type_name(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    /// Projection used by the persistence mapping.
    pub fn orm_field(&self) -> OrmField {
        let field_type = self
            .get("orm_type")
            .and_then(Value::as_str)
            .or_else(|| self.type_name())
            .map(str::to_string);
        let nullable = self
            .get("nullable")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        OrmField {
            name: self.name.clone(),
            field_type,
            nullable,
        }
    }
}

/// A column of the persistence mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrmField {
    pub name: String,
    /// `orm_type` when declared, `type` otherwise
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub nullable: bool,
}

impl OrmField {
    pub fn nullable_str(&self) -> &'static str {
        if self.nullable {
            "true"
        } else {
            "false"
        }
    }
}

/// Collects the strings held by an import declaration.
///
/// Accepts a single string or arbitrarily nested sequences of strings; other
/// values are ignored.
pub fn collect_uses(value: &Value, uses: &mut Vec<String>) {
    match value {
        Value::String(s) => uses.push(s.clone()),
        Value::Sequence(items) => items.iter().for_each(|item| collect_uses(item, uses)),
        _ => {}
    }
}
