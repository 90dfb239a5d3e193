//! blocksmith resolves block descriptions for code generation.
//! A block description names a content type and lists its properties; from it
//! blocksmith derives the names, namespaces, target paths and property lists of
//! the entity class, form type, persistence mapping and view template to generate.

/// Command-line interface module for the blocksmith binary
pub mod cli;

/// Project configuration (blocksmith.yaml, blocksmith.yml, blocksmith.json)
pub mod config;

/// Common constants
pub mod constants;

/// Block descriptions and their resolution
pub mod definition;

/// Artifact descriptors handed to emitters
pub mod descriptor;

/// Error types and handling for blocksmith
pub mod error;

/// Logger setup for the binary
pub mod logger;

/// Deep merge of configuration documents
pub mod merge;

/// Reusable modules and the registry resolving them
pub mod module;

/// Camel, snake and kebab case conversions
pub mod naming;

/// Serializable snapshot of a resolved block tree
pub mod plan;

/// Resolved block properties
pub mod property;

/// Property template lookup
pub mod template;

/// Shared resolution context
pub mod workspace;
