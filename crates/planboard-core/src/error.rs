//! Core error types for planboard-core.
//!
//! The computation functions themselves never fail; errors here cover plan
//! loading and validation, dependency graph authoring, and configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for planboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Plan file loading/saving errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Dependency graph authoring errors
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Plan validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Plan file errors.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Failed to read the plan file
    #[error("Failed to read plan from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the plan file
    #[error("Failed to write plan to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Plan file is not valid JSON for the expected shape
    #[error("Failed to parse plan from {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Plan could not be serialized
    #[error("Failed to serialize plan: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Plan parsed but violates an invariant
    #[error("Invalid plan: {0}")]
    Invalid(#[from] ValidationError),
}

/// Plan invariant violations, reported at load time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Work item references a project that does not exist
    #[error("Work item '{work_item}' references unknown project '{project_id}'")]
    UnknownProject { work_item: String, project_id: String },

    /// Work item references a team that does not exist
    #[error("Work item '{work_item}' references unknown team '{team_id}'")]
    UnknownTeam { work_item: String, team_id: String },

    /// Exactly one of the two schedule dates is set
    #[error("Work item '{work_item}' has only one of start/end date set")]
    HalfScheduled { work_item: String },

    /// End date precedes start date
    #[error("Work item '{work_item}' ends ({end}) before it starts ({start})")]
    InvertedDates {
        work_item: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Work item depends on itself
    #[error("Work item '{work_item}' depends on itself")]
    SelfDependency { work_item: String },

    /// Dependency id resolves to no work item
    #[error("Work item '{work_item}' depends on unknown item '{dependency_id}'")]
    UnknownDependency {
        work_item: String,
        dependency_id: String,
    },

    /// The dependency graph contains a cycle through this item
    #[error("Dependency cycle detected through work item '{work_item}'")]
    DependencyCycle { work_item: String },

    /// Acknowledged id is not a current dependency
    #[error("Work item '{work_item}' acknowledges '{dependency_id}' which is not a dependency")]
    AcknowledgedNotADependency {
        work_item: String,
        dependency_id: String,
    },

    /// Duplicate entity id
    #[error("Duplicate id '{id}' in {collection}")]
    DuplicateId { collection: String, id: String },
}

/// Dependency graph authoring errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No work item with this id
    #[error("Unknown work item '{0}'")]
    UnknownItem(String),

    /// An item cannot depend on itself
    #[error("Work item '{0}' cannot depend on itself")]
    SelfDependency(String),

    /// The edge already exists
    #[error("Work item '{item}' already depends on '{predecessor}'")]
    DuplicateDependency { item: String, predecessor: String },

    /// The edge would close a dependency cycle
    #[error("Making '{predecessor}' a dependency of '{item}' would create a cycle")]
    WouldCreateCycle { item: String, predecessor: String },

    /// The edge does not exist
    #[error("Work item '{item}' does not depend on '{predecessor}'")]
    NotADependency { item: String, predecessor: String },

    /// No acknowledgement to remove
    #[error("Work item '{item}' has not acknowledged '{predecessor}'")]
    NotAcknowledged { item: String, predecessor: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
