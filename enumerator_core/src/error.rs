use std::path::PathBuf;
use thiserror::Error;

/// A violated invariant of an [`EnumSpec`](crate::spec::EnumSpec).
///
/// Raised before anything touches the filesystem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("destination must not be empty")]
    EmptyDestination,

    #[error("package must not be empty")]
    EmptyPackage,

    #[error("package `{0}` is not a valid Go package name")]
    InvalidPackage(String),

    #[error("type name must not be empty")]
    EmptyTypeName,

    #[error("type name `{0}` is not an exported Go identifier")]
    InvalidTypeName(String),

    #[error("type name `{0}` collides with a generated function")]
    ReservedTypeName(String),

    #[error("values must contain at least one entry")]
    NoValues,

    #[error("value at index {index} is empty")]
    EmptyValue { index: usize },

    #[error("value `{0}` is not an exported Go identifier")]
    InvalidValueName(String),

    #[error("value `{0}` is declared more than once")]
    DuplicateValue(String),

    #[error("value `{value}` collides with generated identifier `{identifier}`")]
    ReservedValue { value: String, identifier: String },

    #[error("undefined value `{0}` is not one of the declared values")]
    UndefinedValueNotMember(String),

    #[error("nil-to-undefined requires JSON generation to be enabled")]
    NilToUndefinedWithoutJson,

    #[error("nil-to-undefined requires an undefined value")]
    NilToUndefinedWithoutUndefinedValue,
}

#[derive(Error, Debug)]
pub enum EnumeratorError {
    #[error("Invalid enum specification for {type_name}: {source}")]
    Spec {
        type_name: String,
        #[source]
        source: SpecError,
    },

    #[error("Could not read license file {path}: {source}")]
    License {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parent directory of {path} does not exist")]
    MissingParent { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Destination {path} is shared by {first} and {second}")]
    DuplicateDestination {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Generated file is out of date: {path}")]
    OutOfDate { path: PathBuf },

    #[error("Type not found: {type_name}")]
    TypeNotFound { type_name: String },
}

pub type Result<T> = std::result::Result<T, EnumeratorError>;

impl EnumeratorError {
    pub fn spec(type_name: impl Into<String>, source: SpecError) -> Self {
        EnumeratorError::Spec {
            type_name: type_name.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        EnumeratorError::Config(message.into())
    }

    /// The invariant behind a specification failure, if that is what this is.
    pub fn spec_error(&self) -> Option<&SpecError> {
        match self {
            EnumeratorError::Spec { source, .. } => Some(source),
            _ => None,
        }
    }
}
