// Enumerator - sealed, string-backed enum types generated as Go source

pub mod config;
pub mod error;
pub mod generator;
pub mod license;
pub mod model;
pub mod render;
pub mod spec;
pub mod validation;
pub mod writer;

// Re-export commonly used items for convenience
pub use config::{EnumConfig, EnumeratorConfig, GeneralConfig, LoadedConfig};
pub use error::{EnumeratorError, Result, SpecError};
pub use generator::{
    CheckedFile, EnumGenerator, GeneratedFile, GenerationReport, RenderedFile, check, generate,
    render_file, render_spec,
};
pub use model::{Capability, CodeModel, DecodePolicy, Shape};
pub use spec::{EnumSpec, JsonMarshalOptions, MarshalOptions};
pub use validation::validate;
pub use writer::CheckStatus;
