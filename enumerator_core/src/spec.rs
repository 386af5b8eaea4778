//! The generation request: what closed value set to emit and where.

use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for the JSON adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct JsonMarshalOptions {
    /// Emit `MarshalJSON`/`UnmarshalJSON` support.
    #[serde(default)]
    pub generate: bool,
    /// Decode absent, `null` and unknown input to the undefined value.
    #[serde(default)]
    pub nil_to_undefined: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarshalOptions {
    #[serde(default)]
    pub json: JsonMarshalOptions,
}

impl MarshalOptions {
    /// JSON support with the default decode policy.
    pub fn json() -> Self {
        Self {
            json: JsonMarshalOptions {
                generate: true,
                nil_to_undefined: false,
            },
        }
    }

    /// JSON support where absent, `null` and unknown names decode to the undefined value.
    pub fn json_nil_to_undefined() -> Self {
        Self {
            json: JsonMarshalOptions {
                generate: true,
                nil_to_undefined: true,
            },
        }
    }
}

/// A single enum to generate.
///
/// Build one with [`EnumSpec::builder`]; nothing is checked until
/// [`validate`](crate::validation::validate) runs.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize)]
pub struct EnumSpec {
    /// File the generated source is written to.
    #[builder(into)]
    pub destination: PathBuf,
    /// License text prepended as a comment block.
    #[builder(into)]
    pub copyright_file: Option<PathBuf>,
    /// Go package clause.
    #[builder(into)]
    pub package: String,
    /// Name of the sealed interface.
    #[builder(into)]
    pub type_name: String,
    /// Value names in declaration order.
    #[builder(with = |values: impl IntoIterator<Item = impl Into<String>>| {
        values.into_iter().map(Into::into).collect()
    })]
    pub values: Vec<String>,
    /// Sentinel returned by fallback lookups.
    #[builder(into)]
    pub undefined_value: Option<String>,
    #[builder(default)]
    pub marshalling: MarshalOptions,
}

impl EnumSpec {
    /// The undefined value, treating an empty string as unset.
    pub fn undefined(&self) -> Option<&str> {
        self.undefined_value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn generates_json(&self) -> bool {
        self.marshalling.json.generate
    }

    pub fn nil_to_undefined(&self) -> bool {
        self.marshalling.json.nil_to_undefined
    }
}
