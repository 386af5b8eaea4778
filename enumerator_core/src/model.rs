//! The code model: which declarations a validated [`EnumSpec`] turns into.
//!
//! The supported outputs form a small capability lattice rather than a type
//! hierarchy. [`Shape`] names the five reachable points; [`Capability`] names
//! the individual features that are switched on along the way.

use crate::error::SpecError;
use crate::spec::EnumSpec;
use crate::validation::validate;
use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

/// One emittable feature of the generated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Sealed interface, backing struct, singletons, `String()` and `Values()`.
    Base,
    /// `Of(name)`.
    StrictLookup,
    /// `OfOrUndefined(name)`.
    FallbackLookup,
    /// `Marshallable<T>` with `MarshalJSON`/`UnmarshalJSON`.
    JsonCodec,
    /// Absent, `null` and unknown JSON decode to the undefined value.
    NilToUndefined,
}

/// The closed catalog of generated file shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    Plain,
    WithUndefined,
    WithJson,
    WithUndefinedAndJson,
    WithUndefinedAndJsonNilToUndefined,
}

impl Shape {
    pub fn capabilities(self) -> Vec<Capability> {
        Capability::iter().filter(|c| self.includes(*c)).collect()
    }

    pub fn includes(self, capability: Capability) -> bool {
        match capability {
            Capability::Base | Capability::StrictLookup => true,
            Capability::FallbackLookup => matches!(
                self,
                Shape::WithUndefined
                    | Shape::WithUndefinedAndJson
                    | Shape::WithUndefinedAndJsonNilToUndefined
            ),
            Capability::JsonCodec => matches!(
                self,
                Shape::WithJson | Shape::WithUndefinedAndJson | Shape::WithUndefinedAndJsonNilToUndefined
            ),
            Capability::NilToUndefined => matches!(self, Shape::WithUndefinedAndJsonNilToUndefined),
        }
    }
}

/// How `UnmarshalJSON` treats input that does not name a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodePolicy {
    /// Absent and `null` decode to no value; anything unknown is an error.
    Strict,
    /// Absent, `null` and unknown input decode to the undefined value.
    NilToUndefined,
}

/// Go identifiers derived from the type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifiers {
    pub interface: String,
    pub base: String,
    pub seal_method: String,
    pub marshallable: String,
    pub invalid_name_error: String,
    pub invalid_name_constructor: String,
}

impl Identifiers {
    pub fn for_type(type_name: &str) -> Self {
        Self {
            interface: type_name.to_string(),
            base: format!("base{type_name}"),
            seal_method: format!("sealed{type_name}"),
            marshallable: format!("Marshallable{type_name}"),
            invalid_name_error: format!("Invalid{type_name}NameError"),
            invalid_name_constructor: format!("newInvalid{type_name}NameError"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonCodec {
    pub decode_policy: DecodePolicy,
}

/// Everything the renderer needs. Built once per generation and consumed once.
///
/// Only obtainable through [`CodeModel::build`], so every model the renderer
/// sees satisfies the validated invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeModel {
    pub(crate) package: String,
    pub(crate) type_name: String,
    pub(crate) identifiers: Identifiers,
    /// Declaration order.
    pub(crate) values: Vec<String>,
    pub(crate) undefined: Option<String>,
    pub(crate) json: Option<JsonCodec>,
    /// Raw license text, rendered as a comment block when present.
    #[serde(skip)]
    pub(crate) license: Option<String>,
}

impl CodeModel {
    /// Validates `spec` and derives its model.
    pub fn build(spec: &EnumSpec, license: Option<String>) -> Result<Self, SpecError> {
        validate(spec)?;
        Ok(Self::from_validated(spec, license))
    }

    /// Derives the model of a spec that already passed [`validate`].
    pub(crate) fn from_validated(spec: &EnumSpec, license: Option<String>) -> Self {
        let json = spec.generates_json().then(|| JsonCodec {
            decode_policy: if spec.nil_to_undefined() {
                DecodePolicy::NilToUndefined
            } else {
                DecodePolicy::Strict
            },
        });

        let model = Self {
            package: spec.package.clone(),
            type_name: spec.type_name.clone(),
            identifiers: Identifiers::for_type(&spec.type_name),
            values: spec.values.clone(),
            undefined: spec.undefined().map(str::to_string),
            json,
            license,
        };

        tracing::debug!(
            type_name = %model.type_name,
            shape = %model.shape(),
            values = model.values.len(),
            "Built code model"
        );
        model
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.identifiers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The sentinel returned by fallback lookups.
    pub fn undefined(&self) -> Option<&str> {
        self.undefined.as_deref()
    }

    pub fn shape(&self) -> Shape {
        match (&self.undefined, &self.json) {
            (None, None) => Shape::Plain,
            (Some(_), None) => Shape::WithUndefined,
            (None, Some(_)) => Shape::WithJson,
            (Some(_), Some(codec)) => match codec.decode_policy {
                DecodePolicy::Strict => Shape::WithUndefinedAndJson,
                DecodePolicy::NilToUndefined => Shape::WithUndefinedAndJsonNilToUndefined,
            },
        }
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        self.shape().capabilities()
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.shape().includes(capability)
    }

    pub fn decode_policy(&self) -> Option<DecodePolicy> {
        self.json.as_ref().map(|codec| codec.decode_policy)
    }
}
