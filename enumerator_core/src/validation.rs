//! Specification validation.
//!
//! Every check here is pure; [`validate`] must succeed before a license is read
//! or a destination is touched.

use crate::error::SpecError;
use crate::spec::EnumSpec;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static GO_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").expect("Invalid regex for Go identifiers")
});

static EXPORTED_GO_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\p{Lu}[\p{L}\p{Nd}_]*$").expect("Invalid regex for exported Go identifiers")
});

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Package-level functions every generated file declares.
pub const GENERATED_FUNCTIONS: &[&str] = &["Of", "OfOrUndefined", "Values"];

pub fn is_go_identifier(name: &str) -> bool {
    GO_IDENTIFIER.is_match(name)
}

pub fn is_exported_go_identifier(name: &str) -> bool {
    EXPORTED_GO_IDENTIFIER.is_match(name)
}

pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Checks every invariant of `spec`, reporting the first violation in field order.
pub fn validate(spec: &EnumSpec) -> Result<(), SpecError> {
    validate_destination(spec)?;
    validate_package(&spec.package)?;
    validate_type_name(&spec.type_name)?;
    validate_values(&spec.type_name, &spec.values)?;
    validate_undefined_value(spec)?;
    validate_marshalling(spec)?;

    tracing::debug!(type_name = %spec.type_name, "Specification is valid");
    Ok(())
}

/// Runs [`validate`] and collects the result without short-circuiting callers
/// that check many specs at once.
pub fn validate_all<'a>(
    specs: impl IntoIterator<Item = &'a EnumSpec>,
) -> Vec<(&'a EnumSpec, SpecError)> {
    specs
        .into_iter()
        .filter_map(|spec| validate(spec).err().map(|err| (spec, err)))
        .collect()
}

fn validate_destination(spec: &EnumSpec) -> Result<(), SpecError> {
    if spec.destination.as_os_str().is_empty() {
        return Err(SpecError::EmptyDestination);
    }
    Ok(())
}

fn validate_package(package: &str) -> Result<(), SpecError> {
    if package.is_empty() {
        return Err(SpecError::EmptyPackage);
    }
    if package == "_" || !is_go_identifier(package) || is_go_keyword(package) {
        return Err(SpecError::InvalidPackage(package.to_string()));
    }
    Ok(())
}

fn validate_type_name(type_name: &str) -> Result<(), SpecError> {
    if type_name.is_empty() {
        return Err(SpecError::EmptyTypeName);
    }
    if !is_exported_go_identifier(type_name) {
        return Err(SpecError::InvalidTypeName(type_name.to_string()));
    }
    if GENERATED_FUNCTIONS.contains(&type_name) {
        return Err(SpecError::ReservedTypeName(type_name.to_string()));
    }
    Ok(())
}

fn validate_values(type_name: &str, values: &[String]) -> Result<(), SpecError> {
    if values.is_empty() {
        return Err(SpecError::NoValues);
    }

    let reserved = reserved_identifiers(type_name);
    let mut seen = HashSet::with_capacity(values.len());

    for (index, value) in values.iter().enumerate() {
        if value.is_empty() {
            return Err(SpecError::EmptyValue { index });
        }
        if !is_exported_go_identifier(value) {
            return Err(SpecError::InvalidValueName(value.clone()));
        }
        if let Some(identifier) = reserved.iter().find(|r| *r == value) {
            return Err(SpecError::ReservedValue {
                value: value.clone(),
                identifier: identifier.clone(),
            });
        }
        if !seen.insert(value.as_str()) {
            return Err(SpecError::DuplicateValue(value.clone()));
        }
    }

    Ok(())
}

fn validate_undefined_value(spec: &EnumSpec) -> Result<(), SpecError> {
    if let Some(undefined) = spec.undefined()
        && !spec.values.iter().any(|v| v == undefined)
    {
        return Err(SpecError::UndefinedValueNotMember(undefined.to_string()));
    }
    Ok(())
}

fn validate_marshalling(spec: &EnumSpec) -> Result<(), SpecError> {
    if !spec.nil_to_undefined() {
        return Ok(());
    }
    if !spec.generates_json() {
        return Err(SpecError::NilToUndefinedWithoutJson);
    }
    if spec.undefined().is_none() {
        return Err(SpecError::NilToUndefinedWithoutUndefinedValue);
    }
    Ok(())
}

/// Exported identifiers a value name may not take.
fn reserved_identifiers(type_name: &str) -> Vec<String> {
    let mut reserved: Vec<String> = GENERATED_FUNCTIONS.iter().map(|f| f.to_string()).collect();
    reserved.push(type_name.to_string());
    reserved.push(format!("Marshallable{type_name}"));
    reserved.push(format!("Invalid{type_name}NameError"));
    reserved
}
