//! Go source rendering.
//!
//! Output is a pure function of the [`CodeModel`]: sections are emitted in a
//! fixed order, separated by exactly one blank line, with `gofmt` alignment
//! applied by hand so the file is stable under `go fmt`.

use crate::license;
use crate::model::{Capability, CodeModel};

/// Marks the file as machine generated.
pub const GENERATED_MARKER: &str = "// Code generated by enumerator DO NOT EDIT.";

/// Main entry point for rendering a generated Go file.
pub fn render(model: &CodeModel) -> String {
    tracing::debug!(
        type_name = %model.type_name,
        shape = %model.shape(),
        "Rendering Go source"
    );

    let mut sections: Vec<String> = Vec::new();

    if let Some(header) = model.license.as_deref().and_then(license::comment_block) {
        sections.push(header);
    }
    sections.push(format!("package {}\n", model.package));
    sections.push(format!("{}\n", GENERATED_MARKER));
    if let Some(imports) = render_imports(model) {
        sections.push(imports);
    }

    sections.extend(render_base_type(model));
    sections.push(render_of(model));
    if model.has(Capability::FallbackLookup)
        && let Some(undefined) = &model.undefined
    {
        sections.push(render_of_or_undefined(undefined, &model.identifiers.interface));
    }
    if model.has(Capability::JsonCodec) {
        sections.extend(render_json(model));
    }
    sections.extend(render_invalid_name_error(model));

    let output = sections.join("\n");
    tracing::debug!(output_length = output.len(), "Go source rendered");
    output
}

fn render_imports(model: &CodeModel) -> Option<String> {
    if !model.has(Capability::JsonCodec) {
        return None;
    }
    let imports: &[&str] = match nil_to_undefined_fallback(model) {
        None => &["encoding/json", "fmt"],
        Some(_) => &["encoding/json"],
    };

    let mut output = String::from("import (\n");
    for import in imports {
        output.push_str(&format!("\t\"{}\"\n", import));
    }
    output.push_str(")\n");
    Some(output)
}

fn render_base_type(model: &CodeModel) -> Vec<String> {
    let ids = &model.identifiers;

    let mut interface = format!("type {} interface {{\n", ids.interface);
    interface.push_str(&format!("\t{}()\n", ids.seal_method));
    interface.push_str("\tString() string\n");
    if model.has(Capability::JsonCodec) {
        interface.push_str(&format!("\tToMarshallable() {}\n", ids.marshallable));
    }
    interface.push_str("}\n");

    let base = format!("type {} struct {{\n\tname string\n}}\n", ids.base);
    let seal = format!("func (b {}) {}() {{}}\n", ids.base, ids.seal_method);
    let string = format!(
        "func (b {}) String() string {{\n\treturn b.name\n}}\n",
        ids.base
    );
    let values = format!(
        "func Values() []{iface} {{\n\
         \tvalues := make([]{iface}, len(allValues))\n\
         \tcopy(values, allValues)\n\
         \treturn values\n\
         }}\n",
        iface = ids.interface
    );

    vec![
        interface,
        base,
        seal,
        string,
        render_registry(model),
        values,
    ]
}

/// The singleton `var` block, aligned the way `gofmt` aligns it.
fn render_registry(model: &CodeModel) -> String {
    let ids = &model.identifiers;
    let name_width = column_width(model.values.iter().map(String::as_str));

    let mut output = String::from("var (\n");
    for value in &model.values {
        output.push_str(&format!(
            "\t{:<width$} = {}{{name: \"{}\"}}\n",
            value,
            ids.base,
            value,
            width = name_width
        ));
    }

    output.push_str(&format!("\n\tallValues = []{}{{\n", ids.interface));
    for value in &model.values {
        output.push_str(&format!("\t\t{},\n", value));
    }
    output.push_str("\t}\n");

    let keys: Vec<String> = model
        .values
        .iter()
        .map(|value| format!("{}.String():", value))
        .collect();
    let key_width = column_width(keys.iter().map(String::as_str));

    output.push_str(&format!(
        "\n\tallValuesByString = map[string]{}{{\n",
        ids.interface
    ));
    for (key, value) in keys.iter().zip(&model.values) {
        output.push_str(&format!("\t\t{:<width$} {},\n", key, value, width = key_width));
    }
    output.push_str("\t}\n)\n");
    output
}

fn render_of(model: &CodeModel) -> String {
    format!(
        "func Of(name string) ({}, error) {{\n\
         \tif value, ok := allValuesByString[name]; ok {{\n\
         \t\treturn value, nil\n\
         \t}}\n\
         \treturn nil, {}(name)\n\
         }}\n",
        model.identifiers.interface, model.identifiers.invalid_name_constructor
    )
}

fn render_of_or_undefined(undefined: &str, interface: &str) -> String {
    format!(
        "func OfOrUndefined(name string) {} {{\n\
         \tif value, ok := allValuesByString[name]; ok {{\n\
         \t\treturn value\n\
         \t}}\n\
         \treturn {}\n\
         }}\n",
        interface, undefined
    )
}

/// The undefined value JSON decoding falls back to, when the nil-to-undefined
/// policy applies. Decoding is strict otherwise.
fn nil_to_undefined_fallback(model: &CodeModel) -> Option<&str> {
    model
        .undefined
        .as_deref()
        .filter(|_| model.has(Capability::NilToUndefined))
}

fn render_json(model: &CodeModel) -> Vec<String> {
    let ids = &model.identifiers;

    let adapter = format!("type {} struct {{\n\ten {}\n}}\n", ids.marshallable, ids.interface);
    let marshal = format!(
        "func (m {}) MarshalJSON() ([]byte, error) {{\n\
         \tif m.en == nil {{\n\
         \t\treturn []byte(\"null\"), nil\n\
         \t}}\n\
         \treturn json.Marshal(m.en.String())\n\
         }}\n",
        ids.marshallable
    );
    let unmarshal = match nil_to_undefined_fallback(model) {
        Some(undefined) => render_nil_to_undefined_unmarshal(model, undefined),
        None => render_strict_unmarshal(model),
    };
    let to_marshallable = format!(
        "func (b {}) ToMarshallable() {} {{\n\treturn {}{{en: b}}\n}}\n",
        ids.base, ids.marshallable, ids.marshallable
    );
    let from_marshallable = format!(
        "func (m {}) FromMarshallable() {} {{\n\treturn m.en\n}}\n",
        ids.marshallable, ids.interface
    );

    vec![adapter, marshal, unmarshal, to_marshallable, from_marshallable]
}

fn render_strict_unmarshal(model: &CodeModel) -> String {
    let wrap = format!(
        "fmt.Errorf(\"could not unmarshal {} from JSON\\n%w\", err)",
        model.type_name
    );
    format!(
        "func (m *{marshallable}) UnmarshalJSON(jsonBytes []byte) error {{\n\
         \tif len(jsonBytes) == 0 || string(jsonBytes) == \"null\" {{\n\
         \t\tm.en = nil\n\
         \t\treturn nil\n\
         \t}}\n\
         \n\
         \tvar name string\n\
         \tif err := json.Unmarshal(jsonBytes, &name); err != nil {{\n\
         \t\treturn {wrap}\n\
         \t}}\n\
         \n\
         \tvalue, err := Of(name)\n\
         \tif err != nil {{\n\
         \t\treturn {wrap}\n\
         \t}}\n\
         \tm.en = value\n\
         \treturn nil\n\
         }}\n",
        marshallable = model.identifiers.marshallable,
        wrap = wrap
    )
}

fn render_nil_to_undefined_unmarshal(model: &CodeModel, undefined: &str) -> String {
    format!(
        "func (m *{marshallable}) UnmarshalJSON(jsonBytes []byte) error {{\n\
         \tif len(jsonBytes) == 0 || string(jsonBytes) == \"null\" {{\n\
         \t\tm.en = {undefined}\n\
         \t\treturn nil\n\
         \t}}\n\
         \n\
         \tvar name string\n\
         \tif err := json.Unmarshal(jsonBytes, &name); err != nil {{\n\
         \t\tm.en = {undefined}\n\
         \t\treturn nil\n\
         \t}}\n\
         \n\
         \tm.en = OfOrUndefined(name)\n\
         \treturn nil\n\
         }}\n",
        marshallable = model.identifiers.marshallable,
        undefined = undefined
    )
}

fn render_invalid_name_error(model: &CodeModel) -> Vec<String> {
    let ids = &model.identifiers;

    let error_type = format!("type {} struct {{\n\tname string\n}}\n", ids.invalid_name_error);
    let error_method = format!(
        "func (e {}) Error() string {{\n\treturn \"invalid {} name: \" + e.name\n}}\n",
        ids.invalid_name_error, model.type_name
    );
    let name_method = format!(
        "func (e {}) Name() string {{\n\treturn e.name\n}}\n",
        ids.invalid_name_error
    );
    let constructor = format!(
        "func {}(name string) {} {{\n\treturn {}{{name: name}}\n}}\n",
        ids.invalid_name_constructor, ids.invalid_name_error, ids.invalid_name_error
    );

    vec![error_type, error_method, name_method, constructor]
}

/// Width of the widest entry, counted in characters as `gofmt` counts runes.
fn column_width<'a>(entries: impl Iterator<Item = &'a str>) -> usize {
    entries.map(|entry| entry.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EnumSpec, MarshalOptions};

    fn model(spec: EnumSpec) -> CodeModel {
        CodeModel::build(&spec, None).unwrap()
    }

    fn color() -> EnumSpec {
        EnumSpec::builder()
            .destination("color/color.go")
            .package("color")
            .type_name("Color")
            .values(["Undefined", "Red", "Green", "Blue"])
            .build()
    }

    #[test]
    fn test_column_width_counts_characters() {
        assert_eq!(column_width(["Red", "Grün"].into_iter()), 4);
        assert_eq!(column_width(std::iter::empty()), 0);
    }

    #[test]
    fn test_registry_alignment() {
        let output = render_registry(&model(color()));

        assert!(output.contains("\tUndefined = baseColor{name: \"Undefined\"}\n"));
        assert!(output.contains("\tRed       = baseColor{name: \"Red\"}\n"));
        assert!(output.contains("\t\tUndefined.String(): Undefined,\n"));
        assert!(output.contains("\t\tRed.String():       Red,\n"));
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let spec = EnumSpec {
            undefined_value: Some("Undefined".to_string()),
            marshalling: MarshalOptions::json(),
            ..color()
        };
        let output = render(&CodeModel::build(&spec, Some("MIT".to_string())).unwrap());

        let positions: Vec<usize> = [
            "// MIT",
            "package color",
            GENERATED_MARKER,
            "import (",
            "type Color interface",
            "var (",
            "func Of(",
            "func OfOrUndefined(",
            "type MarshallableColor struct",
            "type InvalidColorNameError struct",
        ]
        .iter()
        .map(|needle| output.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_no_license_means_package_first() {
        let output = render(&model(color()));
        assert!(output.starts_with("package color\n\n"));
    }

    #[test]
    fn test_plain_shape_has_no_json_or_fallback() {
        let output = render(&model(color()));
        assert!(!output.contains("import"));
        assert!(!output.contains("OfOrUndefined"));
        assert!(!output.contains("Marshallable"));
        assert!(!output.contains("ToMarshallable"));
    }

    #[test]
    fn test_strict_json_wraps_invalid_name() {
        let spec = EnumSpec {
            marshalling: MarshalOptions::json(),
            ..color()
        };
        let output = render(&model(spec));
        assert!(output.contains("\t\"encoding/json\"\n\t\"fmt\"\n"));
        assert!(output.contains(
            "return fmt.Errorf(\"could not unmarshal Color from JSON\\n%w\", err)"
        ));
        assert!(output.contains("\t\tm.en = nil\n"));
    }

    #[test]
    fn test_nil_to_undefined_never_fails() {
        let spec = EnumSpec {
            undefined_value: Some("Undefined".to_string()),
            marshalling: MarshalOptions::json_nil_to_undefined(),
            ..color()
        };
        let output = render(&model(spec));
        assert!(!output.contains("\"fmt\""));
        assert!(!output.contains("fmt.Errorf"));
        assert!(output.contains("\tm.en = OfOrUndefined(name)\n"));
        assert_eq!(output.matches("\t\tm.en = Undefined\n").count(), 2);
    }

    #[test]
    fn test_nil_policy_without_undefined_renders_strict_decode() {
        let spec = EnumSpec {
            undefined_value: Some("Undefined".to_string()),
            marshalling: MarshalOptions::json_nil_to_undefined(),
            ..color()
        };
        let mut broken = model(spec);
        broken.undefined = None;

        let output = render(&broken);
        assert!(!output.contains("m.en = \n"));
        assert!(!output.contains("OfOrUndefined"));
        assert!(output.contains("\t\tm.en = nil\n"));
        assert!(output.contains("\t\"fmt\"\n"));
    }

    #[test]
    fn test_error_message_format() {
        let spec = EnumSpec {
            type_name: "Shade".to_string(),
            ..color()
        };
        let output = render(&model(spec));
        assert!(output.contains("return \"invalid Shade name: \" + e.name"));
    }

    #[test]
    fn test_output_ends_with_single_newline() {
        let output = render(&model(color()));
        assert!(output.ends_with("}\n"));
        assert!(!output.ends_with("\n\n"));
    }
}
