//! Property tests over arbitrary value sets.

use enumerator_core::validation::{is_exported_go_identifier, validate};
use enumerator_core::{CodeModel, EnumSpec, MarshalOptions, render::render};
use proptest::prelude::*;
use std::collections::HashSet;

fn value_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z][a-zA-Z0-9]{0,12}", 1..12).prop_map(|names| {
        let mut seen = HashSet::new();
        names
            .into_iter()
            .filter(|name| {
                !matches!(name.as_str(), "Of" | "OfOrUndefined" | "Values" | "Kind")
                    && !name.starts_with("Marshallable")
                    && !name.starts_with("Invalid")
            })
            .filter(|name| seen.insert(name.clone()))
            .collect()
    })
}

fn spec(values: Vec<String>, undefined: bool, marshalling: MarshalOptions) -> EnumSpec {
    let undefined_value = undefined.then(|| values[0].clone());
    EnumSpec::builder()
        .destination("out/kind.go")
        .package("kind")
        .type_name("Kind")
        .values(values)
        .maybe_undefined_value(undefined_value)
        .marshalling(marshalling)
        .build()
}

/// Every reachable (undefined, marshalling) pair. Nil-to-undefined always
/// comes with an undefined value.
fn options() -> impl Strategy<Value = (bool, MarshalOptions)> {
    prop_oneof![
        any::<bool>().prop_map(|undefined| (undefined, MarshalOptions::default())),
        any::<bool>().prop_map(|undefined| (undefined, MarshalOptions::json())),
        Just((true, MarshalOptions::json_nil_to_undefined())),
    ]
}

fn license() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z][A-Za-z .,()]{0,40}(\n[A-Za-z .,()]{0,40}){0,3}\n?")
}

proptest! {
    #[test]
    fn test_rendering_is_deterministic(
        values in value_names().prop_filter("non-empty", |v| !v.is_empty()),
        (undefined, marshalling) in options(),
        license in license(),
    ) {
        let spec = spec(values, undefined, marshalling);
        let first = render(&CodeModel::build(&spec, license.clone()).unwrap());
        let second = render(&CodeModel::build(&spec.clone(), license.clone()).unwrap());
        prop_assert_eq!(&first, &second);

        match license {
            Some(_) => prop_assert!(first.starts_with("// ")),
            None => prop_assert!(first.starts_with("package kind\n")),
        }
        if marshalling.json.nil_to_undefined {
            prop_assert!(first.contains("\tm.en = OfOrUndefined(name)\n"));
        }
    }

    #[test]
    fn test_declaration_order_is_preserved(
        values in value_names().prop_filter("non-empty", |v| !v.is_empty()),
        (undefined, marshalling) in options(),
        license in license(),
    ) {
        let spec = spec(values.clone(), undefined, marshalling);
        let output = render(&CodeModel::build(&spec, license).unwrap());

        let positions: Vec<usize> = values
            .iter()
            .map(|value| output.find(&format!("\t\t{},\n", value)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        prop_assert_eq!(positions, sorted);
    }

    #[test]
    fn test_validation_is_total(
        package in "\\PC{0,10}",
        type_name in "\\PC{0,10}",
        values in prop::collection::vec("\\PC{0,8}", 0..6),
        undefined in proptest::option::of("\\PC{0,8}"),
        json in any::<bool>(),
        nil_to_undefined in any::<bool>(),
    ) {
        let spec = EnumSpec {
            destination: "out.go".into(),
            copyright_file: None,
            package,
            type_name,
            values,
            undefined_value: undefined,
            marshalling: MarshalOptions {
                json: enumerator_core::JsonMarshalOptions { generate: json, nil_to_undefined },
            },
        };

        // Either outcome is fine; it must not panic, and success implies a renderable model.
        if validate(&spec).is_ok() {
            prop_assert!(is_exported_go_identifier(&spec.type_name));
            prop_assert!(!spec.values.is_empty());
            let model = CodeModel::build(&spec, None).unwrap();
            let expected = format!("type {} interface", spec.type_name);
            prop_assert!(render(&model).contains(&expected));
        }
    }
}
