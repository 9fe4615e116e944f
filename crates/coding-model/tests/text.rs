#![allow(missing_docs)]

use coding_model::{
    Code, Coding, SerializeOptions, TextError, Value, as_character, code, coding, eval_coding,
    parse_expr,
};
use proptest::prelude::*;

fn survey() -> Coding {
    coding([
        code("Yes", 1),
        code("No", 0),
        code("Refused", None::<i32>)
            .with_missing(true)
            .with_description("Respondent refused"),
    ])
    .unwrap()
    .with_label("yesno")
}

#[test]
fn test_serialized_form() {
    insta::assert_snapshot!(
        as_character(&survey(), SerializeOptions::default()),
        @r#"coding(code("Yes", 1), code("No", 0), code("Refused", NA, missing = TRUE, description = "Respondent refused"), label = "yesno")"#
    );
}

#[test]
fn test_serialized_form_with_lineage() {
    let recoded = coding([
        code("Agree", 1.5).with_links_from(["Agree", "Strongly agree"]),
        code("Neutral", 0.0),
    ])
    .unwrap();
    insta::assert_snapshot!(
        as_character(&recoded, SerializeOptions::default().with_links_from(true)),
        @r#"coding(code("Agree", 1.5, links_from = c("Agree", "Strongly agree")), code("Neutral", 0))"#
    );
}

#[test]
fn test_round_trip() {
    let original = survey();
    let text = as_character(&original, SerializeOptions::default());
    let back = eval_coding(&parse_expr(&text).unwrap()).unwrap();
    assert_eq!(back, original);
}

#[test]
fn test_integers_widen_to_numeric() {
    let text = as_character(&coding([code("A", 2)]).unwrap(), SerializeOptions::default());
    assert_eq!(text, r#"coding(code("A", 2))"#);
    let back: Coding = text.parse().unwrap();
    assert!(matches!(back.get("A").unwrap().value(), Value::Float(v) if *v == 2.0));
}

#[test]
fn test_large_integers_round_trip_exactly() {
    let big = (1_i64 << 53) + 1;
    let original = coding([code("Big", big), code("Max", i64::MAX)]).unwrap();
    let text = as_character(&original, SerializeOptions::default());
    assert!(text.contains("9007199254740993L"));
    let back: Coding = text.parse().unwrap();
    assert_eq!(back.get("Big").unwrap().value(), &Value::Integer(big));
    assert_eq!(back, original);
}

#[test]
fn test_ambient_names_unreachable() {
    for source in [
        r#"coding(code("A", x))"#,
        r#"coding(code(HOME, 1))"#,
        r#"coding(code("A", 1), label = Sys.getenv("USER"))"#,
        r#"eval(parse(text = "1"))"#,
    ] {
        assert!(
            matches!(source.parse::<Coding>(), Err(TextError::UnknownName { .. })),
            "{source} should be rejected"
        );
    }
}

#[test]
fn test_non_expression_rejected() {
    assert!(matches!(
        "".parse::<Coding>(),
        Err(TextError::NotAnExpression { .. })
    ));
    assert!(matches!(
        "coding(code(\"A\", 1)) ; rm".parse::<Coding>(),
        Err(TextError::UnexpectedChar { found: ';', .. })
    ));
}

#[test]
fn test_deep_nesting_is_an_error() {
    let source = format!(
        "coding(code(\"A\", {}1{}))",
        "c(".repeat(200_000),
        ")".repeat(200_000)
    );
    assert!(matches!(
        source.parse::<Coding>(),
        Err(TextError::TooDeep { .. })
    ));
}

fn arb_label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _'\"\\\\]{0,12}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[ -~\t\n]{0,12}"
}

/// Values for up to seven codes, all drawn from one kind family.
fn arb_values() -> impl Strategy<Value = Vec<Value>> {
    fn column<S: Strategy<Value = Value>>(values: S) -> impl Strategy<Value = Vec<Value>> {
        prop::collection::vec(
            prop::option::of(values).prop_map(|v| v.unwrap_or(Value::Missing)),
            7,
        )
    }
    prop_oneof![
        column((-1.0e6f64..1.0e6).prop_map(Value::Float)),
        column(any::<i64>().prop_map(Value::Integer)),
        column(arb_text().prop_map(Value::String)),
        column(any::<bool>().prop_map(Value::Boolean)),
    ]
}

fn arb_codes() -> impl Strategy<Value = Vec<Code>> {
    let meta = (
        any::<bool>(),
        prop::option::of(arb_text()),
        prop::collection::vec(arb_label(), 0..3),
    );
    (prop::collection::btree_map(arb_label(), meta, 1..8), arb_values()).prop_map(
        |(codes, values)| {
            codes
                .into_iter()
                .zip(values)
                .map(|((label, (missing, description, sources)), value)| {
                    let mut code = code(label, value)
                        .with_missing(missing)
                        .with_links_from(sources);
                    if let Some(description) = description {
                        code = code.with_description(description);
                    }
                    code
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_text_round_trip(codes in arb_codes(), label in prop::option::of(arb_label())) {
        let original = Coding::new(codes, label).unwrap();
        let text = as_character(&original, SerializeOptions::default().with_links_from(true));
        prop_assert!(!text.contains('\n'));
        let back: Coding = text.parse().unwrap();
        prop_assert_eq!(back, original);
    }

    #[test]
    fn prop_select_all_is_identity(codes in arb_codes()) {
        let original = Coding::new(codes, None).unwrap();
        let selected = coding_model::select_codes_if(&original, |_| true).unwrap();
        prop_assert_eq!(selected, original);
    }
}
