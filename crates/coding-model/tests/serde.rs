#![allow(missing_docs)]

use coding_model::{Coding, code, coding};

#[test]
fn test_coding_json_round_trip() {
    let c = coding([code("Yes", "Y"), code("No", "N").with_description("Declined")])
        .unwrap()
        .with_label("yn");
    let json = serde_json::to_string(&c).expect("serialize coding");
    let back: Coding = serde_json::from_str(&json).expect("deserialize coding");
    assert_eq!(back, c);
    assert_eq!(back.position("No"), Some(2));
}

#[test]
fn test_deserialization_checks_invariants() {
    let json = r#"{
        "codes": [
            {"label": "A", "value": {"Integer": 1}, "links_from": ["A"], "description": "A"},
            {"label": "A", "value": {"Integer": 2}, "links_from": ["A"], "description": "A"}
        ],
        "label": null
    }"#;
    let err = serde_json::from_str::<Coding>(json).unwrap_err();
    assert!(err.to_string().contains("labels must be unique"));
}
