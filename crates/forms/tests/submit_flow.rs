//! End-to-end submit flow through the public API:
//! - schema loaded from JSON, defaults synthesized on mount
//! - a blocked submit followed by a clean one
//! - hidden fields neither validated nor blocking

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use forms::{
    FieldError, FieldValue, FormController, FormSchema, FormValues, Interaction, Phase,
    SubmitOutcome,
};
use pretty_assertions::assert_eq;

const SIGNUP: &str = r#"{
    "formId": "signup",
    "title": "Sign up",
    "fields": [
        { "id": "name", "type": "text", "label": "Name", "required": true },
        { "id": "age", "type": "number", "label": "Age", "min": 18 }
    ]
}"#;

fn submissions() -> (Arc<Mutex<Vec<FormValues>>>, impl FnMut(&FormValues) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |values: &FormValues| sink.lock().unwrap().push(values.clone()))
}

#[test]
fn blocked_then_successful_submit() {
    let schema = FormSchema::from_json_str(SIGNUP).unwrap();
    let (seen, callback) = submissions();
    let mut form = FormController::new(schema).unwrap().on_submit(callback);

    form.change("name", "").unwrap();
    form.change("age", 15).unwrap();

    let SubmitOutcome::Invalid { errors } = form.submit() else {
        panic!("submit should be blocked");
    };
    assert_eq!(
        errors.get("name"),
        Some(&FieldError::Required {
            label: "Name".into()
        })
    );
    assert_eq!(errors.get("age"), Some(&FieldError::BelowMin { min: 18.0 }));
    assert_eq!(
        errors.messages(),
        BTreeMap::from([
            ("age".to_string(), "Minimum value is 18".to_string()),
            ("name".to_string(), "Name is required".to_string()),
        ])
    );
    assert_eq!(form.phase(), Phase::Editing);
    assert!(seen.lock().unwrap().is_empty());

    form.change("name", "Ann").unwrap();
    form.change("age", 20).unwrap();
    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert!(form.errors().is_empty());
    assert_eq!(form.phase(), Phase::Submitted);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].to_json(),
        serde_json::json!({ "name": "Ann", "age": 20 })
    );
}

#[test]
fn defaults_and_initial_values() {
    let schema = FormSchema::from_json_str(
        r#"{
            "formId": "prefs",
            "title": "Preferences",
            "fields": [
                { "id": "volume", "type": "slider", "label": "Volume", "min": 10, "max": 90 },
                { "id": "topics", "type": "checkbox", "label": "Topics",
                  "options": [ { "label": "Rust", "value": "rust" } ] },
                { "id": "nick", "type": "text", "label": "Nick" }
            ]
        }"#,
    )
    .unwrap();

    let form = FormController::new(schema.clone()).unwrap();
    assert_eq!(form.value("volume"), &FieldValue::Number(10.0));
    assert_eq!(form.value("topics"), &FieldValue::List(vec![]));
    assert_eq!(form.value("nick"), &FieldValue::from(""));

    let initial: FormValues = [("nick", "ferris")].into_iter().collect();
    let form = FormController::new(schema).unwrap().with_initial_values(&initial);
    assert_eq!(form.value("nick"), &FieldValue::from("ferris"));
    assert_eq!(form.value("volume"), &FieldValue::Number(10.0));
}

#[test]
fn hidden_required_field_does_not_block() {
    let schema = FormSchema::from_json_str(
        r#"{
            "formId": "f",
            "title": "F",
            "fields": [
                { "id": "shown", "type": "text", "label": "Shown" },
                { "id": "internal", "type": "text", "label": "Internal", "required": true, "hidden": true }
            ]
        }"#,
    )
    .unwrap();
    let mut form = FormController::new(schema).unwrap();
    let visible: Vec<_> = form.visible_fields().map(|f| f.id.clone()).collect();
    assert_eq!(visible, ["shown"]);
    assert_eq!(form.submit(), SubmitOutcome::Submitted);
}

#[test]
fn checkbox_required_needs_a_selection() {
    let schema = FormSchema::from_json_str(
        r#"{
            "formId": "f",
            "title": "F",
            "fields": [
                { "id": "terms", "type": "checkbox", "label": "Terms", "required": true,
                  "options": [ { "label": "I agree", "value": true } ] }
            ]
        }"#,
    )
    .unwrap();
    let mut form = FormController::new(schema).unwrap();

    let SubmitOutcome::Invalid { errors } = form.submit() else {
        panic!("empty selection must block");
    };
    assert_eq!(errors.get("terms"), Some(&FieldError::EmptySelection));

    form.apply("terms", Interaction::Toggle(true.into())).unwrap();
    assert_eq!(form.submit(), SubmitOutcome::Submitted);
}

#[test]
fn stepper_and_slider_through_controller() {
    let schema = FormSchema::from_json_str(
        r#"{
            "formId": "f",
            "title": "F",
            "fields": [
                { "id": "n", "type": "number", "label": "N", "min": 0, "max": 10 },
                { "id": "s", "type": "slider", "label": "S", "min": 0, "max": 100, "step": 25 }
            ]
        }"#,
    )
    .unwrap();
    let mut form = FormController::new(schema).unwrap();

    form.change("n", 10).unwrap();
    form.apply("n", Interaction::Increment).unwrap();
    assert_eq!(form.value("n"), &FieldValue::Number(10.0));

    form.change("n", 0).unwrap();
    form.apply("n", Interaction::Decrement).unwrap();
    assert_eq!(form.value("n"), &FieldValue::Number(0.0));

    form.apply(
        "s",
        Interaction::Drag {
            position: 140.0,
            track_width: 200.0,
        },
    )
    .unwrap();
    assert_eq!(form.value("s"), &FieldValue::Number(75.0));

    form.apply("s", Interaction::Nudge(-1)).unwrap();
    assert_eq!(form.value("s"), &FieldValue::Number(50.0));
}
