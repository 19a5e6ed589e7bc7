//! Non-interactive subcommands and schema / value file IO.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use color_eyre::{Result, eyre::WrapErr};
use forms::{FormController, FormSchema, FormValues, SubmitOutcome};
use tracing::{debug, info};

/// Read a schema from `path`. `.ron` files are parsed as RON, anything else
/// as JSON. The schema is checked before it is returned.
pub fn load_schema(path: &Path) -> Result<FormSchema> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read schema {}", path.display()))?;
    let is_ron = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));
    let schema = if is_ron {
        FormSchema::from_ron_str(&text)
    } else {
        FormSchema::from_json_str(&text)
    }
    .wrap_err_with(|| format!("Invalid schema {}", path.display()))?;
    schema
        .check()
        .wrap_err_with(|| format!("Invalid schema {}", path.display()))?;
    debug!(form = %schema.form_id, fields = schema.field_count(), "schema loaded");
    Ok(schema)
}

/// Read a JSON object of field values.
pub fn load_values(path: &Path) -> Result<FormValues> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read values {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("Invalid values {}", path.display()))
}

/// Print the visible fields of the schema at `path`.
pub fn check(path: &Path, out: &mut impl Write) -> Result<()> {
    let schema = load_schema(path)?;
    let hidden = schema.fields.iter().filter(|f| f.hidden).count();
    writeln!(
        out,
        "{} ({}): {} fields, {} hidden",
        schema.title,
        schema.form_id,
        schema.field_count(),
        hidden
    )?;
    for field in schema.visible_fields() {
        let marker = if field.required { " *" } else { "" };
        writeln!(out, "  {:<16} {:<9} {}{}", field.id, field.field_type(), field.label, marker)?;
    }
    Ok(())
}

/// Mount the schema with stored values and submit it without a terminal.
/// Prints the values JSON when valid, one line per error otherwise.
pub fn validate(schema_path: &Path, values_path: &Path, out: &mut impl Write) -> Result<bool> {
    let schema = load_schema(schema_path)?;
    let values = load_values(values_path)?;
    let mut form = FormController::new(schema)?.with_initial_values(&values);

    match form.submit() {
        SubmitOutcome::Submitted => {
            writeln!(out, "{}", serde_json::to_string_pretty(&form.values().to_json())?)?;
            Ok(true)
        }
        SubmitOutcome::Invalid { errors } => {
            for (id, message) in errors.messages() {
                writeln!(out, "{id}: {message}")?;
            }
            info!(form = %form.schema().form_id, errors = errors.len(), "values invalid");
            Ok(false)
        }
    }
}

/// Write submitted values as pretty JSON to `output`, or stdout.
pub fn write_values(values: &FormValues, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&values.to_json())?;
    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "values written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

/// Number of non-blank values, for the summary log line.
pub fn filled_count(values: &FormValues) -> usize {
    values.iter().filter(|(_, v)| !v.is_blank()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCHEMA: &str = r#"{
        "formId": "signup",
        "title": "Sign up",
        "fields": [
            {"id": "name", "label": "Name", "type": "text", "required": true},
            {"id": "age", "label": "Age", "type": "number", "min": 18},
            {"id": "token", "label": "Token", "type": "text", "hidden": true}
        ]
    }"#;

    // RON map syntax, with the trailing commas JSON refuses
    const SCHEMA_RON: &str = r#"{
        "formId": "signup",
        "title": "Sign up",
        "fields": [
            { "id": "name", "label": "Name", "type": "text", "required": true },
        ],
    }"#;

    #[test]
    fn loads_json_and_ron() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("signup.json");
        let ron = dir.path().join("signup.ron");
        fs::write(&json, SCHEMA).unwrap();
        fs::write(&ron, SCHEMA_RON).unwrap();

        assert_eq!(load_schema(&json).unwrap().field_count(), 3);
        let from_ron = load_schema(&ron).unwrap();
        assert_eq!(from_ron.form_id, "signup");
        assert_eq!(from_ron.field_count(), 1);
    }

    #[test]
    fn broken_schema_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        let err = load_schema(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn check_lists_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signup.json");
        fs::write(&path, SCHEMA).unwrap();

        let mut out = Vec::new();
        check(&path, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Sign up (signup): 3 fields, 1 hidden\n"));
        assert!(out.contains("Name *"));
        assert!(!out.contains("token"));
    }

    #[test]
    fn validate_reports_each_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("signup.json");
        let values = dir.path().join("values.json");
        fs::write(&schema, SCHEMA).unwrap();
        fs::write(&values, r#"{"name": "", "age": 12}"#).unwrap();

        let mut out = Vec::new();
        assert!(!validate(&schema, &values, &mut out).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "age: Minimum value is 18\nname: Name is required\n"
        );

        fs::write(&values, r#"{"name": "Ann", "age": 30}"#).unwrap();
        let mut out = Vec::new();
        assert!(validate(&schema, &values, &mut out).unwrap());
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed, serde_json::json!({"name": "Ann", "age": 30, "token": ""}));
    }

    #[test]
    fn writes_values_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let values: FormValues = [("name", "Ann")].into_iter().collect();
        write_values(&values, Some(&path)).unwrap();
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"name": "Ann"}));
        assert_eq!(filled_count(&values), 1);
    }
}
