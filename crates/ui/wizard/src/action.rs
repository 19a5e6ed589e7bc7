use forms::FormValues;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),
    /// Redraw after a state change inside a component.
    Update,
    /// Validate and, when clean, submit the form.
    Submit,
    /// The form was submitted with these values.
    Submitted(FormValues),
    /// Resolve `paths` into files for the file field `field`. No paths
    /// means the user backed out.
    PickFiles { field: String, paths: Vec<String> },
}
