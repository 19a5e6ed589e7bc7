//! Form controller.
//!
//! One controller per mounted form. It owns the value store and the error
//! map; renderers only ever see borrowed snapshots and report changes back
//! through `change` / `apply`. Data flows one way:
//!
//! ```text
//! FormValues ──render──▶ widget ──Interaction──▶ input::interact ──▶ change()
//!      ▲                                                               │
//!      └──────────────────────── store + clear error ◀────────────────┘
//! ```
//!
//! Lifecycle: `Editing` → (`submit`) → `Validating` → `Submitted` on a clean
//! run, otherwise back to `Editing` with the error map filled. Any accepted
//! edit returns the controller to `Editing`.

use std::fmt;

use strum::Display;
use tracing::{debug, error, info, warn};

use crate::error::FormError;
use crate::field::{Field, FieldKind};
use crate::input::{self, file, Interaction};
use crate::picker::{FilePicker, PickOutcome, PickRequest};
use crate::schema::FormSchema;
use crate::validate::{validate_form, FieldError, FieldErrors, PatternCache};
use crate::value::{FieldValue, FormValues};

type Callback = Box<dyn FnMut(&FormValues) + Send>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum Phase {
    #[default]
    Editing,
    Validating,
    Submitted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed and the submit callback ran.
    Submitted,
    Invalid { errors: FieldErrors },
}

/// Result of a file-pick round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    /// The user backed out; nothing changed.
    Cancelled,
    /// The picker returned no files; nothing changed.
    Empty,
    /// The batch contained a file over `maxSizeMB`; nothing was attached.
    Rejected { name: String },
    /// Number of files attached.
    Attached(usize),
}

pub struct FormController {
    schema: FormSchema,
    patterns: PatternCache,
    values: FormValues,
    errors: FieldErrors,
    phase: Phase,
    on_submit: Option<Callback>,
    on_values_change: Option<Callback>,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("form_id", &self.schema.form_id)
            .field("phase", &self.phase)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Mount a schema: structural check, pattern compilation, defaults.
    pub fn new(schema: FormSchema) -> Result<Self, FormError> {
        let patterns = schema.compile()?;
        let values = FormValues::initialize(&schema, None);
        info!(form = %schema.form_id, fields = schema.field_count(), "form mounted");
        Ok(Self {
            schema,
            patterns,
            values,
            errors: FieldErrors::new(),
            phase: Phase::Editing,
            on_submit: None,
            on_values_change: None,
        })
    }

    /// Overlay initial values on the synthesized defaults.
    pub fn with_initial_values(mut self, initial: &FormValues) -> Self {
        self.values = FormValues::initialize(&self.schema, Some(initial));
        self
    }

    pub fn on_submit(mut self, callback: impl FnMut(&FormValues) + Send + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn on_values_change(mut self, callback: impl FnMut(&FormValues) + Send + 'static) -> Self {
        self.on_values_change = Some(Box::new(callback));
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, id: &str) -> &FieldValue {
        self.values.value_or_null(id)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, id: &str) -> Option<&FieldError> {
        self.errors.get(id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.schema.visible_fields()
    }

    fn field(&self, id: &str) -> Result<&Field, FormError> {
        self.schema
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }

    /// Store a new value for `id`. Clears that field's error only; other
    /// errors stay until the next submit.
    pub fn change(&mut self, id: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.field(id)?;
        let value = value.into();
        debug!(field = id, ?value, "field changed");
        self.values.set(id, value);
        self.errors.remove(id);
        self.phase = Phase::Editing;
        if let Some(callback) = self.on_values_change.as_mut() {
            callback(&self.values);
        }
        Ok(())
    }

    /// Run a widget gesture through the field's interaction rules and store
    /// the result. Returns whether a change was emitted.
    pub fn apply(&mut self, id: &str, interaction: Interaction) -> Result<bool, FormError> {
        let next = {
            let field = self.field(id)?;
            input::interact(field, self.values.value_or_null(id), interaction)?
        };
        match next {
            Some(value) => {
                self.change(id, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_file(&mut self, id: &str, index: usize) -> Result<bool, FormError> {
        self.apply(id, Interaction::RemoveFile(index))
    }

    /// Ask `picker` for files and attach them to the file field `id`.
    pub async fn pick_files<P: FilePicker>(
        &mut self,
        id: &str,
        picker: &P,
    ) -> Result<PickResult, FormError> {
        let field = self.field(id)?;
        let FieldKind::File(attrs) = &field.kind else {
            return Err(FormError::Unsupported {
                field: id.to_string(),
                kind: field.field_type(),
                interaction: "PickFiles",
            });
        };
        let attrs = attrs.clone();

        let outcome = picker
            .pick(&PickRequest::for_field(&attrs))
            .await
            .inspect_err(|err| error!(field = id, %err, "file picker failed"))?;

        let batch = match outcome {
            PickOutcome::Cancelled => {
                debug!(field = id, "file pick cancelled");
                return Ok(PickResult::Cancelled);
            }
            PickOutcome::Picked(batch) if batch.is_empty() => return Ok(PickResult::Empty),
            PickOutcome::Picked(batch) => batch,
        };

        if let Err(err) = file::check_sizes(&attrs, &batch) {
            warn!(field = id, %err, "rejected file batch");
            let name = match &err {
                FieldError::FileTooLarge { name, .. } => name.clone(),
                _ => String::new(),
            };
            self.errors.insert(id, err);
            return Ok(PickResult::Rejected { name });
        }

        let count = batch.len();
        let next = file::attach(&attrs, self.values.value_or_null(id), batch);
        self.change(id, next)?;
        Ok(PickResult::Attached(count))
    }

    /// Validate every visible field. On success the submit callback runs
    /// once with the full value snapshot.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.phase = Phase::Validating;
        self.errors = validate_form(&self.schema, &self.values, &self.patterns);

        if !self.errors.is_empty() {
            self.phase = Phase::Editing;
            debug!(form = %self.schema.form_id, errors = self.errors.len(), "submit blocked");
            return SubmitOutcome::Invalid {
                errors: self.errors.clone(),
            };
        }

        self.phase = Phase::Submitted;
        info!(form = %self.schema.form_id, "form submitted");
        if let Some(callback) = self.on_submit.as_mut() {
            callback(&self.values);
        }
        SubmitOutcome::Submitted
    }
}
