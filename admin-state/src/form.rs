//! State behind the generic create/edit modal.
//!
//! A form holds two copies of its data: the draft the user is editing and
//! the snapshot last committed (from the initial data or a submit). Closing
//! without submitting throws the draft away.

use payloads::requests::{FieldValue, FormData};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::future::Future;
use std::str::FromStr;

use crate::StateCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    Textarea,
    Checkbox,
    File,
    /// One of [`FieldDescriptor::options`], stored as text.
    Select,
}

impl FieldKind {
    /// The `type` attribute of the matching `<input>`.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text | Self::Textarea | Self::Select => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Checkbox => "checkbox",
            Self::File => "file",
        }
    }
}

/// Declarative description of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Key into the form data.
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    /// Used when the initial data has no value for this field.
    pub default: Option<FieldValue>,
    /// `(value, label)` pairs offered by a select.
    pub options: Vec<(String, String)>,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            default: None,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options<V, L>(mut self, options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| (value.into(), label.into()))
            .collect();
        self
    }

    /// A checkbox only falls back to its default when there is no initial
    /// data at all; a record without the key seeds it unchecked.
    fn seed_value(&self, initial: Option<&FormData>) -> FieldValue {
        let given = initial.and_then(|data| data.get(&self.name));
        match (self.kind, initial) {
            (FieldKind::Checkbox, Some(_)) => {
                FieldValue::Bool(given.is_some_and(FieldValue::is_truthy))
            }
            (FieldKind::Checkbox, None) => FieldValue::Bool(
                self.default.as_ref().is_some_and(FieldValue::is_truthy),
            ),
            _ => given.or(self.default.as_ref()).cloned().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: String },
    #[error("{field} must be a number")]
    NotANumber { field: String },
    #[error("{field} is still loading")]
    StillLoading { field: String },
}

/// Presence and number checks implied by the descriptors.
pub fn validate(
    fields: &[FieldDescriptor],
    data: &FormData,
) -> Result<(), FormError> {
    for field in fields {
        let value = data.get(&field.name);
        let present = match (field.kind, value) {
            (FieldKind::Checkbox, _) => true,
            (_, Some(value)) => !value.is_blank(),
            (_, None) => false,
        };
        if field.required && !present {
            return Err(FormError::Missing {
                field: field.label.clone(),
            });
        }

        if field.kind == FieldKind::Number
            && let Some(text) = value.and_then(FieldValue::as_text)
            && !text.trim().is_empty()
            && Decimal::from_str(text.trim()).is_err()
        {
            return Err(FormError::NotANumber {
                field: field.label.clone(),
            });
        }
    }
    Ok(())
}

/// Trim leading and trailing whitespace from every text value.
pub fn trimmed(data: &FormData) -> FormData {
    data.iter()
        .map(|(name, value)| {
            let value = match value {
                FieldValue::Text(text) => FieldValue::Text(text.trim().to_string()),
                other => other.clone(),
            };
            (name.clone(), value)
        })
        .collect()
}

/// Draft and committed snapshot of one form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    draft: FormData,
    snapshot: FormData,
}

impl FormState {
    pub fn seed(fields: &[FieldDescriptor], initial: Option<&FormData>) -> Self {
        let data: FormData = fields
            .iter()
            .map(|field| (field.name.clone(), field.seed_value(initial)))
            .collect();
        Self {
            draft: data.clone(),
            snapshot: data,
        }
    }

    pub fn edit(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.draft.set(name, value);
    }

    /// Trim the draft, make it the new snapshot and return it as the payload
    /// to submit.
    pub fn commit(&mut self) -> FormData {
        let payload = trimmed(&self.draft);
        self.snapshot = payload.clone();
        self.draft = payload.clone();
        payload
    }

    pub fn discard(&mut self) {
        self.draft = self.snapshot.clone();
    }

    pub fn draft(&self) -> &FormData {
        &self.draft
    }

    pub fn snapshot(&self) -> &FormData {
        &self.snapshot
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.snapshot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The callback succeeded and the modal closed. The caller should run
    /// its close callback.
    Closed,
    /// The callback failed; the modal is editable again.
    Failed,
    /// A presence or number check failed; the callback was not called.
    Invalid(FormError),
    /// The modal was not in a state that accepts a submit.
    Ignored,
}

/// Phase machine around a [`FormState`]:
/// `Closed -> Editing <-> Submitting -> Closed`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormModal {
    phase: ModalPhase,
    form: FormState,
    /// File fields whose selection has not been read into the draft yet.
    loading_files: BTreeSet<String>,
    /// Result of the last presence/number check, shown next to the form.
    pub invalid: Option<FormError>,
}

impl FormModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form and start editing. Calling it again while open
    /// re-derives the form from the new descriptors and data.
    pub fn open(&mut self, fields: &[FieldDescriptor], initial: Option<&FormData>) {
        self.form = FormState::seed(fields, initial);
        self.phase = ModalPhase::Editing;
        self.loading_files.clear();
        self.invalid = None;
    }

    /// Returns false if the edit was dropped because the form is not being
    /// edited.
    pub fn edit(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> bool {
        if self.phase != ModalPhase::Editing {
            return false;
        }
        let name = name.into();
        self.loading_files.remove(&name);
        self.form.edit(name, value);
        true
    }

    /// Mark a file field as picked but not yet read. Submitting is refused
    /// until the matching [`FormModal::edit`] or [`FormModal::abandon_file`].
    pub fn begin_file(&mut self, name: impl Into<String>) -> bool {
        if self.phase != ModalPhase::Editing {
            return false;
        }
        self.loading_files.insert(name.into());
        true
    }

    /// The pick could not be read; the field keeps its previous value.
    pub fn abandon_file(&mut self, name: &str) {
        self.loading_files.remove(name);
    }

    pub fn is_loading_file(&self) -> bool {
        !self.loading_files.is_empty()
    }

    pub fn begin_submit(
        &mut self,
        fields: &[FieldDescriptor],
    ) -> Result<FormData, SubmitOutcome> {
        if self.phase != ModalPhase::Editing {
            return Err(SubmitOutcome::Ignored);
        }
        if let Some(field) = fields
            .iter()
            .find(|field| self.loading_files.contains(&field.name))
        {
            let e = FormError::StillLoading {
                field: field.label.clone(),
            };
            self.invalid = Some(e.clone());
            return Err(SubmitOutcome::Invalid(e));
        }
        if let Err(e) = validate(fields, &trimmed(self.form.draft())) {
            self.invalid = Some(e.clone());
            return Err(SubmitOutcome::Invalid(e));
        }
        self.invalid = None;
        self.phase = ModalPhase::Submitting;
        Ok(self.form.commit())
    }

    pub fn finish_submit<E>(&mut self, result: &Result<(), E>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                self.form.discard();
                self.phase = ModalPhase::Closed;
                SubmitOutcome::Closed
            }
            Err(_) => {
                self.phase = ModalPhase::Editing;
                SubmitOutcome::Failed
            }
        }
    }

    /// Discard unsaved edits and close.
    pub fn cancel(&mut self) {
        self.form.discard();
        self.phase = ModalPhase::Closed;
        self.loading_files.clear();
        self.invalid = None;
    }

    /// Keep a closed modal's draft equal to its snapshot so stale edits never
    /// reach the next open.
    pub fn sync_closed(&mut self) {
        if self.phase == ModalPhase::Closed {
            self.form.discard();
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == ModalPhase::Submitting
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn draft(&self) -> &FormData {
        self.form.draft()
    }

    pub fn snapshot(&self) -> &FormData {
        self.form.snapshot()
    }
}

/// Submit the modal's draft through `on_submit`.
///
/// Failures of the callback are logged and swallowed: the modal goes back to
/// editing with the trimmed draft so the user can correct and retry.
pub async fn submit<C, F, Fut>(
    cell: &C,
    fields: &[FieldDescriptor],
    on_submit: F,
) -> SubmitOutcome
where
    C: StateCell<FormModal>,
    F: FnOnce(FormData) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let mut begun = Err(SubmitOutcome::Ignored);
    cell.reduce(|modal| begun = modal.begin_submit(fields));
    let payload = match begun {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };

    let result = on_submit(payload).await;
    if let Err(e) = &result {
        tracing::error!("Submission failed: {e:#}");
    }

    let mut outcome = SubmitOutcome::Failed;
    cell.reduce(|modal| outcome = modal.finish_submit(&result));
    outcome
}
