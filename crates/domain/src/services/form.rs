//! Form dialog state and submission.
//!
//! Submitting validates every field of the draft first. Any failure is
//! reported per field and the callback is never invoked; on success the
//! callback receives the typed payload and the dialog resets and closes.

use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Field that collects struct-level (cross-field) errors.
pub const FORM_FIELD: &str = "form";

/// Validation messages keyed by field path, e.g. `components[1].score`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// One `(field, message)` pair per message, ordered by field.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| (field.as_str(), m.as_str())))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        collect(&mut out, "", errors);
        out
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        FieldErrors::from(&errors)
    }
}

fn join(prefix: &str, key: &str) -> String {
    match (prefix.is_empty(), key == "__all__") {
        (true, true) => FORM_FIELD.to_string(),
        (true, false) => key.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}.{}", prefix, key),
    }
}

fn collect(out: &mut FieldErrors, prefix: &str, errors: &ValidationErrors) {
    for (key, kind) in errors.errors() {
        let path = join(prefix, &key.to_string());
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                    out.add(path.clone(), message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(out, &path, inner),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(out, &format!("{}[{}]", path, index), inner);
                }
            }
        }
    }
}

/// Validates a draft, flattening any failures.
pub fn validate_form<F: Validate>(form: &F) -> Result<(), FieldErrors> {
    form.validate().map_err(FieldErrors::from)
}

#[derive(Debug, Error)]
pub enum SubmitError<E> {
    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error("No form is open")]
    NotOpen,
    #[error("{0}")]
    Rejected(E),
}

/// Validates `form` and hands it to `callback` only if it is valid.
pub fn submit<F, T, E>(form: F, callback: impl FnOnce(F) -> Result<T, E>) -> Result<T, SubmitError<E>>
where
    F: Validate,
{
    validate_form(&form).map_err(SubmitError::Invalid)?;
    callback(form).map_err(SubmitError::Rejected)
}

pub async fn submit_async<F, T, E, Fut>(
    form: F,
    callback: impl FnOnce(F) -> Fut,
) -> Result<T, SubmitError<E>>
where
    F: Validate,
    Fut: Future<Output = Result<T, E>>,
{
    validate_form(&form).map_err(SubmitError::Invalid)?;
    callback(form).await.map_err(SubmitError::Rejected)
}

/// What an open dialog will do on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(Uuid),
}

/// A create/edit dialog holding a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDialog<F> {
    open: Option<(DialogMode, F)>,
    errors: FieldErrors,
}

impl<F: Validate> FormDialog<F> {
    pub fn closed() -> Self {
        Self {
            open: None,
            errors: FieldErrors::new(),
        }
    }

    pub fn create(draft: F) -> Self {
        let mut dialog = Self::closed();
        dialog.open_create(draft);
        dialog
    }

    /// Opens pre-filled from an existing record.
    pub fn edit(id: Uuid, draft: F) -> Self {
        let mut dialog = Self::closed();
        dialog.open_edit(id, draft);
        dialog
    }

    pub fn open_create(&mut self, draft: F) {
        self.open = Some((DialogMode::Create, draft));
        self.errors = FieldErrors::new();
    }

    pub fn open_edit(&mut self, id: Uuid, draft: F) {
        self.open = Some((DialogMode::Edit(id), draft));
        self.errors = FieldErrors::new();
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<DialogMode> {
        self.open.as_ref().map(|(mode, _)| *mode)
    }

    pub fn draft(&self) -> Option<&F> {
        self.open.as_ref().map(|(_, draft)| draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut F> {
        self.open.as_mut().map(|(_, draft)| draft)
    }

    /// Errors from the last failed submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn cancel(&mut self) {
        self.open = None;
        self.errors = FieldErrors::new();
    }

    /// Validates the draft and runs `callback` on success.
    ///
    /// The dialog stays open with its draft and errors when validation
    /// fails or the callback rejects; it closes only after success.
    pub fn submit<T, E>(
        &mut self,
        callback: impl FnOnce(DialogMode, &F) -> Result<T, E>,
    ) -> Result<T, SubmitError<E>> {
        let (mode, draft) = self.open.as_ref().ok_or(SubmitError::NotOpen)?;
        if let Err(errors) = validate_form(draft) {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }
        let value = callback(*mode, draft).map_err(SubmitError::Rejected)?;
        self.cancel();
        Ok(value)
    }

    pub async fn submit_async<T, E, Fut>(
        &mut self,
        callback: impl FnOnce(DialogMode, F) -> Fut,
    ) -> Result<T, SubmitError<E>>
    where
        F: Clone,
        Fut: Future<Output = Result<T, E>>,
    {
        let (mode, draft) = self.open.clone().ok_or(SubmitError::NotOpen)?;
        if let Err(errors) = validate_form(&draft) {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }
        let value = callback(mode, draft).await.map_err(SubmitError::Rejected)?;
        self.cancel();
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grade::{GradeForm, GradeStatus, ScoreComponent};
    use crate::models::schedule::{ScheduleForm, ScheduleStatus, ScheduleType};
    use chrono::NaiveDate;

    fn grade_form() -> GradeForm {
        GradeForm {
            student_id: Uuid::new_v4(),
            student_name: "Eka Putra".to_string(),
            subject: "Chemistry".to_string(),
            level: "Grade 11".to_string(),
            components: vec![
                ScoreComponent::new("Quiz", 88.0),
                ScoreComponent::new("Exam", 91.0),
            ],
            status: GradeStatus::Draft,
        }
    }

    #[test]
    fn test_field_errors_flatten_nested_paths() {
        let mut form = grade_form();
        form.subject = String::new();
        form.components[1].name = String::new();

        let errors = validate_form(&form).unwrap_err();
        assert!(errors.contains("subject"));
        assert!(errors.contains("components[1].name"));
    }

    #[test]
    fn test_struct_level_errors_map_to_form_or_parent() {
        let mut form = grade_form();
        form.components[0].score = 150.0;
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(
            errors.get("components[0]").unwrap(),
            &["Score must be between 0 and 100".to_string()]
        );

        let schedule = ScheduleForm {
            title: "Sports Day".to_string(),
            description: String::new(),
            schedule_type: ScheduleType::Event,
            start_date: NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 16).unwrap(),
            start_time: None,
            end_time: None,
            teachers: vec![],
            classes: vec![],
            status: ScheduleStatus::Scheduled,
        };
        let errors = validate_form(&schedule).unwrap_err();
        assert!(errors.contains(FORM_FIELD));
    }

    #[test]
    fn test_pairs_one_per_message() {
        let mut errors = FieldErrors::new();
        errors.add("name", "too short");
        errors.add("name", "blank");
        errors.add("email", "invalid");
        let pairs: Vec<_> = errors.pairs().collect();
        assert_eq!(
            pairs,
            vec![("email", "invalid"), ("name", "too short"), ("name", "blank")]
        );
    }

    #[test]
    fn test_submit_skips_callback_when_invalid() {
        let mut form = grade_form();
        form.components.clear();
        let mut called = false;
        let result = submit(form, |_| {
            called = true;
            Ok::<_, String>(())
        });
        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert!(!called);
    }

    #[test]
    fn test_submit_passes_callback_errors_through() {
        let result = submit(grade_form(), |_| Err::<(), _>("store down"));
        assert!(matches!(result, Err(SubmitError::Rejected("store down"))));
    }

    #[test]
    fn test_dialog_closes_on_success() {
        let mut dialog = FormDialog::create(grade_form());
        assert_eq!(dialog.mode(), Some(DialogMode::Create));

        let subject = dialog
            .submit(|_, draft| Ok::<_, String>(draft.subject.clone()))
            .unwrap();
        assert_eq!(subject, "Chemistry");
        assert!(!dialog.is_open());
        assert!(dialog.draft().is_none());
    }

    #[test]
    fn test_dialog_stays_open_with_errors() {
        let id = Uuid::new_v4();
        let mut dialog = FormDialog::edit(id, grade_form());
        if let Some(draft) = dialog.draft_mut() {
            draft.student_name.clear();
        }

        let result = dialog.submit(|_, _| Ok::<_, String>(()));
        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert!(dialog.is_open());
        assert_eq!(dialog.mode(), Some(DialogMode::Edit(id)));
        assert!(dialog.errors().contains("student_name"));

        if let Some(draft) = dialog.draft_mut() {
            draft.student_name = "Eka Putra".to_string();
        }
        assert!(dialog.submit(|_, _| Ok::<_, String>(())).is_ok());
        assert!(dialog.errors().is_empty());
    }

    #[test]
    fn test_closed_dialog_rejects_submit() {
        let mut dialog: FormDialog<GradeForm> = FormDialog::closed();
        let result = dialog.submit(|_, _| Ok::<_, String>(()));
        assert!(matches!(result, Err(SubmitError::NotOpen)));
    }

    #[tokio::test]
    async fn test_submit_async() {
        let mut dialog = FormDialog::create(grade_form());
        let value = dialog
            .submit_async(|mode, draft| async move {
                assert_eq!(mode, DialogMode::Create);
                Ok::<_, String>(draft.components.len())
            })
            .await
            .unwrap();
        assert_eq!(value, 2);
        assert!(!dialog.is_open());
    }
}
