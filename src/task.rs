//! Tasks and the validated task-edit submission.
//!
//! The edit form posts a [`TaskUpdateForm`]. It is wrapped in
//! [`Tainted`] at the boundary and turned into a `Verified<TaskUpdate>` by
//! [`TaskUpdateSanitizer`]. Only the verified form reaches
//! [`update_task`](crate::update_task).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{CompanyId, TaskId};
use crate::sanitizer::{SanitizationError, SanitizationErrorKind, Sanitizer, TextSanitizer};
use crate::{Tainted, Verified};

macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $lit:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $lit)] $variant),+
        }

        impl $name {
            /// Every accepted value.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire literal.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $lit),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SanitizationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let accepted: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        SanitizationError::new(
                            SanitizationErrorKind::UnknownVariant,
                            format!("Invalid {}: expected one of {}", $label, accepted.join(", ")),
                        )
                    })
            }
        }
    };
}

literal_enum!(
    /// Progress of a task.
    TaskState("task state") {
        /// Not started yet
        NotStarted => "notStarted",
        /// Work is ongoing
        InProgress => "inProgress",
        /// Done
        Completed => "completed",
    }
);

literal_enum!(
    /// Review outcome of a task.
    ReviewStatus("review status") {
        /// Not flagged for review
        NotFlagged => "notFlagged",
        /// Flagged for review
        Flagged => "flagged",
        /// Reviewed and approved
        Approved => "approved",
    }
);

literal_enum!(
    /// Task priority.
    Priority("priority") {
        /// Low priority
        Low => "low",
        /// Medium priority
        Medium => "medium",
        /// High priority
        High => "high",
    }
);

/// A task owned by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Document id
    pub id: TaskId,
    /// Owning company
    pub company_id: CompanyId,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Due date as entered by the user
    #[serde(default)]
    pub due_date: Option<String>,
    /// Estimated effort in hours
    pub estimated_time: f64,
    /// Progress
    #[serde(default)]
    pub task_state: Option<TaskState>,
    /// Review outcome
    #[serde(default)]
    pub review_status: Option<ReviewStatus>,
    /// Whether the task goes on the next meeting agenda
    #[serde(default)]
    pub meeting_agenda_flag: Option<bool>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Priority
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Category label
    #[serde(default)]
    pub category: Option<String>,
}

impl Task {
    /// Applies a validated update as a patch.
    ///
    /// Title, description and estimated time are always replaced. Optional
    /// fields are only replaced when the update carries a value. An empty
    /// string clears a free-text field.
    pub fn apply(&mut self, update: TaskUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.estimated_time = update.estimated_time;

        if update.due_date.is_some() {
            self.due_date = update.due_date;
        }
        if update.task_state.is_some() {
            self.task_state = update.task_state;
        }
        if update.review_status.is_some() {
            self.review_status = update.review_status;
        }
        if update.meeting_agenda_flag.is_some() {
            self.meeting_agenda_flag = update.meeting_agenda_flag;
        }
        if update.notes.is_some() {
            self.notes = update.notes;
        }
        if update.priority.is_some() {
            self.priority = update.priority;
        }
        if update.category.is_some() {
            self.category = update.category;
        }
    }
}

/// The validated contents of a task-edit submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    /// New title (at least 3 characters)
    pub title: String,
    /// New description (at least 5 characters)
    pub description: String,
    /// New due date; `Some("")` clears it
    pub due_date: Option<String>,
    /// New estimate in hours (at least 1)
    pub estimated_time: f64,
    /// New progress
    pub task_state: Option<TaskState>,
    /// New review outcome
    pub review_status: Option<ReviewStatus>,
    /// New agenda flag
    pub meeting_agenda_flag: Option<bool>,
    /// New notes; `Some("")` clears them
    pub notes: Option<String>,
    /// New priority
    pub priority: Option<Priority>,
    /// New category; `Some("")` clears it
    pub category: Option<String>,
}

/// A number field as submitted: either a JSON number or text to be coerced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// Already numeric
    Number(f64),
    /// Text typed into an input
    Text(String),
}

impl RawNumber {
    /// Coerces to a number. Blank text is 0; unparsable text is NaN.
    fn coerce(&self) -> f64 {
        match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        RawNumber::Number(n)
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        RawNumber::Text(s.to_string())
    }
}

/// Raw task-edit submission, as posted by the client.
///
/// # Examples
///
/// ```
/// use company_gate::{Sanitizer, TaskUpdateForm, TaskUpdateSanitizer};
///
/// let form = TaskUpdateForm::from_json(r#"{
///     "title": "File annual return",
///     "description": "Submit the return to the registry",
///     "estimatedTime": "2",
///     "priority": "high"
/// }"#).unwrap();
///
/// let update = TaskUpdateSanitizer::default().sanitize(form).unwrap();
/// assert_eq!(update.as_ref().estimated_time, 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskUpdateForm {
    /// Title field
    pub title: String,
    /// Description field
    pub description: String,
    /// Due date field
    pub due_date: Option<String>,
    /// Estimated time field
    pub estimated_time: Option<RawNumber>,
    /// Task state radio group
    pub task_state: Option<String>,
    /// Review status radio group
    pub review_status: Option<String>,
    /// Agenda switch
    pub meeting_agenda_flag: Option<bool>,
    /// Notes textarea
    pub notes: Option<String>,
    /// Priority dropdown
    pub priority: Option<String>,
    /// Category field
    pub category: Option<String>,
}

impl TaskUpdateForm {
    /// Builds a form pre-filled with the current values of `task`.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            estimated_time: Some(RawNumber::Number(task.estimated_time)),
            task_state: task.task_state.map(|s| s.as_str().to_string()),
            review_status: task.review_status.map(|s| s.as_str().to_string()),
            meeting_agenda_flag: task.meeting_agenda_flag,
            notes: task.notes.clone(),
            priority: task.priority.map(|p| p.as_str().to_string()),
            category: task.category.clone(),
        }
    }

    /// Parses a JSON submission and marks it as untrusted.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizationErrorKind::MalformedInput`] if the body is not a
    /// valid submission.
    pub fn from_json(json: &str) -> Result<Tainted<Self>, SanitizationError> {
        serde_json::from_str(json).map(Tainted::new).map_err(|_| {
            SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "The submitted task could not be read",
            )
        })
    }
}

/// Validates task-edit submissions.
#[derive(Debug, Clone, Copy)]
pub struct TaskUpdateSanitizer {
    title: TextSanitizer,
    description: TextSanitizer,
    short_text: TextSanitizer,
    notes: TextSanitizer,
}

impl Default for TaskUpdateSanitizer {
    fn default() -> Self {
        Self {
            title: TextSanitizer::new(200).min_chars(3, "Title is required"),
            description: TextSanitizer::new(5_000)
                .multiline()
                .min_chars(5, "Description is required"),
            short_text: TextSanitizer::new(100),
            notes: TextSanitizer::new(10_000).multiline(),
        }
    }
}

impl TaskUpdateSanitizer {
    /// A field that was not sent stays `None`; a blank one becomes `""`.
    fn optional_text(
        sanitizer: &TextSanitizer,
        value: Option<String>,
    ) -> Result<Option<String>, SanitizationError> {
        match value {
            None => Ok(None),
            Some(v) if v.trim().is_empty() => Ok(Some(String::new())),
            Some(v) => sanitizer
                .sanitize(Tainted::new(v))
                .map(|s| Some(s.into_inner())),
        }
    }

    fn optional_literal<T>(value: Option<String>) -> Result<Option<T>, SanitizationError>
    where
        T: FromStr<Err = SanitizationError>,
    {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.parse().map(Some),
            _ => Ok(None),
        }
    }

    fn estimated_time(value: Option<RawNumber>) -> Result<f64, SanitizationError> {
        let n = value.map(|r| r.coerce()).unwrap_or(f64::NAN);
        if !n.is_finite() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::NotANumber,
                "Estimated time must be a number",
            ));
        }
        if n < 1.0 {
            return Err(SanitizationError::new(
                SanitizationErrorKind::OutOfRange,
                "Estimated time is required",
            ));
        }
        Ok(n)
    }
}

impl Sanitizer<TaskUpdateForm> for TaskUpdateSanitizer {
    type Output = TaskUpdate;

    fn sanitize(
        &self,
        input: Tainted<TaskUpdateForm>,
    ) -> Result<Verified<TaskUpdate>, SanitizationError> {
        let form = input.into_inner();

        let update = TaskUpdate {
            title: self.title.sanitize(Tainted::new(form.title))?.into_inner(),
            description: self
                .description
                .sanitize(Tainted::new(form.description))?
                .into_inner(),
            due_date: Self::optional_text(&self.short_text, form.due_date)?,
            estimated_time: Self::estimated_time(form.estimated_time)?,
            task_state: Self::optional_literal(form.task_state)?,
            review_status: Self::optional_literal(form.review_status)?,
            meeting_agenda_flag: form.meeting_agenda_flag,
            notes: Self::optional_text(&self.notes, form.notes)?,
            priority: Self::optional_literal(form.priority)?,
            category: Self::optional_text(&self.short_text, form.category)?,
        };

        Ok(Verified::new_unchecked(update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_task;

    fn form() -> TaskUpdateForm {
        TaskUpdateForm {
            title: "Prepare AGM".to_string(),
            description: "Book venue and send notices".to_string(),
            estimated_time: Some("3".into()),
            ..Default::default()
        }
    }

    fn sanitize(form: TaskUpdateForm) -> Result<TaskUpdate, SanitizationError> {
        TaskUpdateSanitizer::default()
            .sanitize(Tainted::new(form))
            .map(Verified::into_inner)
    }

    #[test]
    fn minimal_form_is_accepted() {
        let update = sanitize(form()).unwrap();

        assert_eq!(update.title, "Prepare AGM");
        assert_eq!(update.estimated_time, 3.0);
        assert_eq!(update.priority, None);
        assert_eq!(update.notes, None);
    }

    #[test]
    fn short_title_and_description_are_rejected() {
        let mut f = form();
        f.title = "AG".to_string();
        assert_eq!(sanitize(f).unwrap_err().message(), "Title is required");

        let mut f = form();
        f.description = "Book".to_string();
        assert_eq!(sanitize(f).unwrap_err().message(), "Description is required");
    }

    #[test]
    fn estimated_time_is_coerced_and_bounded() {
        let mut f = form();
        f.estimated_time = Some(RawNumber::Number(1.5));
        assert_eq!(sanitize(f).unwrap().estimated_time, 1.5);

        let mut f = form();
        f.estimated_time = Some("0".into());
        assert_eq!(
            sanitize(f).unwrap_err().kind(),
            SanitizationErrorKind::OutOfRange
        );

        let mut f = form();
        f.estimated_time = Some("".into());
        assert_eq!(
            sanitize(f).unwrap_err().message(),
            "Estimated time is required"
        );

        let mut f = form();
        f.estimated_time = Some("soon".into());
        assert_eq!(
            sanitize(f).unwrap_err().kind(),
            SanitizationErrorKind::NotANumber
        );

        let mut f = form();
        f.estimated_time = None;
        assert!(sanitize(f).is_err());
    }

    #[test]
    fn literals_are_parsed_and_unknown_ones_rejected() {
        let mut f = form();
        f.task_state = Some("inProgress".to_string());
        f.review_status = Some("flagged".to_string());
        f.priority = Some("high".to_string());
        let update = sanitize(f).unwrap();

        assert_eq!(update.task_state, Some(TaskState::InProgress));
        assert_eq!(update.review_status, Some(ReviewStatus::Flagged));
        assert_eq!(update.priority, Some(Priority::High));

        let mut f = form();
        f.priority = Some("urgent".to_string());
        let err = sanitize(f).unwrap_err();
        assert_eq!(err.kind(), SanitizationErrorKind::UnknownVariant);
        assert_eq!(err.message(), "Invalid priority: expected one of low, medium, high");
    }

    #[test]
    fn blank_text_clears_and_blank_literal_is_unset() {
        let mut f = form();
        f.category = Some("   ".to_string());
        f.notes = Some(String::new());
        f.task_state = Some(String::new());
        let update = sanitize(f).unwrap();

        assert_eq!(update.category.as_deref(), Some(""));
        assert_eq!(update.notes.as_deref(), Some(""));
        assert_eq!(update.due_date, None);
        assert_eq!(update.task_state, None);
    }

    #[test]
    fn apply_clears_free_text_sent_blank() {
        let mut task = sample_task("T1", "C1");
        task.notes = Some("old notes".to_string());
        task.category = Some("Legal".to_string());

        let mut f = form();
        f.notes = Some(String::new());
        task.apply(sanitize(f).unwrap());

        assert_eq!(task.notes.as_deref(), Some(""));
        assert_eq!(task.category.as_deref(), Some("Legal"));
    }

    #[test]
    fn every_text_field_is_bounded() {
        let long = |n: usize| "x".repeat(n);
        let cases: [(&str, fn(&mut TaskUpdateForm, String), usize); 5] = [
            ("title", |f, v| f.title = v, 200),
            ("description", |f, v| f.description = v, 5_000),
            ("notes", |f, v| f.notes = Some(v), 10_000),
            ("category", |f, v| f.category = Some(v), 100),
            ("due date", |f, v| f.due_date = Some(v), 100),
        ];

        for (field, set, max) in cases {
            let mut f = form();
            set(&mut f, long(max));
            assert!(sanitize(f).is_ok(), "{field} at {max} chars should pass");

            let mut f = form();
            set(&mut f, long(max + 1));
            assert_eq!(
                sanitize(f).unwrap_err().kind(),
                SanitizationErrorKind::TooLong,
                "{field} over {max} chars"
            );
        }
    }

    #[test]
    fn notes_keep_line_breaks() {
        let mut f = form();
        f.notes = Some("first\nsecond".to_string());
        assert_eq!(sanitize(f).unwrap().notes.as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn prefilled_form_round_trips_through_sanitizer() {
        let task = sample_task("T1", "C1");
        let update = sanitize(TaskUpdateForm::from_task(&task)).unwrap();

        let mut patched = task.clone();
        patched.apply(update);
        assert_eq!(patched, task);
    }

    #[test]
    fn apply_leaves_unset_optionals_untouched() {
        let mut task = sample_task("T1", "C1");
        task.category = Some("Legal".to_string());

        let mut f = form();
        f.priority = Some("low".to_string());
        task.apply(sanitize(f).unwrap());

        assert_eq!(task.title, "Prepare AGM");
        assert_eq!(task.category.as_deref(), Some("Legal"));
        assert_eq!(task.priority, Some(Priority::Low));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = TaskUpdateForm::from_json("{\"title\": 5}").unwrap_err();
        assert_eq!(err.kind(), SanitizationErrorKind::MalformedInput);
    }

    #[test]
    fn task_literals_serialize_camel_case() {
        assert_eq!(
            serde_json::to_string(&TaskState::NotStarted).unwrap(),
            "\"notStarted\""
        );
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": "T9",
            "companyId": "C1",
            "title": "x",
            "description": "y",
            "estimatedTime": 2,
            "reviewStatus": "approved"
        }))
        .unwrap();
        assert_eq!(task.review_status, Some(ReviewStatus::Approved));
    }
}
