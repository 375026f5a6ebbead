use std::error::Error;
use std::fmt;

use chrono::NaiveDate;

use crate::task::{Category, Priority, Task, TaskFields};

/// In-progress form values. Empty text and `None` mean "not filled in yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

/// One field edit coming from the input surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Name(String),
    Description(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Priority(Option<Priority>),
    Category(Option<Category>),
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            start_date: Some(task.start_date),
            end_date: Some(task.end_date),
            priority: Some(task.priority),
            category: Some(task.category),
        }
    }

    pub fn apply(&mut self, change: DraftField) {
        match change {
            DraftField::Name(value) => self.name = value,
            DraftField::Description(value) => self.description = value,
            DraftField::StartDate(value) => self.start_date = value,
            DraftField::EndDate(value) => self.end_date = value,
            DraftField::Priority(value) => self.priority = value,
            DraftField::Category(value) => self.category = value,
        }
    }

    pub fn missing_field(&self) -> Option<MissingField> {
        if self.name.is_empty() {
            Some(MissingField::Name)
        } else if self.description.is_empty() {
            Some(MissingField::Description)
        } else if self.start_date.is_none() {
            Some(MissingField::StartDate)
        } else if self.end_date.is_none() {
            Some(MissingField::EndDate)
        } else if self.priority.is_none() {
            Some(MissingField::Priority)
        } else if self.category.is_none() {
            Some(MissingField::Category)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Description,
    StartDate,
    EndDate,
    Priority,
    Category,
}

impl MissingField {
    pub fn label(self) -> &'static str {
        match self {
            MissingField::Name => "Task Name",
            MissingField::Description => "Description",
            MissingField::StartDate => "Start date",
            MissingField::EndDate => "End date",
            MissingField::Priority => "Priority",
            MissingField::Category => "Category",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is required", self.label())
    }
}

impl Error for MissingField {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub mode: EditorMode,
    pub draft: TaskDraft,
}

impl EditorForm {
    pub fn for_create() -> Self {
        Self {
            mode: EditorMode::Create,
            draft: TaskDraft::default(),
        }
    }

    pub fn for_edit(task: &Task) -> Self {
        Self {
            mode: EditorMode::Edit(task.id),
            draft: TaskDraft::from_task(task),
        }
    }

    pub fn from_target(target: Option<&Task>) -> Self {
        target.map_or_else(Self::for_create, Self::for_edit)
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Add New Task",
            EditorMode::Edit(_) => "Edit Task",
        }
    }

    pub fn set(&mut self, change: DraftField) {
        self.draft.apply(change);
    }

    pub fn is_complete(&self) -> bool {
        self.draft.missing_field().is_none()
    }

    /// Emits the draft as-is: no trimming, and no check that the end date
    /// follows the start date.
    pub fn submit(&self) -> Result<TaskFields, MissingField> {
        let draft = &self.draft;
        match (draft.start_date, draft.end_date, draft.priority, draft.category) {
            (Some(start_date), Some(end_date), Some(priority), Some(category))
                if draft.missing_field().is_none() =>
            {
                Ok(TaskFields {
                    name: draft.name.clone(),
                    description: draft.description.clone(),
                    start_date,
                    end_date,
                    priority,
                    category,
                })
            }
            _ => Err(draft.missing_field().unwrap_or(MissingField::Name)),
        }
    }
}

/// Value of an `<input type="date">`: `YYYY-MM-DD`, or empty when cleared.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn filled_form() -> EditorForm {
        let mut form = EditorForm::for_create();
        form.set(DraftField::Name("  Buy milk ".to_string()));
        form.set(DraftField::Description("corner shop".to_string()));
        form.set(DraftField::StartDate(Some(date("2024-06-12"))));
        form.set(DraftField::EndDate(Some(date("2024-06-10"))));
        form.set(DraftField::Priority(Some(Priority::Low)));
        form.set(DraftField::Category(Some(Category::Personal)));
        form
    }

    #[test]
    fn create_form_starts_empty() {
        let form = EditorForm::from_target(None);
        assert_eq!(form.mode, EditorMode::Create);
        assert_eq!(form.draft, TaskDraft::default());
        assert_eq!(form.title(), "Add New Task");
        assert!(!form.is_complete());
        assert_eq!(form.submit(), Err(MissingField::Name));
    }

    #[test]
    fn edit_form_is_prefilled_from_target() {
        let fields = filled_form().submit().expect("complete");
        let task = Task::from_fields(11, fields.clone());
        let form = EditorForm::from_target(Some(&task));
        assert_eq!(form.mode, EditorMode::Edit(11));
        assert_eq!(form.title(), "Edit Task");
        assert_eq!(form.submit(), Ok(fields));
    }

    #[test]
    fn submit_emits_values_unchanged_and_allows_reversed_dates() {
        let fields = filled_form().submit().expect("complete");
        assert_eq!(fields.name, "  Buy milk ");
        assert!(fields.end_date < fields.start_date);
    }

    #[test]
    fn set_replaces_exactly_one_field() {
        let mut form = filled_form();
        let before = form.draft.clone();
        form.set(DraftField::Priority(Some(Priority::High)));
        assert_eq!(form.draft.priority, Some(Priority::High));
        assert_eq!(
            TaskDraft {
                priority: before.priority,
                ..form.draft.clone()
            },
            before
        );
    }

    #[test]
    fn reports_first_missing_field() {
        let mut form = filled_form();
        form.set(DraftField::EndDate(None));
        form.set(DraftField::Category(None));
        assert!(!form.is_complete());
        assert_eq!(form.submit(), Err(MissingField::EndDate));
        assert_eq!(MissingField::EndDate.to_string(), "End date is required");
    }

    #[test]
    fn date_inputs_parse_iso_and_treat_empty_as_unset() {
        assert_eq!(parse_date_input("2024-02-29"), Some(date("2024-02-29")));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("2023-02-29"), None);
        assert_eq!(format_date_input(Some(date("2024-06-01"))), "2024-06-01");
        assert_eq!(format_date_input(None), "");
    }
}
