use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown priority: {s} (expected High, Medium or Low)"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Personal,
    General,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::General];

    pub fn label(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown category: {s} (expected Work, Personal or General)"))
    }
}

/// The user-editable part of a task: everything except `id` and `completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub priority: Priority,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,

    pub name: String,

    pub description: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    pub priority: Priority,

    pub category: Category,

    // Records written before completion tracking existed carry no flag.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn from_fields(id: u64, fields: TaskFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            start_date: fields.start_date,
            end_date: fields.end_date,
            priority: fields.priority,
            category: fields.category,
            completed: false,
        }
    }

    /// Replaces the editable fields, keeping `id` and `completed`.
    pub fn with_fields(&self, fields: TaskFields) -> Self {
        Self {
            completed: self.completed,
            ..Self::from_fields(self.id, fields)
        }
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            priority: self.priority,
            category: self.category,
        }
    }
}
