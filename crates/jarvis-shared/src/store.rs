use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::storage::KeyValueStore;
use crate::task::{Task, TaskFields};

pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// The task collection kept as one serialized array under a single key.
///
/// Every mutation reads the whole collection, transforms it and writes the
/// whole collection back. Concurrent writers overwrite each other.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Absent, `null` or unparseable data all read as an empty collection.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn list(&self) -> Vec<Task> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted tasks");
                return Vec::new();
            }
            Err(err) => {
                warn!(error = %err, "failed reading task storage; treating as empty");
                return Vec::new();
            }
        };

        match decode_collection(&raw) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(err) => {
                error!(error = %err, "failed parsing persisted tasks; treating as empty");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<Task> {
        self.list().into_iter().find(|t| t.id == id)
    }

    pub fn create(&mut self, values: TaskFields) -> anyhow::Result<Task> {
        self.create_at(values, Utc::now())
    }

    #[tracing::instrument(skip(self, values), fields(key = %self.key, name_len = values.name.len()))]
    pub fn create_at(&mut self, values: TaskFields, now: DateTime<Utc>) -> anyhow::Result<Task> {
        let mut tasks = self.list();
        let task = Task::from_fields(next_id(&tasks, now), values);
        tasks.push(task.clone());
        self.save(&tasks)?;
        info!(id = task.id, "created task");
        Ok(task)
    }

    /// Replace-by-id. A task whose id is not persisted is dropped.
    #[tracing::instrument(skip(self, task), fields(key = %self.key, id = task.id))]
    pub fn update(&mut self, task: Task) -> anyhow::Result<()> {
        let mut matched = false;
        let tasks: Vec<Task> = self
            .list()
            .into_iter()
            .map(|existing| {
                if existing.id == task.id {
                    matched = true;
                    task.clone()
                } else {
                    existing
                }
            })
            .collect();
        if !matched {
            debug!("no task with this id; update dropped");
        }
        self.save(&tasks)
    }

    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn remove(&mut self, id: u64) -> anyhow::Result<()> {
        let before = self.list();
        let before_count = before.len();
        let kept: Vec<Task> = before.into_iter().filter(|t| t.id != id).collect();
        if kept.len() == before_count {
            debug!("no task with this id; remove skipped");
        } else {
            info!(before = before_count, after = kept.len(), "removed task");
        }
        self.save(&kept)
    }

    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn toggle(&mut self, id: u64) -> anyhow::Result<()> {
        let mut tasks = self.list();
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                info!(completed = task.completed, "toggled task");
            }
            None => debug!("no task with this id; toggle skipped"),
        }
        self.save(&tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> anyhow::Result<()> {
        debug!(count = tasks.len(), "saving tasks");
        let json = serde_json::to_string(tasks).context("failed to serialize tasks")?;
        self.backend
            .set(&self.key, &json)
            .with_context(|| format!("failed to write tasks to storage key {}", self.key))
    }
}

fn decode_collection(raw: &str) -> anyhow::Result<Vec<Task>> {
    let parsed: Option<Vec<Task>> = serde_json::from_str(raw)?;
    Ok(parsed.unwrap_or_default())
}

// Millisecond clock, bumped past the largest persisted id so two creates in
// the same millisecond (or after a clock step backwards) stay unique.
fn next_id(tasks: &[Task], now: DateTime<Utc>) -> u64 {
    let clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let floor = tasks
        .iter()
        .map(|t| t.id)
        .max()
        .map_or(0, |max| max.saturating_add(1));
    clock.max(floor)
}
