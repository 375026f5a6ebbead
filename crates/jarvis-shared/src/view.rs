use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use tracing::{debug, info, warn};

use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::{Task, TaskFields};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown filter: {s} (expected all, pending or completed)"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }

    pub fn count(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Pending => self.pending,
            Filter::Completed => self.completed,
        }
    }
}

/// Session state for one task list view, backed by a [`TaskStore`].
///
/// `collection` mirrors the store and is reloaded in full after every
/// mutation. The editor flag, the edit target and the filter are independent
/// values; only `save` and `cancel` touch the first two together.
#[derive(Debug, Clone, PartialEq)]
pub struct Board<S> {
    store: TaskStore<S>,
    collection: Vec<Task>,
    editor_open: bool,
    editing_target: Option<Task>,
    active_filter: Filter,
    last_error: Option<String>,
}

impl<S: KeyValueStore> Board<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        let collection = store.list();
        debug!(count = collection.len(), "board loaded");
        Self {
            store,
            collection,
            editor_open: false,
            editing_target: None,
            active_filter: Filter::All,
            last_error: None,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<S> {
        &mut self.store
    }

    pub fn collection(&self) -> &[Task] {
        &self.collection
    }

    pub fn editor_open(&self) -> bool {
        self.editor_open
    }

    pub fn editing_target(&self) -> Option<&Task> {
        self.editing_target.as_ref()
    }

    pub fn active_filter(&self) -> Filter {
        self.active_filter
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.collection.iter().find(|t| t.id == id)
    }

    pub fn open_create(&mut self) {
        self.editing_target = None;
        self.editor_open = true;
    }

    pub fn open_edit(&mut self, task: Task) {
        debug!(id = task.id, "opening editor");
        self.editing_target = Some(task);
        self.editor_open = true;
    }

    /// Creates or updates depending on the edit target. A failed write keeps
    /// the editor open on the same target.
    #[tracing::instrument(skip(self, values), fields(editing = ?self.editing_target.as_ref().map(|t| t.id)))]
    pub fn save(&mut self, values: TaskFields) -> anyhow::Result<()> {
        let result = match &self.editing_target {
            None => self.store.create(values).map(|task| {
                info!(id = task.id, "saved new task");
            }),
            Some(target) => {
                let merged = target.with_fields(values);
                self.store.update(merged)
            }
        };
        self.settle(result)?;
        self.editor_open = false;
        self.editing_target = None;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.editor_open = false;
        self.editing_target = None;
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: u64) -> anyhow::Result<()> {
        let result = self.store.remove(id);
        self.settle(result)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle(&mut self, id: u64) -> anyhow::Result<()> {
        let result = self.store.toggle(id);
        self.settle(result)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.active_filter = filter;
    }

    pub fn reload(&mut self) {
        self.collection = self.store.list();
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.collection
            .iter()
            .filter(|t| self.active_filter.matches(t))
            .collect()
    }

    pub fn counts(&self) -> FilterCounts {
        FilterCounts::of(&self.collection)
    }

    // Reload regardless of outcome: a failed write leaves storage at its
    // previous value and the mirror must still match it.
    fn settle(&mut self, result: anyhow::Result<()>) -> anyhow::Result<()> {
        self.reload();
        match result {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "storage write failed");
                self.last_error = Some(format!("{err:#}"));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::task::{Category, Priority};

    fn fields(name: &str) -> TaskFields {
        TaskFields {
            name: name.to_string(),
            description: "whole milk, 2 litres".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 10).expect("date"),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 10).expect("date"),
            priority: Priority::Low,
            category: Category::Personal,
        }
    }

    fn board() -> Board<MemoryStore> {
        Board::new(TaskStore::new(MemoryStore::new()))
    }

    fn ids(tasks: &[&Task]) -> BTreeSet<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn create_then_filter() {
        let mut board = board();
        board.open_create();
        board.save(fields("Buy milk")).expect("save");

        assert_eq!(board.collection().len(), 1);
        assert!(!board.collection()[0].completed);
        let counts = board.counts();
        assert_eq!(counts.count(Filter::All), 1);
        assert_eq!(counts.count(Filter::Pending), 1);
        assert_eq!(counts.count(Filter::Completed), 0);
        assert!(!board.editor_open());
        assert!(board.editing_target().is_none());
    }

    #[test]
    fn edit_preserves_id_and_other_fields() {
        let mut board = board();
        board.open_create();
        board.save(fields("Buy milk")).expect("create");
        let original = board.collection()[0].clone();

        board.open_edit(original.clone());
        assert!(board.editor_open());
        let mut edited = original.fields();
        edited.name = "Buy oat milk".to_string();
        board.save(edited).expect("update");

        let tasks = board.collection();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, original.id);
        assert_eq!(tasks[0].name, "Buy oat milk");
        assert_eq!(tasks[0].description, original.description);
        assert_eq!(tasks[0].priority, original.priority);
        assert_eq!(tasks[0].category, original.category);
        assert_eq!(tasks[0].start_date, original.start_date);
    }

    #[test]
    fn editing_a_deleted_task_saves_nothing() {
        let mut board = board();
        board.open_create();
        board.save(fields("ephemeral")).expect("create");
        let target = board.collection()[0].clone();

        board.open_edit(target.clone());
        board.delete(target.id).expect("delete");
        board.save(fields("resurrected")).expect("save");

        assert!(board.collection().is_empty());
        assert!(!board.editor_open());
    }

    #[test]
    fn cancel_discards_without_touching_storage() {
        let mut board = board();
        board.open_create();
        board.save(fields("keep")).expect("create");
        let snapshot = board.store().backend().clone();

        board.open_edit(board.collection()[0].clone());
        board.cancel();

        assert!(!board.editor_open());
        assert!(board.editing_target().is_none());
        assert_eq!(board.store().backend(), &snapshot);
    }

    #[test]
    fn filters_partition_the_collection() {
        let mut board = board();
        for name in ["a", "b", "c", "d", "e"] {
            board.open_create();
            board.save(fields(name)).expect("create");
        }
        let second = board.collection()[1].id;
        let fourth = board.collection()[3].id;
        board.toggle(second).expect("toggle");
        board.toggle(fourth).expect("toggle");

        board.set_filter(Filter::All);
        let all = ids(&board.visible());
        board.set_filter(Filter::Pending);
        let pending = ids(&board.visible());
        board.set_filter(Filter::Completed);
        let completed = ids(&board.visible());

        assert!(pending.is_disjoint(&completed));
        let union: BTreeSet<u64> = pending.union(&completed).copied().collect();
        assert_eq!(union, all);
        let counts = board.counts();
        assert_eq!(counts.total, counts.pending + counts.completed);
        assert_eq!(counts.completed, 2);
        assert_eq!(completed, BTreeSet::from([second, fourth]));
    }

    #[test]
    fn visible_keeps_collection_order() {
        let mut board = board();
        for name in ["first", "second", "third"] {
            board.open_create();
            board.save(fields(name)).expect("create");
        }
        let middle = board.collection()[1].id;
        board.toggle(middle).expect("toggle");
        board.set_filter(Filter::Pending);

        let names: Vec<&str> = board.visible().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);
    }

    #[test]
    fn set_filter_does_not_reload() {
        let mut board = board();
        board
            .store_mut()
            .create(fields("written behind the board's back"))
            .expect("create");
        board.set_filter(Filter::Pending);
        assert!(board.collection().is_empty());

        board.reload();
        assert_eq!(board.visible().len(), 1);
    }

    #[test]
    fn write_fault_is_surfaced_and_keeps_editor_open() {
        let mut board = board();
        board.store_mut().backend_mut().set_quota(Some(2));
        board.open_create();

        let err = board.save(fields("too big")).expect_err("quota");
        assert!(format!("{err:#}").contains("quota exceeded"));
        assert!(board.editor_open());
        assert!(board.last_error().is_some());
        assert!(board.collection().is_empty());

        board.store_mut().backend_mut().set_quota(None);
        board.save(fields("fits now")).expect("save");
        assert!(board.last_error().is_none());
        assert_eq!(board.collection().len(), 1);
    }

    #[test]
    fn filter_parses_labels() {
        assert_eq!("pending".parse::<Filter>().expect("filter"), Filter::Pending);
        assert_eq!("Completed".parse::<Filter>().expect("filter"), Filter::Completed);
        assert!("done".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
    }
}
