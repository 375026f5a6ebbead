pub mod editor;
pub mod present;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use editor::{DraftField, EditorForm, EditorMode, MissingField, TaskDraft};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{DEFAULT_STORAGE_KEY, TaskStore};
pub use task::{Category, Priority, Task, TaskFields};
pub use view::{Board, Filter, FilterCounts};
