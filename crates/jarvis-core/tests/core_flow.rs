use std::fs;

use chrono::NaiveDate;
use jarvis_core::datastore::FileStore;
use jarvis_shared::{
    Board, Category, DraftField, EditorForm, Filter, Priority, Task, TaskFields, TaskStore,
};
use tempfile::tempdir;

fn buy_milk() -> TaskFields {
    TaskFields {
        name: "Buy milk".to_string(),
        description: "2 litres, semi-skimmed".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 6, 10).expect("date"),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 11).expect("date"),
        priority: Priority::Low,
        category: Category::Personal,
    }
}

fn open_board(path: &std::path::Path) -> Board<FileStore> {
    let store = FileStore::open(path).expect("open file store");
    Board::new(TaskStore::new(store))
}

#[test]
fn create_edit_toggle_delete_survive_reopen() {
    let temp = tempdir().expect("tempdir");

    let mut board = open_board(temp.path());
    board.open_create();
    board.save(buy_milk()).expect("create");
    let created = board.collection()[0].clone();
    let counts = board.counts();
    assert_eq!((counts.total, counts.pending, counts.completed), (1, 1, 0));

    board.open_edit(created.clone());
    let mut form = EditorForm::from_target(board.editing_target());
    form.set(DraftField::Name("Buy oat milk".to_string()));
    board.save(form.submit().expect("complete form")).expect("update");

    let mut reopened = open_board(temp.path());
    let tasks = reopened.collection().to_vec();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, created.id);
    assert_eq!(tasks[0].name, "Buy oat milk");
    assert_eq!(tasks[0].description, created.description);

    reopened.toggle(created.id).expect("toggle");
    reopened.set_filter(Filter::Completed);
    assert_eq!(reopened.visible().len(), 1);

    reopened.delete(created.id).expect("delete");
    assert!(open_board(temp.path()).collection().is_empty());
}

#[test]
fn delete_removes_exactly_one_in_order() {
    let temp = tempdir().expect("tempdir");
    let tasks: Vec<Task> = [1, 2, 3]
        .into_iter()
        .map(|id| Task::from_fields(id, buy_milk()))
        .collect();
    fs::write(
        temp.path().join("tasks.json"),
        serde_json::to_string(&tasks).expect("serialize"),
    )
    .expect("seed");

    let mut board = open_board(temp.path());
    board.delete(2).expect("delete");
    let ids: Vec<u64> = board.collection().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);

    board.delete(2).expect("delete again");
    let ids: Vec<u64> = board.collection().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn malformed_storage_file_lists_empty() {
    let temp = tempdir().expect("tempdir");
    fs::write(temp.path().join("tasks.json"), "{ definitely not tasks").expect("seed");

    let board = open_board(temp.path());
    assert!(board.collection().is_empty());
    assert_eq!(board.counts().total, 0);
}

#[test]
fn records_without_completed_flag_load_as_pending() {
    let temp = tempdir().expect("tempdir");
    fs::write(
        temp.path().join("tasks.json"),
        r#"[{"id":1718000000000,"name":"Legacy","description":"old shape",
            "startDate":"2024-01-01","endDate":"2024-01-02",
            "priority":"High","category":"Work"}]"#,
    )
    .expect("seed");

    let board = open_board(temp.path());
    assert_eq!(board.collection().len(), 1);
    assert_eq!(board.counts().pending, 1);
    assert!(!board.collection()[0].completed);
}
