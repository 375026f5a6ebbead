use std::io::Write;

use anyhow::Context;
use jarvis_shared::{Board, DraftField, EditorForm, KeyValueStore};
use tracing::{debug, info, instrument};

use crate::cli::Command;
use crate::render::Renderer;

#[instrument(skip(board, renderer, out))]
pub fn dispatch<S, W>(
    board: &mut Board<S>,
    renderer: &Renderer,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::List { filter } => {
            board.set_filter(filter);
            renderer.write_counts(out, board.counts(), board.active_filter())?;
            writeln!(out)?;
            renderer.write_task_table(out, &board.visible())
        }
        Command::Show { id } => match board.find(id) {
            Some(task) => renderer.write_task_info(out, task),
            None => not_found(out, id),
        },
        Command::Add(args) => {
            board.open_create();
            let task_id = save_editor(board, args.changes())?;
            writeln!(out, "Created task {}.", task_id.unwrap_or_default())?;
            Ok(())
        }
        Command::Edit(args) => {
            let Some(task) = board.find(args.id).cloned() else {
                return not_found(out, args.id);
            };
            board.open_edit(task);
            save_editor(board, args.changes())?;
            writeln!(out, "Updated task {}.", args.id)?;
            Ok(())
        }
        Command::Delete { id } => {
            if board.find(id).is_none() {
                return not_found(out, id);
            }
            board.delete(id).context("failed to delete task")?;
            writeln!(out, "Deleted task {id}.")?;
            Ok(())
        }
        Command::Toggle { id } => {
            if board.find(id).is_none() {
                return not_found(out, id);
            }
            board.toggle(id).context("failed to toggle task")?;
            let state = match board.find(id) {
                Some(task) if task.completed => "completed",
                _ => "pending",
            };
            writeln!(out, "Task {id} is now {state}.")?;
            Ok(())
        }
    }
}

// Runs the open editor session: seed the form from the board's edit target,
// apply the field changes, save. Returns the id of a newly created task.
fn save_editor<S: KeyValueStore>(
    board: &mut Board<S>,
    changes: Vec<DraftField>,
) -> anyhow::Result<Option<u64>> {
    let mut form = EditorForm::from_target(board.editing_target());
    debug!(mode = ?form.mode, changes = changes.len(), "filling editor form");
    for change in changes {
        form.set(change);
    }

    let values = match form.submit() {
        Ok(values) => values,
        Err(missing) => {
            board.cancel();
            return Err(missing.into());
        }
    };

    let creating = board.editing_target().is_none();
    let before: Vec<u64> = board.collection().iter().map(|t| t.id).collect();
    board.save(values).context("failed to save task")?;
    info!(creating, "task saved");

    Ok(creating
        .then(|| {
            board
                .collection()
                .iter()
                .map(|t| t.id)
                .find(|id| !before.contains(id))
        })
        .flatten())
}

fn not_found<W: Write>(out: &mut W, id: u64) -> anyhow::Result<()> {
    writeln!(out, "No task with id {id}; nothing to do.")?;
    Ok(())
}
