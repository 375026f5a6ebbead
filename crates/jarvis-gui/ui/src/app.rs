mod storage;

use gloo::console::log;
use jarvis_shared::present::{
  APP_TAGLINE,
  APP_TITLE
};
use jarvis_shared::{
  Board,
  Filter,
  Task,
  TaskFields,
  TaskStore
};
use yew::{
  Callback,
  Html,
  UseStateHandle,
  function_component,
  html,
  use_state
};

use self::storage::LocalStore;
use crate::components::{
  FilterBar,
  TaskForm,
  TaskGrid
};

type TaskBoard = Board<LocalStore>;

#[function_component(App)]
pub fn app() -> Html {
  let board = use_state(|| {
    Board::new(TaskStore::new(
      LocalStore
    ))
  });

  let on_filter = {
    let board = board.clone();
    Callback::from(
      move |filter: Filter| {
        ui_debug(
          "filter.select",
          filter.label()
        );
        update_board(&board, |next| {
          next.set_filter(filter);
        });
      }
    )
  };

  let on_add_click = {
    let board = board.clone();
    Callback::from(move |_| {
      ui_debug(
        "button.add.click",
        "opening create editor"
      );
      update_board(&board, |next| {
        next.open_create();
      });
    })
  };

  let on_edit = {
    let board = board.clone();
    Callback::from(move |task: Task| {
      ui_debug(
        "card.edit.click",
        &task.id.to_string()
      );
      update_board(&board, |next| {
        next.open_edit(task);
      });
    })
  };

  let on_delete = {
    let board = board.clone();
    Callback::from(move |id: u64| {
      ui_debug(
        "card.delete.click",
        &id.to_string()
      );
      update_board(&board, |next| {
        if let Err(error) =
          next.delete(id)
        {
          tracing::error!(id, error = %format!("{error:#}"), "delete failed");
        }
      });
    })
  };

  let on_toggle = {
    let board = board.clone();
    Callback::from(move |id: u64| {
      ui_debug(
        "card.toggle.change",
        &id.to_string()
      );
      update_board(&board, |next| {
        if let Err(error) =
          next.toggle(id)
        {
          tracing::error!(id, error = %format!("{error:#}"), "toggle failed");
        }
      });
    })
  };

  let on_save = {
    let board = board.clone();
    Callback::from(
      move |values: TaskFields| {
        ui_debug(
          "form.save.submit",
          &values.name
        );
        update_board(&board, |next| {
          if let Err(error) =
            next.save(values)
          {
            tracing::error!(error = %format!("{error:#}"), "save failed");
          }
        });
      }
    )
  };

  let on_cancel = {
    let board = board.clone();
    Callback::from(move |()| {
      ui_debug(
        "form.cancel.click",
        "closing editor"
      );
      update_board(&board, |next| {
        next.cancel();
      });
    })
  };

  let on_dismiss_error = {
    let board = board.clone();
    Callback::from(move |_| {
      update_board(&board, |next| {
        next.clear_error();
      });
    })
  };

  let counts = board.counts();
  let visible: Vec<Task> = board
    .visible()
    .into_iter()
    .cloned()
    .collect();
  let editing_target =
    board.editing_target().cloned();
  let form_key = editing_target
    .as_ref()
    .map_or_else(
      || "new".to_string(),
      |task| task.id.to_string()
    );
  // Save faults are shown inside the open editor instead of the banner.
  let banner_error = if board.editor_open() {
    None
  } else {
    board.last_error().map(str::to_string)
  };
  let form_error = if board.editor_open() {
    board.last_error().map(str::to_string)
  } else {
    None
  };

  html! {
      <div class="app">
          <header class="hero">
              <h1>{ APP_TITLE }</h1>
              <p class="tagline">{ APP_TAGLINE }</p>
          </header>

          <main class="content">
              <div class="toolbar">
                  <h2>{ "My Tasks" }</h2>
                  <FilterBar
                      active={board.active_filter()}
                      counts={counts}
                      on_select={on_filter}
                  />
              </div>

              {
                  if let Some(message) = banner_error {
                      html! {
                          <div class="error-banner" role="alert">
                              <span>{ message }</span>
                              <button class="btn" onclick={on_dismiss_error}>{ "Dismiss" }</button>
                          </div>
                      }
                  } else {
                      html! {}
                  }
              }

              <div class="actions add-row">
                  <button class="btn ok" onclick={on_add_click}>{ "+ Add Task" }</button>
              </div>

              <TaskGrid
                  tasks={visible}
                  on_toggle={on_toggle}
                  on_edit={on_edit}
                  on_delete={on_delete}
              />
          </main>

          {
              if board.editor_open() {
                  html! {
                      <TaskForm
                          key={form_key}
                          target={editing_target}
                          error={form_error}
                          on_save={on_save}
                          on_cancel={on_cancel}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}

// The board is replaced wholesale so yew sees a new state value.
fn update_board(
  board: &UseStateHandle<TaskBoard>,
  apply: impl FnOnce(&mut TaskBoard)
) {
  let mut next = (**board).clone();
  apply(&mut next);
  board.set(next);
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
