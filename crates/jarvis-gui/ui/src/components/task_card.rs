use jarvis_shared::Task;
use jarvis_shared::present::{
  CARD_DESCRIPTION_CHARS,
  category_tone,
  priority_tone,
  truncate_description
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:      Task,
  pub on_toggle: Callback<u64>,
  pub on_view:   Callback<Task>,
  pub on_edit:   Callback<Task>,
  pub on_delete: Callback<u64>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let task = &props.task;
  let id = task.id;
  let completed = task.completed;

  let on_toggle =
    props.on_toggle.clone();
  let on_view = {
    let on_view = props.on_view.clone();
    let task = task.clone();
    move |_: web_sys::MouseEvent| {
      on_view.emit(task.clone());
    }
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    let task = task.clone();
    move |_: web_sys::MouseEvent| {
      on_edit.emit(task.clone());
    }
  };
  let on_delete =
    props.on_delete.clone();

  html! {
      <div class={classes!("card", completed.then_some("done"))}>
          <div class="card-head">
              <h3 class={classes!("card-title", completed.then_some("struck"))}>{ &task.name }</h3>
              <div class="badges">
                  <span class={classes!("badge", "priority", priority_tone(task.priority))}>
                      { task.priority.label() }
                  </span>
                  <span class={classes!("badge", "category", category_tone(task.category))}>
                      { task.category.label() }
                  </span>
              </div>
          </div>
          <p class="task-subtitle">
              { truncate_description(&task.description, CARD_DESCRIPTION_CHARS) }
          </p>
          <div class="card-foot">
              <label class="check">
                  <input
                      type="checkbox"
                      checked={completed}
                      onchange={move |_| on_toggle.emit(id)}
                  />
                  <span>{ "Completed" }</span>
              </label>
              <div class="actions">
                  <button class="btn" onclick={on_view}>{ "View" }</button>
                  <button class="btn" onclick={on_edit}>{ "Edit" }</button>
                  <button class="btn danger" onclick={move |_| on_delete.emit(id)}>{ "Delete" }</button>
              </div>
          </div>
      </div>
  }
}
