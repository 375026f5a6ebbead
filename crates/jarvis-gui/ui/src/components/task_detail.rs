use jarvis_shared::Task;
use jarvis_shared::present::{
  category_tone,
  priority_tone
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
pub struct TaskDetailProps {
  pub task:     Task,
  pub on_close: Callback<()>
}

/// Read-only overlay; it has no mutation path of its own.
#[function_component(TaskDetail)]
pub fn task_detail(
  props: &TaskDetailProps
) -> Html {
  let task = &props.task;
  let on_close = props.on_close.clone();

  html! {
      <div class="overlay">
          <div class="panel detail">
              <div class="header">{ &task.name }</div>
              <div class="details">
                  <div class="badges">
                      <span class={classes!("badge", "priority", priority_tone(task.priority))}>
                          { task.priority.label() }
                      </span>
                      <span class={classes!("badge", "category", category_tone(task.category))}>
                          { task.category.label() }
                      </span>
                  </div>
                  <div class="kv">
                      <strong>{ "start" }</strong>
                      <div>{ task.start_date.to_string() }</div>
                  </div>
                  <div class="kv">
                      <strong>{ "end" }</strong>
                      <div>{ task.end_date.to_string() }</div>
                  </div>
                  <div class="kv">
                      <strong>{ "status" }</strong>
                      <div>{ if task.completed { "Completed" } else { "Pending" } }</div>
                  </div>
                  <p class="description">{ &task.description }</p>
                  <div class="actions">
                      <button class="btn" onclick={move |_| on_close.emit(())}>{ "Close" }</button>
                  </div>
              </div>
          </div>
      </div>
  }
}
