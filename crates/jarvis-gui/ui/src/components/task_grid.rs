use jarvis_shared::Task;
use jarvis_shared::present::EMPTY_LIST_MESSAGE;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_state
};

use super::{
  TaskCard,
  TaskDetail
};

#[derive(Properties, PartialEq)]
pub struct TaskGridProps {
  pub tasks:     Vec<Task>,
  pub on_toggle: Callback<u64>,
  pub on_edit:   Callback<Task>,
  pub on_delete: Callback<u64>
}

#[function_component(TaskGrid)]
pub fn task_grid(
  props: &TaskGridProps
) -> Html {
  // Which card's detail overlay is open. Local to this component.
  let selected =
    use_state(|| None::<Task>);

  let on_view = {
    let selected = selected.clone();
    Callback::from(move |task: Task| {
      selected.set(Some(task));
    })
  };
  let on_close = {
    let selected = selected.clone();
    Callback::from(move |()| {
      selected.set(None);
    })
  };

  html! {
      <>
          <div class="grid">
              {
                  if props.tasks.is_empty() {
                      html! { <p class="empty">{ EMPTY_LIST_MESSAGE }</p> }
                  } else {
                      props.tasks.iter().cloned().map(|task| html! {
                          <TaskCard
                              key={task.id.to_string()}
                              task={task.clone()}
                              on_toggle={props.on_toggle.clone()}
                              on_view={on_view.clone()}
                              on_edit={props.on_edit.clone()}
                              on_delete={props.on_delete.clone()}
                          />
                      }).collect::<Html>()
                  }
              }
          </div>
          {
              if let Some(task) = (*selected).clone() {
                  html! { <TaskDetail task={task} on_close={on_close} /> }
              } else {
                  html! {}
              }
          }
      </>
  }
}
