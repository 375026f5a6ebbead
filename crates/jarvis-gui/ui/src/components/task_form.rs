use jarvis_shared::editor::{
  format_date_input,
  parse_date_input
};
use jarvis_shared::{
  Category,
  DraftField,
  EditorForm,
  Priority,
  Task,
  TaskFields
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  UseStateHandle,
  function_component,
  html,
  use_state
};

use crate::app::ui_debug;

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub target:    Option<Task>,
  pub error:     Option<String>,
  pub on_save:   Callback<TaskFields>,
  pub on_cancel: Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let form = use_state(|| {
    EditorForm::from_target(
      props.target.as_ref()
    )
  });
  let invalid =
    use_state(|| None::<String>);

  let on_name = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        apply(
          &form,
          DraftField::Name(input.value())
        );
      }
    )
  };

  let on_description = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        apply(
          &form,
          DraftField::Description(
            input.value()
          )
        );
      }
    )
  };

  let on_start = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        apply(
          &form,
          DraftField::StartDate(
            parse_date_input(
              &input.value()
            )
          )
        );
      }
    )
  };

  let on_end = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        apply(
          &form,
          DraftField::EndDate(
            parse_date_input(
              &input.value()
            )
          )
        );
      }
    )
  };

  let on_priority = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        apply(
          &form,
          DraftField::Priority(
            parse_priority_select(
              &select.value()
            )
          )
        );
      }
    )
  };

  let on_category = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        apply(
          &form,
          DraftField::Category(
            parse_category_select(
              &select.value()
            )
          )
        );
      }
    )
  };

  let on_submit = {
    let form = form.clone();
    let invalid = invalid.clone();
    let on_save =
      props.on_save.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        match form.submit() {
          | Ok(values) => {
            invalid.set(None);
            on_save.emit(values);
          }
          | Err(missing) => {
            ui_debug(
              "form.submit.invalid",
              missing.label()
            );
            invalid
              .set(Some(missing.to_string()));
          }
        }
      }
    )
  };

  let on_cancel = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(move |_| {
      on_cancel.emit(());
    })
  };

  let draft = &form.draft;
  let message = (*invalid)
    .clone()
    .or_else(|| props.error.clone());

  html! {
      <div class="overlay">
          <form class="panel form" onsubmit={on_submit}>
              <div class="header">{ form.title() }</div>

              <label class="field">
                  <span>{ "Task Name" }</span>
                  <input
                      type="text"
                      required=true
                      value={draft.name.clone()}
                      oninput={on_name}
                  />
              </label>

              <label class="field">
                  <span>{ "Description" }</span>
                  <textarea
                      required=true
                      rows="4"
                      value={draft.description.clone()}
                      oninput={on_description}
                  />
              </label>

              <div class="field-row">
                  <label class="field">
                      <span>{ "Start date" }</span>
                      <input
                          type="date"
                          required=true
                          value={format_date_input(draft.start_date)}
                          onchange={on_start}
                      />
                  </label>
                  <label class="field">
                      <span>{ "End date" }</span>
                      <input
                          type="date"
                          required=true
                          value={format_date_input(draft.end_date)}
                          onchange={on_end}
                      />
                  </label>
              </div>

              <div class="field-row">
                  <label class="field">
                      <span>{ "Priority" }</span>
                      <select required=true onchange={on_priority}>
                          <option value="" selected={draft.priority.is_none()}>
                              { "Select priority" }
                          </option>
                          {
                              for Priority::ALL.into_iter().map(|priority| html! {
                                  <option
                                      value={priority.label()}
                                      selected={draft.priority == Some(priority)}
                                  >
                                      { priority.label() }
                                  </option>
                              })
                          }
                      </select>
                  </label>
                  <label class="field">
                      <span>{ "Category" }</span>
                      <select required=true onchange={on_category}>
                          <option value="" selected={draft.category.is_none()}>
                              { "Select category" }
                          </option>
                          {
                              for Category::ALL.into_iter().map(|category| html! {
                                  <option
                                      value={category.label()}
                                      selected={draft.category == Some(category)}
                                  >
                                      { category.label() }
                                  </option>
                              })
                          }
                      </select>
                  </label>
              </div>

              {
                  if let Some(message) = message {
                      html! { <div class="form-error" role="alert">{ message }</div> }
                  } else {
                      html! {}
                  }
              }

              <div class="actions">
                  <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="btn ok" disabled={!form.is_complete()}>
                      { "Save Task" }
                  </button>
              </div>
          </form>
      </div>
  }
}

fn apply(
  form: &UseStateHandle<EditorForm>,
  change: DraftField
) {
  let mut next = (**form).clone();
  next.set(change);
  form.set(next);
}

// "" is the placeholder option.
fn parse_priority_select(
  value: &str
) -> Option<Priority> {
  if value.is_empty() {
    return None;
  }
  value.parse().ok()
}

fn parse_category_select(
  value: &str
) -> Option<Category> {
  if value.is_empty() {
    return None;
  }
  value.parse().ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn placeholder_selects_nothing() {
    assert_eq!(
      parse_priority_select(""),
      None
    );
    assert_eq!(
      parse_category_select(""),
      None
    );
  }

  #[test]
  fn option_labels_parse_back() {
    for priority in Priority::ALL {
      assert_eq!(
        parse_priority_select(
          priority.label()
        ),
        Some(priority)
      );
    }
    for category in Category::ALL {
      assert_eq!(
        parse_category_select(
          category.label()
        ),
        Some(category)
      );
    }
  }
}
