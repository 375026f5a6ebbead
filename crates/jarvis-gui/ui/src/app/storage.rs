use anyhow::anyhow;
use jarvis_shared::KeyValueStore;

/// The browser's `window.localStorage`, looked up on every access.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct LocalStore;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  let window = web_sys::window()
    .ok_or_else(|| {
      anyhow!("no browser window")
    })?;
  window
    .local_storage()
    .map_err(|error| {
      anyhow!(
        "localStorage unavailable: \
         {error:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!(
        "localStorage is disabled"
      )
    })
}

impl KeyValueStore for LocalStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|error| {
        anyhow!(
          "failed reading {key} from \
           localStorage: {error:?}"
        )
      })
  }

  // Quota exhaustion surfaces here as a thrown DOMException.
  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|error| {
        anyhow!(
          "failed writing {key} to \
           localStorage: {error:?}"
        )
      })
  }
}
