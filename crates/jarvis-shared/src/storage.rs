use std::collections::BTreeMap;

use anyhow::bail;

/// Synchronous get/set by key, the shape of the browser's `localStorage`.
///
/// A `set` either replaces the whole value or fails; readers never observe a
/// partially written value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// In-process store. An optional quota (bytes per value) makes `set` fail the
/// way an exhausted `localStorage` does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slots = BTreeMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots, quota: None }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if let Some(quota) = self.quota
            && value.len() > quota
        {
            bail!(
                "quota exceeded writing {key}: {} bytes over a {quota} byte limit",
                value.len()
            );
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
