use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use jarvis_shared::KeyValueStore;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Key-value slots as `<data_dir>/<key>.json` files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    pub data_dir: PathBuf,
}

impl FileStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        info!(data_dir = %data_dir.display(), "opened file store");
        Ok(Self { data_dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.data_dir.join(format!("{file_stem}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        debug!(file = %path.display(), "reading slot");
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed reading {}", path.display())),
        }
    }

    // Write to a sibling temp file and rename over the slot, so a reader sees
    // either the old value or the new one.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        debug!(file = %path.display(), bytes = value.len(), "writing slot atomically");

        let mut temp = NamedTempFile::new_in(&self.data_dir)
            .with_context(|| format!("failed to create temp file in {}", self.data_dir.display()))?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)
            .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_slot_reads_as_none_then_round_trips() {
        let dir = tempdir().expect("tempdir");
        let mut store = FileStore::open(dir.path()).expect("open");
        assert_eq!(store.get("tasks").expect("get"), None);

        store.set("tasks", "[]").expect("set");
        assert_eq!(store.get("tasks").expect("get").as_deref(), Some("[]"));
        assert!(dir.path().join("tasks.json").is_file());
    }

    #[test]
    fn keys_map_to_safe_file_names() {
        let store = FileStore {
            data_dir: PathBuf::from("/data"),
        };
        assert_eq!(
            store.path_for("../work tasks"),
            PathBuf::from("/data/.._work_tasks.json")
        );
        assert_eq!(store.path_for("jarvis.tasks"), PathBuf::from("/data/jarvis.tasks.json"));
    }

    #[test]
    fn open_creates_missing_directories() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("a/b");
        FileStore::open(&nested).expect("open");
        assert!(nested.is_dir());
    }
}
