use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::atomic::write_json_atomic;
use super::{WorkspaceError, WorkspaceResult};

/// Key-value persistence for workspace documents.
pub trait Store {
    fn load<T: DeserializeOwned>(&self, key: &str) -> WorkspaceResult<Option<T>>;
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> WorkspaceResult<()>;
    fn remove(&self, key: &str) -> WorkspaceResult<()>;
}

/// One pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> WorkspaceResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(WorkspaceError::Invalid(format!("invalid store key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Store for JsonFileStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> WorkspaceResult<Option<T>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&content)?))
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> WorkspaceResult<()> {
        let path = self.path_for(key)?;
        write_json_atomic(&path, value)
    }

    fn remove(&self, key: &str) -> WorkspaceResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn temp_store() -> (JsonFileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("pitchorder_store_{}", uuid::Uuid::new_v4()));
        (JsonFileStore::new(dir.clone()), dir)
    }

    #[test]
    fn save_then_load_returns_value() {
        let (store, dir) = temp_store();
        let mut value = BTreeMap::new();
        value.insert("answer".to_string(), 42_u32);

        store.save("numbers", &value).expect("save");
        let loaded: Option<BTreeMap<String, u32>> = store.load("numbers").expect("load");
        assert_eq!(loaded, Some(value));

        store.remove("numbers").expect("remove");
        store.remove("numbers").expect("remove twice");
        let missing: Option<BTreeMap<String, u32>> = store.load("numbers").expect("load");
        assert!(missing.is_none());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_path_like_keys() {
        let (store, _) = temp_store();
        let err = store.save("../escape", &1_u8).expect_err("invalid key");
        assert!(matches!(err, WorkspaceError::Invalid(_)));
    }
}
