pub mod draw;
pub mod event;
pub mod roster;

use std::path::PathBuf;

use pitchorder_core::{Event, SystemClock, UuidIdGenerator, normalize_name};

use crate::workspace::{
    JsonFileStore, WorkspacePaths, WorkspaceSettings, load_current_event_id, load_or_create_settings,
};
use crate::{CliError, EventSelector};

/// Everything a command needs: workspace layout, storage, settings, capabilities.
pub struct Context {
    pub paths: WorkspacePaths,
    pub store: JsonFileStore,
    pub settings: WorkspaceSettings,
    pub ids: UuidIdGenerator,
    pub clock: SystemClock,
}

impl Context {
    pub fn open(root: PathBuf) -> Result<Self, CliError> {
        let paths = WorkspacePaths::new(root);
        paths.ensure_dirs()?;
        let settings = load_or_create_settings(&paths)?;
        let store = JsonFileStore::new(paths.data_dir.clone());
        Ok(Self {
            paths,
            store,
            settings,
            ids: UuidIdGenerator,
            clock: SystemClock,
        })
    }

    /// Index of the event named by `--event`, or of the current event.
    pub fn selected_event(
        &self,
        selector: &EventSelector,
        events: &[Event],
    ) -> Result<usize, CliError> {
        let key = match selector.event.clone() {
            Some(key) => key,
            None => load_current_event_id(&self.store)?.ok_or_else(|| {
                CliError::InvalidConfig(
                    "no event selected; pass --event or run `pitchorder event use`".to_string(),
                )
            })?,
        };
        find_event(events, &key)
    }
}

pub fn find_event(events: &[Event], key: &str) -> Result<usize, CliError> {
    find_by_key(events, key, |e| &e.id, |e| &e.name)
        .ok_or_else(|| CliError::NotFound(format!("event '{key}'")))
}

/// Match by exact id, then by case-insensitive name, then by unique id prefix.
pub fn find_by_key<T>(
    items: &[T],
    key: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Option<usize> {
    if let Some(index) = items.iter().position(|item| id(item) == key) {
        return Some(index);
    }

    let normalized = normalize_name(key);
    if let Some(index) = items
        .iter()
        .position(|item| normalize_name(name(item)) == normalized)
    {
        return Some(index);
    }

    let mut prefixed = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !key.is_empty() && id(item).starts_with(key));
    match (prefixed.next(), prefixed.next()) {
        (Some((index, _)), None) => Some(index),
        _ => None,
    }
}
