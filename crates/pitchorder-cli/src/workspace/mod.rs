mod atomic;
mod data;
mod paths;
mod settings;
mod store;

pub use data::{
    delete_event, load_current_event_id, load_events, load_history, save_current_event_id,
    save_events, save_history,
};
pub use paths::WorkspacePaths;
pub use settings::{WorkspaceSettings, load_or_create_settings};
pub use store::{JsonFileStore, Store};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("invalid workspace state: {0}")]
    Invalid(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
