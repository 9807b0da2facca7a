use thiserror::Error;

/// Core error type shared across PitchOrder crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A name was blank after trimming.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },
    /// Another entity of the same kind already uses this name.
    #[error("{kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },
    /// Referenced partner does not exist in the event.
    #[error("unknown partner: {0}")]
    UnknownPartner(String),
    /// Referenced team does not exist in the event.
    #[error("unknown team: {0}")]
    UnknownTeam(String),
}

/// Convenience alias for results returned by PitchOrder crates.
pub type Result<T> = std::result::Result<T, Error>;
