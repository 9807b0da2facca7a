use thiserror::Error;

/// Errors emitted by the draw engine.
#[derive(Debug, Error)]
pub enum DrawError {
    /// No ordering without adjacent same-partner teams can exist.
    /// Carries one message per offending partner group.
    #[error("draw is infeasible: {}", .violations.join("; "))]
    Infeasible { violations: Vec<String> },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl DrawError {
    /// Messages describing why the input cannot be drawn, if that is the failure.
    pub fn infeasibility(&self) -> Option<&[String]> {
        match self {
            DrawError::Infeasible { violations } => Some(violations),
            _ => None,
        }
    }
}
