use serde::{Deserialize, Serialize};

use pitchorder_core::Team;

/// Default number of randomized attempts before the deterministic fallback.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Options for the draw engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Maximum randomized attempts. Zero goes straight to the fallback.
    pub max_attempts: u32,
    /// Seed for reproducible draws. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

/// How a sequence was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceOutcome {
    pub sequence: Vec<Team>,
    /// Randomized attempts consumed (1-based index of the winning attempt).
    pub attempts: u32,
    pub used_fallback: bool,
}

/// Per-partner share of the teams in a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerShare {
    pub partner_id: String,
    pub partner_name: String,
    pub count: usize,
    pub over_limit: bool,
}

/// Summary of a draw run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReport {
    pub result_id: String,
    pub event_id: String,
    pub total_teams: usize,
    pub attempts: u32,
    pub used_fallback: bool,
    pub violations: usize,
    pub seed: Option<u64>,
    pub duration_ms: u64,
}
