//! Constrained draw engine for PitchOrder.
//!
//! Orders teams so that no two consecutive teams share a partner: a
//! feasibility gate, randomized construction with a deterministic fallback,
//! violation detection and result assembly.

pub mod assemble;
pub mod engine;
pub mod errors;
pub mod feasibility;
mod groups;
pub mod model;
pub mod output;
pub mod sequence;
pub mod shuffle;
pub mod violations;

pub use assemble::assemble_result;
pub use engine::{DrawEngine, DrawOutcome};
pub use errors::DrawError;
pub use feasibility::{
    NO_TEAMS_MESSAGE, max_allowed_per_partner, partner_distribution, validate_feasibility,
};
pub use model::{DEFAULT_MAX_ATTEMPTS, DrawOptions, DrawReport, PartnerShare, SequenceOutcome};
pub use output::write_sequence_csv;
pub use sequence::{
    deterministic_sequence, generate_sequence, generate_sequence_with_stats, randomized_attempt,
};
pub use shuffle::shuffle;
pub use violations::{detect_violations, is_valid_sequence};
