//! Core contracts and helpers for PitchOrder.
//!
//! This crate defines the event/partner/team model, draw result records,
//! consistency checks, and the id/clock capabilities shared by the draw
//! engine and the CLI.

pub mod error;
pub mod event;
pub mod history;
pub mod ids;
pub mod model;
pub mod validation;

pub use error::{Error, Result};
pub use event::{Event, TeamUpdate};
pub use history::ResultHistory;
pub use ids::{Clock, IdGenerator, SystemClock, UuidIdGenerator, short_id};
pub use model::{FeasibilityResult, LotteryResult, Partner, PartnerGroup, Team, Violation};
pub use validation::{
    IssueSeverity, ValidationIssue, ValidationReport, event_name_taken, normalize_name,
    partner_name_taken, team_name_taken, validate_event,
};

