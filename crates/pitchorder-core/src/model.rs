use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization sponsoring one or more teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Partner {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
        }
    }
}

/// A unit to be ordered. Belongs to exactly one partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub partner_id: String,
    /// Case (topic) the team presents, when named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        partner_id: impl Into<String>,
        case_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            partner_id: partner_id.into(),
            case_name,
            created_at,
        }
    }
}

/// Adjacent same-partner pair, reported for the second team of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Index of the later team in the sequence (always >= 1).
    pub position: usize,
    pub team_id: String,
    pub partner_id: String,
    pub message: String,
}

/// Outcome of a feasibility check. Derived data, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityResult {
    pub can_generate: bool,
    pub violations: Vec<String>,
    pub max_partner_count: usize,
    pub total_teams: usize,
}

/// One draw, stored in the event's result history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryResult {
    pub id: String,
    pub event_id: String,
    pub sequence: Vec<Team>,
    pub created_at: DateTime<Utc>,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
}

impl LotteryResult {
    /// Violations as a slice, empty when the result is valid.
    pub fn violations(&self) -> &[Violation] {
        self.violations.as_deref().unwrap_or(&[])
    }
}

/// Teams of a single partner, as shown in an event overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerGroup<'a> {
    pub partner: &'a Partner,
    pub teams: Vec<&'a Team>,
}

impl PartnerGroup<'_> {
    pub fn count(&self) -> usize {
        self.teams.len()
    }
}
