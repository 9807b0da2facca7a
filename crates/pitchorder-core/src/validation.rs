use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::event::Event;
use crate::model::{Partner, Team};

/// Severity level for consistency issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured consistency issue with an optional hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        severity: IssueSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            hint,
        }
    }
}

/// Aggregated report with errors and warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.errors.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }
}

/// Check internal consistency of an event.
///
/// This checks:
/// - duplicate partner/team ids
/// - blank and duplicate names (case-insensitive)
/// - teams referencing partners missing from the event
pub fn validate_event(event: &Event) -> ValidationReport {
    let mut report = ValidationReport::default();

    if normalize_name(&event.name).is_empty() {
        report.push(ValidationIssue::new(
            IssueSeverity::Error,
            "event_name_empty",
            format!("event '{}' has an empty name", event.id),
            None,
        ));
    }

    let mut partner_ids = HashSet::new();
    let mut partner_names = BTreeSet::new();
    for partner in &event.partners {
        if !partner_ids.insert(partner.id.as_str()) {
            report.push(ValidationIssue::new(
                IssueSeverity::Error,
                "partner_id_duplicate",
                format!("duplicate partner id: {}", partner.id),
                None,
            ));
        }
        check_name(
            &mut report,
            &mut partner_names,
            "partner",
            &partner.id,
            &partner.name,
        );
    }

    let mut team_ids = HashSet::new();
    let mut team_names = BTreeSet::new();
    for team in &event.teams {
        if !team_ids.insert(team.id.as_str()) {
            report.push(ValidationIssue::new(
                IssueSeverity::Error,
                "team_id_duplicate",
                format!("duplicate team id: {}", team.id),
                None,
            ));
        }
        check_name(&mut report, &mut team_names, "team", &team.id, &team.name);

        if !partner_ids.contains(team.partner_id.as_str()) {
            report.push(ValidationIssue::new(
                IssueSeverity::Warning,
                "team_partner_missing",
                format!(
                    "team '{}' references unknown partner '{}'",
                    team.name, team.partner_id
                ),
                Some("assign the team to an existing partner".to_string()),
            ));
        }
    }

    report
}

fn check_name(
    report: &mut ValidationReport,
    seen: &mut BTreeSet<String>,
    kind: &str,
    id: &str,
    name: &str,
) {
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        report.push(ValidationIssue::new(
            IssueSeverity::Error,
            format!("{kind}_name_empty"),
            format!("{kind} '{id}' has an empty name"),
            None,
        ));
    } else if !seen.insert(normalized) {
        report.push(ValidationIssue::new(
            IssueSeverity::Error,
            format!("{kind}_name_duplicate"),
            format!("duplicate {kind} name: {}", name.trim()),
            Some(format!("rename one of the {kind}s")),
        ));
    }
}

/// Trimmed, lowercased form used for name comparisons.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether `name` is already used by a partner.
pub fn partner_name_taken(partners: &[Partner], name: &str) -> bool {
    let name = normalize_name(name);
    partners.iter().any(|p| normalize_name(&p.name) == name)
}

/// Whether `name` is already used by a team other than `except_id`.
pub fn team_name_taken(teams: &[Team], name: &str, except_id: Option<&str>) -> bool {
    let name = normalize_name(name);
    teams
        .iter()
        .filter(|t| Some(t.id.as_str()) != except_id)
        .any(|t| normalize_name(&t.name) == name)
}

/// Whether `name` is already used by an event.
pub fn event_name_taken(events: &[Event], name: &str) -> bool {
    let name = normalize_name(name);
    events.iter().any(|e| normalize_name(&e.name) == name)
}
