use pitchorder_core::{FeasibilityResult, Partner, Team};

use crate::groups::{PartnerIndex, partition_by_partner};
use crate::model::PartnerShare;

/// Message reported when there is nothing to draw.
pub const NO_TEAMS_MESSAGE: &str = "no teams to draw";

/// Largest team count a single partner may have among `total_teams`.
pub fn max_allowed_per_partner(total_teams: usize) -> usize {
    total_teams.div_ceil(2)
}

/// Decide whether an ordering without adjacent same-partner teams can exist.
///
/// A valid ordering exists iff no partner owns more than `ceil(N / 2)` teams.
/// Offending partners are reported in order of first appearance; a partner
/// missing from `partners` is named by its id.
pub fn validate_feasibility(teams: &[Team], partners: &[Partner]) -> FeasibilityResult {
    if teams.is_empty() {
        return FeasibilityResult {
            can_generate: false,
            violations: vec![NO_TEAMS_MESSAGE.to_string()],
            max_partner_count: 0,
            total_teams: 0,
        };
    }

    let total_teams = teams.len();
    let max_allowed = max_allowed_per_partner(total_teams);
    let index = PartnerIndex::new(partners);
    let mut violations = Vec::new();
    let mut max_partner_count = 0;

    for bucket in partition_by_partner(teams) {
        let count = bucket.teams.len();
        max_partner_count = max_partner_count.max(count);

        if count > max_allowed {
            let name = index
                .name(bucket.partner_id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("partner {}", bucket.partner_id));
            violations.push(format!(
                "cannot build an order: partner \"{name}\" has too many teams ({count} of {total_teams}). Maximum allowed: {max_allowed}."
            ));
        }
    }

    FeasibilityResult {
        can_generate: violations.is_empty(),
        violations,
        max_partner_count,
        total_teams,
    }
}

/// Team count per partner, flagged against the feasibility bound.
pub fn partner_distribution(teams: &[Team], partners: &[Partner]) -> Vec<PartnerShare> {
    let max_allowed = max_allowed_per_partner(teams.len());
    let index = PartnerIndex::new(partners);

    partition_by_partner(teams)
        .into_iter()
        .map(|bucket| PartnerShare {
            partner_id: bucket.partner_id.to_string(),
            partner_name: index
                .name(bucket.partner_id)
                .unwrap_or("unknown partner")
                .to_string(),
            count: bucket.teams.len(),
            over_limit: bucket.teams.len() > max_allowed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn team(id: &str, partner: &str) -> Team {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Team::new(id, id, partner, None, now)
    }

    #[test]
    fn bound_rounds_up() {
        assert_eq!(max_allowed_per_partner(0), 0);
        assert_eq!(max_allowed_per_partner(1), 1);
        assert_eq!(max_allowed_per_partner(4), 2);
        assert_eq!(max_allowed_per_partner(5), 3);
    }

    #[test]
    fn missing_partner_gets_synthetic_label() {
        let teams = vec![team("a1", "ghost"), team("a2", "ghost")];
        let result = validate_feasibility(&teams, &[]);
        assert!(!result.can_generate);
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].contains("partner ghost"));
    }

    #[test]
    fn distribution_flags_over_limit() {
        let teams = vec![team("a1", "a"), team("a2", "a"), team("a3", "a"), team("b1", "b")];
        let shares = partner_distribution(&teams, &[]);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].count, 3);
        assert!(shares[0].over_limit);
        assert_eq!(shares[0].partner_name, "unknown partner");
        assert!(!shares[1].over_limit);
    }
}
