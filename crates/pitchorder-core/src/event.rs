use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{Clock, IdGenerator};
use crate::model::{Partner, PartnerGroup, Team};
use crate::validation::{partner_name_taken, team_name_taken};

/// A presentation event: its partners, their teams, and bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub teams: Vec<Team>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a team that can be edited after creation.
#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub partner_id: Option<String>,
    /// `Some(None)` clears the case name.
    pub case_name: Option<Option<String>>,
}

impl Event {
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            partners: Vec::new(),
            teams: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an event with a fresh id and a trimmed, non-empty name.
    pub fn create(name: &str, ids: &impl IdGenerator, clock: &impl Clock) -> Result<Self> {
        let name = required_name("event", name)?;
        Ok(Self::new(ids.next_id(), name, clock.now()))
    }

    pub fn partner(&self, id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Add a partner. Names are trimmed and must be unique (case-insensitive).
    pub fn add_partner(
        &mut self,
        name: &str,
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> Result<Partner> {
        let name = required_name("partner", name)?;
        if partner_name_taken(&self.partners, &name) {
            return Err(Error::DuplicateName {
                kind: "partner",
                name,
            });
        }

        let now = clock.now();
        let partner = Partner::new(ids.next_id(), name, now);
        self.partners.push(partner.clone());
        self.updated_at = now;
        Ok(partner)
    }

    /// Add every name not yet used by a partner, skipping blanks and repeats.
    /// Returns the partners that were added.
    pub fn add_missing_partners<S: AsRef<str>>(
        &mut self,
        names: &[S],
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> Vec<Partner> {
        let mut added = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() || partner_name_taken(&self.partners, name) {
                continue;
            }
            if let Ok(partner) = self.add_partner(name, ids, clock) {
                added.push(partner);
            }
        }
        added
    }

    /// Remove a partner together with all of its teams. Returns the removed teams.
    pub fn remove_partner(&mut self, partner_id: &str, clock: &impl Clock) -> Result<Vec<Team>> {
        let before = self.partners.len();
        self.partners.retain(|p| p.id != partner_id);
        if self.partners.len() == before {
            return Err(Error::UnknownPartner(partner_id.to_string()));
        }

        let (removed, kept): (Vec<Team>, Vec<Team>) = std::mem::take(&mut self.teams)
            .into_iter()
            .partition(|t| t.partner_id == partner_id);
        self.teams = kept;
        self.updated_at = clock.now();
        Ok(removed)
    }

    /// Add a team for an existing partner. Names are trimmed and must be unique.
    pub fn add_team(
        &mut self,
        name: &str,
        partner_id: &str,
        case_name: Option<&str>,
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> Result<Team> {
        let name = required_name("team", name)?;
        if team_name_taken(&self.teams, &name, None) {
            return Err(Error::DuplicateName { kind: "team", name });
        }
        if self.partner(partner_id).is_none() {
            return Err(Error::UnknownPartner(partner_id.to_string()));
        }

        let now = clock.now();
        let team = Team::new(
            ids.next_id(),
            name,
            partner_id,
            optional_name(case_name),
            now,
        );
        self.teams.push(team.clone());
        self.updated_at = now;
        Ok(team)
    }

    /// Apply an edit to an existing team, with the same checks as `add_team`.
    pub fn update_team(
        &mut self,
        team_id: &str,
        update: TeamUpdate,
        clock: &impl Clock,
    ) -> Result<Team> {
        let name = match update.name.as_deref() {
            Some(name) => {
                let name = required_name("team", name)?;
                if team_name_taken(&self.teams, &name, Some(team_id)) {
                    return Err(Error::DuplicateName { kind: "team", name });
                }
                Some(name)
            }
            None => None,
        };
        if let Some(partner_id) = update.partner_id.as_deref() {
            if self.partner(partner_id).is_none() {
                return Err(Error::UnknownPartner(partner_id.to_string()));
            }
        }

        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| Error::UnknownTeam(team_id.to_string()))?;
        if let Some(name) = name {
            team.name = name;
        }
        if let Some(partner_id) = update.partner_id {
            team.partner_id = partner_id;
        }
        if let Some(case_name) = update.case_name {
            team.case_name = optional_name(case_name.as_deref());
        }
        let team = team.clone();
        self.updated_at = clock.now();
        Ok(team)
    }

    pub fn remove_team(&mut self, team_id: &str, clock: &impl Clock) -> Result<Team> {
        let index = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or_else(|| Error::UnknownTeam(team_id.to_string()))?;
        let team = self.teams.remove(index);
        self.updated_at = clock.now();
        Ok(team)
    }

    /// Teams grouped by partner in partner order. Partners without teams are omitted,
    /// as are teams whose partner is missing.
    pub fn partner_groups(&self) -> Vec<PartnerGroup<'_>> {
        let mut by_partner: HashMap<&str, Vec<&Team>> = HashMap::new();
        for team in &self.teams {
            by_partner
                .entry(team.partner_id.as_str())
                .or_default()
                .push(team);
        }

        self.partners
            .iter()
            .filter_map(|partner| {
                by_partner
                    .remove(partner.id.as_str())
                    .map(|teams| PartnerGroup { partner, teams })
            })
            .collect()
    }

    /// Number of teams that name a case.
    pub fn cases_count(&self) -> usize {
        self.teams.iter().filter(|t| t.case_name.is_some()).count()
    }
}

fn required_name(kind: &'static str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyName { kind });
    }
    Ok(trimmed.to_string())
}

fn optional_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::TimeZone;

    use super::*;

    struct SeqIds(Cell<u32>);

    impl IdGenerator for SeqIds {
        fn next_id(&self) -> String {
            let next = self.0.get() + 1;
            self.0.set(next);
            format!("id{next}")
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        }
    }

    fn ids() -> SeqIds {
        SeqIds(Cell::new(0))
    }

    #[test]
    fn add_partner_rejects_duplicates_and_blanks() {
        let ids = ids();
        let mut event = Event::create("Finals", &ids, &FixedClock).expect("event");
        event.add_partner(" Alpha ", &ids, &FixedClock).expect("partner");

        assert_eq!(event.partners[0].name, "Alpha");
        assert!(matches!(
            event.add_partner("ALPHA", &ids, &FixedClock),
            Err(Error::DuplicateName { kind: "partner", .. })
        ));
        assert!(matches!(
            event.add_partner("   ", &ids, &FixedClock),
            Err(Error::EmptyName { kind: "partner" })
        ));
    }

    #[test]
    fn missing_partners_are_added_once() {
        let ids = ids();
        let mut event = Event::create("Finals", &ids, &FixedClock).expect("event");
        event.add_partner("Alpha", &ids, &FixedClock).expect("partner");

        let added = event.add_missing_partners(
            &["alpha", " Beta ", "", "Gamma", "BETA"],
            &ids,
            &FixedClock,
        );
        let names: Vec<&str> = added.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Gamma"]);
        assert_eq!(event.partners.len(), 3);

        let again = event.add_missing_partners(&["Gamma"], &ids, &FixedClock);
        assert!(again.is_empty());
    }

    #[test]
    fn add_team_requires_known_partner() {
        let ids = ids();
        let mut event = Event::create("Finals", &ids, &FixedClock).expect("event");
        let err = event
            .add_team("Rockets", "nope", None, &ids, &FixedClock)
            .expect_err("unknown partner");
        assert!(matches!(err, Error::UnknownPartner(_)));
    }

    #[test]
    fn blank_case_name_is_dropped() {
        let ids = ids();
        let mut event = Event::create("Finals", &ids, &FixedClock).expect("event");
        let partner = event.add_partner("Alpha", &ids, &FixedClock).expect("partner");
        let team = event
            .add_team("Rockets", &partner.id, Some("  "), &ids, &FixedClock)
            .expect("team");
        assert_eq!(team.case_name, None);
        assert_eq!(event.cases_count(), 0);
    }

    #[test]
    fn remove_partner_cascades_to_teams() {
        let ids = ids();
        let mut event = Event::create("Finals", &ids, &FixedClock).expect("event");
        let alpha = event.add_partner("Alpha", &ids, &FixedClock).expect("alpha");
        let beta = event.add_partner("Beta", &ids, &FixedClock).expect("beta");
        event
            .add_team("A1", &alpha.id, None, &ids, &FixedClock)
            .expect("a1");
        event
            .add_team("B1", &beta.id, Some("Payments"), &ids, &FixedClock)
            .expect("b1");
        event
            .add_team("A2", &alpha.id, None, &ids, &FixedClock)
            .expect("a2");

        let removed = event.remove_partner(&alpha.id, &FixedClock).expect("remove");
        assert_eq!(removed.len(), 2);
        assert_eq!(event.teams.len(), 1);
        assert_eq!(event.teams[0].name, "B1");
        assert!(event.remove_partner(&alpha.id, &FixedClock).is_err());
    }

    #[test]
    fn update_team_checks_names_against_others() {
        let ids = ids();
        let mut event = Event::create("Finals", &ids, &FixedClock).expect("event");
        let alpha = event.add_partner("Alpha", &ids, &FixedClock).expect("alpha");
        let a1 = event
            .add_team("A1", &alpha.id, None, &ids, &FixedClock)
            .expect("a1");
        event
            .add_team("A2", &alpha.id, None, &ids, &FixedClock)
            .expect("a2");

        let renamed = event
            .update_team(
                &a1.id,
                TeamUpdate {
                    name: Some("a1".to_string()),
                    case_name: Some(Some("Risk".to_string())),
                    ..TeamUpdate::default()
                },
                &FixedClock,
            )
            .expect("rename to itself");
        assert_eq!(renamed.name, "a1");
        assert_eq!(renamed.case_name.as_deref(), Some("Risk"));

        let clash = event.update_team(
            &a1.id,
            TeamUpdate {
                name: Some("A2".to_string()),
                ..TeamUpdate::default()
            },
            &FixedClock,
        );
        assert!(matches!(clash, Err(Error::DuplicateName { .. })));
    }

    #[test]
    fn partner_groups_skip_empty_partners() {
        let ids = ids();
        let mut event = Event::create("Finals", &ids, &FixedClock).expect("event");
        let alpha = event.add_partner("Alpha", &ids, &FixedClock).expect("alpha");
        event.add_partner("Beta", &ids, &FixedClock).expect("beta");
        event
            .add_team("A1", &alpha.id, None, &ids, &FixedClock)
            .expect("a1");

        let groups = event.partner_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].partner.name, "Alpha");
        assert_eq!(groups[0].count(), 1);
    }
}
