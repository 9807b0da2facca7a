use std::collections::HashMap;

use pitchorder_core::{Partner, Team};

/// Teams of one partner, borrowed from the caller's team slice.
#[derive(Debug, Clone)]
pub(crate) struct PartnerBucket<'a> {
    pub partner_id: &'a str,
    pub teams: Vec<&'a Team>,
}

/// Group teams by partner, buckets in order of first appearance.
pub(crate) fn partition_by_partner(teams: &[Team]) -> Vec<PartnerBucket<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<PartnerBucket<'_>> = Vec::new();

    for team in teams {
        let partner_id = team.partner_id.as_str();
        match index.get(partner_id) {
            Some(&slot) => buckets[slot].teams.push(team),
            None => {
                index.insert(partner_id, buckets.len());
                buckets.push(PartnerBucket {
                    partner_id,
                    teams: vec![team],
                });
            }
        }
    }

    buckets
}

/// Read-only partner lookup by id, built once per call.
pub(crate) struct PartnerIndex<'a> {
    by_id: HashMap<&'a str, &'a Partner>,
}

impl<'a> PartnerIndex<'a> {
    pub fn new(partners: &'a [Partner]) -> Self {
        Self {
            by_id: partners.iter().map(|p| (p.id.as_str(), p)).collect(),
        }
    }

    pub fn name(&self, partner_id: &str) -> Option<&'a str> {
        self.by_id.get(partner_id).map(|p| p.name.as_str())
    }
}
