use pitchorder_core::{Team, Violation};

/// Report every adjacent pair of teams sharing a partner.
///
/// Each violation points at the later team of the pair, so positions start at 1.
pub fn detect_violations(sequence: &[Team]) -> Vec<Violation> {
    sequence
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].partner_id == pair[1].partner_id)
        .map(|(index, pair)| Violation {
            position: index + 1,
            team_id: pair[1].id.clone(),
            partner_id: pair[1].partner_id.clone(),
            message: format!(
                "team \"{}\" follows team \"{}\" of the same partner",
                pair[1].name, pair[0].name
            ),
        })
        .collect()
}

/// True when no two adjacent teams share a partner.
pub fn is_valid_sequence(sequence: &[Team]) -> bool {
    sequence
        .windows(2)
        .all(|pair| pair[0].partner_id != pair[1].partner_id)
}
