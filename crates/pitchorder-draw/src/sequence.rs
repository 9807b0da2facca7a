use rand::Rng;
use tracing::debug;

use pitchorder_core::{Partner, Team};

use crate::errors::DrawError;
use crate::feasibility::validate_feasibility;
use crate::groups::partition_by_partner;
use crate::model::{DrawOptions, SequenceOutcome};
use crate::shuffle::{pick_index, shuffle};
use crate::violations::is_valid_sequence;

/// Produce an ordering of `teams` with no adjacent same-partner pair.
///
/// Refuses infeasible input with [`DrawError::Infeasible`] before doing any work.
pub fn generate_sequence<R: Rng + ?Sized>(
    teams: &[Team],
    partners: &[Partner],
    rng: &mut R,
    options: &DrawOptions,
) -> Result<Vec<Team>, DrawError> {
    generate_sequence_with_stats(teams, partners, rng, options).map(|outcome| outcome.sequence)
}

/// Same as [`generate_sequence`], also reporting how the sequence was found.
///
/// Runs up to `options.max_attempts` randomized constructions and returns the
/// first clean one; otherwise falls back to [`deterministic_sequence`].
pub fn generate_sequence_with_stats<R: Rng + ?Sized>(
    teams: &[Team],
    partners: &[Partner],
    rng: &mut R,
    options: &DrawOptions,
) -> Result<SequenceOutcome, DrawError> {
    let feasibility = validate_feasibility(teams, partners);
    if !feasibility.can_generate {
        return Err(DrawError::Infeasible {
            violations: feasibility.violations,
        });
    }

    if teams.len() == 1 {
        return Ok(SequenceOutcome {
            sequence: teams.to_vec(),
            attempts: 0,
            used_fallback: false,
        });
    }

    for attempt in 1..=options.max_attempts {
        let candidate = randomized_attempt(teams, rng);
        if is_valid_sequence(&candidate) {
            return Ok(SequenceOutcome {
                sequence: candidate,
                attempts: attempt,
                used_fallback: false,
            });
        }
    }

    debug!(
        teams = teams.len(),
        attempts = options.max_attempts,
        "randomized attempts exhausted, using fallback"
    );

    Ok(SequenceOutcome {
        sequence: deterministic_sequence(teams),
        attempts: options.max_attempts,
        used_fallback: true,
    })
}

/// One randomized construction. May contain violations.
///
/// Groups and their members are shuffled, then each step draws a random
/// partner other than the last placed one and pops a random team from it.
/// When only the last partner has teams left, it is used anyway.
pub fn randomized_attempt<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> Vec<Team> {
    let mut buckets = partition_by_partner(teams);
    for bucket in &mut buckets {
        shuffle(&mut bucket.teams, rng);
    }
    shuffle(&mut buckets, rng);

    let mut sequence = Vec::with_capacity(teams.len());
    let mut last_partner: Option<&str> = None;
    let mut candidates = Vec::with_capacity(buckets.len());

    while sequence.len() < teams.len() {
        candidates.clear();
        candidates.extend(
            buckets
                .iter()
                .enumerate()
                .filter(|(_, b)| !b.teams.is_empty() && Some(b.partner_id) != last_partner)
                .map(|(slot, _)| slot),
        );

        let slot = if candidates.is_empty() {
            match buckets.iter().position(|b| !b.teams.is_empty()) {
                Some(slot) => slot,
                None => break,
            }
        } else {
            candidates[pick_index(candidates.len(), rng)]
        };

        let bucket = &mut buckets[slot];
        let pick = pick_index(bucket.teams.len(), rng);
        let team = bucket.teams.swap_remove(pick);
        last_partner = Some(team.partner_id.as_str());
        sequence.push(team.clone());
    }

    sequence
}

/// Deterministic construction, valid whenever the feasibility bound holds.
///
/// Buckets are ordered by descending size (stable, so ties keep first
/// appearance order). Each step takes the next team, in input order, from the
/// bucket with the most remaining teams whose partner differs from the last
/// placed one.
pub fn deterministic_sequence(teams: &[Team]) -> Vec<Team> {
    let mut buckets = partition_by_partner(teams);
    buckets.sort_by(|a, b| b.teams.len().cmp(&a.teams.len()));
    let mut cursors = vec![0_usize; buckets.len()];

    let mut sequence = Vec::with_capacity(teams.len());
    let mut last_partner: Option<&str> = None;

    while sequence.len() < teams.len() {
        let mut best: Option<(usize, usize)> = None;
        for (slot, bucket) in buckets.iter().enumerate() {
            let remaining = bucket.teams.len() - cursors[slot];
            if remaining == 0 || Some(bucket.partner_id) == last_partner {
                continue;
            }
            if best.is_none_or(|(_, most)| remaining > most) {
                best = Some((slot, remaining));
            }
        }

        // Only reachable on infeasible input; keeps the output a full permutation.
        let slot = match best.map(|(slot, _)| slot).or_else(|| {
            (0..buckets.len()).find(|&slot| cursors[slot] < buckets[slot].teams.len())
        }) {
            Some(slot) => slot,
            None => break,
        };

        let team = buckets[slot].teams[cursors[slot]];
        cursors[slot] += 1;
        last_partner = Some(team.partner_id.as_str());
        sequence.push(team.clone());
    }

    sequence
}
