use chrono::{DateTime, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pitchorder_core::{Partner, Team};
use pitchorder_draw::{
    DrawError, DrawOptions, NO_TEAMS_MESSAGE, detect_violations, generate_sequence,
    validate_feasibility,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn partner(id: &str, name: &str) -> Partner {
    Partner::new(id, name, now())
}

fn team(id: &str, partner_id: &str) -> Team {
    Team::new(id, id.to_uppercase(), partner_id, None, now())
}

fn partners() -> Vec<Partner> {
    vec![partner("a", "Alpha"), partner("b", "Beta"), partner("c", "Gamma")]
}

fn partner_pattern(sequence: &[Team]) -> String {
    sequence.iter().map(|t| t.partner_id.as_str()).collect()
}

#[test]
fn two_of_one_partner_among_four_never_adjacent() {
    let teams = vec![team("a1", "a"), team("a2", "a"), team("b1", "b"), team("c1", "c")];

    let feasibility = validate_feasibility(&teams, &partners());
    assert!(feasibility.can_generate);
    assert_eq!(feasibility.max_partner_count, 2);
    assert_eq!(feasibility.total_teams, 4);
    assert!(feasibility.violations.is_empty());

    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sequence = generate_sequence(&teams, &partners(), &mut rng, &DrawOptions::default())
            .expect("feasible input");
        assert_eq!(sequence.len(), 4);
        assert!(
            detect_violations(&sequence).is_empty(),
            "seed {seed} produced {}",
            partner_pattern(&sequence)
        );
    }
}

#[test]
fn single_partner_majority_is_infeasible() {
    let teams = vec![team("a1", "a"), team("a2", "a"), team("a3", "a")];

    let feasibility = validate_feasibility(&teams, &partners());
    assert!(!feasibility.can_generate);
    assert_eq!(feasibility.max_partner_count, 3);
    assert_eq!(feasibility.total_teams, 3);
    assert_eq!(feasibility.violations.len(), 1);
    let message = &feasibility.violations[0];
    assert!(message.contains("Alpha"), "{message}");
    assert!(message.contains("(3 of 3)"), "{message}");
    assert!(message.contains("Maximum allowed: 2"), "{message}");
}

#[test]
fn two_partners_one_team_each() {
    let teams = vec![team("a1", "a"), team("b1", "b")];

    let feasibility = validate_feasibility(&teams, &partners());
    assert!(feasibility.can_generate);
    assert_eq!(feasibility.max_partner_count, 1);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let sequence = generate_sequence(&teams, &partners(), &mut rng, &DrawOptions::default())
        .expect("feasible input");
    let ids: Vec<&str> = sequence.iter().map(|t| t.id.as_str()).collect();
    assert!(ids == ["a1", "b1"] || ids == ["b1", "a1"], "{ids:?}");
    assert!(detect_violations(&sequence).is_empty());
}

#[test]
fn empty_input_is_infeasible() {
    let feasibility = validate_feasibility(&[], &partners());
    assert!(!feasibility.can_generate);
    assert_eq!(feasibility.violations, vec![NO_TEAMS_MESSAGE.to_string()]);
    assert_eq!(feasibility.max_partner_count, 0);
    assert_eq!(feasibility.total_teams, 0);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let err = generate_sequence(&[], &partners(), &mut rng, &DrawOptions::default())
        .expect_err("nothing to draw");
    assert_eq!(
        err.infeasibility(),
        Some(&[NO_TEAMS_MESSAGE.to_string()][..])
    );
}

#[test]
fn boundary_groups_alternate_strictly() {
    let teams = vec![team("a1", "a"), team("a2", "a"), team("b1", "b"), team("b2", "b")];

    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sequence = generate_sequence(&teams, &partners(), &mut rng, &DrawOptions::default())
            .expect("feasible input");
        let pattern = partner_pattern(&sequence);
        assert!(pattern == "abab" || pattern == "baba", "seed {seed}: {pattern}");
    }
}

#[test]
fn single_team_is_always_valid() {
    let teams = vec![team("a1", "a")];
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let sequence = generate_sequence(&teams, &partners(), &mut rng, &DrawOptions::default())
        .expect("single team");
    assert_eq!(sequence, teams);
}

#[test]
fn infeasible_input_is_refused() {
    let teams = vec![
        team("a1", "a"),
        team("a2", "a"),
        team("a3", "a"),
        team("b1", "b"),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let err = generate_sequence(&teams, &partners(), &mut rng, &DrawOptions::default())
        .expect_err("too many alpha teams");
    match err {
        DrawError::Infeasible { violations } => {
            assert_eq!(violations.len(), 1);
            assert!(violations[0].contains("(3 of 4)"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
