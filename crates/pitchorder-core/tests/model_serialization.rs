use chrono::{TimeZone, Utc};
use serde_json::json;

use pitchorder_core::{Event, LotteryResult, Partner, Team, Violation};

#[test]
fn event_uses_camel_case_layout() {
    let now = Utc
        .with_ymd_and_hms(2024, 2, 10, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut event = Event::new("e1", "Hackathon finals", now);
    event.partners.push(Partner::new("p1", "Alpha", now));
    event.teams.push(Team::new(
        "t1",
        "Rockets",
        "p1",
        Some("Fraud scoring".to_string()),
        now,
    ));
    event.teams.push(Team::new("t2", "Comets", "p1", None, now));

    let value = serde_json::to_value(&event).expect("serialize event");
    assert_eq!(value["createdAt"], "2024-02-10T08:00:00Z");
    assert_eq!(value["teams"][0]["partnerId"], "p1");
    assert_eq!(value["teams"][0]["caseName"], "Fraud scoring");
    assert!(value["teams"][1].get("caseName").is_none());

    let back: Event = serde_json::from_value(value).expect("deserialize event");
    assert_eq!(back, event);
}

#[test]
fn stored_event_without_collections_loads() {
    let value = json!({
        "id": "e1",
        "name": "Legacy",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-02T00:00:00.000Z"
    });
    let event: Event = serde_json::from_value(value).expect("deserialize event");
    assert!(event.partners.is_empty());
    assert!(event.teams.is_empty());
}

#[test]
fn result_with_violations_round_trips() {
    let now = Utc
        .with_ymd_and_hms(2024, 2, 10, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    let result = LotteryResult {
        id: "r1".to_string(),
        event_id: "e1".to_string(),
        sequence: vec![
            Team::new("t1", "Rockets", "p1", None, now),
            Team::new("t2", "Comets", "p1", None, now),
        ],
        created_at: now,
        is_valid: false,
        violations: Some(vec![Violation {
            position: 1,
            team_id: "t2".to_string(),
            partner_id: "p1".to_string(),
            message: "team \"Comets\" follows team \"Rockets\" of the same partner".to_string(),
        }]),
    };

    let value = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(value["isValid"], false);
    assert_eq!(value["violations"][0]["teamId"], "t2");
    assert_eq!(value["violations"][0]["position"], 1);

    let back: LotteryResult = serde_json::from_value(value).expect("deserialize result");
    assert_eq!(back.violations().len(), 1);
    assert_eq!(back, result);
}
