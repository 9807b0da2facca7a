use serde::{Deserialize, Serialize};

use crate::model::LotteryResult;

/// Append-only collection of past draws across events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultHistory {
    results: Vec<LotteryResult>,
}

impl ResultHistory {
    pub fn new(results: Vec<LotteryResult>) -> Self {
        Self { results }
    }

    pub fn push(&mut self, result: LotteryResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&LotteryResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Results of one event, newest first.
    pub fn for_event(&self, event_id: &str) -> Vec<&LotteryResult> {
        let mut results: Vec<&LotteryResult> = self
            .results
            .iter()
            .filter(|r| r.event_id == event_id)
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        results
    }

    /// Drop every result of an event. Returns how many were removed.
    pub fn remove_event(&mut self, event_id: &str) -> usize {
        let before = self.results.len();
        self.results.retain(|r| r.event_id != event_id);
        before - self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn result(id: &str, event_id: &str, minutes: i64) -> LotteryResult {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        LotteryResult {
            id: id.to_string(),
            event_id: event_id.to_string(),
            sequence: Vec::new(),
            created_at: base + Duration::minutes(minutes),
            is_valid: true,
            violations: None,
        }
    }

    #[test]
    fn for_event_orders_newest_first() {
        let mut history = ResultHistory::default();
        history.push(result("r1", "e1", 0));
        history.push(result("r2", "e2", 5));
        history.push(result("r3", "e1", 10));

        let ids: Vec<&str> = history
            .for_event("e1")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r3", "r1"]);
        assert!(history.find("r2").is_some());
    }

    #[test]
    fn remove_event_keeps_other_events() {
        let mut history = ResultHistory::new(vec![result("r1", "e1", 0), result("r2", "e2", 1)]);
        assert_eq!(history.remove_event("e1"), 1);
        assert_eq!(history.len(), 1);
        assert!(history.find("r1").is_none());
    }

    #[test]
    fn serializes_as_plain_list() {
        let history = ResultHistory::new(vec![result("r1", "e1", 0)]);
        let json = serde_json::to_value(&history).expect("serialize");
        assert!(json.is_array());
        assert_eq!(json[0]["eventId"], "e1");
        assert_eq!(json[0]["isValid"], true);
        assert!(json[0].get("violations").is_none());
    }
}
