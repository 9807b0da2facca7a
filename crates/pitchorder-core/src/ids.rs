use chrono::{DateTime, Utc};

/// Source of opaque, unique identifiers for new entities and results.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Source of timestamps for new entities and results.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Random v4 UUIDs in their hyphenless form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Short, human-friendly prefix of an id for display.
pub fn short_id(id: &str) -> &str {
    match id.get(..8) {
        Some(prefix) => prefix,
        None => id,
    }
}
