use std::collections::HashSet;

use tracing::warn;

use pitchorder_core::{Event, ResultHistory};

use super::{Store, WorkspaceResult};

pub const EVENTS_KEY: &str = "events";
pub const RESULTS_KEY: &str = "lottery_results";
pub const CURRENT_EVENT_KEY: &str = "current_event";

/// Load all events. Later duplicates of an id are dropped.
pub fn load_events(store: &impl Store) -> WorkspaceResult<Vec<Event>> {
    let events: Vec<Event> = store.load(EVENTS_KEY)?.unwrap_or_default();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(events.len());
    for event in events {
        if seen.insert(event.id.clone()) {
            unique.push(event);
        } else {
            warn!(event_id = %event.id, "dropping duplicate stored event");
        }
    }
    Ok(unique)
}

pub fn save_events(store: &impl Store, events: &[Event]) -> WorkspaceResult<()> {
    store.save(EVENTS_KEY, events)
}

pub fn load_history(store: &impl Store) -> WorkspaceResult<ResultHistory> {
    Ok(store.load(RESULTS_KEY)?.unwrap_or_default())
}

pub fn save_history(store: &impl Store, history: &ResultHistory) -> WorkspaceResult<()> {
    store.save(RESULTS_KEY, history)
}

pub fn load_current_event_id(store: &impl Store) -> WorkspaceResult<Option<String>> {
    store.load(CURRENT_EVENT_KEY)
}

pub fn save_current_event_id(store: &impl Store, event_id: Option<&str>) -> WorkspaceResult<()> {
    match event_id {
        Some(id) => store.save(CURRENT_EVENT_KEY, id),
        None => store.remove(CURRENT_EVENT_KEY),
    }
}

/// Delete an event with its stored draws. Returns how many draws were removed.
///
/// History is rewritten first so a failed write never orphans draws.
pub fn delete_event(
    store: &impl Store,
    events: &mut Vec<Event>,
    index: usize,
) -> WorkspaceResult<(Event, usize)> {
    let event_id = events[index].id.clone();

    let mut history = load_history(store)?;
    let removed = history.remove_event(&event_id);
    save_history(store, &history)?;

    let event = events.remove(index);
    save_events(store, events)?;

    if load_current_event_id(store)?.as_deref() == Some(event_id.as_str()) {
        save_current_event_id(store, None)?;
    }
    Ok((event, removed))
}
