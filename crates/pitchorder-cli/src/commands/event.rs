use tracing::info;

use pitchorder_core::{Error as CoreError, Event, event_name_taken, short_id, validate_event};

use super::{Context, find_event};
use crate::workspace::{
    delete_event, load_current_event_id, load_events, save_current_event_id, save_events,
};
use crate::{CliError, EventSelector};

pub fn create(ctx: &mut Context, name: &str) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    if event_name_taken(&events, name) {
        return Err(CoreError::DuplicateName {
            kind: "event",
            name: name.trim().to_string(),
        }
        .into());
    }

    let event = Event::create(name, &ctx.ids, &ctx.clock)?;
    let (id, name) = (event.id.clone(), event.name.clone());
    events.push(event);
    save_events(&ctx.store, &events)?;
    save_current_event_id(&ctx.store, Some(id.as_str()))?;

    info!(event = "event_created", event_id = %id);
    println!("created event \"{name}\" ({})", short_id(&id));
    Ok(())
}

pub fn list(ctx: &mut Context) -> Result<(), CliError> {
    let events = load_events(&ctx.store)?;
    if events.is_empty() {
        println!("no events yet; create one with `pitchorder event create <NAME>`");
        return Ok(());
    }

    let current = load_current_event_id(&ctx.store)?;
    for event in &events {
        let marker = if current.as_deref() == Some(event.id.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {}  {}  partners: {}  teams: {}  cases: {}  updated: {}",
            short_id(&event.id),
            event.name,
            event.partners.len(),
            event.teams.len(),
            event.cases_count(),
            event.updated_at.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

pub fn show(ctx: &mut Context, selector: &EventSelector) -> Result<(), CliError> {
    let events = load_events(&ctx.store)?;
    let event = &events[ctx.selected_event(selector, &events)?];

    println!("{} ({})", event.name, short_id(&event.id));
    println!(
        "partners: {}  teams: {}  cases: {}",
        event.partners.len(),
        event.teams.len(),
        event.cases_count()
    );

    for group in event.partner_groups() {
        println!("\n{} [{}]", group.partner.name, group.count());
        for team in &group.teams {
            match &team.case_name {
                Some(case) => println!("  - {}  ({case})", team.name),
                None => println!("  - {}", team.name),
            }
        }
    }

    let idle: Vec<&str> = event
        .partners
        .iter()
        .filter(|p| !event.teams.iter().any(|t| t.partner_id == p.id))
        .map(|p| p.name.as_str())
        .collect();
    if !idle.is_empty() {
        println!("\npartners without teams: {}", idle.join(", "));
    }

    let report = validate_event(event);
    for issue in report.errors.iter().chain(report.warnings.iter()) {
        println!("\n{:?}: {}", issue.severity, issue.message);
        if let Some(hint) = &issue.hint {
            println!("  hint: {hint}");
        }
    }
    Ok(())
}

pub fn select(ctx: &mut Context, key: &str) -> Result<(), CliError> {
    let events = load_events(&ctx.store)?;
    let event = &events[find_event(&events, key)?];
    save_current_event_id(&ctx.store, Some(event.id.as_str()))?;
    println!("current event: \"{}\"", event.name);
    Ok(())
}

pub fn delete(ctx: &mut Context, key: &str) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    let index = find_event(&events, key)?;
    let (event, removed) = delete_event(&ctx.store, &mut events, index)?;

    info!(event = "event_deleted", event_id = %event.id, results_removed = removed);
    println!(
        "deleted event \"{}\" and {removed} stored draw(s)",
        event.name
    );
    Ok(())
}
