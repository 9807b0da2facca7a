use tracing::info;

use pitchorder_core::{Event, Partner, TeamUpdate};

use super::{Context, find_by_key};
use crate::workspace::{load_events, save_events};
use crate::{CliError, EventSelector};

pub fn add_partner(ctx: &mut Context, selector: &EventSelector, name: &str) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    let index = ctx.selected_event(selector, &events)?;
    let partner = events[index].add_partner(name, &ctx.ids, &ctx.clock)?;
    save_events(&ctx.store, &events)?;

    info!(event = "partner_added", event_id = %events[index].id, partner_id = %partner.id);
    println!("added partner \"{}\"", partner.name);
    Ok(())
}

pub fn add_preset_partners(ctx: &mut Context, selector: &EventSelector) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    let index = ctx.selected_event(selector, &events)?;
    let presets = ctx.settings.partner_presets.as_slice();
    let added = events[index].add_missing_partners(presets, &ctx.ids, &ctx.clock);
    if added.is_empty() {
        println!(
            "all preset partners are already in \"{}\"",
            events[index].name
        );
        return Ok(());
    }
    save_events(&ctx.store, &events)?;

    info!(
        event = "partners_preset_added",
        event_id = %events[index].id,
        added = added.len()
    );
    for partner in &added {
        println!("added partner \"{}\"", partner.name);
    }
    Ok(())
}

pub fn remove_partner(
    ctx: &mut Context,
    selector: &EventSelector,
    key: &str,
) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    let index = ctx.selected_event(selector, &events)?;
    let event = &mut events[index];
    let partner = find_partner(event, key)?;
    let removed = event.remove_partner(&partner.id, &ctx.clock)?;
    save_events(&ctx.store, &events)?;

    info!(event = "partner_removed", partner_id = %partner.id, teams_removed = removed.len());
    if removed.is_empty() {
        println!("removed partner \"{}\"", partner.name);
    } else {
        println!(
            "removed partner \"{}\" and {} team(s)",
            partner.name,
            removed.len()
        );
    }
    Ok(())
}

pub fn add_team(
    ctx: &mut Context,
    selector: &EventSelector,
    name: &str,
    partner_key: &str,
    case_name: Option<&str>,
) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    let index = ctx.selected_event(selector, &events)?;
    let event = &mut events[index];
    let partner = find_partner(event, partner_key)?;
    let team = event.add_team(name, &partner.id, case_name, &ctx.ids, &ctx.clock)?;
    save_events(&ctx.store, &events)?;

    info!(event = "team_added", team_id = %team.id, partner_id = %partner.id);
    println!("added team \"{}\" for \"{}\"", team.name, partner.name);
    Ok(())
}

pub fn edit_team(
    ctx: &mut Context,
    selector: &EventSelector,
    key: &str,
    name: Option<String>,
    partner_key: Option<String>,
    case_name: Option<Option<String>>,
) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    let index = ctx.selected_event(selector, &events)?;
    let event = &mut events[index];
    let team_id = find_team_id(event, key)?;
    let partner_id = match partner_key.as_deref() {
        Some(partner_key) => Some(find_partner(event, partner_key)?.id),
        None => None,
    };

    let team = event.update_team(
        &team_id,
        TeamUpdate {
            name,
            partner_id,
            case_name,
        },
        &ctx.clock,
    )?;
    save_events(&ctx.store, &events)?;

    info!(event = "team_updated", team_id = %team.id);
    println!("updated team \"{}\"", team.name);
    Ok(())
}

pub fn remove_team(ctx: &mut Context, selector: &EventSelector, key: &str) -> Result<(), CliError> {
    let mut events = load_events(&ctx.store)?;
    let index = ctx.selected_event(selector, &events)?;
    let event = &mut events[index];
    let team_id = find_team_id(event, key)?;
    let team = event.remove_team(&team_id, &ctx.clock)?;
    save_events(&ctx.store, &events)?;

    info!(event = "team_removed", team_id = %team.id);
    println!("removed team \"{}\"", team.name);
    Ok(())
}

fn find_partner(event: &Event, key: &str) -> Result<Partner, CliError> {
    find_by_key(&event.partners, key, |p| &p.id, |p| &p.name)
        .map(|index| event.partners[index].clone())
        .ok_or_else(|| CliError::NotFound(format!("partner '{key}' in \"{}\"", event.name)))
}

fn find_team_id(event: &Event, key: &str) -> Result<String, CliError> {
    find_by_key(&event.teams, key, |t| &t.id, |t| &t.name)
        .map(|index| event.teams[index].id.clone())
        .ok_or_else(|| CliError::NotFound(format!("team '{key}' in \"{}\"", event.name)))
}
