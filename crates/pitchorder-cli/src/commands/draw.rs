use tracing::info;

use pitchorder_core::{Event, LotteryResult, short_id};
use pitchorder_draw::{
    DrawEngine, DrawError, max_allowed_per_partner, partner_distribution, write_sequence_csv,
};

use super::{Context, find_by_key};
use crate::workspace::{load_events, load_history, save_history};
use crate::{CliError, DrawArgs, EventSelector, ExportArgs, ResultsArgs};

pub fn check(ctx: &mut Context, selector: &EventSelector) -> Result<(), CliError> {
    let events = load_events(&ctx.store)?;
    let event = &events[ctx.selected_event(selector, &events)?];
    let engine = DrawEngine::new(ctx.settings.draw_options(None, None));
    let feasibility = engine.check(&event.teams, &event.partners);

    if feasibility.can_generate {
        println!("draw is possible for \"{}\"", event.name);
    } else {
        println!("draw is not possible for \"{}\"", event.name);
        for message in &feasibility.violations {
            println!("  {message}");
        }
    }
    println!("  teams: {}", feasibility.total_teams);
    println!(
        "  max teams per partner: {}",
        max_allowed_per_partner(feasibility.total_teams)
    );
    println!("  largest group: {}", feasibility.max_partner_count);
    print_distribution(event);
    Ok(())
}

pub fn draw(ctx: &mut Context, args: &DrawArgs) -> Result<(), CliError> {
    let events = load_events(&ctx.store)?;
    let event = &events[ctx.selected_event(&args.selector, &events)?];
    let engine = DrawEngine::new(ctx.settings.draw_options(args.seed, args.max_attempts));

    let outcome = match engine.draw(&event.id, &event.teams, &event.partners) {
        Ok(outcome) => outcome,
        Err(DrawError::Infeasible { violations }) => {
            println!("draw is not possible for \"{}\"", event.name);
            for message in &violations {
                println!("  {message}");
            }
            print_distribution(event);
            return Err(DrawError::Infeasible { violations }.into());
        }
        Err(err) => return Err(err.into()),
    };

    let mut history = load_history(&ctx.store)?;
    history.push(outcome.result.clone());
    save_history(&ctx.store, &history)?;

    info!(
        event = "draw_stored",
        event_id = %event.id,
        result_id = %outcome.result.id,
        history = history.len()
    );

    print_result(event, &outcome.result);
    if outcome.report.used_fallback {
        println!("(ordered by the deterministic fallback)");
    }
    Ok(())
}

pub fn results(ctx: &mut Context, args: &ResultsArgs) -> Result<(), CliError> {
    let events = load_events(&ctx.store)?;
    let event = &events[ctx.selected_event(&args.selector, &events)?];
    let history = load_history(&ctx.store)?;
    let results = history.for_event(&event.id);

    if let Some(key) = args.id.as_deref() {
        let result = find_result(&results, key)?;
        print_result(event, result);
        return Ok(());
    }

    if results.is_empty() {
        println!("no draws yet for \"{}\"", event.name);
        return Ok(());
    }

    for (index, result) in results.iter().enumerate() {
        let status = if result.is_valid {
            "valid"
        } else {
            "with violations"
        };
        println!(
            "#{}  {}  {}  {} teams  {status}",
            results.len() - index,
            short_id(&result.id),
            result.created_at.format("%Y-%m-%d %H:%M:%S"),
            result.sequence.len(),
        );
    }
    Ok(())
}

pub fn export(ctx: &mut Context, args: &ExportArgs) -> Result<(), CliError> {
    let events = load_events(&ctx.store)?;
    let event = &events[ctx.selected_event(&args.selector, &events)?];
    let history = load_history(&ctx.store)?;
    let results = history.for_event(&event.id);
    let result = find_result(&results, &args.id)?;

    let path = match &args.out {
        Some(path) => path.clone(),
        None => ctx
            .paths
            .resolve(&ctx.settings.export_dir)
            .join(format!("draw_{}.csv", short_id(&result.id))),
    };
    let bytes = write_sequence_csv(&path, result, &event.partners)?;

    info!(event = "result_exported", result_id = %result.id, path = %path.display(), bytes);
    println!("wrote {}", path.display());
    Ok(())
}

fn find_result<'a>(results: &[&'a LotteryResult], key: &str) -> Result<&'a LotteryResult, CliError> {
    find_by_key(results, key, |r| &r.id, |r| &r.id)
        .map(|index| results[index])
        .ok_or_else(|| CliError::NotFound(format!("result '{key}'")))
}

fn print_result(event: &Event, result: &LotteryResult) {
    println!(
        "draw {} for \"{}\" at {}",
        short_id(&result.id),
        event.name,
        result.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    for (position, team) in result.sequence.iter().enumerate() {
        let partner = event
            .partner(&team.partner_id)
            .map(|p| p.name.as_str())
            .unwrap_or("unknown partner");
        match &team.case_name {
            Some(case) => println!("{:>3}. {}  [{partner}]  {case}", position + 1, team.name),
            None => println!("{:>3}. {}  [{partner}]", position + 1, team.name),
        }
    }

    if !result.is_valid {
        println!("violations:");
        for violation in result.violations() {
            println!("  at {}: {}", violation.position + 1, violation.message);
        }
    }
}

fn print_distribution(event: &Event) {
    let shares = partner_distribution(&event.teams, &event.partners);
    if shares.is_empty() {
        return;
    }
    println!("teams per partner:");
    for share in shares {
        let flag = if share.over_limit { "  (too many)" } else { "" };
        println!("  {}: {}{flag}", share.partner_name, share.count);
    }
}
