mod commands;
mod logging;
mod workspace;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pitchorder_core::Error as CoreError;
use pitchorder_draw::DrawError;
use thiserror::Error;

use commands::Context;
use workspace::WorkspaceError;

#[derive(Debug, Error)]
enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("draw error: {0}")]
    Draw(#[from] DrawError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "pitchorder", version, about = "Fair presentation order draws")]
struct Cli {
    /// Workspace directory holding data, settings and logs.
    #[arg(long, global = true, default_value = ".pitchorder")]
    workspace: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, list, select and delete events.
    #[command(subcommand)]
    Event(EventCommand),
    /// Manage the partners of an event.
    #[command(subcommand)]
    Partner(PartnerCommand),
    /// Manage the teams of an event.
    #[command(subcommand)]
    Team(TeamCommand),
    /// Check whether a fair order can be drawn.
    Check(EventSelector),
    /// Draw a presentation order and store it in the history.
    Draw(DrawArgs),
    /// List past draws or show one of them.
    Results(ResultsArgs),
    /// Write a past draw as CSV.
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct EventSelector {
    /// Event id, id prefix or name. Defaults to the current event.
    #[arg(long)]
    event: Option<String>,
}

#[derive(Subcommand, Debug)]
enum EventCommand {
    /// Create an event and make it current.
    Create { name: String },
    /// List events.
    List,
    /// Show partners and teams of an event.
    Show(EventSelector),
    /// Make an event current.
    Use { event: String },
    /// Delete an event and its draw history.
    Delete { event: String },
}

#[derive(Subcommand, Debug)]
enum PartnerCommand {
    /// Add a partner.
    Add {
        name: String,
        #[command(flatten)]
        selector: EventSelector,
    },
    /// Add the preset partners from settings that the event does not have yet.
    Presets(EventSelector),
    /// Remove a partner and all of its teams.
    Remove {
        partner: String,
        #[command(flatten)]
        selector: EventSelector,
    },
}

#[derive(Subcommand, Debug)]
enum TeamCommand {
    /// Add a team for a partner.
    Add {
        name: String,
        /// Partner id or name.
        #[arg(long)]
        partner: String,
        /// Case the team presents.
        #[arg(long = "case")]
        case_name: Option<String>,
        #[command(flatten)]
        selector: EventSelector,
    },
    /// Edit a team.
    Edit {
        team: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        partner: Option<String>,
        #[arg(long = "case", conflicts_with = "clear_case")]
        case_name: Option<String>,
        /// Remove the case name.
        #[arg(long, default_value_t = false)]
        clear_case: bool,
        #[command(flatten)]
        selector: EventSelector,
    },
    /// Remove a team.
    Remove {
        team: String,
        #[command(flatten)]
        selector: EventSelector,
    },
}

#[derive(Args, Debug)]
struct DrawArgs {
    #[command(flatten)]
    selector: EventSelector,
    /// Seed for a reproducible draw.
    #[arg(long)]
    seed: Option<u64>,
    /// Randomized attempts before the deterministic fallback.
    #[arg(long)]
    max_attempts: Option<u32>,
}

#[derive(Args, Debug)]
struct ResultsArgs {
    #[command(flatten)]
    selector: EventSelector,
    /// Result id or id prefix to show in full.
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    selector: EventSelector,
    /// Result id or id prefix.
    #[arg(long)]
    id: String,
    /// Output CSV path. Defaults to the configured export directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut ctx = Context::open(cli.workspace)?;
    logging::init_logging(&ctx.paths.cli_log_path()).map_err(CliError::Logging)?;
    tracing::info!(event = "command_started", command = ?cli.command);

    let outcome = run(&mut ctx, cli.command);
    match &outcome {
        Ok(()) => tracing::info!(event = "command_finished", status = "success"),
        Err(err) => tracing::warn!(event = "command_finished", status = "failed", error = %err),
    }
    outcome
}

fn run(ctx: &mut Context, command: Command) -> Result<(), CliError> {
    match command {
        Command::Event(command) => match command {
            EventCommand::Create { name } => commands::event::create(ctx, &name),
            EventCommand::List => commands::event::list(ctx),
            EventCommand::Show(selector) => commands::event::show(ctx, &selector),
            EventCommand::Use { event } => commands::event::select(ctx, &event),
            EventCommand::Delete { event } => commands::event::delete(ctx, &event),
        },
        Command::Partner(command) => match command {
            PartnerCommand::Add { name, selector } => {
                commands::roster::add_partner(ctx, &selector, &name)
            }
            PartnerCommand::Presets(selector) => {
                commands::roster::add_preset_partners(ctx, &selector)
            }
            PartnerCommand::Remove { partner, selector } => {
                commands::roster::remove_partner(ctx, &selector, &partner)
            }
        },
        Command::Team(command) => match command {
            TeamCommand::Add {
                name,
                partner,
                case_name,
                selector,
            } => commands::roster::add_team(ctx, &selector, &name, &partner, case_name.as_deref()),
            TeamCommand::Edit {
                team,
                name,
                partner,
                case_name,
                clear_case,
                selector,
            } => {
                let case_name = if clear_case {
                    Some(None)
                } else {
                    case_name.map(Some)
                };
                commands::roster::edit_team(ctx, &selector, &team, name, partner, case_name)
            }
            TeamCommand::Remove { team, selector } => {
                commands::roster::remove_team(ctx, &selector, &team)
            }
        },
        Command::Check(selector) => commands::draw::check(ctx, &selector),
        Command::Draw(args) => commands::draw::draw(ctx, &args),
        Command::Results(args) => commands::draw::results(ctx, &args),
        Command::Export(args) => commands::draw::export(ctx, &args),
    }
}
