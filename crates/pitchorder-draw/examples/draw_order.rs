use std::env;
use std::path::PathBuf;

use pitchorder_core::Event;
use pitchorder_draw::{DrawEngine, DrawOptions, write_sequence_csv};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut event_path: Option<PathBuf> = None;
    let mut out_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--event" => event_path = args.next().map(PathBuf::from),
            "--out" => out_path = args.next().map(PathBuf::from),
            "--seed" => seed = args.next().map(|s| s.parse()).transpose()?,
            _ => {
                if event_path.is_none() {
                    event_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let event_path = event_path.ok_or("missing --event path")?;
    let event_json = std::fs::read_to_string(&event_path)?;
    let event: Event = serde_json::from_str(&event_json)?;

    let options = DrawOptions {
        seed,
        ..DrawOptions::default()
    };
    let engine = DrawEngine::new(options);
    let outcome = engine.draw(&event.id, &event.teams, &event.partners)?;

    for (position, team) in outcome.result.sequence.iter().enumerate() {
        println!("{:>3}. {}", position + 1, team.name);
    }
    if let Some(out_path) = out_path {
        write_sequence_csv(&out_path, &outcome.result, &event.partners)?;
        println!("csv={}", out_path.display());
    }
    Ok(())
}
