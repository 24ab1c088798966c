mod init;
pub use init::{cmd_check, cmd_init};

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::state::StateStore;
use crate::model::hints::HintKind;
use crate::tracker::Tracker;
use crate::tracker::action::Action;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.unwrap_or_else(config_io::default_config_path);
    let state_path = cli.state;

    let Some(cmd) = cli.command else {
        return crate::tui::run(&config_path, state_path);
    };

    match cmd {
        // Config commands
        Commands::Init(args) => cmd_init(&config_path, args),
        Commands::Check => cmd_check(&config_path),
        Commands::Bind(args) => cmd_bind(&config_path, args),

        // Read commands
        Commands::Status(args) => cmd_status(&config_path, state_path, args),

        // Write commands
        Commands::Keys(args) => with_tracker(&config_path, state_path, |t| {
            t.input(&args.chars);
            if !t.is_idle() {
                eprintln!("note: gesture left unfinished ({})", t.input_state().label());
            }
            Ok(())
        }),
        Commands::Hint(args) => with_tracker(&config_path, state_path, |t| {
            let kind = HintKind::from_label(&args.category)
                .ok_or_else(|| format!("unknown hint category \"{}\"", args.category))?;
            t.input_action(Action::StartHintInput(kind));
            t.input(&args.text.join(" "));
            t.submit();
            Ok(())
        }),
        Commands::Undo => with_tracker(&config_path, state_path, |t| {
            if !t.ledger().can_undo() {
                eprintln!("nothing to undo");
            }
            t.undo();
            Ok(())
        }),
        Commands::Redo => with_tracker(&config_path, state_path, |t| {
            if !t.ledger().can_redo() {
                eprintln!("nothing to redo");
            }
            t.redo();
            Ok(())
        }),
        Commands::Reset => with_tracker(&config_path, state_path, |t| {
            t.reset();
            Ok(())
        }),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a tracker from config and the saved state (if it fits)
fn open_tracker(
    config_path: &Path,
    state_path: Option<PathBuf>,
) -> Result<(Tracker, StateStore), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    let store = StateStore::resolve(state_path, &config.save);
    let mut tracker = Tracker::new(config)?;
    if !tracker.load(&store) {
        warn!("starting from a fresh tracker");
    }
    Ok((tracker, store))
}

/// Load, apply `f`, then save
fn with_tracker<F>(
    config_path: &Path,
    state_path: Option<PathBuf>,
    f: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut Tracker) -> Result<(), Box<dyn std::error::Error>>,
{
    let (mut tracker, store) = open_tracker(config_path, state_path)?;
    f(&mut tracker)?;
    tracker.save(&store)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_status(
    config_path: &Path,
    state_path: Option<PathBuf>,
    args: StatusArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tracker, _) = open_tracker(config_path, state_path)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&status_to_json(&tracker))?);
    } else {
        for line in format_status(&tracker) {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_bind(config_path: &Path, args: BindArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = config_io::read_document(config_path)?;
    config_io::set_bind(&mut doc, &args.key, &args.action)?;
    config_io::write_document(config_path, &doc)?;
    println!("{} = {}", args.key, args.action);
    Ok(())
}
