use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rtk", about = concat!("rtk v", env!("CARGO_PKG_VERSION"), " - keypad item and hint tracker for randomizer runs"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: <config dir>/randotrack/tracker.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// State file (default: [save].path, then <cache dir>/randotrack/state.json)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default tracker.toml
    Init(InitArgs),
    /// Validate the config and report names missing from the item catalog
    Check,
    /// Show tracked items and hints
    Status(StatusArgs),
    /// Type characters through the key bindings
    Keys(KeysArgs),
    /// Enter a hint
    Hint(HintArgs),
    /// Undo the last change
    Undo,
    /// Redo the last undone change
    Redo,
    /// Clear everything back to the configured starting state
    Reset,
    /// Bind a key to an action in tracker.toml
    Bind(BindArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct KeysArgs {
    /// Characters to feed, e.g. "034" or ".12"
    #[arg(allow_hyphen_values = true)]
    pub chars: String,
}

#[derive(Args)]
pub struct HintArgs {
    /// Hint category (woth, goal, barren, sometimes, always)
    pub category: String,
    /// Hint text; for always hints the first word picks the location
    #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct BindArgs {
    /// Single character
    pub key: String,
    /// Action name, e.g. StartItemInput, Undo, TopLeft
    pub action: String,
}
