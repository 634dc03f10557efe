use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trtodo", version, about = "Trusty Todo: a persistent task list")]
pub struct Cli {
    /// Path to the config file (defaults to $TRTODO_CONFIG, then ~/.config/trtodo/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task
    Add {
        text: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Due time, HH:MM
        #[arg(long)]
        time: Option<String>,
    },
    /// Show every task
    List,
    /// Mark a task done, or not done
    Toggle { id: i64 },
    /// Delete a task
    Delete { id: i64 },
    /// Delete every completed task
    ClearCompleted,
    /// Copy every task to the clipboard as text
    Export {
        /// Print the text instead of copying it
        #[arg(long)]
        stdout: bool,
    },
    /// Show or change the display mode
    DarkMode {
        #[arg(value_enum)]
        mode: Option<ModeSwitch>,
    },
    /// Show or change the display language
    Language { code: Option<String> },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeSwitch {
    On,
    Off,
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    Get { key: String },
    Set { key: String, value: String },
    Unset { key: String },
    List,
}
