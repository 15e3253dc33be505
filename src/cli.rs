use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mmerge",
    version,
    about = "TUI merge conflict resolver"
)]
pub struct Cli {
    /// Files to resolve (defaults to the conflicted files of the current repository)
    pub paths: Vec<PathBuf>,

    /// Color theme (one-dark, github-dark, dracula, solarized-dark)
    #[arg(long)]
    pub theme: Option<String>,

    /// Stage files with `git add` once all their conflicts are resolved
    #[arg(long)]
    pub stage: bool,

    /// Do not write any file; only report what would change
    #[arg(long)]
    pub dry_run: bool,

    /// Show the key binding footer in the conflict list
    #[arg(long = "help-panel")]
    pub help_panel: bool,

    /// Write logs to this file (level from MMERGE_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
