mod action;
mod app;
mod cli;
mod components;
mod config;
mod conflict;
mod diff;
mod discover;
mod error;
mod event;
mod git;
mod highlight;
mod logging;
mod presentation;
mod resolve;
mod state;
mod theme;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::Path;

use crate::app::App;
use crate::cli::Cli;
use crate::git::{GitCli, RepoCache};
use crate::resolve::FileReport;
use crate::state::Navigator;
use crate::theme::{apply_overrides, Theme, THEME_NAMES};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();

    // Load config, apply CLI overrides
    let mut config = config::load_config();
    if let Some(ref theme_name) = cli.theme {
        if !THEME_NAMES.contains(&theme_name.as_str()) {
            eprintln!(
                "mmerge: unknown theme {theme_name:?} (available: {}), using one-dark",
                THEME_NAMES.join(", ")
            );
        }
        let overrides = config.colors.clone();
        config.theme = Theme::from_name(theme_name);
        if let Some(ref overrides) = overrides {
            apply_overrides(&mut config.theme, overrides);
        }
    }
    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    logging::init(log_file.as_deref())?;

    let cwd = env::current_dir()?;
    let repo = RepoCache::open(&cwd).ok();

    let paths = match discover::input_paths(&cli.paths, &cwd, repo.as_ref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("mmerge: {e:#}");
            std::process::exit(1);
        }
    };

    let display_name = |path: &Path| match &repo {
        Some(r) => r.display_name(path),
        None => path
            .strip_prefix(&cwd)
            .unwrap_or(path)
            .display()
            .to_string(),
    };
    let (conflicts, files) = discover::load_conflicts(&paths, display_name, &config.theme)?;

    if conflicts.is_empty() {
        println!("mmerge: no conflicts found");
        return Ok(());
    }
    log::info!("{} conflict(s) across {} file(s)", conflicts.len(), files.len());

    let show_help = cli.help_panel || config.show_help;
    let mut app = App::new(Navigator::new(conflicts, files), config.theme.clone(), show_help);

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    if let Err(ref e) = result {
        eprintln!("mmerge: {e:#}");
    }
    result?;

    let navigator = app.into_navigator();
    let reports = resolve::write_all(&navigator, cli.dry_run)?;

    if (cli.stage || config.stage_resolved) && !cli.dry_run {
        match &repo {
            Some(r) => stage_complete(&GitCli::new(r.workdir()), &reports),
            None => eprintln!("mmerge: not in a git repository, nothing staged"),
        }
    }

    print_summary(&reports, cli.dry_run);
    Ok(())
}

fn stage_complete(git: &GitCli, reports: &[FileReport]) {
    for report in reports.iter().filter(|r| r.written && r.is_complete()) {
        if let Err(e) = git.stage_file(&report.path) {
            log::warn!("staging {} failed: {e:#}", report.path.display());
            eprintln!("mmerge: {e:#}");
        }
    }
}

fn print_summary(reports: &[FileReport], dry_run: bool) {
    for report in reports {
        let verb = match (report.resolved, dry_run) {
            (0, _) => "untouched",
            (_, true) => "would write",
            (_, false) => "wrote",
        };
        println!(
            "{:>12} {} ({}/{} resolved)",
            verb, report.file_name, report.resolved, report.total
        );
    }
}
