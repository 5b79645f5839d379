use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

use self::{find_match::MatchArg, profile::ProfileArg, refresh::RefreshArg, show::ShowArg};

mod find_match;
mod profile;
mod refresh;
mod show;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rebuild feature snapshots from archived games
    Refresh(#[clap(flatten)] RefreshArg),
    /// Find the best opponent for a player
    #[command(name = "match")]
    Match(#[clap(flatten)] MatchArg),
    /// Summarize a player's opening repertoire
    Profile(#[clap(flatten)] ProfileArg),
    /// Print stored feature snapshots
    Show(#[clap(flatten)] ShowArg),
}

pub fn run() -> anyhow::Result<()> {
    execute(CommandArgs::parse())
}

fn execute(args: CommandArgs) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref())?;
    match args.mode {
        Mode::Refresh(arg) => refresh::run(&arg, &config)?,
        Mode::Match(arg) => find_match::run(&arg, &config)?,
        Mode::Profile(arg) => profile::run(&arg, &config)?,
        Mode::Show(arg) => show::run(&arg)?,
    }
    Ok(())
}
