use std::path::PathBuf;

use anyhow::Context;
use chequemate_features::{
    GameWindow, feature,
    profile::{DEFAULT_TOP_OPENINGS, Recommendation, StyleProfile},
};
use chequemate_history::{ArchiveDirProvider, HistoryProvider};
use serde::Serialize;

use crate::{config::Config, util::ReportOutput};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ProfileArg {
    /// Directory holding `<username>/<YYYY-MM>.json` game archives
    #[arg(long)]
    archives: PathBuf,
    /// Archive periods to summarize [default: config `history_months`]
    #[arg(long)]
    months: Option<usize>,
    /// Number of most played openings to list
    #[arg(long, default_value_t = DEFAULT_TOP_OPENINGS)]
    top: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    username: String,
}

#[derive(Debug, Serialize)]
struct ProfileReport<'a> {
    username: &'a str,
    months: usize,
    excluded_games: usize,
    /// Own rating in the most recent game, `null` without games.
    rating: Option<u32>,
    streak: i32,
    #[serde(flatten)]
    profile: StyleProfile,
    recommendations: Vec<Recommendation>,
}

pub(crate) fn run(arg: &ProfileArg, config: &Config) -> anyhow::Result<()> {
    let months = arg.months.unwrap_or(config.history_months);
    let raw = ArchiveDirProvider::new(&arg.archives)
        .recent_games(&arg.username, months)
        .with_context(|| format!("failed to fetch match history of {}", arg.username))?;
    let (window, excluded) = GameWindow::from_raw_games(&arg.username, &raw);

    let profile = StyleProfile::from_window(&window, arg.top);
    let recommendations = profile.recommendations();
    for advice in &recommendations {
        log::info!("{}: {advice}", arg.username);
    }
    let report = ProfileReport {
        username: &arg.username,
        months,
        excluded_games: excluded.len(),
        rating: feature::current_rating(&window),
        streak: feature::streak(&window, config.streak_lookback),
        profile,
        recommendations,
    };
    ReportOutput::emit(&report, arg.output.as_deref())
}
