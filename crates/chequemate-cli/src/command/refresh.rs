use std::path::PathBuf;

use anyhow::bail;
use chequemate_features::FeatureExtractor;
use chequemate_history::ArchiveDirProvider;
use chequemate_store::JsonFeatureStore;

use crate::{config::Config, pipeline::RefreshPipeline, util::ReportOutput};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RefreshArg {
    /// Directory holding `<username>/<YYYY-MM>.json` game archives
    #[arg(long)]
    archives: PathBuf,
    /// Feature store file
    #[arg(long)]
    store: PathBuf,
    /// Archive periods per player [default: config `history_months`]
    #[arg(long)]
    months: Option<usize>,
    /// Parallel workers [default: config `refresh_jobs`]
    #[arg(long)]
    jobs: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Players to refresh [default: config `players`]
    usernames: Vec<String>,
}

pub(crate) fn run(arg: &RefreshArg, config: &Config) -> anyhow::Result<()> {
    let usernames = if arg.usernames.is_empty() {
        &config.players
    } else {
        &arg.usernames
    };
    if usernames.is_empty() {
        bail!("no players to refresh: pass usernames or set `players` in the config file");
    }

    let provider = ArchiveDirProvider::new(&arg.archives);
    let store = JsonFeatureStore::new(&arg.store);
    let pipeline = RefreshPipeline::new(
        &provider,
        &store,
        FeatureExtractor::new(config.extractor_config()),
        arg.months.unwrap_or(config.history_months),
    );
    let summary = pipeline.refresh_all(usernames, arg.jobs.unwrap_or(config.refresh_jobs));
    ReportOutput::emit(&summary, arg.output.as_deref())?;

    if summary.refreshed.is_empty() {
        bail!("failed to refresh any of {} players", summary.failed.len());
    }
    Ok(())
}
