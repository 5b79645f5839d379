use std::path::PathBuf;

use anyhow::Context;
use chequemate_history::canonical_username;
use chequemate_store::{FeatureStore, JsonFeatureStore};

use crate::util::ReportOutput;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    /// Feature store file
    #[arg(long)]
    store: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Show only this player
    username: Option<String>,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let mut table = JsonFeatureStore::new(&arg.store).load_all()?;
    match &arg.username {
        Some(username) => {
            let snapshot = table
                .remove(&canonical_username(username))
                .with_context(|| format!("no snapshot stored for {username}"))?;
            ReportOutput::emit(&snapshot, arg.output.as_deref())
        }
        None => ReportOutput::emit(&table, arg.output.as_deref()),
    }
}
