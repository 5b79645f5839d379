use std::path::PathBuf;

use chequemate_features::PlayerFeatureSnapshot;
use chequemate_matcher::{MatchCandidate, MatchOutcome, Matchmaker};
use chequemate_store::{FeatureStore, JsonFeatureStore};
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{config::Config, util::ReportOutput};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct MatchArg {
    /// Feature store file
    #[arg(long)]
    store: PathBuf,
    /// List up to N ranked candidates instead of a single pick
    #[arg(long)]
    top: Option<usize>,
    /// Shuffle the pool before selection, so exact ties are broken at random
    #[arg(long)]
    shuffle: bool,
    /// Seed for `--shuffle`
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Requesting player
    username: String,
}

#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    requester: &'a str,
    #[serde(flatten)]
    outcome: MatchOutcome,
}

#[derive(Debug, Serialize)]
struct RankingReport<'a> {
    requester: &'a str,
    candidates: Vec<MatchCandidate>,
}

pub(crate) fn run(arg: &MatchArg, config: &Config) -> anyhow::Result<()> {
    let table = JsonFeatureStore::new(&arg.store).load_all()?;
    let mut pool: Vec<&PlayerFeatureSnapshot> = table.values().collect();
    if arg.shuffle {
        let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("shuffling pool of {} with seed {seed}", pool.len());
        pool.shuffle(&mut Pcg32::seed_from_u64(seed));
    }

    let matchmaker = Matchmaker::from_config(&config.matchmaker_config());
    let requester = arg.username.as_str();
    match arg.top {
        Some(top) => {
            let mut candidates = matchmaker.rank_candidates(requester, pool)?;
            candidates.truncate(top);
            ReportOutput::emit(
                &RankingReport {
                    requester,
                    candidates,
                },
                arg.output.as_deref(),
            )
        }
        None => {
            let outcome = matchmaker.find_opponent(requester, pool)?;
            ReportOutput::emit(&MatchReport { requester, outcome }, arg.output.as_deref())
        }
    }
}
