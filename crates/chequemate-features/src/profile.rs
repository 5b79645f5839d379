//! Opening repertoire summary of a player.
//!
//! A [`StyleProfile`] describes the same window the style vector is built from, in
//! terms a player can read:
//!
//! - **Coverage** - share of games carrying an opening code
//! - **Families** - games per opening family (A Flank, B Semi-Open, C Open, D Closed,
//!   E Indian)
//! - **Top openings** - most played codes
//! - **Tactical share** - share of coded games in families B and C
//! - **Positional share** - share of coded games in families D and E
//! - **Diversity** - distinct codes per coded game
//!
//! Every share is 0.0 when the window holds no coded games.
//!
//! [`StyleProfile::recommendations`] turns the shares into study advice.

use std::cmp::Reverse;

use chequemate_history::{EcoCode, EcoFamily};
use chequemate_stats::frequency;
use serde::Serialize;

use crate::GameWindow;

/// Default number of openings listed in [`StyleProfile::top_openings`].
pub const DEFAULT_TOP_OPENINGS: usize = 10;

/// Tactical or positional share under which more such openings are advised.
pub const MIN_FAMILY_SHARE: f64 = 0.3;
/// Diversity under which a broader repertoire is advised.
pub const MIN_DIVERSITY: f64 = 0.1;
/// Distinct openings under which learning more variations is advised.
pub const MIN_UNIQUE_OPENINGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    #[display("consider studying more tactical openings (B00-B99, C00-C99)")]
    StudyTacticalOpenings,
    #[display("try more positional openings (D00-D99, E00-E99)")]
    StudyPositionalOpenings,
    #[display("expand your opening repertoire for better versatility")]
    BroadenRepertoire,
    #[display("learn more opening variations to improve adaptability")]
    LearnMoreVariations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningCount {
    pub code: EcoCode,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyShare {
    pub family: EcoFamily,
    pub name: &'static str,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleProfile {
    pub total_games: usize,
    pub coded_games: usize,
    pub coverage: f64,
    pub unique_openings: usize,
    pub favorite_opening: Option<OpeningCount>,
    /// Families that occur, most played first.
    pub families: Vec<FamilyShare>,
    /// Most played openings, ties in canonical code order.
    pub top_openings: Vec<OpeningCount>,
    pub tactical_share: f64,
    pub positional_share: f64,
    pub diversity: f64,
}

impl StyleProfile {
    #[must_use]
    pub fn from_window(window: &GameWindow, top_n: usize) -> Self {
        let codes: Vec<EcoCode> = window.iter().filter_map(|game| game.opening).collect();
        let total_games = window.len();
        let coded_games = codes.len();
        let share = |count: usize| ratio(count, coded_games);

        let code_counts = frequency::count(codes.iter().copied());
        let mut ranked: Vec<_> = code_counts.into_iter().collect();
        // BTreeMap order is canonical code order; stable sort keeps it among equal counts
        ranked.sort_by_key(|(_, count)| Reverse(*count));
        let unique_openings = ranked.len();
        let opening_counts: Vec<OpeningCount> = ranked
            .into_iter()
            .map(|(code, count)| OpeningCount {
                code,
                count,
                share: share(count),
            })
            .collect();

        let mut families: Vec<FamilyShare> = frequency::count(codes.iter().map(|c| c.family()))
            .into_iter()
            .map(|(family, count)| FamilyShare {
                family,
                name: family.name(),
                count,
                share: share(count),
            })
            .collect();
        families.sort_by_key(|f| Reverse(f.count));

        let tactical = codes.iter().filter(|c| c.family().is_tactical()).count();
        let positional = codes.iter().filter(|c| c.family().is_positional()).count();

        Self {
            total_games,
            coded_games,
            coverage: ratio(coded_games, total_games),
            unique_openings,
            favorite_opening: opening_counts.first().cloned(),
            families,
            top_openings: opening_counts.into_iter().take(top_n).collect(),
            tactical_share: share(tactical),
            positional_share: share(positional),
            diversity: share(unique_openings),
        }
    }

    /// Study advice for this repertoire, empty when no game carries an opening code.
    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        if self.coded_games == 0 {
            return vec![];
        }
        let mut advice = vec![];
        if self.tactical_share < MIN_FAMILY_SHARE {
            advice.push(Recommendation::StudyTacticalOpenings);
        }
        if self.positional_share < MIN_FAMILY_SHARE {
            advice.push(Recommendation::StudyPositionalOpenings);
        }
        if self.diversity < MIN_DIVERSITY {
            advice.push(Recommendation::BroadenRepertoire);
        }
        if self.unique_openings < MIN_UNIQUE_OPENINGS {
            advice.push(Recommendation::LearnMoreVariations);
        }
        advice
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}
