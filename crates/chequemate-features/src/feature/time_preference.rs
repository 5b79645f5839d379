use chequemate_stats::frequency;

use crate::{GameWindow, TimePreference};

/// Fraction of the window's games played at each time-control label.
///
/// Order-independent; an empty window gives an empty preference.
#[must_use]
pub fn time_preference(window: &GameWindow) -> TimePreference {
    let fractions = frequency::fractions(window.iter().map(|game| game.time_control.clone()));
    TimePreference::new(fractions)
}
