//! The window of recent games features are computed from.

use chequemate_history::{GameRecord, NormalizeError, RawGame};

/// Normalized games of one player, most recent first.
///
/// Index 0 is the newest game. Providers deliver games oldest first, so windows built
/// from provider output are reversed on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameWindow {
    games: Vec<GameRecord>,
}

impl GameWindow {
    /// Builds a window from games already ordered newest first.
    #[must_use]
    pub fn from_most_recent_first(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    /// Builds a window from games in chronological order (oldest first).
    #[must_use]
    pub fn from_chronological(mut games: Vec<GameRecord>) -> Self {
        games.reverse();
        Self { games }
    }

    /// Normalizes provider games for `username` and builds the window.
    ///
    /// `raw` is in provider order (oldest first). Games that fail normalization are
    /// excluded from the window, logged, and returned alongside it.
    #[must_use]
    pub fn from_raw_games(username: &str, raw: &[RawGame]) -> (Self, Vec<NormalizeError>) {
        let mut games = Vec::with_capacity(raw.len());
        let mut excluded = vec![];
        for game in raw {
            match GameRecord::from_raw(game, username) {
                Ok(record) => games.push(record),
                Err(e) => {
                    log::warn!("excluding game for {username}: {e}");
                    excluded.push(e);
                }
            }
        }
        (Self::from_chronological(games), excluded)
    }

    #[must_use]
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// The most recent game, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&GameRecord> {
        self.games.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter()
    }
}

#[cfg(test)]
mod tests {
    use chequemate_history::RawPlayerSide;

    use super::*;

    fn raw(url: &str, white: &str, black: &str) -> RawGame {
        let side = |name: &str, rating| RawPlayerSide {
            username: Some(name.to_owned()),
            rating: Some(rating),
            result: Some("win".to_owned()),
        };
        RawGame {
            url: Some(url.to_owned()),
            time_control: Some("600".to_owned()),
            white: Some(side(white, 1500)),
            black: Some(side(black, 1400)),
            ..RawGame::default()
        }
    }

    #[test]
    fn test_from_raw_games_reverses_and_excludes() {
        let games = [
            raw("g1", "me", "x"),
            raw("g2", "y", "z"),
            raw("g3", "w", "ME"),
        ];
        let (window, excluded) = GameWindow::from_raw_games("me", &games);

        assert_eq!(window.len(), 2);
        // newest first: g3 (black, 1400) then g1 (white, 1500)
        assert_eq!(window.latest().unwrap().own_rating, 1400);
        assert_eq!(window.games()[1].own_rating, 1500);

        assert_eq!(excluded.len(), 1);
        assert!(matches!(
            &excluded[0],
            NormalizeError::AmbiguousPlayerRecord { game, .. } if game == "g2"
        ));
    }

    #[test]
    fn test_empty_window() {
        let (window, excluded) = GameWindow::from_raw_games("me", &[]);
        assert!(window.is_empty());
        assert!(window.latest().is_none());
        assert!(excluded.is_empty());
    }
}
