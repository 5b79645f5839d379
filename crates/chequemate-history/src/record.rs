//! Game Record Normalizer.
//!
//! Converts a [`RawGame`] into a [`GameRecord`] seen from one target player's side.

use serde::{Deserialize, Serialize};

use crate::{EcoCode, NormalizeError, RawGame, RawPlayerSide, canonical_username};

/// Which side the target player had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    /// First mover.
    White,
    /// Second mover.
    Black,
}

/// Outcome of a game for the target player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Win,
    Checkmated,
    Timeout,
    Resigned,
    /// Draws of every kind, abandonment, and result strings not recognized above.
    DrawOrOther,
}

impl GameResult {
    /// Maps a provider result string.
    ///
    /// Only `checkmated`, `timeout` and `resigned` count as losses. Everything else that
    /// is not `win` (`agreed`, `repetition`, `stalemate`, `abandoned`, ...) maps to
    /// [`GameResult::DrawOrOther`].
    #[must_use]
    pub fn from_provider(result: &str) -> Self {
        match result {
            "win" => Self::Win,
            "checkmated" => Self::Checkmated,
            "timeout" => Self::Timeout,
            "resigned" => Self::Resigned,
            _ => Self::DrawOrOther,
        }
    }

    #[must_use]
    pub fn is_loss(self) -> bool {
        matches!(self, Self::Checkmated | Self::Timeout | Self::Resigned)
    }
}

/// A normalized game from the target player's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub color: PlayerColor,
    pub own_rating: u32,
    pub opponent_rating: u32,
    pub result: GameResult,
    pub time_control: String,
    pub opening: Option<EcoCode>,
}

impl GameRecord {
    /// Normalizes `raw` for the player `username`.
    ///
    /// The side is chosen by case-insensitive username comparison, white first. Fails
    /// with [`NormalizeError::AmbiguousPlayerRecord`] when neither side is the player and
    /// with [`NormalizeError::MissingField`] when a required field is absent. A missing
    /// PGN or opening tag only leaves [`GameRecord::opening`] empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chequemate_history::{GameRecord, GameResult, PlayerColor, RawGame, RawPlayerSide};
    /// let side = |name: &str, rating, result: &str| RawPlayerSide {
    ///     username: Some(name.to_owned()),
    ///     rating: Some(rating),
    ///     result: Some(result.to_owned()),
    /// };
    /// let raw = RawGame {
    ///     pgn: Some("[ECO \"D02\"]".to_owned()),
    ///     time_control: Some("600".to_owned()),
    ///     white: Some(side("alice", 1500, "resigned")),
    ///     black: Some(side("Bob", 1520, "win")),
    ///     ..RawGame::default()
    /// };
    /// let record = GameRecord::from_raw(&raw, "bob").unwrap();
    /// assert_eq!(record.color, PlayerColor::Black);
    /// assert_eq!(record.own_rating, 1520);
    /// assert_eq!(record.opponent_rating, 1500);
    /// assert_eq!(record.result, GameResult::Win);
    /// ```
    pub fn from_raw(raw: &RawGame, username: &str) -> Result<Self, NormalizeError> {
        let missing = |field| NormalizeError::MissingField {
            game: raw.display_id(),
            field,
        };
        let white = raw.white.as_ref().ok_or_else(|| missing("white"))?;
        let black = raw.black.as_ref().ok_or_else(|| missing("black"))?;

        let target = canonical_username(username);
        let is_target = |side: &RawPlayerSide| -> Result<bool, NormalizeError> {
            let name = side.username.as_deref().ok_or_else(|| missing("username"))?;
            Ok(canonical_username(name) == target)
        };
        let (color, own, opponent) = if is_target(white)? {
            (PlayerColor::White, white, black)
        } else if is_target(black)? {
            (PlayerColor::Black, black, white)
        } else {
            return Err(NormalizeError::AmbiguousPlayerRecord {
                username: username.to_owned(),
                game: raw.display_id(),
            });
        };

        let own_rating = own.rating.ok_or_else(|| missing("rating"))?;
        let opponent_rating = opponent.rating.ok_or_else(|| missing("rating"))?;
        let result = own.result.as_deref().ok_or_else(|| missing("result"))?;
        let time_control = raw
            .time_control
            .clone()
            .ok_or_else(|| missing("time_control"))?;
        let opening = raw.pgn.as_deref().and_then(EcoCode::from_pgn);

        Ok(Self {
            color,
            own_rating,
            opponent_rating,
            result: GameResult::from_provider(result),
            time_control,
            opening,
        })
    }

    /// Opponent rating minus own rating.
    #[must_use]
    pub fn rating_gap(&self) -> i64 {
        i64::from(self.opponent_rating) - i64::from(self.own_rating)
    }
}
