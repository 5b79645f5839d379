//! Raw archived games as served by the history provider.
//!
//! The provider publishes one archive per month:
//!
//! ```json
//! {
//!   "games": [
//!     {
//!       "url": "https://www.chess.com/game/live/123",
//!       "pgn": "[Event \"Live Chess\"]\n[ECO \"C50\"]\n...",
//!       "time_control": "600",
//!       "end_time": 1700000000,
//!       "white": { "username": "alice", "rating": 1510, "result": "win" },
//!       "black": { "username": "bob", "rating": 1490, "result": "checkmated" }
//!     }
//!   ]
//! }
//! ```
//!
//! Every field is optional at this layer and unknown fields are ignored. Presence of the
//! fields the pipeline needs is checked by [`GameRecord::from_raw`](crate::GameRecord::from_raw),
//! so one malformed game never prevents the rest of an archive from loading.

use serde::{Deserialize, Serialize};

/// One monthly archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArchive {
    #[serde(default)]
    pub games: Vec<RawGame>,
}

/// One game, exactly as the provider reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white: Option<RawPlayerSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black: Option<RawPlayerSide>,
}

/// Per-color sub-object of a [`RawGame`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPlayerSide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl RawGame {
    /// Identifier used in diagnostics: the game URL when present, otherwise a placeholder.
    #[must_use]
    pub fn display_id(&self) -> String {
        match (&self.url, self.end_time) {
            (Some(url), _) => url.clone(),
            (None, Some(end_time)) => format!("<ended at {end_time}>"),
            (None, None) => "<unknown game>".to_owned(),
        }
    }
}
