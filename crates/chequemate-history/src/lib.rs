//! Match history ingestion for Chequemate.
//!
//! This crate owns everything between the external history provider and the feature
//! extractor:
//!
//! - [`raw`] - serde model of archived games as the provider serves them
//! - [`eco`] - the canonical 500-code opening enumeration and PGN tag parsing
//! - [`record`] - the Game Record Normalizer turning a [`RawGame`] into a typed [`GameRecord`]
//! - [`provider`] - the [`HistoryProvider`] contract plus file-backed and in-memory providers
//!
//! Raw games are validated exactly once, in [`GameRecord::from_raw`]. Nothing downstream
//! touches the loosely-typed provider data.

pub use self::{eco::*, provider::*, raw::*, record::*};

pub mod eco;
pub mod provider;
pub mod raw;
pub mod record;

/// Canonical form of a username, used wherever usernames are compared or used as keys.
///
/// Usernames are case-insensitive, so `Alice` and `alice` are the same player.
#[must_use]
pub fn canonical_username(username: &str) -> String {
    username.to_lowercase()
}

/// Failure to turn a raw game into a [`GameRecord`].
///
/// A game failing normalization is excluded from the extraction run; it never aborts
/// the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum NormalizeError {
    #[display("game {game} lists player '{username}' on neither side")]
    AmbiguousPlayerRecord { username: String, game: String },
    #[display("game {game} is missing required field '{field}'")]
    MissingField { game: String, field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_username_ignores_case() {
        assert_eq!(canonical_username("Alice"), "alice");
        assert_eq!(canonical_username("ALICE"), canonical_username("alice"));
        assert_eq!(canonical_username("bob_42"), "bob_42");
    }
}
