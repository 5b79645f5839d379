//! Opening classification codes (ECO).
//!
//! An [`EcoCode`] is a family letter `A`–`E` followed by a two-digit number `00`–`99`,
//! giving exactly [`ECO_CODE_COUNT`] codes. Each code has a stable index in
//! `0..ECO_CODE_COUNT`:
//!
//! ```text
//! index = family * 100 + number
//! A00 -> 0, A99 -> 99, B00 -> 100, ..., E99 -> 499
//! ```
//!
//! The index is the slot a code occupies in every style vector, so writers and readers
//! of stored snapshots agree on the mapping without exchanging it.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of distinct opening codes (5 families x 100 numbers).
pub const ECO_CODE_COUNT: usize = 500;

static ECO_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[ECO "([A-E][0-9]{2})"\]"#).expect("valid ECO tag regex"));

/// Opening family, the letter part of an [`EcoCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EcoFamily {
    A,
    B,
    C,
    D,
    E,
}

impl EcoFamily {
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            _ => None,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }

    /// Common name of the opening family.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::A => "Flank",
            Self::B => "Semi-Open",
            Self::C => "Open",
            Self::D => "Closed",
            Self::E => "Indian",
        }
    }

    /// Whether the family is counted as tactical (B, C) in style profiles.
    #[must_use]
    pub fn is_tactical(self) -> bool {
        matches!(self, Self::B | Self::C)
    }

    /// Whether the family is counted as positional (D, E) in style profiles.
    #[must_use]
    pub fn is_positional(self) -> bool {
        matches!(self, Self::D | Self::E)
    }

    fn ordinal(self) -> u16 {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
        }
    }
}

impl fmt::Display for EcoFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single opening code such as `B90`.
///
/// Ordering follows the canonical enumeration (`A00` < `A01` < ... < `E99`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EcoCode(u16);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid ECO code '{code}' (expected a letter A-E followed by two digits)")]
pub struct ParseEcoCodeError {
    code: String,
}

impl EcoCode {
    #[must_use]
    pub fn new(family: EcoFamily, number: u8) -> Option<Self> {
        (number < 100).then(|| Self(family.ordinal() * 100 + u16::from(number)))
    }

    /// Returns the code stored at `index` of the canonical enumeration.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= ECO_CODE_COUNT {
            return None;
        }
        u16::try_from(index).ok().map(Self)
    }

    /// Position of this code in the canonical enumeration and in style vectors.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn family(self) -> EcoFamily {
        EcoFamily::ALL[usize::from(self.0 / 100)]
    }

    #[must_use]
    pub fn number(self) -> u8 {
        // always < 100
        u8::try_from(self.0 % 100).unwrap_or_default()
    }

    /// Iterates all codes in canonical order, `A00` through `E99`.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ECO_CODE_COUNT).filter_map(Self::from_index)
    }

    /// Extracts the opening code from a PGN text blob.
    ///
    /// Looks for a tag of the form `[ECO "B90"]`. A missing or malformed tag yields
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chequemate_history::EcoCode;
    /// let pgn = "[Event \"Live Chess\"]\n[ECO \"C50\"]\n\n1. e4 e5";
    /// assert_eq!(EcoCode::from_pgn(pgn).map(|c| c.to_string()), Some("C50".to_owned()));
    /// assert_eq!(EcoCode::from_pgn("[ECO \"Z12\"]"), None);
    /// ```
    #[must_use]
    pub fn from_pgn(pgn: &str) -> Option<Self> {
        let caps = ECO_TAG_RE.captures(pgn)?;
        caps[1].parse().ok()
    }
}

impl fmt::Display for EcoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.family(), self.number())
    }
}

impl FromStr for EcoCode {
    type Err = ParseEcoCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEcoCodeError { code: s.to_owned() };
        let mut chars = s.chars();
        let family = chars.next().and_then(EcoFamily::from_letter).ok_or_else(err)?;
        let digits = chars.as_str();
        if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let number = digits.parse::<u8>().map_err(|_| err())?;
        Self::new(family, number).ok_or_else(err)
    }
}

impl TryFrom<String> for EcoCode {
    type Error = ParseEcoCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EcoCode> for String {
    fn from(code: EcoCode) -> Self {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_has_500_codes_in_canonical_order() {
        let codes: Vec<_> = EcoCode::all().map(|c| c.to_string()).collect();
        assert_eq!(codes.len(), ECO_CODE_COUNT);
        assert_eq!(codes.len(), 500);
        assert_eq!(codes[0], "A00");
        assert_eq!(codes[99], "A99");
        assert_eq!(codes[100], "B00");
        assert_eq!(codes[499], "E99");
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, code) in EcoCode::all().enumerate() {
            assert_eq!(code.index(), i);
            assert_eq!(EcoCode::from_index(i), Some(code));
        }
        assert_eq!(EcoCode::from_index(500), None);
    }

    #[test]
    fn test_parse() {
        let code: EcoCode = "C42".parse().unwrap();
        assert_eq!(code.family(), EcoFamily::C);
        assert_eq!(code.number(), 42);
        assert_eq!(code.index(), 242);

        for bad in ["", "C", "C4", "C420", "F00", "c42", "C4x", "C+1"] {
            assert!(bad.parse::<EcoCode>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_from_pgn() {
        let pgn = "[Event \"Live Chess\"]\n[Site \"Chess.com\"]\n[ECO \"B01\"]\n[ECOUrl \"https://www.chess.com/openings/Scandinavian-Defense\"]\n\n1. e4 d5";
        assert_eq!(EcoCode::from_pgn(pgn), "B01".parse().ok());
    }

    #[test]
    fn test_from_pgn_missing_or_malformed_tag() {
        assert_eq!(EcoCode::from_pgn(""), None);
        assert_eq!(EcoCode::from_pgn("[Event \"Live Chess\"]"), None);
        assert_eq!(EcoCode::from_pgn("[ECO \"?\"]"), None);
        assert_eq!(EcoCode::from_pgn("[ECO \"F10\"]"), None);
        assert_eq!(EcoCode::from_pgn("[ECO \"A1\"]"), None);
        assert_eq!(EcoCode::from_pgn("[ECO B20]"), None);
    }

    #[test]
    fn test_serde_as_string() {
        let code: EcoCode = "E97".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"E97\"");
        let back: EcoCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<EcoCode>("\"X00\"").is_err());
    }
}
