//! Game genres.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string names no known [`Genre`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown genre: {0}")]
pub struct UnknownGenre(pub String);

/// The fixed set of genres a catalog item can belong to.
///
/// Genres serialize as their display name ("Action", "RPG", ...) and parse
/// case-insensitively, so `"rpg"`, `"RPG"` and `"Rpg"` are the same genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Genre {
    Action,
    Adventure,
    Rpg,
    Strategy,
    Sports,
    Racing,
    Shooter,
    Simulation,
}

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Self; 8] = [
        Self::Action,
        Self::Adventure,
        Self::Rpg,
        Self::Strategy,
        Self::Sports,
        Self::Racing,
        Self::Shooter,
        Self::Simulation,
    ];

    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Rpg => "RPG",
            Self::Strategy => "Strategy",
            Self::Sports => "Sports",
            Self::Racing => "Racing",
            Self::Shooter => "Shooter",
            Self::Simulation => "Simulation",
        }
    }

    /// Check whether `name` names this genre, ignoring case.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.matches(s))
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

impl TryFrom<String> for Genre {
    type Error = UnknownGenre;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> Self {
        genre.as_str().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("action".parse::<Genre>().unwrap(), Genre::Action);
        assert_eq!("ACTION".parse::<Genre>().unwrap(), Genre::Action);
        assert_eq!("rpg".parse::<Genre>().unwrap(), Genre::Rpg);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "puzzle".parse::<Genre>().unwrap_err();
        assert_eq!(err, UnknownGenre("puzzle".to_string()));
    }

    #[test]
    fn test_serde_uses_display_name() {
        assert_eq!(serde_json::to_string(&Genre::Rpg).unwrap(), "\"RPG\"");
        let parsed: Genre = serde_json::from_str("\"racing\"").unwrap();
        assert_eq!(parsed, Genre::Racing);
        assert!(serde_json::from_str::<Genre>("\"Cooking\"").is_err());
    }
}
