//! Player identity and score.

use std::borrow::Borrow;
use std::fmt;

use crate::points::Points;

/// A player's unique, case-sensitive chess identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChessId(String);

impl ChessId {
    /// Creates an identifier from any string.
    pub fn new(id: impl Into<String>) -> Self {
        ChessId(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChessId {
    fn from(id: &str) -> Self {
        ChessId(id.to_string())
    }
}

impl From<String> for ChessId {
    fn from(id: String) -> Self {
        ChessId(id)
    }
}

impl Borrow<str> for ChessId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChessId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A club member who can be registered in tournaments.
///
/// `points` is a running total across every tournament the player takes
/// part in; it is not reset per tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Unique identifier.
    pub chess_id: ChessId,
    /// Display name, also the standings tie-breaker.
    pub name: String,
    pub email: String,
    /// Birthday in `dd-mm-yyyy` form.
    pub birthday: String,
    /// Cumulative score.
    pub points: Points,
}

impl Player {
    /// Name given to players synthesized for unknown ids.
    pub const PLACEHOLDER_NAME: &'static str = "Unaffiliated Player";
    /// E-mail given to players synthesized for unknown ids.
    pub const PLACEHOLDER_EMAIL: &'static str = "N/A";
    /// Birthday given to players synthesized for unknown ids.
    pub const PLACEHOLDER_BIRTHDAY: &'static str = "01-01-1900";

    /// Creates a player with zero points.
    pub fn new(
        chess_id: impl Into<ChessId>,
        name: impl Into<String>,
        email: impl Into<String>,
        birthday: impl Into<String>,
    ) -> Self {
        Player {
            chess_id: chess_id.into(),
            name: name.into(),
            email: email.into(),
            birthday: birthday.into(),
            points: Points::ZERO,
        }
    }

    /// Creates a stand-in for an id that no club roster knows about.
    pub fn placeholder(chess_id: impl Into<ChessId>) -> Self {
        Player::new(
            chess_id,
            Self::PLACEHOLDER_NAME,
            Self::PLACEHOLDER_EMAIL,
            Self::PLACEHOLDER_BIRTHDAY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_new_player_starts_with_zero_points() {
        let player = Player::new("AB12345", "Alice", "alice@example.com", "01-02-1990");
        assert_eq!(player.chess_id.as_str(), "AB12345");
        assert_eq!(player.points, Points::ZERO);
    }

    #[test]
    fn test_placeholder_uses_sentinel_fields() {
        let player = Player::placeholder("ZZ99999");
        assert_eq!(player.chess_id, ChessId::from("ZZ99999"));
        assert_eq!(player.name, "Unaffiliated Player");
        assert_eq!(player.email, "N/A");
        assert_eq!(player.birthday, "01-01-1900");
    }

    #[test]
    fn test_chess_id_is_case_sensitive() {
        assert_ne!(ChessId::from("ab123"), ChessId::from("AB123"));
    }

    #[test]
    fn test_chess_id_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ChessId::from("AB123"), 1);
        assert_eq!(map.get("AB123"), Some(&1));
    }
}
