//! A round: the batch of matches generated together.

use crate::game_match::Match;
use crate::player::ChessId;

/// The matches of one tournament round, plus the player who sat out.
///
/// The set of matches is fixed at construction; individual matches are
/// updated in place through [`Round::match_mut`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    matches: Vec<Match>,
    bye: Option<ChessId>,
}

impl Round {
    /// Creates a round without a bye.
    pub fn new(matches: Vec<Match>) -> Self {
        Round { matches, bye: None }
    }

    /// Creates a round in which `bye` sat out.
    pub fn with_bye(matches: Vec<Match>, bye: Option<ChessId>) -> Self {
        Round { matches, bye }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Returns a match by zero-based position for recording its result.
    pub fn match_mut(&mut self, index: usize) -> Option<&mut Match> {
        self.matches.get_mut(index)
    }

    /// The player who received a bye in this round, if any.
    pub fn bye(&self) -> Option<&ChessId> {
        self.bye.as_ref()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns true when every match has a recorded result.
    ///
    /// Completion is judged by each match's `completed` flag, never by its
    /// winner: a tied match has no winner but is complete.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_match::Outcome;
    use crate::player::Player;
    use crate::registry::PlayerRegistry;

    fn registry() -> PlayerRegistry {
        let mut registry = PlayerRegistry::new();
        for (id, name) in [("A", "Alice"), ("B", "Bob"), ("C", "Carol"), ("D", "Dave")] {
            registry.insert(Player::new(id, name, "x@x.org", "01-01-1990"));
        }
        registry
    }

    fn round() -> Round {
        Round::new(vec![
            Match::new("A".into(), "B".into()),
            Match::new("C".into(), "D".into()),
        ])
    }

    #[test]
    fn test_round_with_unplayed_match_is_incomplete() {
        let mut registry = registry();
        let mut round = round();
        assert!(!round.is_complete());

        round
            .match_mut(0)
            .unwrap()
            .set_result(Outcome::Player1Wins, &mut registry)
            .unwrap();
        assert!(!round.is_complete());
    }

    #[test]
    fn test_round_with_tie_counts_as_complete() {
        let mut registry = registry();
        let mut round = round();
        round
            .match_mut(0)
            .unwrap()
            .set_result(Outcome::Player2Wins, &mut registry)
            .unwrap();
        round
            .match_mut(1)
            .unwrap()
            .set_result(Outcome::Tie, &mut registry)
            .unwrap();

        assert!(round.is_complete());
    }

    #[test]
    fn test_empty_round_is_complete() {
        assert!(Round::new(Vec::new()).is_complete());
    }

    #[test]
    fn test_bye_is_recorded() {
        let mut round =
            Round::with_bye(vec![Match::new("A".into(), "B".into())], Some("C".into()));
        assert_eq!(round.bye(), Some(&ChessId::from("C")));
        assert_eq!(round.len(), 1);
        assert!(round.match_mut(1).is_none());
    }
}
