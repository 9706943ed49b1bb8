//! A single pairing between two players and its write-once result.

use thiserror::Error;

use crate::player::ChessId;
use crate::points::Points;
use crate::registry::PlayerRegistry;

/// Errors that can occur when recording a match result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("match result already set")]
    AlreadyCompleted,

    #[error("invalid result selector {0}: use 0 (player 1), 1 (player 2) or 2 (tie)")]
    InvalidResult(u8),

    #[error("player {0} is not in the player registry")]
    UnknownPlayer(ChessId),
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Tie,
}

impl Outcome {
    /// Converts a numeric selector: 0 for player 1, 1 for player 2, 2 for a tie.
    pub fn from_selector(selector: u8) -> Result<Self, MatchError> {
        match selector {
            0 => Ok(Outcome::Player1Wins),
            1 => Ok(Outcome::Player2Wins),
            2 => Ok(Outcome::Tie),
            other => Err(MatchError::InvalidResult(other)),
        }
    }
}

/// Two players paired in a round.
///
/// `winner` is `None` both before the match is played and after a tie;
/// `completed` tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    player1: ChessId,
    player2: ChessId,
    completed: bool,
    winner: Option<ChessId>,
}

impl Match {
    /// Creates an unplayed match.
    pub fn new(player1: ChessId, player2: ChessId) -> Self {
        Match {
            player1,
            player2,
            completed: false,
            winner: None,
        }
    }

    pub fn player1(&self) -> &ChessId {
        &self.player1
    }

    pub fn player2(&self) -> &ChessId {
        &self.player2
    }

    /// Returns true once a result has been recorded.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The winner, or `None` for an unplayed or tied match.
    pub fn winner(&self) -> Option<&ChessId> {
        self.winner.as_ref()
    }

    /// The recorded outcome, or `None` if the match is not played yet.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.completed {
            return None;
        }
        Some(match &self.winner {
            Some(id) if *id == self.player1 => Outcome::Player1Wins,
            Some(_) => Outcome::Player2Wins,
            None => Outcome::Tie,
        })
    }

    /// Returns true if `chess_id` plays in this match.
    pub fn involves(&self, chess_id: &str) -> bool {
        self.player1.as_str() == chess_id || self.player2.as_str() == chess_id
    }

    /// Records the result and awards points.
    ///
    /// A win is worth one point, a tie half a point to each player. A result
    /// can be set only once.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::AlreadyCompleted`] if a result is already
    /// recorded and [`MatchError::UnknownPlayer`] if either player is missing
    /// from `registry`. Nothing is modified on error.
    pub fn set_result(
        &mut self,
        outcome: Outcome,
        registry: &mut PlayerRegistry,
    ) -> Result<(), MatchError> {
        if self.completed {
            return Err(MatchError::AlreadyCompleted);
        }
        for id in [&self.player1, &self.player2] {
            if !registry.contains(id.as_str()) {
                return Err(MatchError::UnknownPlayer(id.clone()));
            }
        }

        match outcome {
            Outcome::Player1Wins => {
                registry.award(self.player1.as_str(), Points::ONE);
                self.winner = Some(self.player1.clone());
            }
            Outcome::Player2Wins => {
                registry.award(self.player2.as_str(), Points::ONE);
                self.winner = Some(self.player2.clone());
            }
            Outcome::Tie => {
                registry.award(self.player1.as_str(), Points::HALF);
                registry.award(self.player2.as_str(), Points::HALF);
                self.winner = None;
            }
        }
        self.completed = true;
        Ok(())
    }
}
