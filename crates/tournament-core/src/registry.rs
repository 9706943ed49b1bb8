//! Ownership of player records.
//!
//! Tournaments and matches refer to players by [`ChessId`]; the registry is
//! the single owner of each [`Player`] and therefore of every point total.

use std::collections::HashMap;

use crate::player::{ChessId, Player};
use crate::points::Points;

/// Every known player, in insertion order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    index: HashMap<ChessId, usize>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if no players are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Adds a player.
    ///
    /// Returns false and leaves the registry unchanged if a player with the
    /// same id already exists.
    pub fn insert(&mut self, player: Player) -> bool {
        if self.index.contains_key(&player.chess_id) {
            return false;
        }
        self.index.insert(player.chess_id.clone(), self.players.len());
        self.players.push(player);
        true
    }

    /// Looks up a player by id.
    #[must_use]
    pub fn find_player(&self, chess_id: &str) -> Option<&Player> {
        self.index.get(chess_id).map(|&i| &self.players[i])
    }

    /// Looks up a player by id for modification.
    pub fn find_player_mut(&mut self, chess_id: &str) -> Option<&mut Player> {
        match self.index.get(chess_id) {
            Some(&i) => Some(&mut self.players[i]),
            None => None,
        }
    }

    /// Returns true if a player with this id exists.
    #[must_use]
    pub fn contains(&self, chess_id: &str) -> bool {
        self.index.contains_key(chess_id)
    }

    /// Adds points to a player's total. Returns false if the id is unknown.
    pub fn award(&mut self, chess_id: &str, points: Points) -> bool {
        match self.find_player_mut(chess_id) {
            Some(player) => {
                player.points += points;
                true
            }
            None => false,
        }
    }

    /// Iterates over all players in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}
