//! Greedy Swiss-style pairing.
//!
//! Players are paired in standings order, each with the nearest lower-ranked
//! player they have not met yet. This is a local heuristic, not a global
//! matching: an early choice can force a rematch further down even when a
//! rematch-free pairing of the whole field exists.

use std::collections::HashSet;

use crate::player::ChessId;
use crate::round::Round;

/// The set of player pairs that have already met, ignoring order.
#[derive(Debug, Clone, Default)]
pub struct PairingHistory {
    pairs: HashSet<(ChessId, ChessId)>,
}

impl PairingHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every pairing from the given rounds.
    pub fn from_rounds(rounds: &[Round]) -> Self {
        let mut history = Self::new();
        for m in rounds.iter().flat_map(Round::matches) {
            history.record(m.player1(), m.player2());
        }
        history
    }

    /// Marks two players as having met.
    pub fn record(&mut self, a: &ChessId, b: &ChessId) {
        self.pairs.insert(Self::key(a, b));
    }

    /// Returns true if the two players have met, in either order.
    #[must_use]
    pub fn have_played(&self, a: &ChessId, b: &ChessId) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Number of distinct pairings recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn key(a: &ChessId, b: &ChessId) -> (ChessId, ChessId) {
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }
}

/// Pairs players walking down `pool`, which must already be in standings order.
///
/// For each unpaired player the nearest later player not yet met is swapped
/// into the adjacent slot. If every later player has been met, the adjacent
/// player is taken anyway, so rematches happen only as a last resort.
///
/// With an odd-sized pool the last player is left out; callers remove the
/// bye player beforehand.
pub fn pair_players(mut pool: Vec<ChessId>, history: &PairingHistory) -> Vec<(ChessId, ChessId)> {
    let mut pairs = Vec::with_capacity(pool.len() / 2);
    let mut i = 0;

    while i + 1 < pool.len() {
        let fresh = (i + 1..pool.len()).find(|&j| !history.have_played(&pool[i], &pool[j]));
        match fresh {
            Some(j) => pool.swap(i + 1, j),
            None => tracing::debug!(
                player = %pool[i],
                opponent = %pool[i + 1],
                "no unplayed opponent left, allowing rematch"
            ),
        }
        pairs.push((pool[i].clone(), pool[i + 1].clone()));
        i += 2;
    }

    pairs
}
