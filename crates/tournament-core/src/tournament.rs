//! Tournaments and round progression.

use chrono::NaiveDate;
use thiserror::Error;

use crate::dates::TournamentDates;
use crate::game_match::{Match, MatchError, Outcome};
use crate::pairing::{pair_players, PairingHistory};
use crate::player::{ChessId, Player};
use crate::points::Points;
use crate::registry::PlayerRegistry;
use crate::round::Round;

/// Errors that can occur when operating on a tournament.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    #[error("at least two registered players are needed to pair a round, found {0}")]
    InsufficientPlayers(usize),

    #[error("player {0} is already registered in this tournament")]
    DuplicatePlayer(ChessId),

    #[error("player {0} is not in the player registry")]
    UnknownPlayer(ChessId),

    #[error("round {0} has not been generated")]
    RoundNotFound(usize),

    #[error("round {round} has no match number {number}")]
    MatchNotFound { round: usize, number: usize },

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Where a tournament is in its round progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentState {
    /// No round generated yet.
    NotStarted,
    /// Some but not all rounds generated.
    InProgress,
    /// All rounds generated.
    Finished,
}

/// A Swiss-style tournament.
///
/// Players are referenced by id; their records and point totals live in a
/// [`PlayerRegistry`] passed to the operations that need them. The number of
/// generated rounds is always `rounds().len()`, so the current round counter
/// cannot drift from the round list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    pub name: String,
    pub venue: String,
    dates: TournamentDates,
    number_of_rounds: u32,
    completed: bool,
    players: Vec<ChessId>,
    rounds: Vec<Round>,
}

impl Tournament {
    /// Creates a tournament with no players and no rounds.
    pub fn new(
        name: impl Into<String>,
        venue: impl Into<String>,
        dates: TournamentDates,
        number_of_rounds: u32,
    ) -> Self {
        Tournament {
            name: name.into(),
            venue: venue.into(),
            dates,
            number_of_rounds,
            completed: false,
            players: Vec::new(),
            rounds: Vec::new(),
        }
    }

    /// Rebuilds a tournament from persisted parts.
    ///
    /// Duplicate ids in `players` are dropped, keeping the first occurrence.
    pub fn restore(
        name: impl Into<String>,
        venue: impl Into<String>,
        dates: TournamentDates,
        number_of_rounds: u32,
        completed: bool,
        players: Vec<ChessId>,
        rounds: Vec<Round>,
    ) -> Self {
        let mut tournament = Tournament::new(name, venue, dates, number_of_rounds);
        tournament.completed = completed;
        for id in players {
            if !tournament.players.contains(&id) {
                tournament.players.push(id);
            }
        }
        tournament.rounds = rounds;
        tournament
    }

    pub fn dates(&self) -> &TournamentDates {
        &self.dates
    }

    /// Start date as `dd-mm-yyyy`.
    pub fn start_date(&self) -> &str {
        self.dates.from_text()
    }

    /// End date as `dd-mm-yyyy`.
    pub fn end_date(&self) -> &str {
        self.dates.to_text()
    }

    /// Target number of rounds, fixed at creation.
    pub fn number_of_rounds(&self) -> u32 {
        self.number_of_rounds
    }

    /// Number of rounds generated so far.
    pub fn current_round(&self) -> u32 {
        u32::try_from(self.rounds.len()).unwrap_or(u32::MAX)
    }

    /// Set once round generation is requested after the last round.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Registered players in registration order.
    pub fn players(&self) -> &[ChessId] {
        &self.players
    }

    /// Generated rounds; index 0 is round 1.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn state(&self) -> TournamentState {
        match self.current_round() {
            0 if self.number_of_rounds > 0 => TournamentState::NotStarted,
            n if n >= self.number_of_rounds => TournamentState::Finished,
            _ => TournamentState::InProgress,
        }
    }

    /// Matches of the latest round, empty before the first round.
    pub fn current_round_matches(&self) -> &[Match] {
        self.rounds.last().map(Round::matches).unwrap_or(&[])
    }

    /// Returns true if the tournament has not ended by `today` and still has
    /// rounds to play or review.
    pub fn is_active_or_upcoming(&self, today: NaiveDate) -> bool {
        today <= self.dates.end() && self.current_round() <= self.number_of_rounds
    }

    /// Returns true if `chess_id` is registered.
    pub fn is_registered(&self, chess_id: &str) -> bool {
        self.players.iter().any(|p| p.as_str() == chess_id)
    }

    /// Adds a player to the tournament.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::DuplicatePlayer`] if the id is already
    /// registered.
    pub fn register_player(&mut self, chess_id: ChessId) -> Result<(), TournamentError> {
        if self.is_registered(chess_id.as_str()) {
            return Err(TournamentError::DuplicatePlayer(chess_id));
        }
        self.players.push(chess_id);
        Ok(())
    }

    /// Returns the registered players ordered by descending points, ties
    /// broken by ascending name.
    ///
    /// The sort is stable, so players with equal points and names keep
    /// registration order. Ids missing from `registry` are skipped.
    pub fn sorted_players_by_points<'r>(&self, registry: &'r PlayerRegistry) -> Vec<&'r Player> {
        let mut standings: Vec<&Player> = self
            .players
            .iter()
            .filter_map(|id| registry.find_player(id.as_str()))
            .collect();
        standings.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
        standings
    }

    /// Every pairing played so far in this tournament.
    pub fn pairing_history(&self) -> PairingHistory {
        PairingHistory::from_rounds(&self.rounds)
    }

    /// Pairs the next round from the current standings.
    ///
    /// With an odd number of players the lowest-ranked one sits out and is
    /// awarded one point immediately. The remaining players are paired by
    /// [`pair_players`].
    ///
    /// Returns `Ok(None)` and marks the tournament completed when all rounds
    /// have already been generated.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::InsufficientPlayers`] with fewer than two
    /// players and [`TournamentError::UnknownPlayer`] if a registered id is
    /// missing from `registry`. Nothing is modified on error.
    pub fn generate_next_round(
        &mut self,
        registry: &mut PlayerRegistry,
    ) -> Result<Option<&Round>, TournamentError> {
        if self.current_round() >= self.number_of_rounds {
            self.completed = true;
            return Ok(None);
        }
        if self.players.len() < 2 {
            return Err(TournamentError::InsufficientPlayers(self.players.len()));
        }
        if let Some(missing) = self.players.iter().find(|id| !registry.contains(id.as_str())) {
            return Err(TournamentError::UnknownPlayer(missing.clone()));
        }

        let mut pool: Vec<ChessId> = self
            .sorted_players_by_points(registry)
            .into_iter()
            .map(|p| p.chess_id.clone())
            .collect();
        let history = self.pairing_history();

        let bye = if pool.len() % 2 == 1 { pool.pop() } else { None };
        if let Some(id) = &bye {
            registry.award(id.as_str(), Points::ONE);
            tracing::debug!(tournament = %self.name, player = %id, "bye awarded");
        }

        let matches = pair_players(pool, &history)
            .into_iter()
            .map(|(a, b)| Match::new(a, b))
            .collect();
        self.rounds.push(Round::with_bye(matches, bye));

        tracing::info!(
            tournament = %self.name,
            round = self.current_round(),
            of = self.number_of_rounds,
            "round generated"
        );
        Ok(self.rounds.last())
    }

    /// Records the result of a match, both numbers 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::RoundNotFound`] or
    /// [`TournamentError::MatchNotFound`] for positions that do not exist and
    /// [`TournamentError::Match`] if the match rejects the result.
    pub fn record_result(
        &mut self,
        round_number: usize,
        match_number: usize,
        outcome: Outcome,
        registry: &mut PlayerRegistry,
    ) -> Result<(), TournamentError> {
        let round = round_number
            .checked_sub(1)
            .and_then(|i| self.rounds.get_mut(i))
            .ok_or(TournamentError::RoundNotFound(round_number))?;
        let game = match_number
            .checked_sub(1)
            .and_then(|i| round.match_mut(i))
            .ok_or(TournamentError::MatchNotFound {
                round: round_number,
                number: match_number,
            })?;
        game.set_result(outcome, registry)?;
        Ok(())
    }
}
