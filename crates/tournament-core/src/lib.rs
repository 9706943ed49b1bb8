//! Core types for chess club tournaments.
//!
//! This crate provides the domain model and the round-progression engine:
//! - [`Player`], [`ChessId`] and [`Points`] for participants and their scores
//! - [`PlayerRegistry`] which owns every player record
//! - [`Match`] and [`Round`] for pairings and their results
//! - [`Tournament`] with Swiss-style pairing and standings
//! - [`TournamentDates`] for `dd-mm-yyyy` date validation

mod dates;
mod game_match;
mod pairing;
mod player;
mod points;
mod registry;
mod round;
mod tournament;

pub use dates::{is_valid_date, parse_date, DateError, TournamentDates, DATE_FORMAT};
pub use game_match::{Match, MatchError, Outcome};
pub use pairing::{pair_players, PairingHistory};
pub use player::{ChessId, Player};
pub use points::Points;
pub use registry::PlayerRegistry;
pub use round::Round;
pub use tournament::{Tournament, TournamentError, TournamentState};
