//! Errors raised while loading or saving tournaments.

use std::path::PathBuf;

use thiserror::Error;
use tournament_core::{DateError, MatchError};

/// Errors that can occur in the tournament store.
///
/// Record-level variants name the tournament they came from. A player id
/// missing from the club directory is not an error; only ids that are
/// inconsistent within a single tournament record are.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming a tournament file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tournament file is not valid JSON or not a list of tournaments.
    #[error("invalid tournament data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The tournament dates are missing or not `dd-mm-yyyy`.
    #[error("tournament {tournament:?}: {source}")]
    MalformedDates {
        tournament: String,
        #[source]
        source: DateError,
    },

    /// A round entry is neither a list of matches nor `{"matches": [...]}`.
    #[error(
        "tournament {tournament:?}: round {round} is neither a list of matches nor an object with a \"matches\" list"
    )]
    MalformedRoundData { tournament: String, round: usize },

    /// A match references an id that is not among the tournament's players.
    #[error("tournament {tournament:?}: round {round} references unregistered player {chess_id}")]
    UnresolvedInternalPlayer {
        tournament: String,
        round: usize,
        chess_id: String,
    },

    /// Replaying a stored result failed.
    #[error("tournament {tournament:?}: could not replay result: {source}")]
    Replay {
        tournament: String,
        #[source]
        source: MatchError,
    },

    /// No in-progress tournament exists at the given position.
    #[error("no in-progress tournament at position {0}")]
    NotInProgress(usize),
}
