//! In-progress and completed tournament collections backed by JSON files.

use std::path::{Path, PathBuf};

use tournament_core::{PlayerRegistry, Tournament, TournamentDates};

use crate::error::StoreError;
use crate::json_file::{self, ReadError};
use crate::record::TournamentRecord;

/// File holding tournaments that are still being played.
pub const IN_PROGRESS_FILE: &str = "in-progress.json";
/// File holding tournaments marked as completed.
pub const COMPLETED_FILE: &str = "completed.json";

/// The tournament collections, held in memory as the source of truth.
///
/// Every mutating operation on the store persists both collections before
/// returning. Changes made directly to a tournament (registering players,
/// pairing rounds, recording results) are persisted by calling
/// [`TournamentStore::save`].
///
/// # Example
///
/// ```ignore
/// let mut clubs = ClubDirectory::load("data/clubs")?;
/// let mut store = TournamentStore::open("data/tournaments", clubs.registry_mut())?;
/// store.create("Spring Open", "Town Hall", "01-06-2025", "03-06-2025", 5)?;
/// ```
#[derive(Debug)]
pub struct TournamentStore {
    in_progress_path: PathBuf,
    completed_path: PathBuf,
    in_progress: Vec<Tournament>,
    completed: Vec<Tournament>,
}

impl TournamentStore {
    /// Loads both collections from `dir`, replaying every stored result into
    /// `registry`.
    ///
    /// Missing files load as empty collections.
    ///
    /// # Errors
    ///
    /// Any unreadable file, invalid JSON, or inconsistent tournament record
    /// aborts the load and leaves `registry` unchanged. Saving after a
    /// partial load would silently drop the records that were skipped.
    pub fn open(dir: impl AsRef<Path>, registry: &mut PlayerRegistry) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let in_progress_path = dir.join(IN_PROGRESS_FILE);
        let completed_path = dir.join(COMPLETED_FILE);

        let mut loaded = registry.clone();
        let in_progress = Self::load_collection(&in_progress_path, &mut loaded)?;
        let completed = Self::load_collection(&completed_path, &mut loaded)?;
        *registry = loaded;
        tracing::info!(
            in_progress = in_progress.len(),
            completed = completed.len(),
            "tournaments loaded"
        );

        Ok(TournamentStore {
            in_progress_path,
            completed_path,
            in_progress,
            completed,
        })
    }

    fn load_collection(
        path: &Path,
        registry: &mut PlayerRegistry,
    ) -> Result<Vec<Tournament>, StoreError> {
        let records: Vec<TournamentRecord> = match json_file::read(path) {
            Ok(Some(records)) => records,
            Ok(None) => return Ok(Vec::new()),
            Err(ReadError::Io(source)) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(ReadError::Json(source)) => {
                return Err(StoreError::Json {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        records
            .into_iter()
            .map(|record| record.into_tournament(registry))
            .collect()
    }

    /// Tournaments still being played.
    pub fn in_progress(&self) -> &[Tournament] {
        &self.in_progress
    }

    /// Tournaments marked as completed.
    pub fn completed(&self) -> &[Tournament] {
        &self.completed
    }

    /// Returns an in-progress tournament by zero-based position.
    pub fn in_progress_mut(&mut self, index: usize) -> Option<&mut Tournament> {
        self.in_progress.get_mut(index)
    }

    /// Position of the first in-progress tournament with the given name.
    pub fn find_in_progress(&self, name: &str) -> Option<usize> {
        self.in_progress.iter().position(|t| t.name == name)
    }

    /// Writes both collections, replacing each file completely.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if a file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        Self::save_collection(&self.in_progress_path, &self.in_progress)?;
        Self::save_collection(&self.completed_path, &self.completed)?;
        tracing::info!(
            in_progress = self.in_progress.len(),
            completed = self.completed.len(),
            "tournaments saved"
        );
        Ok(())
    }

    fn save_collection(path: &Path, tournaments: &[Tournament]) -> Result<(), StoreError> {
        let bytes = Self::to_json(tournaments).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        json_file::write_atomic(path, &bytes).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes a collection exactly as it is written to disk.
    pub fn to_json(tournaments: &[Tournament]) -> serde_json::Result<Vec<u8>> {
        let records: Vec<TournamentRecord> = tournaments
            .iter()
            .map(TournamentRecord::from_tournament)
            .collect();
        json_file::to_pretty_json(&records)
    }

    /// Creates a tournament with no players or rounds and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedDates`] if either date is invalid or
    /// `to` precedes `from`, and [`StoreError::Io`] if saving fails, in
    /// which case the tournament is not kept in memory either.
    pub fn create(
        &mut self,
        name: &str,
        venue: &str,
        from: &str,
        to: &str,
        number_of_rounds: u32,
    ) -> Result<&mut Tournament, StoreError> {
        let dates =
            TournamentDates::parse_ordered(from, to).map_err(|source| StoreError::MalformedDates {
                tournament: name.to_string(),
                source,
            })?;

        self.in_progress.push(Tournament::new(name, venue, dates, number_of_rounds));
        if let Err(e) = self.save() {
            self.in_progress.pop();
            return Err(e);
        }

        tracing::info!(tournament = name, rounds = number_of_rounds, "tournament created");
        let index = self.in_progress.len() - 1;
        Ok(&mut self.in_progress[index])
    }

    /// Moves the in-progress tournament at `index` to the completed
    /// collection and persists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotInProgress`] if there is no such tournament
    /// and [`StoreError::Io`] if saving fails, in which case the move is
    /// undone.
    pub fn complete_tournament(&mut self, index: usize) -> Result<&Tournament, StoreError> {
        if index >= self.in_progress.len() {
            return Err(StoreError::NotInProgress(index));
        }

        let tournament = self.in_progress.remove(index);
        self.completed.push(tournament);
        if let Err(e) = self.save() {
            if let Some(tournament) = self.completed.pop() {
                self.in_progress.insert(index, tournament);
            }
            return Err(e);
        }

        let tournament = &self.completed[self.completed.len() - 1];
        tracing::info!(tournament = %tournament.name, "tournament completed");
        Ok(tournament)
    }
}
