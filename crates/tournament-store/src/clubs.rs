//! Club roster files and the player directory.
//!
//! Each club lives in its own JSON file. All players of all clubs are loaded
//! into one [`PlayerRegistry`], which is what tournaments resolve their
//! player ids against. Point totals are never written to club files; they
//! are rebuilt by replaying tournaments on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tournament_core::{is_valid_date, ChessId, Player, PlayerRegistry, Tournament};

use crate::json_file::{self, ReadError};

/// Errors that can occur when working with club files.
#[derive(Debug, Error)]
pub enum ClubError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize club {name:?}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("a club file already exists at {0}")]
    ClubExists(PathBuf),

    #[error("no club at position {0}")]
    ClubNotFound(usize),

    #[error("a player with chess id {0} already exists")]
    DuplicatePlayer(ChessId),

    #[error("invalid birthday {0:?}: expected format is dd-mm-yyyy")]
    InvalidBirthday(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct ClubFile {
    name: String,
    #[serde(default)]
    players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlayerRecord {
    name: String,
    email: String,
    chess_id: String,
    birthday: String,
}

impl PlayerRecord {
    fn from_player(player: &Player) -> Self {
        PlayerRecord {
            name: player.name.clone(),
            email: player.email.clone(),
            chess_id: player.chess_id.to_string(),
            birthday: player.birthday.clone(),
        }
    }
}

/// A chess club and the ids of its members.
///
/// The club keeps the player records read from its own file, so saving it
/// never rewrites a member with another club's record for the same id.
#[derive(Debug, Clone)]
pub struct Club {
    pub name: String,
    path: PathBuf,
    members: Vec<ChessId>,
    records: Vec<PlayerRecord>,
}

impl Club {
    /// File backing this club.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Member ids in file order.
    pub fn members(&self) -> &[ChessId] {
        &self.members
    }
}

/// Every club found in a directory, plus the registry owning their players.
#[derive(Debug)]
pub struct ClubDirectory {
    dir: PathBuf,
    clubs: Vec<Club>,
    registry: PlayerRegistry,
}

impl ClubDirectory {
    /// Loads every `*.json` file in `dir`, in file name order.
    ///
    /// A missing directory gives an empty directory. Files that are not valid
    /// club JSON are skipped with a warning. When two clubs list the same
    /// chess id, the first record loaded wins.
    ///
    /// # Errors
    ///
    /// Returns [`ClubError::Io`] if the directory or a file cannot be read.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ClubError> {
        let dir = dir.as_ref().to_path_buf();
        let mut directory = ClubDirectory {
            dir: dir.clone(),
            clubs: Vec::new(),
            registry: PlayerRegistry::new(),
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(directory),
            Err(source) => return Err(ClubError::Io { path: dir, source }),
        };
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ClubError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let file: ClubFile = match json_file::read(&path) {
                Ok(Some(file)) => file,
                Ok(None) => continue,
                Err(ReadError::Json(e)) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping invalid club file");
                    continue;
                }
                Err(ReadError::Io(source)) => return Err(ClubError::Io { path, source }),
            };
            directory.add_loaded_club(file, path);
        }

        tracing::info!(
            clubs = directory.clubs.len(),
            players = directory.registry.len(),
            "clubs loaded"
        );
        Ok(directory)
    }

    fn add_loaded_club(&mut self, file: ClubFile, path: PathBuf) {
        let mut members = Vec::with_capacity(file.players.len());
        for record in &file.players {
            let player = Player::new(
                record.chess_id.as_str(),
                record.name.as_str(),
                record.email.as_str(),
                record.birthday.as_str(),
            );
            let id = player.chess_id.clone();
            if !self.registry.insert(player) {
                tracing::warn!(club = %file.name, player = %id, "chess id already loaded from another club");
            }
            members.push(id);
        }
        self.clubs.push(Club {
            name: file.name,
            path,
            members,
            records: file.players,
        });
    }

    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    /// The registry owning every player record.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Mutable access for loading tournaments and recording results.
    pub fn registry_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.registry
    }

    /// Looks up a player by exact chess id.
    pub fn find_player(&self, chess_id: &str) -> Option<&Player> {
        self.registry.find_player(chess_id)
    }

    /// Players of a club in file order.
    pub fn members<'a>(&'a self, club: &'a Club) -> impl Iterator<Item = &'a Player> + 'a {
        club.members
            .iter()
            .filter_map(|id| self.registry.find_player(id.as_str()))
    }

    /// Club players not yet registered in `tournament`, in club order.
    pub fn available_players(&self, tournament: &Tournament) -> Vec<&Player> {
        let mut available: Vec<&Player> = Vec::new();
        for club in &self.clubs {
            for player in self.members(club) {
                let listed = available.iter().any(|p| p.chess_id == player.chess_id);
                if !listed && !tournament.is_registered(player.chess_id.as_str()) {
                    available.push(player);
                }
            }
        }
        available
    }

    /// Available players whose chess id equals `keyword` ignoring case, or
    /// whose name contains it ignoring case.
    pub fn search_available(&self, tournament: &Tournament, keyword: &str) -> Vec<&Player> {
        let keyword = keyword.trim().to_lowercase();
        self.available_players(tournament)
            .into_iter()
            .filter(|p| {
                p.chess_id.as_str().to_lowercase() == keyword
                    || p.name.to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Creates an empty club saved as `<name without spaces>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ClubError::ClubExists`] if the file is already there and
    /// [`ClubError::Io`] if it cannot be written.
    pub fn create(&mut self, name: &str) -> Result<&Club, ClubError> {
        let path = self.dir.join(format!("{}.json", name.replace(' ', "")));
        if path.exists() || self.clubs.iter().any(|c| c.path == path) {
            return Err(ClubError::ClubExists(path));
        }

        let club = Club {
            name: name.to_string(),
            path,
            members: Vec::new(),
            records: Vec::new(),
        };
        Self::save_club(&club)?;
        tracing::info!(club = name, "club created");
        self.clubs.push(club);
        Ok(&self.clubs[self.clubs.len() - 1])
    }

    /// Adds a new player to the club at `club_index` and saves that club.
    ///
    /// # Errors
    ///
    /// Returns [`ClubError::ClubNotFound`], [`ClubError::DuplicatePlayer`] if
    /// the id is known in any club, [`ClubError::InvalidBirthday`], or
    /// [`ClubError::Io`] if saving fails, in which case neither the club nor
    /// the registry keeps the player.
    pub fn add_player(&mut self, club_index: usize, player: Player) -> Result<(), ClubError> {
        if club_index >= self.clubs.len() {
            return Err(ClubError::ClubNotFound(club_index));
        }
        if self.registry.contains(player.chess_id.as_str()) {
            return Err(ClubError::DuplicatePlayer(player.chess_id));
        }
        if !is_valid_date(&player.birthday) {
            return Err(ClubError::InvalidBirthday(player.birthday));
        }

        let club = &mut self.clubs[club_index];
        club.records.push(PlayerRecord::from_player(&player));
        club.members.push(player.chess_id.clone());
        if let Err(e) = Self::save_club(club) {
            club.records.pop();
            club.members.pop();
            return Err(e);
        }

        tracing::info!(club = %club.name, player = %player.chess_id, "player added");
        self.registry.insert(player);
        Ok(())
    }

    fn save_club(club: &Club) -> Result<(), ClubError> {
        let file = ClubFile {
            name: club.name.clone(),
            players: club.records.clone(),
        };
        let bytes = json_file::to_pretty_json(&file).map_err(|source| ClubError::Serialize {
            name: club.name.clone(),
            source,
        })?;
        json_file::write_atomic(&club.path, &bytes).map_err(|source| ClubError::Io {
            path: club.path.clone(),
            source,
        })
    }
}
