//! JSON persistence for chess club tournaments.
//!
//! # Modules
//!
//! - [`store`] - in-progress and completed tournament collections
//! - [`record`] - on-disk tournament shapes and their reconstruction
//! - [`clubs`] - club roster files and the player directory

pub mod clubs;
pub mod error;
mod json_file;
pub mod record;
pub mod store;

pub use clubs::{Club, ClubDirectory, ClubError};
pub use error::StoreError;
pub use record::{DatesRecord, MatchRecord, RoundRecord, TournamentRecord};
pub use store::TournamentStore;
