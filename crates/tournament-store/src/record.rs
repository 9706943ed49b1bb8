//! On-disk tournament shapes.
//!
//! Rounds have been stored both as a bare list of matches and as an object
//! wrapping the list under `"matches"`. Both are accepted here and
//! normalized into [`Round`] immediately; saving always writes the object
//! form.

use serde::{Deserialize, Serialize};
use tournament_core::{
    ChessId, Match, Outcome, Player, PlayerRegistry, Points, Round, Tournament, TournamentDates,
};

use crate::error::StoreError;

/// A persisted tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub name: String,
    pub venue: String,
    #[serde(default)]
    pub dates: DatesRecord,
    #[serde(default)]
    pub number_of_rounds: u32,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub completed: bool,
    /// Chess ids in registration order.
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub rounds: Vec<RoundRecord>,
}

/// Tournament start and end, both `dd-mm-yyyy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatesRecord {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// Any round entry found on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoundRecord {
    /// `{"matches": [...], "bye": "<id>"}`, the form written on save.
    Wrapped {
        matches: Vec<MatchRecord>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bye: Option<String>,
    },
    /// `[...]`, a bare list of matches.
    Bare(Vec<MatchRecord>),
    /// Anything else; rejected when the record is reconstructed.
    Malformed(serde_json::Value),
}

/// A persisted match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The two chess ids in pairing order.
    pub players: [String; 2],
    #[serde(default)]
    pub completed: bool,
    /// Winner id; null for a tie or an unplayed match.
    #[serde(default)]
    pub winner: Option<String>,
}

impl MatchRecord {
    pub fn from_match(game: &Match) -> Self {
        MatchRecord {
            players: [game.player1().to_string(), game.player2().to_string()],
            completed: game.is_completed(),
            winner: game.winner().map(ToString::to_string),
        }
    }

    /// The outcome to replay, or `None` if the match was not played.
    ///
    /// A missing winner means a tie. A winner that is neither player is
    /// also read as a tie so that historical files stay loadable.
    fn outcome(&self, tournament: &str) -> Option<Outcome> {
        if !self.completed {
            return None;
        }
        let [player1, player2] = &self.players;
        Some(match self.winner.as_deref() {
            None | Some("") => Outcome::Tie,
            Some(w) if w == player1 => Outcome::Player1Wins,
            Some(w) if w == player2 => Outcome::Player2Wins,
            Some(w) => {
                tracing::warn!(
                    tournament,
                    winner = w,
                    "winner is not a player of the match, recording a tie"
                );
                Outcome::Tie
            }
        })
    }
}

impl RoundRecord {
    pub fn from_round(round: &Round) -> Self {
        RoundRecord::Wrapped {
            matches: round.matches().iter().map(MatchRecord::from_match).collect(),
            bye: round.bye().map(ToString::to_string),
        }
    }
}

impl TournamentRecord {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        TournamentRecord {
            name: tournament.name.clone(),
            venue: tournament.venue.clone(),
            dates: DatesRecord {
                from: tournament.start_date().to_string(),
                to: tournament.end_date().to_string(),
            },
            number_of_rounds: tournament.number_of_rounds(),
            current_round: tournament.current_round(),
            completed: tournament.is_completed(),
            players: tournament.players().iter().map(ToString::to_string).collect(),
            rounds: tournament.rounds().iter().map(RoundRecord::from_round).collect(),
        }
    }

    /// Rebuilds the tournament and replays its results into `registry`.
    ///
    /// Player ids unknown to `registry` get a placeholder player. The record
    /// is fully validated before `registry` is touched, so a rejected record
    /// leaves no points or placeholders behind.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedDates`], [`StoreError::MalformedRoundData`]
    /// or [`StoreError::UnresolvedInternalPlayer`] for inconsistent records.
    pub fn into_tournament(self, registry: &mut PlayerRegistry) -> Result<Tournament, StoreError> {
        let name = self.name;
        let dates = TournamentDates::parse(&self.dates.from, &self.dates.to).map_err(|source| {
            StoreError::MalformedDates {
                tournament: name.clone(),
                source,
            }
        })?;

        let mut players: Vec<ChessId> = Vec::with_capacity(self.players.len());
        for id in self.players {
            let id = ChessId::from(id);
            if players.contains(&id) {
                tracing::warn!(tournament = %name, player = %id, "dropping duplicate registration");
            } else {
                players.push(id);
            }
        }

        let mut rounds = Vec::with_capacity(self.rounds.len());
        for (i, raw) in self.rounds.into_iter().enumerate() {
            let (matches, bye) = match raw {
                RoundRecord::Wrapped { matches, bye } => (matches, bye),
                RoundRecord::Bare(matches) => (matches, None),
                RoundRecord::Malformed(_) => {
                    return Err(StoreError::MalformedRoundData {
                        tournament: name,
                        round: i + 1,
                    })
                }
            };
            let unresolved = matches
                .iter()
                .flat_map(|m| m.players.iter())
                .find(|id| !players.iter().any(|p| p.as_str() == id.as_str()));
            if let Some(id) = unresolved {
                return Err(StoreError::UnresolvedInternalPlayer {
                    tournament: name,
                    round: i + 1,
                    chess_id: id.clone(),
                });
            }
            rounds.push((matches, bye));
        }

        for id in &players {
            if !registry.contains(id.as_str()) {
                tracing::warn!(
                    tournament = %name,
                    player = %id,
                    "player not found in any club, using a placeholder"
                );
                registry.insert(Player::placeholder(id.clone()));
            }
        }

        let mut restored = Vec::with_capacity(rounds.len());
        for (records, bye) in rounds {
            let mut matches = Vec::with_capacity(records.len());
            for record in records {
                let outcome = record.outcome(&name);
                let [player1, player2] = record.players;
                let mut game = Match::new(player1.into(), player2.into());
                if let Some(outcome) = outcome {
                    game.set_result(outcome, registry)
                        .map_err(|source| StoreError::Replay {
                            tournament: name.clone(),
                            source,
                        })?;
                }
                matches.push(game);
            }

            let bye = bye.map(ChessId::from).filter(|id| {
                let known = players.contains(id);
                if !known {
                    tracing::warn!(tournament = %name, player = %id, "ignoring bye for unregistered player");
                }
                known
            });
            if let Some(id) = &bye {
                registry.award(id.as_str(), Points::ONE);
            }
            restored.push(Round::with_bye(matches, bye));
        }

        if self.current_round as usize != restored.len() {
            tracing::warn!(
                tournament = %name,
                stored = self.current_round,
                rounds = restored.len(),
                "current round disagrees with round list, using round count"
            );
        }

        Ok(Tournament::restore(
            name,
            self.venue,
            dates,
            self.number_of_rounds,
            self.completed,
            players,
            restored,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> PlayerRegistry {
        let mut registry = PlayerRegistry::new();
        registry.insert(Player::new("A1", "Alice", "a@x.org", "01-01-1990"));
        registry.insert(Player::new("B2", "Bob", "b@x.org", "01-01-1991"));
        registry
    }

    fn record(rounds: serde_json::Value) -> TournamentRecord {
        serde_json::from_value(json!({
            "name": "Winter Cup",
            "venue": "Library",
            "dates": {"from": "01-12-2025", "to": "02-12-2025"},
            "number_of_rounds": 3,
            "current_round": 1,
            "completed": false,
            "players": ["A1", "B2"],
            "rounds": rounds
        }))
        .unwrap()
    }

    fn points(registry: &PlayerRegistry, id: &str) -> Points {
        registry.find_player(id).unwrap().points
    }

    #[test]
    fn test_both_round_shapes_normalize_to_same_round() {
        let matches = json!([{"players": ["A1", "B2"], "completed": true, "winner": "B2"}]);

        let mut bare_registry = registry();
        let bare = record(json!([matches.clone()]))
            .into_tournament(&mut bare_registry)
            .unwrap();
        let mut wrapped_registry = registry();
        let wrapped = record(json!([{"matches": matches}]))
            .into_tournament(&mut wrapped_registry)
            .unwrap();

        assert_eq!(bare.rounds(), wrapped.rounds());
        assert_eq!(points(&bare_registry, "B2"), Points::ONE);
        assert_eq!(points(&wrapped_registry, "B2"), Points::ONE);
    }

    #[test]
    fn test_string_round_is_malformed() {
        let mut registry = registry();
        let err = record(json!(["not a round"]))
            .into_tournament(&mut registry)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::MalformedRoundData { round: 1, .. }
        ));
    }

    #[test]
    fn test_object_without_matches_is_malformed() {
        let mut registry = registry();
        let err = record(json!([{"games": []}]))
            .into_tournament(&mut registry)
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedRoundData { .. }));
    }

    #[test]
    fn test_unknown_match_player_is_rejected_without_side_effects() {
        let mut registry = registry();
        let err = record(json!([
            [{"players": ["A1", "B2"], "completed": true, "winner": "A1"}],
            [{"players": ["A1", "Z9"], "completed": false, "winner": null}]
        ]))
        .into_tournament(&mut registry)
        .unwrap_err();

        match err {
            StoreError::UnresolvedInternalPlayer {
                round, chess_id, ..
            } => {
                assert_eq!(round, 2);
                assert_eq!(chess_id, "Z9");
            }
            other => panic!("expected UnresolvedInternalPlayer, got {other:?}"),
        }
        assert_eq!(points(&registry, "A1"), Points::ZERO);
    }

    #[test]
    fn test_directory_miss_becomes_placeholder() {
        let mut registry = PlayerRegistry::new();
        let tournament = record(json!([])).into_tournament(&mut registry).unwrap();

        assert_eq!(tournament.players().len(), 2);
        let placeholder = registry.find_player("A1").unwrap();
        assert_eq!(placeholder.name, Player::PLACEHOLDER_NAME);
        assert_eq!(placeholder.email, Player::PLACEHOLDER_EMAIL);
        assert_eq!(placeholder.birthday, Player::PLACEHOLDER_BIRTHDAY);
    }

    #[test]
    fn test_completed_without_winner_is_tie() {
        let mut registry = registry();
        let tournament = record(json!([[{"players": ["A1", "B2"], "completed": true}]]))
            .into_tournament(&mut registry)
            .unwrap();

        let game = &tournament.rounds()[0].matches()[0];
        assert_eq!(game.outcome(), Some(Outcome::Tie));
        assert_eq!(points(&registry, "A1"), Points::HALF);
        assert_eq!(points(&registry, "B2"), Points::HALF);
    }

    #[test]
    fn test_foreign_winner_falls_back_to_tie() {
        let mut registry = registry();
        let tournament =
            record(json!([[{"players": ["A1", "B2"], "completed": true, "winner": "C3"}]]))
                .into_tournament(&mut registry)
                .unwrap();

        assert_eq!(
            tournament.rounds()[0].matches()[0].outcome(),
            Some(Outcome::Tie)
        );
    }

    #[test]
    fn test_unplayed_match_ignores_winner() {
        let mut registry = registry();
        let tournament =
            record(json!([[{"players": ["A1", "B2"], "completed": false, "winner": "A1"}]]))
                .into_tournament(&mut registry)
                .unwrap();

        assert!(!tournament.rounds()[0].matches()[0].is_completed());
        assert_eq!(points(&registry, "A1"), Points::ZERO);
    }

    #[test]
    fn test_missing_dates_are_malformed() {
        let mut registry = registry();
        let record: TournamentRecord =
            serde_json::from_value(json!({"name": "No Dates", "venue": "Hall"})).unwrap();
        let err = record.into_tournament(&mut registry).unwrap_err();
        assert!(matches!(err, StoreError::MalformedDates { .. }));
    }

    #[test]
    fn test_current_round_is_normalized_to_round_count() {
        let mut registry = registry();
        let tournament = record(json!([])).into_tournament(&mut registry).unwrap();
        assert_eq!(tournament.current_round(), 0);
        assert_eq!(TournamentRecord::from_tournament(&tournament).current_round, 0);
    }

    #[test]
    fn test_bye_is_replayed() {
        let mut registry = registry();
        let tournament = record(json!([{"matches": [], "bye": "A1"}]))
            .into_tournament(&mut registry)
            .unwrap();
        assert_eq!(tournament.rounds()[0].bye(), Some(&ChessId::from("A1")));
        assert_eq!(points(&registry, "A1"), Points::ONE);
    }

    #[test]
    fn test_round_trip_is_field_for_field() {
        let stored = record(json!([{
            "matches": [{"players": ["B2", "A1"], "completed": true, "winner": "A1"}]
        }]));
        let mut registry = registry();
        let tournament = stored.clone().into_tournament(&mut registry).unwrap();

        assert_eq!(TournamentRecord::from_tournament(&tournament), stored);
    }

    #[test]
    fn test_saved_round_shape_is_object_without_empty_bye() {
        let round = Round::new(vec![Match::new("A1".into(), "B2".into())]);
        let value = serde_json::to_value(RoundRecord::from_round(&round)).unwrap();
        assert_eq!(
            value,
            json!({"matches": [{"players": ["A1", "B2"], "completed": false, "winner": null}]})
        );
    }
}
