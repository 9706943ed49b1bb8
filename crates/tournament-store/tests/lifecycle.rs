//! End-to-end tests: club files, tournament files, reloads.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tournament_core::{ChessId, Outcome, Points};
use tournament_store::store::{COMPLETED_FILE, IN_PROGRESS_FILE};
use tournament_store::{ClubDirectory, StoreError, TournamentStore};

fn write_clubs(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("Knights.json"),
        json!({
            "name": "Knights",
            "players": [
                {"name": "A", "email": "a@x.org", "chess_id": "ID-A", "birthday": "01-01-1990"},
                {"name": "B", "email": "b@x.org", "chess_id": "ID-B", "birthday": "01-01-1990"},
                {"name": "C", "email": "c@x.org", "chess_id": "ID-C", "birthday": "01-01-1990"},
                {"name": "D", "email": "d@x.org", "chess_id": "ID-D", "birthday": "01-01-1990"}
            ]
        })
        .to_string(),
    )
    .unwrap();
}

fn points(clubs: &ClubDirectory, id: &str) -> Points {
    clubs.find_player(id).unwrap().points
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_two_round_tournament_survives_reload() {
    let root = tempfile::tempdir().unwrap();
    let clubs_dir = root.path().join("clubs");
    let tournaments_dir = root.path().join("tournaments");
    write_clubs(&clubs_dir);

    let mut clubs = ClubDirectory::load(&clubs_dir).unwrap();
    let mut store = TournamentStore::open(&tournaments_dir, clubs.registry_mut()).unwrap();
    let tournament = store
        .create("Club Championship", "Back Room", "10-01-2026", "11-01-2026", 2)
        .unwrap();
    for id in ["ID-A", "ID-B", "ID-C", "ID-D"] {
        tournament.register_player(ChessId::from(id)).unwrap();
    }

    let registry = clubs.registry_mut();
    tournament.generate_next_round(registry).unwrap();
    tournament
        .record_result(1, 1, Outcome::Player1Wins, registry)
        .unwrap();
    tournament.record_result(1, 2, Outcome::Tie, registry).unwrap();
    store.save().unwrap();

    // Reload from disk and continue with round two.
    let mut clubs = ClubDirectory::load(&clubs_dir).unwrap();
    let mut store = TournamentStore::open(&tournaments_dir, clubs.registry_mut()).unwrap();
    assert_eq!(points(&clubs, "ID-A"), Points::ONE);
    assert_eq!(points(&clubs, "ID-C"), Points::HALF);
    assert_eq!(points(&clubs, "ID-D"), Points::HALF);
    assert_eq!(points(&clubs, "ID-B"), Points::ZERO);

    let tournament = store.in_progress_mut(0).unwrap();
    let round = tournament
        .generate_next_round(clubs.registry_mut())
        .unwrap()
        .unwrap();
    let pairs: Vec<(&str, &str)> = round
        .matches()
        .iter()
        .map(|m| (m.player1().as_str(), m.player2().as_str()))
        .collect();
    assert_eq!(pairs, vec![("ID-A", "ID-C"), ("ID-D", "ID-B")]);

    assert!(tournament
        .generate_next_round(clubs.registry_mut())
        .unwrap()
        .is_none());
    assert!(tournament.is_completed());
    store.save().unwrap();

    store.complete_tournament(0).unwrap();
    let saved = read_json(&tournaments_dir.join(COMPLETED_FILE));
    assert_eq!(saved[0]["name"], "Club Championship");
    assert_eq!(saved[0]["current_round"], 2);
    assert_eq!(saved[0]["completed"], true);
    assert_eq!(read_json(&tournaments_dir.join(IN_PROGRESS_FILE)), json!([]));
}

#[test]
fn test_legacy_file_with_bare_rounds_and_unknown_player() {
    let root = tempfile::tempdir().unwrap();
    let clubs_dir = root.path().join("clubs");
    let tournaments_dir = root.path().join("tournaments");
    write_clubs(&clubs_dir);
    fs::create_dir_all(&tournaments_dir).unwrap();
    fs::write(
        tournaments_dir.join(IN_PROGRESS_FILE),
        json!([{
            "name": "Old Open",
            "venue": "Park",
            "dates": {"from": "01-05-2024", "to": "02-05-2024"},
            "number_of_rounds": 3,
            "current_round": 1,
            "completed": false,
            "players": ["ID-A", "GONE-1"],
            "rounds": [
                [{"players": ["GONE-1", "ID-A"], "completed": true, "winner": "GONE-1"}]
            ]
        }])
        .to_string(),
    )
    .unwrap();

    let mut clubs = ClubDirectory::load(&clubs_dir).unwrap();
    let store = TournamentStore::open(&tournaments_dir, clubs.registry_mut()).unwrap();

    let placeholder = clubs.find_player("GONE-1").unwrap();
    assert_eq!(placeholder.name, "Unaffiliated Player");
    assert_eq!(placeholder.points, Points::ONE);

    store.save().unwrap();
    let saved = read_json(&tournaments_dir.join(IN_PROGRESS_FILE));
    assert_eq!(
        saved[0]["rounds"],
        json!([{
            "matches": [{"players": ["GONE-1", "ID-A"], "completed": true, "winner": "GONE-1"}]
        }])
    );
}

#[test]
fn test_malformed_round_aborts_load() {
    let root = tempfile::tempdir().unwrap();
    let tournaments_dir = root.path().join("tournaments");
    fs::create_dir_all(&tournaments_dir).unwrap();
    fs::write(
        tournaments_dir.join(IN_PROGRESS_FILE),
        json!([{
            "name": "Broken",
            "venue": "Hall",
            "dates": {"from": "01-05-2024", "to": "02-05-2024"},
            "number_of_rounds": 2,
            "current_round": 1,
            "completed": false,
            "players": ["ID-A", "ID-B"],
            "rounds": ["round one"]
        }])
        .to_string(),
    )
    .unwrap();

    let mut clubs = ClubDirectory::load(root.path().join("clubs")).unwrap();
    let err = TournamentStore::open(&tournaments_dir, clubs.registry_mut()).unwrap_err();
    match err {
        StoreError::MalformedRoundData { tournament, round } => {
            assert_eq!(tournament, "Broken");
            assert_eq!(round, 1);
        }
        other => panic!("expected MalformedRoundData, got {other:?}"),
    }
}

#[test]
fn test_well_formed_file_round_trips() {
    let root = tempfile::tempdir().unwrap();
    let tournaments_dir = root.path().join("tournaments");
    fs::create_dir_all(&tournaments_dir).unwrap();
    let stored = json!([{
        "name": "Round Trip",
        "venue": "Hall",
        "dates": {"from": "01-05-2024", "to": "03-05-2024"},
        "number_of_rounds": 3,
        "current_round": 2,
        "completed": false,
        "players": ["P1", "P2", "P3"],
        "rounds": [
            {"matches": [{"players": ["P1", "P2"], "completed": true, "winner": null}], "bye": "P3"},
            {"matches": [{"players": ["P3", "P1"], "completed": false, "winner": null}], "bye": "P2"}
        ]
    }]);
    fs::write(tournaments_dir.join(IN_PROGRESS_FILE), stored.to_string()).unwrap();

    let mut clubs = ClubDirectory::load(root.path().join("clubs")).unwrap();
    let store = TournamentStore::open(&tournaments_dir, clubs.registry_mut()).unwrap();
    store.save().unwrap();

    assert_eq!(read_json(&tournaments_dir.join(IN_PROGRESS_FILE)), stored);
    assert_eq!(clubs.find_player("P3").unwrap().points, Points::ONE);
    assert_eq!(clubs.find_player("P2").unwrap().points, Points::from_half_points(3));
}
