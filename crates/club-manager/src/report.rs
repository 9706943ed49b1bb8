//! Plain-text rendering of tournaments for the terminal.

use tournament_core::{
    ChessId, Match, Outcome, PlayerRegistry, Round, Tournament, TournamentState,
};

/// Marker shown for a match that has no result yet.
pub const PENDING: &str = "—";

fn display_name<'a>(registry: &'a PlayerRegistry, id: &'a ChessId) -> &'a str {
    registry
        .find_player(id.as_str())
        .map_or(id.as_str(), |p| p.name.as_str())
}

/// One-line summary used by `tournaments list`.
pub fn summary_line(number: usize, tournament: &Tournament) -> String {
    let state = match tournament.state() {
        TournamentState::NotStarted => "not started".to_string(),
        TournamentState::InProgress => format!(
            "round {}/{}",
            tournament.current_round(),
            tournament.number_of_rounds()
        ),
        TournamentState::Finished => "all rounds generated".to_string(),
    };
    format!(
        "{number}. {} at {} ({} to {}), {} players, {state}",
        tournament.name,
        tournament.venue,
        tournament.start_date(),
        tournament.end_date(),
        tournament.players().len(),
    )
}

/// Result column of a match: the winner's name, "Tie" or [`PENDING`].
pub fn result_text<'a>(game: &'a Match, registry: &'a PlayerRegistry) -> &'a str {
    match game.outcome() {
        None => PENDING,
        Some(Outcome::Tie) => "Tie",
        Some(Outcome::Player1Wins) => display_name(registry, game.player1()),
        Some(Outcome::Player2Wins) => display_name(registry, game.player2()),
    }
}

/// Registered players ordered by points, one per line.
pub fn standings(tournament: &Tournament, registry: &PlayerRegistry) -> String {
    tournament
        .sorted_players_by_points(registry)
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:>3}. {} ({}) {}", i + 1, p.name, p.chess_id, p.points))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A round's pairings, results and bye under a "Round N" heading.
pub fn round(number: usize, round: &Round, registry: &PlayerRegistry) -> String {
    let mut lines = vec![format!("Round {number}")];
    for (m, game) in round.matches().iter().enumerate() {
        lines.push(format!(
            "  {}. {} vs {}: {}",
            m + 1,
            display_name(registry, game.player1()),
            display_name(registry, game.player2()),
            result_text(game, registry),
        ));
    }
    if let Some(bye) = round.bye() {
        lines.push(format!("  bye: {}", display_name(registry, bye)));
    }
    lines.join("\n")
}

/// Every generated round in order.
pub fn rounds(tournament: &Tournament, registry: &PlayerRegistry) -> String {
    tournament
        .rounds()
        .iter()
        .enumerate()
        .map(|(i, r)| round(i + 1, r, registry))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full report: header, standings and rounds.
pub fn tournament_report(tournament: &Tournament, registry: &PlayerRegistry) -> String {
    let mut out = format!(
        "{} ({}), {} to {}\n\nStandings\n{}",
        tournament.name,
        tournament.venue,
        tournament.start_date(),
        tournament.end_date(),
        standings(tournament, registry),
    );
    if !tournament.rounds().is_empty() {
        out.push_str("\n\n");
        out.push_str(&rounds(tournament, registry));
    }
    out
}
