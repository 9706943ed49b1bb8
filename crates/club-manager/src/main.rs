mod config;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use config::ClubConfig;
use tournament_core::{parse_date, ChessId, Outcome, Player};
use tournament_store::{ClubDirectory, TournamentStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "club-manager")]
#[command(about = "Chess club and Swiss tournament manager")]
struct Cli {
    /// Configuration file (defaults to club.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage clubs and their players
    Clubs {
        #[command(subcommand)]
        action: ClubCommands,
    },
    /// List or create tournaments
    Tournaments {
        #[command(subcommand)]
        action: TournamentCommands,
    },
    /// Register a club player in a tournament
    Register {
        /// Tournament number as shown by `tournaments list`
        tournament: usize,
        /// Chess id of the player
        chess_id: String,
    },
    /// Search players not yet registered in a tournament
    Search {
        tournament: usize,
        /// Part of a name, or a full chess id
        keyword: String,
    },
    /// Pair the next round
    NextRound { tournament: usize },
    /// Record a match result: 1 = player 1 wins, 2 = player 2 wins, 3 = tie
    #[command(name = "result")]
    Record {
        tournament: usize,
        /// Match number within the round
        match_number: usize,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        result: u8,
        /// Round number (defaults to the latest round)
        #[arg(short, long)]
        round: Option<usize>,
    },
    /// Show standings and every round
    Report { tournament: usize },
    /// Move a tournament to the completed list
    Complete { tournament: usize },
}

#[derive(Subcommand)]
enum ClubCommands {
    /// List clubs
    List,
    /// Create an empty club
    Create { name: String },
    /// Add a new player to a club
    AddPlayer {
        /// Club number as shown by `clubs list`
        club: usize,
        #[arg(long)]
        chess_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Birthday as dd-mm-yyyy
        #[arg(long)]
        birthday: String,
    },
}

#[derive(Subcommand)]
enum TournamentCommands {
    /// List tournaments in progress
    List {
        /// List completed tournaments instead
        #[arg(long)]
        completed: bool,
        /// Only tournaments that have not ended yet
        #[arg(long, conflicts_with = "completed")]
        active: bool,
    },
    /// Create a tournament
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        venue: String,
        /// First day as dd-mm-yyyy
        #[arg(long)]
        from: String,
        /// Last day as dd-mm-yyyy
        #[arg(long)]
        to: String,
        /// Number of rounds to play
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
        rounds: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClubConfig::load(cli.config.as_deref())?;
    run(cli.command, &config)
}

/// Converts a 1-based number from the command line into an index.
fn index(number: usize, what: &str) -> Result<usize> {
    number
        .checked_sub(1)
        .with_context(|| format!("{what} numbers start at 1"))
}

fn run(command: Commands, config: &ClubConfig) -> Result<()> {
    let mut clubs = ClubDirectory::load(&config.clubs_dir)
        .with_context(|| format!("loading clubs from {}", config.clubs_dir.display()))?;
    let mut store = TournamentStore::open(&config.tournaments_dir, clubs.registry_mut())
        .with_context(|| {
            format!(
                "loading tournaments from {}",
                config.tournaments_dir.display()
            )
        })?;

    match command {
        Commands::Clubs { action } => match action {
            ClubCommands::List => {
                for (i, club) in clubs.clubs().iter().enumerate() {
                    println!("{}. {} ({} players)", i + 1, club.name, club.members().len());
                }
            }
            ClubCommands::Create { name } => {
                let club = clubs.create(&name)?;
                println!("Created club {} at {}", club.name, club.path().display());
            }
            ClubCommands::AddPlayer {
                club,
                chess_id,
                name,
                email,
                birthday,
            } => {
                let club = index(club, "club")?;
                println!("Adding {name} ({chess_id})");
                clubs.add_player(club, Player::new(chess_id, name, email, birthday))?;
            }
        },
        Commands::Tournaments { action } => match action {
            TournamentCommands::List { completed, active } => {
                let today = Local::now().date_naive();
                let tournaments = if completed {
                    store.completed()
                } else {
                    store.in_progress()
                };
                for (i, tournament) in tournaments.iter().enumerate() {
                    if active && !tournament.is_active_or_upcoming(today) {
                        continue;
                    }
                    println!("{}", report::summary_line(i + 1, tournament));
                }
            }
            TournamentCommands::Create {
                name,
                venue,
                from,
                to,
                rounds,
            } => {
                if let Some(start) = parse_date(&from) {
                    if start < Local::now().date_naive() {
                        bail!("start date {from} is in the past");
                    }
                }
                store.create(&name, &venue, &from, &to, rounds)?;
                println!(
                    "Created tournament {}. {name}",
                    store.in_progress().len()
                );
            }
        },
        Commands::Register {
            tournament,
            chess_id,
        } => {
            if clubs.find_player(&chess_id).is_none() {
                bail!("no club player with chess id {chess_id}");
            }
            let t = store
                .in_progress_mut(index(tournament, "tournament")?)
                .with_context(|| format!("no tournament number {tournament}"))?;
            t.register_player(ChessId::from(chess_id.as_str()))?;
            println!("Registered {chess_id} in {}", t.name);
            store.save()?;
        }
        Commands::Search {
            tournament,
            keyword,
        } => {
            let t = store
                .in_progress()
                .get(index(tournament, "tournament")?)
                .with_context(|| format!("no tournament number {tournament}"))?;
            let found = clubs.search_available(t, &keyword);
            if found.is_empty() {
                println!("No available players match {keyword:?}");
            }
            for player in found {
                println!("{} {}", player.chess_id, player.name);
            }
        }
        Commands::NextRound { tournament } => {
            let t = store
                .in_progress_mut(index(tournament, "tournament")?)
                .with_context(|| format!("no tournament number {tournament}"))?;
            let generated = t.generate_next_round(clubs.registry_mut())?.is_some();
            match t.rounds().last() {
                Some(round) if generated => println!(
                    "{}",
                    report::round(t.rounds().len(), round, clubs.registry())
                ),
                _ => println!(
                    "All {} rounds of {} have been generated",
                    t.number_of_rounds(),
                    t.name
                ),
            }
            store.save()?;
        }
        Commands::Record {
            tournament,
            match_number,
            result,
            round,
        } => {
            let t = store
                .in_progress_mut(index(tournament, "tournament")?)
                .with_context(|| format!("no tournament number {tournament}"))?;
            let round = round.unwrap_or(t.rounds().len());
            let outcome = Outcome::from_selector(result - 1)?;
            t.record_result(round, match_number, outcome, clubs.registry_mut())?;
            println!("Recorded round {round} match {match_number}");
            store.save()?;
        }
        Commands::Report { tournament } => {
            let t = store
                .in_progress()
                .get(index(tournament, "tournament")?)
                .with_context(|| format!("no tournament number {tournament}"))?;
            println!("{}", report::tournament_report(t, clubs.registry()));
        }
        Commands::Complete { tournament } => {
            let t = store.complete_tournament(index(tournament, "tournament")?)?;
            println!("{} moved to completed tournaments", t.name);
        }
    }
    Ok(())
}
