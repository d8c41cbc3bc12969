//! Matchodds CLI - Match outcome predictions from the command line

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use matchodds::core::selection::{SelectionState, Slot};
use matchodds::models::{Player, PredictResponse, Surface};
use matchodds::{predictor, PlayerCatalog, DEFAULT_SEARCH_LIMIT};

/// Default ratings file (relative to project root)
const DEFAULT_DATA_PATH: &str = "data/player_elo_ratings.csv";

#[derive(Parser)]
#[command(name = "matchodds")]
#[command(author, version, about = "Tennis match odds prediction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Path to the player ratings CSV
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict a single match
    Predict {
        /// First player name (exact)
        player1: String,

        /// Second player name (exact)
        player2: String,

        /// Court surface: overall, hard, clay, grass
        #[arg(short, long, default_value = "overall")]
        surface: Surface,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search players by name substring
    Search {
        query: String,

        /// Maximum number of matches to show
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("{}", "Matchodds CLI v0.2.0".cyan().bold());
    println!();

    let catalog = load_catalog(&cli.data)?;

    if cli.interactive {
        run_interactive(catalog)?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Predict {
                player1,
                player2,
                surface,
                json,
            } => {
                predict_match(&catalog, &player1, &player2, surface, json)?;
            }
            Commands::Search { query, limit } => {
                search_players(&catalog, &query, limit);
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<PlayerCatalog> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading player ratings...");

    let catalog = PlayerCatalog::load(path)
        .with_context(|| format!("Failed to load ratings from {:?}", path))?;

    pb.finish_and_clear();
    Ok(catalog)
}

/// Exact lookup with search-based suggestions on a miss
fn resolve_player<'a>(catalog: &'a PlayerCatalog, name: &str) -> Result<&'a Player> {
    if let Some(player) = catalog.get(name) {
        return Ok(player);
    }

    let suggestions = catalog.search(name, 5);
    if suggestions.is_empty() {
        bail!("No player named '{}' in the catalog", name);
    }
    let hints: Vec<&str> = suggestions.iter().map(|p| p.name.as_str()).collect();
    bail!(
        "No player named '{}'. Closest matches: {}",
        name,
        hints.join(", ")
    );
}

fn predict_match(
    catalog: &PlayerCatalog,
    player1: &str,
    player2: &str,
    surface: Surface,
    json: bool,
) -> Result<()> {
    let p1 = resolve_player(catalog, player1)?;
    let p2 = resolve_player(catalog, player2)?;

    let response = predictor::predict_match(p1, p2, surface);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print_prediction(&response);
    Ok(())
}

fn print_prediction(response: &PredictResponse) {
    println!(
        "{}",
        format!("Match Prediction ({}):", response.surface)
            .yellow()
            .bold()
    );
    println!(
        "{:<24} {:>8} {:>8} {:>8}",
        "Player", "Rating", "Win %", "Odds"
    );
    println!("{}", "-".repeat(52));

    for side in [&response.player1, &response.player2] {
        println!(
            "{:<24} {:>8.1} {:>7.2}% {:>8.2}",
            side.name,
            side.rating,
            side.probability * 100.0,
            side.decimal_odds
        );
    }
    println!();
}

fn search_players(catalog: &PlayerCatalog, query: &str, limit: usize) {
    let matches = catalog.search(query, limit);

    if matches.is_empty() {
        println!("{}", "No players matched.".yellow());
        return;
    }

    println!("{:<24} {:>8} {:>8} {:>8} {:>8}", "Player", "Overall", "Hard", "Clay", "Grass");
    println!("{}", "-".repeat(60));
    for player in matches {
        println!(
            "{:<24} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            player.name, player.elo_overall, player.elo_hard, player.elo_clay, player.elo_grass
        );
    }
    println!();
}

fn run_interactive(catalog: PlayerCatalog) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!("Type part of a name, then pick from the matches.\n");

    if catalog.is_empty() {
        println!("{}", "The catalog is empty; nothing to predict.".red());
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    let mut state = SelectionState::new(Arc::new(catalog));

    loop {
        let options = vec!["Predict a match", "Change surface", "Search players", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt(format!("What would you like to do? (surface: {})", state.surface()))
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                if !pick_player(&theme, &mut state, Slot::First)? {
                    continue;
                }
                if !pick_player(&theme, &mut state, Slot::Second)? {
                    continue;
                }
                state.reveal();
                show_result(&state);
            }
            1 => {
                let names: Vec<&str> = Surface::ALL.iter().map(|s| s.as_str()).collect();
                let idx = Select::with_theme(&theme)
                    .with_prompt("Court surface")
                    .items(&names)
                    .default(0)
                    .interact()?;
                state.set_surface(Surface::ALL[idx]);
            }
            2 => {
                let query: String = Input::with_theme(&theme)
                    .with_prompt("Search")
                    .interact_text()?;
                let names: Vec<String> = state
                    .catalog()
                    .search(&query, DEFAULT_SEARCH_LIMIT)
                    .iter()
                    .map(|p| format!("{} (ELO {:.0})", p.name, p.elo_overall))
                    .collect();
                if names.is_empty() {
                    println!("{}", "No players matched.".yellow());
                } else {
                    for name in names {
                        println!("  {}", name);
                    }
                }
            }
            _ => break,
        }
        println!();
    }

    Ok(())
}

/// Drive one slot of the selection state: type a query, pick a candidate
fn pick_player(theme: &ColorfulTheme, state: &mut SelectionState, slot: Slot) -> Result<bool> {
    let prompt = match slot {
        Slot::First => "Player 1",
        Slot::Second => "Player 2",
    };

    loop {
        let query: String = Input::with_theme(theme)
            .with_prompt(format!("{} (blank to cancel)", prompt))
            .allow_empty(true)
            .interact_text()?;

        if query.trim().is_empty() {
            state.dismiss(slot);
            return Ok(false);
        }

        state.set_query(slot, &query);
        let candidates: Vec<String> = state
            .candidates(slot)
            .iter()
            .map(|p| p.name.clone())
            .collect();

        if candidates.is_empty() {
            println!("{}", "No matches, try again.".yellow());
            continue;
        }

        let idx = Select::with_theme(theme)
            .with_prompt(format!("Select {}", prompt))
            .items(&candidates)
            .default(0)
            .interact()?;

        if state.select(slot, &candidates[idx]) {
            return Ok(true);
        }
    }
}

fn show_result(state: &SelectionState) {
    if state.prediction().is_none() {
        return;
    }
    let (Some(p1), Some(p2)) = (state.selected(Slot::First), state.selected(Slot::Second)) else {
        return;
    };

    let response = predictor::predict_match(p1, p2, state.surface());
    println!();
    print_prediction(&response);
}
