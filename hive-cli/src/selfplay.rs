//! Selfplay command - play uniformly random games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: seeding and formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use hive_core::{Expansions, GameConfig, GameResult, GameState};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Board radius (overrides the config file)
    #[arg(long)]
    pub radius: Option<u8>,

    /// UHP game type, e.g. Base or Base+MLP (overrides the config file)
    #[arg(long)]
    pub expansions: Option<Expansions>,

    /// Move number at which a game is drawn (overrides the config file)
    #[arg(long)]
    pub max_moves: Option<u32>,

    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Play games in parallel on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    result: GameResult,
    moves: u32,
    overflowed: bool,
    largest_radius: u8,
}

/// Aggregated selfplay results
#[derive(Clone, Debug)]
struct SelfplayResults {
    games: Vec<GameRecord>,
    white_wins: usize,
    black_wins: usize,
    draws: usize,
    overflowed: usize,
    avg_moves: f32,
    avg_largest_radius: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
///
/// 1. Build the game configuration
/// 2. Play every game with its own seeded RNG
/// 3. Report results
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;
    let base_seed = base_seed(seed);
    let started_at = Utc::now();

    tracing::info!(
        "Starting selfplay: {} games, radius {}, {}, seed {}",
        args.games,
        config.board_radius,
        config.expansions,
        base_seed
    );

    let results = play_games(&config, &args, base_seed)?;

    tracing::info!(
        "Finished {} games in {:.1}s",
        results.games.len(),
        (Utc::now() - started_at).num_milliseconds() as f64 / 1000.0
    );

    report_results(&results, &config, &args, base_seed, started_at)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config file (if any) with command-line overrides applied
fn load_config(args: &SelfplayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load game config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(radius) = args.radius {
        config.board_radius = radius;
    }
    if let Some(expansions) = args.expansions {
        config.expansions = expansions;
    }
    if let Some(max_moves) = args.max_moves {
        config.max_game_length = max_moves;
    }

    config.validate().context("Invalid selfplay configuration")?;
    Ok(config)
}

/// Play all games, sequentially or with rayon
fn play_games(config: &GameConfig, args: &SelfplayArgs, base_seed: u64) -> Result<SelfplayResults> {
    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(args.games as u64)
    };
    progress.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")?);

    let play = |i: usize| {
        let record = play_single_game(config, i + 1, base_seed.wrapping_add(i as u64));
        tracing::debug!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.result,
            record.moves
        );
        progress.inc(1);
        record
    };

    let games: Vec<GameRecord> = if args.parallel {
        (0..args.games).into_par_iter().map(play).collect()
    } else {
        (0..args.games).map(play).collect()
    };
    progress.finish_and_clear();

    Ok(compute_statistics(games))
}

/// Report selfplay results
fn report_results(
    results: &SelfplayResults,
    config: &GameConfig,
    args: &SelfplayArgs,
    base_seed: u64,
    started_at: DateTime<Utc>,
) -> Result<()> {
    if args.json {
        let json = json_results(results, config, base_seed, started_at)?;
        println!("{}", json);
    } else {
        print_text_results(results, config);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game choosing uniformly among legal moves
fn play_single_game(config: &GameConfig, game_number: usize, seed: u64) -> GameRecord {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(config.clone());

    while !state.is_terminal() {
        let legal_moves = state.legal_moves();
        let Some(&mv) = legal_moves.choose(&mut rng) else {
            break;
        };
        state.play(mv);
    }

    GameRecord {
        game_number,
        seed,
        result: state.result(),
        moves: state.move_number(),
        overflowed: state.was_forced_terminal(),
        largest_radius: state.board().largest_radius(),
    }
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SelfplayResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let white_wins = count(GameResult::WhiteWins);
    let black_wins = count(GameResult::BlackWins);
    let draws = count(GameResult::Draw);
    let overflowed = games.iter().filter(|g| g.overflowed).count();

    let (avg_moves, avg_largest_radius) = if games.is_empty() {
        (0.0, 0.0)
    } else {
        let n = games.len() as f32;
        let total_moves: u32 = games.iter().map(|g| g.moves).sum();
        let total_radius: u32 = games.iter().map(|g| g.largest_radius as u32).sum();
        (total_moves as f32 / n, total_radius as f32 / n)
    };

    SelfplayResults {
        games,
        white_wins,
        black_wins,
        draws,
        overflowed,
        avg_moves,
        avg_largest_radius,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Seed for game 0; game `i` uses `base + i`
fn base_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => ChaCha8Rng::from_entropy().gen(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Results as a pretty-printed JSON document
fn json_results(
    results: &SelfplayResults,
    config: &GameConfig,
    base_seed: u64,
    started_at: DateTime<Utc>,
) -> Result<String> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        seed: u64,
        result: String,
        moves: u32,
        overflowed: bool,
        largest_radius: u8,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        started_at: DateTime<Utc>,
        base_seed: u64,
        config: &'a GameConfig,
        game_type: String,
        total_games: usize,
        white_wins: usize,
        black_wins: usize,
        draws: usize,
        overflowed: usize,
        avg_moves: f32,
        avg_largest_radius: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        started_at,
        base_seed,
        config,
        game_type: config.expansions.to_string(),
        total_games: results.games.len(),
        white_wins: results.white_wins,
        black_wins: results.black_wins,
        draws: results.draws,
        overflowed: results.overflowed,
        avg_moves: results.avg_moves,
        avg_largest_radius: results.avg_largest_radius,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                seed: g.seed,
                result: format!("{:?}", g.result),
                moves: g.moves,
                overflowed: g.overflowed,
                largest_radius: g.largest_radius,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output).context("Failed to serialize selfplay results")
}

/// Print results as text
fn print_text_results(results: &SelfplayResults, config: &GameConfig) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ({}, radius {}) ===", config.expansions, config.board_radius);
    println!("Total games: {}", total);
    println!("White wins:  {} ({:.1}%)", results.white_wins, percent(results.white_wins, total));
    println!("Black wins:  {} ({:.1}%)", results.black_wins, percent(results.black_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Overflowed:  {} ({:.1}%)", results.overflowed, percent(results.overflowed, total));
    println!("Avg moves:   {:.1}", results.avg_moves);
    println!("Avg largest radius: {:.2}", results.avg_largest_radius);
}

// ============================================================================
// TESTS
// ============================================================================
