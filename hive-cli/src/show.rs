//! Show command - print a position
//!
//! Replays an optional UHP game string and prints the board, game string,
//! result and (optionally) every legal move.

use anyhow::{Context, Result};
use clap::Args;

use hive_core::{GameConfig, GameState, DEFAULT_BOARD_RADIUS};

#[derive(Args)]
pub struct ShowArgs {
    /// UHP game string (defaults to a new Base+MLP game)
    #[arg(long)]
    pub game: Option<String>,

    /// Board radius
    #[arg(long, default_value_t = DEFAULT_BOARD_RADIUS)]
    pub radius: u8,

    /// List every legal move
    #[arg(long)]
    pub moves: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run show command
pub fn run(args: ShowArgs) -> Result<()> {
    let state = load_state(args.game.as_deref(), args.radius)?;

    if args.json {
        print_json(&state, args.moves)?;
    } else {
        print_text(&state, args.moves);
    }
    Ok(())
}

/// Fresh game, or the position reached by replaying `game`
pub fn load_state(game: Option<&str>, radius: u8) -> Result<GameState> {
    let config = GameConfig {
        board_radius: radius,
        ..GameConfig::default()
    };
    config.validate()?;

    match game {
        Some(text) => GameState::from_game_string(text, &config)
            .with_context(|| format!("Failed to replay game string: {}", text)),
        None => Ok(GameState::new(config)),
    }
}

fn print_json(state: &GameState, with_moves: bool) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        game_string: String,
        result: hive_core::GameResult,
        turn: String,
        largest_radius: u8,
        board: String,
        legal_moves: Option<Vec<String>>,
    }

    let output = JsonOutput {
        game_string: state.game_string(),
        result: state.result(),
        turn: state.turn_string(),
        largest_radius: state.board().largest_radius(),
        board: state.board().to_string(),
        legal_moves: with_moves
            .then(|| state.legal_moves().iter().map(|mv| mv.to_string()).collect()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(state: &GameState, with_moves: bool) {
    println!("{}", state.board());
    println!("Game:   {}", state.game_string());
    println!("Result: {:?}", state.result());

    if with_moves {
        let moves = state.legal_moves();
        println!("\n=== Legal moves ({}) ===", moves.len());
        for mv in &moves {
            println!("{}", mv);
        }
    }
}
