//! Perft command - count leaf nodes of the legal move tree
//!
//! Walks every legal move sequence to a fixed depth from a position and
//! reports node counts per depth. Used to cross-check move generation.

use std::time::Instant;

use anyhow::Result;
use clap::Args;

use hive_core::{GameState, DEFAULT_BOARD_RADIUS};

use crate::show::load_state;

#[derive(Args)]
pub struct PerftArgs {
    /// Search depth in plies
    #[arg(long, default_value = "3")]
    pub depth: u32,

    /// UHP game string to start from (defaults to a new Base+MLP game)
    #[arg(long)]
    pub game: Option<String>,

    /// Board radius
    #[arg(long, default_value_t = DEFAULT_BOARD_RADIUS)]
    pub radius: u8,
}

/// Run perft command
pub fn run(args: PerftArgs) -> Result<()> {
    let state = load_state(args.game.as_deref(), args.radius)?;

    tracing::info!("Perft from {} to depth {}", state.game_string(), args.depth);

    println!("\n=== Perft ===");
    for depth in 1..=args.depth {
        let start = Instant::now();
        let nodes = perft(&state, depth);
        let elapsed = start.elapsed();
        println!("depth {:>2}: {:>12} nodes ({:.2?})", depth, nodes, elapsed);
    }
    Ok(())
}

/// Number of move sequences of exactly `depth` plies. Games that end early
/// contribute nothing past their terminal position.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if state.is_terminal() {
        return 0;
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&state.apply_move(mv), depth - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_core::{Expansions, GameConfig};

    #[test]
    fn test_perft_opening() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(perft(&state, 0), 1);
        assert_eq!(perft(&state, 1), 13);
        assert_eq!(perft(&state, 2), 13 * 78);
    }

    #[test]
    fn test_perft_base_game() {
        let config = GameConfig { expansions: Expansions::NONE, ..GameConfig::default() };
        let state = GameState::new(config);
        assert_eq!(perft(&state, 1), 10);
        // 10 openings, then 10 tiles on 6 sides each (queen excluded)
        assert_eq!(perft(&state, 2), 10 * 60);
    }
}
