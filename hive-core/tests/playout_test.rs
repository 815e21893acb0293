//! Random playout tests
//!
//! Plays seeded random games and checks board invariants after every move

use hive_core::{
    move_to_action, action_to_move, Colour, Expansions, GameConfig, GameResult, GameState, Hex,
    HexBoard, Move, Tile,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

const MAX_PLIES: u32 = 250;

/// Occupied ground columns form a single connected group
fn assert_one_hive(board: &HexBoard) {
    let columns: FxHashSet<Hex> = board
        .played_tiles()
        .iter()
        .filter_map(|&t| board.position_of(t))
        .map(|p| p.grounded())
        .collect();
    let Some(&start) = columns.iter().next() else {
        return;
    };

    let mut seen = FxHashSet::default();
    let mut stack = vec![start];
    seen.insert(start);
    while let Some(pos) = stack.pop() {
        for n in pos.neighbours() {
            if columns.contains(&n) && seen.insert(n) {
                stack.push(n);
            }
        }
    }
    assert_eq!(seen.len(), columns.len(), "hive split:\n{}", board);
}

/// Every uncovered tile is the top of its column
fn assert_positions_consistent(board: &HexBoard) {
    for &tile in board.played_tiles() {
        let pos = board.position_of(tile).unwrap();
        if board.is_covered(tile) {
            assert_ne!(board.top_tile_at(pos), Some(tile));
        } else {
            assert_eq!(board.top_tile_at(pos), Some(tile), "{} not on top:\n{}", tile, board);
        }
    }
    assert!(board.covered_tiles().len() <= 6);
}

fn assert_moves_well_formed(state: &GameState, moves: &[Move]) {
    let board = state.board();
    for mv in moves {
        assert_eq!(mv.to_string().parse::<Move>().unwrap(), *mv);
        assert_eq!(action_to_move(move_to_action(*mv)).unwrap(), *mv);

        let Some(tile) = mv.tile() else {
            continue;
        };
        assert!(!board.is_covered(tile), "{} moves a covered tile", mv);
        assert!(!board.is_tile_pinned(tile), "{} moves a pinned tile", mv);
        assert_ne!(Some(tile), board.last_moved_tile(), "{} moves the last moved tile", mv);
    }
}

fn play_random_game(seed: u64, config: GameConfig) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(config);

    while !state.is_terminal() && state.move_number() < MAX_PLIES {
        let moves = state.legal_moves();
        assert!(!moves.is_empty());
        assert_moves_well_formed(&state, &moves);

        let mv = *moves.choose(&mut rng).unwrap();
        state.play(mv);

        assert_one_hive(state.board());
        assert_positions_consistent(state.board());
    }
    state
}

// ============================================================================
// PLAYOUT TESTS
// ============================================================================

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..12 {
        let state = play_random_game(seed, GameConfig::default());
        assert!(state.move_number() > 0);
    }
}

#[test]
fn test_random_base_games_keep_invariants() {
    let config = GameConfig { expansions: Expansions::NONE, ..GameConfig::default() };
    for seed in 100..106 {
        let state = play_random_game(seed, config.clone());
        for &tile in state.board().played_tiles() {
            assert!(!tile.bug().is_expansion());
        }
    }
}

#[test]
fn test_small_board_overflow_ends_in_draw() {
    let config = GameConfig { board_radius: 2, ..GameConfig::default() };
    let mut overflowed = 0;
    for seed in 0..10 {
        let state = play_random_game(seed, config.clone());
        if state.was_forced_terminal() {
            assert_eq!(state.result(), GameResult::Draw);
            assert!(state.board().largest_radius() > 2);
            overflowed += 1;
        }
        for &tile in state.board().played_tiles() {
            assert!(state.board().position_of(tile).unwrap().distance_to_origin() <= 2);
        }
    }
    assert!(overflowed > 0);
}

#[test]
fn test_same_seed_same_game() {
    let a = play_random_game(7, GameConfig::default());
    let b = play_random_game(7, GameConfig::default());
    assert_eq!(a.game_string(), b.game_string());
}

#[test]
fn test_game_strings_replay() {
    for seed in 20..24 {
        let state = play_random_game(seed, GameConfig::default());
        if state.was_forced_terminal() {
            continue;
        }
        let replayed = GameState::from_game_string(&state.game_string(), state.config()).unwrap();
        assert_eq!(replayed.game_string(), state.game_string());
        for colour in [Colour::White, Colour::Black] {
            let queen = Tile::queen(colour);
            assert_eq!(replayed.board().position_of(queen), state.board().position_of(queen));
        }
    }
}
