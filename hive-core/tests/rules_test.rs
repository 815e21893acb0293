//! Integration tests for the Hive rules engine
//!
//! Rule scenarios exercised through the public board and game APIs

use hive_core::{
    action_to_move, move_to_action, Colour, Direction, Expansions, GameConfig, GameState, Hex,
    HexBoard, HiveError, Move, Tile, NUM_DISTINCT_ACTIONS,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Board with the given `(tile, reference, direction)` placements applied
fn build(radius: u8, layout: &[(Tile, Option<Tile>, Direction)]) -> HexBoard {
    let mut board = HexBoard::new(radius, Expansions::ALL);
    for &(tile, reference, direction) in layout {
        board.move_tile(tile, reference, direction).unwrap();
    }
    board
}

fn destination_of(board: &HexBoard, mv: &Move) -> Hex {
    match *mv {
        Move::Tile { reference, direction, .. } => board.destination(reference, direction),
        Move::Pass => panic!("pass has no destination"),
    }
}

/// Everything observable about a board, for before/after comparisons
#[derive(Debug, PartialEq)]
struct Snapshot {
    positions: Vec<Option<Hex>>,
    played: Vec<Tile>,
    covered: Vec<Tile>,
    white_influence: Vec<Hex>,
    black_influence: Vec<Hex>,
    pinned: Vec<Hex>,
    last_moved: Option<Tile>,
    last_moved_from: Option<Hex>,
}

fn snapshot(board: &HexBoard) -> Snapshot {
    let sorted = |set: &rustc_hash::FxHashSet<Hex>| {
        let mut cells: Vec<Hex> = set.iter().copied().collect();
        cells.sort();
        cells
    };
    Snapshot {
        positions: Tile::all().map(|t| board.position_of(t)).collect(),
        played: board.played_tiles().to_vec(),
        covered: board.covered_tiles().to_vec(),
        white_influence: sorted(board.influence(Colour::White)),
        black_influence: sorted(board.influence(Colour::Black)),
        pinned: sorted(board.pinned_positions()),
        last_moved: board.last_moved_tile(),
        last_moved_from: board.last_moved_from(),
    }
}

// ============================================================================
// SCENARIO TESTS
// ============================================================================

#[test]
fn test_second_tile_in_every_direction() {
    let mut state = GameState::new(GameConfig::default());
    state.play_str("wA1").unwrap();

    for text in ["bA1 wA1/", "bA1 wA1-", "bA1 wA1\\", "bA1 /wA1", "bA1 -wA1", "bA1 \\wA1"] {
        let mut next = state.clone();
        next.play_str(text).unwrap();
        assert_eq!(next.board().position_of(Tile::BA1).unwrap().distance_to_origin(), 1);
    }

    // Nothing lands two cells away
    for mv in state.legal_moves() {
        assert_eq!(destination_of(state.board(), &mv).distance_to_origin(), 1);
    }
}

#[test]
fn test_queen_surround_and_release() {
    let mut board = build(
        8,
        &[
            (Tile::WQ, None, Direction::Above),
            (Tile::BA1, Some(Tile::WQ), Direction::NorthEast),
            (Tile::BA2, Some(Tile::WQ), Direction::East),
            (Tile::BA3, Some(Tile::WQ), Direction::SouthEast),
            (Tile::BG1, Some(Tile::WQ), Direction::SouthWest),
            (Tile::BG2, Some(Tile::WQ), Direction::West),
            (Tile::BG3, Some(Tile::WQ), Direction::NorthWest),
        ],
    );
    assert!(board.is_queen_surrounded(Colour::White));

    board.move_tile(Tile::BA1, Some(Tile::BA2), Direction::East).unwrap();
    assert!(!board.is_queen_surrounded(Colour::White));
}

#[test]
fn test_grasshopper_in_every_direction() {
    for direction in Direction::CARDINAL {
        let board = build(
            8,
            &[
                (Tile::WG1, None, Direction::Above),
                (Tile::WQ, Some(Tile::WG1), direction),
                (Tile::BQ, Some(Tile::WQ), direction),
            ],
        );
        let moves = board.tile_moves(Tile::WG1);
        assert!(!moves.is_empty());

        let beyond = Hex::ORIGIN + direction.offset() + direction.offset() + direction.offset();
        for mv in &moves {
            assert_eq!(destination_of(&board, mv), beyond);
        }
    }
}

#[test]
fn test_bridge_releases_pin() {
    let mut board = build(
        8,
        &[
            (Tile::WQ, None, Direction::Above),
            (Tile::BQ, Some(Tile::WQ), Direction::NorthEast),
            (Tile::WA1, Some(Tile::WQ), Direction::West),
        ],
    );
    assert!(board.is_tile_pinned(Tile::WQ));
    assert!(board.tile_moves(Tile::WQ).is_empty());

    board.move_tile(Tile::WA2, Some(Tile::WQ), Direction::NorthWest).unwrap();
    assert!(!board.is_tile_pinned(Tile::WQ));
    assert!(!board.tile_moves(Tile::WQ).is_empty());
}

#[test]
fn test_move_past_radius_changes_nothing() {
    let mut board = build(
        2,
        &[
            (Tile::WQ, None, Direction::Above),
            (Tile::BQ, Some(Tile::WQ), Direction::East),
            (Tile::BA1, Some(Tile::BQ), Direction::East),
            (Tile::WA1, Some(Tile::WQ), Direction::West),
        ],
    );
    let before = snapshot(&board);

    let result = board.move_tile(Tile::BA2, Some(Tile::BA1), Direction::East);
    assert!(matches!(result, Err(HiveError::OutOfBounds { distance: 3, radius: 2, .. })));
    assert_eq!(snapshot(&board), before);

    // Moving a tile in play past the edge also leaves it where it was
    let result = board.move_tile(Tile::WA1, Some(Tile::BA1), Direction::SouthEast);
    assert!(result.is_err());
    assert_eq!(snapshot(&board), before);
}

// ============================================================================
// NOTATION AND ACTIONS
// ============================================================================

#[test]
fn test_every_action_has_notation() {
    for action in 0..NUM_DISTINCT_ACTIONS as u16 {
        let mv = action_to_move(action).unwrap();
        let parsed: Move = mv.to_string().parse().unwrap();
        assert_eq!(parsed, mv);
        assert_eq!(move_to_action(parsed), action);
    }
}

#[test]
fn test_base_game_never_offers_expansions() {
    let config = GameConfig { expansions: Expansions::NONE, ..GameConfig::default() };
    let mut state = GameState::new(config);
    for mv in ["wA1", "bA1 wA1-", "wQ -wA1", "bQ bA1-"] {
        state.play_str(mv).unwrap();
    }
    for mv in state.legal_moves() {
        let tile = mv.tile().unwrap();
        assert!(!tile.bug().is_expansion(), "{} offered in a base game", mv);
    }
}

#[test]
fn test_clone_is_independent() {
    let mut state = GameState::new(GameConfig::default());
    for mv in ["wG1", "bG1 wG1-", "wQ \\wG1", "bQ bG1-"] {
        state.play_str(mv).unwrap();
    }
    let before = snapshot(state.board());
    let text = state.game_string();

    let mut copy = state.clone();
    assert_eq!(snapshot(copy.board()), before);
    assert_eq!(copy.legal_moves(), state.legal_moves());

    let mv = copy.legal_moves()[0];
    copy.play(mv);
    assert_eq!(snapshot(state.board()), before);
    assert_eq!(state.game_string(), text);
}
