//! Player-relative feature planes describing a game state
//!
//! Layout with `B` enabled bug types, indexed `[plane][r + R][q + R]`:
//! - `0..B`: the player's tiles by bug type
//! - `B..2B`: the opponent's tiles by bug type
//! - `2B`, `2B + 1`: pinned tiles (player, opponent)
//! - `2B + 2`, `2B + 3`: cells where each side may place
//! - `2B + 4`, `2B + 5`: covered tiles (player, opponent)

use crate::board::MAX_BOARD_RADIUS;
use crate::config::{Expansions, GameConfig};
use crate::game::GameState;
use crate::hex::Hex;
use crate::tiles::{BugType, Colour};

/// Planes after the bug-type planes
const EXTRA_PLANES: usize = 6;

/// Tensor shape for a game built from `config`, using the same radius
/// clamping as `HexBoard::new`
pub fn observation_shape(config: &GameConfig) -> [usize; 3] {
    let radius = config.board_radius.clamp(1, MAX_BOARD_RADIUS);
    let dim = 2 * radius as usize + 1;
    [2 * config.expansions.num_bug_types() + EXTRA_PLANES, dim, dim]
}

/// Plane of a bug type among the enabled ones
fn bug_plane(expansions: Expansions, bug: BugType) -> Option<usize> {
    expansions.bug_types().position(|b| b == bug)
}

pub fn observation_tensor(state: &GameState, player: Colour) -> Vec<f32> {
    let board = state.board();
    let expansions = board.expansions();
    let num_bugs = expansions.num_bug_types();
    let radius = board.radius() as i32;
    let dim = board.square_dimensions();
    let mut tensor = vec![0.0f32; (2 * num_bugs + EXTRA_PLANES) * dim * dim];

    let mut set = |plane: usize, pos: Hex| {
        let row = (pos.r as i32 + radius) as usize;
        let col = (pos.q as i32 + radius) as usize;
        tensor[plane * dim * dim + row * dim + col] = 1.0;
    };

    let side = |colour: Colour| usize::from(colour != player);

    for &tile in board.played_tiles() {
        let Some(pos) = board.position_of(tile) else {
            continue;
        };
        let Some(plane) = bug_plane(expansions, tile.bug()) else {
            continue;
        };
        let offset = side(tile.colour());

        set(plane + offset * num_bugs, pos);
        if board.is_tile_pinned(tile) {
            set(2 * num_bugs + offset, pos);
        }
        if board.is_covered(tile) {
            set(2 * num_bugs + 4 + offset, pos);
        }
    }

    for colour in Colour::BOTH {
        for &pos in board.influence(colour) {
            if board.in_bounds(pos) && board.is_placeable(colour, pos) {
                set(2 * num_bugs + 2 + side(colour), pos);
            }
        }
    }

    tensor
}
