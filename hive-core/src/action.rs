//! Dense integer encoding of moves
//!
//! `action = from * 196 + to * 7 + direction`, where `from` is the moving
//! tile and `to` the reference tile. The opening placement has no reference
//! and is encoded as `to == from` with `Above`. Pass is the last action.

use crate::error::HiveError;
use crate::hex::Direction;
use crate::movegen::Move;
use crate::tiles::{Tile, NUM_TILES};

pub type Action = u16;

/// `[from][to][direction]`
pub const ACTION_SHAPE: [usize; 3] = [NUM_TILES, NUM_TILES, Direction::NUM_DIRECTIONS];

pub const NUM_DISTINCT_ACTIONS: usize = NUM_TILES * NUM_TILES * Direction::NUM_DIRECTIONS + 1;

pub const PASS_ACTION: Action = (NUM_DISTINCT_ACTIONS - 1) as Action;

const FROM_STRIDE: usize = NUM_TILES * Direction::NUM_DIRECTIONS;

pub fn move_to_action(mv: Move) -> Action {
    match mv {
        Move::Pass => PASS_ACTION,
        Move::Tile { tile, reference, direction } => {
            let (to, direction) = match reference {
                Some(reference) => (reference, direction),
                None => (tile, Direction::Above),
            };
            (tile.index() * FROM_STRIDE + to.index() * Direction::NUM_DIRECTIONS + direction.index()) as Action
        }
    }
}

pub fn action_to_move(action: Action) -> Result<Move, HiveError> {
    let index = action as usize;
    if index >= NUM_DISTINCT_ACTIONS {
        return Err(HiveError::InvalidAction(action as u32));
    }
    if action == PASS_ACTION {
        return Ok(Move::Pass);
    }

    let invalid = || HiveError::InvalidAction(action as u32);
    let tile = Tile::from_index(index / FROM_STRIDE).ok_or_else(invalid)?;
    let to = Tile::from_index(index % FROM_STRIDE / Direction::NUM_DIRECTIONS).ok_or_else(invalid)?;
    let direction = Direction::from_index(index % Direction::NUM_DIRECTIONS).ok_or_else(invalid)?;

    if to == tile && direction == Direction::Above {
        Ok(Move::opening(tile))
    } else {
        Ok(Move::new(tile, to, direction))
    }
}
