//! Error types for the rules engine

use crate::hex::Hex;

/// Recoverable failures. Contract violations (moving a covered tile,
/// referencing a tile that is not in play) panic instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HiveError {
    #[error("Unknown tile: {0}")]
    UnknownTile(String),

    #[error("Malformed move string: {0}")]
    MalformedMove(String),

    #[error("Action {0} is outside the action space")]
    InvalidAction(u32),

    #[error("Unknown game type: {0}")]
    UnknownGameType(String),

    #[error("Malformed game string: {0}")]
    MalformedGameString(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Destination {pos} is {distance} cells from the origin, beyond board radius {radius}")]
    OutOfBounds { pos: Hex, distance: i32, radius: u8 },

    #[error("Invalid board radius: {0}")]
    InvalidRadius(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
