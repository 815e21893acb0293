//! Hive Core - Rules engine for the board game Hive
//!
//! This crate provides the game logic:
//! - Hex geometry (axial coordinates with stacking height)
//! - Tile catalog and board store
//! - One-hive and freedom-of-movement analysis
//! - Legal move generation for every bug, including the Mosquito, Ladybug
//!   and Pillbug expansions
//! - Turn order, terminal detection and UHP notation
//! - Dense action encoding and observation planes for learning agents

pub mod hex;
pub mod tiles;
pub mod board;
pub mod connectivity;
pub mod movegen;
pub mod game;
pub mod notation;
pub mod action;
pub mod observation;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use hex::{Direction, Hex};
pub use tiles::{BugType, Colour, Tile, NUM_TILES, TILES};
pub use board::{HexBoard, DEFAULT_BOARD_RADIUS, MAX_BOARD_RADIUS};
pub use movegen::Move;
pub use game::{GameResult, GameState};
pub use action::{action_to_move, move_to_action, Action, NUM_DISTINCT_ACTIONS, PASS_ACTION};
pub use observation::{observation_shape, observation_tensor};
pub use config::{Expansions, GameConfig};
pub use error::HiveError;
