//! Game state: turn order, terminal detection and UHP game strings

use serde::{Deserialize, Serialize};

use crate::action::{action_to_move, move_to_action, Action};
use crate::board::HexBoard;
use crate::config::{Expansions, GameConfig};
use crate::error::HiveError;
use crate::movegen::Move;
use crate::tiles::Colour;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

/// UHP game progress names
const PROGRESS_NAMES: [&str; 5] = ["NotStarted", "InProgress", "Draw", "WhiteWins", "BlackWins"];

/// Complete game state
#[derive(Clone, Debug)]
pub struct GameState {
    board: HexBoard,
    config: GameConfig,
    current_player: Colour,
    /// Moves played so far by both sides
    move_number: u32,
    history: Vec<Move>,
    /// Set when a move could not be applied within the board radius
    force_terminal: bool,
}

impl GameState {
    /// New game. An out-of-range radius is clamped by the board and the
    /// stored config records the radius actually used.
    pub fn new(mut config: GameConfig) -> Self {
        let board = HexBoard::new(config.board_radius, config.expansions);
        config.board_radius = board.radius();
        Self {
            board,
            config,
            current_player: Colour::White,
            move_number: 0,
            history: Vec::new(),
            force_terminal: false,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &HexBoard {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Colour {
        self.current_player
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// A move fell outside the board radius and ended the game
    pub fn was_forced_terminal(&self) -> bool {
        self.force_terminal
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal moves for the side to move; `[Pass]` when nothing else is legal
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        let moves = self.board.generate_all_moves(self.current_player, self.move_number);
        if moves.is_empty() {
            vec![Move::Pass]
        } else {
            moves
        }
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.legal_moves().into_iter().map(move_to_action).collect();
        actions.sort_unstable();
        actions
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move without checking legality. A move the board cannot hold
    /// ends the game in a draw; the turn still passes to the other side.
    pub fn play(&mut self, mv: Move) {
        if let Err(err) = self.board.apply(mv) {
            tracing::warn!("Forcing terminal state after move {} ({}): {}", self.move_number, mv, err);
            self.force_terminal = true;
        }
        self.history.push(mv);
        self.current_player = self.current_player.opponent();
        self.move_number += 1;
    }

    /// Copy of this state with `mv` applied
    pub fn apply_move(&self, mv: Move) -> Self {
        let mut new_state = self.clone();
        new_state.play(mv);
        new_state
    }

    pub fn apply_action(&mut self, action: Action) -> Result<(), HiveError> {
        let mv = action_to_move(action)?;
        self.play(mv);
        Ok(())
    }

    /// Parse a UHP move and play it if it is legal
    pub fn play_str(&mut self, text: &str) -> Result<Move, HiveError> {
        let mv: Move = text.parse()?;
        if !self.legal_moves().contains(&mv) {
            tracing::debug!("Rejected illegal move {:?} at move {}", text, self.move_number);
            return Err(HiveError::IllegalMove(text.trim().to_string()));
        }
        self.play(mv);
        Ok(mv)
    }

    // ========================================================================
    // TERMINAL STATE
    // ========================================================================

    /// The opponent of `colour` has a surrounded queen
    pub fn win_condition_met(&self, colour: Colour) -> bool {
        self.board.is_queen_surrounded(colour.opponent())
    }

    pub fn result(&self) -> GameResult {
        match (self.win_condition_met(Colour::White), self.win_condition_met(Colour::Black)) {
            (true, true) => GameResult::Draw,
            (true, false) => GameResult::WhiteWins,
            (false, true) => GameResult::BlackWins,
            (false, false) => {
                if self.force_terminal || self.move_number >= self.config.max_game_length {
                    GameResult::Draw
                } else {
                    GameResult::Ongoing
                }
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.result() != GameResult::Ongoing
    }

    /// Per-player returns, `[white, black]`
    pub fn returns(&self) -> [f64; 2] {
        match self.result() {
            GameResult::WhiteWins => [1.0, -1.0],
            GameResult::BlackWins => [-1.0, 1.0],
            GameResult::Draw | GameResult::Ongoing => [0.0, 0.0],
        }
    }

    // ========================================================================
    // UHP GAME STRINGS
    // ========================================================================

    pub fn progress_string(&self) -> &'static str {
        if self.move_number == 0 {
            return "NotStarted";
        }
        match self.result() {
            GameResult::Ongoing => "InProgress",
            GameResult::Draw => "Draw",
            GameResult::WhiteWins => "WhiteWins",
            GameResult::BlackWins => "BlackWins",
        }
    }

    /// Side to move and its turn count, e.g. `Black[3]`
    pub fn turn_string(&self) -> String {
        format!("{}[{}]", self.current_player.name(), self.move_number / 2 + 1)
    }

    /// `GameType;GameState;Turn;Move1;Move2;...`
    pub fn game_string(&self) -> String {
        let mut parts = vec![
            self.config.expansions.to_string(),
            self.progress_string().to_string(),
            self.turn_string(),
        ];
        parts.extend(self.history.iter().map(|mv| mv.to_string()));
        parts.join(";")
    }

    /// Rebuild a game by replaying a UHP game string. The game type in the
    /// string overrides the expansions of `base`.
    pub fn from_game_string(text: &str, base: &GameConfig) -> Result<Self, HiveError> {
        let mut fields = text.trim().split(';');
        let malformed = || HiveError::MalformedGameString(text.to_string());

        let expansions: Expansions = fields.next().ok_or_else(malformed)?.parse()?;
        let progress = fields.next().ok_or_else(malformed)?;
        let turn = fields.next().ok_or_else(malformed)?;
        if !PROGRESS_NAMES.contains(&progress) {
            return Err(malformed());
        }

        let config = GameConfig { expansions, ..base.clone() };
        config.validate()?;
        let mut state = GameState::new(config);
        for mv in fields.filter(|f| !f.trim().is_empty()) {
            state.play_str(mv)?;
        }

        if state.turn_string() != turn.trim() {
            return Err(malformed());
        }
        Ok(state)
    }
}

// ============================================================================
// TESTS
// ============================================================================
