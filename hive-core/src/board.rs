//! Board store: a bounded hex grid holding the top tile of every column,
//! plus the bookkeeping the move generator reads (covered tiles,
//! placement influence, pinned columns, last move).

use std::fmt;

use rustc_hash::FxHashSet;

use crate::config::Expansions;
use crate::error::HiveError;
use crate::hex::{Direction, Hex};
use crate::movegen::Move;
use crate::tiles::{Colour, Tile, NUM_TILES};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Board radius used when none is configured
pub const DEFAULT_BOARD_RADIUS: u8 = 8;

/// Largest supported board radius
pub const MAX_BOARD_RADIUS: u8 = 14;

/// A column holds at most seven tiles, so at most six are ever covered
const MAX_COVERED: usize = 6;

// ============================================================================
// BOARD
// ============================================================================

/// Hive board with a fixed radius around the origin
#[derive(Clone, Debug)]
pub struct HexBoard {
    radius: u8,
    expansions: Expansions,
    /// Top tile of each column, indexed by `axial_to_index`
    grid: Vec<Option<Tile>>,
    /// Position of every tile, `None` until played
    positions: [Option<Hex>; NUM_TILES],
    /// Tiles in the order they entered play
    played: Vec<Tile>,
    /// Tiles with another tile on top of them, in the order they were covered
    covered: Vec<Tile>,
    /// Empty ground cells adjacent to each colour's uncovered tiles
    influence: [FxHashSet<Hex>; 2],
    /// Ground columns whose removal would split the hive
    pub(crate) pinned: FxHashSet<Hex>,
    last_moved: Option<Tile>,
    last_moved_from: Option<Hex>,
    largest_radius: u8,
}

impl HexBoard {
    /// Create an empty board. The radius is clamped to `1..=MAX_BOARD_RADIUS`.
    pub fn new(radius: u8, expansions: Expansions) -> Self {
        let radius = radius.clamp(1, MAX_BOARD_RADIUS);
        let dim = 2 * radius as usize + 1;
        Self {
            radius,
            expansions,
            grid: vec![None; dim * dim],
            positions: [None; NUM_TILES],
            played: Vec::with_capacity(NUM_TILES),
            covered: Vec::with_capacity(MAX_COVERED),
            influence: [FxHashSet::default(), FxHashSet::default()],
            pinned: FxHashSet::default(),
            last_moved: None,
            last_moved_from: None,
            largest_radius: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn radius(&self) -> u8 {
        self.radius
    }

    pub fn expansions(&self) -> Expansions {
        self.expansions
    }

    /// Side length of the square backing grid
    pub fn square_dimensions(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// Grid index of a column within the radius
    pub fn axial_to_index(&self, pos: Hex) -> usize {
        let radius = self.radius as isize;
        let q = pos.q as isize + radius;
        let r = pos.r as isize + radius;
        (q + r * self.square_dimensions() as isize) as usize
    }

    pub fn in_bounds(&self, pos: Hex) -> bool {
        pos.distance_to_origin() <= self.radius as i32
    }

    /// Tile on top of the column containing `pos`, if any
    pub fn top_tile_at(&self, pos: Hex) -> Option<Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.grid[self.axial_to_index(pos)]
    }

    /// Tile directly beneath a stacked position
    pub fn tile_below(&self, pos: Hex) -> Option<Tile> {
        if pos.h == 0 {
            return None;
        }
        let below = pos - Direction::Above.offset();
        if let Some(top) = self.top_tile_at(below) {
            if self.positions[top.index()] == Some(below) {
                return Some(top);
            }
        }
        self.covered
            .iter()
            .copied()
            .find(|t| self.positions[t.index()] == Some(below))
    }

    pub fn position_of(&self, tile: Tile) -> Option<Hex> {
        self.positions[tile.index()]
    }

    pub fn is_in_play(&self, tile: Tile) -> bool {
        self.positions[tile.index()].is_some()
    }

    /// Tiles in the order they were placed
    pub fn played_tiles(&self) -> &[Tile] {
        &self.played
    }

    pub fn covered_tiles(&self) -> &[Tile] {
        &self.covered
    }

    pub fn last_moved_tile(&self) -> Option<Tile> {
        self.last_moved
    }

    /// Cell vacated by the last move; `None` for placements and after a pass
    pub fn last_moved_from(&self) -> Option<Hex> {
        self.last_moved_from
    }

    /// Largest distance from the origin any move has targeted
    pub fn largest_radius(&self) -> u8 {
        self.largest_radius
    }

    /// Empty ground cells next to uncovered tiles of `colour`
    pub fn influence(&self, colour: Colour) -> &FxHashSet<Hex> {
        &self.influence[colour.index()]
    }

    /// Top tiles of the six neighbouring columns
    pub fn neighbour_tiles(&self, pos: Hex) -> impl Iterator<Item = Tile> + '_ {
        pos.neighbours().into_iter().filter_map(move |n| self.top_tile_at(n))
    }

    pub fn is_queen_surrounded(&self, colour: Colour) -> bool {
        match self.position_of(Tile::queen(colour)) {
            Some(pos) => pos.neighbours().iter().all(|&n| self.top_tile_at(n).is_some()),
            None => false,
        }
    }

    /// A new tile of `colour` may be dropped on `pos`
    pub fn is_placeable(&self, colour: Colour, pos: Hex) -> bool {
        self.influence[colour.index()].contains(&pos)
            && !self.influence[colour.opponent().index()].contains(&pos)
            && self.top_tile_at(pos).is_none()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Apply a move record. Passing only clears the last-move bookkeeping.
    pub fn apply(&mut self, mv: Move) -> Result<(), HiveError> {
        match mv {
            Move::Pass => {
                self.pass();
                Ok(())
            }
            Move::Tile { tile, reference, direction } => {
                self.move_tile(tile, reference, direction).map(|_| ())
            }
        }
    }

    pub fn pass(&mut self) {
        self.last_moved = None;
        self.last_moved_from = None;
    }

    /// Where a tile lands when moved next to `reference` in `direction`
    pub fn destination(&self, reference: Option<Tile>, direction: Direction) -> Hex {
        let Some(reference) = reference else {
            return Hex::ORIGIN;
        };
        let base = self.positions[reference.index()]
            .unwrap_or_else(|| panic!("reference tile {} is not in play", reference.name()));
        let mut pos = base + direction.offset();

        // Stacking falls onto whatever is on top of the column
        if pos.h > 0 {
            pos.h = match self.top_tile_at(pos) {
                Some(top) => self.positions[top.index()].map_or(0, |p| p.h + 1),
                None => 0,
            };
        }
        pos
    }

    /// Place or move `tile` relative to `reference`, returning where it landed.
    ///
    /// A destination beyond the board radius is rejected without touching
    /// the board.
    pub fn move_tile(
        &mut self,
        tile: Tile,
        reference: Option<Tile>,
        direction: Direction,
    ) -> Result<Hex, HiveError> {
        assert!(!self.is_covered(tile), "cannot move covered tile {}", tile.name());

        let new_pos = self.destination(reference, direction);
        let distance = new_pos.distance_to_origin();
        self.largest_radius = self.largest_radius.max(distance.min(u8::MAX as i32) as u8);

        if distance > self.radius as i32 {
            tracing::debug!(
                "Rejected {} to {}: distance {} exceeds radius {}",
                tile.name(),
                new_pos,
                distance,
                self.radius
            );
            return Err(HiveError::OutOfBounds { pos: new_pos, distance, radius: self.radius });
        }

        let old_pos = self.positions[tile.index()];
        if old_pos.is_none() {
            self.played.push(tile);
        }
        self.last_moved_from = old_pos;

        if let Some(old_pos) = old_pos {
            self.vacate(old_pos);
        }

        let new_idx = self.axial_to_index(new_pos);
        if let Some(below) = self.grid[new_idx] {
            debug_assert!(self.covered.len() < MAX_COVERED);
            self.covered.push(below);
        }
        self.grid[new_idx] = Some(tile);
        self.positions[tile.index()] = Some(new_pos);
        self.last_moved = Some(tile);

        // Vacating or covering a cell can change either colour's frontier
        for colour in Colour::BOTH {
            self.update_influence(colour);
        }
        self.update_articulation_points();

        Ok(new_pos)
    }

    /// Clear a cell, exposing the highest covered tile of a stack
    fn vacate(&mut self, pos: Hex) {
        let idx = self.axial_to_index(pos);
        if pos.h == 0 {
            self.grid[idx] = None;
            return;
        }
        let column = pos.grounded();
        let exposed = self
            .covered
            .iter()
            .rposition(|t| self.positions[t.index()].map(Hex::grounded) == Some(column));
        let restored = exposed.map(|i| self.covered.remove(i));
        self.grid[idx] = restored;
    }

    /// Recompute the empty cells bordering `colour`'s uncovered tiles
    fn update_influence(&mut self, colour: Colour) {
        let mut influence = std::mem::take(&mut self.influence[colour.index()]);
        influence.clear();

        for &tile in &self.played {
            if tile.colour() != colour || self.is_covered(tile) {
                continue;
            }
            let Some(pos) = self.positions[tile.index()] else {
                continue;
            };
            // Cells past the radius are kept; placing there fails at move time
            for n in pos.grounded().neighbours() {
                if self.top_tile_at(n).is_none() {
                    influence.insert(n);
                }
            }
        }

        self.influence[colour.index()] = influence;
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Text rendering: one row per `r`, then the contents of every stack.
///
/// `*` marks the last moved tile and the cell it left; `^` marks a stack.
impl fmt::Display for HexBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let radius = self.radius as i32;
        let mut stacks = Vec::new();

        for r in -radius..=radius {
            let indent = (r.abs() as usize * 5) / 2;
            let mut line = " ".repeat(indent);
            let q_min = (-radius).max(-r - radius);
            let q_max = radius.min(-r + radius);

            for q in q_min..=q_max {
                let pos = Hex::new(q as i8, r as i8);
                let cell = match self.top_tile_at(pos) {
                    Some(tile) => {
                        let stacked = self.positions[tile.index()].map_or(false, |p| p.h > 0);
                        if stacked {
                            stacks.push(tile);
                        }
                        let mut label = String::new();
                        if stacked {
                            label.push('^');
                        }
                        label.push_str(tile.name());
                        if self.last_moved == Some(tile) {
                            label.push('*');
                        }
                        label
                    }
                    None if self.last_moved_from.map(Hex::grounded) == Some(pos) => "*".to_string(),
                    None => "-".to_string(),
                };
                line.push_str(&format!("{:^5}", cell));
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        for top in stacks {
            let mut column = vec![top.name()];
            let mut pos = self.positions[top.index()];
            while let Some(below) = pos.and_then(|p| self.tile_below(p)) {
                column.push(below.name());
                pos = self.positions[below.index()];
            }
            writeln!(f, "{}", column.join(" > "))?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
