//! Move records and legal move generation
//!
//! Generation works in two passes: each bug rule produces a set of
//! destination cells, then every destination is expressed as one `Move` per
//! neighbouring reference tile.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::HexBoard;
use crate::hex::{Direction, Hex};
use crate::tiles::{BugType, Colour, Tile};

// ============================================================================
// MOVE RECORD
// ============================================================================

/// A placement, movement or pass.
///
/// The destination is `direction` from the current position of `reference`.
/// `reference == None` is only used for the opening placement at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Pass,
    Tile {
        tile: Tile,
        reference: Option<Tile>,
        direction: Direction,
    },
}

impl Move {
    pub fn new(tile: Tile, reference: Tile, direction: Direction) -> Self {
        Move::Tile { tile, reference: Some(reference), direction }
    }

    /// First tile of the game, placed at the origin
    pub fn opening(tile: Tile) -> Self {
        Move::Tile { tile, reference: None, direction: Direction::Above }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn tile(&self) -> Option<Tile> {
        match self {
            Move::Pass => None,
            Move::Tile { tile, .. } => Some(*tile),
        }
    }
}

/// DFS frame for slide generation
struct SlideFrame {
    pos: Hex,
    from: Option<Direction>,
    depth: u8,
    next_dir: usize,
}

// ============================================================================
// GENERATION
// ============================================================================

impl HexBoard {
    /// Every legal move for `colour`, sorted and without duplicates.
    /// Returns an empty list when nothing is legal; passing is decided by
    /// the caller.
    pub fn generate_all_moves(&self, colour: Colour, move_number: u32) -> Vec<Move> {
        let mut moves = Vec::new();
        self.generate_placements(&mut moves, colour, move_number);

        // Tiles may only move once their queen is down
        if self.is_in_play(Tile::queen(colour)) {
            for &tile in self.played_tiles() {
                if tile.colour() == colour && Some(tile) != self.last_moved_tile() {
                    self.generate_moves_for(&mut moves, tile, tile.bug());
                }
            }
        }

        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// Moves of a single tile in play using its own bug rules
    pub fn tile_moves(&self, tile: Tile) -> Vec<Move> {
        let mut moves = Vec::new();
        self.generate_moves_for(&mut moves, tile, tile.bug());
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    fn generate_placements(&self, out: &mut Vec<Move>, colour: Colour, move_number: u32) {
        let expansions = self.expansions();
        let candidates = Tile::of_colour(colour).filter(|t| expansions.enables(t.bug()));

        match move_number {
            0 => {
                for tile in candidates.filter(|t| t.bug() != BugType::Queen) {
                    out.push(Move::opening(tile));
                }
            }
            1 => {
                let Some(&first) = self.played_tiles().first() else {
                    return;
                };
                for tile in candidates.filter(|t| t.bug() != BugType::Queen) {
                    for direction in Direction::CARDINAL {
                        out.push(Move::new(tile, first, direction));
                    }
                }
            }
            _ => {
                // Fourth turn of each side: the queen cannot wait any longer
                let queen_forced = (move_number == 6 || move_number == 7)
                    && !self.is_in_play(Tile::queen(colour));

                for tile in candidates {
                    if self.is_in_play(tile) || (queen_forced && tile.bug() != BugType::Queen) {
                        continue;
                    }
                    for &pos in self.influence(colour) {
                        if !self.is_placeable(colour, pos) {
                            continue;
                        }
                        for direction in Direction::CARDINAL {
                            if let Some(neighbour) = self.top_tile_at(pos.neighbour(direction)) {
                                out.push(Move::new(tile, neighbour, direction.opposite()));
                            }
                        }
                    }
                }
            }
        }
    }

    /// Append moves for `tile` behaving as `acting` (which differs from the
    /// tile's own bug only for the mosquito)
    pub(crate) fn generate_moves_for(&self, out: &mut Vec<Move>, tile: Tile, acting: BugType) {
        let Some(start) = self.position_of(tile) else {
            return;
        };
        let mut destinations = FxHashSet::default();

        match acting {
            BugType::Queen => self.slide_destinations(&mut destinations, tile, start, Some(1)),
            BugType::Ant => self.slide_destinations(&mut destinations, tile, start, None),
            BugType::Spider => self.slide_destinations(&mut destinations, tile, start, Some(3)),
            BugType::Grasshopper => self.jump_destinations(&mut destinations, tile, start),
            BugType::Beetle => {
                self.climb_destinations(&mut destinations, tile, start);
                if start.h == 0 {
                    self.slide_destinations(&mut destinations, tile, start, Some(1));
                }
            }
            BugType::Ladybug => self.ladybug_destinations(&mut destinations, tile, start),
            BugType::Mosquito => self.mosquito_moves(out, tile, start),
            BugType::Pillbug => {
                self.slide_destinations(&mut destinations, tile, start, Some(1));
                self.pillbug_throws(out, tile, start);
            }
        }

        self.push_destination_moves(out, tile, start, &destinations);
    }

    fn is_mobile(&self, tile: Tile) -> bool {
        !self.is_tile_pinned(tile) && !self.is_covered(tile)
    }

    /// Express each destination through every neighbouring reference tile
    fn push_destination_moves(
        &self,
        out: &mut Vec<Move>,
        tile: Tile,
        start: Hex,
        destinations: &FxHashSet<Hex>,
    ) {
        for &to in destinations {
            if to.h > 0 {
                if let Some(top) = self.top_tile_at(to) {
                    out.push(Move::new(tile, top, Direction::Above));
                }
                continue;
            }

            for direction in Direction::CARDINAL {
                let Some(neighbour) = self.top_tile_at(to.neighbour(direction)) else {
                    continue;
                };
                let reference = if neighbour != tile {
                    Some(neighbour)
                } else if start.h > 0 {
                    // Stepping off a stack: the tile underneath stays behind
                    self.tile_below(start)
                } else {
                    None
                };
                if let Some(reference) = reference {
                    out.push(Move::new(tile, reference, direction.opposite()));
                }
            }
        }
    }

    // ========================================================================
    // SLIDES
    // ========================================================================

    /// Ground slides of exactly `limit` steps, or any number when `None`.
    ///
    /// Bounded walks release a cell once its subtree is explored so other
    /// paths may cross it; unbounded walks mark cells permanently.
    fn slide_destinations(&self, out: &mut FxHashSet<Hex>, tile: Tile, start: Hex, limit: Option<u8>) {
        if !self.is_mobile(tile) {
            return;
        }

        let mut visited = FxHashSet::default();
        let mut stack = Vec::new();
        if let Some(frame) = self.enter_slide(start, None, 1, limit, start, &mut visited, out) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            if frame.next_dir >= Direction::NUM_CARDINAL {
                let pos = frame.pos;
                stack.pop();
                if limit.is_some() && pos != start {
                    visited.remove(&pos);
                }
                continue;
            }

            let direction = Direction::CARDINAL[frame.next_dir];
            frame.next_dir += 1;
            if Some(direction) == frame.from {
                continue;
            }

            let pos = frame.pos;
            let depth = frame.depth;
            let next = pos.neighbour(direction);
            if visited.contains(&next) || !self.can_slide(pos, direction, start) {
                continue;
            }

            let child = self.enter_slide(next, Some(direction.opposite()), depth + 1, limit, start, &mut visited, out);
            if let Some(child) = child {
                stack.push(child);
            }
        }
    }

    /// Visit `pos` at `depth`: record reachable destinations and decide
    /// whether to keep walking from here
    #[allow(clippy::too_many_arguments)]
    fn enter_slide(
        &self,
        pos: Hex,
        from: Option<Direction>,
        depth: u8,
        limit: Option<u8>,
        start: Hex,
        visited: &mut FxHashSet<Hex>,
        out: &mut FxHashSet<Hex>,
    ) -> Option<SlideFrame> {
        if visited.contains(&pos) || limit.map_or(false, |l| depth > l) {
            return None;
        }

        if limit.map_or(true, |l| depth == l) {
            for direction in Direction::CARDINAL {
                let next = pos.neighbour(direction);
                if Some(direction) != from && !visited.contains(&next) && self.can_slide(pos, direction, start) {
                    out.insert(next);
                }
            }
        }

        if limit == Some(depth) {
            return None;
        }

        visited.insert(pos);
        Some(SlideFrame { pos, from, depth, next_dir: 0 })
    }

    /// One ground step from `pos`, treating the moving tile's cell as empty
    fn can_slide(&self, pos: Hex, direction: Direction, start: Hex) -> bool {
        let next = pos.neighbour(direction);
        self.top_tile_at(next).is_none()
            && !self.is_gated(pos, direction, Some(start))
            && self.is_connected(next, Some(start))
    }

    // ========================================================================
    // CLIMBS AND JUMPS
    // ========================================================================

    /// One step across the top of the hive: onto a neighbouring column, or
    /// down to empty ground when currently stacked
    fn climb_destinations(&self, out: &mut FxHashSet<Hex>, tile: Tile, start: Hex) {
        if !self.is_mobile(tile) {
            return;
        }

        for direction in Direction::CARDINAL {
            let next = start.grounded().neighbour(direction);
            match self.top_tile_at(next).and_then(|t| self.position_of(t)) {
                Some(top) => {
                    let to = top.neighbour(Direction::Above);
                    // Climbing up is gated at the target height
                    let gate = if to.h > start.h {
                        Hex::with_height(start.q, start.r, to.h)
                    } else {
                        start
                    };
                    if !self.is_gated(gate, direction, None) {
                        out.insert(to);
                    }
                }
                None => {
                    if start.h > 0 && !self.is_gated(start, direction, None) {
                        out.insert(next);
                    }
                }
            }
        }
    }

    fn jump_destinations(&self, out: &mut FxHashSet<Hex>, tile: Tile, start: Hex) {
        if !self.is_mobile(tile) {
            return;
        }

        for direction in Direction::CARDINAL {
            let mut to = start.neighbour(direction);
            let mut jumped = false;
            while self.top_tile_at(to).is_some() {
                to = to.neighbour(direction);
                jumped = true;
            }
            if jumped {
                out.insert(to);
            }
        }
    }

    /// Up onto the hive, one step across it, then down
    fn ladybug_destinations(&self, out: &mut FxHashSet<Hex>, tile: Tile, start: Hex) {
        if !self.is_mobile(tile) {
            return;
        }

        let mut first = FxHashSet::default();
        self.climb_destinations(&mut first, tile, start);

        let mut second = FxHashSet::default();
        for &pos in &first {
            self.climb_destinations(&mut second, tile, pos);
        }

        let above_start = start.neighbour(Direction::Above);
        let mut third = FxHashSet::default();
        for &pos in &second {
            if pos.h == 0 || pos == above_start {
                continue;
            }
            self.climb_destinations(&mut third, tile, pos);
        }

        out.extend(third.into_iter().filter(|p| p.h == 0));
    }

    // ========================================================================
    // SPECIAL ABILITIES
    // ========================================================================

    /// The mosquito borrows the movement of every neighbouring bug type.
    /// Pins are checked per borrowed ability, since the pillbug throw works
    /// while pinned.
    fn mosquito_moves(&self, out: &mut Vec<Move>, tile: Tile, start: Hex) {
        if self.is_covered(tile) {
            return;
        }
        if start.h > 0 {
            self.generate_moves_for(out, tile, BugType::Beetle);
            return;
        }

        let mut seen = [false; BugType::NUM_BUG_TYPES];
        for neighbour in self.neighbour_tiles(start) {
            seen[neighbour.bug().index()] = true;
        }

        for bug in BugType::ALL {
            if !seen[bug.index()] || bug == BugType::Mosquito {
                continue;
            }
            // Queen and spider walks are subsets of the ant's
            if matches!(bug, BugType::Queen | BugType::Spider) && seen[BugType::Ant.index()] {
                continue;
            }
            self.generate_moves_for(out, tile, bug);
        }
    }

    /// Pillbug throw: lift an adjacent ground tile over the pillbug onto an
    /// adjacent empty cell. Works while the pillbug itself is pinned.
    fn pillbug_throws(&self, out: &mut Vec<Move>, tile: Tile, start: Hex) {
        if self.is_covered(tile) {
            return;
        }

        let above = start.neighbour(Direction::Above);
        let mut targets = Vec::new();
        let mut landings = Vec::new();

        for direction in Direction::CARDINAL {
            if self.is_gated(above, direction, None) {
                continue;
            }
            let next = start.neighbour(direction);
            match self.top_tile_at(next) {
                Some(target) => {
                    let grounded = self.position_of(target).map_or(false, |p| p.h == 0);
                    if grounded
                        && !self.is_tile_pinned(target)
                        && !self.is_covered(target)
                        && Some(target) != self.last_moved_tile()
                    {
                        targets.push(target);
                    }
                }
                None => landings.push(next),
            }
        }

        for &target in &targets {
            for &landing in &landings {
                for direction in Direction::CARDINAL {
                    if let Some(reference) = self.top_tile_at(landing.neighbour(direction)) {
                        if reference != target {
                            out.push(Move::new(target, reference, direction.opposite()));
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
