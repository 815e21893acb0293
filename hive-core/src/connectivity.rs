//! One-hive and freedom-of-movement analysis
//!
//! Pinned columns are the cut vertices of the graph whose vertices are
//! occupied ground columns and whose edges join adjacent columns. They are
//! found with an iterative Tarjan traversal after every mutation.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::HexBoard;
use crate::hex::{Direction, Hex};
use crate::tiles::{Colour, Tile};

impl HexBoard {
    /// Removing the column at `pos` would split the hive.
    /// Stacked positions are never pinned.
    pub fn is_pinned(&self, pos: Hex) -> bool {
        pos.h == 0 && self.pinned.contains(&pos)
    }

    pub fn is_tile_pinned(&self, tile: Tile) -> bool {
        self.position_of(tile).map_or(false, |pos| self.is_pinned(pos))
    }

    /// Pinned ground columns
    pub fn pinned_positions(&self) -> &FxHashSet<Hex> {
        &self.pinned
    }

    /// Some other tile sits on top of `tile`
    pub fn is_covered(&self, tile: Tile) -> bool {
        self.covered_tiles().contains(&tile)
    }

    /// A covered tile occupies exactly `pos`
    pub fn is_covered_at(&self, pos: Hex) -> bool {
        self.covered_tiles().iter().any(|&t| self.position_of(t) == Some(pos))
    }

    /// Some neighbouring column other than `excluding` is occupied
    pub fn is_connected(&self, pos: Hex, excluding: Option<Hex>) -> bool {
        let excluded = excluding.map(Hex::grounded);
        pos.neighbours()
            .into_iter()
            .any(|n| Some(n.grounded()) != excluded && self.top_tile_at(n).is_some())
    }

    /// Moving from `pos` in `direction` is blocked by the two flanking
    /// columns. A flank counts when it reaches at least the mover's height.
    /// On the ground a slide also needs exactly one flank to keep contact;
    /// above the ground only a full squeeze blocks.
    pub fn is_gated(&self, pos: Hex, direction: Direction, excluding: Option<Hex>) -> bool {
        let excluded = excluding.map(Hex::grounded);
        let flank_present = |cell: Hex| {
            Some(cell.grounded()) != excluded
                && self
                    .top_tile_at(cell)
                    .and_then(|t| self.position_of(t))
                    .map_or(false, |p| p.h >= pos.h)
        };

        let cw = flank_present(pos.neighbour(direction.clockwise()));
        let ccw = flank_present(pos.neighbour(direction.counter_clockwise()));

        if pos.h == 0 {
            cw == ccw
        } else {
            cw && ccw
        }
    }

    /// Root for the articulation search: a queen if one is down, else the
    /// first tile played
    fn articulation_root(&self) -> Option<Hex> {
        Colour::BOTH
            .iter()
            .find_map(|&c| self.position_of(Tile::queen(c)))
            .or_else(|| self.played_tiles().first().and_then(|&t| self.position_of(t)))
            .map(Hex::grounded)
    }

    pub(crate) fn update_articulation_points(&mut self) {
        self.pinned = match self.articulation_root() {
            Some(root) => find_cut_vertices(self, root),
            None => FxHashSet::default(),
        };
    }
}

/// DFS frame for the explicit-stack traversal
struct Frame {
    vertex: Hex,
    parent: Option<Hex>,
    next_dir: usize,
    children: u32,
}

/// Cut vertices of the occupied-column graph reachable from `root`
pub fn find_cut_vertices(board: &HexBoard, root: Hex) -> FxHashSet<Hex> {
    let mut entry: FxHashMap<Hex, u32> = FxHashMap::default();
    let mut low: FxHashMap<Hex, u32> = FxHashMap::default();
    let mut cut = FxHashSet::default();
    let mut counter = 0u32;

    entry.insert(root, counter);
    low.insert(root, counter);
    counter += 1;

    let mut stack = vec![Frame { vertex: root, parent: None, next_dir: 0, children: 0 }];

    while let Some(frame) = stack.last_mut() {
        if frame.next_dir < Direction::NUM_CARDINAL {
            let next = frame.vertex.neighbour(Direction::CARDINAL[frame.next_dir]);
            frame.next_dir += 1;

            if board.top_tile_at(next).is_none() || Some(next) == frame.parent {
                continue;
            }

            let vertex = frame.vertex;
            match entry.get(&next).copied() {
                Some(seen) => {
                    // Back edge
                    if let Some(l) = low.get_mut(&vertex) {
                        *l = (*l).min(seen);
                    }
                }
                None => {
                    frame.children += 1;
                    entry.insert(next, counter);
                    low.insert(next, counter);
                    counter += 1;
                    stack.push(Frame { vertex: next, parent: Some(vertex), next_dir: 0, children: 0 });
                }
            }
            continue;
        }

        let Some(done) = stack.pop() else { break };
        match done.parent {
            Some(parent) => {
                let child_low = low[&done.vertex];
                if let Some(l) = low.get_mut(&parent) {
                    *l = (*l).min(child_low);
                }
                if parent != root && child_low >= entry[&parent] {
                    cut.insert(parent);
                }
            }
            None => {
                if done.children > 1 {
                    cut.insert(done.vertex);
                }
            }
        }
    }

    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Expansions;

    fn board() -> HexBoard {
        HexBoard::new(8, Expansions::ALL)
    }

    /// wA2 - wA1 - bA1 along the r = 0 row, wA1 at the origin
    fn line_of_three() -> HexBoard {
        let mut b = board();
        b.move_tile(Tile::WA1, None, Direction::Above).unwrap();
        b.move_tile(Tile::BA1, Some(Tile::WA1), Direction::East).unwrap();
        b.move_tile(Tile::WA2, Some(Tile::WA1), Direction::West).unwrap();
        b
    }

    #[test]
    fn test_middle_of_line_is_pinned() {
        let b = line_of_three();
        assert!(b.is_tile_pinned(Tile::WA1));
        assert!(!b.is_tile_pinned(Tile::BA1));
        assert!(!b.is_tile_pinned(Tile::WA2));
    }

    #[test]
    fn test_queen_root_with_two_branches() {
        let mut b = board();
        b.move_tile(Tile::WQ, None, Direction::Above).unwrap();
        b.move_tile(Tile::BQ, Some(Tile::WQ), Direction::East).unwrap();
        b.move_tile(Tile::WA1, Some(Tile::WQ), Direction::West).unwrap();
        b.move_tile(Tile::BA1, Some(Tile::BQ), Direction::East).unwrap();
        assert!(b.is_tile_pinned(Tile::WQ));
        assert!(b.is_tile_pinned(Tile::BQ));
        assert!(!b.is_tile_pinned(Tile::WA1));
        assert!(!b.is_tile_pinned(Tile::BA1));
    }

    #[test]
    fn test_ring_has_no_pins() {
        let mut b = board();
        b.move_tile(Tile::WA1, None, Direction::Above).unwrap();
        // Walk around an empty centre at (1, 0)
        let ring = [Tile::WA2, Tile::WA3, Tile::WG1, Tile::WG2, Tile::WG3];
        let mut last = Tile::WA1;
        let steps = [
            Direction::NorthEast,
            Direction::East,
            Direction::SouthEast,
            Direction::SouthWest,
            Direction::West,
        ];
        for (tile, dir) in ring.into_iter().zip(steps) {
            b.move_tile(tile, Some(last), dir).unwrap();
            last = tile;
        }
        assert_eq!(b.top_tile_at(Hex::new(1, 0)), None);
        assert!(b.pinned_positions().is_empty());
    }

    #[test]
    fn test_stacked_tile_never_pinned() {
        let mut b = line_of_three();
        b.move_tile(Tile::WB1, Some(Tile::WA2), Direction::West).unwrap();
        b.move_tile(Tile::WB1, Some(Tile::WA1), Direction::Above).unwrap();
        let pos = b.position_of(Tile::WB1).unwrap();
        assert_eq!(pos.h, 1);
        assert!(!b.is_tile_pinned(Tile::WB1));
        assert!(b.is_pinned(Hex::ORIGIN));
        assert!(b.is_covered(Tile::WA1));
        assert!(b.is_covered_at(Hex::ORIGIN));
        assert!(!b.is_covered_at(pos));
    }

    #[test]
    fn test_is_connected_with_exclusion() {
        let b = line_of_three();
        let above = Hex::new(0, -1);
        assert!(b.is_connected(above, None));
        // Still touches wA2 at (-1, 0)
        assert!(b.is_connected(above, Some(Hex::ORIGIN)));
        assert!(!b.is_connected(Hex::new(3, 0), None));
        // (2, -1) only touches the black ant
        assert!(!b.is_connected(Hex::new(2, -1), Some(Hex::new(1, 0))));
    }

    #[test]
    fn test_ground_gates() {
        let b = line_of_three();
        // Black ant at (1,0) moving NW towards (1,-1): flanks are (2,-1) and (0,0)
        let ant = Hex::new(1, 0);
        assert!(!b.is_gated(ant, Direction::NorthWest, None));
        // Moving E has no flanks at all
        assert!(b.is_gated(ant, Direction::East, None));
        // Excluding the origin removes the only contact
        assert!(b.is_gated(ant, Direction::NorthWest, Some(Hex::ORIGIN)));
    }

    #[test]
    fn test_squeeze_gate() {
        let mut b = board();
        b.move_tile(Tile::WQ, None, Direction::Above).unwrap();
        b.move_tile(Tile::BQ, Some(Tile::WQ), Direction::NorthEast).unwrap();
        b.move_tile(Tile::WA1, Some(Tile::WQ), Direction::SouthEast).unwrap();
        // From the origin heading E both flanks (NE and SE) are occupied
        assert!(b.is_gated(Hex::ORIGIN, Direction::East, None));
        // One layer up, ground flanks do not block
        assert!(!b.is_gated(Hex::with_height(0, 0, 1), Direction::East, None));
    }

    #[test]
    fn test_stacked_flanks_gate_above_ground() {
        let mut b = board();
        b.move_tile(Tile::WQ, None, Direction::Above).unwrap();
        b.move_tile(Tile::BQ, Some(Tile::WQ), Direction::NorthEast).unwrap();
        b.move_tile(Tile::WA1, Some(Tile::WQ), Direction::SouthEast).unwrap();
        b.move_tile(Tile::WB1, Some(Tile::WQ), Direction::West).unwrap();
        b.move_tile(Tile::WB1, Some(Tile::BQ), Direction::Above).unwrap();

        // One stacked flank is not enough above the ground
        let above = Hex::with_height(0, 0, 1);
        assert!(!b.is_gated(above, Direction::East, None));

        b.move_tile(Tile::WB2, Some(Tile::WQ), Direction::West).unwrap();
        b.move_tile(Tile::WB2, Some(Tile::WA1), Direction::Above).unwrap();
        assert!(b.is_gated(above, Direction::East, None));
        // Two layers up the height-one stacks no longer count
        assert!(!b.is_gated(Hex::with_height(0, 0, 2), Direction::East, None));
    }
}
