//! Universal Hive Protocol (UHP) text notation for tiles and moves
//!
//! A move names the moving tile, then the reference tile with a direction
//! glyph: `\ - /` before the reference mean NW, W and SW; `/ - \` after it
//! mean NE, E and SE; a bare reference means on top of it.

use std::fmt;
use std::str::FromStr;

use crate::error::HiveError;
use crate::hex::Direction;
use crate::movegen::Move;
use crate::tiles::{Tile, TILES};

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tile {
    type Err = HiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TILES
            .iter()
            .position(|info| info.name == s)
            .and_then(Tile::from_index)
            .ok_or_else(|| HiveError::UnknownTile(s.to_string()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tile, reference, direction) = match *self {
            Move::Pass => return f.write_str("pass"),
            Move::Tile { tile, reference: None, .. } => return write!(f, "{}", tile),
            Move::Tile { tile, reference: Some(reference), direction } => (tile, reference, direction),
        };

        match direction {
            Direction::NorthEast => write!(f, "{} {}/", tile, reference),
            Direction::East => write!(f, "{} {}-", tile, reference),
            Direction::SouthEast => write!(f, "{} {}\\", tile, reference),
            Direction::SouthWest => write!(f, "{} /{}", tile, reference),
            Direction::West => write!(f, "{} -{}", tile, reference),
            Direction::NorthWest => write!(f, "{} \\{}", tile, reference),
            Direction::Above => write!(f, "{} {}", tile, reference),
        }
    }
}

impl FromStr for Move {
    type Err = HiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }

        let mut parts = s.split_whitespace();
        let tile: Tile = parts
            .next()
            .ok_or_else(|| HiveError::MalformedMove(s.to_string()))?
            .parse()?;

        let Some(target) = parts.next() else {
            return Ok(Move::opening(tile));
        };
        if parts.next().is_some() {
            return Err(HiveError::MalformedMove(s.to_string()));
        }

        let (name, direction) = split_direction(target);
        let reference: Tile = name.parse()?;
        Ok(Move::new(tile, reference, direction))
    }
}

/// Separate the direction glyph from a reference like `-bQ` or `bQ/`
fn split_direction(target: &str) -> (&str, Direction) {
    let prefixed = [('/', Direction::SouthWest), ('-', Direction::West), ('\\', Direction::NorthWest)];
    for (glyph, direction) in prefixed {
        if let Some(name) = target.strip_prefix(glyph) {
            return (name, direction);
        }
    }

    let suffixed = [('/', Direction::NorthEast), ('-', Direction::East), ('\\', Direction::SouthEast)];
    for (glyph, direction) in suffixed {
        if let Some(name) = target.strip_suffix(glyph) {
            return (name, direction);
        }
    }

    (target, Direction::Above)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_names() {
        for tile in Tile::all() {
            assert_eq!(tile.to_string().parse::<Tile>().unwrap(), tile);
        }
        assert_eq!("bA3".parse::<Tile>().unwrap(), Tile::BA3);
        assert!("wQ1".parse::<Tile>().is_err());
        assert!("wA4".parse::<Tile>().is_err());
        assert!("xQ".parse::<Tile>().is_err());
    }

    #[test]
    fn test_direction_glyphs() {
        let cases = [
            ("wA1 bQ/", Direction::NorthEast),
            ("wA1 bQ-", Direction::East),
            ("wA1 bQ\\", Direction::SouthEast),
            ("wA1 /bQ", Direction::SouthWest),
            ("wA1 -bQ", Direction::West),
            ("wA1 \\bQ", Direction::NorthWest),
            ("wA1 bQ", Direction::Above),
        ];
        for (text, direction) in cases {
            let mv: Move = text.parse().unwrap();
            assert_eq!(mv, Move::new(Tile::WA1, Tile::BQ, direction));
            assert_eq!(mv.to_string(), text);
        }
    }

    #[test]
    fn test_opening_and_pass() {
        assert_eq!("wG1".parse::<Move>().unwrap(), Move::opening(Tile::WG1));
        assert_eq!(Move::opening(Tile::WG1).to_string(), "wG1");
        assert_eq!("pass".parse::<Move>().unwrap(), Move::Pass);
        assert_eq!(Move::Pass.to_string(), "pass");
    }

    #[test]
    fn test_malformed_moves() {
        assert_eq!(
            "".parse::<Move>(),
            Err(HiveError::MalformedMove(String::new()))
        );
        assert!(matches!("wA1 bQ- extra".parse::<Move>(), Err(HiveError::MalformedMove(_))));
        assert!(matches!("wZ1 bQ-".parse::<Move>(), Err(HiveError::UnknownTile(_))));
        assert!(matches!("wA1 -bZ".parse::<Move>(), Err(HiveError::UnknownTile(_))));
    }
}
