//! Tile catalog: the 28 physical tiles of a full Hive set

use serde::{Deserialize, Serialize};

/// Total number of tiles across both colours
pub const NUM_TILES: usize = 28;

/// Tiles per colour
pub const TILES_PER_COLOUR: usize = 14;

/// Player colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    White = 0,
    Black = 1,
}

impl Colour {
    pub const BOTH: [Colour; 2] = [Colour::White, Colour::Black];

    pub fn opponent(self) -> Self {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// UHP colour prefix
    pub fn prefix(self) -> char {
        match self {
            Colour::White => 'w',
            Colour::Black => 'b',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'w' => Some(Colour::White),
            'b' => Some(Colour::Black),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Colour::White => "White",
            Colour::Black => "Black",
        }
    }
}

/// Bug type, in catalog order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BugType {
    Queen = 0,
    Ant = 1,
    Grasshopper = 2,
    Spider = 3,
    Beetle = 4,
    Mosquito = 5,
    Ladybug = 6,
    Pillbug = 7,
}

impl BugType {
    pub const NUM_BUG_TYPES: usize = 8;

    pub const ALL: [BugType; 8] = [
        BugType::Queen,
        BugType::Ant,
        BugType::Grasshopper,
        BugType::Spider,
        BugType::Beetle,
        BugType::Mosquito,
        BugType::Ladybug,
        BugType::Pillbug,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of tiles of this bug per colour
    pub fn count(self) -> u8 {
        match self {
            BugType::Queen => 1,
            BugType::Ant => 3,
            BugType::Grasshopper => 3,
            BugType::Spider => 2,
            BugType::Beetle => 2,
            BugType::Mosquito => 1,
            BugType::Ladybug => 1,
            BugType::Pillbug => 1,
        }
    }

    /// UHP letter
    pub fn letter(self) -> char {
        match self {
            BugType::Queen => 'Q',
            BugType::Ant => 'A',
            BugType::Grasshopper => 'G',
            BugType::Spider => 'S',
            BugType::Beetle => 'B',
            BugType::Mosquito => 'M',
            BugType::Ladybug => 'L',
            BugType::Pillbug => 'P',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.letter() == c)
    }

    pub fn is_expansion(self) -> bool {
        matches!(self, BugType::Mosquito | BugType::Ladybug | BugType::Pillbug)
    }
}

/// Static description of a tile
#[derive(Clone, Debug)]
pub struct TileInfo {
    pub name: &'static str,
    pub colour: Colour,
    pub bug: BugType,
    pub ordinal: u8,
}

impl TileInfo {
    const fn new(name: &'static str, colour: Colour, bug: BugType, ordinal: u8) -> Self {
        Self { name, colour, bug, ordinal }
    }
}

/// All tiles, indexed by `Tile::index()`
pub static TILES: [TileInfo; NUM_TILES] = [
    TileInfo::new("wQ", Colour::White, BugType::Queen, 1),
    TileInfo::new("wA1", Colour::White, BugType::Ant, 1),
    TileInfo::new("wA2", Colour::White, BugType::Ant, 2),
    TileInfo::new("wA3", Colour::White, BugType::Ant, 3),
    TileInfo::new("wG1", Colour::White, BugType::Grasshopper, 1),
    TileInfo::new("wG2", Colour::White, BugType::Grasshopper, 2),
    TileInfo::new("wG3", Colour::White, BugType::Grasshopper, 3),
    TileInfo::new("wS1", Colour::White, BugType::Spider, 1),
    TileInfo::new("wS2", Colour::White, BugType::Spider, 2),
    TileInfo::new("wB1", Colour::White, BugType::Beetle, 1),
    TileInfo::new("wB2", Colour::White, BugType::Beetle, 2),
    TileInfo::new("wM", Colour::White, BugType::Mosquito, 1),
    TileInfo::new("wL", Colour::White, BugType::Ladybug, 1),
    TileInfo::new("wP", Colour::White, BugType::Pillbug, 1),
    TileInfo::new("bQ", Colour::Black, BugType::Queen, 1),
    TileInfo::new("bA1", Colour::Black, BugType::Ant, 1),
    TileInfo::new("bA2", Colour::Black, BugType::Ant, 2),
    TileInfo::new("bA3", Colour::Black, BugType::Ant, 3),
    TileInfo::new("bG1", Colour::Black, BugType::Grasshopper, 1),
    TileInfo::new("bG2", Colour::Black, BugType::Grasshopper, 2),
    TileInfo::new("bG3", Colour::Black, BugType::Grasshopper, 3),
    TileInfo::new("bS1", Colour::Black, BugType::Spider, 1),
    TileInfo::new("bS2", Colour::Black, BugType::Spider, 2),
    TileInfo::new("bB1", Colour::Black, BugType::Beetle, 1),
    TileInfo::new("bB2", Colour::Black, BugType::Beetle, 2),
    TileInfo::new("bM", Colour::Black, BugType::Mosquito, 1),
    TileInfo::new("bL", Colour::Black, BugType::Ladybug, 1),
    TileInfo::new("bP", Colour::Black, BugType::Pillbug, 1),
];

/// Offset of the first tile of each bug type within a colour's block
const BUG_OFFSETS: [u8; BugType::NUM_BUG_TYPES] = [0, 1, 4, 7, 9, 11, 12, 13];

/// Handle to one physical tile (index into `TILES`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile(u8);

impl Tile {
    pub const WQ: Tile = Tile(0);
    pub const WA1: Tile = Tile(1);
    pub const WA2: Tile = Tile(2);
    pub const WA3: Tile = Tile(3);
    pub const WG1: Tile = Tile(4);
    pub const WG2: Tile = Tile(5);
    pub const WG3: Tile = Tile(6);
    pub const WS1: Tile = Tile(7);
    pub const WS2: Tile = Tile(8);
    pub const WB1: Tile = Tile(9);
    pub const WB2: Tile = Tile(10);
    pub const WM: Tile = Tile(11);
    pub const WL: Tile = Tile(12);
    pub const WP: Tile = Tile(13);
    pub const BQ: Tile = Tile(14);
    pub const BA1: Tile = Tile(15);
    pub const BA2: Tile = Tile(16);
    pub const BA3: Tile = Tile(17);
    pub const BG1: Tile = Tile(18);
    pub const BG2: Tile = Tile(19);
    pub const BG3: Tile = Tile(20);
    pub const BS1: Tile = Tile(21);
    pub const BS2: Tile = Tile(22);
    pub const BB1: Tile = Tile(23);
    pub const BB2: Tile = Tile(24);
    pub const BM: Tile = Tile(25);
    pub const BL: Tile = Tile(26);
    pub const BP: Tile = Tile(27);

    pub fn from_index(index: usize) -> Option<Tile> {
        (index < NUM_TILES).then(|| Tile(index as u8))
    }

    /// Look up a tile by colour, bug and 1-based ordinal
    pub fn from_parts(colour: Colour, bug: BugType, ordinal: u8) -> Option<Tile> {
        if ordinal == 0 || ordinal > bug.count() {
            return None;
        }
        let index = colour.index() * TILES_PER_COLOUR + (BUG_OFFSETS[bug.index()] + ordinal - 1) as usize;
        Some(Tile(index as u8))
    }

    pub fn queen(colour: Colour) -> Tile {
        Tile((colour.index() * TILES_PER_COLOUR) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn info(self) -> &'static TileInfo {
        &TILES[self.index()]
    }

    pub fn colour(self) -> Colour {
        self.info().colour
    }

    pub fn bug(self) -> BugType {
        self.info().bug
    }

    pub fn ordinal(self) -> u8 {
        self.info().ordinal
    }

    /// UHP name, e.g. `wA1` or `bQ`
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn all() -> impl Iterator<Item = Tile> {
        (0..NUM_TILES as u8).map(Tile)
    }

    pub fn of_colour(colour: Colour) -> impl Iterator<Item = Tile> {
        let start = (colour.index() * TILES_PER_COLOUR) as u8;
        (start..start + TILES_PER_COLOUR as u8).map(Tile)
    }
}
