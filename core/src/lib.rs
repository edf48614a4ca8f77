#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hex Hunt game.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that adapters
//! react to deterministically. Everything random flows through the injectable
//! [`SplitMix64`] source so missions replay identically under a fixed seed.

use serde::{Deserialize, Serialize};

/// Axial coordinate addressing a cell on the hexagonal grid.
///
/// The redundant third cube coordinate is always `-q - r`; distance
/// computations convert to cube form internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxialCoord {
    q: i32,
    r: i32,
}

impl AxialCoord {
    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Column component of the coordinate.
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// Row component of the coordinate.
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Hex-grid distance to another coordinate.
    ///
    /// Equivalent to the Manhattan distance in cube space, halved:
    /// `(|Δq| + |Δq + Δr| + |Δr|) / 2`.
    #[must_use]
    pub fn distance(self, other: AxialCoord) -> u32 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let ds = dq + dr;
        let doubled = dq.unsigned_abs() + ds.unsigned_abs() + dr.unsigned_abs();
        (doubled / 2) as u32
    }

    /// Reports whether the coordinate lies inside the hex-shaped region of
    /// the provided radius: `|q|`, `|r|` and `|q + r|` all at most `radius`.
    #[must_use]
    pub fn within_radius(self, radius: u32) -> bool {
        let radius = i64::from(radius);
        i64::from(self.q).abs() <= radius
            && i64::from(self.r).abs() <= radius
            && (i64::from(self.q) + i64::from(self.r)).abs() <= radius
    }
}

/// Enumerates every axial coordinate inside the hex-shaped region of the
/// provided radius, in `q`-major order.
///
/// The returned set always contains exactly `3r² + 3r + 1` coordinates.
#[must_use]
pub fn hex_region(radius: u32) -> Vec<AxialCoord> {
    let radius = radius as i32;
    let mut cells = Vec::new();
    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        for r in r_min..=r_max {
            cells.push(AxialCoord::new(q, r));
        }
    }
    cells
}

/// Stable index of a cell within one mission's grid.
///
/// Cells are identified by value rather than by reference so that comparing
/// a scanned cell against the target never depends on object identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Creates a new cell index.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the underlying index.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Mission level, starting at one and capped at [`Level::MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    /// Highest reachable level.
    pub const MAX: Level = Level(8);

    /// The starting level.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// Creates a level clamped into the valid `1..=MAX` range.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self(1)
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The next level, saturating at [`Level::MAX`].
    #[must_use]
    pub const fn advanced(self) -> Self {
        if self.0 >= Self::MAX.0 {
            Self::MAX
        } else {
            Self(self.0 + 1)
        }
    }

    /// Grid radius for this level.
    ///
    /// Radius grows in discrete steps, two levels per step: levels 1..=8 map
    /// to radii 2, 3, 3, 4, 4, 5, 5, 6.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        2 + self.0 / 2
    }

    /// Grid diameter used to normalize best scores across map sizes.
    #[must_use]
    pub const fn diameter(&self) -> u32 {
        self.radius() * 2
    }
}

/// Terrain category assigned to every cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BiomeId {
    /// Temperate grassland.
    Grass,
    /// Snowfield.
    Snow,
    /// Desert sand.
    Sand,
    /// Autumnal forest floor.
    Autumn,
    /// Magical terrain.
    Magic,
    /// Volcanic lava field.
    Lava,
    /// Bare rock.
    Rock,
    /// Exposed dirt.
    Dirt,
    /// Stone flats.
    Stone,
    /// Open water.
    Water,
}

impl BiomeId {
    /// Every biome in canonical order.
    pub const ALL: [BiomeId; 10] = [
        BiomeId::Grass,
        BiomeId::Snow,
        BiomeId::Sand,
        BiomeId::Autumn,
        BiomeId::Magic,
        BiomeId::Lava,
        BiomeId::Rock,
        BiomeId::Dirt,
        BiomeId::Stone,
        BiomeId::Water,
    ];

    /// Static definition backing this biome.
    #[must_use]
    pub const fn definition(self) -> &'static BiomeDefinition {
        match self {
            BiomeId::Grass => &GRASS,
            BiomeId::Snow => &SNOW,
            BiomeId::Sand => &SAND,
            BiomeId::Autumn => &AUTUMN,
            BiomeId::Magic => &MAGIC,
            BiomeId::Lava => &LAVA,
            BiomeId::Rock => &ROCK,
            BiomeId::Dirt => &DIRT,
            BiomeId::Stone => &STONE,
            BiomeId::Water => &WATER,
        }
    }
}

/// Immutable mapping from a biome to its base tile sprite and prop pool.
#[derive(Debug)]
pub struct BiomeDefinition {
    tile: &'static str,
    props: &'static [&'static str],
}

impl BiomeDefinition {
    /// Filename of the base ground sprite.
    #[must_use]
    pub const fn tile(&self) -> &'static str {
        self.tile
    }

    /// Candidate decorative prop sprite filenames.
    #[must_use]
    pub const fn props(&self) -> &'static [&'static str] {
        self.props
    }
}

const GRASS: BiomeDefinition = BiomeDefinition {
    tile: "tileGrass.png",
    props: &[
        "treeGreen_high.png",
        "treeGreen_mid.png",
        "treeGreen_low.png",
        "flowerRed.png",
        "flowerGreen.png",
        "bushGrass.png",
        "hillGrass.png",
        "smallRockGrass.png",
    ],
};

const SNOW: BiomeDefinition = BiomeDefinition {
    tile: "tileSnow.png",
    props: &[
        "pineBlue_high.png",
        "pineBlue_mid.png",
        "pineBlue_low.png",
        "rockSnow_1.png",
        "rockSnow_2.png",
        "rockSnow_3.png",
        "hillSnow.png",
        "smallRockSnow.png",
        "bushSnow.png",
    ],
};

const SAND: BiomeDefinition = BiomeDefinition {
    tile: "tileSand.png",
    props: &[
        "treeCactus_1.png",
        "treeCactus_2.png",
        "treeCactus_3.png",
        "hillSand.png",
        "bushSand.png",
        "smallRockDirt.png",
    ],
};

const AUTUMN: BiomeDefinition = BiomeDefinition {
    tile: "tileAutumn.png",
    props: &[
        "treeAutumn_high.png",
        "treeAutumn_mid.png",
        "treeAutumn_low.png",
        "pineAutumn_high.png",
        "pineAutumn_mid.png",
        "pineAutumn_low.png",
        "bushAutumn.png",
        "hillAutumn.png",
        "flowerYellow.png",
    ],
};

const MAGIC: BiomeDefinition = BiomeDefinition {
    tile: "tileMagic.png",
    props: &[
        "hillMagic.png",
        "bushMagic.png",
        "flowerBlue.png",
        "flowerWhite.png",
    ],
};

const LAVA: BiomeDefinition = BiomeDefinition {
    tile: "tileLava.png",
    props: &["waveLava.png", "rockStone.png", "tileLava_tile.png"],
};

const ROCK: BiomeDefinition = BiomeDefinition {
    tile: "tileRock.png",
    props: &[
        "rockStone_moss1.png",
        "rockStone_moss2.png",
        "rockStone_moss3.png",
        "rockDirt.png",
        "rockDirt_moss1.png",
        "rockDirt_moss2.png",
        "rockDirt_moss3.png",
        "smallRockStone.png",
        "hillDirt.png",
    ],
};

const DIRT: BiomeDefinition = BiomeDefinition {
    tile: "tileDirt.png",
    props: &[
        "bushDirt.png",
        "hillDirt.png",
        "rockDirt.png",
        "rockDirt_moss1.png",
        "rockDirt_moss2.png",
        "rockDirt_moss3.png",
        "smallRockDirt.png",
    ],
};

const STONE: BiomeDefinition = BiomeDefinition {
    tile: "tileStone.png",
    props: &[
        "rockStone.png",
        "rockStone_moss1.png",
        "rockStone_moss2.png",
        "rockStone_moss3.png",
        "smallRockStone.png",
    ],
};

const WATER: BiomeDefinition = BiomeDefinition {
    tile: "tileWater.png",
    props: &["waveWater.png"],
};

/// Character sprites the hidden target may reveal as.
pub const TARGET_SPRITES: [&str; 5] = [
    "alienBeige.png",
    "alienBlue.png",
    "alienGreen.png",
    "alienPink.png",
    "alienYellow.png",
];

/// Deduplicated set of every sprite filename the game can reference,
/// in a stable order suitable for batch loading.
#[must_use]
pub fn all_sprite_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for biome in BiomeId::ALL {
        let definition = biome.definition();
        names.push(definition.tile());
        names.extend_from_slice(definition.props());
    }
    names.extend_from_slice(&TARGET_SPRITES);
    names.sort_unstable();
    names.dedup();
    names
}

/// Warmer/colder classification of a scan relative to the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanFeedback {
    /// Strictly closer to the target than the previous scan.
    Warmer,
    /// Strictly farther from the target than the previous scan.
    Colder,
    /// No prior scan to compare against, or an equal distance. Neutral
    /// feedback leaves the status message untouched.
    Neutral,
}

/// Status line presented to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusMessage {
    /// Mission start prompt.
    FindTheAlien,
    /// The last scan moved closer to the target.
    Warmer,
    /// The last scan moved away from the target.
    Colder,
    /// The target was found.
    MissionSuccess,
}

/// Best recorded result, normalized so scores compare across map sizes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestScore {
    scans: u32,
    level: Level,
    ratio: f32,
}

impl BestScore {
    /// Records a completed mission's result.
    ///
    /// The ratio divides the scan count by the level's grid diameter so
    /// that a win on a large map is comparable with a win on a small one.
    #[must_use]
    pub fn from_mission(scans: u32, level: Level) -> Self {
        Self {
            scans,
            level,
            ratio: scans as f32 / level.diameter() as f32,
        }
    }

    /// Raw scan count of the recorded win.
    #[must_use]
    pub const fn scans(&self) -> u32 {
        self.scans
    }

    /// Level on which the record was achieved.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Normalized scans-per-diameter ratio; lower is better.
    #[must_use]
    pub const fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Reports whether this result strictly beats the previous record.
    /// Equal ratios do not replace an existing record.
    #[must_use]
    pub fn improves_on(&self, previous: Option<&BestScore>) -> bool {
        match previous {
            Some(best) => self.ratio < best.ratio,
            None => true,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Regenerates the map and starts a fresh mission.
    BeginMission {
        /// When `true` and the previous mission has ended, the level
        /// advances first (capped at [`Level::MAX`]).
        advance: bool,
    },
    /// Scans the cell at the provided coordinate.
    ScanCell {
        /// Coordinate of the cell to scan.
        cell: AxialCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A new mission began and the grid was regenerated.
    MissionStarted {
        /// Level of the fresh mission.
        level: Level,
        /// Hex radius of the generated grid.
        radius: u32,
    },
    /// A previously-unscanned cell was scanned without finding the target.
    CellScanned {
        /// Coordinate of the scanned cell.
        cell: AxialCoord,
        /// Stable index of the scanned cell.
        index: CellIndex,
        /// Hex distance from the scanned cell to the hidden target.
        distance: u32,
        /// Warmer/colder classification against the previous scan.
        feedback: ScanFeedback,
        /// Total scans performed this mission, including this one.
        scans: u32,
    },
    /// The target cell was scanned and the mission is complete.
    TargetFound {
        /// Coordinate of the target cell.
        cell: AxialCoord,
        /// Total scans performed this mission.
        scans: u32,
        /// Best score on record after this win.
        best: BestScore,
        /// Whether this win replaced the previous record.
        improved: bool,
    },
    /// A scan request was refused.
    ScanRejected {
        /// Coordinate provided in the request.
        cell: AxialCoord,
        /// Specific reason the scan was refused.
        reason: ScanError,
    },
}

/// Reasons a scan request may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanError {
    /// The mission has already ended; scanning is disabled until the next
    /// mission begins.
    MissionComplete,
    /// The coordinate lies outside the generated grid.
    OutsideGrid,
    /// The cell was already scanned this mission.
    AlreadyScanned,
}

/// Deterministic 64-bit random source (SplitMix64).
///
/// Map generation, prop placement, target selection, and confetti all draw
/// from an injected instance so test suites can replay exact sessions.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a generator from the provided seed. A zero seed is remapped
    /// to the golden-ratio increment so the stream never degenerates.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        let seed = if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed };
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
        let value = self.next_u64() >> 11;
        (value as f64) * SCALE
    }

    /// Uniform value in `[min, max)`.
    pub fn next_in_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }

    /// Uniform index in `0..len`. Returns zero for an empty length so
    /// callers never observe an out-of-bounds index.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    /// Bernoulli draw that succeeds with the provided probability.
    pub fn next_chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}
