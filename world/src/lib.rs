#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Hex Hunt.
//!
//! The world owns the generated grid, the hidden target, and all scoring
//! bookkeeping. Adapters never mutate it directly: they submit [`Command`]
//! values through [`apply`], observe the broadcast [`Event`] stream, and
//! read state back through the [`query`] module. All randomness derives
//! from the global seed fixed at construction, so a session replays
//! identically command-for-command.

use hexhunt_core::{
    AxialCoord, BestScore, BiomeId, CellIndex, Command, Event, Level, ScanError, ScanFeedback,
    SplitMix64, StatusMessage,
};
use hexhunt_system_map_generation as map_generation;

/// A single cell of the active mission's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexCell {
    coord: AxialCoord,
    biome: BiomeId,
    prop: Option<&'static str>,
    scanned: bool,
    distance: Option<u32>,
}

impl HexCell {
    /// Axial coordinate of the cell.
    #[must_use]
    pub const fn coord(&self) -> AxialCoord {
        self.coord
    }

    /// Biome the cell belongs to.
    #[must_use]
    pub const fn biome(&self) -> BiomeId {
        self.biome
    }

    /// Decorative prop sprite attached to the cell, if any.
    #[must_use]
    pub const fn prop(&self) -> Option<&'static str> {
        self.prop
    }

    /// Whether the player has scanned this cell during the mission.
    #[must_use]
    pub const fn scanned(&self) -> bool {
        self.scanned
    }

    /// Hex distance to the target, recorded when the cell was scanned.
    #[must_use]
    pub const fn distance_to_target(&self) -> Option<u32> {
        self.distance
    }
}

/// Represents the authoritative Hex Hunt session state.
#[derive(Debug)]
pub struct World {
    grid: Vec<HexCell>,
    radius: u32,
    target: CellIndex,
    target_sprite: &'static str,
    level: Level,
    scans: u32,
    last_distance: Option<u32>,
    mission_active: bool,
    status: StatusMessage,
    best: Option<BestScore>,
    mission_counter: u64,
    global_seed: u64,
}

impl World {
    /// Creates a new session with the provided global seed.
    ///
    /// The world starts without a grid; the first
    /// [`Command::BeginMission`] generates one and emits
    /// [`Event::MissionStarted`].
    #[must_use]
    pub fn new(global_seed: u64) -> Self {
        Self {
            grid: Vec::new(),
            radius: 0,
            target: CellIndex::new(0),
            target_sprite: hexhunt_core::TARGET_SPRITES[0],
            level: Level::first(),
            scans: 0,
            last_distance: None,
            mission_active: false,
            status: StatusMessage::FindTheAlien,
            best: None,
            mission_counter: 0,
            global_seed,
        }
    }

    fn begin_mission(&mut self, advance: bool, out_events: &mut Vec<Event>) {
        if advance && !self.mission_active && !self.grid.is_empty() {
            self.level = self.level.advanced();
        }

        let seed = map_generation::derive_mission_seed(self.global_seed, self.mission_counter);
        self.mission_counter += 1;

        let mut rng = SplitMix64::new(seed);
        let plan = map_generation::generate(self.level, &mut rng);

        self.radius = plan.radius();
        self.target = plan.target();
        self.target_sprite = plan.target_sprite();
        self.grid = plan
            .into_cells()
            .into_iter()
            .map(|cell| HexCell {
                coord: cell.coord,
                biome: cell.biome,
                prop: cell.prop,
                scanned: false,
                distance: None,
            })
            .collect();

        self.scans = 0;
        self.last_distance = None;
        self.mission_active = true;
        self.status = StatusMessage::FindTheAlien;

        out_events.push(Event::MissionStarted {
            level: self.level,
            radius: self.radius,
        });
    }

    fn scan_cell(&mut self, coord: AxialCoord, out_events: &mut Vec<Event>) {
        if !self.mission_active {
            out_events.push(Event::ScanRejected {
                cell: coord,
                reason: ScanError::MissionComplete,
            });
            return;
        }

        let Some(index) = self.grid.iter().position(|cell| cell.coord() == coord) else {
            out_events.push(Event::ScanRejected {
                cell: coord,
                reason: ScanError::OutsideGrid,
            });
            return;
        };

        if self.grid[index].scanned {
            out_events.push(Event::ScanRejected {
                cell: coord,
                reason: ScanError::AlreadyScanned,
            });
            return;
        }

        let target_coord = self.grid[self.target.get()].coord();
        let distance = coord.distance(target_coord);

        self.grid[index].scanned = true;
        self.grid[index].distance = Some(distance);
        self.scans += 1;

        if distance == 0 {
            self.complete_mission(coord, out_events);
            return;
        }

        let feedback = classify_feedback(self.last_distance, distance);
        match feedback {
            ScanFeedback::Warmer => self.status = StatusMessage::Warmer,
            ScanFeedback::Colder => self.status = StatusMessage::Colder,
            // Neutral leaves the previous message on screen.
            ScanFeedback::Neutral => {}
        }
        self.last_distance = Some(distance);

        out_events.push(Event::CellScanned {
            cell: coord,
            index: CellIndex::new(index),
            distance,
            feedback,
            scans: self.scans,
        });
    }

    fn complete_mission(&mut self, coord: AxialCoord, out_events: &mut Vec<Event>) {
        self.mission_active = false;
        self.status = StatusMessage::MissionSuccess;

        let candidate = BestScore::from_mission(self.scans, self.level);
        let improved = candidate.improves_on(self.best.as_ref());
        if improved {
            self.best = Some(candidate);
        }
        let best = self
            .best
            .expect("a completed mission always leaves a recorded best");

        out_events.push(Event::TargetFound {
            cell: coord,
            scans: self.scans,
            best,
            improved,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginMission { advance } => world.begin_mission(advance, out_events),
        Command::ScanCell { cell } => world.scan_cell(cell, out_events),
    }
}

/// Classifies a fresh scan distance against the previously recorded one.
fn classify_feedback(previous: Option<u32>, distance: u32) -> ScanFeedback {
    match previous {
        Some(last) if distance < last => ScanFeedback::Warmer,
        Some(last) if distance > last => ScanFeedback::Colder,
        _ => ScanFeedback::Neutral,
    }
}

/// Read-only queries over the world, used by presenters and tests.
pub mod query {
    use super::World;
    use hexhunt_core::{AxialCoord, BestScore, CellIndex, Level, StatusMessage};

    /// Every cell of the active grid in generation order.
    #[must_use]
    pub fn cells(world: &World) -> &[super::HexCell] {
        &world.grid
    }

    /// Hex radius of the active grid.
    #[must_use]
    pub fn radius(world: &World) -> u32 {
        world.radius
    }

    /// Current mission level.
    #[must_use]
    pub fn level(world: &World) -> Level {
        world.level
    }

    /// Scans performed during the current mission.
    #[must_use]
    pub fn scans(world: &World) -> u32 {
        world.scans
    }

    /// Whether the current mission has been completed.
    #[must_use]
    pub fn mission_complete(world: &World) -> bool {
        !world.mission_active && !world.grid.is_empty()
    }

    /// Status line currently presented to the player.
    #[must_use]
    pub fn status(world: &World) -> StatusMessage {
        world.status
    }

    /// Best score on record, if any mission has been won.
    #[must_use]
    pub fn best(world: &World) -> Option<BestScore> {
        world.best
    }

    /// Stable index of the hidden target cell.
    #[must_use]
    pub fn target_index(world: &World) -> Option<CellIndex> {
        if world.grid.is_empty() {
            None
        } else {
            Some(world.target)
        }
    }

    /// Coordinate of the hidden target cell.
    #[must_use]
    pub fn target_cell(world: &World) -> Option<AxialCoord> {
        world
            .grid
            .get(world.target.get())
            .map(super::HexCell::coord)
    }

    /// Character sprite the target reveals as.
    #[must_use]
    pub fn target_sprite(world: &World) -> &'static str {
        world.target_sprite
    }
}
