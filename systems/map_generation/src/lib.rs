#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic procedural map generation.
//!
//! Given a mission level and a seeded random source, this pure system derives
//! the grid radius, scatters one floating-point seed point per selected
//! biome, partitions the hex region into a Voronoi diagram under hex
//! distance, decorates cells with props, and hides the target. Identical
//! level and seed always produce an identical [`MapPlan`].

use hexhunt_core::{
    hex_region, AxialCoord, BiomeId, CellIndex, Level, SplitMix64, TARGET_SPRITES,
};
use sha2::{Digest, Sha256};

/// Probability that a cell receives a decorative prop.
const PROP_CHANCE: f64 = 0.45;

/// Complete description of a freshly generated mission map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapPlan {
    radius: u32,
    cells: Vec<PlannedCell>,
    target: CellIndex,
    target_sprite: &'static str,
}

impl MapPlan {
    /// Hex radius of the generated grid.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Every cell of the grid in `q`-major enumeration order.
    #[must_use]
    pub fn cells(&self) -> &[PlannedCell] {
        &self.cells
    }

    /// Consumes the plan, yielding its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<PlannedCell> {
        self.cells
    }

    /// Stable index of the hidden target cell.
    #[must_use]
    pub const fn target(&self) -> CellIndex {
        self.target
    }

    /// Character sprite the target reveals as.
    #[must_use]
    pub const fn target_sprite(&self) -> &'static str {
        self.target_sprite
    }
}

/// A single generated cell: coordinate, biome, and optional prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedCell {
    /// Axial coordinate of the cell.
    pub coord: AxialCoord,
    /// Biome the cell was assigned to.
    pub biome: BiomeId,
    /// Decorative prop sprite, if one was attached.
    pub prop: Option<&'static str>,
}

/// Transient seed point used only while partitioning the grid.
#[derive(Clone, Copy, Debug)]
struct SeedPoint {
    biome: BiomeId,
    q: f64,
    r: f64,
}

impl SeedPoint {
    /// Continuous hex distance from this seed to a cell center.
    fn distance_to(&self, cell: AxialCoord) -> f64 {
        let dq = f64::from(cell.q()) - self.q;
        let dr = f64::from(cell.r()) - self.r;
        (dq.abs() + (dq + dr).abs() + dr.abs()) / 2.0
    }
}

/// Generates the map for the provided level.
///
/// All randomness flows through `rng`; the caller decides whether the seed
/// is reproducible (tests) or entropic (interactive play).
#[must_use]
pub fn generate(level: Level, rng: &mut SplitMix64) -> MapPlan {
    let radius = level.radius();
    let biomes = select_biomes(level, rng);
    let seeds = scatter_seeds(&biomes, radius, rng);

    let coords = hex_region(radius);
    let mut cells = Vec::with_capacity(coords.len());
    for coord in coords {
        let biome = nearest_seed(&seeds, coord);
        let prop = if rng.next_chance(PROP_CHANCE) {
            let pool = biome.definition().props();
            Some(pool[rng.next_index(pool.len())])
        } else {
            None
        };
        cells.push(PlannedCell { coord, biome, prop });
    }

    let target = CellIndex::new(rng.next_index(cells.len()));
    let target_sprite = TARGET_SPRITES[rng.next_index(TARGET_SPRITES.len())];

    MapPlan {
        radius,
        cells,
        target,
        target_sprite,
    }
}

/// Chooses the biome subset for a level: `level + 1` biomes, at least one,
/// at most every biome, drawn as a prefix of a Fisher-Yates shuffle.
fn select_biomes(level: Level, rng: &mut SplitMix64) -> Vec<BiomeId> {
    let count = (level.get() as usize + 1).clamp(1, BiomeId::ALL.len());
    let mut pool = BiomeId::ALL.to_vec();
    for index in (1..pool.len()).rev() {
        pool.swap(index, rng.next_index(index + 1));
    }
    pool.truncate(count);
    pool
}

/// One seed point per biome, with continuous axial coordinates drawn
/// uniformly from `[-radius, radius)` on each axis.
fn scatter_seeds(biomes: &[BiomeId], radius: u32, rng: &mut SplitMix64) -> Vec<SeedPoint> {
    let bound = f64::from(radius);
    biomes
        .iter()
        .map(|&biome| SeedPoint {
            biome,
            q: rng.next_in_range(-bound, bound),
            r: rng.next_in_range(-bound, bound),
        })
        .collect()
}

/// The biome of the seed minimizing continuous hex distance; ties resolve
/// to the first seed in enumeration order.
fn nearest_seed(seeds: &[SeedPoint], cell: AxialCoord) -> BiomeId {
    let mut closest = BiomeId::Grass;
    let mut min_distance = f64::INFINITY;
    for seed in seeds {
        let distance = seed.distance_to(cell);
        if distance < min_distance {
            min_distance = distance;
            closest = seed.biome;
        }
    }
    closest
}

/// Derives the seed for one mission from the session's global seed and a
/// monotonically increasing mission counter.
#[must_use]
pub fn derive_mission_seed(global_seed: u64, mission: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(mission.to_le_bytes());
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_seed_prefers_the_strictly_closer_point() {
        let seeds = [
            SeedPoint {
                biome: BiomeId::Snow,
                q: 2.0,
                r: 0.0,
            },
            SeedPoint {
                biome: BiomeId::Lava,
                q: -1.0,
                r: 0.0,
            },
        ];
        assert_eq!(nearest_seed(&seeds, AxialCoord::new(2, 0)), BiomeId::Snow);
        assert_eq!(nearest_seed(&seeds, AxialCoord::new(-2, 0)), BiomeId::Lava);
    }

    #[test]
    fn nearest_seed_breaks_ties_toward_the_first_seed() {
        let seeds = [
            SeedPoint {
                biome: BiomeId::Sand,
                q: 1.0,
                r: 0.0,
            },
            SeedPoint {
                biome: BiomeId::Water,
                q: -1.0,
                r: 0.0,
            },
        ];
        // The origin is exactly one hex from both seeds.
        assert_eq!(nearest_seed(&seeds, AxialCoord::new(0, 0)), BiomeId::Sand);
    }

    #[test]
    fn biome_selection_scales_with_level_and_never_repeats() {
        for level in 1..=8u32 {
            let mut rng = SplitMix64::new(level as u64 + 41);
            let selected = select_biomes(Level::new(level), &mut rng);
            let expected = (level as usize + 1).min(BiomeId::ALL.len());
            assert_eq!(selected.len(), expected);

            let mut unique = selected.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), selected.len());
        }
    }

    #[test]
    fn seed_points_stay_inside_the_radius_bounds() {
        let mut rng = SplitMix64::new(99);
        let seeds = scatter_seeds(&BiomeId::ALL, 5, &mut rng);
        assert_eq!(seeds.len(), BiomeId::ALL.len());
        for seed in seeds {
            assert!((-5.0..5.0).contains(&seed.q));
            assert!((-5.0..5.0).contains(&seed.r));
        }
    }
}
