//! Pointy-top hex layout, picking, and overlay styling.
//!
//! World space is pixel-like: one hex cell spans [`TILE_WIDTH`] by
//! [`TILE_HEIGHT`] and neighboring rows interleave. The isometric tile art
//! overhangs its logical cell, so prop anchoring and the heat overlay carry
//! sprite-specific fudge offsets measured against the tile sheet.

use crate::camera::WorldBounds;
use crate::Color;
use glam::Vec2;
use hexhunt_core::AxialCoord;
use std::cmp::Ordering;

/// Center-to-corner radius of one hex cell in world units.
pub const HEX_SIZE: f32 = 37.0;

/// Width of the tile art covering one cell: `floor(HEX_SIZE * sqrt(3)) + 1`.
pub const TILE_WIDTH: f32 = 65.0;

/// Height of the tile art covering one cell: `2 * HEX_SIZE + 1`.
pub const TILE_HEIGHT: f32 = 75.0;

/// Vertical squash applied to the heat overlay so it lies on the tile's
/// isometric top face.
pub const ISO_SQUASH: f32 = 0.78;

/// Alpha of the heat overlay fill.
pub const HEAT_ALPHA: f32 = 0.6;

/// Vertical lift of the heat overlay above the cell center.
pub const HEAT_LIFT: f32 = TILE_HEIGHT * 0.15;

/// Width of the revealed target sprite.
pub const TARGET_WIDTH: f32 = TILE_WIDTH * 0.9;

/// Height of the revealed target sprite; its bottom edge sits on the cell
/// center.
pub const TARGET_HEIGHT: f32 = TILE_HEIGHT * 1.1;

const SQRT_3: f32 = 1.732_050_8;

/// Converts an axial coordinate to the world-space center of its cell.
#[must_use]
pub fn hex_to_world(coord: AxialCoord) -> Vec2 {
    let q = coord.q() as f32;
    let r = coord.r() as f32;
    Vec2::new(
        HEX_SIZE * SQRT_3 * (q + r * 0.5),
        HEX_SIZE * 1.5 * r,
    )
}

/// World-space rectangle enclosing every cell center plus one hex extent of
/// margin on each side.
#[must_use]
pub fn grid_bounds<I>(coords: I) -> WorldBounds
where
    I: IntoIterator<Item = AxialCoord>,
{
    let margin = Vec2::new(HEX_SIZE, HEX_SIZE * SQRT_3 * 0.5);
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut empty = true;
    for coord in coords {
        let center = hex_to_world(coord);
        min = min.min(center - margin);
        max = max.max(center + margin);
        empty = false;
    }
    if empty {
        // Placeholder extent shown before the first grid arrives.
        WorldBounds::new(Vec2::splat(-200.0), Vec2::splat(200.0))
    } else {
        WorldBounds::new(min, max)
    }
}

/// Picks the cell whose center lies nearest to a world-space point.
///
/// Returns `None` when no center falls within the pick threshold, so taps on
/// the backdrop never select a cell.
#[must_use]
pub fn pick_cell<I>(point: Vec2, coords: I) -> Option<AxialCoord>
where
    I: IntoIterator<Item = AxialCoord>,
{
    let mut best = None;
    let mut min_distance = 40.0_f32.min(TILE_WIDTH * 0.6);
    for coord in coords {
        let distance = hex_to_world(coord).distance(point);
        if distance < min_distance {
            min_distance = distance;
            best = Some(coord);
        }
    }
    best
}

/// Painter ordering for overlapping isometric tiles: back rows first, then
/// left to right within a row.
#[must_use]
pub fn painter_order(a: AxialCoord, b: AxialCoord) -> Ordering {
    a.r().cmp(&b.r()).then(a.q().cmp(&b.q()))
}

/// Heat overlay color for a scanned cell: vivid red at distance one fading
/// to vivid blue at the grid's diameter.
#[must_use]
pub fn heat_color(distance: u32, radius: u32) -> Color {
    let span = (2 * radius).saturating_sub(1).max(1) as f32;
    let t = ((distance.saturating_sub(1)) as f32 / span).clamp(0.0, 1.0);
    Color::new(
        (255.0 - t * 205.0) / 255.0,
        (60.0 - t * 60.0) / 255.0,
        (60.0 + t * 195.0) / 255.0,
        HEAT_ALPHA,
    )
}

/// Corners of the squashed heat hexagon around a world-space center.
#[must_use]
pub fn heat_mask_corners(center: Vec2) -> [Vec2; 6] {
    let mut corners = [Vec2::ZERO; 6];
    for (index, corner) in corners.iter_mut().enumerate() {
        let angle = std::f32::consts::FRAC_PI_3 * index as f32 + std::f32::consts::FRAC_PI_6;
        *corner = Vec2::new(
            center.x + HEX_SIZE * angle.cos(),
            center.y + HEX_SIZE * ISO_SQUASH * angle.sin(),
        );
    }
    corners
}

/// Anchoring class of a prop sprite, keyed off its sheet name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropStyle {
    /// Low mounds that sit almost flush with the tile surface.
    Hill,
    /// Large boulders with extra transparent padding in the sheet.
    Rock,
    /// Trees, bushes, cacti, crystals, and the small rock variants.
    Standard,
}

impl PropStyle {
    /// Classifies a prop sprite by name. The small rock sprites capitalize
    /// `Rock` and deliberately fall through to [`PropStyle::Standard`].
    #[must_use]
    pub fn of(sprite: &str) -> Self {
        if sprite.contains("hill") {
            Self::Hill
        } else if sprite.contains("rock") {
            Self::Rock
        } else {
            Self::Standard
        }
    }

    /// Transparent-padding compensation added below the sprite's baseline.
    #[must_use]
    pub const fn baseline_pad(self) -> f32 {
        match self {
            Self::Hill => 30.0,
            Self::Rock => 36.0,
            Self::Standard => 18.0,
        }
    }

    /// Drop from the cell center down to the tile's visible top surface.
    #[must_use]
    pub const fn surface_drop(self) -> f32 {
        match self {
            Self::Hill => TILE_HEIGHT * 0.05,
            Self::Rock | Self::Standard => TILE_HEIGHT * 0.12,
        }
    }
}

/// Horizontal wiggle of the revealed target, in world units, as a function
/// of elapsed seconds.
#[must_use]
pub fn target_wiggle(elapsed_secs: f32) -> f32 {
    (elapsed_secs * 12.5).sin() * 4.0
}
