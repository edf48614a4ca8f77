#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Hex Hunt adapters.
//!
//! Backends receive a [`Presentation`] describing what to draw and a closure
//! that repopulates the [`Scene`] every frame from the authoritative world.
//! Everything here is backend-agnostic: coordinates, colors, the camera, and
//! the confetti simulation are plain data that any adapter can rasterize.

use anyhow::Result as AnyResult;
use glam::Vec2;
use hexhunt_core::{AxialCoord, BestScore, Level, StatusMessage};
use std::time::Duration;

pub mod camera;
pub mod confetti;
pub mod layout;

use camera::Camera;
use confetti::ConfettiParticle;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Size of the drawable surface in screen pixels.
    pub viewport: Vec2,
    /// Position of a completed tap expressed in world units, if one landed
    /// this frame. Drags and pinches never produce taps.
    pub tap_world_space: Option<Vec2>,
    /// Whether the adapter detected a new-mission request on this frame.
    pub new_mission: bool,
}

/// Immutable snapshot describing one hex tile of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    /// Axial coordinate of the cell.
    pub coord: AxialCoord,
    /// Sprite name of the ground tile.
    pub tile: &'static str,
    /// Sprite name of the decorative prop, if any.
    pub prop: Option<&'static str>,
    /// Translucent heat overlay painted on scanned cells.
    pub overlay: Option<Color>,
}

impl CellPresentation {
    /// Creates a new cell descriptor.
    #[must_use]
    pub const fn new(
        coord: AxialCoord,
        tile: &'static str,
        prop: Option<&'static str>,
        overlay: Option<Color>,
    ) -> Self {
        Self {
            coord,
            tile,
            prop,
            overlay,
        }
    }
}

/// The revealed target, drawn on top of its cell once the mission is won.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetPresentation {
    /// Cell the target occupies.
    pub coord: AxialCoord,
    /// Character sprite to draw.
    pub sprite: &'static str,
}

impl TargetPresentation {
    /// Creates a new target descriptor.
    #[must_use]
    pub const fn new(coord: AxialCoord, sprite: &'static str) -> Self {
        Self { coord, sprite }
    }
}

/// Heads-up display values surfaced alongside the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudView {
    /// Scans performed during the current mission.
    pub scans: u32,
    /// Current mission level.
    pub level: Level,
    /// Best score on record, if any mission has been won.
    pub best: Option<BestScore>,
    /// Status line presented to the player.
    pub status: StatusMessage,
    /// Whether the current mission has been completed.
    pub mission_complete: bool,
}

impl Default for HudView {
    fn default() -> Self {
        Self {
            scans: 0,
            level: Level::first(),
            best: None,
            status: StatusMessage::FindTheAlien,
            mission_complete: false,
        }
    }
}

/// Scene description combining the hex grid, overlays, and effects.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid cells in generation order; adapters re-sort for painting.
    pub cells: Vec<CellPresentation>,
    /// Hex radius of the grid.
    pub radius: u32,
    /// Revealed target, present only after the mission is won.
    pub target: Option<TargetPresentation>,
    /// Camera mapping world space onto the viewport.
    pub camera: Camera,
    /// Live confetti particles in screen space.
    pub confetti: Vec<ConfettiParticle>,
    /// Heads-up display values.
    pub hud: HudView,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        cells: Vec<CellPresentation>,
        radius: u32,
        target: Option<TargetPresentation>,
        camera: Camera,
        confetti: Vec<ConfettiParticle>,
        hud: HudView,
    ) -> Self {
        Self {
            cells,
            radius,
            target,
            camera,
            confetti,
            hud,
        }
    }

    /// An empty scene shown before the first mission arrives.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            radius: 0,
            target: None,
            camera: Camera::default(),
            confetti: Vec::new(),
            hud: HudView::default(),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Hex Hunt scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered, allowing controllers to animate world snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
