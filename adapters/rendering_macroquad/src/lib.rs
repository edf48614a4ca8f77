#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Hex Hunt.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.
//!
//! The adapter owns everything screen-specific: the window, texture loading,
//! gesture recognition, and the immediate-mode HUD. The world grid arrives
//! as a [`Scene`] and is rasterized in painter order so the isometric tiles
//! overlap correctly.

mod gestures;
mod sprites;
mod ui;

use self::gestures::{PinchTracker, PointerTracker, MOUSE_DRAG_THRESHOLD, TOUCH_DRAG_THRESHOLD};
use self::sprites::SpriteLibrary;
use self::ui::{draw_hud_ui, status_banner, HudUiContext, HudUiResult};
use anyhow::{Context, Result};
use glam::Vec2;
use hexhunt_rendering::{
    camera::Camera,
    confetti::ConfettiParticle,
    layout::{self, HEAT_LIFT, TARGET_HEIGHT, TARGET_WIDTH, TILE_HEIGHT, TILE_WIDTH},
    CellPresentation, Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use macroquad::{
    input::{
        is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, is_mouse_button_released,
        mouse_position, mouse_wheel, touches, KeyCode, MouseButton, TouchPhase,
    },
    math::Vec2 as MacroquadVec2,
    shapes::draw_triangle,
    text::{draw_text, measure_text},
    texture::{self, DrawTextureParams},
};
use std::{sync::mpsc, time::Duration};

/// Screen-space rectangle occupied by the HUD panel; taps landing here are
/// UI interactions, not scans.
const HUD_ORIGIN: Vec2 = Vec2::new(16.0, 16.0);
const HUD_SIZE: Vec2 = Vec2::new(190.0, 170.0);

/// Wheel zoom steps, matching one browser wheel notch.
const WHEEL_ZOOM_IN: f32 = 1.1;
const WHEEL_ZOOM_OUT: f32 = 0.9;

/// Tracks HUD-sourced interactions so they can be merged with physical
/// input on the next frame.
#[derive(Clone, Copy, Debug, Default)]
struct HudInputState {
    new_mission_latched: bool,
}

impl HudInputState {
    /// Returns whether the HUD requested a new mission and clears the latch
    /// so the action fires only once.
    fn take_new_mission(&mut self) -> bool {
        let latched = self.new_mission_latched;
        self.new_mission_latched = false;
        latched
    }

    /// Records that the mission button was pressed this frame.
    fn register_new_mission(&mut self) {
        self.new_mission_latched = true;
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during one frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `N` requests a new mission.
    new_mission: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            new_mission: is_key_pressed(KeyCode::N),
        }
    }
}

/// Simple frames-per-second average reported once per second.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(if enabled { 1 } else { 0 });
        self
    }

    /// Configures whether the backend prints frame timing metrics once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (library_init_sender, library_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut init_sender = Some(library_init_sender);
            let mut scene = scene;

            let library = match SpriteLibrary::from_default_manifest()
                .context("failed to initialise sprite library")
            {
                Ok(library) => {
                    println!("sprite library ready with {} textures", library.len());
                    library
                }
                Err(error) => {
                    if let Some(sender) = init_sender.take() {
                        let _ = sender.send(Err(error));
                    }
                    return;
                }
            };

            if let Some(sender) = init_sender.take() {
                let _ = sender.send(Ok(()));
            }

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut hud_input = HudInputState::default();
            let mut mouse = PointerTracker::default();
            let mut touch = PointerTracker::default();
            let mut pinch = PinchTracker::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let viewport = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let tap = gather_gestures(
                    &mut scene.camera,
                    viewport,
                    &mut mouse,
                    &mut touch,
                    &mut pinch,
                );

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    viewport,
                    tap_world_space: tap
                        .filter(|screen| !hud_rect_contains(*screen))
                        .map(|screen| scene.camera.screen_to_world(screen, viewport)),
                    new_mission: keyboard.new_mission || hud_input.take_new_mission(),
                };

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(background);

                let elapsed = macroquad::time::get_time() as f32;
                draw_grid(&scene, viewport, &library, elapsed);
                draw_confetti(&scene.confetti);
                draw_status_banner(&scene, viewport);

                let hud_context = HudUiContext {
                    origin: MacroquadVec2::new(HUD_ORIGIN.x, HUD_ORIGIN.y),
                    size: MacroquadVec2::new(HUD_SIZE.x, HUD_SIZE.y),
                    background: macroquad::color::Color::from_rgba(20, 24, 38, 220),
                    hud: scene.hud,
                };
                let mut root_ui = macroquad::ui::root_ui();
                let HudUiResult {
                    new_mission_pressed,
                } = draw_hud_ui(&mut root_ui, hud_context);
                if new_mission_pressed {
                    hud_input.register_new_mission();
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        library_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

/// Applies this frame's pan/zoom gestures to the camera and returns the
/// screen position of a completed tap, if any.
fn gather_gestures(
    camera: &mut Camera,
    viewport: Vec2,
    mouse: &mut PointerTracker,
    touch: &mut PointerTracker,
    pinch: &mut PinchTracker,
) -> Option<Vec2> {
    let mut tap = None;

    let active_touches = touches();
    if active_touches.len() >= 2 {
        // Two fingers: zoom at the midpoint and follow its travel,
        // never a tap.
        touch.cancel();
        let first = Vec2::new(active_touches[0].position.x, active_touches[0].position.y);
        let second = Vec2::new(active_touches[1].position.x, active_touches[1].position.y);
        if let Some(step) = pinch.update(first, second) {
            camera.zoom_at(step.midpoint, viewport, step.factor);
            camera.pan(step.pan);
        }
    } else if let Some(single) = active_touches.first() {
        pinch.reset();
        let position = Vec2::new(single.position.x, single.position.y);
        match single.phase {
            TouchPhase::Started => touch.press(position),
            TouchPhase::Moved | TouchPhase::Stationary => {
                if let Some(delta) = touch.motion(position, TOUCH_DRAG_THRESHOLD) {
                    camera.pan(delta);
                }
            }
            TouchPhase::Ended => tap = touch.release(position),
            TouchPhase::Cancelled => touch.cancel(),
        }
    } else {
        pinch.reset();

        let (mouse_x, mouse_y) = mouse_position();
        let cursor = Vec2::new(mouse_x, mouse_y);

        let (_, wheel_y) = mouse_wheel();
        if wheel_y > 0.0 {
            camera.zoom_at(cursor, viewport, WHEEL_ZOOM_IN);
        } else if wheel_y < 0.0 {
            camera.zoom_at(cursor, viewport, WHEEL_ZOOM_OUT);
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            mouse.press(cursor);
        } else if is_mouse_button_down(MouseButton::Left) {
            if let Some(delta) = mouse.motion(cursor, MOUSE_DRAG_THRESHOLD) {
                camera.pan(delta);
            }
        } else if is_mouse_button_released(MouseButton::Left) {
            tap = mouse.release(cursor);
        }
    }

    tap
}

fn hud_rect_contains(screen: Vec2) -> bool {
    screen.x >= HUD_ORIGIN.x
        && screen.y >= HUD_ORIGIN.y
        && screen.x <= HUD_ORIGIN.x + HUD_SIZE.x
        && screen.y <= HUD_ORIGIN.y + HUD_SIZE.y
}

/// Draws the grid in painter order: tiles, then each cell's prop, heat
/// overlay, and finally the revealed target on its own cell.
fn draw_grid(scene: &Scene, viewport: Vec2, library: &SpriteLibrary, elapsed_secs: f32) {
    let camera = scene.camera;
    let zoom = camera.zoom();

    let mut order: Vec<&CellPresentation> = scene.cells.iter().collect();
    order.sort_by(|a, b| layout::painter_order(a.coord, b.coord));

    for cell in order {
        let center = layout::hex_to_world(cell.coord);

        if let Some(tile) = library.texture(cell.tile) {
            let top_left = center - Vec2::new(TILE_WIDTH * 0.5, TILE_HEIGHT * 0.5);
            draw_world_texture(
                tile,
                camera.world_to_screen(top_left, viewport),
                Vec2::new(TILE_WIDTH, TILE_HEIGHT) * zoom,
            );
        }

        if let Some(prop) = cell.prop {
            if let Some(prop_texture) = library.texture(prop) {
                // Props are authored at sheet scale: stretch them by the same
                // factor that maps the tile sheet onto one cell.
                let (scale_x, scale_y) = match library.texture(cell.tile) {
                    Some(tile) => (TILE_WIDTH / tile.width(), TILE_HEIGHT / tile.height()),
                    None => (1.85, 1.57),
                };
                let prop_size = Vec2::new(
                    prop_texture.width() * scale_x,
                    prop_texture.height() * scale_y,
                );
                let style = layout::PropStyle::of(prop);
                let surface_y = center.y - style.surface_drop();
                let top_left = Vec2::new(
                    center.x - prop_size.x * 0.5,
                    surface_y - prop_size.y + style.baseline_pad(),
                );
                draw_world_texture(
                    prop_texture,
                    camera.world_to_screen(top_left, viewport),
                    prop_size * zoom,
                );
            }
        }

        if let Some(overlay) = cell.overlay {
            draw_heat_mask(center, overlay, &camera, viewport);
        }

        if let Some(target) = scene.target {
            if target.coord == cell.coord {
                if let Some(texture) = library.texture(target.sprite) {
                    let wiggle = if scene.hud.mission_complete {
                        layout::target_wiggle(elapsed_secs)
                    } else {
                        0.0
                    };
                    let top_left = Vec2::new(
                        center.x - TARGET_WIDTH * 0.5 + wiggle,
                        center.y - TARGET_HEIGHT,
                    );
                    draw_world_texture(
                        texture,
                        camera.world_to_screen(top_left, viewport),
                        Vec2::new(TARGET_WIDTH, TARGET_HEIGHT) * zoom,
                    );
                }
            }
        }
    }
}

fn draw_world_texture(texture: macroquad::texture::Texture2D, screen: Vec2, size: Vec2) {
    texture::draw_texture_ex(
        texture,
        screen.x,
        screen.y,
        macroquad::color::WHITE,
        DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(size.x, size.y)),
            ..DrawTextureParams::default()
        },
    );
}

/// Fills the squashed heat hexagon as a triangle fan around its center.
fn draw_heat_mask(cell_center: Vec2, overlay: Color, camera: &Camera, viewport: Vec2) {
    let lifted = cell_center - Vec2::new(0.0, HEAT_LIFT);
    let corners = layout::heat_mask_corners(lifted);
    let color = to_macroquad_color(overlay);

    let center_screen = camera.world_to_screen(lifted, viewport);
    let center = MacroquadVec2::new(center_screen.x, center_screen.y);
    for index in 0..corners.len() {
        let a = camera.world_to_screen(corners[index], viewport);
        let b = camera.world_to_screen(corners[(index + 1) % corners.len()], viewport);
        draw_triangle(
            center,
            MacroquadVec2::new(a.x, a.y),
            MacroquadVec2::new(b.x, b.y),
            color,
        );
    }
}

/// Draws confetti as rotated screen-space rectangles twice as wide as tall.
fn draw_confetti(particles: &[ConfettiParticle]) {
    for particle in particles {
        let half = Vec2::new(particle.size * 0.5, particle.size * 0.25);
        let (sin, cos) = particle.rotation.sin_cos();
        let rotate = |corner: Vec2| {
            MacroquadVec2::new(
                particle.position.x + corner.x * cos - corner.y * sin,
                particle.position.y + corner.x * sin + corner.y * cos,
            )
        };
        let top_left = rotate(Vec2::new(-half.x, -half.y));
        let top_right = rotate(Vec2::new(half.x, -half.y));
        let bottom_right = rotate(Vec2::new(half.x, half.y));
        let bottom_left = rotate(Vec2::new(-half.x, half.y));
        let color = to_macroquad_color(particle.color);

        draw_triangle(top_left, top_right, bottom_right, color);
        draw_triangle(top_left, bottom_right, bottom_left, color);
    }
}

/// Draws the feedback banner centered near the top of the screen.
fn draw_status_banner(scene: &Scene, viewport: Vec2) {
    const FONT_SIZE: u16 = 32;
    let (text, color) = status_banner(&scene.hud);
    let metrics = measure_text(text, None, FONT_SIZE, 1.0);
    draw_text(
        text,
        (viewport.x - metrics.width) * 0.5,
        48.0,
        f32::from(FONT_SIZE),
        color,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
