//! Screen-space confetti burst played on mission success.
//!
//! Particles live entirely in screen pixels and ignore the camera; adapters
//! step the simulation once per frame and draw each particle as a rotated
//! rectangle twice as wide as it is tall.

use crate::Color;
use glam::Vec2;
use hexhunt_core::SplitMix64;

/// Number of particles in one burst.
pub const BURST_SIZE: usize = 70;

/// Downward acceleration applied each frame, in pixels.
pub const GRAVITY: f32 = 0.15;

/// Pixels past the bottom edge after which a particle is culled.
const CULL_MARGIN: f32 = 20.0;

/// Celebration palette.
pub const PALETTE: [Color; 7] = [
    Color::from_rgb_u8(0xef, 0x44, 0x44),
    Color::from_rgb_u8(0xf9, 0x73, 0x16),
    Color::from_rgb_u8(0xea, 0xb3, 0x08),
    Color::from_rgb_u8(0x22, 0xc5, 0x5e),
    Color::from_rgb_u8(0x3b, 0x82, 0xf6),
    Color::from_rgb_u8(0x8b, 0x5c, 0xf6),
    Color::from_rgb_u8(0xec, 0x48, 0x99),
];

/// One tumbling confetti rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiParticle {
    /// Screen-space position of the particle's center.
    pub position: Vec2,
    /// Screen-space velocity in pixels per frame.
    pub velocity: Vec2,
    /// Current rotation in radians.
    pub rotation: f32,
    /// Rotation applied each frame, in radians.
    pub spin: f32,
    /// Width of the rectangle; the height is half of it.
    pub size: f32,
    /// Fill color drawn opaquely.
    pub color: Color,
}

/// Spawns one burst across the upper portion of the viewport.
#[must_use]
pub fn spawn(rng: &mut SplitMix64, viewport: Vec2) -> Vec<ConfettiParticle> {
    let center_x = viewport.x * 0.5;
    (0..BURST_SIZE)
        .map(|_| {
            let spread = (rng.next_unit() as f32 - 0.5) * viewport.x * 0.8;
            ConfettiParticle {
                position: Vec2::new(
                    center_x + spread,
                    viewport.y * 0.2 + rng.next_unit() as f32 * 80.0,
                ),
                velocity: Vec2::new(
                    (rng.next_unit() as f32 - 0.5) * 6.0,
                    rng.next_unit() as f32 * 4.0 + 2.0,
                ),
                rotation: rng.next_unit() as f32 * std::f32::consts::TAU,
                spin: (rng.next_unit() as f32 - 0.5) * 0.3,
                size: 8.0 + rng.next_unit() as f32 * 10.0,
                color: PALETTE[rng.next_index(PALETTE.len())],
            }
        })
        .collect()
}

/// Advances every particle by one frame and culls those that fell off the
/// bottom of the viewport.
pub fn step(particles: &mut Vec<ConfettiParticle>, viewport_height: f32) {
    for particle in particles.iter_mut() {
        particle.position += particle.velocity;
        particle.velocity.y += GRAVITY;
        particle.rotation += particle.spin;
    }
    particles.retain(|particle| particle.position.y < viewport_height + CULL_MARGIN);
}
