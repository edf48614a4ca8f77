//! Pan/zoom camera shared by every backend.
//!
//! Screen space is `world * zoom + viewport / 2 + offset`, so a fresh camera
//! centers the world origin on the viewport. Zooming anchors the world point
//! under the cursor, and fitting picks the largest zoom that shows the whole
//! grid with a margin.

use glam::Vec2;

/// Smallest zoom the player can reach.
pub const MIN_ZOOM: f32 = 0.25;

/// Largest zoom the player can reach.
pub const MAX_ZOOM: f32 = 2.5;

/// Zoom range used when fitting the grid into the viewport.
const FIT_MIN_ZOOM: f32 = 0.35;
const FIT_MAX_ZOOM: f32 = 1.2;

/// Screen-pixel margin kept around the grid when fitting.
const FIT_MARGIN: f32 = 50.0;

/// Axis-aligned world-space rectangle enclosing drawable content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    /// Smallest world coordinates of the rectangle.
    pub min: Vec2,
    /// Largest world coordinates of the rectangle.
    pub max: Vec2,
}

impl WorldBounds {
    /// Creates bounds from opposite corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Width of the rectangle in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Maps world coordinates onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    zoom: f32,
    offset: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Camera {
    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current screen-space offset from the viewport center.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Projects a world-space point into screen space.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2, viewport: Vec2) -> Vec2 {
        world * self.zoom + viewport * 0.5 + self.offset
    }

    /// Projects a screen-space point back into world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2, viewport: Vec2) -> Vec2 {
        (screen - viewport * 0.5 - self.offset) / self.zoom
    }

    /// Translates the view by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Scales the zoom by `factor`, keeping the world point under `cursor`
    /// fixed on screen. The zoom is clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn zoom_at(&mut self, cursor: Vec2, viewport: Vec2, factor: f32) {
        let anchored = self.screen_to_world(cursor, viewport);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = cursor - viewport * 0.5 - anchored * self.zoom;
    }

    /// Frames the provided bounds inside the viewport.
    ///
    /// Picks the largest zoom that leaves a [`FIT_MARGIN`] border, clamped to
    /// a comfortable range, and recenters the view on the world origin.
    pub fn fit(&mut self, bounds: WorldBounds, viewport: Vec2) {
        let width = bounds.width().max(1.0);
        let height = bounds.height().max(1.0);
        let horizontal = (viewport.x - FIT_MARGIN) / width;
        let vertical = (viewport.y - FIT_MARGIN) / height;
        self.zoom = horizontal.min(vertical).clamp(FIT_MIN_ZOOM, FIT_MAX_ZOOM);
        self.offset = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(960.0, 720.0);

    #[test]
    fn default_camera_centers_the_world_origin() {
        let camera = Camera::default();

        assert_eq!(
            camera.world_to_screen(Vec2::ZERO, VIEWPORT),
            Vec2::new(480.0, 360.0)
        );
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let mut camera = Camera::default();
        camera.pan(Vec2::new(31.0, -12.0));
        camera.zoom_at(Vec2::new(100.0, 100.0), VIEWPORT, 1.1);

        let world = Vec2::new(-123.0, 456.0);
        let screen = camera.world_to_screen(world, VIEWPORT);
        let round_trip = camera.screen_to_world(screen, VIEWPORT);

        assert!((round_trip - world).length() < 1e-3);
    }

    #[test]
    fn zoom_at_keeps_the_cursor_point_fixed() {
        let mut camera = Camera::default();
        let cursor = Vec2::new(700.0, 150.0);
        let before = camera.screen_to_world(cursor, VIEWPORT);

        camera.zoom_at(cursor, VIEWPORT, 1.1);
        let after = camera.screen_to_world(cursor, VIEWPORT);

        assert!((after - before).length() < 1e-3);
        assert!(camera.zoom() > 1.0);
    }

    #[test]
    fn zoom_never_leaves_the_clamp_range() {
        let mut camera = Camera::default();
        for _ in 0..100 {
            camera.zoom_at(Vec2::ZERO, VIEWPORT, 0.9);
        }
        assert!((camera.zoom() - MIN_ZOOM).abs() < 1e-6);

        for _ in 0..100 {
            camera.zoom_at(Vec2::ZERO, VIEWPORT, 1.1);
        }
        assert!((camera.zoom() - MAX_ZOOM).abs() < 1e-6);
    }

    #[test]
    fn fit_clamps_zoom_and_resets_the_offset() {
        let mut camera = Camera::default();
        camera.pan(Vec2::new(200.0, 200.0));

        // A tiny grid would overshoot: the fit zoom caps out.
        camera.fit(
            WorldBounds::new(Vec2::splat(-10.0), Vec2::splat(10.0)),
            VIEWPORT,
        );
        assert!((camera.zoom() - 1.2).abs() < 1e-6);
        assert_eq!(camera.offset(), Vec2::ZERO);

        // A huge grid cannot shrink below the floor.
        camera.fit(
            WorldBounds::new(Vec2::splat(-5000.0), Vec2::splat(5000.0)),
            VIEWPORT,
        );
        assert!((camera.zoom() - 0.35).abs() < 1e-6);
    }

    #[test]
    fn fit_picks_the_tighter_axis() {
        let mut camera = Camera::default();
        let bounds = WorldBounds::new(Vec2::new(-500.0, -100.0), Vec2::new(500.0, 100.0));

        camera.fit(bounds, VIEWPORT);

        let expected = (VIEWPORT.x - 50.0) / 1000.0;
        assert!((camera.zoom() - expected).abs() < 1e-5);
    }
}
