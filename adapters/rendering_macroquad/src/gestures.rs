//! Pointer gesture interpretation shared by mouse and touch input.
//!
//! A press that stays within its drag threshold resolves to a tap on
//! release; once the threshold is crossed the gesture becomes a pan and the
//! release is swallowed. Two simultaneous touches cancel any pending tap and
//! feed the pinch tracker instead.

use glam::Vec2;

/// Pixels a mouse may travel while pressed before the release stops
/// counting as a tap.
pub(crate) const MOUSE_DRAG_THRESHOLD: f32 = 8.0;

/// Pixels a touch may travel before it becomes a pan instead of a tap.
pub(crate) const TOUCH_DRAG_THRESHOLD: f32 = 10.0;

/// Tracks one pointer from press to release.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PointerTracker {
    state: Option<PointerState>,
}

#[derive(Clone, Copy, Debug)]
struct PointerState {
    pressed_at: Vec2,
    last: Vec2,
    dragging: bool,
}

impl PointerTracker {
    /// Begins tracking a fresh press.
    pub(crate) fn press(&mut self, position: Vec2) {
        self.state = Some(PointerState {
            pressed_at: position,
            last: position,
            dragging: false,
        });
    }

    /// Feeds the pointer's current position, returning the pan delta to
    /// apply this frame once the gesture has committed to dragging.
    pub(crate) fn motion(&mut self, position: Vec2, threshold: f32) -> Option<Vec2> {
        let state = self.state.as_mut()?;
        if !state.dragging && (position - state.pressed_at).length() > threshold {
            state.dragging = true;
        }
        let delta = position - state.last;
        state.last = position;
        if state.dragging && delta != Vec2::ZERO {
            Some(delta)
        } else {
            None
        }
    }

    /// Ends the gesture, returning the tap position when the pointer never
    /// committed to dragging.
    pub(crate) fn release(&mut self, position: Vec2) -> Option<Vec2> {
        let state = self.state.take()?;
        if state.dragging {
            None
        } else {
            Some(position)
        }
    }

    /// Abandons the gesture without producing a tap.
    pub(crate) fn cancel(&mut self) {
        self.state = None;
    }
}

/// Tracks the span and midpoint between two touches across frames.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PinchTracker {
    previous: Option<(f32, Vec2)>,
}

/// One frame of a two-finger gesture: zoom the span ratio at the current
/// midpoint, then pan by the midpoint's travel since the previous frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PinchStep {
    /// Span ratio relative to the previous frame.
    pub(crate) factor: f32,
    /// Current midpoint between the two touches, in screen space.
    pub(crate) midpoint: Vec2,
    /// Midpoint travel since the previous frame, in screen space.
    pub(crate) pan: Vec2,
}

impl PinchTracker {
    /// Feeds this frame's touch pair, returning the combined zoom and pan
    /// step relative to the previous frame.
    pub(crate) fn update(&mut self, first: Vec2, second: Vec2) -> Option<PinchStep> {
        let span = first.distance(second);
        let midpoint = (first + second) * 0.5;
        let step = self
            .previous
            .filter(|(previous_span, _)| *previous_span > f32::EPSILON)
            .map(|(previous_span, previous_midpoint)| PinchStep {
                factor: span / previous_span,
                midpoint,
                pan: midpoint - previous_midpoint,
            });
        self.previous = Some((span, midpoint));
        step
    }

    /// Forgets the tracked touches once fewer than two remain.
    pub(crate) fn reset(&mut self) {
        self.previous = None;
    }
}
