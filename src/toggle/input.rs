//! Pointer input normalization
//!
//! Mouse and touch streams arrive with different shapes; both are folded into
//! one [`PointerEvent`] and mapped from client coordinates into the
//! controller's local coordinate space.

use super::physics::{AnchorPoint, Point};
use serde::{Deserialize, Serialize};

/// Which device produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse button / motion
    Mouse,
    /// Touch start / move / end
    Touch,
}

/// Stage of a press gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// mousedown / touchstart
    Down,
    /// mousemove / touchmove
    Move,
    /// mouseup / touchend
    Up,
}

/// A normalized pointer event in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Source device
    pub kind: PointerKind,
    /// Gesture stage
    pub phase: PointerPhase,
    /// Position relative to the host viewport
    pub client: Point,
}

impl PointerEvent {
    /// Mouse event
    pub const fn mouse(phase: PointerPhase, client: Point) -> Self {
        Self {
            kind: PointerKind::Mouse,
            phase,
            client,
        }
    }

    /// Touch event built from the touch list; only the first touch is used
    ///
    /// Returns `None` for a move without touches. Touch-end carries no
    /// touches at all, so it falls back to the origin.
    pub fn touch(phase: PointerPhase, touches: &[Point]) -> Option<Self> {
        let client = match (phase, touches.first()) {
            (_, Some(first)) => *first,
            (PointerPhase::Up, None) => Point::default(),
            (_, None) => return None,
        };
        Some(Self {
            kind: PointerKind::Touch,
            phase,
            client,
        })
    }
}

/// Axis-aligned rectangle in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Client-to-local coordinate mapping for the handle container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerMapping {
    /// Display scale of the container (local = raw / scale)
    pub scale: f64,
    /// How far below the anchor the handle must stay while dragged
    pub min_offset_below_anchor: f64,
}

impl Default for PointerMapping {
    fn default() -> Self {
        Self {
            scale: 1.0,
            min_offset_below_anchor: 10.0,
        }
    }
}

impl PointerMapping {
    /// Mapping used by the website, where the container is drawn at 20%
    pub const fn web() -> Self {
        Self {
            scale: 0.20,
            min_offset_below_anchor: 10.0,
        }
    }

    /// Convert a client position into local container coordinates
    pub fn to_local(&self, client: Point, container: Rect) -> Point {
        let raw_x = client.x - container.left;
        let raw_y = client.y - container.top;
        Point::new(raw_x / self.scale, raw_y / self.scale)
    }

    /// Local position the dragged handle should take, kept below the anchor
    pub fn drag_target(&self, client: Point, container: Rect, anchor: AnchorPoint) -> Point {
        let local = self.to_local(client, container);
        Point::new(
            local.x,
            local.y.max(anchor.y + self.min_offset_below_anchor),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_divides_by_scale() {
        let mapping = PointerMapping::web();
        let container = Rect {
            left: 100.0,
            top: 40.0,
            width: 20.0,
            height: 60.0,
        };
        let local = mapping.to_local(Point::new(110.0, 112.0), container);
        assert!((local.x - 50.0).abs() < 1e-9);
        assert!((local.y - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_target_clamps_above_anchor() {
        let mapping = PointerMapping::default();
        let anchor = AnchorPoint::default();
        let target = mapping.drag_target(Point::new(70.0, 0.0), Rect::default(), anchor);
        assert_eq!(target, Point::new(70.0, 210.0));
    }

    #[test]
    fn test_drag_target_below_clamp_passes_through() {
        let mapping = PointerMapping::default();
        let anchor = AnchorPoint::default();
        let target = mapping.drag_target(Point::new(40.0, 355.0), Rect::default(), anchor);
        assert_eq!(target, Point::new(40.0, 355.0));
    }

    #[test]
    fn test_touch_uses_first_touch() {
        let event = PointerEvent::touch(
            PointerPhase::Move,
            &[Point::new(1.0, 2.0), Point::new(9.0, 9.0)],
        )
        .unwrap();
        assert_eq!(event.kind, PointerKind::Touch);
        assert_eq!(event.client, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_touch_move_without_touches_is_dropped() {
        assert!(PointerEvent::touch(PointerPhase::Move, &[]).is_none());
        assert!(PointerEvent::touch(PointerPhase::Up, &[]).is_some());
    }
}
