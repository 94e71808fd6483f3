//! Cord geometry
//!
//! Each frame the cord is either a straight segment from anchor to handle or,
//! when the handle has sprung back closer than the rest length, a quadratic
//! curve bulging sideways to look like slack cable.

use super::physics::{AnchorPoint, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual tunables for the cord and handle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CordStyle {
    /// Half the handle's width; the handle element is centered on the cord end
    pub handle_radius: f64,
    /// How much shorter than rest the cord must be before it curves
    pub slack_tolerance: f64,
    /// Sideways bulge per unit of missing length
    pub bulge_factor: f64,
}

impl Default for CordStyle {
    fn default() -> Self {
        Self {
            handle_radius: 24.0,
            slack_tolerance: 5.0,
            bulge_factor: 1.5,
        }
    }
}

/// Path between anchor and handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CordPath {
    /// Taut cord
    Straight {
        /// Anchor end
        from: Point,
        /// Handle end
        to: Point,
    },
    /// Slack cord
    Curved {
        /// Anchor end
        from: Point,
        /// Quadratic control point
        control: Point,
        /// Handle end
        to: Point,
    },
}

impl CordPath {
    /// Compute the cord for the current frame
    ///
    /// `dragging` suppresses slack: a held cord is always drawn taut.
    pub fn compute(
        anchor: AnchorPoint,
        handle: Point,
        velocity_x: f64,
        rest_length: f64,
        style: &CordStyle,
        dragging: bool,
    ) -> Self {
        let from = anchor.point();
        let dist = from.distance_to(handle);
        let compressed = dist < rest_length - style.slack_tolerance;

        if compressed && !dragging {
            let bulge = (rest_length - dist) * style.bulge_factor;
            let side = if velocity_x > 0.0 { -1.0 } else { 1.0 };
            let mid = from.midpoint(handle);
            Self::Curved {
                from,
                control: Point::new(mid.x + bulge * side, mid.y),
                to: handle,
            }
        } else {
            Self::Straight { from, to: handle }
        }
    }

    /// Whether the cord is drawn with slack
    pub const fn is_curved(&self) -> bool {
        matches!(self, Self::Curved { .. })
    }

    /// Handle end of the cord
    pub const fn end(&self) -> Point {
        match self {
            Self::Straight { to, .. } | Self::Curved { to, .. } => *to,
        }
    }
}

/// SVG path data, e.g. `M50,200 L50,290`
impl fmt::Display for CordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight { from, to } => {
                write!(f, "M{},{} L{},{}", from.x, from.y, to.x, to.y)
            }
            Self::Curved { from, control, to } => write!(
                f,
                "M{},{} Q{},{} {},{}",
                from.x, from.y, control.x, control.y, to.x, to.y
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_cord_is_straight() {
        let path = CordPath::compute(
            AnchorPoint::default(),
            Point::new(50.0, 290.0),
            0.0,
            90.0,
            &CordStyle::default(),
            false,
        );
        assert!(!path.is_curved());
        assert_eq!(path.to_string(), "M50,200 L50,290");
    }

    #[test]
    fn test_compressed_cord_bulges_against_velocity() {
        let style = CordStyle::default();
        let anchor = AnchorPoint::default();
        let handle = Point::new(50.0, 250.0);

        let moving_right = CordPath::compute(anchor, handle, 2.0, 90.0, &style, false);
        let CordPath::Curved { control, .. } = moving_right else {
            panic!("expected a curved cord");
        };
        // dist = 50, bulge = 40 * 1.5 = 60, side = -1
        assert!((control.x - -10.0).abs() < 1e-9);
        assert!((control.y - 225.0).abs() < 1e-9);

        let moving_left = CordPath::compute(anchor, handle, -2.0, 90.0, &style, false);
        let CordPath::Curved { control, .. } = moving_left else {
            panic!("expected a curved cord");
        };
        assert!((control.x - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_slightly_short_cord_stays_straight() {
        let path = CordPath::compute(
            AnchorPoint::default(),
            Point::new(50.0, 286.0),
            0.0,
            90.0,
            &CordStyle::default(),
            false,
        );
        assert!(!path.is_curved());
    }

    #[test]
    fn test_dragged_cord_is_never_curved() {
        let path = CordPath::compute(
            AnchorPoint::default(),
            Point::new(50.0, 215.0),
            0.0,
            90.0,
            &CordStyle::default(),
            true,
        );
        assert!(!path.is_curved());
        assert_eq!(path.end(), Point::new(50.0, 215.0));
    }

    #[test]
    fn test_curved_path_data() {
        let path = CordPath::Curved {
            from: Point::new(50.0, 200.0),
            control: Point::new(-10.0, 225.0),
            to: Point::new(50.0, 250.0),
        };
        assert_eq!(path.to_string(), "M50,200 Q-10,225 50,250");
    }
}
