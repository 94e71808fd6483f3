//! Mass-spring integrator for the pull-cord handle
//!
//! The handle is a point mass hanging from a fixed anchor on a damped spring.
//! Integration is explicit and per-frame: the frame rate is the time step.

use serde::{Deserialize, Serialize};

/// Velocities below this magnitude snap to zero after each step
pub const VELOCITY_EPSILON: f64 = 0.01;

/// Remaining offset from rest below which a settled axis snaps onto rest
pub const REST_EPSILON: f64 = 1e-6;

/// A 2D coordinate in the controller's local space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows downwards)
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Fixed end of the spring
///
/// Set once at startup and never moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl AnchorPoint {
    /// Create an anchor
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Anchor as a plain point
    pub const fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Default for AnchorPoint {
    /// Center of the 100x300 lightbulb container, at the bottom of the socket
    fn default() -> Self {
        Self::new(50.0, 200.0)
    }
}

/// Spring configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParameters {
    /// Natural length of the cord
    pub rest_length: f64,
    /// Spring constant
    pub stiffness: f64,
    /// Per-step velocity retention, expected in (0, 1)
    pub damping: f64,
    /// Mass of the handle
    pub mass: f64,
    /// Displacement past rest that flips the toggle on release
    pub toggle_threshold: f64,
}

impl Default for SpringParameters {
    fn default() -> Self {
        Self {
            rest_length: 90.0,
            stiffness: 0.15,
            damping: 0.82,
            mass: 1.0,
            toggle_threshold: 60.0,
        }
    }
}

impl SpringParameters {
    /// Where the handle hangs when nothing pulls on it
    pub fn rest_position(&self, anchor: AnchorPoint) -> Point {
        Point::new(anchor.x, anchor.y + self.rest_length)
    }
}

/// Position and velocity of the handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleState {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Horizontal velocity (units per frame)
    pub vx: f64,
    /// Vertical velocity (units per frame)
    pub vy: f64,
}

impl HandleState {
    /// Handle hanging motionless at rest
    pub fn at_rest(anchor: AnchorPoint, params: &SpringParameters) -> Self {
        let rest = params.rest_position(anchor);
        Self {
            x: rest.x,
            y: rest.y,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Current position
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Vertical offset from the rest position (positive when pulled down)
    pub fn displacement(&self, anchor: AnchorPoint, params: &SpringParameters) -> f64 {
        self.y - (anchor.y + params.rest_length)
    }

    /// Cancel residual momentum
    pub const fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// Advance the free (undragged) handle by one frame
    pub fn step(&mut self, anchor: AnchorPoint, params: &SpringParameters) {
        let rest = params.rest_position(anchor);

        let fy = -params.stiffness * (self.y - rest.y);
        self.vy = (self.vy + fy / params.mass) * params.damping;
        self.y += self.vy;

        let fx = -params.stiffness * (self.x - rest.x);
        self.vx = (self.vx + fx / params.mass) * params.damping;
        self.x += self.vx;

        if self.vy.abs() < VELOCITY_EPSILON {
            self.vy = 0.0;
            if (self.y - rest.y).abs() < REST_EPSILON {
                self.y = rest.y;
            }
        }
        if self.vx.abs() < VELOCITY_EPSILON {
            self.vx = 0.0;
            if (self.x - rest.x).abs() < REST_EPSILON {
                self.x = rest.x;
            }
        }
    }

    /// Whether the handle sits exactly at rest with no motion
    pub fn is_settled(&self, anchor: AnchorPoint, params: &SpringParameters) -> bool {
        let rest = params.rest_position(anchor);
        self.vx == 0.0 && self.vy == 0.0 && self.x == rest.x && self.y == rest.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> (AnchorPoint, SpringParameters) {
        (AnchorPoint::default(), SpringParameters::default())
    }

    #[test]
    fn test_rest_position_hangs_below_anchor() {
        let (anchor, params) = defaults();
        let rest = params.rest_position(anchor);
        assert_eq!(rest, Point::new(50.0, 290.0));
    }

    #[test]
    fn test_rest_is_fixed_point() {
        let (anchor, params) = defaults();
        let mut handle = HandleState::at_rest(anchor, &params);
        for _ in 0..100 {
            handle.step(anchor, &params);
        }
        assert_eq!(handle, HandleState::at_rest(anchor, &params));
    }

    #[test]
    fn test_first_step_matches_formula() {
        let (anchor, params) = defaults();
        let mut handle = HandleState {
            x: 50.0,
            y: 350.0,
            vx: 0.0,
            vy: 0.0,
        };
        handle.step(anchor, &params);

        // fy = -0.15 * 60 = -9; vy = -9 * 0.82 = -7.38
        assert!((handle.vy - -7.38).abs() < 1e-12);
        assert!((handle.y - 342.62).abs() < 1e-12);
        assert_eq!(handle.vx, 0.0);
        assert_eq!(handle.x, 50.0);
    }

    #[test]
    fn test_small_velocity_snaps_to_zero() {
        let (anchor, params) = defaults();
        let mut handle = HandleState {
            x: 50.0,
            y: 290.01,
            vx: 0.0,
            vy: 0.0,
        };
        handle.step(anchor, &params);
        assert_eq!(handle.vy, 0.0);
        assert!(handle.y < 290.01);
    }

    #[test]
    fn test_released_handle_settles_exactly_at_rest() {
        let (anchor, params) = defaults();
        let mut handle = HandleState {
            x: 80.0,
            y: 330.0,
            vx: 0.0,
            vy: 0.0,
        };
        for _ in 0..1000 {
            handle.step(anchor, &params);
        }
        assert!(handle.is_settled(anchor, &params));
    }

    #[test]
    fn test_displacement_sign() {
        let (anchor, params) = defaults();
        let mut handle = HandleState::at_rest(anchor, &params);
        handle.y = 280.0;
        assert!((handle.displacement(anchor, &params) - -10.0).abs() < f64::EPSILON);
        handle.y = 360.0;
        assert!((handle.displacement(anchor, &params) - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
        assert_eq!(a.midpoint(b), Point::new(1.5, 2.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the free handle converges to rest, with the oscillation
            /// envelope never growing from one window of frames to the next
            #[test]
            fn free_handle_converges(dx in -500.0f64..500.0, dy in -500.0f64..500.0) {
                let (anchor, params) = defaults();
                let rest = params.rest_position(anchor);
                let mut handle = HandleState {
                    x: rest.x + dx,
                    y: rest.y + dy,
                    vx: 0.0,
                    vy: 0.0,
                };

                let mut previous_peak = f64::INFINITY;
                for _ in 0..100 {
                    let mut peak: f64 = 0.0;
                    for _ in 0..20 {
                        handle.step(anchor, &params);
                        peak = peak.max(handle.displacement(anchor, &params).abs());
                    }
                    prop_assert!(peak <= previous_peak);
                    previous_peak = peak;
                }

                prop_assert!(handle.displacement(anchor, &params).abs() < 1e-6);
                prop_assert!((handle.x - rest.x).abs() < 1e-6);
            }

            /// Property: stepping never produces non-finite values
            #[test]
            fn step_stays_finite(y in 210.0f64..2000.0, vy in -50.0f64..50.0) {
                let (anchor, params) = defaults();
                let mut handle = HandleState { x: 50.0, y, vx: 0.0, vy };
                for _ in 0..500 {
                    handle.step(anchor, &params);
                    prop_assert!(handle.y.is_finite() && handle.vy.is_finite());
                }
            }
        }
    }
}
