//! Spring-toggle controller
//!
//! Owns the handle simulation and decides, on release, whether the pull was
//! long enough to flip the theme.
//!
//! # State Machine
//!
//! ```text
//!            pointer down (velocity zeroed)
//!   Idle ───────────────────────────────────▶ Dragging
//!    ▲                                           │
//!    └───────────────────────────────────────────┘
//!       pointer up: displacement > threshold ⇒ flip theme, persist, pulse
//! ```
//!
//! While `Idle` the integrator is the only writer of the handle; while
//! `Dragging` only pointer moves write it. `frame()` checks the mode before
//! integrating, so the two never touch the handle in the same frame.

use super::input::{PointerEvent, PointerMapping, PointerPhase, Rect};
use super::physics::{AnchorPoint, HandleState, Point, SpringParameters};
use super::render::{CordPath, CordStyle};
use crate::error::{PullcordError, Result, StringError};
use crate::storage::Preferences;
use crate::theme::{THEME_KEY, Theme, ThemeTarget, apply_theme};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Length of the haptic pulse on a confirmed toggle
pub const TOGGLE_PULSE: Duration = Duration::from_millis(15);

/// The page elements the toggle drives
///
/// A host that cannot provide them simply does not mount a controller.
pub trait CordSurface: ThemeTarget {
    /// Bounding box of the handle container in client coordinates
    fn container_rect(&self) -> Rect;

    /// Move the handle element's top-left corner
    fn place_handle(&mut self, left: f64, top: f64);

    /// Redraw the cord
    fn draw_cord(&mut self, path: &CordPath);
}

/// Optional vibration output
pub trait Haptics {
    /// Fire-and-forget pulse
    fn pulse(&self, duration: Duration);
}

/// Platform without vibration support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self, _duration: Duration) {}
}

/// Who currently owns the handle position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// Spring integration moves the handle
    #[default]
    Idle,
    /// Pointer input moves the handle
    Dragging,
}

/// Geometry and physics of one pull-cord toggle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleSettings {
    /// Fixed end of the cord
    pub anchor: AnchorPoint,
    /// Spring constants and release threshold
    pub spring: SpringParameters,
    /// Pointer coordinate mapping
    pub pointer: PointerMapping,
    /// Cord drawing tunables
    pub style: CordStyle,
}

impl ToggleSettings {
    /// Reject values the integrator cannot run with
    ///
    /// Mass, stiffness and pointer scale must be positive, damping must lie
    /// in `(0, 1)`, and every value must be finite. Anything else turns the
    /// handle position into NaN or infinity after a few frames.
    pub fn validate(&self) -> Result<()> {
        let spring = &self.spring;
        let finite = [
            self.anchor.x,
            self.anchor.y,
            spring.rest_length,
            spring.stiffness,
            spring.damping,
            spring.mass,
            spring.toggle_threshold,
            self.pointer.scale,
            self.pointer.min_offset_below_anchor,
            self.style.handle_radius,
            self.style.slack_tolerance,
            self.style.bulge_factor,
        ]
        .iter()
        .all(|value| value.is_finite());

        let reason = if !finite {
            "toggle settings contain a non-finite value"
        } else if spring.mass <= 0.0 {
            "spring mass must be positive"
        } else if spring.stiffness <= 0.0 {
            "spring stiffness must be positive"
        } else if spring.damping <= 0.0 || spring.damping >= 1.0 {
            "spring damping must lie between 0 and 1"
        } else if self.pointer.scale <= 0.0 {
            "pointer scale must be positive"
        } else {
            return Ok(());
        };
        Err(PullcordError::ConfigError(StringError::new(reason)))
    }
}

/// Drag-release theme toggle with spring return
pub struct ToggleController<S: CordSurface> {
    settings: ToggleSettings,
    handle: HandleState,
    mode: DragMode,
    theme: Theme,
    surface: S,
    preferences: Preferences,
    haptics: Box<dyn Haptics>,
}

impl<S: CordSurface> ToggleController<S> {
    /// Mount the toggle on a surface
    ///
    /// Restores the stored theme and applies it immediately. Returns `None`
    /// when the host has no surface to offer; nothing is animated then.
    pub fn mount(
        surface: Option<S>,
        settings: ToggleSettings,
        preferences: Preferences,
    ) -> Option<Self> {
        let Some(mut surface) = surface else {
            debug!("Lightbulb elements not present, toggle disabled");
            return None;
        };

        let theme = Theme::from_stored(preferences.get(THEME_KEY).as_deref());
        apply_theme(&mut surface, theme);
        info!("Toggle mounted with {} theme", theme);

        let mut controller = Self {
            settings,
            handle: HandleState::at_rest(settings.anchor, &settings.spring),
            mode: DragMode::Idle,
            theme,
            surface,
            preferences,
            haptics: Box::new(NoHaptics),
        };
        controller.render();
        Some(controller)
    }

    /// Use a vibration output for confirmed toggles
    #[must_use]
    pub fn with_haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    /// Route a normalized pointer event
    ///
    /// Returns the new theme when the event was a release that flipped it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Theme> {
        match event.phase {
            PointerPhase::Down => {
                self.begin_drag();
                None
            }
            PointerPhase::Move => {
                self.drag_to(event.client);
                None
            }
            PointerPhase::Up => self.release(),
        }
    }

    /// Pointer pressed on the handle
    pub fn begin_drag(&mut self) {
        self.mode = DragMode::Dragging;
        self.handle.stop();
        debug!("Drag started at ({:.1}, {:.1})", self.handle.x, self.handle.y);
    }

    /// Pointer moved; ignored unless dragging
    pub fn drag_to(&mut self, client: Point) {
        if self.mode != DragMode::Dragging {
            return;
        }
        let target = self.settings.pointer.drag_target(
            client,
            self.surface.container_rect(),
            self.settings.anchor,
        );
        self.handle.x = target.x;
        self.handle.y = target.y;
    }

    /// Pointer released; flips the theme when pulled past the threshold
    pub fn release(&mut self) -> Option<Theme> {
        if self.mode != DragMode::Dragging {
            return None;
        }
        self.mode = DragMode::Idle;

        let displacement = self
            .handle
            .displacement(self.settings.anchor, &self.settings.spring);
        debug!(
            "Drag released with displacement {:.1} (threshold {:.1})",
            displacement, self.settings.spring.toggle_threshold
        );

        if displacement > self.settings.spring.toggle_threshold {
            Some(self.toggle_theme())
        } else {
            None
        }
    }

    /// One animation frame: integrate when idle, then redraw
    pub fn frame(&mut self) {
        if self.mode == DragMode::Idle {
            self.handle.step(self.settings.anchor, &self.settings.spring);
        }
        self.render();
    }

    fn toggle_theme(&mut self) -> Theme {
        let next = self.theme.toggled();
        info!("Theme toggled: {} -> {}", self.theme, next);

        apply_theme(&mut self.surface, next);
        self.preferences.set(THEME_KEY, next.as_str());
        self.haptics.pulse(TOGGLE_PULSE);

        self.theme = next;
        next
    }

    fn render(&mut self) {
        let position = self.handle.position();
        self.surface.place_handle(
            position.x - self.settings.style.handle_radius,
            position.y,
        );

        let path = CordPath::compute(
            self.settings.anchor,
            position,
            self.handle.vx,
            self.settings.spring.rest_length,
            &self.settings.style,
            self.mode == DragMode::Dragging,
        );
        self.surface.draw_cord(&path);
    }

    /// Current handle simulation state
    pub const fn handle(&self) -> &HandleState {
        &self.handle
    }

    /// Current drag mode
    pub const fn mode(&self) -> DragMode {
        self.mode
    }

    /// Theme currently applied
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Settings the toggle was mounted with
    pub const fn settings(&self) -> &ToggleSettings {
        &self.settings
    }

    /// The surface being driven
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface (e.g. after a host resize)
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: CordSurface> std::fmt::Debug for ToggleController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleController")
            .field("handle", &self.handle)
            .field("mode", &self.mode)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}
