//! GUI controller
//!
//! Wires the toggle controller and the snow layer to the Slint window. All
//! state lives on the UI thread: the frame timer and the pointer callbacks
//! run to completion on the same event loop, so `Rc<RefCell<_>>` is enough.

use super::snow_layer::SnowLayer;
use super::surface::SlintSurface;
use crate::MainWindow;
use anyhow::{Context, Result};
use pullcord::config::{AppConfig, ConfigManager};
use pullcord::snow::is_snow_season;
use pullcord::storage::Preferences;
use pullcord::toggle::{Point, PointerEvent, PointerPhase, ToggleController};
use slint::{ComponentHandle, Timer, TimerMode};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Animation frame interval (~60 Hz)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Quiet period after the last resize before the snow field is rebuilt
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

type SharedToggle = Rc<RefCell<ToggleController<SlintSurface>>>;

/// Owns the window and everything animated inside it
pub struct GuiController {
    window: MainWindow,
    _frame_timer: Timer,
}

impl GuiController {
    /// Build the window and start animating
    pub fn new(config: AppConfig, preferences: Preferences) -> Result<Self> {
        let window = MainWindow::new().context("Failed to create main window")?;
        window.set_hero_title(config.hero.title.clone().into());
        window.window().set_size(slint::LogicalSize::new(
            config.window_state.width as f32,
            config.window_state.height as f32,
        ));

        let surface = SlintSurface::new(&window, &config.themed_images);
        let toggle = ToggleController::mount(Some(surface), config.toggle, preferences)
            .map(|controller| Rc::new(RefCell::new(controller)));
        if let Some(toggle) = &toggle {
            Self::connect_pointer(&window, toggle);
        }

        let snow = if config.hero.snow_enabled && is_snow_season(chrono::Utc::now()) {
            info!("Snow season, enabling snow layer");
            Some(Rc::new(RefCell::new(SnowLayer::new(config.hero.clone()))))
        } else {
            debug!("Snow layer disabled");
            None
        };

        let frame_timer = Self::start_frame_timer(&window, toggle, snow);
        Self::persist_window_size_on_close(&window, config);

        Ok(Self {
            window,
            _frame_timer: frame_timer,
        })
    }

    fn connect_pointer(window: &MainWindow, toggle: &SharedToggle) {
        let route = |phase: PointerPhase| {
            let toggle = Rc::clone(toggle);
            move |x: f32, y: f32| {
                let event = PointerEvent::mouse(phase, Point::new(f64::from(x), f64::from(y)));
                toggle.borrow_mut().handle_pointer(event);
            }
        };
        window.on_pointer_down(route(PointerPhase::Down));
        window.on_pointer_move(route(PointerPhase::Move));
        window.on_pointer_up(route(PointerPhase::Up));
    }

    fn start_frame_timer(
        window: &MainWindow,
        toggle: Option<SharedToggle>,
        snow: Option<Rc<RefCell<SnowLayer>>>,
    ) -> Timer {
        let weak = window.as_weak();
        let resize_timer = Timer::default();
        let last_seen = Cell::new((0, 0));

        let frame_timer = Timer::default();
        frame_timer.start(TimerMode::Repeated, FRAME_INTERVAL, move || {
            if let Some(toggle) = &toggle {
                toggle.borrow_mut().frame();
            }

            let (Some(snow), Some(window)) = (&snow, weak.upgrade()) else {
                return;
            };
            let current = SnowLayer::hero_size(&window);
            if snow.borrow().size() == (0, 0) {
                // First layout pass
                snow.borrow_mut().rebuild(&window);
                last_seen.set(current);
            } else if current != last_seen.get() {
                last_seen.set(current);
                let snow = Rc::clone(snow);
                let weak = weak.clone();
                resize_timer.start(TimerMode::SingleShot, RESIZE_DEBOUNCE, move || {
                    if let Some(window) = weak.upgrade() {
                        snow.borrow_mut().rebuild(&window);
                    }
                });
            }
            snow.borrow_mut().tick(&window);
        });
        frame_timer
    }

    fn persist_window_size_on_close(window: &MainWindow, config: AppConfig) {
        let weak = window.as_weak();
        window.window().on_close_requested(move || {
            if let Some(window) = weak.upgrade() {
                let size = window.window().size().to_logical(window.window().scale_factor());
                let mut config = config.clone();
                config.window_state.width = size.width.round() as u32;
                config.window_state.height = size.height.round() as u32;
                if let Err(e) = ConfigManager::save(&config) {
                    warn!("Failed to save window size: {}", e);
                }
            }
            slint::CloseRequestResponse::HideWindow
        });
    }

    /// Show the window and block on the event loop
    pub fn run(self) -> Result<()> {
        self.window.run().context("Slint event loop failed")
    }
}
