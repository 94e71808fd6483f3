//! Slint-backed cord surface
//!
//! Maps the toggle's drawing and theming calls onto `MainWindow` properties.

use crate::MainWindow;
use pullcord::theme::{Theme, ThemeTarget, ThemedImage};
use pullcord::toggle::{CordPath, CordSurface, Rect};
use slint::{ComponentHandle, Image, Model, VecModel, Weak};
use smallvec::SmallVec;
use std::path::Path;
use std::rc::Rc;
use tracing::warn;

/// Window elements the toggle draws into
pub struct SlintSurface {
    window: Weak<MainWindow>,
    images: SmallVec<[ThemedImage; 4]>,
    image_model: Rc<VecModel<Image>>,
}

impl SlintSurface {
    /// Bind to a window and load the themed images at their current source
    pub fn new(window: &MainWindow, images: &[ThemedImage]) -> Self {
        let images: SmallVec<[ThemedImage; 4]> = images.iter().cloned().collect();
        let image_model = Rc::new(VecModel::from(
            images.iter().map(|image| load_image(&image.src)).collect::<Vec<_>>(),
        ));
        window.set_themed_images(image_model.clone().into());

        Self {
            window: window.as_weak(),
            images,
            image_model,
        }
    }
}

fn load_image(src: &str) -> Image {
    if src.is_empty() {
        return Image::default();
    }
    Image::load_from_path(Path::new(src)).unwrap_or_else(|e| {
        warn!("Failed to load themed image {}: {}", src, e);
        Image::default()
    })
}

impl ThemeTarget for SlintSurface {
    fn set_theme_attribute(&mut self, theme: Theme) {
        if let Some(window) = self.window.upgrade() {
            window.set_white_theme(theme == Theme::White);
        }
    }

    fn themed_images(&mut self) -> &mut [ThemedImage] {
        &mut self.images
    }

    fn image_source_changed(&mut self, index: usize) {
        if let Some(image) = self.images.get(index)
            && index < self.image_model.row_count()
        {
            self.image_model.set_row_data(index, load_image(&image.src));
        }
    }
}

impl CordSurface for SlintSurface {
    fn container_rect(&self) -> Rect {
        self.window
            .upgrade()
            .map_or_else(Rect::default, |window| Rect {
                left: f64::from(window.get_container_left()),
                top: f64::from(window.get_container_top()),
                width: f64::from(window.get_container_width()),
                height: f64::from(window.get_container_height()),
            })
    }

    fn place_handle(&mut self, left: f64, top: f64) {
        if let Some(window) = self.window.upgrade() {
            window.set_handle_left(left as f32);
            window.set_handle_top(top as f32);
        }
    }

    fn draw_cord(&mut self, path: &CordPath) {
        if let Some(window) = self.window.upgrade() {
            window.set_cord_path(path.to_string().into());
        }
    }
}
