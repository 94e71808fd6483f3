//! Site theme flag and its application
//!
//! The site has exactly two themes. The choice is persisted under
//! [`THEME_KEY`] and applied by setting a theme attribute on the page and
//! swapping every themed image to its theme-specific source.
//!
//! # Example Usage
//!
//! ```
//! use pullcord::theme::{Theme, ThemedImage};
//!
//! let theme = Theme::from_stored(Some("white"));
//! assert_eq!(theme.toggled(), Theme::Dark);
//!
//! let mut logo = ThemedImage::new("logo-dark.png", "logo-white.png");
//! assert!(logo.apply(theme));
//! assert_eq!(logo.src, "logo-white.png");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Preference key the theme is stored under
pub const THEME_KEY: &str = "kms-theme";

/// Two-valued site theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default dark theme
    #[default]
    Dark,
    /// Light theme
    White,
}

impl Theme {
    /// Interpret a stored value; anything other than `"white"` means dark
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("white") => Self::White,
            _ => Self::Dark,
        }
    }

    /// The other theme
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::White,
            Self::White => Self::Dark,
        }
    }

    /// Attribute / storage value
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::White => "white",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image whose source depends on the theme
///
/// `src` may be left out of a config file; it then starts on the dark source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredThemedImage")]
pub struct ThemedImage {
    /// Source currently displayed
    pub src: String,
    /// Source for the dark theme
    pub src_dark: String,
    /// Source for the white theme
    pub src_white: String,
}

#[derive(Deserialize)]
struct StoredThemedImage {
    #[serde(default)]
    src: String,
    src_dark: String,
    src_white: String,
}

impl From<StoredThemedImage> for ThemedImage {
    fn from(stored: StoredThemedImage) -> Self {
        let src = if stored.src.is_empty() {
            stored.src_dark.clone()
        } else {
            stored.src
        };
        Self {
            src,
            src_dark: stored.src_dark,
            src_white: stored.src_white,
        }
    }
}

impl ThemedImage {
    /// New image showing its dark source
    pub fn new(src_dark: impl Into<String>, src_white: impl Into<String>) -> Self {
        let src_dark = src_dark.into();
        Self {
            src: src_dark.clone(),
            src_dark,
            src_white: src_white.into(),
        }
    }

    /// Source for a theme
    pub fn source_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.src_dark,
            Theme::White => &self.src_white,
        }
    }

    /// Switch to the theme's source; returns whether the source changed
    ///
    /// Empty alternates are skipped so a half-configured image keeps showing
    /// whatever it had.
    pub fn apply(&mut self, theme: Theme) -> bool {
        let next = self.source_for(theme);
        if next.is_empty() || self.src == next {
            return false;
        }
        self.src = next.to_string();
        true
    }
}

/// Something a theme can be applied to (the page, a window)
pub trait ThemeTarget {
    /// Set the theme attribute on the root element
    fn set_theme_attribute(&mut self, theme: Theme);

    /// Images tagged with both alternate sources
    fn themed_images(&mut self) -> &mut [ThemedImage];

    /// Called for each image whose source changed
    fn image_source_changed(&mut self, _index: usize) {}
}

/// Apply a theme: set the attribute and swap dependent image sources
pub fn apply_theme<T: ThemeTarget + ?Sized>(target: &mut T, theme: Theme) {
    target.set_theme_attribute(theme);

    let changed: Vec<usize> = target
        .themed_images()
        .iter_mut()
        .enumerate()
        .filter_map(|(index, image)| image.apply(theme).then_some(index))
        .collect();

    debug!("Applied {} theme, {} image(s) swapped", theme, changed.len());
    for index in changed {
        target.image_source_changed(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakePage {
        attribute: Option<Theme>,
        images: Vec<ThemedImage>,
        reloaded: Vec<usize>,
    }

    impl ThemeTarget for FakePage {
        fn set_theme_attribute(&mut self, theme: Theme) {
            self.attribute = Some(theme);
        }

        fn themed_images(&mut self) -> &mut [ThemedImage] {
            &mut self.images
        }

        fn image_source_changed(&mut self, index: usize) {
            self.reloaded.push(index);
        }
    }

    #[test]
    fn test_from_stored() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("white")), Theme::White);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Dark);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled(), Theme::White);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_apply_theme_swaps_only_changed_images() {
        let mut page = FakePage {
            images: vec![
                ThemedImage::new("a-dark.png", "a-white.png"),
                ThemedImage::new("b.png", "b.png"),
            ],
            ..FakePage::default()
        };

        apply_theme(&mut page, Theme::White);

        assert_eq!(page.attribute, Some(Theme::White));
        assert_eq!(page.images[0].src, "a-white.png");
        assert_eq!(page.images[1].src, "b.png");
        assert_eq!(page.reloaded, vec![0]);
    }

    #[test]
    fn test_apply_same_theme_twice_is_quiet() {
        let mut page = FakePage {
            images: vec![ThemedImage::new("a-dark.png", "a-white.png")],
            ..FakePage::default()
        };
        apply_theme(&mut page, Theme::Dark);
        assert!(page.reloaded.is_empty());
    }

    #[test]
    fn test_empty_alternate_is_skipped() {
        let mut image = ThemedImage::new("a-dark.png", "");
        assert!(!image.apply(Theme::White));
        assert_eq!(image.src, "a-dark.png");
    }

    #[test]
    fn test_serialized_as_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::White).unwrap(), "\"white\"");
    }

    #[test]
    fn test_themed_image_without_current_source_starts_dark() {
        let image: ThemedImage =
            serde_json::from_str(r#"{"src_dark":"logo-d.png","src_white":"logo-w.png"}"#).unwrap();
        assert_eq!(image, ThemedImage::new("logo-d.png", "logo-w.png"));
    }

    #[test]
    fn test_themed_image_keeps_explicit_source() {
        let image: ThemedImage = serde_json::from_str(
            r#"{"src":"logo-w.png","src_dark":"logo-d.png","src_white":"logo-w.png"}"#,
        )
        .unwrap();
        assert_eq!(image.src, "logo-w.png");
    }
}
