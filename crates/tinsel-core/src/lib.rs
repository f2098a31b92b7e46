//! Core types shared by the tinsel crates.
//!
//! Everything here is plain data: the theme and scene selectors that the
//! config file and the command line speak in, and the [`ViewState`] that input
//! handling writes and every draw call reads.

use serde::{Deserialize, Serialize};

/// Smallest zoom factor the view accepts.
pub const ZOOM_MIN: f32 = 0.3;

/// Largest zoom factor the view accepts.
pub const ZOOM_MAX: f32 = 2.5;

/// An opaque RGB colour.
///
/// Serialized as a `#rrggbb` string so config files stay readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Blend `self` over `base` with the given opacity (0.0-1.0).
    pub fn over(self, base: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| {
            (bottom as f32 + (top as f32 - bottom as f32) * a).round() as u8
        };
        Rgb(mix(self.0, base.0), mix(self.1, base.1), mix(self.2, base.2))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour `{raw}`, expected #rrggbb")))
    }
}

/// Colour theme for the scenes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Flip between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Short label used by the toggle control.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Which of the two scenes is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Rising particles and photos with cursor parallax.
    #[default]
    Drift,
    /// Photos and captions falling through a rotatable 3D volume.
    Orbit,
}

impl SceneKind {
    /// Switch to the other scene.
    pub fn next(self) -> Self {
        match self {
            SceneKind::Drift => SceneKind::Orbit,
            SceneKind::Orbit => SceneKind::Drift,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Drift => "drift",
            SceneKind::Orbit => "orbit",
        }
    }
}

/// Shared view state: cursor, rotation, zoom and theme.
///
/// Written only by input handling, read by every entity's draw step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Cursor x position in scene pixels.
    pub cursor_x: f32,
    /// Cursor y position in scene pixels.
    pub cursor_y: f32,
    /// Rotation around the X axis in radians.
    pub rotate_x: f32,
    /// Rotation around the Y axis in radians.
    pub rotate_y: f32,
    /// Current theme.
    pub theme: Theme,
    /// Zoom factor, always within [`ZOOM_MIN`, `ZOOM_MAX`].
    zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            cursor_x: 0.0,
            cursor_y: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            theme: Theme::default(),
            zoom: 1.0,
        }
    }
}

impl ViewState {
    /// Create a view with the cursor resting at the centre of a viewport.
    pub fn centered(width: f32, height: f32, theme: Theme) -> Self {
        Self {
            cursor_x: width / 2.0,
            cursor_y: height / 2.0,
            theme,
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped into range. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    /// Add to the zoom factor, clamped into range.
    pub fn zoom_by(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    /// Rotate the view by the given angles in radians.
    pub fn rotate_by(&mut self, around_x: f32, around_y: f32) {
        self.rotate_x += around_x;
        self.rotate_y += around_y;
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_alternates() {
        let mut theme = Theme::Dark;
        let mut seen = Vec::new();
        for _ in 0..4 {
            theme = theme.toggle();
            seen.push(theme);
        }
        assert_eq!(seen, [Theme::Light, Theme::Dark, Theme::Light, Theme::Dark]);
    }

    #[test]
    fn test_scene_kind_next() {
        assert_eq!(SceneKind::Drift.next(), SceneKind::Orbit);
        assert_eq!(SceneKind::Orbit.next(), SceneKind::Drift);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = ViewState::default();
        view.set_zoom(10.0);
        assert_eq!(view.zoom(), ZOOM_MAX);
        view.zoom_by(-100.0);
        assert_eq!(view.zoom(), ZOOM_MIN);
    }

    #[test]
    fn test_zoom_ignores_non_finite() {
        let mut view = ViewState::default();
        view.set_zoom(1.5);
        view.set_zoom(f32::INFINITY);
        view.set_zoom(f32::NAN);
        assert_eq!(view.zoom(), 1.5);
    }

    #[test]
    fn test_centered_cursor() {
        let view = ViewState::centered(800.0, 600.0, Theme::Light);
        assert_eq!(view.cursor_x, 400.0);
        assert_eq!(view.cursor_y, 300.0);
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(view.zoom(), 1.0);
    }

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#ff69b4"), Some(Rgb(255, 105, 180)));
        assert_eq!(Rgb::from_hex("00bfff"), Some(Rgb(0, 191, 255)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb(139, 69, 19).to_hex(), "#8b4513");
    }

    #[test]
    fn test_rgb_over_blends_by_alpha() {
        let top = Rgb(200, 100, 0);
        assert_eq!(top.over(Rgb::BLACK, 1.0), top);
        assert_eq!(top.over(Rgb::BLACK, 0.0), Rgb::BLACK);
        assert_eq!(top.over(Rgb::BLACK, 0.5), Rgb(100, 50, 0));
    }
}
