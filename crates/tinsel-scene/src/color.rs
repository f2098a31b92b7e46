//! Scene palette and colour conversion.

use ratatui::style::Color;
use tinsel_core::{Rgb, SceneKind, Theme};

pub const GOLD: Rgb = Rgb(255, 215, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const PETAL: Rgb = Rgb(255, 215, 0);
pub const SADDLE_BROWN: Rgb = Rgb(139, 69, 19);
pub const STAR_WHITE: Rgb = Rgb::WHITE;

/// Background colour a scene is cleared to each frame.
pub fn background(kind: SceneKind, theme: Theme) -> Rgb {
    match (kind, theme) {
        (SceneKind::Drift, Theme::Dark) => Rgb(12, 10, 30),
        (SceneKind::Drift, Theme::Light) => Rgb(255, 240, 245),
        (SceneKind::Orbit, Theme::Dark) => Rgb(0, 0, 0),
        (SceneKind::Orbit, Theme::Light) => Rgb(20, 24, 48),
    }
}

/// Accent colour for overlays (message box, toggle button, help line).
pub fn accent(theme: Theme) -> Rgb {
    match theme {
        Theme::Dark => Rgb(255, 182, 193),
        Theme::Light => Rgb(199, 21, 133),
    }
}

/// Convert to a ratatui colour.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_backgrounds_differ_by_theme() {
        for kind in [SceneKind::Drift, SceneKind::Orbit] {
            assert_ne!(background(kind, Theme::Dark), background(kind, Theme::Light));
        }
    }
}
