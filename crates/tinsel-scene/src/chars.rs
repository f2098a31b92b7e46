//! Character constants for the cell rasterizer and overlays.

/// Upper half block: foreground paints the top pixel, background the bottom.
pub const UPPER_HALF: char = '▀';

/// Glyphs for the theme toggle button.
pub const MOON: char = '☾';
pub const SUN: char = '☀';
