//! Frame layout: the scene, the theme toggle, the help line and the message box.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Clear, Paragraph, Wrap},
};
use tinsel_config::CellSize;
use tinsel_core::Theme;
use tinsel_scene::{AssetStore, CellCanvas, MOON, SUN, Scene, ToggleControl, accent, to_color};

/// Widest the message box grows, in cells.
const MESSAGE_MAX_WIDTH: u16 = 48;

/// Draw everything and return where the theme toggle ended up.
pub fn render(
    frame: &mut Frame,
    scene: &Scene,
    assets: &AssetStore,
    cell: &CellSize,
    now: Duration,
) -> ToggleControl {
    let area = frame.area();
    let theme = scene.view().theme;
    let color = to_color(accent(theme));

    let mut canvas = CellCanvas::new(
        area.width,
        area.height,
        cell.width,
        cell.height,
        scene.background(),
    );
    scene.render(&mut canvas, assets);
    frame.render_widget(Paragraph::new(canvas.to_lines()), area);

    // Toggle button
    let button = toggle_label(theme).fg(color).bold();
    let button_area = toggle_area(area, button.width() as u16);
    frame.render_widget(button, button_area);

    // Help text
    if area.height > 1 {
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "t".bold().fg(color),
            " theme  ".dark_gray(),
            "s".bold().fg(color),
            " scene  ".dark_gray(),
            "r".bold().fg(color),
            " reseed  ".dark_gray(),
            "+/-".bold().fg(color),
            " zoom".dark_gray(),
        ])
        .centered();
        let help_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        frame.render_widget(help, help_area);
    }

    if let Some(text) = scene.message(now) {
        let box_area = message_area(area, text);
        let message = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(color))
            .block(Block::bordered().border_style(Style::new().fg(color)));
        frame.render_widget(Clear, box_area);
        frame.render_widget(message, box_area);
    }

    ToggleControl {
        x: button_area.x as f32 * cell.width,
        y: button_area.y as f32 * cell.height,
        width: button_area.width as f32 * cell.width,
        height: button_area.height as f32 * cell.height,
    }
}

fn toggle_label(theme: Theme) -> Line<'static> {
    let glyph = match theme {
        Theme::Dark => MOON,
        Theme::Light => SUN,
    };
    Line::from(format!(" {glyph} {} ", theme.label()))
}

/// Top-right corner, one cell in from the edge.
fn toggle_area(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.right().saturating_sub(width + 1).max(area.x);
    Rect::new(x, area.y, width, area.height.min(1))
}

/// Centered box sized to the message: borders plus one cell of padding.
fn message_area(area: Rect, text: &str) -> Rect {
    let inner = MESSAGE_MAX_WIDTH.min(area.width.saturating_sub(4));
    let text_width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let width = (text_width.min(inner) + 4).min(area.width);
    let lines = text_width.div_ceil(inner.max(1)).max(1);
    let height = lines.saturating_add(2).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
