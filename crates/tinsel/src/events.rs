//! Translation from crossterm events to scene input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tinsel_scene::InputEvent;

/// Pixels of simulated drag per arrow key press.
const ARROW_STEP: f32 = 20.0;

/// Wheel units per scroll notch or zoom key press.
const WHEEL_NOTCH: f32 = 100.0;

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SwitchScene,
    Reseed,
    Input(InputEvent),
}

/// Map a key press to an action.
pub fn key_action(key: KeyEvent) -> Option<Action> {
    let action = match (key.modifiers, key.code) {
        (_, KeyCode::Esc | KeyCode::Char('q'))
        | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => Action::Quit,
        (_, KeyCode::Char('t')) => Action::Input(InputEvent::ToggleTheme),
        (_, KeyCode::Char('s')) => Action::SwitchScene,
        (_, KeyCode::Char('r')) => Action::Reseed,
        (_, KeyCode::Char('+') | KeyCode::Char('=')) => Action::Input(InputEvent::Wheel {
            delta_y: -WHEEL_NOTCH,
        }),
        (_, KeyCode::Char('-')) => Action::Input(InputEvent::Wheel {
            delta_y: WHEEL_NOTCH,
        }),
        (_, KeyCode::Left) => drag(-ARROW_STEP, 0.0),
        (_, KeyCode::Right) => drag(ARROW_STEP, 0.0),
        (_, KeyCode::Up) => drag(0.0, -ARROW_STEP),
        (_, KeyCode::Down) => drag(0.0, ARROW_STEP),
        _ => return None,
    };
    Some(action)
}

fn drag(dx: f32, dy: f32) -> Action {
    Action::Input(InputEvent::DragBy { dx, dy })
}

/// Turns terminal mouse reports into pointer events in scene pixels.
///
/// A click is reported when the left button is released on the same cell it
/// was pressed on.
#[derive(Debug)]
pub struct MouseTracker {
    cell_width: f32,
    cell_height: f32,
    pressed_at: Option<(u16, u16)>,
}

impl MouseTracker {
    pub fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            pressed_at: None,
        }
    }

    /// Scene pixel at the centre of cell (`column`, `row`).
    pub fn to_scene(&self, column: u16, row: u16) -> (f32, f32) {
        (
            (column as f32 + 0.5) * self.cell_width,
            (row as f32 + 0.5) * self.cell_height,
        )
    }

    pub fn translate(&mut self, mouse: MouseEvent) -> Vec<InputEvent> {
        let (x, y) = self.to_scene(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed_at = Some((mouse.column, mouse.row));
                vec![InputEvent::PointerDown { x, y }]
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                vec![InputEvent::PointerMove { x, y }]
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let same_cell = self.pressed_at.take() == Some((mouse.column, mouse.row));
                let mut events = vec![InputEvent::PointerUp];
                if same_cell {
                    events.push(InputEvent::Click { x, y });
                }
                events
            }
            MouseEventKind::ScrollUp => vec![InputEvent::Wheel {
                delta_y: -WHEEL_NOTCH,
            }],
            MouseEventKind::ScrollDown => vec![InputEvent::Wheel {
                delta_y: WHEEL_NOTCH,
            }],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(key_action(key), Some(Action::Quit));
        }
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_zoom_keys_match_wheel() {
        let plus = key_action(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
        assert_eq!(
            plus,
            Some(Action::Input(InputEvent::Wheel { delta_y: -100.0 }))
        );
        let minus = key_action(KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE));
        assert_eq!(
            minus,
            Some(Action::Input(InputEvent::Wheel { delta_y: 100.0 }))
        );
    }

    #[test]
    fn test_arrows_drag() {
        let right = key_action(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(
            right,
            Some(Action::Input(InputEvent::DragBy { dx: 20.0, dy: 0.0 }))
        );
    }

    #[test]
    fn test_click_on_same_cell() {
        let mut tracker = MouseTracker::new(8.0, 16.0);
        tracker.translate(mouse(MouseEventKind::Down(MouseButton::Left), 3, 2));
        let events = tracker.translate(mouse(MouseEventKind::Up(MouseButton::Left), 3, 2));
        assert_eq!(
            events,
            vec![InputEvent::PointerUp, InputEvent::Click { x: 28.0, y: 40.0 }]
        );
    }

    #[test]
    fn test_drag_release_is_not_click() {
        let mut tracker = MouseTracker::new(8.0, 16.0);
        tracker.translate(mouse(MouseEventKind::Down(MouseButton::Left), 3, 2));
        tracker.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 6, 2));
        let events = tracker.translate(mouse(MouseEventKind::Up(MouseButton::Left), 6, 2));
        assert_eq!(events, vec![InputEvent::PointerUp]);
    }

    #[test]
    fn test_scroll_maps_to_wheel() {
        let mut tracker = MouseTracker::new(8.0, 16.0);
        assert_eq!(
            tracker.translate(mouse(MouseEventKind::ScrollDown, 0, 0)),
            vec![InputEvent::Wheel { delta_y: 100.0 }]
        );
    }
}
