//! Pointer, wheel and touch handling.
//!
//! The host translates its native events into [`InputEvent`]s in scene pixel
//! coordinates; [`InputHandler`] turns them into view changes, theme toggles
//! and revealed messages.

use std::time::Duration;

use glam::Vec2;
use tinsel_core::Theme;

use crate::assets::AssetStore;
use crate::scene::Scene;

/// Radians of rotation per pixel dragged.
pub const DRAG_SENSITIVITY: f32 = 0.005;

/// Zoom change per wheel unit; scrolling down zooms out.
pub const WHEEL_SENSITIVITY: f32 = -0.001;

/// Pinches that start with fingers closer than this are re-baselined on the
/// next move instead of being divided by.
const MIN_PINCH_DISTANCE: f32 = 1.0;

/// A host-independent input event, in scene pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Click { x: f32, y: f32 },
    Wheel { delta_y: f32 },
    TouchStart { touches: Vec<Vec2> },
    TouchMove { touches: Vec<Vec2> },
    TouchEnd,
    /// Rotate as if dragged by this many pixels.
    DragBy { dx: f32, dy: f32 },
    ToggleTheme,
}

/// What an event changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    Ignored,
    CursorMoved,
    Rotated,
    Zoomed,
    ThemeToggled(Theme),
    MessageShown,
}

/// The clickable theme toggle, in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleControl {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ToggleControl {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    start_distance: f32,
    start_zoom: f32,
}

/// Tracks drag and pinch gestures across events.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last pointer or single-touch position while a drag is in progress.
    drag_from: Option<Vec2>,
    pinch: Option<Pinch>,
    toggle: Option<ToggleControl>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place (or remove) the theme toggle control.
    pub fn set_toggle(&mut self, toggle: Option<ToggleControl>) {
        self.toggle = toggle;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Apply one event. `now` is the clock reading used to time messages.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        scene: &mut Scene,
        assets: &AssetStore,
        now: Duration,
    ) -> Reaction {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.drag_from = Some(Vec2::new(*x, *y));
                move_cursor(scene, *x, *y)
            }
            InputEvent::PointerMove { x, y } => {
                let at = Vec2::new(*x, *y);
                match self.drag_to(at) {
                    Some(delta) => {
                        move_cursor(scene, *x, *y);
                        rotate(scene, delta)
                    }
                    None => move_cursor(scene, *x, *y),
                }
            }
            InputEvent::PointerUp => {
                self.drag_from = None;
                Reaction::Ignored
            }
            InputEvent::Click { x, y } => self.click(*x, *y, scene, assets, now),
            InputEvent::Wheel { delta_y } => {
                scene.view_mut().zoom_by(delta_y * WHEEL_SENSITIVITY);
                Reaction::Zoomed
            }
            InputEvent::TouchStart { touches } => self.touch_start(touches, scene),
            InputEvent::TouchMove { touches } => self.touch_move(touches, scene),
            InputEvent::TouchEnd => {
                self.drag_from = None;
                self.pinch = None;
                Reaction::Ignored
            }
            InputEvent::DragBy { dx, dy } => rotate(scene, Vec2::new(*dx, *dy)),
            InputEvent::ToggleTheme => Reaction::ThemeToggled(scene.view_mut().toggle_theme()),
        }
    }

    fn click(
        &mut self,
        x: f32,
        y: f32,
        scene: &mut Scene,
        assets: &AssetStore,
        now: Duration,
    ) -> Reaction {
        if self.toggle.is_some_and(|t| t.contains(x, y)) {
            return Reaction::ThemeToggled(scene.view_mut().toggle_theme());
        }
        let Some(message) = scene.hit_test(x, y, assets).map(|p| p.message.clone()) else {
            return Reaction::Ignored;
        };
        log::debug!("photo hit at ({x:.0}, {y:.0})");
        scene.show_message(message, now);
        Reaction::MessageShown
    }

    fn touch_start(&mut self, touches: &[Vec2], scene: &mut Scene) -> Reaction {
        match touches {
            [one] => {
                self.drag_from = Some(*one);
                self.pinch = None;
                Reaction::Ignored
            }
            [a, b, ..] => {
                self.drag_from = None;
                self.pinch = Some(Pinch {
                    start_distance: a.distance(*b),
                    start_zoom: scene.view().zoom(),
                });
                Reaction::Ignored
            }
            [] => Reaction::Ignored,
        }
    }

    fn touch_move(&mut self, touches: &[Vec2], scene: &mut Scene) -> Reaction {
        match touches {
            [one] => match self.drag_to(*one) {
                Some(delta) => rotate(scene, delta),
                None => Reaction::Ignored,
            },
            [a, b, ..] => {
                let distance = a.distance(*b);
                let zoom = scene.view().zoom();
                let pinch = self.pinch.get_or_insert(Pinch {
                    start_distance: distance,
                    start_zoom: zoom,
                });
                if pinch.start_distance < MIN_PINCH_DISTANCE {
                    *pinch = Pinch {
                        start_distance: distance,
                        start_zoom: zoom,
                    };
                    return Reaction::Ignored;
                }
                scene
                    .view_mut()
                    .set_zoom(pinch.start_zoom * distance / pinch.start_distance);
                Reaction::Zoomed
            }
            [] => Reaction::Ignored,
        }
    }

    /// Advance an in-progress drag to `at`, returning the movement.
    fn drag_to(&mut self, at: Vec2) -> Option<Vec2> {
        let from = self.drag_from.replace(at)?;
        Some(at - from)
    }
}

fn move_cursor(scene: &mut Scene, x: f32, y: f32) -> Reaction {
    let view = scene.view_mut();
    view.cursor_x = x;
    view.cursor_y = y;
    Reaction::CursorMoved
}

fn rotate(scene: &mut Scene, delta: Vec2) -> Reaction {
    scene
        .view_mut()
        .rotate_by(delta.y * DRAG_SENSITIVITY, delta.x * DRAG_SENSITIVITY);
    Reaction::Rotated
}

#[cfg(test)]
mod tests {
    use tinsel_core::{Rgb, SceneKind, ZOOM_MAX, ZOOM_MIN};

    use super::*;
    use crate::assets::Bitmap;
    use crate::entities::{Entity, Viewport};
    use crate::scene::SceneSettings;

    const NOW: Duration = Duration::from_secs(1);

    fn scene(photos: usize) -> Scene {
        let settings = SceneSettings {
            particles: 0,
            drift_messages: (1..=photos).map(|n| format!("photo {n}")).collect(),
            ..SceneSettings::default()
        };
        Scene::new(
            SceneKind::Drift,
            settings,
            Viewport::new(800.0, 600.0),
            Theme::Dark,
            1,
        )
    }

    fn loaded(count: usize) -> AssetStore {
        let store = AssetStore::new(count);
        for slot in 0..count {
            store.insert(slot, Bitmap::solid(4, 4, Rgb::WHITE).unwrap());
        }
        store
    }

    #[test]
    fn test_drag_rotates() {
        let mut scene = scene(0);
        let assets = AssetStore::default();
        let mut input = InputHandler::new();
        input.handle(&InputEvent::PointerDown { x: 100.0, y: 100.0 }, &mut scene, &assets, NOW);
        let reaction =
            input.handle(&InputEvent::PointerMove { x: 120.0, y: 90.0 }, &mut scene, &assets, NOW);
        assert_eq!(reaction, Reaction::Rotated);
        assert!((scene.view().rotate_y - 0.1).abs() < 1e-6);
        assert!((scene.view().rotate_x + 0.05).abs() < 1e-6);

        input.handle(&InputEvent::PointerUp, &mut scene, &assets, NOW);
        let reaction =
            input.handle(&InputEvent::PointerMove { x: 500.0, y: 500.0 }, &mut scene, &assets, NOW);
        assert_eq!(reaction, Reaction::CursorMoved);
        assert!((scene.view().rotate_y - 0.1).abs() < 1e-6);
        assert_eq!(scene.view().cursor_x, 500.0);
    }

    #[test]
    fn test_wheel_zoom_stays_in_bounds() {
        let mut scene = scene(0);
        let assets = AssetStore::default();
        let mut input = InputHandler::new();
        input.handle(&InputEvent::Wheel { delta_y: -100.0 }, &mut scene, &assets, NOW);
        assert!((scene.view().zoom() - 1.1).abs() < 1e-6);
        for _ in 0..100 {
            input.handle(&InputEvent::Wheel { delta_y: -500.0 }, &mut scene, &assets, NOW);
            assert!(scene.view().zoom() <= ZOOM_MAX);
        }
        for _ in 0..100 {
            input.handle(&InputEvent::Wheel { delta_y: 500.0 }, &mut scene, &assets, NOW);
            assert!(scene.view().zoom() >= ZOOM_MIN);
        }
        assert_eq!(scene.view().zoom(), ZOOM_MIN);
    }

    #[test]
    fn test_pinch_scales_from_start_zoom() {
        let mut scene = scene(0);
        let assets = AssetStore::default();
        let mut input = InputHandler::new();
        let start = vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)];
        let wider = vec![Vec2::new(0.0, 0.0), Vec2::new(150.0, 0.0)];
        input.handle(&InputEvent::TouchStart { touches: start }, &mut scene, &assets, NOW);
        input.handle(&InputEvent::TouchMove { touches: wider }, &mut scene, &assets, NOW);
        assert!((scene.view().zoom() - 1.5).abs() < 1e-6);

        let huge = vec![Vec2::new(0.0, 0.0), Vec2::new(10_000.0, 0.0)];
        input.handle(&InputEvent::TouchMove { touches: huge }, &mut scene, &assets, NOW);
        assert_eq!(scene.view().zoom(), ZOOM_MAX);
    }

    #[test]
    fn test_zero_distance_pinch_is_rebaselined() {
        let mut scene = scene(0);
        let assets = AssetStore::default();
        let mut input = InputHandler::new();
        let same = vec![Vec2::new(50.0, 50.0), Vec2::new(50.0, 50.0)];
        input.handle(&InputEvent::TouchStart { touches: same }, &mut scene, &assets, NOW);

        let apart = vec![Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0)];
        let reaction =
            input.handle(&InputEvent::TouchMove { touches: apart }, &mut scene, &assets, NOW);
        assert_eq!(reaction, Reaction::Ignored);
        assert_eq!(scene.view().zoom(), 1.0);

        let wider = vec![Vec2::new(0.0, 0.0), Vec2::new(80.0, 0.0)];
        input.handle(&InputEvent::TouchMove { touches: wider }, &mut scene, &assets, NOW);
        assert!((scene.view().zoom() - 2.0).abs() < 1e-6);
        assert!(scene.view().zoom().is_finite());
    }

    #[test]
    fn test_single_touch_drags() {
        let mut scene = scene(0);
        let assets = AssetStore::default();
        let mut input = InputHandler::new();
        let down = vec![Vec2::new(10.0, 10.0)];
        let moved = vec![Vec2::new(30.0, 10.0)];
        input.handle(&InputEvent::TouchStart { touches: down }, &mut scene, &assets, NOW);
        input.handle(&InputEvent::TouchMove { touches: moved }, &mut scene, &assets, NOW);
        assert!((scene.view().rotate_y - 0.1).abs() < 1e-6);
        input.handle(&InputEvent::TouchEnd, &mut scene, &assets, NOW);
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_click_shows_exactly_one_message() {
        let mut scene = scene(3);
        let assets = loaded(3);
        let mut input = InputHandler::new();
        let target = scene
            .entities()
            .iter()
            .find_map(Entity::as_photo)
            .cloned()
            .unwrap();
        // Move the cursor onto the photo so it is drawn without parallax.
        let (x, y) = (target.position.x, target.position.y);
        input.handle(&InputEvent::PointerMove { x, y }, &mut scene, &assets, NOW);

        let reaction = input.handle(&InputEvent::Click { x, y }, &mut scene, &assets, NOW);
        assert_eq!(reaction, Reaction::MessageShown);
        let expected = scene.hit_test(x, y, &assets).unwrap().message.clone();
        assert_eq!(scene.message(NOW), Some(expected.as_str()));
    }

    #[test]
    fn test_click_outside_shows_nothing() {
        let mut scene = scene(0);
        let assets = AssetStore::default();
        let mut input = InputHandler::new();
        let reaction =
            input.handle(&InputEvent::Click { x: 10.0, y: 10.0 }, &mut scene, &assets, NOW);
        assert_eq!(reaction, Reaction::Ignored);
        assert_eq!(scene.message(NOW), None);
    }

    #[test]
    fn test_toggle_control_alternates_theme() {
        let mut scene = scene(0);
        let assets = AssetStore::default();
        let mut input = InputHandler::new();
        input.set_toggle(Some(ToggleControl {
            x: 700.0,
            y: 0.0,
            width: 100.0,
            height: 32.0,
        }));
        let click = InputEvent::Click { x: 750.0, y: 10.0 };
        let themes: Vec<Reaction> = (0..3)
            .map(|_| input.handle(&click, &mut scene, &assets, NOW))
            .collect();
        assert_eq!(
            themes,
            [
                Reaction::ThemeToggled(Theme::Light),
                Reaction::ThemeToggled(Theme::Dark),
                Reaction::ThemeToggled(Theme::Light),
            ]
        );
    }

    #[test]
    fn test_toggle_control_bounds() {
        let control = ToggleControl {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 10.0,
        };
        assert!(control.contains(10.0, 10.0));
        assert!(control.contains(29.9, 19.9));
        assert!(!control.contains(30.0, 15.0));
        assert!(!control.contains(15.0, 9.9));
    }
}
