//! Scene state: the entity pool, the view and the transient message.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tinsel_core::{Rgb, SceneKind, Theme, ViewState};

use crate::assets::AssetStore;
use crate::canvas::Canvas;
use crate::color;
use crate::entities::{Caption, DrawContext, Entity, Particle, Photo, Star, Viewport};
use crate::projector::{DEFAULT_CENTER_Z, Projector};

/// Pool sizes, captions and photo messages used when seeding a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Rising particles in the drift scene.
    pub particles: usize,
    /// Background stars in the orbit scene.
    pub stars: usize,
    /// Orbit slots that may hold a photo.
    pub sprite_slots: usize,
    /// Chance that an orbit slot holds a photo.
    pub photo_chance: f64,
    /// Falling captions in the orbit scene.
    pub captions: usize,
    /// Distance from the eye to the projection plane.
    pub center_z: f32,
    pub caption_text: String,
    /// Each caption picks one of these at random.
    pub caption_colors: Vec<Rgb>,
    /// Message per asset slot shown in the drift scene.
    pub drift_messages: Vec<String>,
    /// Message per asset slot shown in the orbit scene.
    pub orbit_messages: Vec<String>,
    /// How long a revealed message stays up.
    pub message_duration: Duration,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            particles: 160,
            stars: 150,
            sprite_slots: 50,
            photo_chance: 0.6,
            captions: 25,
            center_z: DEFAULT_CENTER_Z,
            caption_text: "Thành công nhé!\n♥ 2025 ♥".to_string(),
            caption_colors: vec![Rgb(255, 105, 180), Rgb(0, 191, 255)],
            drift_messages: Vec::new(),
            orbit_messages: Vec::new(),
            message_duration: Duration::from_millis(4000),
        }
    }
}

impl SceneSettings {
    /// `photo_chance` forced into `[0, 1]`; NaN counts as never.
    fn photo_chance_clamped(&self) -> f64 {
        if self.photo_chance.is_nan() {
            0.0
        } else {
            self.photo_chance.clamp(0.0, 1.0)
        }
    }

    fn messages(&self, kind: SceneKind) -> &[String] {
        match kind {
            SceneKind::Drift => &self.drift_messages,
            SceneKind::Orbit => &self.orbit_messages,
        }
    }
}

/// A message revealed by clicking a photo.
#[derive(Debug, Clone, PartialEq)]
struct Message {
    text: String,
    /// Clock reading at which the message disappears.
    until: Duration,
}

/// One running scene.
#[derive(Debug)]
pub struct Scene {
    kind: SceneKind,
    settings: SceneSettings,
    viewport: Viewport,
    view: ViewState,
    entities: Vec<Entity>,
    rng: StdRng,
    message: Option<Message>,
}

impl Scene {
    /// Seed a scene of `kind` filling `viewport`.
    pub fn new(
        kind: SceneKind,
        settings: SceneSettings,
        viewport: Viewport,
        theme: Theme,
        seed: u64,
    ) -> Self {
        let mut scene = Self {
            kind,
            settings,
            viewport,
            view: ViewState::centered(viewport.width, viewport.height, theme),
            entities: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            message: None,
        };
        scene.populate();
        scene
    }

    /// Rebuild the entity pool from a fresh seed. The view is kept.
    pub fn reseed(&mut self, seed: u64) {
        log::info!("reseeding {} scene with {seed}", self.kind.label());
        self.rng = StdRng::seed_from_u64(seed);
        self.populate();
    }

    /// Replace the pool with the other scene's entities.
    pub fn switch(&mut self, kind: SceneKind) {
        if kind == self.kind {
            return;
        }
        log::info!("switching to {} scene", kind.label());
        self.kind = kind;
        self.message = None;
        self.populate();
    }

    /// Follow a new surface size. Entities are kept; they settle into the new
    /// bounds as they wrap.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::debug!("resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    /// Advance every entity by one frame.
    pub fn tick(&mut self) {
        for entity in &mut self.entities {
            entity.update(self.viewport, &mut self.rng);
        }
    }

    /// Paint every entity in pool order.
    pub fn render(&self, canvas: &mut dyn Canvas, assets: &AssetStore) {
        let ctx = self.draw_context(assets);
        for entity in &self.entities {
            entity.draw(canvas, &ctx);
        }
    }

    /// First photo, in pool order, under the point `(x, y)`.
    pub fn hit_test(&self, x: f32, y: f32, assets: &AssetStore) -> Option<&Photo> {
        let ctx = self.draw_context(assets);
        self.entities
            .iter()
            .filter_map(Entity::as_photo)
            .find(|photo| photo.hit(x, y, &ctx))
    }

    /// Show `text` until `message_duration` after `now`.
    pub fn show_message(&mut self, text: impl Into<String>, now: Duration) {
        self.message = Some(Message {
            text: text.into(),
            until: now + self.settings.message_duration,
        });
    }

    /// The message visible at `now`, if any.
    pub fn message(&self, now: Duration) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|m| now < m.until)
            .map(|m| m.text.as_str())
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn projector(&self) -> Projector {
        Projector::new(
            self.settings.center_z,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Fill colour behind the entities.
    pub fn background(&self) -> Rgb {
        color::background(self.kind, self.view.theme)
    }

    fn draw_context<'a>(&'a self, assets: &'a AssetStore) -> DrawContext<'a> {
        DrawContext {
            view: &self.view,
            projector: self.projector(),
            assets,
        }
    }

    fn populate(&mut self) {
        let viewport = self.viewport;
        let rng = &mut self.rng;
        let settings = &self.settings;
        let messages = settings.messages(self.kind);

        self.entities = match self.kind {
            SceneKind::Drift => {
                let mut entities: Vec<Entity> = (0..settings.particles)
                    .map(|_| Entity::Particle(Particle::spawn(viewport, rng)))
                    .collect();
                for (asset, message) in messages.iter().enumerate() {
                    let photo = Photo::drift(asset, message.clone(), viewport, rng);
                    entities.push(Entity::Photo(photo));
                }
                entities
            }
            SceneKind::Orbit => {
                let mut entities: Vec<Entity> = (0..settings.stars)
                    .map(|_| Entity::Star(Star::spawn(viewport, rng)))
                    .collect();
                let chance = settings.photo_chance_clamped();
                for _ in 0..settings.sprite_slots {
                    if messages.is_empty() || !rng.gen_bool(chance) {
                        continue;
                    }
                    let asset = rng.gen_range(0..messages.len());
                    let photo = Photo::orbit(asset, messages[asset].clone(), viewport, rng);
                    entities.push(Entity::Photo(photo));
                }
                for _ in 0..settings.captions {
                    let color = if settings.caption_colors.is_empty() {
                        Rgb::WHITE
                    } else {
                        settings.caption_colors[rng.gen_range(0..settings.caption_colors.len())]
                    };
                    let caption =
                        Caption::spawn(settings.caption_text.clone(), color, viewport, rng);
                    entities.push(Entity::Caption(caption));
                }
                entities
            }
        };
        log::debug!(
            "populated {} scene with {} entities",
            self.kind.label(),
            self.entities.len()
        );
    }
}

/// Seed derived from the system time, for runs without a configured seed.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
