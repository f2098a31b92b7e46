//! Animated scenes for tinsel.
//!
//! This crate holds everything between input events and terminal cells: the
//! entity pool and its per-frame update, the 3D projector used by the orbit
//! scene, a [`Canvas`] abstraction with a half-block rasterizer behind it, the
//! background photo loader and the frame scheduler.

mod assets;
mod canvas;
mod chars;
mod clock;
mod color;
mod entities;
mod input;
mod projector;
mod raster;
mod scene;
mod shapes;

pub use assets::{AssetStore, Bitmap, THUMBNAIL_SIDE, spawn_loader};
pub use canvas::{Canvas, DrawState, StateStack};
pub use chars::{MOON, SUN};
pub use clock::{Clock, FrameScheduler, ManualClock, SystemClock};
pub use color::{accent, background, to_color};
pub use entities::{
    Caption, Draw, DrawContext, Entity, Particle, ParticleVariant, Photo, Placement, Star,
    Viewport,
};
pub use input::{InputEvent, InputHandler, Reaction, ToggleControl};
pub use projector::{DEFAULT_CENTER_Z, Projection, Projector};
pub use raster::CellCanvas;
pub use scene::{Scene, SceneSettings, time_seed};
pub use shapes::Shape;
