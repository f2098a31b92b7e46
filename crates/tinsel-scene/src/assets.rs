//! Photo loading.
//!
//! Photos are decoded on a background thread and published into an
//! [`AssetStore`] slot by slot. Rendering never waits: a photo whose slot is
//! still empty (or whose file failed to load) is simply not drawn.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};

use tinsel_core::Rgb;

/// Longest side, in pixels, of a decoded photo thumbnail.
pub const THUMBNAIL_SIDE: u32 = 64;

/// A small decoded RGB image.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Bitmap {
    /// Build a bitmap from row-major pixels. Returns `None` if the pixel count
    /// does not match the dimensions or the bitmap would be empty.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A bitmap filled with one colour.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Option<Self> {
        Self::new(width, height, vec![color; (width * height) as usize])
    }

    /// Nearest-neighbour sample at normalized coordinates (0.0-1.0).
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Decode an image file into a thumbnail no larger than `max_side`.
    pub fn open(path: &Path, max_side: u32) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.thumbnail(max_side, max_side).to_rgb8();
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Rgb(p[0], p[1], p[2])).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Shared, slot-indexed photo storage.
///
/// Cloning the store clones the handle, not the photos.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    slots: Arc<RwLock<Vec<Option<Arc<Bitmap>>>>>,
}

impl AssetStore {
    /// Create a store with `count` empty slots.
    pub fn new(count: usize) -> Self {
        Self {
            slots: Arc::new(RwLock::new(vec![None; count])),
        }
    }

    /// Get the photo in `slot` if it has finished loading.
    ///
    /// Uses `try_read` so a frame never blocks on the loader; contention reads
    /// as "not loaded yet".
    pub fn get(&self, slot: usize) -> Option<Arc<Bitmap>> {
        self.slots
            .try_read()
            .ok()
            .and_then(|slots| slots.get(slot).cloned().flatten())
    }

    pub fn is_loaded(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Publish a decoded photo. Out-of-range slots are ignored.
    pub fn insert(&self, slot: usize, bitmap: Bitmap) {
        if let Ok(mut slots) = self.slots.write()
            && let Some(entry) = slots.get_mut(slot)
        {
            *entry = Some(Arc::new(bitmap));
        }
    }

}

/// Start decoding `files` into `store` on a background thread.
///
/// Slot `i` receives `files[i]`. Failures are logged and leave the slot empty.
pub fn spawn_loader(files: Vec<PathBuf>, store: AssetStore) -> JoinHandle<()> {
    thread::spawn(move || {
        let total = files.len();
        let mut loaded = 0;
        for (slot, path) in files.iter().enumerate() {
            match Bitmap::open(path, THUMBNAIL_SIDE) {
                Ok(bitmap) => {
                    store.insert(slot, bitmap);
                    loaded += 1;
                }
                Err(e) => log::warn!("could not load photo {}: {e}", path.display()),
            }
        }
        log::info!("loaded {loaded} of {total} photos");
    })
}
