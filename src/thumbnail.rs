//! Animated previews of serialized patterns
//!
//! A thumbnail is a looping GIF, one pixel high and one pixel per LED wide,
//! sampled from the pattern at a fixed rate. Rendering is a pure function of
//! the pattern bytes, so results are memoized by those bytes forever.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use embassy_time::Instant;
use image::{
    Delay, Frame as GifFrame, Rgba, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};
use parking_lot::Mutex;

use crate::{
    color::BLACK,
    config::ThumbnailConfig,
    encoding::PatternRegistry,
    error::{ComposerError, ComposerResult},
    frame::Frame,
    pattern::PatternSlot,
};

/// Rendered preview and the parameters it was rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub gif: Vec<u8>,
    pub config: ThumbnailConfig,
}

type Slot = Arc<Mutex<Option<Arc<Thumbnail>>>>;

/// Memoizing thumbnail renderer
///
/// Patterns are validated against the configured strip before rendering.
/// Concurrent requests for the same bytes wait for a single render. Failed
/// requests leave nothing behind, so a later request retries.
pub struct ThumbnailCache {
    registry: Arc<PatternRegistry>,
    config: ThumbnailConfig,
    entries: Mutex<HashMap<Vec<u8>, Slot>>,
    renders: AtomicUsize,
}

impl ThumbnailCache {
    pub fn new(registry: Arc<PatternRegistry>, config: ThumbnailConfig) -> Self {
        Self {
            registry,
            config,
            entries: Mutex::new(HashMap::new()),
            renders: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Number of keys held, including renders in flight
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful renders since creation
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::Relaxed)
    }

    /// Return the thumbnail of a serialized pattern, rendering it on a miss
    pub fn get_or_render(&self, bytes: &[u8]) -> ComposerResult<Arc<Thumbnail>> {
        let slot = {
            let mut entries = self.entries.lock();
            Arc::clone(entries.entry(bytes.to_vec()).or_default())
        };

        let mut cached = slot.lock();
        if let Some(thumbnail) = cached.as_ref() {
            tracing::debug!(len = bytes.len(), "thumbnail cache hit");
            return Ok(Arc::clone(thumbnail));
        }
        tracing::debug!(len = bytes.len(), "thumbnail cache miss");

        match self.render(bytes) {
            Ok(thumbnail) => {
                let thumbnail = Arc::new(thumbnail);
                *cached = Some(Arc::clone(&thumbnail));
                Ok(thumbnail)
            }
            Err(err) => {
                drop(cached);
                self.forget(bytes, &slot);
                Err(err)
            }
        }
    }

    /// Drop the entry for `bytes` unless another request filled or holds it
    fn forget(&self, bytes: &[u8], slot: &Slot) {
        let mut entries = self.entries.lock();
        let Some(current) = entries.get(bytes) else {
            return;
        };
        let unused = Arc::ptr_eq(current, slot)
            && current.try_lock().is_some_and(|thumbnail| thumbnail.is_none());
        if unused {
            entries.remove(bytes);
        }
    }

    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    fn render(&self, bytes: &[u8]) -> ComposerResult<Thumbnail> {
        let mut pattern = self.registry.decode(bytes)?;
        pattern.validate(self.config.num_leds)?;
        let gif = render_gif(&mut pattern, &self.config)?;
        self.renders.fetch_add(1, Ordering::Relaxed);
        Ok(Thumbnail {
            gif,
            config: self.config,
        })
    }
}

/// Render `pattern` as a looping GIF
///
/// Every frame starts from a black strip, so parts of the tree that draw
/// nothing show as black.
#[allow(clippy::cast_possible_truncation)]
pub fn render_gif(pattern: &mut PatternSlot, config: &ThumbnailConfig) -> ComposerResult<Vec<u8>> {
    if config.hz == 0 {
        return Err(ComposerError::validation("thumbnail rate must be positive"));
    }
    let width = u32::try_from(config.num_leds)
        .map_err(|_| ComposerError::validation("thumbnail is too wide"))?;
    let hz = u64::from(config.hz);
    let delay = Delay::from_numer_denom_ms(1000 / config.hz, 1);

    let mut leds = Frame::new(config.num_leds);
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder.set_repeat(Repeat::Infinite)?;
        for index in 0..config.frame_count() {
            leds.fill(BLACK);
            pattern.render(Instant::from_millis(index * 1000 / hz), &mut leds);

            let mut image = RgbaImage::new(width, 1);
            for (x, pixel) in leds.iter().enumerate() {
                image.put_pixel(x as u32, 0, Rgba([pixel.r, pixel.g, pixel.b, u8::MAX]));
            }
            encoder.encode_frame(GifFrame::from_parts(image, 0, 0, delay))?;
        }
    }
    Ok(out)
}
