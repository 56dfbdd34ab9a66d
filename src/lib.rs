//! Composable pattern rendering for 1D LED strips
//!
//! A show is a tree of [`PatternSlot`]s rendered at an elapsed time into a
//! frame of [`Rgb`] pixels. Trees are built in code or decoded from their JSON
//! wire form through a [`PatternRegistry`], played live by a [`Painter`], and
//! previewed as looping GIFs by a [`ThumbnailCache`].

pub mod bounds;
pub mod channel;
pub mod color;
pub mod config;
pub mod curve;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod frame_scheduler;
pub mod interpolation;
pub mod math8;
pub mod painter;
pub mod pattern;
pub mod thumbnail;

pub use bounds::RenderingBounds;
pub use channel::{PatternChannel, PatternCommand, PatternReceiver, PatternSender};
pub use color::Rgb;
pub use config::{PainterConfig, ThumbnailConfig};
pub use curve::Curve;
pub use embassy_time::{Duration, Instant};
pub use encoding::{PatternRegistry, from_base64_url, to_base64_url};
pub use error::{ComposerError, ComposerResult};
pub use frame::Frame;
pub use frame_scheduler::FrameScheduler;
pub use interpolation::Interpolation;
pub use painter::Painter;
pub use pattern::{Pattern, PatternKind, PatternSlot};
pub use thumbnail::{Thumbnail, ThumbnailCache};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
