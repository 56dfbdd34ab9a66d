//! Pattern system with compile-time known pattern variants
//!
//! Every pattern kind is a variant of [`PatternSlot`], so rendering a tree is
//! a chain of exhaustive matches. Each kind implements the [`Pattern`] trait.
//! Combinators own their children and private scratch frames; the scratch
//! frames are never part of the serialized state.

mod chronometer;
mod crop;
mod cycle;
mod frame;
mod gradient;
mod looped;
mod mixer;
mod ping_pong;
mod rainbow;
mod repeated;
mod rotate;
mod scale;
mod static_color;
mod transition;

pub use chronometer::Chronometer;
pub use crop::Crop;
pub use cycle::Cycle;
use embassy_time::Instant;
pub use frame::FramePattern;
pub use gradient::Gradient;
pub use looped::Loop;
pub use mixer::Mixer;
pub use ping_pong::PingPong;
pub use rainbow::Rainbow;
pub use repeated::Repeated;
pub use rotate::Rotate;
pub use scale::Scale;
use serde::{Serialize, Serializer, ser::SerializeMap};
pub use static_color::StaticColor;
pub use transition::Transition;

use crate::{
    color::{Rgb, format_hex},
    error::{ComposerError, ComposerResult},
};

pub(crate) const PATTERN_NAME_COLOR: &str = "Color";
pub(crate) const PATTERN_NAME_FRAME: &str = "Frame";
pub(crate) const PATTERN_NAME_RAINBOW: &str = "Rainbow";
pub(crate) const PATTERN_NAME_REPEATED: &str = "Repeated";
pub(crate) const PATTERN_NAME_GRADIENT: &str = "Gradient";
pub(crate) const PATTERN_NAME_TRANSITION: &str = "Transition";
pub(crate) const PATTERN_NAME_CYCLE: &str = "Cycle";
pub(crate) const PATTERN_NAME_LOOP: &str = "Loop";
pub(crate) const PATTERN_NAME_ROTATE: &str = "Rotate";
pub(crate) const PATTERN_NAME_PING_PONG: &str = "PingPong";
pub(crate) const PATTERN_NAME_CHRONOMETER: &str = "Chronometer";
pub(crate) const PATTERN_NAME_CROP: &str = "Crop";
pub(crate) const PATTERN_NAME_SCALE: &str = "Scale";
pub(crate) const PATTERN_NAME_MIXER: &str = "Mixer";

/// Key holding the pattern kind in the tagged object form
pub const TYPE_KEY: &str = "_type";

/// Largest scratch frame a validated tree may ask for
pub const MAX_BUFFER_LEN: usize = 1 << 16;

pub trait Pattern {
    /// Render a single frame
    ///
    /// `now` is the time elapsed since the pattern started. Implementations
    /// write every pixel of `leds` and never read its previous content, so
    /// rendering twice with the same `now` gives the same output.
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);
}

/// An optional child pattern. An absent child renders nothing.
pub type Child = Option<Box<PatternSlot>>;

/// Render `child` if present
///
/// Returns `false` when there is no child, so the caller can skip its own
/// post-processing.
pub(crate) fn render_child(child: &mut Child, now: Instant, leds: &mut [Rgb]) -> bool {
    match child {
        Some(child) => {
            child.render(now, leds);
            true
        }
        None => false,
    }
}

/// Shift `now` back by `offset_ms`, saturating at the origin
pub(crate) fn rebase(now: Instant, offset_ms: u64) -> Instant {
    Instant::from_millis(now.as_millis().saturating_sub(offset_ms))
}

/// Known pattern kinds, as named on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Color,
    Frame,
    Rainbow,
    Repeated,
    Gradient,
    Transition,
    Cycle,
    Loop,
    Rotate,
    PingPong,
    Chronometer,
    Crop,
    Scale,
    Mixer,
}

impl PatternKind {
    pub const ALL: [Self; 14] = [
        Self::Color,
        Self::Frame,
        Self::Rainbow,
        Self::Repeated,
        Self::Gradient,
        Self::Transition,
        Self::Cycle,
        Self::Loop,
        Self::Rotate,
        Self::PingPong,
        Self::Chronometer,
        Self::Crop,
        Self::Scale,
        Self::Mixer,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color => PATTERN_NAME_COLOR,
            Self::Frame => PATTERN_NAME_FRAME,
            Self::Rainbow => PATTERN_NAME_RAINBOW,
            Self::Repeated => PATTERN_NAME_REPEATED,
            Self::Gradient => PATTERN_NAME_GRADIENT,
            Self::Transition => PATTERN_NAME_TRANSITION,
            Self::Cycle => PATTERN_NAME_CYCLE,
            Self::Loop => PATTERN_NAME_LOOP,
            Self::Rotate => PATTERN_NAME_ROTATE,
            Self::PingPong => PATTERN_NAME_PING_PONG,
            Self::Chronometer => PATTERN_NAME_CHRONOMETER,
            Self::Crop => PATTERN_NAME_CROP,
            Self::Scale => PATTERN_NAME_SCALE,
            Self::Mixer => PATTERN_NAME_MIXER,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    /// Solid color
    Color(StaticColor),
    /// Literal list of pixels
    Frame(FramePattern),
    /// Static visible-spectrum gradient
    Rainbow(Rainbow),
    /// Tiled base frame
    Repeated(Repeated),
    /// Spatial blend of two patterns
    Gradient(Gradient),
    /// One-shot cross-fade between two patterns
    Transition(Transition),
    /// Hard cuts between patterns
    Cycle(Cycle),
    /// Repeating cross-fades between patterns
    Loop(Loop),
    /// Circular shift of a pattern
    Rotate(Rotate),
    /// Bouncing trail
    PingPong(PingPong),
    /// Seconds, minutes and hours markers
    Chronometer(Chronometer),
    /// Pattern drawn on a sub-range of the strip
    Crop(Crop),
    /// Pattern rendered at another length and resampled
    Scale(Scale),
    /// Weighted sum of patterns
    Mixer(Mixer),
}

impl PatternSlot {
    /// Render the pattern tree
    pub fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        match self {
            Self::Color(pattern) => pattern.render(now, leds),
            Self::Frame(pattern) => pattern.render(now, leds),
            Self::Rainbow(pattern) => pattern.render(now, leds),
            Self::Repeated(pattern) => pattern.render(now, leds),
            Self::Gradient(pattern) => pattern.render(now, leds),
            Self::Transition(pattern) => pattern.render(now, leds),
            Self::Cycle(pattern) => pattern.render(now, leds),
            Self::Loop(pattern) => pattern.render(now, leds),
            Self::Rotate(pattern) => pattern.render(now, leds),
            Self::PingPong(pattern) => pattern.render(now, leds),
            Self::Chronometer(pattern) => pattern.render(now, leds),
            Self::Crop(pattern) => pattern.render(now, leds),
            Self::Scale(pattern) => pattern.render(now, leds),
            Self::Mixer(pattern) => pattern.render(now, leds),
        }
    }

    /// Get the pattern kind for external observation
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Color(_) => PatternKind::Color,
            Self::Frame(_) => PatternKind::Frame,
            Self::Rainbow(_) => PatternKind::Rainbow,
            Self::Repeated(_) => PatternKind::Repeated,
            Self::Gradient(_) => PatternKind::Gradient,
            Self::Transition(_) => PatternKind::Transition,
            Self::Cycle(_) => PatternKind::Cycle,
            Self::Loop(_) => PatternKind::Loop,
            Self::Rotate(_) => PatternKind::Rotate,
            Self::PingPong(_) => PatternKind::PingPong,
            Self::Chronometer(_) => PatternKind::Chronometer,
            Self::Crop(_) => PatternKind::Crop,
            Self::Scale(_) => PatternKind::Scale,
            Self::Mixer(_) => PatternKind::Mixer,
        }
    }

    /// Check the tree for structural problems when rendered on `num_leds`
    ///
    /// Rendering stays permissive whatever this returns: a tree that fails
    /// validation renders nothing where it is inconsistent. Scale buffers are
    /// capped at [`MAX_BUFFER_LEN`] pixels.
    pub fn validate(&self, num_leds: usize) -> ComposerResult<()> {
        match self {
            Self::Color(_) | Self::Frame(_) | Self::Rainbow(_) | Self::Repeated(_) => Ok(()),
            Self::Gradient(pattern) => {
                validate_child(pattern.left.as_deref(), num_leds)?;
                validate_child(pattern.right.as_deref(), num_leds)
            }
            Self::Transition(pattern) => {
                validate_child(pattern.before.as_deref(), num_leds)?;
                validate_child(pattern.after.as_deref(), num_leds)
            }
            Self::Cycle(pattern) => {
                if pattern.frame_duration_ms == 0 && pattern.frames.len() > 1 {
                    return Err(ComposerError::validation("Cycle frame_duration_ms is zero"));
                }
                validate_all(&pattern.frames, num_leds)
            }
            Self::Loop(pattern) => validate_all(&pattern.patterns, num_leds),
            Self::Rotate(pattern) => validate_child(pattern.child.as_deref(), num_leds),
            Self::PingPong(pattern) => validate_child(
                pattern.child.as_deref(),
                (num_leds * 2).saturating_sub(1),
            ),
            Self::Chronometer(pattern) => {
                validate_child(pattern.child.as_deref(), chronometer::PALETTE_LEN)
            }
            Self::Crop(pattern) => {
                if !pattern.bounds.fits(num_leds) {
                    return Err(ComposerError::validation(format!(
                        "Crop {}..{} is outside a strip of {num_leds} pixels",
                        pattern.bounds.start,
                        pattern.bounds.end
                    )));
                }
                validate_child(pattern.child.as_deref(), pattern.bounds.len())
            }
            Self::Scale(pattern) => {
                let Some(len) = pattern.buffer_len(num_leds) else {
                    return Err(ComposerError::validation(
                        "Scale needs a length or a positive ratio",
                    ));
                };
                if len > MAX_BUFFER_LEN {
                    return Err(ComposerError::validation(format!(
                        "Scale length {len} exceeds {MAX_BUFFER_LEN} pixels"
                    )));
                }
                validate_child(pattern.child.as_deref(), len)
            }
            Self::Mixer(pattern) => {
                if pattern.patterns.len() != pattern.weights.len() {
                    return Err(ComposerError::validation(format!(
                        "Mixer has {} patterns but {} weights",
                        pattern.patterns.len(),
                        pattern.weights.len()
                    )));
                }
                validate_all(&pattern.patterns, num_leds)
            }
        }
    }
}

impl Pattern for PatternSlot {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        PatternSlot::render(self, now, leds);
    }
}

fn validate_child(child: Option<&PatternSlot>, num_leds: usize) -> ComposerResult<()> {
    child.map_or(Ok(()), |child| child.validate(num_leds))
}

fn validate_all(children: &[PatternSlot], num_leds: usize) -> ComposerResult<()> {
    children.iter().try_for_each(|child| child.validate(num_leds))
}

/// Tagged object form: `{"_type": kind, ...fields}`
#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    #[serde(rename = "_type")]
    kind: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

fn tagged<S: Serializer, T: Serialize>(
    serializer: S,
    kind: PatternKind,
    body: &T,
) -> Result<S::Ok, S::Error> {
    Tagged {
        kind: kind.as_str(),
        body,
    }
    .serialize(serializer)
}

impl Serialize for PatternSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Self::Color(pattern) => {
                let mut hex = String::with_capacity(7);
                hex.push('#');
                hex.push_str(&format_hex(pattern.color));
                serializer.serialize_str(&hex)
            }
            Self::Frame(pattern) => pattern.frame.serialize(serializer),
            Self::Rainbow(_) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(TYPE_KEY, kind.as_str())?;
                map.end()
            }
            Self::Repeated(pattern) => tagged(serializer, kind, pattern),
            Self::Gradient(pattern) => tagged(serializer, kind, pattern),
            Self::Transition(pattern) => tagged(serializer, kind, pattern),
            Self::Cycle(pattern) => tagged(serializer, kind, pattern),
            Self::Loop(pattern) => tagged(serializer, kind, pattern),
            Self::Rotate(pattern) => tagged(serializer, kind, pattern),
            Self::PingPong(pattern) => tagged(serializer, kind, pattern),
            Self::Chronometer(pattern) => tagged(serializer, kind, pattern),
            Self::Crop(pattern) => tagged(serializer, kind, pattern),
            Self::Scale(pattern) => tagged(serializer, kind, pattern),
            Self::Mixer(pattern) => tagged(serializer, kind, pattern),
        }
    }
}

macro_rules! impl_from_pattern {
    ($($variant:ident($pattern:ty)),* $(,)?) => {
        $(
            impl From<$pattern> for PatternSlot {
                fn from(pattern: $pattern) -> Self {
                    Self::$variant(pattern)
                }
            }
        )*
    };
}

impl_from_pattern!(
    Color(StaticColor),
    Frame(FramePattern),
    Rainbow(Rainbow),
    Repeated(Repeated),
    Gradient(Gradient),
    Transition(Transition),
    Cycle(Cycle),
    Loop(Loop),
    Rotate(Rotate),
    PingPong(PingPong),
    Chronometer(Chronometer),
    Crop(Crop),
    Scale(Scale),
    Mixer(Mixer),
);

/// Box a pattern as a present child
pub fn child(pattern: impl Into<PatternSlot>) -> Child {
    Some(Box::new(pattern.into()))
}
