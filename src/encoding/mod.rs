//! Wire format of pattern trees
//!
//! A pattern is a JSON value. Colors and literal frames use string shorthands
//! (`"#rrggbb"` and `"L"` followed by `rrggbb` per pixel); every other kind is
//! an object tagged by its kind name under `_type`:
//!
//! ```json
//! {"_type": "Rotate", "child": {"_type": "Rainbow"}, "moves_per_sec": 6.0}
//! ```
//!
//! Decoding looks the tag up in an explicit [`PatternRegistry`]. Encoding is
//! the [`serde::Serialize`] impl of [`PatternSlot`], which always writes the
//! canonical form: shorthands where they exist, fields in declaration order.

mod builtin;
mod fields;

use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::URL_SAFE};
pub use fields::Fields;
use serde_json::Value;

use crate::{
    color::parse_hex,
    error::{ComposerError, ComposerResult},
    frame::{FRAME_PREFIX, Frame},
    pattern::{FramePattern, PatternSlot, StaticColor, TYPE_KEY},
};

/// Builds a pattern from the fields of a tagged object
pub type PatternDecoder = fn(&PatternRegistry, &mut Fields) -> ComposerResult<PatternSlot>;

/// Mapping from pattern tag to decoder
///
/// Built once at startup and passed to whoever decodes patterns. Hosts can
/// register extra tags that expand to trees of the built-in kinds.
#[derive(Clone, Default)]
pub struct PatternRegistry {
    decoders: HashMap<String, PatternDecoder>,
}

impl core::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut tags: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("PatternRegistry").field("tags", &tags).finish()
    }
}

impl PatternRegistry {
    /// Create a registry without any tag
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry knowing every built-in pattern kind
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Register `decoder` for `tag`, replacing any previous decoder
    pub fn register(&mut self, tag: impl Into<String>, decoder: PatternDecoder) {
        self.decoders.insert(tag.into(), decoder);
    }

    /// Check whether `tag` can be decoded
    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    /// Decode a serialized pattern
    pub fn decode(&self, bytes: &[u8]) -> ComposerResult<PatternSlot> {
        serde_json::from_slice(bytes)
            .map_err(ComposerError::from)
            .and_then(|value| self.decode_value(value))
            .inspect_err(|err| tracing::debug!(%err, len = bytes.len(), "pattern decode failed"))
    }

    /// Decode a serialized pattern held in a string
    pub fn decode_str(&self, raw: &str) -> ComposerResult<PatternSlot> {
        self.decode(raw.as_bytes())
    }

    /// Decode a pattern from an already parsed JSON value
    pub fn decode_value(&self, value: Value) -> ComposerResult<PatternSlot> {
        match value {
            Value::String(raw) => decode_shorthand(&raw),
            Value::Object(mut map) => {
                let tag = match map.remove(TYPE_KEY) {
                    Some(Value::String(tag)) => tag,
                    Some(other) => {
                        return Err(ComposerError::decode(format!(
                            "{TYPE_KEY} must be a string, got {other}"
                        )));
                    }
                    None => return Err(ComposerError::decode(format!("missing {TYPE_KEY}"))),
                };
                let Some(&decoder) = self.decoders.get(&tag) else {
                    tracing::debug!(%tag, "unknown pattern tag");
                    return Err(ComposerError::unknown_pattern(tag));
                };
                let mut fields = Fields::new(tag, map);
                let pattern = decoder(self, &mut fields)?;
                fields.finish();
                Ok(pattern)
            }
            other => Err(ComposerError::decode(format!(
                "expected a pattern object or string, got {other}"
            ))),
        }
    }

    /// Encode `pattern` to its canonical bytes
    pub fn encode(&self, pattern: &PatternSlot) -> ComposerResult<Vec<u8>> {
        encode(pattern)
    }
}

fn decode_shorthand(raw: &str) -> ComposerResult<PatternSlot> {
    if let Some(hex) = raw.strip_prefix('#') {
        return parse_hex(hex)
            .map(|color| StaticColor::new(color).into())
            .ok_or_else(|| ComposerError::decode(format!("invalid color {raw:?}")));
    }
    if raw.starts_with(FRAME_PREFIX) {
        return Frame::parse_hex(raw)
            .map(|frame| FramePattern::new(frame).into())
            .ok_or_else(|| ComposerError::decode(format!("invalid frame {raw:?}")));
    }
    Err(ComposerError::decode(format!(
        "unrecognized pattern string {raw:?}"
    )))
}

/// Encode `pattern` to its canonical bytes
pub fn encode(pattern: &PatternSlot) -> ComposerResult<Vec<u8>> {
    Ok(serde_json::to_vec(pattern)?)
}

/// Encode `pattern` to its canonical string
pub fn encode_string(pattern: &PatternSlot) -> ComposerResult<String> {
    Ok(serde_json::to_string(pattern)?)
}

/// Wrap serialized bytes in URL-safe base64
pub fn to_base64_url(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Unwrap bytes produced by [`to_base64_url`]
pub fn from_base64_url(encoded: &str) -> ComposerResult<Vec<u8>> {
    Ok(URL_SAFE.decode(encoded)?)
}
