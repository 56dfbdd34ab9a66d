use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::PatternRegistry;
use crate::{
    color::{Rgb, parse_hex},
    error::{ComposerError, ComposerResult},
    pattern::{Child, PatternSlot},
};

/// Fields of a tagged object, consumed by a pattern decoder
///
/// Missing and `null` fields read as their default. Fields left over once the
/// decoder is done are ignored.
#[derive(Debug)]
pub struct Fields {
    kind: String,
    map: Map<String, Value>,
}

impl Fields {
    pub(crate) fn new(kind: impl Into<String>, map: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            map,
        }
    }

    /// Tag of the object being decoded
    pub fn kind(&self) -> &str {
        &self.kind
    }

    fn take_raw(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key).filter(|value| !value.is_null())
    }

    fn error(&self, key: &str, err: impl core::fmt::Display) -> ComposerError {
        ComposerError::decode(format!("{}.{key}: {err}", self.kind))
    }

    /// Take a scalar field, or its default when absent
    pub fn value<T: DeserializeOwned + Default>(&mut self, key: &str) -> ComposerResult<T> {
        match self.take_raw(key) {
            Some(value) => serde_json::from_value(value).map_err(|err| self.error(key, err)),
            None => Ok(T::default()),
        }
    }

    /// Take a `#rrggbb` color field
    pub fn color(&mut self, key: &str) -> ComposerResult<Rgb> {
        let Some(value) = self.take_raw(key) else {
            return Err(self.error(key, "missing color"));
        };
        value
            .as_str()
            .and_then(|raw| raw.strip_prefix('#'))
            .and_then(parse_hex)
            .ok_or_else(|| self.error(key, format!("expected #rrggbb, got {value}")))
    }

    /// Take an optional child pattern
    pub fn pattern(&mut self, registry: &PatternRegistry, key: &str) -> ComposerResult<Child> {
        self.take_raw(key)
            .map(|value| registry.decode_value(value).map(Box::new))
            .transpose()
    }

    /// Take a list of child patterns, empty when absent
    pub fn patterns(
        &mut self,
        registry: &PatternRegistry,
        key: &str,
    ) -> ComposerResult<Vec<PatternSlot>> {
        match self.take_raw(key) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| registry.decode_value(item))
                .collect(),
            Some(other) => Err(self.error(key, format!("expected a list, got {other}"))),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn finish(self) {
        if !self.map.is_empty() {
            let ignored: Vec<&str> = self.map.keys().map(String::as_str).collect();
            tracing::debug!(kind = %self.kind, ?ignored, "ignoring unknown fields");
        }
    }
}
