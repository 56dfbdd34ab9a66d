pub type ComposerResult<T> = Result<T, ComposerError>;

#[derive(thiserror::Error, Debug)]
pub enum ComposerError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl ComposerError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn unknown_pattern(tag: impl Into<String>) -> Self {
        Self::UnknownPattern(tag.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ComposerError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            ComposerError::unknown_pattern("Sparkle")
                .to_string()
                .contains("unknown pattern: Sparkle")
        );
        assert!(
            ComposerError::validation("x")
                .to_string()
                .contains("validation error:")
        );
    }

    #[test]
    fn json_errors_convert() {
        let err: ComposerError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, ComposerError::Json(_)));
    }
}
