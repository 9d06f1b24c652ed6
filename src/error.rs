//! Configuration errors.
//!
//! Only scale construction can fail. Bad data values never produce an error:
//! they map to the scale's missing sentinel instead.

/// Error raised while building a scale from its configuration.
#[derive(thiserror::Error, Debug)]
pub enum ScaleError {
    #[error("invalid value for `{param}` on {scale}: {reason}")]
    InvalidParameter {
        scale: &'static str,
        param: &'static str,
        reason: String,
    },

    #[error("unknown option `{key}` for {scale}")]
    UnknownOption { scale: String, key: String },

    #[error("unknown scale `{0}`")]
    UnknownScale(String),

    #[error("unknown aesthetic `{0}`")]
    UnknownAesthetic(String),

    #[error("unknown palette `{0}`")]
    UnknownPalette(String),

    #[error("scale `{scale}` cannot map the `{aesthetic}` aesthetic")]
    UnsupportedAesthetic { scale: &'static str, aesthetic: String },

    #[error("{breaks} breaks but {labels} labels")]
    LabelCountMismatch { breaks: usize, labels: usize },

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScaleError>;

impl ScaleError {
    pub(crate) fn invalid(scale: &'static str, param: &'static str, reason: impl Into<String>) -> Self {
        ScaleError::InvalidParameter {
            scale,
            param,
            reason: reason.into(),
        }
    }
}
