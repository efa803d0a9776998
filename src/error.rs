//! Error taxonomy shared by every pipeline stage
//!
//! Each stage reports its own error type. [`GenerateError`] wraps them
//! without reclassifying, so callers can match on the failing [`Stage`] or on
//! the stage-independent [`ErrorKind`].

use thiserror::Error;

use crate::decode::DecodeError;
use crate::options::OptionsError;
use crate::sample::SampleError;
use crate::style::StyleError;

/// Discriminant of every conversion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    UnsupportedFormat,
    CorruptData,
    InvalidCellSize,
    UnknownStyle,
    InvalidOption,
}

impl ErrorKind {
    /// Stable snake_case identifier, suitable for bindings and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::UnsupportedFormat => "unsupported_format",
            ErrorKind::CorruptData => "corrupt_data",
            ErrorKind::InvalidCellSize => "invalid_cell_size",
            ErrorKind::UnknownStyle => "unknown_style",
            ErrorKind::InvalidOption => "invalid_option",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Style,
    Options,
    Decode,
    Canvas,
    Sample,
    Render,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Style => write!(f, "style"),
            Stage::Options => write!(f, "options"),
            Stage::Decode => write!(f, "decode"),
            Stage::Canvas => write!(f, "canvas"),
            Stage::Sample => write!(f, "sample"),
            Stage::Render => write!(f, "render"),
        }
    }
}

/// A failed conversion, tagged with the stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("style: {0}")]
    Style(#[from] StyleError),
    #[error("options: {0}")]
    Options(#[from] OptionsError),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
    #[error("sample: {0}")]
    Sample(#[from] SampleError),
}

impl GenerateError {
    pub fn stage(&self) -> Stage {
        match self {
            GenerateError::Style(_) => Stage::Style,
            GenerateError::Options(_) => Stage::Options,
            GenerateError::Decode(_) => Stage::Decode,
            GenerateError::Sample(_) => Stage::Sample,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::Style(e) => e.kind(),
            GenerateError::Options(e) => e.kind(),
            GenerateError::Decode(e) => e.kind(),
            GenerateError::Sample(e) => e.kind(),
        }
    }
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::EmptyInput => ErrorKind::EmptyInput,
            DecodeError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            DecodeError::CorruptData { .. } => ErrorKind::CorruptData,
        }
    }
}

impl SampleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SampleError::InvalidCellSize(_) => ErrorKind::InvalidCellSize,
        }
    }
}

impl StyleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StyleError::UnknownStyle { .. } => ErrorKind::UnknownStyle,
        }
    }
}

impl OptionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptionsError::InvalidCellSize(_) => ErrorKind::InvalidCellSize,
            OptionsError::UnknownOption { .. }
            | OptionsError::InvalidValue { .. }
            | OptionsError::Malformed(_)
            | OptionsError::Conflict(_) => ErrorKind::InvalidOption,
        }
    }
}
