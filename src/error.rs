//! # Error Types
//!
//! This module defines error types used throughout the halftone library.
//!
//! Every error is terminal for the invocation that produced it: the pipeline
//! aborts before anything is handed to the store, and nothing is retried.

use thiserror::Error;

/// Main error type for halftone operations
#[derive(Debug, Error)]
pub enum HalftoneError {
    /// Source image missing, zero-dimensioned, or undecodable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A parameter value outside its declared bounds
    #[error("Parameter '{name}' out of range: {value} (expected {constraint})")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        constraint: String,
    },

    /// Unknown parameter name or unparsable parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A flat buffer whose length does not fill the requested shape.
    #[error("Buffer holds {actual} values, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    /// Two fields that must line up have different shapes.
    ///
    /// The engine's own composition never produces this; seeing it means a
    /// caller combined fields from different images.
    #[error("Shape mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Image decode/encode error wrapper
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Metadata (de)serialization error wrapper
    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HalftoneError>;
