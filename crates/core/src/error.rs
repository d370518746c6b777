//! Error types for the color picker core.
//!
//! Interactive edits never produce these: malformed typing is a `None`
//! result. Errors only come from name lookups and configuration loading.

use thiserror::Error;

/// Errors produced at the picker's naming and configuration boundary.
#[derive(Debug, Error)]
pub enum PickerError {
    /// A surface name (e.g. `"sv-area"`) was not recognized.
    #[error("unknown surface: {0}")]
    UnknownSurface(String),

    /// A channel name (e.g. `"red"`) was not recognized.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// A palette type name was not recognized.
    #[error("unknown palette type: {0}")]
    UnknownPalette(String),

    /// A color model name was not recognized.
    #[error("unknown color model: {0}")]
    UnknownColorModel(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A configuration object could not be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
