#![deny(unsafe_code)]
//! Core of the interactive color picker.
//!
//! Provides the canonical `Hsva` color with its RGB/HSL conversions, the hex
//! text codec, pointer geometry for tracks, 2D areas and the hue wheel, and the
//! `PickerController` that ties them together behind directional edit calls.

pub mod channel;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod hex;
pub mod label;
pub mod params;
pub mod surface;

pub use channel::Channel;
pub use color::{Hsl, Hsva, Rgb, Rgba8};
pub use config::{ColorModelKind, PaletteType, PickerConfig};
pub use controller::{DerivedViews, EditSource, PickerController};
pub use error::PickerError;
pub use geometry::{ColorUpdate, Position};
pub use label::ChannelLabel;
pub use surface::{AreaKind, Surface};
