//! Picker configuration: alpha gating, slider color model, palette layout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::channel::Channel;
use crate::error::PickerError;
use crate::params::{param_bool, param_string};
use crate::surface::{AreaKind, Surface};

const COLOR_MODEL_NAMES: &[&str] = &["rgb", "hsv", "hsl"];

const PALETTE_NAMES: &[&str] = &[
    "hsv-with-hue",
    "hsv-with-value",
    "hsv-with-saturation",
    "hsl-with-hue",
    "hsl-with-lightness",
    "hsl-with-saturation",
    "rgb-with-red",
    "rgb-with-green",
    "rgb-with-blue",
    "hue-wheel",
    "tracks-only",
];

/// Which channel set the linear sliders and labels expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorModelKind {
    #[default]
    Rgb,
    Hsv,
    Hsl,
}

impl ColorModelKind {
    pub fn from_name(name: &str) -> Result<Self, PickerError> {
        match name {
            "rgb" => Ok(ColorModelKind::Rgb),
            "hsv" => Ok(ColorModelKind::Hsv),
            "hsl" => Ok(ColorModelKind::Hsl),
            _ => Err(PickerError::UnknownColorModel(name.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        COLOR_MODEL_NAMES
    }

    pub fn name(self) -> &'static str {
        COLOR_MODEL_NAMES[self as usize]
    }

    /// Channels shown as sliders and labels, alpha excluded.
    pub fn channels(self) -> [Channel; 3] {
        match self {
            ColorModelKind::Rgb => [Channel::Red, Channel::Green, Channel::Blue],
            ColorModelKind::Hsv => [Channel::Hue, Channel::Saturation, Channel::Value],
            ColorModelKind::Hsl => [Channel::Hue, Channel::HslSaturation, Channel::Lightness],
        }
    }
}

/// Which 2D/1D surface combination is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteType {
    /// SV rectangle with a hue track.
    #[default]
    HsvWithHue,
    HsvWithValue,
    HsvWithSaturation,
    HslWithHue,
    HslWithLightness,
    HslWithSaturation,
    RgbWithRed,
    RgbWithGreen,
    RgbWithBlue,
    /// Hue wheel with a value track.
    HueWheel,
    /// No 2D surface; sliders for the configured color model only.
    TracksOnly,
}

impl PaletteType {
    pub fn from_name(name: &str) -> Result<Self, PickerError> {
        PALETTE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| PaletteType::ALL[i])
            .ok_or_else(|| PickerError::UnknownPalette(name.to_string()))
    }

    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub const ALL: [PaletteType; 11] = [
        PaletteType::HsvWithHue,
        PaletteType::HsvWithValue,
        PaletteType::HsvWithSaturation,
        PaletteType::HslWithHue,
        PaletteType::HslWithLightness,
        PaletteType::HslWithSaturation,
        PaletteType::RgbWithRed,
        PaletteType::RgbWithGreen,
        PaletteType::RgbWithBlue,
        PaletteType::HueWheel,
        PaletteType::TracksOnly,
    ];

    pub fn name(self) -> &'static str {
        PALETTE_NAMES[self as usize]
    }

    /// The 2D surface and its companion track, if this palette has them.
    pub fn primary_surfaces(self) -> Option<(Surface, Surface)> {
        let pair = |area, channel| (Surface::Area(area), Surface::Track(channel));
        match self {
            PaletteType::HsvWithHue => Some(pair(AreaKind::SaturationValue, Channel::Hue)),
            PaletteType::HsvWithValue => Some(pair(AreaKind::HueSaturation, Channel::Value)),
            PaletteType::HsvWithSaturation => Some(pair(AreaKind::HueValue, Channel::Saturation)),
            PaletteType::HslWithHue => Some(pair(AreaKind::HslSaturationLightness, Channel::Hue)),
            PaletteType::HslWithLightness => {
                Some(pair(AreaKind::HueHslSaturation, Channel::Lightness))
            }
            PaletteType::HslWithSaturation => {
                Some(pair(AreaKind::HueLightness, Channel::HslSaturation))
            }
            PaletteType::RgbWithRed => Some(pair(AreaKind::GreenBlue, Channel::Red)),
            PaletteType::RgbWithGreen => Some(pair(AreaKind::RedBlue, Channel::Green)),
            PaletteType::RgbWithBlue => Some(pair(AreaKind::RedGreen, Channel::Blue)),
            PaletteType::HueWheel => Some((Surface::HueWheel, Surface::Track(Channel::Value))),
            PaletteType::TracksOnly => None,
        }
    }
}

/// Recognized picker options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Gates alpha-track edits and 8-digit hex alpha. When false the color is
    /// kept fully opaque.
    pub enable_alpha: bool,
    pub color_model: ColorModelKind,
    pub palette_type: PaletteType,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            enable_alpha: true,
            color_model: ColorModelKind::default(),
            palette_type: PaletteType::default(),
        }
    }
}

impl PickerConfig {
    /// Reads options from a JSON object, falling back to defaults for missing
    /// or wrong-typed keys. Unrecognized model or palette names are errors.
    pub fn from_json(params: &Value) -> Result<Self, PickerError> {
        let defaults = PickerConfig::default();
        let enable_alpha = param_bool(params, "enable_alpha", defaults.enable_alpha);
        let color_model = param_string(params, "color_model", defaults.color_model.name());
        let palette_type = param_string(params, "palette_type", defaults.palette_type.name());

        Ok(PickerConfig {
            enable_alpha,
            color_model: ColorModelKind::from_name(&color_model)
                .map_err(|e| PickerError::InvalidConfig(e.to_string()))?,
            palette_type: PaletteType::from_name(&palette_type)
                .map_err(|e| PickerError::InvalidConfig(e.to_string()))?,
        })
    }

    /// Every surface active under this configuration: the palette's 2D surface
    /// and companion track, then one track per color-model channel not already
    /// present, then the alpha track when alpha is enabled.
    pub fn surfaces(&self) -> Vec<Surface> {
        let mut surfaces = Vec::new();
        if let Some((area, track)) = self.palette_type.primary_surfaces() {
            surfaces.push(area);
            surfaces.push(track);
        }
        for channel in self.color_model.channels() {
            let present = surfaces.iter().any(|s| s.channels().contains(&channel));
            if !present {
                surfaces.push(Surface::Track(channel));
            }
        }
        if self.enable_alpha {
            surfaces.push(Surface::Track(Channel::Alpha));
        }
        surfaces
    }
}
