//! Descriptors for the interactive surfaces a pointer can drive.

use crate::channel::{Channel, Touched};
use crate::error::PickerError;

/// A rectangular 2D area. `x` drives the first channel left to right, `y`
/// drives the second channel with its maximum at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// HSV saturation across, value up. The classic SV rectangle.
    SaturationValue,
    HueSaturation,
    HueValue,
    HslSaturationLightness,
    HueHslSaturation,
    HueLightness,
    RedGreen,
    RedBlue,
    GreenBlue,
}

impl AreaKind {
    pub const ALL: [AreaKind; 9] = [
        AreaKind::SaturationValue,
        AreaKind::HueSaturation,
        AreaKind::HueValue,
        AreaKind::HslSaturationLightness,
        AreaKind::HueHslSaturation,
        AreaKind::HueLightness,
        AreaKind::RedGreen,
        AreaKind::RedBlue,
        AreaKind::GreenBlue,
    ];

    /// The `(x, y)` channels of this area.
    pub fn axes(self) -> (Channel, Channel) {
        match self {
            AreaKind::SaturationValue => (Channel::Saturation, Channel::Value),
            AreaKind::HueSaturation => (Channel::Hue, Channel::Saturation),
            AreaKind::HueValue => (Channel::Hue, Channel::Value),
            AreaKind::HslSaturationLightness => (Channel::HslSaturation, Channel::Lightness),
            AreaKind::HueHslSaturation => (Channel::Hue, Channel::HslSaturation),
            AreaKind::HueLightness => (Channel::Hue, Channel::Lightness),
            AreaKind::RedGreen => (Channel::Red, Channel::Green),
            AreaKind::RedBlue => (Channel::Red, Channel::Blue),
            AreaKind::GreenBlue => (Channel::Green, Channel::Blue),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AreaKind::SaturationValue => "sv-area",
            AreaKind::HueSaturation => "hue-saturation-area",
            AreaKind::HueValue => "hue-value-area",
            AreaKind::HslSaturationLightness => "hsl-saturation-lightness-area",
            AreaKind::HueHslSaturation => "hue-hsl-saturation-area",
            AreaKind::HueLightness => "hue-lightness-area",
            AreaKind::RedGreen => "red-green-area",
            AreaKind::RedBlue => "red-blue-area",
            AreaKind::GreenBlue => "green-blue-area",
        }
    }
}

/// Any interactive region mapped to color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Horizontal single-channel slider.
    Track(Channel),
    Area(AreaKind),
    /// Disc with hue as the angle and HSV saturation as the radius.
    HueWheel,
}

impl Surface {
    /// The classic saturation/value rectangle.
    pub const SV_AREA: Surface = Surface::Area(AreaKind::SaturationValue);

    /// Looks up a surface by name: `"<channel>-track"`, an area name such as
    /// `"sv-area"`, or `"hue-wheel"`.
    pub fn from_name(name: &str) -> Result<Self, PickerError> {
        if name == "hue-wheel" {
            return Ok(Surface::HueWheel);
        }
        if let Some(channel) = name.strip_suffix("-track") {
            return Channel::from_name(channel)
                .map(Surface::Track)
                .map_err(|_| PickerError::UnknownSurface(name.to_string()));
        }
        AreaKind::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .map(Surface::Area)
            .ok_or_else(|| PickerError::UnknownSurface(name.to_string()))
    }

    pub fn name(self) -> String {
        match self {
            Surface::Track(channel) => format!("{}-track", channel.name()),
            Surface::Area(area) => area.name().to_string(),
            Surface::HueWheel => "hue-wheel".to_string(),
        }
    }

    /// Every surface the picker knows about.
    pub fn all() -> Vec<Surface> {
        Channel::ALL
            .into_iter()
            .map(Surface::Track)
            .chain(AreaKind::ALL.into_iter().map(Surface::Area))
            .chain(std::iter::once(Surface::HueWheel))
            .collect()
    }

    /// Channels this surface edits along its axes.
    pub fn channels(self) -> Vec<Channel> {
        match self {
            Surface::Track(channel) => vec![channel],
            Surface::Area(area) => {
                let (x, y) = area.axes();
                vec![x, y]
            }
            Surface::HueWheel => vec![Channel::Hue, Channel::Saturation],
        }
    }

    /// Canonical fields a pointer update on this surface may change.
    pub fn touched(self) -> Touched {
        match self {
            Surface::Track(channel) => channel.touched(),
            Surface::Area(area) => {
                let (x, y) = area.axes();
                x.touched().union(y.touched())
            }
            Surface::HueWheel => Touched {
                hue: true,
                saturation: true,
                ..Touched::default()
            },
        }
    }

    pub fn is_alpha(self) -> bool {
        self == Surface::Track(Channel::Alpha)
    }
}
