//! Color types and conversion functions for the color picker.
//!
//! The canonical color is [`Hsva`]: hue in degrees plus saturation, value and
//! alpha in [0, 1]. Every other representation (`Rgb`, `Rgba8`, `Hsl`) is
//! derived from it by pure conversion functions and never stored alongside it.
//! Uses `f64` throughout so that the only lossy step is 8-bit quantization.

use crate::error::PickerError;
use crate::hex::{self, HexFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical picker color: hue in [0, 360), saturation/value/alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsva {
    pub alpha: f64,
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

/// Continuous RGB with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// 8-bit RGBA, the "plain" color handed to listeners.
///
/// Serializes as `"#AARRGGBB"` hex text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// HSL view of a color. Hue in degrees, saturation and lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Wraps a hue into [0, 360). NaN maps to 0.
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid of a tiny negative number rounds up to exactly 360.0
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Clamps to [0, 1]. NaN maps to 0.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

fn quantize(c: f64) -> u8 {
    (clamp_unit(c) * 255.0).round() as u8
}

impl Hsva {
    /// Opaque white.
    pub const WHITE: Hsva = Hsva {
        alpha: 1.0,
        hue: 0.0,
        saturation: 0.0,
        value: 1.0,
    };

    /// Creates a color, clamping every channel into its valid range.
    pub fn new(hue: f64, saturation: f64, value: f64, alpha: f64) -> Self {
        Hsva {
            alpha,
            hue,
            saturation,
            value,
        }
        .clamp()
    }

    /// Wraps hue modulo 360 and clamps saturation, value and alpha to [0, 1].
    pub fn clamp(self) -> Self {
        Hsva {
            alpha: clamp_unit(self.alpha),
            hue: normalize_hue(self.hue),
            saturation: clamp_unit(self.saturation),
            value: clamp_unit(self.value),
        }
    }

    /// True when every channel is inside its declared range.
    pub fn is_valid(&self) -> bool {
        let unit = |x: f64| (0.0..=1.0).contains(&x);
        (0.0..360.0).contains(&self.hue)
            && unit(self.saturation)
            && unit(self.value)
            && unit(self.alpha)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Hsva { alpha, ..self }.clamp()
    }

    pub fn from_rgb(rgb: Rgb, alpha: f64) -> Self {
        rgb_to_hsv(rgb, alpha)
    }

    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self)
    }

    /// Converts from 8-bit RGBA. Achromatic input gets hue 0.
    pub fn from_rgba8(c: Rgba8) -> Self {
        rgb_to_hsv(
            Rgb {
                r: c.r as f64 / 255.0,
                g: c.g as f64 / 255.0,
                b: c.b as f64 / 255.0,
            },
            c.a as f64 / 255.0,
        )
    }

    /// Converts to 8-bit RGBA, rounding each channel to the nearest byte.
    pub fn to_rgba8(self) -> Rgba8 {
        let rgb = hsv_to_rgb(self);
        Rgba8 {
            r: quantize(rgb.r),
            g: quantize(rgb.g),
            b: quantize(rgb.b),
            a: quantize(self.alpha),
        }
    }

    pub fn to_hsl(self) -> Hsl {
        hsv_to_hsl(self)
    }

    pub fn from_hsl(hsl: Hsl, alpha: f64) -> Self {
        hsl_to_hsv(hsl, alpha)
    }

    /// Edits this color in continuous RGB space.
    ///
    /// When the result is achromatic the previous hue is kept, and when it is
    /// black the previous saturation is kept, so markers do not jump while a
    /// drag passes through gray or black.
    pub fn map_rgb(self, f: impl FnOnce(Rgb) -> Rgb) -> Self {
        let next = rgb_to_hsv(f(self.to_rgb()), self.alpha);
        self.hold_indeterminate(next)
    }

    /// HSL view to start an HSL edit from. HSL saturation is undefined at
    /// black, so the held HSV saturation stands in for it there.
    pub fn to_hsl_held(self) -> Hsl {
        let hsl = self.to_hsl();
        if hsl.lightness <= 0.0 {
            Hsl {
                saturation: clamp_unit(self.saturation),
                ..hsl
            }
        } else {
            hsl
        }
    }

    /// Edits this color in HSL space, starting from [`Hsva::to_hsl_held`].
    pub fn map_hsl(self, f: impl FnOnce(Hsl) -> Hsl) -> Self {
        self.map_hsl_from(self.to_hsl_held(), f)
    }

    /// Edits this color in HSL space, starting from `start` instead of the
    /// color's own HSL view.
    ///
    /// `start` lets a caller carry HSL saturation across white, where the
    /// canonical color cannot hold it. Hue passes through HSL unchanged, so
    /// only saturation needs holding: when the result is black the previous
    /// saturation is kept.
    pub fn map_hsl_from(self, start: Hsl, f: impl FnOnce(Hsl) -> Hsl) -> Self {
        let mut next = hsl_to_hsv(f(start), self.alpha);
        if next.value == 0.0 {
            next.saturation = self.saturation;
        }
        next
    }

    fn hold_indeterminate(self, next: Hsva) -> Hsva {
        let mut held = next;
        if next.saturation == 0.0 || next.value == 0.0 {
            held.hue = self.hue;
        }
        if next.value == 0.0 {
            held.saturation = self.saturation;
        }
        held
    }
}

impl Default for Hsva {
    fn default() -> Self {
        Hsva::WHITE
    }
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }

    /// Opaque color from three bytes.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba8 { r, g, b, a: 255 }
    }

    /// Parses hex text in any accepted form, alpha included.
    pub fn from_hex(text: &str) -> Result<Rgba8, PickerError> {
        hex::parse_rgba8(text, true)
            .ok_or_else(|| PickerError::InvalidColor(format!("not a hex color: {text:?}")))
    }

    /// Formats as `"#AARRGGBB"`.
    pub fn to_hex(self) -> String {
        let format = HexFormat {
            include_hash: true,
            include_alpha: true,
            uppercase: true,
        };
        hex::format_rgba8_with(self, format)
    }
}

impl From<Rgba8> for Hsva {
    fn from(c: Rgba8) -> Self {
        Hsva::from_rgba8(c)
    }
}

impl From<Hsva> for Rgba8 {
    fn from(c: Hsva) -> Self {
        c.to_rgba8()
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Converts continuous RGB to HSV. Hue is 0 when the color is achromatic.
pub fn rgb_to_hsv(c: Rgb, alpha: f64) -> Hsva {
    let (r, g, b) = (clamp_unit(c.r), clamp_unit(c.g), clamp_unit(c.b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    Hsva::new(hue, saturation, max, alpha)
}

/// Converts HSV to continuous RGB.
pub fn hsv_to_rgb(c: Hsva) -> Rgb {
    let c = c.clamp();
    let chroma = c.value * c.saturation;
    let sector = c.hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = c.value - chroma;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Rgb {
        r: clamp_unit(r + m),
        g: clamp_unit(g + m),
        b: clamp_unit(b + m),
    }
}

/// Converts HSV to HSL via `l = v * (1 - s/2)`.
///
/// HSL saturation is 0 at lightness 0 and 1, where it is indeterminate.
pub fn hsv_to_hsl(c: Hsva) -> Hsl {
    let c = c.clamp();
    let lightness = c.value * (1.0 - c.saturation / 2.0);
    let saturation = if lightness <= 0.0 || lightness >= 1.0 {
        0.0
    } else {
        (c.value - lightness) / lightness.min(1.0 - lightness)
    };
    Hsl {
        hue: c.hue,
        saturation: clamp_unit(saturation),
        lightness: clamp_unit(lightness),
    }
}

/// Converts HSL to HSV via `v = l + s * min(l, 1 - l)`.
pub fn hsl_to_hsv(c: Hsl, alpha: f64) -> Hsva {
    let saturation = clamp_unit(c.saturation);
    let lightness = clamp_unit(c.lightness);
    let value = lightness + saturation * lightness.min(1.0 - lightness);
    let sv = if value <= 0.0 {
        0.0
    } else {
        2.0 * (1.0 - lightness / value)
    };
    Hsva::new(c.hue, sv, value, alpha)
}
