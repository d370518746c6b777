//! Individual color channels the picker can edit.
//!
//! A [`Channel`] knows how to read itself from a canonical [`Hsva`] as a
//! fraction in [0, 1] (its position along a track) and how to write that
//! fraction back. HSL and RGB channels round-trip through their own space so
//! only the canonical fields they actually affect change.

use crate::color::{normalize_hue, Hsl, Hsva, Rgb};
use crate::error::PickerError;

const CHANNEL_NAMES: &[&str] = &[
    "hue",
    "saturation",
    "value",
    "hsl-saturation",
    "lightness",
    "red",
    "green",
    "blue",
    "alpha",
];

/// A single editable color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Hue,
    /// HSV saturation.
    Saturation,
    Value,
    HslSaturation,
    Lightness,
    Red,
    Green,
    Blue,
    Alpha,
}

/// Which canonical fields an edit may change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub hue: bool,
    pub saturation: bool,
    pub value: bool,
    pub alpha: bool,
}

impl Touched {
    pub fn union(self, other: Touched) -> Touched {
        Touched {
            hue: self.hue || other.hue,
            saturation: self.saturation || other.saturation,
            value: self.value || other.value,
            alpha: self.alpha || other.alpha,
        }
    }
}

impl Channel {
    pub const ALL: [Channel; 9] = [
        Channel::Hue,
        Channel::Saturation,
        Channel::Value,
        Channel::HslSaturation,
        Channel::Lightness,
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Alpha,
    ];

    /// Looks up a channel by its kebab-case name.
    pub fn from_name(name: &str) -> Result<Self, PickerError> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| PickerError::UnknownChannel(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        CHANNEL_NAMES[self as usize]
    }

    pub fn list_names() -> &'static [&'static str] {
        CHANNEL_NAMES
    }

    /// Short label shown next to the channel's value.
    pub fn short_label(self) -> &'static str {
        match self {
            Channel::Hue => "H",
            Channel::Saturation | Channel::HslSaturation => "S",
            Channel::Value => "V",
            Channel::Lightness => "L",
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
            Channel::Alpha => "A",
        }
    }

    /// Range of values accepted by discrete numeric entry.
    ///
    /// Hue is in degrees, the percentage channels in 0..=100 and the byte
    /// channels in 0..=255.
    pub fn input_range(self) -> (f64, f64) {
        match self {
            Channel::Hue => (0.0, 360.0),
            Channel::Saturation | Channel::Value | Channel::HslSaturation | Channel::Lightness => {
                (0.0, 100.0)
            }
            Channel::Red | Channel::Green | Channel::Blue | Channel::Alpha => (0.0, 255.0),
        }
    }

    pub fn touched(self) -> Touched {
        match self {
            Channel::Hue => Touched {
                hue: true,
                ..Touched::default()
            },
            Channel::Saturation => Touched {
                saturation: true,
                ..Touched::default()
            },
            Channel::Value => Touched {
                value: true,
                ..Touched::default()
            },
            Channel::Alpha => Touched {
                alpha: true,
                ..Touched::default()
            },
            Channel::HslSaturation | Channel::Lightness => Touched {
                saturation: true,
                value: true,
                ..Touched::default()
            },
            Channel::Red | Channel::Green | Channel::Blue => Touched {
                hue: true,
                saturation: true,
                value: true,
                alpha: false,
            },
        }
    }

    /// The channel's current position in [0, 1].
    pub fn fraction(self, color: &Hsva) -> f64 {
        self.fraction_in(color, &color.to_hsl())
    }

    /// [`Channel::fraction`] with the HSL channels read from `hsl`, a view of
    /// `color` that may carry a held saturation at black or white.
    pub fn fraction_in(self, color: &Hsva, hsl: &Hsl) -> f64 {
        match self {
            Channel::Hue => color.hue / 360.0,
            Channel::Saturation => color.saturation,
            Channel::Value => color.value,
            Channel::Alpha => color.alpha,
            Channel::HslSaturation => hsl.saturation,
            Channel::Lightness => hsl.lightness,
            Channel::Red => color.to_rgb().r,
            Channel::Green => color.to_rgb().g,
            Channel::Blue => color.to_rgb().b,
        }
    }

    /// Returns `color` with this channel set to fraction `t`.
    ///
    /// `t` is clamped to [0, 1]; for hue, 1 wraps around to 0.
    pub fn with_fraction(self, color: Hsva, t: f64) -> Hsva {
        self.with_fraction_in(color, color.to_hsl_held(), t)
    }

    /// [`Channel::with_fraction`] with HSL edits starting from `hsl`.
    pub fn with_fraction_in(self, color: Hsva, hsl: Hsl, t: f64) -> Hsva {
        let t = unit_fraction(t);
        match self {
            Channel::Hue => Hsva {
                hue: normalize_hue(t * 360.0),
                ..color
            },
            Channel::Saturation => Hsva {
                saturation: t,
                ..color
            },
            Channel::Value => Hsva { value: t, ..color },
            Channel::Alpha => Hsva { alpha: t, ..color },
            Channel::HslSaturation => color.map_hsl_from(hsl, |hsl| Hsl {
                saturation: t,
                ..hsl
            }),
            Channel::Lightness => color.map_hsl_from(hsl, |hsl| Hsl {
                lightness: t,
                ..hsl
            }),
            Channel::Red => color.map_rgb(|rgb| Rgb { r: t, ..rgb }),
            Channel::Green => color.map_rgb(|rgb| Rgb { g: t, ..rgb }),
            Channel::Blue => color.map_rgb(|rgb| Rgb { b: t, ..rgb }),
        }
    }

    /// The channel's value on its [`Channel::input_range`] scale.
    pub fn input_value(self, color: &Hsva) -> f64 {
        let (lo, hi) = self.input_range();
        lo + self.fraction(color) * (hi - lo)
    }

    /// Returns `color` with this channel set from a value on its input scale,
    /// clamping out-of-range values.
    pub fn with_input_value(self, color: Hsva, value: f64) -> Hsva {
        self.with_fraction(color, self.input_fraction(value))
    }

    /// Converts a value on the input scale to a fraction in [0, 1].
    pub fn input_fraction(self, value: f64) -> f64 {
        let (lo, hi) = self.input_range();
        unit_fraction((value - lo) / (hi - lo))
    }
}

fn unit_fraction(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn from_name_round_trips_every_channel() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_name(channel.name()).unwrap(), channel);
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert!(Channel::from_name("cyan").is_err());
    }

    #[test]
    fn hue_fraction_one_wraps_to_zero() {
        let c = Channel::Hue.with_fraction(Hsva::WHITE, 1.0);
        assert_eq!(c.hue, 0.0);
    }

    #[test]
    fn red_edit_leaves_other_rgb_channels_alone() {
        let c = Hsva::from_rgba8(Rgba8::new(10, 200, 30, 77));
        let edited = Channel::Red.with_fraction(c, 1.0);
        assert_eq!(edited.to_rgba8(), Rgba8::new(255, 200, 30, 77));
    }

    #[test]
    fn lightness_edit_keeps_hue() {
        let c = Hsva::new(200.0, 0.5, 0.5, 1.0);
        let edited = Channel::Lightness.with_fraction(c, 0.9);
        assert!((edited.hue - 200.0).abs() < EPSILON);
        assert!((edited.to_hsl().lightness - 0.9).abs() < EPSILON);
    }

    #[test]
    fn lightness_round_trip_through_black_keeps_chroma() {
        let c = Hsva::new(200.0, 0.8, 0.8, 1.0);
        let black = Channel::Lightness.with_fraction(c, 0.0);
        assert_eq!(black.value, 0.0);
        let back = Channel::Lightness.with_fraction(black, c.to_hsl().lightness);
        assert!(back.saturation > 0.5);
        assert!((back.hue - 200.0).abs() < EPSILON);
    }

    #[test]
    fn held_hsl_start_survives_white() {
        let c = Hsva::new(200.0, 0.8, 0.8, 1.0);
        let start = c.to_hsl();
        let white = Channel::Lightness.with_fraction(c, 1.0);
        assert_eq!(white.to_rgba8(), Rgba8::opaque(255, 255, 255));
        let held = Hsl {
            lightness: 1.0,
            ..start
        };
        let back = Channel::Lightness.with_fraction_in(white, held, start.lightness);
        assert!((back.saturation - 0.8).abs() < EPSILON);
        assert!((back.value - 0.8).abs() < EPSILON);
    }

    #[test]
    fn input_fraction_scales_and_clamps() {
        assert_eq!(Channel::Red.input_fraction(51.0), 0.2);
        assert_eq!(Channel::Hue.input_fraction(-10.0), 0.0);
        assert_eq!(Channel::Lightness.input_fraction(250.0), 1.0);
        assert_eq!(Channel::Value.input_fraction(f64::NAN), 0.0);
    }

    #[test]
    fn input_value_clamps_above_range() {
        let c = Channel::Green.with_input_value(Hsva::new(0.0, 0.0, 0.0, 1.0), 300.0);
        assert_eq!(c.to_rgba8().g, 255);
    }

    #[test]
    fn percent_channels_use_hundred_scale() {
        let c = Channel::Saturation.with_input_value(Hsva::WHITE, 25.0);
        assert!((c.saturation - 0.25).abs() < EPSILON);
        assert!((Channel::Saturation.input_value(&c) - 25.0).abs() < EPSILON);
    }

    #[test]
    fn hue_input_of_360_wraps() {
        let c = Channel::Hue.with_input_value(Hsva::new(90.0, 1.0, 1.0, 1.0), 360.0);
        assert_eq!(c.hue, 0.0);
    }

    #[test]
    fn rgb_channels_touch_hsv_but_not_alpha() {
        let t = Channel::Blue.touched();
        assert!(t.hue && t.saturation && t.value);
        assert!(!t.alpha);
    }
}
