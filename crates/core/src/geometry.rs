//! Pointer geometry: normalized positions to color updates and back.
//!
//! Positions are normalized to the surface's bounding box, `(0, 0)` at the
//! top-left and `(1, 1)` at the bottom-right. Every surface is dispatched from
//! [`position_to_update`] and inverted by [`color_to_position`].
//!
//! Hue wheel convention: hue 0 points right (3 o'clock) and increases
//! clockwise as seen on screen, since `y` grows downward. The wheel's radius is
//! half the bounding box, so the rim touches the box edges.

use glam::DVec2;

use crate::channel::{Channel, Touched};
use crate::color::{normalize_hue, Hsl, Hsva, Rgb};
use crate::surface::{AreaKind, Surface};

const WHEEL_CENTER: DVec2 = DVec2::new(0.5, 0.5);
const WHEEL_RADIUS: f64 = 0.5;

/// Distance from the wheel center below which hue is indeterminate.
const WHEEL_DEAD_ZONE: f64 = 1e-12;

/// A pointer position normalized to a surface's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const CENTER: Position = Position { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Normalizes local pixel coordinates against a `width` x `height` box.
    ///
    /// A box with no area maps every point to its center.
    pub fn from_local(px: f64, py: f64, width: f64, height: f64) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Position::CENTER;
        }
        Position::new(px / width, py / height)
    }

    /// Normalizes local pixel coordinates for a wheel inscribed in a
    /// `width` x `height` box, so the wheel stays round in non-square boxes.
    ///
    /// A zero-radius wheel maps every point to its center.
    pub fn from_local_disc(px: f64, py: f64, width: f64, height: f64) -> Self {
        let radius = width.min(height) / 2.0;
        if !(radius > 0.0) {
            return Position::CENTER;
        }
        let offset = (DVec2::new(px, py) - DVec2::new(width, height) / 2.0) / radius;
        Position::from(WHEEL_CENTER + offset * WHEEL_RADIUS)
    }

    /// Clamps both coordinates into [0, 1]. NaN becomes 0.
    pub fn clamped(self) -> Self {
        let unit = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Position::new(unit(self.x), unit(self.y))
    }

    fn as_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

/// A partial edit of the canonical color: `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorUpdate {
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub value: Option<f64>,
    pub alpha: Option<f64>,
}

impl ColorUpdate {
    /// Takes the `touched` fields of `color`.
    pub fn from_color(color: Hsva, touched: Touched) -> Self {
        ColorUpdate {
            hue: touched.hue.then_some(color.hue),
            saturation: touched.saturation.then_some(color.saturation),
            value: touched.value.then_some(color.value),
            alpha: touched.alpha.then_some(color.alpha),
        }
    }

    /// Merges this update into `color`, clamping the result.
    pub fn apply_to(self, color: Hsva) -> Hsva {
        Hsva {
            alpha: self.alpha.unwrap_or(color.alpha),
            hue: self.hue.unwrap_or(color.hue),
            saturation: self.saturation.unwrap_or(color.saturation),
            value: self.value.unwrap_or(color.value),
        }
        .clamp()
    }
}

/// Maps a pointer position on `surface` to the channel update it causes.
///
/// Rectangular surfaces clamp the position into the unit square. The wheel
/// clamps the radius instead, so points outside the rim give saturation 1.
pub fn position_to_update(surface: Surface, position: Position, prior: Hsva) -> ColorUpdate {
    position_to_update_in(surface, position, prior, prior.to_hsl_held())
}

/// [`position_to_update`] with HSL surfaces starting from `prior_hsl`, a view
/// of `prior` that may carry a held saturation at black or white.
pub fn position_to_update_in(
    surface: Surface,
    position: Position,
    prior: Hsva,
    prior_hsl: Hsl,
) -> ColorUpdate {
    let next = match surface {
        Surface::Track(channel) => channel.with_fraction_in(prior, prior_hsl, position.clamped().x),
        Surface::Area(area) => area_to_color(area, position.clamped(), prior, prior_hsl),
        Surface::HueWheel => wheel_to_color(position, prior),
    };
    ColorUpdate::from_color(next, surface.touched())
}

/// The fraction `position` asks for on `channel`, when `channel` is one of
/// `surface`'s axes.
pub fn requested_fraction(surface: Surface, position: Position, channel: Channel) -> Option<f64> {
    let p = position.clamped();
    match surface {
        Surface::Track(c) if c == channel => Some(p.x),
        Surface::Area(area) => match area.axes() {
            (x, _) if x == channel => Some(p.x),
            (_, y) if y == channel => Some(1.0 - p.y),
            _ => None,
        },
        _ => None,
    }
}

/// [`position_to_update`] merged into `prior`.
pub fn position_to_color(surface: Surface, position: Position, prior: Hsva) -> Hsva {
    position_to_update(surface, position, prior).apply_to(prior)
}

/// Where the position marker for `color` sits on `surface`.
///
/// Tracks are horizontal, so their marker is vertically centered.
pub fn color_to_position(surface: Surface, color: &Hsva) -> Position {
    color_to_position_in(surface, color, &color.to_hsl())
}

/// [`color_to_position`] with HSL axes read from `hsl`.
pub fn color_to_position_in(surface: Surface, color: &Hsva, hsl: &Hsl) -> Position {
    match surface {
        Surface::Track(channel) => Position::new(channel.fraction_in(color, hsl), 0.5),
        Surface::Area(area) => {
            let (x, y) = area.axes();
            Position::new(x.fraction_in(color, hsl), 1.0 - y.fraction_in(color, hsl))
        }
        Surface::HueWheel => wheel_position(color),
    }
}

fn hue_at(t: f64) -> f64 {
    normalize_hue(t * 360.0)
}

fn area_to_color(area: AreaKind, position: Position, prior: Hsva, prior_hsl: Hsl) -> Hsva {
    let (tx, ty) = (position.x, 1.0 - position.y);
    match area {
        AreaKind::SaturationValue => Hsva {
            saturation: tx,
            value: ty,
            ..prior
        },
        AreaKind::HueSaturation => Hsva {
            hue: hue_at(tx),
            saturation: ty,
            ..prior
        },
        AreaKind::HueValue => Hsva {
            hue: hue_at(tx),
            value: ty,
            ..prior
        },
        AreaKind::HslSaturationLightness => prior.map_hsl_from(prior_hsl, |hsl| Hsl {
            saturation: tx,
            lightness: ty,
            ..hsl
        }),
        AreaKind::HueHslSaturation => prior.map_hsl_from(prior_hsl, |hsl| Hsl {
            hue: hue_at(tx),
            saturation: ty,
            ..hsl
        }),
        AreaKind::HueLightness => prior.map_hsl_from(prior_hsl, |hsl| Hsl {
            hue: hue_at(tx),
            lightness: ty,
            ..hsl
        }),
        AreaKind::RedGreen => prior.map_rgb(|rgb| Rgb { r: tx, g: ty, ..rgb }),
        AreaKind::RedBlue => prior.map_rgb(|rgb| Rgb { r: tx, b: ty, ..rgb }),
        AreaKind::GreenBlue => prior.map_rgb(|rgb| Rgb { g: tx, b: ty, ..rgb }),
    }
}

fn wheel_to_color(position: Position, prior: Hsva) -> Hsva {
    let position = if position.x.is_finite() && position.y.is_finite() {
        position
    } else {
        Position::CENTER
    };
    let offset = (position.as_vec() - WHEEL_CENTER) / WHEEL_RADIUS;
    let radius = offset.length();
    if radius <= WHEEL_DEAD_ZONE {
        // hue is indeterminate at the center; keep the previous one
        return Hsva {
            saturation: 0.0,
            ..prior
        };
    }
    Hsva {
        hue: normalize_hue(offset.y.atan2(offset.x).to_degrees()),
        saturation: radius.min(1.0),
        ..prior
    }
}

fn wheel_position(color: &Hsva) -> Position {
    let angle = color.hue.to_radians();
    let direction = DVec2::new(angle.cos(), angle.sin());
    Position::from(WHEEL_CENTER + direction * color.saturation * WHEEL_RADIUS)
}
