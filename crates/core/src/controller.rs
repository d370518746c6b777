//! The picker controller: owns the live color and the hex text buffer.
//!
//! Every edit is atomic. A successful edit recomputes the derived views,
//! reformats the hex buffer (unless the edit came from that buffer, so the
//! user's keystrokes are not overwritten) and then notifies listeners, in
//! that order. A rejected edit changes nothing and notifies nobody.

use std::fmt;

use crate::channel::Channel;
use crate::color::{clamp_unit, Hsl, Hsva, Rgba8};
use crate::config::PickerConfig;
use crate::geometry::{self, Position};
use crate::hex;
use crate::label::{self, ChannelLabel};
use crate::surface::Surface;

/// Where an edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSource {
    Geometry(Surface),
    Hex,
    Channel(Channel),
    /// A color supplied by the host application.
    External,
}

/// Representations recomputed from the canonical color after each edit.
///
/// At black and white the HSL saturation is undefined. There `hsl` keeps the
/// saturation of the last interactive edit, so a lightness drag through
/// either end comes back with its chroma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedViews {
    pub rgba: Rgba8,
    pub hsl: Hsl,
}

impl DerivedViews {
    fn of(color: Hsva, held_saturation: Option<f64>) -> Self {
        let mut hsl = color.to_hsl();
        if hsl.lightness <= 0.0 || hsl.lightness >= 1.0 {
            if let Some(saturation) = held_saturation {
                hsl.saturation = clamp_unit(saturation);
            }
        }
        Self {
            rgba: color.to_rgba8(),
            hsl,
        }
    }
}

type ColorListener = Box<dyn FnMut(Rgba8)>;
type HsvaListener = Box<dyn FnMut(Hsva)>;

/// Stateful picker. Independent instances share nothing.
pub struct PickerController {
    config: PickerConfig,
    color: Hsva,
    views: DerivedViews,
    hex_buffer: String,
    color_listeners: Vec<ColorListener>,
    hsva_listeners: Vec<HsvaListener>,
}

impl fmt::Debug for PickerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerController")
            .field("config", &self.config)
            .field("color", &self.color)
            .field("hex_buffer", &self.hex_buffer)
            .field("listeners", &(self.color_listeners.len() + self.hsva_listeners.len()))
            .finish()
    }
}

impl PickerController {
    /// Creates a controller holding `initial`. With alpha disabled the color
    /// is made opaque.
    pub fn new(config: PickerConfig, initial: Hsva) -> Self {
        let color = gate_alpha(&config, initial.clamp());
        Self {
            config,
            color,
            views: DerivedViews::of(color, None),
            hex_buffer: hex::format(color, config.enable_alpha),
            color_listeners: Vec::new(),
            hsva_listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn color(&self) -> Hsva {
        self.color
    }

    pub fn views(&self) -> DerivedViews {
        self.views
    }

    pub fn rgba(&self) -> Rgba8 {
        self.views.rgba
    }

    pub fn hsl(&self) -> Hsl {
        self.views.hsl
    }

    /// The hex text field contents, possibly a partial edit.
    pub fn hex_buffer(&self) -> &str {
        &self.hex_buffer
    }

    /// Registers a callback for the plain 8-bit color on every change.
    pub fn on_color_changed(&mut self, listener: impl FnMut(Rgba8) + 'static) {
        self.color_listeners.push(Box::new(listener));
    }

    /// Registers a callback for the canonical HSVA color on every change.
    pub fn on_hsva_changed(&mut self, listener: impl FnMut(Hsva) + 'static) {
        self.hsva_listeners.push(Box::new(listener));
    }

    /// Where to draw the marker on `surface` for the current color.
    pub fn marker_position(&self, surface: Surface) -> Position {
        geometry::color_to_position_in(surface, &self.color, &self.views.hsl)
    }

    /// Displayable channel strings for the configured color model.
    pub fn channel_labels(&self) -> Vec<ChannelLabel> {
        label::channel_labels(&self.color, self.config.color_model, self.config.enable_alpha)
    }

    /// Applies a pointer position on `surface`. Only the channels the surface
    /// declares change.
    ///
    /// Returns `None` for the alpha track when alpha is disabled.
    pub fn apply_geometry_input(&mut self, surface: Surface, position: Position) -> Option<Hsva> {
        if surface.is_alpha() && !self.config.enable_alpha {
            log::trace!("ignoring alpha track input, alpha disabled");
            return None;
        }
        let update = geometry::position_to_update_in(surface, position, self.color, self.views.hsl);
        let next = update.apply_to(self.color);
        let held = geometry::requested_fraction(surface, position, Channel::HslSaturation)
            .unwrap_or(self.views.hsl.saturation);
        Some(self.commit(next, EditSource::Geometry(surface), Some(held)))
    }

    /// Stores `text` in the hex buffer as typed and, if it parses, replaces
    /// the current color with it.
    ///
    /// Returns `None` when `text` is not a complete hex color; the color and
    /// listeners are then left untouched.
    pub fn apply_hex_input(&mut self, text: &str) -> Option<Hsva> {
        self.hex_buffer = text.to_string();
        match hex::parse(text, self.config.enable_alpha) {
            Some(color) => Some(self.commit(color, EditSource::Hex, None)),
            None => {
                log::trace!("hex input {text:?} rejected, keeping {}", self.views.rgba.to_hex());
                None
            }
        }
    }

    /// [`PickerController::apply_hex_input`] after running the keystroke filter.
    pub fn apply_filtered_hex_input(&mut self, text: &str) -> Option<Hsva> {
        let filtered = hex::sanitize_hex_input(text, self.config.enable_alpha);
        self.apply_hex_input(&filtered)
    }

    /// Applies a typed numeric value to one channel, e.g. `"128"` for red.
    ///
    /// The value is clamped to [`Channel::input_range`]. Returns `None` for
    /// non-numeric text, or for alpha when alpha is disabled.
    pub fn apply_channel_input(&mut self, channel: Channel, raw: &str) -> Option<Hsva> {
        if channel == Channel::Alpha && !self.config.enable_alpha {
            log::trace!("ignoring alpha channel input, alpha disabled");
            return None;
        }
        let Some(value) = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()) else {
            log::trace!("{} input {raw:?} is not a number", channel.name());
            return None;
        };
        let t = channel.input_fraction(value);
        let next = channel.with_fraction_in(self.color, self.views.hsl, t);
        let held = if channel == Channel::HslSaturation {
            t
        } else {
            self.views.hsl.saturation
        };
        Some(self.commit(next, EditSource::Channel(channel), Some(held)))
    }

    /// Replaces the color with one supplied by the host.
    pub fn set_color(&mut self, color: Hsva) -> Hsva {
        self.commit(color, EditSource::External, None)
    }

    /// Overwrites the hex buffer with the current color, discarding any
    /// partial edit. Hosts call this when the text field loses focus.
    pub fn resync_hex_buffer(&mut self) {
        self.hex_buffer = hex::format(self.color, self.config.enable_alpha);
    }

    fn commit(&mut self, next: Hsva, source: EditSource, held_saturation: Option<f64>) -> Hsva {
        let next = gate_alpha(&self.config, next.clamp());
        debug_assert!(next.is_valid(), "color invariant violated: {next:?}");

        self.color = next;
        self.views = DerivedViews::of(next, held_saturation);
        if source != EditSource::Hex {
            self.hex_buffer = hex::format(next, self.config.enable_alpha);
        }
        log::debug!("{source:?} -> {}", self.views.rgba.to_hex());

        let rgba = self.views.rgba;
        for listener in &mut self.color_listeners {
            listener(rgba);
        }
        for listener in &mut self.hsva_listeners {
            listener(next);
        }
        next
    }
}

fn gate_alpha(config: &PickerConfig, color: Hsva) -> Hsva {
    if config.enable_alpha {
        color
    } else {
        color.with_alpha(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorModelKind, PaletteType};
    use crate::surface::AreaKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPSILON: f64 = 1e-9;

    fn controller(enable_alpha: bool) -> PickerController {
        let config = PickerConfig {
            enable_alpha,
            ..PickerConfig::default()
        };
        PickerController::new(config, Hsva::from_rgba8(Rgba8::opaque(0x33, 0x66, 0x99)))
    }

    fn record(picker: &mut PickerController) -> Rc<RefCell<Vec<Rgba8>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        picker.on_color_changed(move |c| sink.borrow_mut().push(c));
        seen
    }

    // -- Construction --

    #[test]
    fn new_formats_hex_buffer() {
        assert_eq!(controller(false).hex_buffer(), "336699");
        assert_eq!(controller(true).hex_buffer(), "FF336699");
    }

    #[test]
    fn new_forces_opacity_when_alpha_disabled() {
        let config = PickerConfig {
            enable_alpha: false,
            ..PickerConfig::default()
        };
        let picker = PickerController::new(config, Hsva::new(10.0, 0.5, 0.5, 0.2));
        assert_eq!(picker.color().alpha, 1.0);
    }

    // -- Geometry --

    #[test]
    fn geometry_input_updates_declared_channels_only() {
        let mut picker = controller(true);
        let before = picker.color();
        let after = picker
            .apply_geometry_input(Surface::SV_AREA, Position::new(0.25, 0.5))
            .unwrap();
        assert!((after.hue - before.hue).abs() < EPSILON);
        assert_eq!(after.alpha, before.alpha);
        assert!((after.saturation - 0.25).abs() < EPSILON);
        assert!((after.value - 0.5).abs() < EPSILON);
    }

    #[test]
    fn geometry_input_reformats_hex_and_notifies() {
        let mut picker = controller(false);
        let seen = record(&mut picker);
        picker.apply_geometry_input(Surface::SV_AREA, Position::new(0.0, 0.0));
        assert_eq!(picker.hex_buffer(), "FFFFFF");
        assert_eq!(*seen.borrow(), vec![Rgba8::opaque(255, 255, 255)]);
    }

    #[test]
    fn alpha_track_is_ignored_when_alpha_disabled() {
        let mut picker = controller(false);
        let seen = record(&mut picker);
        let result = picker.apply_geometry_input(Surface::Track(Channel::Alpha), Position::new(0.0, 0.5));
        assert!(result.is_none());
        assert_eq!(picker.color().alpha, 1.0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn achromatic_round_trip_through_sv_area_keeps_hue() {
        let mut picker = controller(true);
        let hue = picker.color().hue;
        for x in [0.0, 0.6, 0.0, 0.9] {
            let c = picker
                .apply_geometry_input(Surface::SV_AREA, Position::new(x, 0.3))
                .unwrap();
            assert!((c.hue - hue).abs() < EPSILON);
        }
    }

    #[test]
    fn marker_follows_color() {
        let mut picker = controller(true);
        picker.apply_geometry_input(Surface::SV_AREA, Position::new(0.2, 0.7));
        let p = picker.marker_position(Surface::SV_AREA);
        assert!((p.x - 0.2).abs() < EPSILON);
        assert!((p.y - 0.7).abs() < EPSILON);
    }

    fn hsl_picker() -> PickerController {
        let config = PickerConfig {
            enable_alpha: false,
            color_model: ColorModelKind::Hsl,
            palette_type: PaletteType::HslWithLightness,
        };
        PickerController::new(config, Hsva::new(200.0, 0.8, 0.8, 1.0))
    }

    #[test]
    fn lightness_drag_through_either_end_keeps_chroma() {
        for end in [0.0, 1.0] {
            let mut picker = hsl_picker();
            let track = Surface::Track(Channel::Lightness);
            let before = picker.color();
            let start = picker.marker_position(track);
            picker.apply_geometry_input(track, Position::new(end, 0.5)).unwrap();
            let after = picker.apply_geometry_input(track, start).unwrap();
            assert!((after.saturation - before.saturation).abs() < EPSILON, "via {end}");
            assert!((after.value - before.value).abs() < EPSILON, "via {end}");
            assert!((picker.hsl().saturation - before.to_hsl().saturation).abs() < EPSILON);
            assert_eq!(picker.rgba(), before.to_rgba8());
        }
    }

    #[test]
    fn hsl_area_marker_holds_saturation_at_white() {
        let mut picker = hsl_picker();
        let area = Surface::Area(AreaKind::HslSaturationLightness);
        let before = picker.marker_position(area);
        picker.apply_geometry_input(area, Position::new(before.x, 0.0)).unwrap();
        assert_eq!(picker.rgba(), Rgba8::opaque(255, 255, 255));
        assert!((picker.marker_position(area).x - before.x).abs() < EPSILON);
    }

    #[test]
    fn saturation_set_at_white_applies_when_leaving_it() {
        let mut picker = hsl_picker();
        picker.apply_channel_input(Channel::Lightness, "100").unwrap();
        picker.apply_channel_input(Channel::HslSaturation, "25").unwrap();
        assert_eq!(picker.rgba(), Rgba8::opaque(255, 255, 255));
        picker.apply_channel_input(Channel::Lightness, "50").unwrap();
        assert!((picker.hsl().saturation - 0.25).abs() < EPSILON);
        assert!((picker.hsl().lightness - 0.5).abs() < EPSILON);
    }

    #[test]
    fn hex_white_does_not_hold_saturation() {
        let mut picker = hsl_picker();
        picker.apply_hex_input("FFFFFF").unwrap();
        assert_eq!(picker.hsl().saturation, 0.0);
    }

    // -- Hex --

    #[test]
    fn hex_input_replaces_color_and_keeps_buffer_as_typed() {
        let mut picker = controller(true);
        let seen = record(&mut picker);
        let c = picker.apply_hex_input("#f00").unwrap();
        assert_eq!(c.to_rgba8(), Rgba8::opaque(255, 0, 0));
        assert_eq!(picker.hex_buffer(), "#f00");
        assert_eq!(*seen.borrow(), vec![Rgba8::opaque(255, 0, 0)]);
    }

    #[test]
    fn rejected_hex_changes_nothing_and_notifies_nobody() {
        let mut picker = controller(true);
        let seen = record(&mut picker);
        let hsva_seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hsva_seen);
        picker.on_hsva_changed(move |_| *sink.borrow_mut() += 1);
        let before = picker.color();

        for partial in ["", "#", "#3", "#33", "#3366", "#33669", "#GG6699"] {
            assert!(picker.apply_hex_input(partial).is_none());
            assert_eq!(picker.hex_buffer(), partial);
        }
        assert_eq!(picker.color(), before);
        assert!(seen.borrow().is_empty());
        assert_eq!(*hsva_seen.borrow(), 0);
    }

    #[test]
    fn resync_restores_buffer_after_abandoned_edit() {
        let mut picker = controller(false);
        picker.apply_hex_input("12");
        picker.resync_hex_buffer();
        assert_eq!(picker.hex_buffer(), "336699");
    }

    #[test]
    fn hex_alpha_is_discarded_when_disabled() {
        let mut picker = controller(false);
        let c = picker.apply_hex_input("80FF0000").unwrap();
        assert_eq!(c.alpha, 1.0);
        assert_eq!(picker.rgba(), Rgba8::opaque(255, 0, 0));
    }

    #[test]
    fn hex_alpha_is_kept_when_enabled() {
        let mut picker = controller(true);
        picker.apply_hex_input("80FF0000").unwrap();
        assert_eq!(picker.rgba(), Rgba8::new(255, 0, 0, 0x80));
    }

    #[test]
    fn filtered_hex_input_strips_junk() {
        let mut picker = controller(false);
        let c = picker.apply_filtered_hex_input("#00 ff 00").unwrap();
        assert_eq!(c.to_rgba8(), Rgba8::opaque(0, 255, 0));
        assert_eq!(picker.hex_buffer(), "#00ff00");
    }

    // -- Channels --

    #[test]
    fn channel_input_updates_one_channel() {
        let mut picker = controller(true);
        let c = picker.apply_channel_input(Channel::Red, " 128 ").unwrap();
        assert_eq!(c.to_rgba8(), Rgba8::opaque(128, 0x66, 0x99));
        assert_eq!(picker.hex_buffer(), "FF806699");
    }

    #[test]
    fn channel_input_clamps_out_of_range() {
        let mut picker = controller(true);
        picker.apply_channel_input(Channel::Blue, "999");
        assert_eq!(picker.rgba().b, 255);
        picker.apply_channel_input(Channel::Value, "-5");
        assert_eq!(picker.color().value, 0.0);
    }

    #[test]
    fn channel_input_accepts_floats() {
        let mut picker = controller(true);
        let c = picker.apply_channel_input(Channel::Hue, "90.5").unwrap();
        assert!((c.hue - 90.5).abs() < EPSILON);
    }

    #[test]
    fn non_numeric_channel_input_is_rejected() {
        let mut picker = controller(true);
        let seen = record(&mut picker);
        let before = picker.color();
        for raw in ["", "abc", "12px", "NaN", "inf"] {
            assert!(picker.apply_channel_input(Channel::Green, raw).is_none());
        }
        assert_eq!(picker.color(), before);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn alpha_channel_input_is_ignored_when_disabled() {
        let mut picker = controller(false);
        assert!(picker.apply_channel_input(Channel::Alpha, "10").is_none());
        assert_eq!(picker.rgba().a, 255);
    }

    // -- Ordering and views --

    #[test]
    fn later_edits_win() {
        let mut picker = controller(true);
        picker.apply_channel_input(Channel::Red, "10");
        picker.apply_geometry_input(Surface::Track(Channel::Red), Position::new(1.0, 0.5));
        assert_eq!(picker.rgba().r, 255);
        picker.apply_channel_input(Channel::Red, "20");
        assert_eq!(picker.rgba().r, 20);
    }

    #[test]
    fn listeners_see_updated_views() {
        let mut picker = controller(true);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        picker.on_hsva_changed(move |c| sink.borrow_mut().push(c));
        let c = picker.set_color(Hsva::new(120.0, 1.0, 1.0, 1.0));
        assert_eq!(*seen.borrow(), vec![c]);
        assert_eq!(picker.views().rgba, Rgba8::opaque(0, 255, 0));
        assert!((picker.hsl().lightness - 0.5).abs() < EPSILON);
    }

    #[test]
    fn labels_follow_config() {
        let config = PickerConfig {
            enable_alpha: false,
            color_model: ColorModelKind::Hsv,
            palette_type: PaletteType::HueWheel,
        };
        let picker = PickerController::new(config, Hsva::new(200.0, 0.5, 1.0, 1.0));
        let texts: Vec<String> = picker.channel_labels().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["200°", "50%", "100%"]);
    }

    #[test]
    fn instances_are_independent() {
        let mut a = controller(true);
        let b = controller(true);
        a.apply_hex_input("000").unwrap();
        assert_eq!(b.rgba(), Rgba8::opaque(0x33, 0x66, 0x99));
    }
}
