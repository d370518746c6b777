//! Displayable channel strings for the active color model.

use serde::Serialize;

use crate::channel::Channel;
use crate::color::Hsva;
use crate::config::ColorModelKind;

/// One channel's label and formatted value, e.g. `("H", "210°")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelLabel {
    pub channel: &'static str,
    pub label: &'static str,
    pub text: String,
}

/// Formats a channel for display: bytes for RGB and alpha, degrees for hue,
/// whole percentages for the rest.
pub fn format_channel(channel: Channel, color: &Hsva) -> String {
    let rgba = color.to_rgba8();
    match channel {
        Channel::Red => rgba.r.to_string(),
        Channel::Green => rgba.g.to_string(),
        Channel::Blue => rgba.b.to_string(),
        Channel::Alpha => rgba.a.to_string(),
        // 359.6 would round up to the wrapped-away 360
        Channel::Hue => format!("{}°", (color.hue.round() as u32) % 360),
        Channel::Saturation | Channel::Value | Channel::HslSaturation | Channel::Lightness => {
            format!("{:.0}%", channel.input_value(color))
        }
    }
}

/// Labels for the model's three channels, plus alpha when enabled.
pub fn channel_labels(color: &Hsva, model: ColorModelKind, enable_alpha: bool) -> Vec<ChannelLabel> {
    let alpha = enable_alpha.then_some(Channel::Alpha);
    model
        .channels()
        .into_iter()
        .chain(alpha)
        .map(|channel| ChannelLabel {
            channel: channel.name(),
            label: channel.short_label(),
            text: format_channel(channel, color),
        })
        .collect()
}
