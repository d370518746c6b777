//! Line-oriented edit scripts for `color-picker session`.
//!
//! One command per line, blank lines and `#` comments ignored:
//!
//! ```text
//! hex <text>                        raw hex buffer edit
//! type <text>                       hex edit through the keystroke filter
//! channel <name> <value>            discrete channel entry
//! point <surface> <x> <y>           normalized pointer position
//! pixel <surface> <px> <py> <w> <h> local pixel position in a w x h box
//! blur                              hex field lost focus
//! show                              print the current state
//! history                           print every emitted color
//! ```

use color_picker_core::{Channel, Position, Surface};

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Hex(String),
    Type(String),
    Channel(Channel, String),
    Point(Surface, Position),
    Blur,
    Show,
    History,
}

/// Parses one script line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, CliError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        // the hex text is taken verbatim so partial or padded input reaches the codec
        "hex" => SessionCommand::Hex(rest.trim_start().to_string()),
        "type" => SessionCommand::Type(rest.trim_start().to_string()),
        "channel" => {
            let [name, value] = expect_args::<2>(verb, &args)?;
            SessionCommand::Channel(Channel::from_name(name)?, value.to_string())
        }
        "point" => {
            let [surface, x, y] = expect_args::<3>(verb, &args)?;
            let position = Position::new(number(x)?, number(y)?);
            SessionCommand::Point(Surface::from_name(surface)?, position)
        }
        "pixel" => {
            let [surface, px, py, w, h] = expect_args::<5>(verb, &args)?;
            let surface = Surface::from_name(surface)?;
            let (px, py, w, h) = (number(px)?, number(py)?, number(w)?, number(h)?);
            let position = if surface == Surface::HueWheel {
                Position::from_local_disc(px, py, w, h)
            } else {
                Position::from_local(px, py, w, h)
            };
            SessionCommand::Point(surface, position)
        }
        "blur" => SessionCommand::Blur,
        "show" => SessionCommand::Show,
        "history" => SessionCommand::History,
        other => return Err(CliError::Input(format!("unknown session command: {other}"))),
    };
    Ok(Some(command))
}

fn expect_args<'a, const N: usize>(verb: &str, args: &[&'a str]) -> Result<[&'a str; N], CliError> {
    <[&str; N]>::try_from(args).map_err(|_| {
        CliError::Input(format!("{verb} expects {N} arguments, got {}", args.len()))
    })
}

fn number(text: &str) -> Result<f64, CliError> {
    text.parse()
        .map_err(|_| CliError::Input(format!("not a number: {text}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# drag the hue").unwrap(), None);
    }

    #[test]
    fn hex_keeps_text_verbatim() {
        assert_eq!(
            parse_line("hex #ff0").unwrap(),
            Some(SessionCommand::Hex("#ff0".into()))
        );
        assert_eq!(parse_line("hex").unwrap(), Some(SessionCommand::Hex(String::new())));
    }

    #[test]
    fn channel_parses_name_and_raw_value() {
        assert_eq!(
            parse_line("channel red 128").unwrap(),
            Some(SessionCommand::Channel(Channel::Red, "128".into()))
        );
    }

    #[test]
    fn point_parses_surface_and_coordinates() {
        assert_eq!(
            parse_line("point sv-area 0.25 0.75").unwrap(),
            Some(SessionCommand::Point(Surface::SV_AREA, Position::new(0.25, 0.75)))
        );
    }

    #[test]
    fn pixel_normalizes_against_box() {
        assert_eq!(
            parse_line("pixel hue-track 50 5 200 10").unwrap(),
            Some(SessionCommand::Point(
                Surface::Track(Channel::Hue),
                Position::new(0.25, 0.5)
            ))
        );
    }

    #[test]
    fn bad_lines_are_input_errors() {
        for line in ["jump 1 2", "channel red", "point sv-area x 0.5", "point blob 0 0"] {
            assert!(parse_line(line).is_err(), "expected {line:?} to fail");
        }
        assert_eq!(parse_line("channel red").unwrap_err().exit_code(), 12);
        assert_eq!(parse_line("point blob 0 0").unwrap_err().exit_code(), 10);
    }
}
