#![deny(unsafe_code)]
//! CLI binary for the color picker engine.
//!
//! Subcommands:
//! - `convert <color>`: show a hex color as RGBA, HSV, HSL and hex
//! - `pick <surface> <x> <y>`: apply a normalized pointer position to a color
//! - `marker <surface> <color>`: where a color's marker sits on a surface
//! - `surfaces`: surfaces active under a configuration
//! - `list`: palettes, color models, surfaces and channels
//! - `session`: replay edit commands from stdin against one picker

mod error;
mod session;

use clap::{ArgAction, Parser, Subcommand};
use color_picker_core::{
    geometry, hex, Channel, ColorModelKind, Hsva, PaletteType, PickerConfig,
    PickerController, Position, Rgba8, Surface,
};
use error::CliError;
use serde_json::{json, Value};
use session::SessionCommand;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::process;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "color-picker", about = "Interactive color picker engine CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log to stderr; repeat for more detail.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a hex color in every representation.
    Convert {
        /// Hex color: RGB, RRGGBB or AARRGGBB, optional leading '#'.
        color: String,
    },
    /// Apply a pointer position on a surface to a color.
    Pick {
        /// Surface name (e.g. "sv-area", "hue-track", "hue-wheel").
        surface: String,

        /// Normalized x, 0 at the left edge.
        #[arg(allow_hyphen_values = true)]
        x: f64,

        /// Normalized y, 0 at the top edge.
        #[arg(allow_hyphen_values = true)]
        y: f64,

        /// Starting color.
        #[arg(short, long, default_value = "FFFFFFFF")]
        color: String,
    },
    /// Print the marker position of a color on a surface.
    Marker {
        /// Surface name.
        surface: String,

        /// Hex color.
        color: String,
    },
    /// List the surfaces active under a configuration.
    Surfaces {
        /// Picker configuration as a JSON string.
        #[arg(long, default_value = "{}")]
        config: String,
    },
    /// List palettes, color models, surfaces and channels.
    List,
    /// Read edit commands from stdin and apply them to one picker.
    Session {
        /// Picker configuration as a JSON string.
        #[arg(long, default_value = "{}")]
        config: String,

        /// Initial color.
        #[arg(short, long, default_value = "FFFFFF")]
        color: String,
    },
}

fn parse_color(text: &str) -> Result<Hsva, CliError> {
    Ok(Rgba8::from_hex(text)?.into())
}

fn parse_config(text: &str) -> Result<PickerConfig, CliError> {
    let params: Value = serde_json::from_str(text)
        .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
    Ok(PickerConfig::from_json(&params)?)
}

fn color_report(color: Hsva) -> Value {
    json!({
        "hex": hex::format(color, true),
        "rgba": color.to_rgba8(),
        "hsv": color,
        "hsl": color.to_hsl(),
    })
}

fn print_color(color: Hsva) {
    let rgba = color.to_rgba8();
    let hsl = color.to_hsl();
    println!("hex   {}", hex::format(color, true));
    println!("rgba  {} {} {} {}", rgba.r, rgba.g, rgba.b, rgba.a);
    println!(
        "hsv   {:.2} {:.4} {:.4}",
        color.hue, color.saturation, color.value
    );
    println!(
        "hsl   {:.2} {:.4} {:.4}",
        hsl.hue, hsl.saturation, hsl.lightness
    );
}

fn print_value(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_state(
    picker: &PickerController,
    changed: Option<bool>,
    json_mode: bool,
) -> Result<(), CliError> {
    if json_mode {
        let labels = picker.channel_labels();
        let state = json!({
            "changed": changed,
            "hex_buffer": picker.hex_buffer(),
            "color": color_report(picker.color()),
            "labels": labels,
        });
        println!("{}", serde_json::to_string(&state)?);
    } else {
        let status = match changed {
            Some(true) => "changed",
            Some(false) => "unchanged",
            None => "state",
        };
        let labels: Vec<String> = picker
            .channel_labels()
            .into_iter()
            .map(|l| format!("{} {}", l.label, l.text))
            .collect();
        println!(
            "{status:<9} {}  buffer={:?}  {}",
            picker.rgba().to_hex(),
            picker.hex_buffer(),
            labels.join(" ")
        );
    }
    Ok(())
}

fn run_session(config: PickerConfig, initial: Hsva, json_mode: bool) -> Result<(), CliError> {
    let mut picker = PickerController::new(config, initial);
    let history = Rc::new(RefCell::new(Vec::<Rgba8>::new()));
    let sink = Rc::clone(&history);
    picker.on_color_changed(move |c| sink.borrow_mut().push(c));

    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let command = match session::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                log::error!("session line {}: {e}", index + 1);
                return Err(e);
            }
        };

        let changed = match command {
            SessionCommand::Hex(text) => Some(picker.apply_hex_input(&text).is_some()),
            SessionCommand::Type(text) => Some(picker.apply_filtered_hex_input(&text).is_some()),
            SessionCommand::Channel(channel, raw) => {
                Some(picker.apply_channel_input(channel, &raw).is_some())
            }
            SessionCommand::Point(surface, position) => {
                Some(picker.apply_geometry_input(surface, position).is_some())
            }
            SessionCommand::Blur => {
                picker.resync_hex_buffer();
                None
            }
            SessionCommand::Show => None,
            SessionCommand::History => {
                let hexes: Vec<String> = history.borrow().iter().map(|c| c.to_hex()).collect();
                if json_mode {
                    println!("{}", serde_json::to_string(&hexes)?);
                } else {
                    println!("history   {}", hexes.join(" "));
                }
                continue;
            }
        };
        print_state(&picker, changed, json_mode)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Convert { color } => {
            let color = parse_color(&color)?;
            if cli.json {
                print_value(&color_report(color))?;
            } else {
                print_color(color);
            }
        }
        Command::Pick {
            surface,
            x,
            y,
            color,
        } => {
            let surface = Surface::from_name(&surface)?;
            let prior = parse_color(&color)?;
            let next = geometry::position_to_color(surface, Position::new(x, y), prior);
            log::debug!("{} at ({x}, {y}) -> {}", surface.name(), next.to_rgba8().to_hex());
            if cli.json {
                print_value(&color_report(next))?;
            } else {
                print_color(next);
            }
        }
        Command::Marker { surface, color } => {
            let surface = Surface::from_name(&surface)?;
            let color = parse_color(&color)?;
            let p = geometry::color_to_position(surface, &color);
            if cli.json {
                print_value(&json!({"surface": surface.name(), "x": p.x, "y": p.y}))?;
            } else {
                println!("{} {:.6} {:.6}", surface.name(), p.x, p.y);
            }
        }
        Command::Surfaces { config } => {
            let config = parse_config(&config)?;
            let names: Vec<String> = config.surfaces().into_iter().map(Surface::name).collect();
            if cli.json {
                print_value(&json!({"config": config, "surfaces": names}))?;
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Command::List => {
            let palettes = PaletteType::list_names();
            let models = ColorModelKind::list_names();
            let surfaces: Vec<String> = Surface::all().into_iter().map(Surface::name).collect();
            let channels = Channel::list_names();
            if cli.json {
                print_value(&json!({
                    "palettes": palettes,
                    "color_models": models,
                    "surfaces": surfaces,
                    "channels": channels,
                }))?;
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Color models:");
                println!("  {}", models.join(", "));
                println!("Surfaces:");
                for name in surfaces {
                    println!("  {name}");
                }
                println!("Channels:");
                println!("  {}", channels.join(", "));
            }
        }
        Command::Session { config, color } => {
            let config = parse_config(&config)?;
            let initial = parse_color(&color)?;
            log::info!(
                "session: palette {}, alpha {}",
                config.palette_type.name(),
                config.enable_alpha
            );
            run_session(config, initial, cli.json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // a logger may already be installed; nothing to do then
    let _ = WriteLogger::init(level, Config::default(), io::stderr());
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_rejects_bad_hex_as_input_error() {
        assert_eq!(parse_color("#12345").unwrap_err().exit_code(), 12);
    }

    #[test]
    fn parse_config_rejects_bad_json_and_names() {
        assert_eq!(parse_config("{oops").unwrap_err().exit_code(), 12);
        let err = parse_config(r#"{"palette_type": "nope"}"#).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn color_report_includes_every_view() {
        let report = color_report(parse_color("80FF0000").unwrap());
        assert_eq!(report["hex"], "80FF0000");
        assert_eq!(report["rgba"], "#80FF0000");
        assert_eq!(report["hsv"]["hue"], 0.0);
        assert_eq!(report["hsl"]["lightness"], 0.5);
    }
}
