//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use placard::Theme;

/// Placard - justified phrase placards with redaction boxes
#[derive(Parser, Debug)]
#[command(name = "placard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the presets in the catalog
    #[command(alias = "ls")]
    Presets(PresetsArgs),

    /// Render a preset to a PNG file
    #[command(alias = "r")]
    Render(Box<RenderArgs>),
}

/// Arguments for the presets command
#[derive(Parser, Debug)]
pub struct PresetsArgs {
    /// Catalog file to read instead of the built-in presets
    #[arg(long = "catalog")]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Index of the preset to render
    #[arg(short = 'p', long = "preset", default_value = "0")]
    pub preset: usize,

    /// Fill a placeholder, e.g. --set oshi=Mio (repeatable)
    #[arg(short = 's', long = "set", value_parser = parse_key_val, action = ArgAction::Append)]
    pub set: Vec<(String, String)>,

    /// Pixel size of the smallest row
    #[arg(short = 'b', long = "base-size", default_value = "50")]
    pub base_size: f32,

    /// Color mode
    #[arg(short = 't', long = "theme", default_value = "light")]
    pub theme: ThemeArg,

    /// Display font file (default: installed Meiryo Bold, else a fallback)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,

    /// Paint the theme background instead of leaving it transparent
    #[arg(long = "background", action = ArgAction::SetTrue)]
    pub background: bool,

    /// Cut placeholder text out to full transparency
    #[arg(long = "transparent-placeholder", action = ArgAction::SetTrue)]
    pub transparent_placeholder: bool,

    /// Output file, or a directory to save under the phrase's name
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Catalog file to read instead of the built-in presets
    #[arg(long = "catalog")]
    pub catalog: Option<PathBuf>,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

/// Split `key=value`; the value may be empty or contain further `=`
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty placeholder key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
