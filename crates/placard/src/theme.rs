//! Color modes

use std::{fmt, str::FromStr};

use placard_core::Color;

/// Light or dark color mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Concrete colors a theme resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub foreground: Color,
    pub background: Color,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Self::Light => ThemeColors {
                foreground: Color::rgb(0x18, 0x18, 0x1b),
                background: Color::white(),
            },
            Self::Dark => ThemeColors {
                foreground: Color::rgb(0xfa, 0xfa, 0xfa),
                background: Color::rgb(0x11, 0x11, 0x13),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}
