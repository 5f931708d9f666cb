//! Public page theme

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color theme used to render a user's public page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Accent,
}

impl Theme {
    /// All selectable themes
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Accent];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Accent => "accent",
        }
    }
}

/// Error returned for an unknown theme name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid theme")]
pub struct ThemeParseError;

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "accent" => Ok(Self::Accent),
            _ => Err(ThemeParseError),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
