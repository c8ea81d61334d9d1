//! Target languages for binding generation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Supported scripting runtimes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Lua 5.1 C API
    #[default]
    Lua,
}

impl Language {
    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Lua => "lua",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lua" => Ok(Language::Lua),
            _ => Err(format!("unknown language '{}', expected 'lua'", s)),
        }
    }
}
