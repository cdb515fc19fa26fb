//! Runtime configuration from the environment.
//!
//! `.env` is loaded by the binary with `dotenvy`; this module only reads
//! variables. CLI flags take precedence over anything set here.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PROCUREMENT_SECONDARY_DELIMITER` | extra cell separator: `tab`, `\t`, or one character |
//! | `PROCUREMENT_QUIET` | `1`/`true` silences progress logs on stderr |

use std::env;

pub const SECONDARY_DELIMITER_VAR: &str = "PROCUREMENT_SECONDARY_DELIMITER";
pub const QUIET_VAR: &str = "PROCUREMENT_QUIET";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub secondary_delimiter: Option<char>,
    pub quiet: bool,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secondary_delimiter: lookup(SECONDARY_DELIMITER_VAR)
                .as_deref()
                .and_then(parse_delimiter),
            quiet: lookup(QUIET_VAR).as_deref().is_some_and(parse_flag),
        }
    }
}

/// Parse a delimiter spelling: `tab`, `\t`, or a single character.
pub fn parse_delimiter(raw: &str) -> Option<char> {
    match raw {
        "tab" | "TAB" | "\\t" | "\t" => Some('\t'),
        other => {
            let mut chars = other.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
