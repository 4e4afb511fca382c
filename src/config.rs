//! Front-end configuration: look-ahead length and key bindings.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults (5 next pieces, the default [`KeyBindings`])
//! 2. A JSON file named by `BLOCKFALL_CONFIG`:
//!    `{ "nextPiecesCount": 3, "keyBindings": { "hardDrop": "Space" } }`
//! 3. `BLOCKFALL_NEXT_PIECES`
//!
//! Out-of-range counts are clamped; unknown names and the reserved quit keys
//! are skipped. Each such adjustment, and every pair of commands left sharing
//! a key, is recorded in [`AppConfig::warnings`] rather than failing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::config::clamp_next_pieces_count;
use crate::core::GameConfig;
use crate::input::{is_reserved, key_name, parse_key, KeyBindings};
use crate::types::Command;

pub const CONFIG_PATH_ENV: &str = "BLOCKFALL_CONFIG";
pub const NEXT_PIECES_ENV: &str = "BLOCKFALL_NEXT_PIECES";

/// On-disk configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub next_pieces_count: Option<i64>,
    /// Action name -> key identifier.
    pub key_bindings: BTreeMap<String, String>,
}

impl ConfigFile {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid configuration JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in config file {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub game: GameConfig,
    pub bindings: KeyBindings,
    /// Non-fatal problems found while reading configuration.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            bindings: KeyBindings::default(),
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// A config file that is named but unreadable or malformed is an error.
    pub fn from_env() -> Result<Self> {
        let file = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Some(ConfigFile::load(Path::new(path.trim()))?),
            _ => None,
        };
        let next_pieces = std::env::var(NEXT_PIECES_ENV).ok();
        Ok(Self::from_sources(file.as_ref(), next_pieces.as_deref()))
    }

    /// Layer an optional config file and an optional raw
    /// `BLOCKFALL_NEXT_PIECES` value over the defaults.
    pub fn from_sources(file: Option<&ConfigFile>, next_pieces: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(file) = file {
            config.apply_file(file);
        }
        if let Some(raw) = next_pieces.map(str::trim).filter(|s| !s.is_empty()) {
            match raw.parse::<i64>() {
                Ok(n) => config.apply_next_pieces(n, NEXT_PIECES_ENV),
                Err(_) => config
                    .warnings
                    .push(format!("{} is not an integer: {:?}", NEXT_PIECES_ENV, raw)),
            }
        }
        config
    }

    fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(n) = file.next_pieces_count {
            self.apply_next_pieces(n, "nextPiecesCount");
        }
        for (action, key) in &file.key_bindings {
            let Some(command) = Command::from_str(action) else {
                self.warnings.push(format!("unknown action {:?} in keyBindings", action));
                continue;
            };
            match parse_key(key) {
                Some(code) if is_reserved(code) => self.warnings.push(format!(
                    "key {:?} for {} is reserved for quit",
                    key,
                    command.as_str()
                )),
                Some(code) => self.bindings.set(command, code),
                None => self
                    .warnings
                    .push(format!("unknown key {:?} for {}", key, command.as_str())),
            }
        }
        for (shadowed, winner) in self.bindings.shadowed() {
            self.warnings.push(format!(
                "{} shares key {} with {} and will never fire",
                shadowed.as_str(),
                key_name(self.bindings.key_for(shadowed)),
                winner.as_str()
            ));
        }
    }

    fn apply_next_pieces(&mut self, requested: i64, source: &str) {
        let clamped = clamp_next_pieces_count(requested);
        if clamped as i64 != requested {
            self.warnings.push(format!(
                "{} {} out of range, using {}",
                source, requested, clamped
            ));
        }
        self.game = GameConfig::new(clamped);
    }
}
