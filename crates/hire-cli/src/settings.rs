//! Runtime settings: config file, flags and defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_STORE_PATH: &str = "~/.hire.db";
pub const DEFAULT_CURRENCY: &str = "£";

/// Shape of the optional TOML config file.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
  #[serde(default)]
  pub store_path: Option<PathBuf>,
  #[serde(default)]
  pub currency:   Option<String>,
}

impl ConfigFile {
  /// Read `path` if given; no path means an empty config.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Self::default());
    };
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub store_path: PathBuf,
  pub currency:   String,
}

impl Settings {
  /// Flags override the config file, which overrides defaults.
  pub fn resolve(
    store_flag: Option<PathBuf>,
    currency_flag: Option<String>,
    file: ConfigFile,
  ) -> Self {
    let store_path = store_flag
      .or(file.store_path)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
    let currency = currency_flag
      .or(file.currency)
      .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());

    Self {
      store_path: expand_tilde(&store_path, std::env::var("HOME").ok().as_deref()),
      currency,
    }
  }
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
  Stderr,
  /// Append to a file; used while the terminal UI owns the screen.
  File(PathBuf),
}

impl Settings {
  /// The terminal UI draws over stderr, so interactive sessions log to a
  /// file beside the store instead.
  pub fn log_sink(&self, interactive: bool) -> LogSink {
    if interactive {
      LogSink::File(self.store_path.with_extension("log"))
    } else {
      LogSink::Stderr
    }
  }
}

/// Expand a leading `~/` to `home`, when known.
fn expand_tilde(path: &Path, home: Option<&str>) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Some(home) = home
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_beat_file_beat_defaults() {
    let file = ConfigFile {
      store_path: Some("/data/file.db".into()),
      currency:   Some("$".into()),
    };
    let s = Settings::resolve(Some("/data/flag.db".into()), None, file);
    assert_eq!(s.store_path, PathBuf::from("/data/flag.db"));
    assert_eq!(s.currency, "$");

    let s = Settings::resolve(None, None, ConfigFile::default());
    assert_eq!(s.currency, DEFAULT_CURRENCY);
    assert!(s.store_path.to_string_lossy().ends_with(".hire.db"));
  }

  #[test]
  fn interactive_sessions_log_beside_the_store() {
    let s = Settings {
      store_path: "/data/hire.db".into(),
      currency:   "£".into(),
    };
    assert_eq!(s.log_sink(true), LogSink::File("/data/hire.log".into()));
    assert_eq!(s.log_sink(false), LogSink::Stderr);
  }

  #[test]
  fn tilde_expands_against_home() {
    assert_eq!(
      expand_tilde(Path::new("~/x/hire.db"), Some("/home/pat")),
      PathBuf::from("/home/pat/x/hire.db")
    );
    assert_eq!(
      expand_tilde(Path::new("~/x"), None),
      PathBuf::from("~/x")
    );
    assert_eq!(
      expand_tilde(Path::new("/abs/hire.db"), Some("/home/pat")),
      PathBuf::from("/abs/hire.db")
    );
  }

  #[test]
  fn parses_config_file() {
    let cfg: ConfigFile =
      toml::from_str("store_path = \"/tmp/h.db\"\ncurrency = \"€\"\n").unwrap();
    assert_eq!(cfg.store_path, Some(PathBuf::from("/tmp/h.db")));
    assert_eq!(cfg.currency.as_deref(), Some("€"));

    let empty: ConfigFile = toml::from_str("").unwrap();
    assert_eq!(empty, ConfigFile::default());
  }
}
