//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use tl_core::grouping::{GroupingError, parse_labels};
use tl_core::{ColumnLayout, GroupLevel};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub grouping: GroupingConfig,
    pub output: OutputConfig,
}

/// How the schedule export is laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Field delimiter.
    pub delimiter: char,
    /// Rows whose first field starts with this character are ignored.
    pub comment: char,
    /// Column positions, 0-based.
    pub columns: ColumnLayout,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            comment: '#',
            columns: ColumnLayout::default(),
        }
    }
}

impl InputConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        ascii_byte(self.delimiter, "input.delimiter")
    }
}

/// The two optional grouping levels of the module report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    pub first: GroupLevelConfig,
    pub second: GroupLevelConfig,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            first: GroupLevelConfig::new(4, "Semester"),
            second: GroupLevelConfig::new(5, "Unit"),
        }
    }
}

impl GroupingConfig {
    /// Enabled levels, outermost first.
    pub fn levels(&self) -> Result<Vec<GroupLevel>, GroupingError> {
        [&self.first, &self.second]
            .into_iter()
            .filter(|level| level.enabled)
            .map(GroupLevelConfig::to_level)
            .collect()
    }
}

/// One grouping level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupLevelConfig {
    pub enabled: bool,
    /// Character offset in module ids.
    pub position: usize,
    /// Name shown in group headings.
    pub name: String,
    /// Display labels, `"<char>:<label>"` pairs separated by `;`.
    pub labels: String,
}

impl Default for GroupLevelConfig {
    fn default() -> Self {
        Self::new(0, "Group")
    }
}

impl GroupLevelConfig {
    fn new(position: usize, name: &str) -> Self {
        Self {
            enabled: false,
            position,
            name: name.to_string(),
            labels: String::new(),
        }
    }

    pub fn to_level(&self) -> Result<GroupLevel, GroupingError> {
        Ok(GroupLevel::new(self.position, &self.name).with_labels(parse_labels(&self.labels)?))
    }
}

/// Where and how results are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the generated files.
    pub directory: PathBuf,
    /// Separator for CSV files and triplets in text reports.
    pub separator: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            separator: ';',
        }
    }
}

impl OutputConfig {
    pub fn separator_byte(&self) -> Result<u8> {
        ascii_byte(self.separator, "output.separator")
    }
}

fn ascii_byte(c: char, key: &str) -> Result<u8> {
    match u8::try_from(c) {
        Ok(byte) if byte.is_ascii() => Ok(byte),
        _ => bail!("{key} must be a single ASCII character, got {c:?}"),
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TL_*, nested keys split on `__`)
        figment = figment.merge(Env::prefixed("TL_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tl.
///
/// On Linux: `~/.config/tl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tl"))
}
