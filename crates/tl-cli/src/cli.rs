//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Teaching-load report generator.
///
/// Reads a schedule export and writes per-instructor and per-module
/// summaries plus module/instructor and instructor/module reports.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Schedule export to process.
    pub input: Option<PathBuf>,

    /// Group the module report by semester (grouping level 1).
    #[arg(short = 's', long)]
    pub by_semester: bool,

    /// Group the module report by program unit (grouping level 2).
    #[arg(short = 'u', long)]
    pub by_unit: bool,

    /// Directory receiving the generated files.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also print instructor and module summaries as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the resolved configuration and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if self.by_semester {
            config.grouping.first.enabled = true;
        }
        if self.by_unit {
            config.grouping.second.enabled = true;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory.clone_from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["tl", "-s", "-o", "out", "schedule.csv"]).unwrap();
        let mut config = Config::default();
        cli.apply_to(&mut config);

        assert!(config.grouping.first.enabled);
        assert!(!config.grouping.second.enabled);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(cli.input, Some(PathBuf::from("schedule.csv")));
    }

    #[test]
    fn test_input_is_optional_for_print_config() {
        let cli = Cli::try_parse_from(["tl", "--print-config"]).unwrap();
        assert!(cli.print_config);
        assert!(cli.input.is_none());
    }
}
