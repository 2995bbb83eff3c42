//! Writing summaries and reports to disk.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use tl_core::report::{instructor_report, module_report, summary_rows};
use tl_core::{ResourceSummary, SummaryKind, Triplet, Workload};

use crate::config::Config;

/// Paths of the four generated files, derived from the input file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub instructors: PathBuf,
    pub modules: PathBuf,
    pub module_report: PathBuf,
    pub instructor_report: PathBuf,
}

impl OutputFiles {
    pub fn new(input: &Path, directory: &Path) -> Self {
        let stem = input
            .file_stem()
            .map_or_else(|| "schedule".into(), |s| s.to_string_lossy());
        let path = |suffix: &str| directory.join(format!("{stem}_{suffix}"));
        Self {
            instructors: path("instructors.csv"),
            modules: path("modules.csv"),
            module_report: path("module_report.txt"),
            instructor_report: path("instructor_report.txt"),
        }
    }
}

/// Writes every output for `workload` and returns the written paths in order.
///
/// Both text reports are rendered before any file is created, so a grouping
/// failure leaves nothing on disk.
pub fn write_all(workload: &Workload, input: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let output = &config.output;
    let levels = config
        .grouping
        .levels()
        .context("invalid grouping configuration")?;
    let separator_byte = output.separator_byte()?;
    let module_text = module_report(workload, &levels, output.separator)?;
    let instructor_text = instructor_report(workload, output.separator)?;

    fs::create_dir_all(&output.directory).with_context(|| {
        format!(
            "failed to create output directory {}",
            output.directory.display()
        )
    })?;
    let files = OutputFiles::new(input, &output.directory);

    write_summary(
        &files.instructors,
        SummaryKind::Instructors,
        workload.instructors(),
        separator_byte,
    )?;
    write_summary(
        &files.modules,
        SummaryKind::Modules,
        workload.modules(),
        separator_byte,
    )?;
    write_text(&files.module_report, &module_text)?;
    write_text(&files.instructor_report, &instructor_text)?;

    tracing::info!(directory = %output.directory.display(), "outputs written");
    Ok(vec![
        files.instructors,
        files.modules,
        files.module_report,
        files.instructor_report,
    ])
}

/// Writes one summary table as delimited text.
pub fn write_summary(
    path: &Path,
    kind: SummaryKind,
    summaries: &BTreeMap<String, ResourceSummary>,
    separator: u8,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_summary_to(file, kind, summaries, separator)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn write_summary_to<W: Write>(
    writer: W,
    kind: SummaryKind,
    summaries: &BTreeMap<String, ResourceSummary>,
    separator: u8,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    writer.write_record(kind.header())?;
    for row in summary_rows(summaries) {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write {}", path.display()))
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    name: &'a str,
    #[serde(flatten)]
    summary: &'a ResourceSummary,
    hours_per_day: f64,
}

#[derive(Serialize)]
struct WorkloadJson<'a> {
    instructors: Vec<SummaryJson<'a>>,
    modules: Vec<SummaryJson<'a>>,
    total: Triplet,
}

fn summaries_json(summaries: &BTreeMap<String, ResourceSummary>) -> Vec<SummaryJson<'_>> {
    summaries
        .iter()
        .map(|(name, summary)| SummaryJson {
            name,
            summary,
            hours_per_day: summary.hours_per_day(),
        })
        .collect()
}

/// Both summary tables and the overall volume as pretty JSON.
pub fn format_summaries_json(workload: &Workload) -> Result<String> {
    let json = WorkloadJson {
        instructors: summaries_json(workload.instructors()),
        modules: summaries_json(workload.modules()),
        total: workload.total(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
