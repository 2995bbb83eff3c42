//! Text reports and summary rows.
//!
//! Renderers return plain buffers; writing them anywhere is up to the caller.
//! The value separator is passed in rather than fixed, since the same
//! separator is used for the CSV outputs.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use thiserror::Error;

use crate::course::CourseType;
use crate::cross_index::NestedView;
use crate::grouping::{GroupLevel, GroupingError, partition_by_char};
use crate::triplet::Triplet;
use crate::workload::{ResourceSummary, Workload};

/// Heading markers per grouping depth.
const LEVEL_MARKERS: [&str; 2] = ["===", "---"];

/// Report rendering errors.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Grouping(#[from] GroupingError),

    #[error("failed to format report: {0}")]
    Fmt(#[from] fmt::Error),
}

/// Which entity a summary table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Instructors,
    Modules,
}

impl SummaryKind {
    /// Header row of the summary table.
    pub fn header(self) -> Vec<String> {
        let (name, others) = match self {
            Self::Instructors => ("#name", "modules"),
            Self::Modules => ("#module", "instructors"),
        };
        let mut header = vec![name.to_string(), "days".to_string(), "weeks".to_string()];
        header.extend(CourseType::ALL.iter().map(|t| t.label().to_string()));
        header.push("total".to_string());
        header.push(others.to_string());
        header
    }
}

/// Formats hours with at most two decimals and no trailing zeros.
pub fn format_hours(hours: f64) -> String {
    let text = format!("{hours:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// `CM;TD;TP;total;eqTD` for one triplet.
pub fn format_triplet(volume: &Triplet, separator: char) -> String {
    let mut fields: Vec<String> = CourseType::ALL
        .iter()
        .map(|t| format_hours(volume.get(*t)))
        .collect();
    fields.push(format_hours(volume.sum()));
    fields.push(format_hours(volume.tutorial_equivalent()));
    fields.join(&separator.to_string())
}

fn legend(separator: char) -> String {
    let mut columns: Vec<&str> = CourseType::ALL.iter().map(|t| t.label()).collect();
    columns.extend(["total", "eqTD"]);
    format!("columns: {}", columns.join(&separator.to_string()))
}

/// One row per resource: name, days, weeks, hours per type, total, count.
pub fn summary_rows(summaries: &BTreeMap<String, ResourceSummary>) -> Vec<Vec<String>> {
    summaries
        .iter()
        .map(|(name, summary)| {
            let mut row = vec![
                name.clone(),
                summary.days.to_string(),
                summary.weeks.to_string(),
            ];
            row.extend(
                CourseType::ALL
                    .iter()
                    .map(|t| format_hours(summary.volume.get(*t))),
            );
            row.push(format_hours(summary.volume.sum()));
            row.push(summary.others.to_string());
            row
        })
        .collect()
}

/// Module / instructor report, optionally grouped by up to two levels.
///
/// `levels` are applied outermost first.
pub fn module_report(
    workload: &Workload,
    levels: &[GroupLevel],
    separator: char,
) -> Result<String, ReportError> {
    let mut out = String::new();
    writeln!(out, "Module / instructor report")?;
    writeln!(out, "{}", legend(separator))?;

    let view = workload.index().by_module();
    let levels: Vec<&GroupLevel> = levels.iter().collect();
    let total = render_groups(&mut out, &view, &levels, 0, separator)?;

    writeln!(out)?;
    writeln!(out, "GRAND TOTAL: {}", format_triplet(&total, separator))?;
    Ok(out)
}

fn render_groups(
    out: &mut String,
    modules: &NestedView<'_>,
    levels: &[&GroupLevel],
    depth: usize,
    separator: char,
) -> Result<Triplet, ReportError> {
    let Some((level, inner_levels)) = levels.split_first() else {
        if depth == 0 {
            writeln!(out)?;
        }
        return render_entries(out, modules, "module", separator);
    };

    let marker = LEVEL_MARKERS[depth.min(LEVEL_MARKERS.len() - 1)];
    let mut total = Triplet::default();
    for (key, members) in partition_by_char(modules, level.position)? {
        let label = level.label(key);
        writeln!(out)?;
        writeln!(out, "{marker} {} {label} {marker}", level.name)?;
        let subtotal = render_groups(out, &members, inner_levels, depth + 1, separator)?;
        writeln!(
            out,
            "{marker} {} {label} total: {}",
            level.name,
            format_triplet(&subtotal, separator)
        )?;
        total += subtotal;
    }
    Ok(total)
}

/// Prints each outer entry with its inner volumes and returns their sum.
fn render_entries(
    out: &mut String,
    entries: &NestedView<'_>,
    kind: &str,
    separator: char,
) -> Result<Triplet, ReportError> {
    let mut total = Triplet::default();
    for (name, paired) in entries {
        writeln!(out, "- {kind} {name}")?;
        let width = paired.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        let mut subtotal = Triplet::default();
        for (other, volume) in paired {
            writeln!(
                out,
                "  - {other:<width$} : {}",
                format_triplet(volume, separator)
            )?;
            subtotal += *volume;
        }
        writeln!(out, "  = total: {}", format_triplet(&subtotal, separator))?;
        total += subtotal;
    }
    Ok(total)
}

/// Instructor / module report.
pub fn instructor_report(workload: &Workload, separator: char) -> Result<String, ReportError> {
    let mut out = String::new();
    writeln!(out, "Instructor / module report")?;
    writeln!(out, "{}", legend(separator))?;

    let view = workload.index().by_instructor();
    let mut total = Triplet::default();
    for (instructor, modules) in &view {
        writeln!(out)?;
        let single = NestedView::from([(*instructor, modules.clone())]);
        total += render_entries(&mut out, &single, "instructor", separator)?;
    }

    writeln!(out)?;
    writeln!(out, "GRAND TOTAL: {}", format_triplet(&total, separator))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::grouping::parse_labels;
    use crate::row::ScheduleEvent;
    use crate::weekday::Weekday;

    fn event(instructor: &str, module: &str, ty: CourseType, hours: f64) -> ScheduleEvent {
        ScheduleEvent {
            week: 8,
            weekday: Weekday::Monday,
            course_type: ty,
            module: module.to_string(),
            instructor: instructor.to_string(),
            hours,
        }
    }

    fn sample() -> Workload {
        Workload::from_events(&[
            event("Dupont", "MATH1", CourseType::Lecture, 1.5),
            event("Dupont", "MATH1", CourseType::Tutorial, 3.0),
            event("Martin", "MATH1", CourseType::Lab, 2.0),
            event("Martin", "PHYS2", CourseType::Lecture, 1.0),
        ])
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(3.0), "3");
        assert_eq!(format_hours(1.5), "1.5");
        assert_eq!(format_hours(0.75), "0.75");
        assert_eq!(format_hours(2.0 / 3.0), "0.67");
        assert_eq!(format_hours(0.0), "0");
        assert_eq!(format_hours(10.0), "10");
    }

    #[test]
    fn test_format_triplet() {
        let volume = Triplet::from_hours(1.5, 3.0, 0.0);
        assert_eq!(format_triplet(&volume, ';'), "1.5;3;0;4.5;5.25");
        assert_eq!(format_triplet(&volume, ','), "1.5,3,0,4.5,5.25");
    }

    #[test]
    fn test_summary_rows() {
        let workload = sample();
        let rows = summary_rows(workload.instructors());
        assert_eq!(
            rows,
            vec![
                vec!["Dupont", "1", "1", "1.5", "3", "0", "4.5", "1"],
                vec!["Martin", "1", "1", "1", "0", "2", "3", "2"],
            ]
        );
        assert_eq!(
            SummaryKind::Modules.header(),
            vec!["#module", "days", "weeks", "CM", "TD", "TP", "total", "instructors"]
        );
    }

    #[test]
    fn test_module_report_ungrouped() {
        let report = module_report(&sample(), &[], ';').unwrap();
        assert_snapshot!(report, @r"
        Module / instructor report
        columns: CM;TD;TP;total;eqTD

        - module MATH1
          - Dupont : 1.5;3;0;4.5;5.25
          - Martin : 0;0;2;2;1.33
          = total: 1.5;3;2;6.5;6.58
        - module PHYS2
          - Martin : 1;0;0;1;1.5
          = total: 1;0;0;1;1.5

        GRAND TOTAL: 2.5;3;2;7.5;8.08
        ");
    }

    #[test]
    fn test_module_report_by_semester() {
        let semester = GroupLevel::new(4, "Semester").with_labels(parse_labels("1:S1").unwrap());
        let report = module_report(&sample(), &[semester], ';').unwrap();
        assert_snapshot!(report, @r"
        Module / instructor report
        columns: CM;TD;TP;total;eqTD

        === Semester S1 ===
        - module MATH1
          - Dupont : 1.5;3;0;4.5;5.25
          - Martin : 0;0;2;2;1.33
          = total: 1.5;3;2;6.5;6.58
        === Semester S1 total: 1.5;3;2;6.5;6.58

        === Semester 2 ===
        - module PHYS2
          - Martin : 1;0;0;1;1.5
          = total: 1;0;0;1;1.5
        === Semester 2 total: 1;0;0;1;1.5

        GRAND TOTAL: 2.5;3;2;7.5;8.08
        ");
    }

    #[test]
    fn test_two_levels_fold_into_grand_total() {
        let workload = Workload::from_events(&[
            event("Dupont", "ABC1A01", CourseType::Lecture, 2.0),
            event("Dupont", "ABC1B02", CourseType::Tutorial, 1.0),
            event("Martin", "ABC2A03", CourseType::Lab, 3.0),
        ]);
        let levels = [GroupLevel::new(3, "Semester"), GroupLevel::new(4, "Unit")];
        let report = module_report(&workload, &levels, ';').unwrap();

        assert!(report.contains("=== Semester 1 ===\n\n--- Unit A ---\n- module ABC1A01\n"));
        assert!(report.contains("--- Unit B total: 0;1;0;1;1\n"));
        assert!(report.contains("=== Semester 1 total: 2;1;0;3;4\n"));
        assert!(report.contains("=== Semester 2 total: 0;0;3;3;2\n"));
        assert!(report.ends_with("GRAND TOTAL: 2;1;3;6;6\n"));
    }

    #[test]
    fn test_grouping_position_beyond_key() {
        let levels = [GroupLevel::new(10, "Semester")];
        let err = module_report(&sample(), &levels, ';').unwrap_err();
        assert!(matches!(
            err,
            ReportError::Grouping(GroupingError::IndexOutOfRange { position: 10, .. })
        ));
    }

    #[test]
    fn test_instructor_report() {
        let report = instructor_report(&sample(), ';').unwrap();
        assert_snapshot!(report, @r"
        Instructor / module report
        columns: CM;TD;TP;total;eqTD

        - instructor Dupont
          - MATH1 : 1.5;3;0;4.5;5.25
          = total: 1.5;3;0;4.5;5.25

        - instructor Martin
          - MATH1 : 0;0;2;2;1.33
          - PHYS2 : 1;0;0;1;1.5
          = total: 1;0;2;3;2.83

        GRAND TOTAL: 2.5;3;2;7.5;8.08
        ");
    }
}
