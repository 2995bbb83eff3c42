//! Parsing of tokenized schedule rows into events.
//!
//! Rows come from the scheduling export, one session per line. Only five
//! columns matter; their positions are described by a [`ColumnLayout`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::course::{CourseType, UnknownCourseType, split_module_code};
use crate::weekday::{UnknownWeekday, Weekday};

/// Instructor name used when the export leaves the column empty.
pub const UNASSIGNED_INSTRUCTOR: &str = "(unassigned)";

/// Errors for rows that cannot be turned into an event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    /// A field does not have the expected shape.
    #[error("invalid {field} field {value:?}: expected {expected}")]
    Format {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The weekday name is not in the day table.
    #[error(transparent)]
    UnknownDay(#[from] UnknownWeekday),

    /// The module code does not end with a known course type.
    #[error("module code {code:?}: {source}")]
    UnknownCourseType {
        code: String,
        #[source]
        source: UnknownCourseType,
    },

    /// The row is shorter than the column layout requires.
    #[error("row has {found} fields, at least {required} required")]
    InsufficientFields { found: usize, required: usize },
}

/// Positions of the relevant columns, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub week: usize,
    pub weekday: usize,
    pub duration: usize,
    pub instructor: usize,
    pub module: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            week: 0,
            weekday: 1,
            duration: 2,
            instructor: 6,
            module: 8,
        }
    }
}

impl ColumnLayout {
    /// Highest column index the layout reads.
    pub fn highest_index(&self) -> usize {
        [
            self.week,
            self.weekday,
            self.duration,
            self.instructor,
            self.module,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}

/// One scheduled session.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEvent {
    pub week: u32,
    pub weekday: Weekday,
    pub course_type: CourseType,
    pub module: String,
    pub instructor: String,
    pub hours: f64,
}

/// Turns tokenized rows into [`ScheduleEvent`]s.
#[derive(Debug, Clone)]
pub struct RowParser {
    layout: ColumnLayout,
    comment: char,
}

impl Default for RowParser {
    fn default() -> Self {
        Self::new(ColumnLayout::default(), '#')
    }
}

impl RowParser {
    pub const fn new(layout: ColumnLayout, comment: char) -> Self {
        Self { layout, comment }
    }

    /// Parses one row.
    ///
    /// Returns `Ok(None)` for rows that carry no session: empty rows,
    /// comments, rows with an empty first field and rows without a module.
    /// Any other row shorter than the layout is an error.
    pub fn parse<S: AsRef<str>>(&self, fields: &[S]) -> Result<Option<ScheduleEvent>, RowError> {
        let Some(first) = fields.first() else {
            return Ok(None);
        };
        let first = first.as_ref().trim();
        if first.starts_with(self.comment) {
            tracing::trace!(first, "skipping comment row");
            return Ok(None);
        }

        let required = self.layout.highest_index() + 1;
        if fields.len() < required {
            return Err(RowError::InsufficientFields {
                found: fields.len(),
                required,
            });
        }
        if first.is_empty() {
            tracing::trace!("skipping row with empty first field");
            return Ok(None);
        }
        let field = |idx: usize| fields[idx].as_ref().trim();

        let code = field(self.layout.module);
        if code.is_empty() {
            tracing::trace!("skipping row without module");
            return Ok(None);
        }

        let week = parse_week(field(self.layout.week))?;
        let weekday = parse_weekday(field(self.layout.weekday))?;
        let hours = parse_duration(field(self.layout.duration))?;
        let (course_type, module) = parse_module_code(code)?;

        let instructor = match field(self.layout.instructor) {
            "" => UNASSIGNED_INSTRUCTOR,
            name => name,
        };

        Ok(Some(ScheduleEvent {
            week,
            weekday,
            course_type,
            module: module.to_string(),
            instructor: instructor.to_string(),
            hours,
        }))
    }
}

/// Week number from a field such as `"Semaine 8"`.
pub fn parse_week(value: &str) -> Result<u32, RowError> {
    let format_error = || RowError::Format {
        field: "week",
        value: value.to_string(),
        expected: "\"<label> <week number>\"",
    };
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let [_, number] = tokens.as_slice() else {
        return Err(format_error());
    };
    match number.parse::<u32>() {
        Ok(week) if week >= 1 => Ok(week),
        _ => Err(format_error()),
    }
}

/// Weekday from a field such as `"Lundi"` or `"Lundi 12"`.
///
/// Only the first token is interpreted; an optional second token (the day of
/// month in some exports) is ignored.
pub fn parse_weekday(value: &str) -> Result<Weekday, RowError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    match tokens.as_slice() {
        [day] | [day, _] => Ok(day.parse::<Weekday>()?),
        _ => Err(RowError::Format {
            field: "weekday",
            value: value.to_string(),
            expected: "\"<day name>[ <day of month>]\"",
        }),
    }
}

/// Duration in hours from a field such as `"01h30"`.
pub fn parse_duration(value: &str) -> Result<f64, RowError> {
    let format_error = || RowError::Format {
        field: "duration",
        value: value.to_string(),
        expected: "\"HHhMM\"",
    };
    let (hours, minutes) = value.split_once('h').ok_or_else(format_error)?;
    let hours: u32 = hours.parse().map_err(|_| format_error())?;
    let minutes: u32 = minutes.parse().map_err(|_| format_error())?;
    Ok(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Course type and module id from a code such as `"ABC1234D"`.
pub fn parse_module_code(code: &str) -> Result<(CourseType, &str), RowError> {
    match split_module_code(code) {
        Ok(Some(parsed)) => Ok(parsed),
        Ok(None) => Err(RowError::Format {
            field: "module",
            value: code.to_string(),
            expected: "a module id followed by C, D or P",
        }),
        Err(source) => Err(RowError::UnknownCourseType {
            code: code.to_string(),
            source,
        }),
    }
}
