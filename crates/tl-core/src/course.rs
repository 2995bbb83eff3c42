//! Course types and module codes.
//!
//! A module code carries its course type as the last character, e.g.
//! `ABC1234C` is the lecture part of module `ABC1234`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a session is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CourseType {
    /// Lecture (CM).
    Lecture,
    /// Tutorial (TD).
    Tutorial,
    /// Lab (TP).
    Lab,
}

impl CourseType {
    /// All course types in triplet slot order.
    pub const ALL: [Self; 3] = [Self::Lecture, Self::Tutorial, Self::Lab];

    /// Slot of this type in a [`Triplet`](crate::Triplet).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Lecture => 0,
            Self::Tutorial => 1,
            Self::Lab => 2,
        }
    }

    /// Short label used in report headers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lecture => "CM",
            Self::Tutorial => "TD",
            Self::Lab => "TP",
        }
    }

    /// Weight of one hour of this type in tutorial-equivalent hours.
    #[must_use]
    pub const fn tutorial_weight(self) -> f64 {
        match self {
            Self::Lecture => 1.5,
            Self::Tutorial => 1.0,
            Self::Lab => 2.0 / 3.0,
        }
    }

    /// Maps a module code suffix to its course type.
    pub const fn from_suffix(suffix: char) -> Result<Self, UnknownCourseType> {
        match suffix {
            'C' => Ok(Self::Lecture),
            'D' => Ok(Self::Tutorial),
            'P' => Ok(Self::Lab),
            other => Err(UnknownCourseType(other)),
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error type for a module code suffix that is not `C`, `D` or `P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCourseType(pub char);

impl fmt::Display for UnknownCourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown course type suffix: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCourseType {}

/// Splits a module code into its course type and module id.
///
/// Returns `Ok(None)` when the code has no module id in front of the suffix.
pub fn split_module_code(code: &str) -> Result<Option<(CourseType, &str)>, UnknownCourseType> {
    let Some(suffix) = code.chars().next_back() else {
        return Ok(None);
    };
    let course_type = CourseType::from_suffix(suffix)?;
    let module = &code[..code.len() - suffix.len_utf8()];
    if module.is_empty() {
        return Ok(None);
    }
    Ok(Some((course_type, module)))
}
