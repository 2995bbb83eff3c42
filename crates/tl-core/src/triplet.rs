//! Teaching volume split by course type.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::course::CourseType;

/// Hours of lecture, tutorial and lab, in that order.
///
/// Values only ever grow by adding non-negative durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Triplet([f64; 3]);

impl Triplet {
    /// A triplet holding `hours` in the slot for `course_type`.
    #[must_use]
    pub fn new(course_type: CourseType, hours: f64) -> Self {
        let mut slots = [0.0; 3];
        slots[course_type.index()] = hours;
        Self(slots)
    }

    /// Builds a triplet from explicit lecture, tutorial and lab hours.
    #[must_use]
    pub const fn from_hours(lecture: f64, tutorial: f64, lab: f64) -> Self {
        Self([lecture, tutorial, lab])
    }

    /// Hours for one course type.
    #[must_use]
    pub const fn get(&self, course_type: CourseType) -> f64 {
        self.0[course_type.index()]
    }

    /// Component-wise addition.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self([
            self.0[0] + other.0[0],
            self.0[1] + other.0[1],
            self.0[2] + other.0[2],
        ])
    }

    /// Raw hours, all course types alike.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Hours normalised to tutorial-equivalent workload.
    #[must_use]
    pub fn tutorial_equivalent(&self) -> f64 {
        CourseType::ALL
            .iter()
            .map(|t| self.get(*t) * t.tutorial_weight())
            .sum()
    }
}

impl Add for Triplet {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.merge(rhs)
    }
}

impl AddAssign for Triplet {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.merge(rhs);
    }
}

impl Sum for Triplet {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::merge)
    }
}

impl<'a> Sum<&'a Self> for Triplet {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
