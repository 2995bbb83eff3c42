//! Module × instructor volume index.

use std::collections::BTreeMap;

use crate::course::CourseType;
use crate::triplet::Triplet;

/// Nested `outer → inner → volume` reading of a [`CrossIndex`].
pub type NestedView<'a> = BTreeMap<&'a str, BTreeMap<&'a str, Triplet>>;

/// Accumulated volume per (module, instructor) pair.
///
/// There is a single cell per pair; the module-first and instructor-first
/// readings are both derived from it, so they always agree.
#[derive(Debug, Clone, Default)]
pub struct CrossIndex {
    cells: BTreeMap<(String, String), Triplet>,
}

impl CrossIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `hours` of `course_type` taught by `instructor` in `module`.
    pub fn add_one(&mut self, instructor: &str, module: &str, course_type: CourseType, hours: f64) {
        *self
            .cells
            .entry((module.to_string(), instructor.to_string()))
            .or_default() += Triplet::new(course_type, hours);
    }

    /// Volume of one pair, `None` if the instructor never taught the module.
    pub fn get(&self, module: &str, instructor: &str) -> Option<Triplet> {
        self.cells
            .get(&(module.to_string(), instructor.to_string()))
            .copied()
    }

    /// Iterates `(module, instructor, volume)` in module then instructor order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Triplet)> {
        self.cells
            .iter()
            .map(|((module, instructor), volume)| (module.as_str(), instructor.as_str(), *volume))
    }

    /// `module → instructor → volume`.
    pub fn by_module(&self) -> NestedView<'_> {
        let mut view = NestedView::new();
        for (module, instructor, volume) in self.iter() {
            view.entry(module).or_default().insert(instructor, volume);
        }
        view
    }

    /// `instructor → module → volume`.
    pub fn by_instructor(&self) -> NestedView<'_> {
        let mut view = NestedView::new();
        for (module, instructor, volume) in self.iter() {
            view.entry(instructor).or_default().insert(module, volume);
        }
        view
    }

    /// Number of (module, instructor) pairs.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrossIndex {
        let mut index = CrossIndex::new();
        index.add_one("Dupont", "ABC1234", CourseType::Tutorial, 3.0);
        index.add_one("Dupont", "ABC1234", CourseType::Lecture, 1.5);
        index.add_one("Martin", "ABC1234", CourseType::Lab, 2.0);
        index.add_one("Martin", "XYZ42", CourseType::Lecture, 1.0);
        index.add_one("Dupont", "ABC1234", CourseType::Tutorial, 1.0);
        index
    }

    #[test]
    fn add_one_accumulates_per_pair() {
        let index = sample();
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.get("ABC1234", "Dupont"),
            Some(Triplet::from_hours(1.5, 4.0, 0.0))
        );
        assert_eq!(index.get("XYZ42", "Dupont"), None);
    }

    #[test]
    fn views_are_symmetric() {
        let index = sample();
        let by_module = index.by_module();
        let by_instructor = index.by_instructor();

        let mut pairs = 0;
        for (module, instructors) in &by_module {
            for (instructor, volume) in instructors {
                assert_eq!(by_instructor[instructor][module], *volume);
                pairs += 1;
            }
        }
        let mirrored: usize = by_instructor.values().map(BTreeMap::len).sum();
        assert_eq!(pairs, mirrored);
        assert_eq!(pairs, index.len());
    }

    #[test]
    fn views_are_sorted() {
        let index = sample();
        let modules: Vec<&str> = index.by_module().keys().copied().collect();
        assert_eq!(modules, vec!["ABC1234", "XYZ42"]);
        let courses: Vec<&str> = index.by_instructor()["Martin"].keys().copied().collect();
        assert_eq!(courses, vec!["ABC1234", "XYZ42"]);
    }
}
