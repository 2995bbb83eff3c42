//! Partitioning of report entries by a character of their key.
//!
//! Module ids encode administrative groupings at fixed offsets: with ids such
//! as `ABC1234`, the character at offset 4 is the semester digit and the one
//! at offset 5 the program unit. Nothing validates that ids follow this
//! layout; grouping simply reads whatever character sits at the configured
//! offset, and fails when the id is too short to have one.

use std::collections::BTreeMap;

use thiserror::Error;

/// Grouping errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupingError {
    /// A key has no character at the grouping offset.
    #[error("cannot group {key:?} by character {position}: key has only {len} characters")]
    IndexOutOfRange {
        key: String,
        position: usize,
        len: usize,
    },

    /// A label table entry is not of the form `char:label`.
    #[error("invalid group label {entry:?}: expected \"<char>:<label>\"")]
    InvalidLabel { entry: String },
}

/// One level of report grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLevel {
    /// Character offset (0-based) of the group key in module ids.
    pub position: usize,
    /// Name printed in group headings, e.g. `Semester`.
    pub name: String,
    /// Display labels for group keys; unlisted keys print as-is.
    pub labels: BTreeMap<char, String>,
}

impl GroupLevel {
    pub fn new(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_labels(mut self, labels: BTreeMap<char, String>) -> Self {
        self.labels = labels;
        self
    }

    /// Display label for a group key.
    pub fn label(&self, key: char) -> String {
        self.labels
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Parses a label table such as `"1:First semester;2:Second semester"`.
///
/// Empty entries are ignored, so an empty string yields an empty table.
pub fn parse_labels(spec: &str) -> Result<BTreeMap<char, String>, GroupingError> {
    let mut labels = BTreeMap::new();
    for entry in spec.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = || GroupingError::InvalidLabel {
            entry: entry.to_string(),
        };
        let (key, label) = entry.split_once(':').ok_or_else(invalid)?;
        let mut chars = key.trim().chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return Err(invalid());
        };
        labels.insert(key, label.trim().to_string());
    }
    Ok(labels)
}

/// Group key of `key`: its character at `position`.
pub fn group_char(key: &str, position: usize) -> Result<char, GroupingError> {
    key.chars()
        .nth(position)
        .ok_or_else(|| GroupingError::IndexOutOfRange {
            key: key.to_string(),
            position,
            len: key.chars().count(),
        })
}

/// Buckets every entry of `map` under the character at `position` of its key.
///
/// Entries keep their values untouched; buckets and their members stay in
/// ascending order.
pub fn partition_by_char<'a, V: Clone>(
    map: &BTreeMap<&'a str, V>,
    position: usize,
) -> Result<BTreeMap<char, BTreeMap<&'a str, V>>, GroupingError> {
    let mut groups: BTreeMap<char, BTreeMap<&'a str, V>> = BTreeMap::new();
    for (key, value) in map {
        let group = group_char(key, position)?;
        groups.entry(group).or_default().insert(*key, value.clone());
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::course::CourseType;
    use crate::triplet::Triplet;

    #[test]
    fn partition_by_semester_digit() {
        let mut map: BTreeMap<&str, BTreeMap<&str, Triplet>> = BTreeMap::new();
        map.entry("MATH1C")
            .or_default()
            .insert("Dupont", Triplet::new(CourseType::Lecture, 1.5));
        map.entry("MATH2D")
            .or_default()
            .insert("Martin", Triplet::new(CourseType::Tutorial, 3.0));
        map.entry("PHYS1C")
            .or_default()
            .insert("Martin", Triplet::new(CourseType::Lecture, 2.0));

        let groups = partition_by_char(&map, 4).unwrap();

        let keys: Vec<char> = groups.keys().copied().collect();
        assert_eq!(keys, vec!['1', '2']);

        let first: Vec<&str> = groups[&'1'].keys().copied().collect();
        assert_eq!(first, vec!["MATH1C", "PHYS1C"]);
        assert_eq!(groups[&'1']["PHYS1C"], map["PHYS1C"]);
        assert_eq!(groups[&'2'].len(), 1);
        assert_eq!(groups[&'2']["MATH2D"], map["MATH2D"]);

        let total: usize = groups.values().map(BTreeMap::len).sum();
        assert_eq!(total, map.len());
    }

    #[test]
    fn short_key_is_out_of_range() {
        let map: BTreeMap<&str, u32> = [("AB", 1), ("ABCDE", 2)].into_iter().collect();
        let err = partition_by_char(&map, 4).unwrap_err();
        assert_eq!(
            err,
            GroupingError::IndexOutOfRange {
                key: "AB".to_string(),
                position: 4,
                len: 2,
            }
        );
    }

    #[test]
    fn offsets_count_characters() {
        assert_eq!(group_char("ÉCO1X", 3).unwrap(), '1');
    }

    #[test]
    fn labels_fall_back_to_key() {
        let level = GroupLevel::new(4, "Semester")
            .with_labels(parse_labels("1:First;2: Second ").unwrap());
        assert_eq!(level.label('1'), "First");
        assert_eq!(level.label('2'), "Second");
        assert_eq!(level.label('3'), "3");
    }

    #[test]
    fn parse_labels_rejects_malformed_entries() {
        assert!(parse_labels("").unwrap().is_empty());
        assert_eq!(parse_labels("1:A;;2:B;").unwrap().len(), 2);
        for spec in ["1", "12:A", ":A"] {
            assert!(
                matches!(parse_labels(spec), Err(GroupingError::InvalidLabel { .. })),
                "{spec:?} should be rejected"
            );
        }
    }
}
