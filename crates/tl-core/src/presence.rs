//! Which days an instructor or a module is on the timetable.

use std::collections::{BTreeMap, BTreeSet};

use crate::weekday::Weekday;

/// Distinct-day and distinct-week counts for one entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    pub days: usize,
    pub weeks: usize,
}

/// Records `(week, weekday)` occurrences per entity name.
///
/// Two sessions on the same day count as one day of presence.
#[derive(Debug, Clone, Default)]
pub struct PresenceTracker {
    entries: BTreeMap<String, BTreeMap<u32, BTreeSet<Weekday>>>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `entity` as present on `weekday` of `week`.
    pub fn record(&mut self, entity: &str, week: u32, weekday: Weekday) {
        self.entries
            .entry(entity.to_string())
            .or_default()
            .entry(week)
            .or_default()
            .insert(weekday);
    }

    /// Presence counts for one entity, `None` if it was never recorded.
    pub fn presence(&self, entity: &str) -> Option<Presence> {
        self.entries.get(entity).map(count)
    }

    /// All entities with their presence, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Presence)> {
        self.entries
            .iter()
            .map(|(name, weeks)| (name.as_str(), count(weeks)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn count(weeks: &BTreeMap<u32, BTreeSet<Weekday>>) -> Presence {
    Presence {
        days: weeks.values().map(BTreeSet::len).sum(),
        weeks: weeks.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_counts_once() {
        let mut tracker = PresenceTracker::new();
        tracker.record("Dupont", 8, Weekday::Monday);
        tracker.record("Dupont", 8, Weekday::Monday);
        assert_eq!(tracker.presence("Dupont"), Some(Presence { days: 1, weeks: 1 }));
    }

    #[test]
    fn two_days_same_week() {
        let mut tracker = PresenceTracker::new();
        tracker.record("Dupont", 8, Weekday::Monday);
        tracker.record("Dupont", 8, Weekday::Tuesday);
        assert_eq!(tracker.presence("Dupont"), Some(Presence { days: 2, weeks: 1 }));
    }

    #[test]
    fn days_sum_across_weeks() {
        let mut tracker = PresenceTracker::new();
        tracker.record("Martin", 8, Weekday::Monday);
        tracker.record("Martin", 9, Weekday::Monday);
        tracker.record("Martin", 9, Weekday::Friday);
        tracker.record("Dupont", 3, Weekday::Wednesday);

        assert_eq!(tracker.presence("Martin"), Some(Presence { days: 3, weeks: 2 }));
        assert_eq!(tracker.presence("Nobody"), None);

        let names: Vec<&str> = tracker.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Dupont", "Martin"]);
        assert_eq!(tracker.len(), 2);
    }
}
