//! Aggregation of schedule events into per-resource workload.
//!
//! Ingestion goes through a [`WorkloadBuilder`]; [`WorkloadBuilder::finish`]
//! derives the summaries and hands back a read-only [`Workload`]. Summaries
//! only exist on the finished value, so nothing can observe them while rows
//! are still being added.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cross_index::{CrossIndex, NestedView};
use crate::presence::PresenceTracker;
use crate::row::ScheduleEvent;
use crate::triplet::Triplet;

/// Final figures for one instructor or one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResourceSummary {
    /// Distinct days with at least one session.
    pub days: usize,
    /// Distinct weeks with at least one session.
    pub weeks: usize,
    /// Total teaching volume.
    pub volume: Triplet,
    /// Modules taught (instructor) or instructors involved (module).
    pub others: usize,
}

impl ResourceSummary {
    /// Average raw hours per day of presence.
    #[allow(clippy::cast_precision_loss)]
    pub fn hours_per_day(&self) -> f64 {
        if self.days == 0 {
            0.0
        } else {
            self.volume.sum() / self.days as f64
        }
    }
}

/// Collects events during ingestion.
#[derive(Debug, Default)]
pub struct WorkloadBuilder {
    instructor_presence: PresenceTracker,
    module_presence: PresenceTracker,
    index: CrossIndex,
    events: usize,
}

impl WorkloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one session to presence and volume.
    pub fn add(&mut self, event: &ScheduleEvent) {
        self.instructor_presence
            .record(&event.instructor, event.week, event.weekday);
        self.module_presence
            .record(&event.module, event.week, event.weekday);
        self.index
            .add_one(&event.instructor, &event.module, event.course_type, event.hours);
        self.events += 1;
    }

    /// Number of events added so far.
    pub const fn event_count(&self) -> usize {
        self.events
    }

    /// Derives every summary and freezes the aggregate.
    pub fn finish(self) -> Workload {
        let instructors = summarize(&self.instructor_presence, &self.index.by_instructor());
        let modules = summarize(&self.module_presence, &self.index.by_module());

        tracing::debug!(
            events = self.events,
            instructors = instructors.len(),
            modules = modules.len(),
            pairs = self.index.len(),
            "aggregation complete"
        );

        Workload {
            index: self.index,
            instructors,
            modules,
            events: self.events,
        }
    }
}

fn summarize(presence: &PresenceTracker, view: &NestedView<'_>) -> BTreeMap<String, ResourceSummary> {
    let mut summaries: BTreeMap<String, ResourceSummary> = BTreeMap::new();
    for (name, counts) in presence.iter() {
        let summary = summaries.entry(name.to_string()).or_default();
        summary.days = counts.days;
        summary.weeks = counts.weeks;
    }
    for (name, paired) in view {
        let summary = summaries.entry((*name).to_string()).or_default();
        summary.volume = paired.values().sum();
        summary.others = paired.len();
    }
    summaries
}

/// Aggregated workload of a whole schedule export.
#[derive(Debug, Clone)]
pub struct Workload {
    index: CrossIndex,
    instructors: BTreeMap<String, ResourceSummary>,
    modules: BTreeMap<String, ResourceSummary>,
    events: usize,
}

impl Workload {
    /// Builds a workload from a sequence of events.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a ScheduleEvent>) -> Self {
        let mut builder = WorkloadBuilder::new();
        for event in events {
            builder.add(event);
        }
        builder.finish()
    }

    pub const fn index(&self) -> &CrossIndex {
        &self.index
    }

    /// Per-instructor summaries in name order.
    pub const fn instructors(&self) -> &BTreeMap<String, ResourceSummary> {
        &self.instructors
    }

    /// Per-module summaries in id order.
    pub const fn modules(&self) -> &BTreeMap<String, ResourceSummary> {
        &self.modules
    }

    pub fn instructor(&self, name: &str) -> Option<&ResourceSummary> {
        self.instructors.get(name)
    }

    pub fn module(&self, id: &str) -> Option<&ResourceSummary> {
        self.modules.get(id)
    }

    /// Number of events aggregated.
    pub const fn event_count(&self) -> usize {
        self.events
    }

    /// Volume of every session in the export.
    pub fn total(&self) -> Triplet {
        self.index.iter().map(|(_, _, volume)| volume).sum()
    }
}
