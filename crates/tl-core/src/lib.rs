//! Core aggregation logic for teaching-load reports.
//!
//! This crate contains:
//! - Row parsing: turning schedule export rows into typed events
//! - Aggregation: presence per instructor/module and the module × instructor
//!   volume index
//! - Reporting: grouped text reports and summary tables

pub mod course;
pub mod cross_index;
pub mod grouping;
pub mod presence;
pub mod report;
pub mod row;
mod triplet;
pub mod weekday;
mod workload;

pub use course::CourseType;
pub use cross_index::{CrossIndex, NestedView};
pub use grouping::{GroupLevel, GroupingError};
pub use presence::{Presence, PresenceTracker};
pub use report::{ReportError, SummaryKind};
pub use row::{ColumnLayout, RowError, RowParser, ScheduleEvent};
pub use triplet::Triplet;
pub use weekday::Weekday;
pub use workload::{ResourceSummary, Workload, WorkloadBuilder};
