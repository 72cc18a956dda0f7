//! # portcall-core
//!
//! Availability overlap engine for group scheduling. Given per-person boolean
//! availability sampled on a fixed 15-minute grid (one table per group), the
//! engine joins a group's table against a coordinating group's table, keeps
//! the slots where the whole group and enough coordinators are available, and
//! collapses the survivors into maximal contiguous per-weekday time ranges
//! annotated with the coordinator subset available throughout each range.
//!
//! ## Quick start
//!
//! ```rust
//! use portcall_core::{
//!     consolidate_day, merge_tables, AvailabilityTable, SingleSlotPolicy, TableRow, TimeSlot,
//! };
//!
//! fn row(label: &str, flags: &[bool]) -> TableRow {
//!     TableRow {
//!         slot: TimeSlot::parse_label(label).unwrap(),
//!         flags: flags.to_vec(),
//!     }
//! }
//!
//! let port = AvailabilityTable::new(
//!     vec!["ana".into(), "ben".into()],
//!     vec![
//!         row("Sunday 9:00:00 AM", &[true, true]),
//!         row("Sunday 9:15:00 AM", &[true, true]),
//!     ],
//! )
//! .unwrap();
//! let media = AvailabilityTable::new(
//!     vec!["kim".into(), "lou".into()],
//!     vec![
//!         row("Sunday 9:00:00 AM", &[true, true]),
//!         row("Sunday 9:15:00 AM", &[true, false]),
//!     ],
//! )
//! .unwrap();
//!
//! let merged = merge_tables(&port, &media, 1);
//! let ranges = consolidate_day(&merged.rows, media.people(), SingleSlotPolicy::Drop);
//! assert_eq!(ranges[0].label(), "Sunday 09:00:00 AM - 09:15:00 AM");
//! assert_eq!(ranges[0].available, vec!["kim".to_string()]);
//! ```
//!
//! ## Modules
//!
//! - [`timeslot`] — weekdays and 12-hour slot labels on the 15-minute grid
//! - [`table`] — validated per-person availability tables and their CSV form
//! - [`merge`] — join two tables on matching slots, apply group predicates
//! - [`consolidate`] — collapse merged rows into contiguous ranges
//! - [`schedule`] — orchestration: load-or-acquire, merge, consolidate
//! - [`store`] — CSV-backed table store
//! - [`error`] — error types

pub mod consolidate;
pub mod error;
pub mod merge;
pub mod schedule;
pub mod store;
pub mod table;
pub mod timeslot;

pub use consolidate::{consolidate_day, Range, SingleSlotPolicy};
pub use error::PortcallError;
pub use merge::{merge_tables, JoinedRow, MergeOutcome, DEFAULT_MIN_COORDINATORS};
pub use schedule::{
    GroupRegistry, GroupSpec, GroupSchedule, RunOptions, ScheduleResult, Scheduler, TableLoader,
    TableSource, WeekRanges,
};
pub use store::CsvStore;
pub use table::{AvailabilityTable, TableRow};
pub use timeslot::{TimeSlot, Weekday, SLOT_MINUTES};
