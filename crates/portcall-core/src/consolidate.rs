//! Run-length consolidation of merged rows into contiguous time ranges.
//!
//! Walks one weekday's rows in order and merges neighbors exactly 15 minutes
//! apart into maximal runs. Each closed run becomes a [`Range`] annotated with
//! the coordinators available at *every* slot inside it.

use serde::Serialize;

use crate::merge::JoinedRow;
use crate::timeslot::{TimeSlot, Weekday, SLOT_MINUTES};

/// What to do with a run that covers exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SingleSlotPolicy {
    /// Discard it -- the historical behavior: a slot with no 15-minute
    /// neighbor never becomes a range.
    #[default]
    Drop,
    /// Emit it as a range whose start and end coincide.
    Emit,
}

/// A maximal contiguous run of slots, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Range {
    pub weekday: Weekday,
    pub start: TimeSlot,
    pub end: TimeSlot,
    /// Coordinators available at every slot in `[start, end]`, in coordinator
    /// column order.
    pub available: Vec<String>,
}

impl Range {
    /// `"<Weekday> <start clock> - <end clock>"`, e.g.
    /// `"Sunday 09:00:00 AM - 10:30:00 AM"`.
    pub fn label(&self) -> String {
        format!(
            "{} {} - {}",
            self.weekday,
            self.start.clock_label(),
            self.end.clock_label()
        )
    }

    /// Comma-joined coordinator list; empty string when none qualify.
    pub fn available_label(&self) -> String {
        self.available.join(", ")
    }
}

/// Collapse one weekday's rows into maximal contiguous ranges.
///
/// `rows` must share a single weekday and be sorted ascending by time of day;
/// the function consumes caller order and never re-sorts. A run is extended
/// while consecutive rows are exactly [`SLOT_MINUTES`] apart and closed on any
/// other delta, then once more at end of input. `coordinator_ids` must be
/// parallel to the rows' coordinator flags.
pub fn consolidate_day(
    rows: &[JoinedRow],
    coordinator_ids: &[String],
    policy: SingleSlotPolicy,
) -> Vec<Range> {
    let mut ranges = Vec::new();
    if rows.is_empty() {
        return ranges;
    }

    let mut start = 0;
    let mut prev = 0;
    for (index, row) in rows.iter().enumerate().skip(1) {
        if row.slot.minutes_since(&rows[prev].slot) == Some(SLOT_MINUTES) {
            prev = index;
        } else {
            close_run(rows, start, prev, coordinator_ids, policy, &mut ranges);
            start = index;
            prev = index;
        }
    }
    close_run(rows, start, prev, coordinator_ids, policy, &mut ranges);

    ranges
}

/// Close the run `rows[start..=prev]`, appending a [`Range`] unless it is a
/// single slot under [`SingleSlotPolicy::Drop`].
fn close_run(
    rows: &[JoinedRow],
    start: usize,
    prev: usize,
    coordinator_ids: &[String],
    policy: SingleSlotPolicy,
    ranges: &mut Vec<Range>,
) {
    if start == prev && policy == SingleSlotPolicy::Drop {
        return;
    }
    let run = &rows[start..=prev];
    let available = coordinator_ids
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            run.iter()
                .all(|row| row.coordinators.get(*index).copied().unwrap_or(false))
        })
        .map(|(_, id)| id.clone())
        .collect();
    ranges.push(Range {
        weekday: rows[start].slot.weekday,
        start: rows[start].slot,
        end: rows[prev].slot,
        available,
    });
}
