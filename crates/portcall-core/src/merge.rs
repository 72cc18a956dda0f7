//! Overlap merge -- join two availability tables on matching time slots and
//! filter by group-wise predicates.
//!
//! The join is an inner join on exact slot equality, which means slots present
//! in only one table are dropped. That drop is deliberate (it mirrors the
//! historical behavior) but it is counted, so callers can tell when two
//! sources disagree about the grid instead of losing rows invisibly.

use std::collections::HashMap;

use crate::table::AvailabilityTable;
use crate::timeslot::TimeSlot;

/// Default minimum number of coordinators that must be available in a slot.
pub const DEFAULT_MIN_COORDINATORS: usize = 2;

/// One slot present in both tables, with both groups' flags.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub slot: TimeSlot,
    /// Parallel to the group table's columns.
    pub group: Vec<bool>,
    /// Parallel to the coordinator table's columns.
    pub coordinators: Vec<bool>,
}

/// Result of merging a group table against the coordinator table.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Rows that passed the join and both predicates, in group-table order.
    /// Empty is a first-class outcome: no slot satisfies both groups.
    pub rows: Vec<JoinedRow>,
    /// Group rows that had no coordinator row with the same slot. They are
    /// dropped from `rows`; this count is the only trace they leave.
    pub unmatched_rows: usize,
}

/// Join `group` against `coordinators` on slot equality, keeping rows where
/// every group member is available and at least `min_coordinators`
/// coordinators are.
///
/// Pure transform over the inputs; row order follows the group table.
pub fn merge_tables(
    group: &AvailabilityTable,
    coordinators: &AvailabilityTable,
    min_coordinators: usize,
) -> MergeOutcome {
    let by_slot: HashMap<TimeSlot, usize> = coordinators
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| (row.slot, index))
        .collect();

    let mut outcome = MergeOutcome::default();
    for row in group.rows() {
        let Some(&index) = by_slot.get(&row.slot) else {
            outcome.unmatched_rows += 1;
            continue;
        };
        if !row.flags.iter().all(|&available| available) {
            continue;
        }
        let coordinator_row = &coordinators.rows()[index];
        let available = coordinator_row.flags.iter().filter(|&&f| f).count();
        if available < min_coordinators {
            continue;
        }
        outcome.rows.push(JoinedRow {
            slot: row.slot,
            group: row.flags.clone(),
            coordinators: coordinator_row.flags.clone(),
        });
    }
    outcome
}
