//! Schedule orchestration -- load or acquire tables, merge, consolidate.
//!
//! The orchestrator is handed an explicit [`GroupRegistry`] and an optional
//! acquisition collaborator; there is no global configuration. The coordinator
//! table is obtained once per run and reused read-only across groups. A group
//! whose table cannot be obtained is skipped with a warning and reported in
//! [`ScheduleResult::skipped`]; a missing coordinator table aborts the run.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::consolidate::{consolidate_day, Range, SingleSlotPolicy};
use crate::error::{PortcallError, Result};
use crate::merge::{merge_tables, JoinedRow, DEFAULT_MIN_COORDINATORS};
use crate::store::CsvStore;
use crate::table::AvailabilityTable;
use crate::timeslot::Weekday;

/// One group to schedule: an opaque identifier plus its acquisition address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub id: String,
    pub url: String,
}

/// The full set of groups for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRegistry {
    /// The coordinating group whose members must jointly staff every range.
    pub coordinator: GroupSpec,
    /// The groups to match against the coordinator, in report order. The
    /// coordinator itself is skipped if listed here.
    pub groups: Vec<GroupSpec>,
}

/// Acquisition collaborator: produces a fresh table for a group.
///
/// Implementations own their time budget; an acquisition that exceeds it must
/// fail with [`PortcallError::AcquisitionTimeout`] and release any underlying
/// resource on the way out.
pub trait TableSource {
    fn acquire(&self, spec: &GroupSpec) -> Result<AvailabilityTable>;
}

/// Options for a scheduling run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Re-acquire every table even when a stored copy exists.
    pub refresh: bool,
    /// Minimum coordinators that must be available in any kept slot.
    pub min_coordinators: usize,
    /// Single-slot run handling during consolidation.
    pub single_slot: SingleSlotPolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            refresh: false,
            min_coordinators: DEFAULT_MIN_COORDINATORS,
            single_slot: SingleSlotPolicy::default(),
        }
    }
}

/// Loads a group's table from the store, falling back to acquisition.
pub struct TableLoader<'a> {
    store: &'a CsvStore,
    source: Option<&'a dyn TableSource>,
    refresh: bool,
}

impl<'a> TableLoader<'a> {
    pub fn new(store: &'a CsvStore, source: Option<&'a dyn TableSource>, refresh: bool) -> Self {
        TableLoader {
            store,
            source,
            refresh,
        }
    }

    /// Load the group's table.
    ///
    /// A store hit without `refresh` returns the stored copy untouched.
    /// Otherwise the table is acquired, persisted, and returned. With
    /// acquisition disabled (`source` is `None`), a store miss is
    /// [`PortcallError::DataUnavailable`].
    pub fn load(&self, spec: &GroupSpec) -> Result<AvailabilityTable> {
        if !self.refresh && self.store.contains(&spec.id) {
            return self.store.load(&spec.id);
        }
        let Some(source) = self.source else {
            return Err(PortcallError::DataUnavailable(spec.id.clone()));
        };
        let table = source.acquire(spec)?;
        self.store.save(&spec.id, &table)?;
        info!(
            "stored table for '{}' ({} people, {} slots)",
            spec.id,
            table.people().len(),
            table.rows().len()
        );
        Ok(table)
    }
}

/// Ranges for one group, keyed by weekday in Sunday-first order.
pub type WeekRanges = BTreeMap<Weekday, Vec<Range>>;

/// Outcome for one group that was processed to completion.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSchedule {
    pub group: String,
    /// `None` when the merge produced no overlapping slots.
    pub ranges: Option<WeekRanges>,
}

/// A whole run: processed groups in registry order, plus the groups that were
/// skipped because their table could not be obtained.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleResult {
    pub groups: Vec<GroupSchedule>,
    /// `(group id, failure message)` per skipped group.
    pub skipped: Vec<(String, String)>,
}

/// Runs the whole pipeline over a registry.
pub struct Scheduler<'a> {
    store: &'a CsvStore,
    source: Option<&'a dyn TableSource>,
}

impl<'a> Scheduler<'a> {
    pub fn new(store: &'a CsvStore, source: Option<&'a dyn TableSource>) -> Self {
        Scheduler { store, source }
    }

    /// Process every group in the registry against the coordinator table.
    ///
    /// # Errors
    /// Only coordinator-table failures abort the run; per-group failures are
    /// logged and recorded in [`ScheduleResult::skipped`].
    pub fn run(&self, registry: &GroupRegistry, options: &RunOptions) -> Result<ScheduleResult> {
        let loader = TableLoader::new(self.store, self.source, options.refresh);
        let coordinators = loader.load(&registry.coordinator)?;
        let coordinator_ids = coordinators.people().to_vec();

        let mut result = ScheduleResult::default();
        for spec in &registry.groups {
            if spec.id == registry.coordinator.id {
                continue;
            }
            let table = match loader.load(spec) {
                Ok(table) => table,
                Err(err) => {
                    warn!("skipping group '{}': {err}", spec.id);
                    result.skipped.push((spec.id.clone(), err.to_string()));
                    continue;
                }
            };

            let outcome = merge_tables(&table, &coordinators, options.min_coordinators);
            if outcome.unmatched_rows > 0 {
                warn!(
                    "group '{}': {} rows had no matching coordinator slot",
                    spec.id, outcome.unmatched_rows
                );
            }
            if outcome.rows.is_empty() {
                result.groups.push(GroupSchedule {
                    group: spec.id.clone(),
                    ranges: None,
                });
                continue;
            }

            let mut by_day: BTreeMap<Weekday, Vec<JoinedRow>> = BTreeMap::new();
            for row in outcome.rows {
                by_day.entry(row.slot.weekday).or_default().push(row);
            }
            let mut week = WeekRanges::new();
            for (weekday, mut rows) in by_day {
                rows.sort_by_key(|row| row.slot.time);
                let ranges = consolidate_day(&rows, &coordinator_ids, options.single_slot);
                if !ranges.is_empty() {
                    week.insert(weekday, ranges);
                }
            }
            result.groups.push(GroupSchedule {
                group: spec.id.clone(),
                ranges: Some(week),
            });
        }

        Ok(result)
    }
}
