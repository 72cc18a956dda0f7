//! Human-readable schedule report, grouped by port then weekday.

use std::fmt::Write as _;

use portcall_core::schedule::ScheduleResult;

/// Render the run result as a text report.
///
/// Each group gets its own block: either its per-weekday ranges (Sunday
/// first), one tab-separated `label<TAB>available` line per range, or a
/// no-overlap notice. Skipped groups trail with their failure message.
pub fn render(result: &ScheduleResult) -> String {
    let mut out = String::new();

    for group in &result.groups {
        let _ = writeln!(out, "\n{}", group.group);
        let Some(week) = &group.ranges else {
            let _ = writeln!(out, "{} does not have an overlapping time.", group.group);
            continue;
        };
        for (weekday, ranges) in week {
            let _ = writeln!(out, "Availabilities on {weekday}");
            for range in ranges {
                let _ = writeln!(out, "\t{}\t{}", range.label(), range.available_label());
            }
        }
    }

    for (group, reason) in &result.skipped {
        let _ = writeln!(out, "\n{group} could not be processed: {reason}");
    }

    out
}
