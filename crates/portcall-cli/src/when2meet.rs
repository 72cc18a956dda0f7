//! when2meet acquisition -- fetch an event page and rebuild its availability
//! table without a browser.
//!
//! An event page embeds everything needed in inline scripts and slot markup:
//!
//! ```text
//! PeopleNames[0] = 'Hae';PeopleIDs[0] = 11223344;
//! AvailableAtSlot[3].push(11223344);
//! TimeOfSlot[3] = 1610312400;
//! <div id="GroupTime1610312400" onmouseover='ShowSlot(1610312400,"Sunday 9:00:00 AM");' ...>
//! ```
//!
//! The `GroupTime` mouseover handler carries the human-readable slot label the
//! rest of the pipeline keys on; `TimeOfSlot` ties slot indices to those divs,
//! and `AvailableAtSlot` holds the participant-id set per slot. Extraction is
//! plain string scanning over the page text.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use log::info;

use portcall_core::error::{PortcallError, Result};
use portcall_core::schedule::{GroupSpec, TableSource};
use portcall_core::table::{AvailabilityTable, TableRow};
use portcall_core::timeslot::TimeSlot;

/// Default acquisition deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking when2meet page source with a per-request deadline.
///
/// The deadline covers connect, request, and body read; on expiry the request
/// is abandoned, the connection is dropped, and the acquisition fails with
/// [`PortcallError::AcquisitionTimeout`]. No state survives a failed fetch.
pub struct When2MeetSource {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl When2MeetSource {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(When2MeetSource { client, timeout })
    }

    fn fetch(&self, spec: &GroupSpec) -> Result<String> {
        let response = self
            .client
            .get(&spec.url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|err| self.classify(spec, err))?;
        response.text().map_err(|err| self.classify(spec, err))
    }

    fn classify(&self, spec: &GroupSpec, err: reqwest::Error) -> PortcallError {
        if err.is_timeout() {
            PortcallError::AcquisitionTimeout {
                group: spec.id.clone(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            PortcallError::Acquisition {
                group: spec.id.clone(),
                message: err.to_string(),
            }
        }
    }
}

impl TableSource for When2MeetSource {
    fn acquire(&self, spec: &GroupSpec) -> Result<AvailabilityTable> {
        info!("acquiring '{}' from {}", spec.id, spec.url);
        let page = self.fetch(spec)?;
        parse_event_page(&page, &spec.id)
    }
}

/// Decode a when2meet event page into an availability table.
///
/// Columns are participants in page order; rows are slots in `TimeOfSlot`
/// order, keyed by the `GroupTime` label.
///
/// # Errors
/// [`PortcallError::NoParticipants`] when the page lists nobody,
/// [`PortcallError::Acquisition`] when expected inline data is missing, and
/// label parse failures propagate as [`PortcallError::MalformedTimeLabel`].
pub fn parse_event_page(page: &str, group: &str) -> Result<AvailabilityTable> {
    let people = parse_people(page);
    if people.is_empty() {
        return Err(PortcallError::NoParticipants(group.to_string()));
    }

    let slot_times = parse_slot_times(page);
    if slot_times.is_empty() {
        return Err(PortcallError::Acquisition {
            group: group.to_string(),
            message: "page has no TimeOfSlot data".to_string(),
        });
    }
    let labels = parse_slot_labels(page);
    let available = parse_available(page);

    let mut rows = Vec::with_capacity(slot_times.len());
    for (index, time_id) in slot_times {
        let label = labels.get(&time_id).ok_or_else(|| PortcallError::Acquisition {
            group: group.to_string(),
            message: format!("no GroupTime label for slot {time_id}"),
        })?;
        let slot = TimeSlot::parse_label(label)?;
        let ids_at_slot = available.get(&index);
        let flags = people
            .iter()
            .map(|(_, person_id)| ids_at_slot.is_some_and(|ids| ids.contains(person_id)))
            .collect();
        rows.push(TableRow { slot, flags });
    }

    let names = people.into_iter().map(|(name, _)| name).collect();
    AvailabilityTable::new(names, rows)
}

/// `PeopleNames[i] = 'Name';PeopleIDs[i] = N;` pairs, in page order.
fn parse_people(page: &str) -> Vec<(String, i64)> {
    let mut people = Vec::new();
    for chunk in page.split("PeopleNames[").skip(1) {
        let Some(name) = single_quoted(chunk) else {
            continue;
        };
        let Some(id) = int_after(chunk, "PeopleIDs[") else {
            continue;
        };
        people.push((name, id));
    }
    people
}

/// `TimeOfSlot[i] = N;` as (slot index, time id) pairs, in page order.
fn parse_slot_times(page: &str) -> Vec<(usize, i64)> {
    let mut slots = Vec::new();
    for chunk in page.split("TimeOfSlot[").skip(1) {
        let Some((index, rest)) = chunk.split_once(']') else {
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        let Some(eq) = rest.find('=') else {
            continue;
        };
        let Some(time_id) = leading_int(&rest[eq + 1..]) else {
            continue;
        };
        slots.push((index, time_id));
    }
    slots
}

/// `AvailableAtSlot[i].push(N);` accumulated into per-slot id sets.
fn parse_available(page: &str) -> HashMap<usize, HashSet<i64>> {
    let mut available: HashMap<usize, HashSet<i64>> = HashMap::new();
    for chunk in page.split("AvailableAtSlot[").skip(1) {
        let Some((index, rest)) = chunk.split_once(']') else {
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        let Some(rest) = rest.strip_prefix(".push(") else {
            continue;
        };
        let Some(person_id) = leading_int(rest) else {
            continue;
        };
        available.entry(index).or_default().insert(person_id);
    }
    available
}

/// Slot labels keyed by time id, from each `GroupTime<N>` div's mouseover
/// handler: the label is the first double-quoted run inside the handler.
fn parse_slot_labels(page: &str) -> HashMap<i64, String> {
    let mut labels = HashMap::new();
    let mut from = 0;
    while let Some(found) = page[from..].find("GroupTime") {
        let at = from + found;
        from = at + "GroupTime".len();
        let Some(time_id) = leading_int(&page[from..]) else {
            continue;
        };
        // The enclosing tag.
        let Some(open) = page[..at].rfind('<') else {
            continue;
        };
        let Some(close) = page[at..].find('>') else {
            continue;
        };
        let tag = &page[open..at + close];
        let Some(over) = tag.find("onmouseover") else {
            continue;
        };
        let mut quoted = tag[over..].split('"');
        quoted.next();
        if let Some(label) = quoted.next() {
            labels.entry(time_id).or_insert_with(|| label.to_string());
        }
    }
    labels
}

/// First single-quoted string in `s`, unescaping `\'` and `\\`.
fn single_quoted(s: &str) -> Option<String> {
    let start = s.find('\'')? + 1;
    let mut out = String::new();
    let mut chars = s[start..].chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '\'' => return Some(out),
            _ => out.push(c),
        }
    }
    None
}

/// Integer at the start of `s`, after optional whitespace.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
        .last()
        .map(|(i, c)| i + c.len_utf8())?;
    s[..end].parse().ok()
}

/// First integer following `pat` and an `=` sign in `s`.
fn int_after(s: &str, pat: &str) -> Option<i64> {
    let rest = &s[s.find(pat)? + pat.len()..];
    let rest = &rest[rest.find('=')? + 1..];
    leading_int(rest)
}
