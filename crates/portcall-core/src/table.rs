//! In-memory availability tables and their CSV form.
//!
//! A table is an ordered list of rows, one per time slot, each carrying one
//! boolean per person. Column order is insertion order from the source, kept
//! as a plain `Vec<String>` rather than an index map. Every structural
//! guarantee -- unique columns, uniform row width, parseable labels and
//! cells -- is checked when the table is built, so downstream code can index
//! freely without re-validating.
//!
//! CSV format: header `Time,<id1>,<id2>,...`; `Time` cells are slot labels;
//! availability cells are `"0"`/`"1"`. Fields containing commas or quotes are
//! double-quoted with `""` escaping, since participant names are free text.

use std::collections::HashSet;
use std::mem::take;

use crate::error::{PortcallError, Result};
use crate::timeslot::TimeSlot;

/// One sampled row: the slot plus one flag per table column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub slot: TimeSlot,
    pub flags: Vec<bool>,
}

/// One group's per-slot, per-person boolean availability.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityTable {
    people: Vec<String>,
    rows: Vec<TableRow>,
}

impl AvailabilityTable {
    /// Build a validated table.
    ///
    /// # Errors
    /// [`PortcallError::MalformedTable`] on a duplicate person column or a row
    /// whose flag count differs from the column count.
    pub fn new(people: Vec<String>, rows: Vec<TableRow>) -> Result<Self> {
        let mut seen = HashSet::new();
        for person in &people {
            if !seen.insert(person.as_str()) {
                return Err(PortcallError::MalformedTable(format!(
                    "duplicate person column '{person}'"
                )));
            }
        }
        for row in &rows {
            if row.flags.len() != people.len() {
                return Err(PortcallError::MalformedTable(format!(
                    "row '{}' has {} cells for {} people",
                    row.slot.label(),
                    row.flags.len(),
                    people.len()
                )));
            }
        }
        Ok(AvailabilityTable { people, rows })
    }

    /// Person identifiers in column order.
    pub fn people(&self) -> &[String] {
        &self.people
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Column index of a person identifier, if present.
    pub fn person_index(&self, id: &str) -> Option<usize> {
        self.people.iter().position(|p| p == id)
    }

    /// Whether `id` is available at row `row`. `None` when either the row or
    /// the person does not exist.
    pub fn is_available(&self, row: usize, id: &str) -> Option<bool> {
        let person = self.person_index(id)?;
        Some(self.rows.get(row)?.flags[person])
    }

    /// Parse a table from CSV text.
    ///
    /// # Errors
    /// [`PortcallError::MalformedTable`] on structural problems, and
    /// [`PortcallError::MalformedTimeLabel`] when a `Time` cell fails to
    /// parse.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut records = parse_records(text).into_iter();
        let header = records
            .next()
            .ok_or_else(|| PortcallError::MalformedTable("empty table".to_string()))?;
        if header.first().map(String::as_str) != Some("Time") {
            return Err(PortcallError::MalformedTable(format!(
                "first column must be 'Time', got {:?}",
                header.first()
            )));
        }
        let people: Vec<String> = header[1..].to_vec();

        let mut rows = Vec::new();
        for record in records {
            if record.len() != people.len() + 1 {
                return Err(PortcallError::MalformedTable(format!(
                    "row '{}' has {} cells, expected {}",
                    record[0],
                    record.len(),
                    people.len() + 1
                )));
            }
            let slot = TimeSlot::parse_label(&record[0])?;
            let flags = record[1..]
                .iter()
                .map(|cell| match cell.as_str() {
                    "0" => Ok(false),
                    "1" => Ok(true),
                    other => Err(PortcallError::MalformedTable(format!(
                        "availability cell must be 0 or 1, got {other:?}"
                    ))),
                })
                .collect::<Result<Vec<bool>>>()?;
            rows.push(TableRow { slot, flags });
        }

        AvailabilityTable::new(people, rows)
    }

    /// Render the table back to CSV, trailing newline included.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Time");
        for person in &self.people {
            out.push(',');
            out.push_str(&escape_field(person));
        }
        out.push('\n');
        for row in &self.rows {
            out.push_str(&escape_field(&row.slot.label()));
            for &flag in &row.flags {
                out.push(',');
                out.push(if flag { '1' } else { '0' });
            }
            out.push('\n');
        }
        out
    }
}

/// Quote a field when it contains a comma, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split CSV text into records. Quote-tolerant: `"a,b"` is one field, `""`
/// inside quotes is a literal quote, and quoted fields may span CRLF. Blank
/// lines are skipped.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => record.push(take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(take(&mut field));
                if record.len() > 1 || !record[0].is_empty() {
                    records.push(take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Input without a trailing newline still yields its last record.
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}
