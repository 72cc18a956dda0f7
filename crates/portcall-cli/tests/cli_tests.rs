//! Integration tests for the `portcall` binary.
//!
//! Every test runs offline against a temporary data directory of prebuilt
//! CSV tables, so no network is involved.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

use portcall_core::store::CsvStore;
use portcall_core::table::{AvailabilityTable, TableRow};
use portcall_core::timeslot::TimeSlot;

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn row(label: &str, flags: &[bool]) -> TableRow {
    TableRow {
        slot: TimeSlot::parse_label(label).unwrap(),
        flags: flags.to_vec(),
    }
}

fn table(people: &[&str], rows: Vec<TableRow>) -> AvailabilityTable {
    AvailabilityTable::new(people.iter().map(|p| p.to_string()).collect(), rows).unwrap()
}

/// Media team: kim and lou both free 9:00-9:30 Sunday, only kim at 9:45.
fn media_table() -> AvailabilityTable {
    table(
        &["kim", "lou"],
        vec![
            row("Sunday 9:00:00 AM", &[true, true]),
            row("Sunday 9:15:00 AM", &[true, true]),
            row("Sunday 9:30:00 AM", &[true, true]),
            row("Sunday 9:45:00 AM", &[true, false]),
        ],
    )
}

/// Port whose directors overlap with the media team 9:00-9:30.
fn alpha_table() -> AvailabilityTable {
    table(
        &["ana", "ben"],
        vec![
            row("Sunday 9:00:00 AM", &[true, true]),
            row("Sunday 9:15:00 AM", &[true, true]),
            row("Sunday 9:30:00 AM", &[true, true]),
            row("Sunday 9:45:00 AM", &[false, true]),
        ],
    )
}

/// Port whose directors never show up: no overlap anywhere.
fn beta_table() -> AvailabilityTable {
    table(
        &["zoe"],
        vec![
            row("Sunday 9:00:00 AM", &[false]),
            row("Sunday 9:15:00 AM", &[false]),
        ],
    )
}

/// Port with a single isolated overlapping slot.
fn gamma_table() -> AvailabilityTable {
    table(
        &["max"],
        vec![
            row("Sunday 9:00:00 AM", &[true]),
            row("Sunday 9:15:00 AM", &[false]),
        ],
    )
}

/// Write a config file listing `groups`, with the store under `dir`/data.
fn write_config(dir: &Path, groups: &[&str]) -> PathBuf {
    let data_dir = dir.join("data");
    let mut text = format!("data-dir = {:?}\n\n[coordinator]\nid = \"media\"\nurl = \"https://www.when2meet.com/?1-a\"\n", data_dir);
    for group in groups {
        text.push_str(&format!(
            "\n[[groups]]\nid = \"{group}\"\nurl = \"https://www.when2meet.com/?{group}\"\n"
        ));
    }
    let path = dir.join("portcall.toml");
    std::fs::write(&path, text).unwrap();
    path
}

/// Populate the store with the given tables.
fn write_tables(dir: &Path, tables: &[(&str, AvailabilityTable)]) {
    let store = CsvStore::new(dir.join("data"));
    for (id, table) in tables {
        store.save(id, table).unwrap();
    }
}

fn portcall() -> Command {
    Command::cargo_bin("portcall").unwrap()
}

// ── Text report ──────────────────────────────────────────────────────────────

#[test]
fn reports_ranges_from_stored_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-alpha"]);
    write_tables(
        tmp.path(),
        &[("media", media_table()), ("port-alpha", alpha_table())],
    );

    portcall()
        .args(["--config", config.to_str().unwrap(), "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port-alpha"))
        .stdout(predicate::str::contains("Availabilities on Sunday"))
        .stdout(predicate::str::contains(
            "Sunday 09:00:00 AM - 09:30:00 AM\tkim, lou",
        ));
}

#[test]
fn reports_no_overlap_notice() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-beta"]);
    write_tables(
        tmp.path(),
        &[("media", media_table()), ("port-beta", beta_table())],
    );

    portcall()
        .args(["--config", config.to_str().unwrap(), "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "port-beta does not have an overlapping time.",
        ));
}

#[test]
fn no_overlap_group_does_not_block_the_next() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-beta", "port-alpha"]);
    write_tables(
        tmp.path(),
        &[
            ("media", media_table()),
            ("port-alpha", alpha_table()),
            ("port-beta", beta_table()),
        ],
    );

    portcall()
        .args(["--config", config.to_str().unwrap(), "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not have an overlapping time"))
        .stdout(predicate::str::contains("Availabilities on Sunday"));
}

#[test]
fn missing_group_table_is_reported_and_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-ghost", "port-alpha"]);
    write_tables(
        tmp.path(),
        &[("media", media_table()), ("port-alpha", alpha_table())],
    );

    portcall()
        .args(["--config", config.to_str().unwrap(), "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port-ghost could not be processed"))
        .stdout(predicate::str::contains("Availabilities on Sunday"));
}

#[test]
fn missing_coordinator_table_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-alpha"]);
    write_tables(tmp.path(), &[("port-alpha", alpha_table())]);

    portcall()
        .args(["--config", config.to_str().unwrap(), "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("media"));
}

// ── Flags ────────────────────────────────────────────────────────────────────

#[test]
fn min_media_override_tightens_the_threshold() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-alpha"]);
    write_tables(
        tmp.path(),
        &[("media", media_table()), ("port-alpha", alpha_table())],
    );

    // Only two media directors exist, so a threshold of 3 can never be met.
    portcall()
        .args([
            "--config",
            config.to_str().unwrap(),
            "--offline",
            "--min-media",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "port-alpha does not have an overlapping time.",
        ));
}

#[test]
fn keep_single_slots_emits_length_one_ranges() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-gamma"]);
    write_tables(
        tmp.path(),
        &[("media", media_table()), ("port-gamma", gamma_table())],
    );

    // Default policy drops the lone slot.
    portcall()
        .args(["--config", config.to_str().unwrap(), "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Availabilities on Sunday").not());

    portcall()
        .args([
            "--config",
            config.to_str().unwrap(),
            "--offline",
            "--keep-single-slots",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sunday 09:00:00 AM - 09:00:00 AM\tkim, lou",
        ));
}

#[test]
fn refresh_conflicts_with_offline() {
    portcall()
        .args(["--refresh", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ── JSON output ──────────────────────────────────────────────────────────────

#[test]
fn json_output_is_machine_readable() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path(), &["port-alpha", "port-beta"]);
    write_tables(
        tmp.path(),
        &[
            ("media", media_table()),
            ("port-alpha", alpha_table()),
            ("port-beta", beta_table()),
        ],
    );

    let output = portcall()
        .args(["--config", config.to_str().unwrap(), "--offline", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let groups = value["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["group"], "port-alpha");
    assert_eq!(
        groups[0]["ranges"]["Sunday"][0]["available"],
        serde_json::json!(["kim", "lou"])
    );
    assert_eq!(groups[1]["group"], "port-beta");
    assert!(groups[1]["ranges"].is_null());
}

// ── Errors and help ──────────────────────────────────────────────────────────

#[test]
fn missing_config_file_fails_with_the_path() {
    portcall()
        .args(["--config", "/nonexistent/portcall.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/portcall.toml"));
}

#[test]
fn help_shows_the_run_flags() {
    portcall()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--refresh"))
        .stdout(predicate::str::contains("--offline"))
        .stdout(predicate::str::contains("--json"));
}
