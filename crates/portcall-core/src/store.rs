//! CSV-backed table store -- one file per group under a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::table::AvailabilityTable;

/// Stores one `<group>.csv` per group identifier.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvStore { dir: dir.into() }
    }

    /// Directory the store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a group's table file.
    pub fn path(&self, group: &str) -> PathBuf {
        self.dir.join(format!("{group}.csv"))
    }

    /// Whether a stored table exists for the group.
    pub fn contains(&self, group: &str) -> bool {
        self.path(group).is_file()
    }

    /// Read and parse a group's stored table.
    pub fn load(&self, group: &str) -> Result<AvailabilityTable> {
        let text = fs::read_to_string(self.path(group))?;
        AvailabilityTable::from_csv(&text)
    }

    /// Persist a group's table, creating the directory if needed.
    pub fn save(&self, group: &str, table: &AvailabilityTable) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(group), table.to_csv())?;
        Ok(())
    }
}
