//! Error types for portcall operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortcallError {
    /// A `Time` cell that does not parse as `"<Weekday> <H:MM:SS> <AM/PM>"`.
    #[error("malformed time label: {0:?}")]
    MalformedTimeLabel(String),

    /// Structural problem in a table: bad header, duplicate person column,
    /// ragged row, or a cell that is neither "0" nor "1".
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// The scheduling page listed zero participants for the group.
    #[error("no participants found for group '{0}'")]
    NoParticipants(String),

    /// Acquisition exceeded its deadline.
    #[error("acquisition for group '{group}' timed out after {seconds}s")]
    AcquisitionTimeout { group: String, seconds: u64 },

    /// Acquisition failed for a reason other than the deadline.
    #[error("acquisition for group '{group}' failed: {message}")]
    Acquisition { group: String, message: String },

    /// No stored table exists for the group and acquisition is disabled.
    #[error("no stored table for group '{0}' and acquisition is disabled")]
    DataUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PortcallError>;
