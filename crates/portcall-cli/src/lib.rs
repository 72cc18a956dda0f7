//! Library surface of the `portcall` binary -- configuration loading,
//! when2meet acquisition, and report rendering. Kept out of `main` so
//! integration tests can exercise the pieces directly.

pub mod config;
pub mod report;
pub mod when2meet;
