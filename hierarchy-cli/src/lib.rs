//! # Hierarchy CLI
//!
//! Pieces shared by the `export-hierarchy` and `seed-hierarchy` binaries:
//!
//! * [`cli`]: command-line arguments and how they override the settings file.
//! * [`formatter`]: colored, human readable output for results and errors.
//! * [`hostname`]: deriving the functional location and asset names from the host name.
//! * [`logging`]: the `tracing` subscriber both tools install at startup.
//! * [`session`]: loading settings and connecting, exiting on fatal errors.
pub mod cli;
pub mod formatter;
pub mod hostname;
pub mod logging;
pub mod session;

/// Exit code of a run that finished, but could not export or create everything.
pub const EXIT_PARTIAL: i32 = 2;
