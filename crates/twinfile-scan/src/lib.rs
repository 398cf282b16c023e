//! Candidate scanning engine for twinfile.
//!
//! This crate walks a directory tree and produces the list of regular
//! files eligible for fingerprinting.
//!
//! # Overview
//!
//! `twinfile-scan` is responsible for traversal and filtering. Key
//! behaviors:
//!
//! - **Deterministic enumeration** via sorted jwalk traversal, so a rerun
//!   over an unchanged tree yields identical candidates and grouping
//! - **Skip-and-continue** on per-file errors; only a missing or
//!   non-directory root is fatal
//! - **Filtering** by minimum size and glob ignore patterns before any
//!   content is read
//!
//! # Example
//!
//! ```rust,no_run
//! use twinfile_scan::{ScanConfig, Scanner};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let outcome = Scanner::new().scan(&config).unwrap();
//!
//! println!("{} candidates", outcome.candidates.len());
//! println!("{} files skipped", outcome.warnings.len());
//! ```

mod scanner;

pub use scanner::{ScanOutcome, Scanner};

// Re-export core types for convenience
pub use twinfile_core::{FileCandidate, ScanConfig, ScanError, ScanWarning, WarningKind};
