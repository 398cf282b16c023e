//! Fingerprinting, grouping, and reporting for twinfile.
//!
//! This crate turns the scanner's candidate list into a duplicate
//! report:
//!
//! - **Fingerprinting** - MD5 or SHA-256 content hashes computed in
//!   fixed-size chunks, or size-only comparison with no content I/O
//! - **Grouping** - candidates bucketed by fingerprint equality;
//!   singleton buckets are dropped, survivors become duplicate groups
//!   with wasted-space accounting
//! - **Reporting** - human-readable rendering and flat-text persistence
//!
//! # Finding duplicates
//!
//! ```rust,ignore
//! use twinfile_analyze::{DuplicateConfig, DuplicateFinder};
//! use twinfile_core::FingerprintMethod;
//! use twinfile_scan::{ScanConfig, Scanner};
//!
//! let outcome = Scanner::new().scan(&ScanConfig::new("/path")).unwrap();
//!
//! let config = DuplicateConfig::builder()
//!     .method(FingerprintMethod::Md5)
//!     .build()
//!     .unwrap();
//! let report = DuplicateFinder::with_config(config)
//!     .group_with_warnings(outcome.candidates, outcome.warnings);
//!
//! println!("Found {} duplicate groups", report.total_groups);
//! println!("Wasted space: {} bytes", report.total_wasted_bytes);
//! ```
//!
//! # Rendering a report
//!
//! ```rust,ignore
//! let text = twinfile_analyze::report::render(&report);
//! twinfile_analyze::report::persist(&report, "duplicate_report.txt".as_ref())?;
//! ```

mod duplicates;
pub mod report;

pub use duplicates::{
    DuplicateConfig, DuplicateConfigBuilder, DuplicateFinder, UnreadableFile, DEFAULT_CHUNK_SIZE,
};
pub use report::ReportError;

// Re-export core types
pub use twinfile_core::{DuplicateGroup, FileCandidate, Fingerprint, FingerprintMethod, ScanReport};
