//! Core types and traits for twinfile.
//!
//! This crate provides the fundamental data structures used throughout
//! the twinfile ecosystem: scan candidates, fingerprints, duplicate
//! groups, reports, and configuration.

mod candidate;
mod config;
mod error;
mod fingerprint;
mod group;

pub use candidate::FileCandidate;
pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use fingerprint::{Fingerprint, FingerprintMethod};
pub use group::{DuplicateGroup, ScanReport};
