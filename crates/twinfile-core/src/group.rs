//! Duplicate group and scan report types.

use serde::{Deserialize, Serialize};

use crate::{FileCandidate, Fingerprint, FingerprintMethod, ScanWarning};

/// A group of candidates sharing one fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Fingerprint shared by every member.
    pub fingerprint: Fingerprint,

    /// Size of each member in bytes. Members of a group always share a
    /// size: hash-equal files of differing length are impossible, and
    /// size fingerprints are equal by construction.
    pub size: u64,

    /// Members in discovery order. Always at least two; singleton
    /// buckets are dropped before a group is built.
    pub members: Vec<FileCandidate>,

    /// Reclaimable space: size * (members - 1).
    pub wasted_bytes: u64,
}

impl DuplicateGroup {
    /// Number of files in this group.
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// How many files could be deleted, keeping one.
    pub fn deletable_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }
}

/// Results of one grouping run. Immutable after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Method used for every fingerprint in this run.
    pub method: FingerprintMethod,

    /// Duplicate groups, sorted by wasted space descending.
    pub groups: Vec<DuplicateGroup>,

    /// Number of duplicate groups.
    pub total_groups: usize,

    /// Total reclaimable bytes across all groups.
    pub total_wasted_bytes: u64,

    /// Candidates successfully fingerprinted.
    pub files_fingerprinted: u64,

    /// Candidates excluded because they could not be read.
    pub files_skipped: u64,

    /// Recovered per-file conditions from scanning and fingerprinting.
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Total number of duplicate files across all groups.
    pub fn total_duplicate_files(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }

    /// How many files a deduplication pass would attempt to delete.
    pub fn deletable_files(&self) -> usize {
        self.groups.iter().map(|g| g.deletable_count()).sum()
    }
}
