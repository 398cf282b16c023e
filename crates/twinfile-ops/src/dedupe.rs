//! Duplicate deletion under a retention policy.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use twinfile_core::{DuplicateGroup, FileCandidate, ScanReport};

/// Rule selecting which member of a duplicate group survives deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionPolicy {
    /// Keep the member discovered earliest in the scan.
    #[default]
    #[serde(rename = "first")]
    KeepFirst,
    /// Keep the member with the latest modification time.
    #[serde(rename = "newest")]
    KeepNewest,
    /// Keep the member with the earliest modification time.
    #[serde(rename = "oldest")]
    KeepOldest,
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepFirst => write!(f, "first"),
            Self::KeepNewest => write!(f, "newest"),
            Self::KeepOldest => write!(f, "oldest"),
        }
    }
}

/// Options for a deduplication pass.
#[derive(Debug, Clone, Default)]
pub struct DedupeOptions {
    /// Which member of each group to retain.
    pub policy: RetentionPolicy,
    /// Move files to the system trash instead of deleting permanently.
    pub use_trash: bool,
}

impl DedupeOptions {
    /// Create options for permanent deletion under the given policy.
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            use_trash: false,
        }
    }

    /// Create options that route removals through the system trash.
    pub fn with_trash(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            use_trash: true,
        }
    }
}

/// A deletion that failed; processing continued past it.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{path}: {message}")]
pub struct DeleteError {
    /// The file that could not be removed.
    pub path: PathBuf,
    /// Human-readable failure message.
    pub message: String,
}

/// Outcome of a deduplication pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletionResult {
    /// Files successfully removed.
    pub deleted_count: usize,
    /// Files that could not be removed.
    pub failed_count: usize,
    /// Bytes reclaimed; counts successful deletions only.
    pub freed_bytes: u64,
    /// Per-file failures.
    pub errors: Vec<DeleteError>,
}

impl DeletionResult {
    /// Check if every attempted deletion succeeded.
    pub fn is_success(&self) -> bool {
        self.failed_count == 0
    }

    /// Get a human-readable summary of the pass.
    pub fn summary(&self) -> String {
        if self.failed_count == 0 {
            format!("Deleted {} files", self.deleted_count)
        } else {
            format!(
                "Deleted {} files, {} failed",
                self.deleted_count, self.failed_count
            )
        }
    }
}

/// Select the member of `group` the policy retains.
///
/// Ties on modification time go to the earliest discovery order, so the
/// choice does not depend on how the members happen to be arranged.
pub fn retained_member(group: &DuplicateGroup, policy: RetentionPolicy) -> Option<&FileCandidate> {
    let mut members = group.members.iter();
    let mut best = members.next()?;

    for member in members {
        let replace = match policy {
            RetentionPolicy::KeepFirst => member.index < best.index,
            RetentionPolicy::KeepNewest => match member.modified.cmp(&best.modified) {
                Ordering::Greater => true,
                Ordering::Equal => member.index < best.index,
                Ordering::Less => false,
            },
            RetentionPolicy::KeepOldest => match member.modified.cmp(&best.modified) {
                Ordering::Less => true,
                Ordering::Equal => member.index < best.index,
                Ordering::Greater => false,
            },
        };
        if replace {
            best = member;
        }
    }

    Some(best)
}

/// Apply the retention policy to every group in the report.
///
/// Nothing is deleted unless `confirmed` is true; the caller owns the
/// confirmation gate. The report itself is never mutated. A failure on
/// one member is recorded and processing continues with the rest.
pub fn apply(report: &ScanReport, options: &DedupeOptions, confirmed: bool) -> DeletionResult {
    let mut result = DeletionResult::default();

    if !confirmed {
        tracing::info!("deletion not confirmed, nothing removed");
        return result;
    }

    for group in &report.groups {
        let Some(retained) = retained_member(group, options.policy) else {
            continue;
        };
        let retained_index = retained.index;

        tracing::debug!(
            fingerprint = %group.fingerprint.summary(),
            keep = %retained.path.display(),
            "processing group"
        );

        for member in &group.members {
            if member.index == retained_index {
                continue;
            }

            match delete_file(&member.path, options.use_trash) {
                Ok(()) => {
                    result.deleted_count += 1;
                    result.freed_bytes += member.size;
                }
                Err(err) => {
                    tracing::warn!(path = %member.path.display(), "deletion failed: {err}");
                    result.failed_count += 1;
                    result.errors.push(err);
                }
            }
        }
    }

    result
}

/// Remove one file, permanently or via the system trash.
fn delete_file(path: &Path, use_trash: bool) -> Result<(), DeleteError> {
    let failure = |message: String| DeleteError {
        path: path.to_path_buf(),
        message,
    };

    if use_trash {
        trash::delete(path).map_err(|e| failure(e.to_string()))
    } else {
        fs::remove_file(path).map_err(|e| failure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use twinfile_core::Fingerprint;

    fn candidate(path: &str, modified_offset_secs: u64, index: u64) -> FileCandidate {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(modified_offset_secs);
        FileCandidate::new(path, 10, modified, index)
    }

    fn group_of(members: Vec<FileCandidate>) -> DuplicateGroup {
        let wasted_bytes = 10 * (members.len() as u64 - 1);
        DuplicateGroup {
            fingerprint: Fingerprint::Size(10),
            size: 10,
            members,
            wasted_bytes,
        }
    }

    #[test]
    fn test_keep_first_retains_lowest_index() {
        let group = group_of(vec![
            candidate("/a", 300, 0),
            candidate("/b", 100, 1),
            candidate("/c", 200, 2),
        ]);

        let kept = retained_member(&group, RetentionPolicy::KeepFirst).unwrap();
        assert_eq!(kept.path, PathBuf::from("/a"));
    }

    #[test]
    fn test_keep_newest_retains_max_mtime() {
        let group = group_of(vec![
            candidate("/a", 100, 0),
            candidate("/b", 300, 1),
            candidate("/c", 200, 2),
        ]);

        let kept = retained_member(&group, RetentionPolicy::KeepNewest).unwrap();
        assert_eq!(kept.path, PathBuf::from("/b"));
    }

    #[test]
    fn test_keep_oldest_retains_min_mtime() {
        let group = group_of(vec![
            candidate("/a", 100, 0),
            candidate("/b", 300, 1),
            candidate("/c", 50, 2),
        ]);

        let kept = retained_member(&group, RetentionPolicy::KeepOldest).unwrap();
        assert_eq!(kept.path, PathBuf::from("/c"));
    }

    #[test]
    fn test_mtime_ties_break_on_discovery_order() {
        // All members share one mtime; both time policies fall back to
        // the earliest discovery index even with members shuffled.
        let group = group_of(vec![
            candidate("/late", 100, 5),
            candidate("/early", 100, 1),
            candidate("/mid", 100, 3),
        ]);

        for policy in [RetentionPolicy::KeepNewest, RetentionPolicy::KeepOldest] {
            let kept = retained_member(&group, policy).unwrap();
            assert_eq!(kept.path, PathBuf::from("/early"));
        }
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(RetentionPolicy::KeepFirst.to_string(), "first");
        assert_eq!(RetentionPolicy::KeepNewest.to_string(), "newest");
        assert_eq!(RetentionPolicy::KeepOldest.to_string(), "oldest");
    }

    #[test]
    fn test_summary_formats() {
        let ok = DeletionResult {
            deleted_count: 3,
            ..Default::default()
        };
        assert_eq!(ok.summary(), "Deleted 3 files");
        assert!(ok.is_success());

        let partial = DeletionResult {
            deleted_count: 2,
            failed_count: 1,
            ..Default::default()
        };
        assert_eq!(partial.summary(), "Deleted 2 files, 1 failed");
        assert!(!partial.is_success());
    }
}
