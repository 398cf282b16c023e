//! Report rendering and persistence.
//!
//! Rendering is pure; persistence writes the same text to a flat file
//! and feeds nothing back into the data model.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use thiserror::Error;

use twinfile_core::ScanReport;

/// Failure to persist a rendered report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The destination could not be written.
    #[error("Failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render the report as human-readable text.
pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();
    let rule = "─".repeat(70);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, " Duplicate File Report ({})", report.method);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);

    if report.groups.is_empty() {
        let _ = writeln!(out, " No duplicate files found.");
    } else {
        for (i, group) in report.groups.iter().enumerate() {
            let _ = writeln!(
                out,
                " Group {} ({} files, {} each, {} wasted)",
                i + 1,
                group.count(),
                format_size(group.size),
                format_size(group.wasted_bytes)
            );
            let _ = writeln!(out, " fingerprint {}", group.fingerprint.summary());
            for member in &group.members {
                let _ = writeln!(
                    out,
                    "   {}  (modified {})",
                    member.path.display(),
                    format_time(member.modified)
                );
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(
            out,
            " Found {} duplicate groups ({} files)",
            report.total_groups,
            report.total_duplicate_files()
        );
        let _ = writeln!(
            out,
            " Total wasted space: {}",
            format_size(report.total_wasted_bytes)
        );
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            " {} file(s) skipped during scan or fingerprinting:",
            report.warnings.len()
        );
        for warning in &report.warnings {
            let _ = writeln!(out, "   {}: {}", warning.path.display(), warning.message);
        }
    }

    out
}

/// Write the rendered report to a flat text file.
pub fn persist(report: &ScanReport, destination: &Path) -> Result<(), ReportError> {
    fs::write(destination, render(report)).map_err(|source| ReportError::Io {
        path: destination.to_path_buf(),
        source,
    })
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a modification time for report lines.
fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use twinfile_core::{
        DuplicateGroup, FileCandidate, Fingerprint, FingerprintMethod, ScanWarning, WarningKind,
    };

    fn sample_report() -> ScanReport {
        let members = vec![
            FileCandidate::new("/data/a.txt", 5, SystemTime::UNIX_EPOCH, 0),
            FileCandidate::new("/data/b.txt", 5, SystemTime::UNIX_EPOCH, 1),
        ];
        ScanReport {
            method: FingerprintMethod::Md5,
            groups: vec![DuplicateGroup {
                fingerprint: Fingerprint::Md5([0xab; 16]),
                size: 5,
                members,
                wasted_bytes: 5,
            }],
            total_groups: 1,
            total_wasted_bytes: 5,
            files_fingerprinted: 3,
            files_skipped: 1,
            warnings: vec![ScanWarning::new(
                "/data/locked.bin",
                "Permission denied",
                WarningKind::PermissionDenied,
            )],
        }
    }

    #[test]
    fn test_render_lists_members_and_totals() {
        let text = render(&sample_report());

        assert!(text.contains("Duplicate File Report (md5)"));
        assert!(text.contains("/data/a.txt"));
        assert!(text.contains("/data/b.txt"));
        assert!(text.contains("fingerprint md5:abababababababab"));
        assert!(text.contains("Found 1 duplicate groups (2 files)"));
        assert!(text.contains("Total wasted space: 5 B"));
        assert!(text.contains("/data/locked.bin: Permission denied"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = ScanReport {
            method: FingerprintMethod::Sha256,
            groups: Vec::new(),
            total_groups: 0,
            total_wasted_bytes: 0,
            files_fingerprinted: 0,
            files_skipped: 0,
            warnings: Vec::new(),
        };

        let text = render(&report);
        assert!(text.contains("No duplicate files found."));
    }

    #[test]
    fn test_persist_writes_rendering() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("duplicate_report.txt");
        let report = sample_report();

        persist(&report, &dest).unwrap();

        let written = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(written, render(&report));
    }

    #[test]
    fn test_persist_reports_io_failure() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("missing-dir").join("report.txt");

        let err = persist(&sample_report(), &dest).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
