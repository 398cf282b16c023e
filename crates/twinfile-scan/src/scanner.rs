//! JWalk-based directory scanner producing fingerprint candidates.

use std::time::Duration;

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::{Parallelism, WalkDir};

use twinfile_core::{FileCandidate, ScanConfig, ScanError, ScanWarning, WarningKind};

/// Outcome of a scan pass: candidates plus recovered warnings.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Candidate files in discovery order.
    pub candidates: Vec<FileCandidate>,
    /// Per-file conditions the scan continued past.
    pub warnings: Vec<ScanWarning>,
}

/// Walks a directory tree and produces fingerprint candidates.
#[derive(Debug, Default)]
pub struct Scanner;

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Perform a scan of the configured root.
    ///
    /// Only a missing root, a non-directory root, or a malformed ignore
    /// pattern is fatal; everything else is recorded as a warning and
    /// the scan continues.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanOutcome, ScanError> {
        let root = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        let ignore = build_ignore_set(&config.ignore_patterns)?;

        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        // sort(true) fixes enumeration order for a static tree, which is
        // what makes rescans reproduce identical grouping.
        let walker = WalkDir::new(&root)
            .parallelism(parallelism)
            .sort(true)
            .skip_hidden(!config.include_hidden)
            .follow_links(false)
            .max_depth(if config.recursive { usize::MAX } else { 1 });

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();
        let mut index = 0u64;

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    tracing::debug!(path = %path.display(), "skipping unreadable entry: {err}");
                    warnings.push(ScanWarning::new(path, err.to_string(), WarningKind::ReadError));
                    continue;
                }
            };

            // Only regular files become candidates. With follow_links off
            // a symlink reports its own file type, so symlinks to
            // directories and special files all fall out here.
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            if ignore.is_match(&file_name) {
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    tracing::debug!(path = %path.display(), "skipping, no metadata: {err}");
                    warnings.push(ScanWarning::new(
                        &path,
                        err.to_string(),
                        WarningKind::MetadataError,
                    ));
                    continue;
                }
            };

            let size = metadata.len();
            if let Some(min) = config.min_size {
                if size < min {
                    continue;
                }
            }

            let modified = metadata.modified().unwrap_or(std::time::UNIX_EPOCH);
            candidates.push(FileCandidate::new(path, size, modified, index));
            index += 1;
        }

        Ok(ScanOutcome {
            candidates,
            warnings,
        })
    }
}

/// Compile ignore patterns into a glob set.
fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
            message: format!("bad ignore pattern {pattern:?}: {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidConfig {
        message: e.to_string(),
    })
}
