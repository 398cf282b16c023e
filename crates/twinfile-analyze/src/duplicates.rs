//! Duplicate detection by fingerprint grouping.
//!
//! Every candidate is fingerprinted with the method selected for the run
//! and bucketed by fingerprint equality. Buckets with a single member
//! are dropped; the survivors become duplicate groups with wasted-space
//! accounting. Grouping keys purely on fingerprint value, so the result
//! is independent of the order in which fingerprints arrive.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use dashmap::DashMap;
use derive_builder::Builder;
use md5::Md5;
use rayon::prelude::*;
use sha2::digest::Output;
use sha2::{Digest, Sha256};
use thiserror::Error;

use twinfile_core::{
    DuplicateGroup, FileCandidate, Fingerprint, FingerprintMethod, ScanReport, ScanWarning,
};

/// Default read chunk for incremental hashing.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for duplicate detection.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct DuplicateConfig {
    /// Fingerprint method, fixed for the whole run.
    #[builder(default)]
    pub method: FingerprintMethod,

    /// Fingerprint candidates across rayon workers.
    #[builder(default = "false")]
    pub parallel: bool,

    /// Read buffer size for incremental hashing. Memory use per file is
    /// bounded by this regardless of file size.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    pub chunk_size: usize,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            method: FingerprintMethod::default(),
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl DuplicateConfig {
    /// Create a new config builder.
    pub fn builder() -> DuplicateConfigBuilder {
        DuplicateConfigBuilder::default()
    }
}

/// A file that could not be opened or read mid-stream.
///
/// Such files are excluded from grouping, never crashed on.
#[derive(Debug, Error)]
#[error("Unreadable file {path}: {source}")]
pub struct UnreadableFile {
    /// The file that failed.
    pub path: PathBuf,
    /// The underlying I/O failure.
    #[source]
    pub source: std::io::Error,
}

/// Duplicate file finder.
pub struct DuplicateFinder {
    config: DuplicateConfig,
}

impl DuplicateFinder {
    /// Create a new finder with default config.
    pub fn new() -> Self {
        Self {
            config: DuplicateConfig::default(),
        }
    }

    /// Create a new finder with custom config.
    pub fn with_config(config: DuplicateConfig) -> Self {
        Self { config }
    }

    /// Fingerprint candidates and assemble the duplicate report.
    pub fn group(&self, candidates: Vec<FileCandidate>) -> ScanReport {
        self.group_with_warnings(candidates, Vec::new())
    }

    /// Like [`group`](Self::group), carrying forward warnings recovered
    /// during scanning so the final report surfaces every skipped file.
    pub fn group_with_warnings(
        &self,
        candidates: Vec<FileCandidate>,
        scan_warnings: Vec<ScanWarning>,
    ) -> ScanReport {
        let (buckets, mut warnings) = if self.config.parallel {
            self.fingerprint_parallel(candidates)
        } else {
            self.fingerprint_sequential(candidates)
        };

        let files_skipped = warnings.len() as u64;
        let mut all_warnings = scan_warnings;
        all_warnings.append(&mut warnings);

        self.assemble(buckets, all_warnings, files_skipped)
    }

    /// Compute the fingerprint for a single candidate.
    pub fn fingerprint(&self, candidate: &FileCandidate) -> Result<Fingerprint, UnreadableFile> {
        match self.config.method {
            // Size was captured at scan time; no content I/O at all.
            FingerprintMethod::SizeOnly => Ok(Fingerprint::Size(candidate.size)),
            FingerprintMethod::Md5 => {
                let digest = self.digest_file::<Md5>(&candidate.path)?;
                Ok(Fingerprint::Md5(digest.into()))
            }
            FingerprintMethod::Sha256 => {
                let digest = self.digest_file::<Sha256>(&candidate.path)?;
                Ok(Fingerprint::Sha256(digest.into()))
            }
        }
    }

    /// Fingerprint candidates one at a time on the calling thread.
    fn fingerprint_sequential(
        &self,
        candidates: Vec<FileCandidate>,
    ) -> (HashMap<Fingerprint, Vec<FileCandidate>>, Vec<ScanWarning>) {
        let mut buckets: HashMap<Fingerprint, Vec<FileCandidate>> = HashMap::new();
        let mut warnings = Vec::new();

        for candidate in candidates {
            match self.fingerprint(&candidate) {
                Ok(fingerprint) => buckets.entry(fingerprint).or_default().push(candidate),
                Err(err) => {
                    tracing::warn!(path = %err.path.display(), "excluding file: {err}");
                    warnings.push(ScanWarning::unreadable(&err.path, &err.source));
                }
            }
        }

        (buckets, warnings)
    }

    /// Fingerprint candidates across rayon workers.
    ///
    /// Workers share nothing but the read-only candidate list, a
    /// concurrent bucket map, and a channel for failures. Buckets key on
    /// fingerprint value alone, so completion order cannot change the
    /// grouping.
    fn fingerprint_parallel(
        &self,
        candidates: Vec<FileCandidate>,
    ) -> (HashMap<Fingerprint, Vec<FileCandidate>>, Vec<ScanWarning>) {
        let buckets: DashMap<Fingerprint, Vec<FileCandidate>> = DashMap::new();
        let (warn_tx, warn_rx) = mpsc::channel();

        candidates
            .into_par_iter()
            .for_each_with(warn_tx, |tx, candidate| match self.fingerprint(&candidate) {
                Ok(fingerprint) => buckets.entry(fingerprint).or_default().push(candidate),
                Err(err) => {
                    tracing::warn!(path = %err.path.display(), "excluding file: {err}");
                    let _ = tx.send(ScanWarning::unreadable(&err.path, &err.source));
                }
            });

        let warnings: Vec<ScanWarning> = warn_rx.into_iter().collect();
        (buckets.into_iter().collect(), warnings)
    }

    /// Build the report from fingerprint buckets.
    fn assemble(
        &self,
        buckets: HashMap<Fingerprint, Vec<FileCandidate>>,
        warnings: Vec<ScanWarning>,
        files_skipped: u64,
    ) -> ScanReport {
        let mut files_fingerprinted = 0u64;
        let mut groups = Vec::new();

        for (fingerprint, mut members) in buckets {
            files_fingerprinted += members.len() as u64;
            if members.len() < 2 {
                continue;
            }

            // Worker completion may have scrambled bucket contents;
            // reporting and "keep first" need discovery order back.
            members.sort_by_key(|m| m.index);

            let size = members[0].size;
            let wasted_bytes = size * (members.len() as u64 - 1);
            groups.push(DuplicateGroup {
                fingerprint,
                size,
                members,
                wasted_bytes,
            });
        }

        // Wasted space descending; first-member index breaks ties so the
        // order is stable across runs despite hash-map iteration.
        groups.sort_by(|a, b| {
            b.wasted_bytes
                .cmp(&a.wasted_bytes)
                .then_with(|| a.members[0].index.cmp(&b.members[0].index))
        });

        let total_groups = groups.len();
        let total_wasted_bytes = groups.iter().map(|g| g.wasted_bytes).sum();

        ScanReport {
            method: self.config.method,
            groups,
            total_groups,
            total_wasted_bytes,
            files_fingerprinted,
            files_skipped,
            warnings,
        }
    }

    /// Feed a file through a digest in fixed-size chunks.
    fn digest_file<D: Digest>(&self, path: &Path) -> Result<Output<D>, UnreadableFile> {
        let unreadable = |source| UnreadableFile {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(unreadable)?;
        let mut hasher = D::new();
        let mut buffer = vec![0u8; self.config.chunk_size.max(1)];

        loop {
            let bytes_read = file.read(&mut buffer).map_err(unreadable)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize())
    }
}

impl Default for DuplicateFinder {
    fn default() -> Self {
        Self::new()
    }
}
