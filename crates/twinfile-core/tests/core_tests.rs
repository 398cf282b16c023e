use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use twinfile_core::{
    DuplicateGroup, FileCandidate, Fingerprint, FingerprintMethod, ScanConfig, ScanError,
    ScanReport, ScanWarning, WarningKind,
};

fn candidate(path: &str, size: u64, index: u64) -> FileCandidate {
    let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(index);
    FileCandidate::new(path, size, modified, index)
}

#[test]
fn fingerprint_equality_is_exact() {
    let a = Fingerprint::Md5([1; 16]);
    let b = Fingerprint::Md5([1; 16]);
    let c = Fingerprint::Md5([2; 16]);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(Fingerprint::Size(16), Fingerprint::Md5([0; 16]));
}

#[test]
fn report_serializes_to_json() {
    let members = vec![candidate("/data/a.bin", 512, 0), candidate("/data/b.bin", 512, 1)];
    let report = ScanReport {
        method: FingerprintMethod::Md5,
        groups: vec![DuplicateGroup {
            fingerprint: Fingerprint::Md5([0xee; 16]),
            size: 512,
            members,
            wasted_bytes: 512,
        }],
        total_groups: 1,
        total_wasted_bytes: 512,
        files_fingerprinted: 2,
        files_skipped: 0,
        warnings: vec![ScanWarning::new(
            "/data/locked",
            "Permission denied",
            WarningKind::PermissionDenied,
        )],
    };

    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: ScanReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back.method, FingerprintMethod::Md5);
    assert_eq!(back.total_groups, 1);
    assert_eq!(back.groups[0].members.len(), 2);
    assert_eq!(back.groups[0].fingerprint, Fingerprint::Md5([0xee; 16]));
    assert_eq!(back.warnings.len(), 1);
}

#[test]
fn method_selector_rejects_unknown_values() {
    let err = "blake3".parse::<FingerprintMethod>().unwrap_err();
    match err {
        ScanError::InvalidConfig { message } => assert!(message.contains("blake3")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn config_defaults_are_recursive_and_unfiltered() {
    let config = ScanConfig::default();
    assert_eq!(config.root, PathBuf::from("."));
    assert!(config.recursive);
    assert_eq!(config.min_size, None);
    assert!(config.include_hidden);
    assert!(config.ignore_patterns.is_empty());
}

#[test]
fn wasted_bytes_matches_group_arithmetic() {
    let sizes = [(1024u64, 2usize), (2048, 3), (10, 5)];
    let groups: Vec<DuplicateGroup> = sizes
        .iter()
        .enumerate()
        .map(|(i, &(size, count))| DuplicateGroup {
            fingerprint: Fingerprint::Size(size),
            size,
            members: (0..count)
                .map(|j| candidate(&format!("/g{i}/f{j}"), size, (i * 10 + j) as u64))
                .collect(),
            wasted_bytes: size * (count as u64 - 1),
        })
        .collect();

    let total: u64 = groups.iter().map(|g| g.wasted_bytes).sum();
    assert_eq!(total, 1024 + 2 * 2048 + 4 * 10);
}
