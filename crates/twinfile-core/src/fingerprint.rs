//! Fingerprint types for duplicate comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScanError;

/// How candidate files are compared.
///
/// The method is fixed for an entire run; grouping never mixes hash and
/// size fingerprints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintMethod {
    /// MD5 content hash.
    Md5,
    /// SHA-256 content hash.
    #[default]
    Sha256,
    /// File size only, no content I/O. Distinct files of equal size are
    /// treated as duplicates; that trade-off is documented behavior of
    /// this mode, not a bug.
    #[serde(rename = "size")]
    SizeOnly,
}

impl FingerprintMethod {
    /// Whether this method reads file content.
    pub fn reads_content(&self) -> bool {
        !matches!(self, Self::SizeOnly)
    }
}

impl fmt::Display for FingerprintMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => write!(f, "md5"),
            Self::Sha256 => write!(f, "sha256"),
            Self::SizeOnly => write!(f, "size"),
        }
    }
}

impl FromStr for FingerprintMethod {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" => Ok(Self::Sha256),
            "size" => Ok(Self::SizeOnly),
            other => Err(ScanError::InvalidConfig {
                message: format!("unknown fingerprint method: {other:?}"),
            }),
        }
    }
}

/// A comparison key derived from file content (hash) or metadata (size).
///
/// Two files are duplicates iff their fingerprints are equal. The digest
/// width encodes the algorithm, so an MD5 fingerprint can never collide
/// with a SHA-256 or size fingerprint even across misconfigured callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fingerprint {
    /// MD5 digest of the full file content.
    Md5([u8; 16]),
    /// SHA-256 digest of the full file content.
    Sha256([u8; 32]),
    /// Raw file size in bytes.
    Size(u64),
}

impl Fingerprint {
    /// The method that produced this fingerprint.
    pub fn method(&self) -> FingerprintMethod {
        match self {
            Self::Md5(_) => FingerprintMethod::Md5,
            Self::Sha256(_) => FingerprintMethod::Sha256,
            Self::Size(_) => FingerprintMethod::SizeOnly,
        }
    }

    /// Hex rendering of the digest, or the decimal size for size
    /// fingerprints.
    pub fn to_hex(&self) -> String {
        match self {
            Self::Md5(digest) => digest.iter().map(|b| format!("{b:02x}")).collect(),
            Self::Sha256(digest) => digest.iter().map(|b| format!("{b:02x}")).collect(),
            Self::Size(size) => size.to_string(),
        }
    }

    /// Short label for report lines, e.g. `sha256:ab12cd34ef56ab78`.
    pub fn summary(&self) -> String {
        let hex = self.to_hex();
        let short = &hex[..hex.len().min(16)];
        format!("{}:{}", self.method(), short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("md5".parse::<FingerprintMethod>().unwrap(), FingerprintMethod::Md5);
        assert_eq!(
            "SHA256".parse::<FingerprintMethod>().unwrap(),
            FingerprintMethod::Sha256
        );
        assert_eq!(
            "size".parse::<FingerprintMethod>().unwrap(),
            FingerprintMethod::SizeOnly
        );
        assert!(matches!(
            "crc32".parse::<FingerprintMethod>(),
            Err(ScanError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_method_display_roundtrip() {
        for method in [
            FingerprintMethod::Md5,
            FingerprintMethod::Sha256,
            FingerprintMethod::SizeOnly,
        ] {
            assert_eq!(method.to_string().parse::<FingerprintMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_fingerprint_hex() {
        let md5 = Fingerprint::Md5([0xab; 16]);
        assert_eq!(md5.to_hex().len(), 32);
        assert!(md5.to_hex().starts_with("abab"));

        let sha = Fingerprint::Sha256([0xcd; 32]);
        assert_eq!(sha.to_hex().len(), 64);

        assert_eq!(Fingerprint::Size(4096).to_hex(), "4096");
    }

    #[test]
    fn test_fingerprint_summary() {
        let summary = Fingerprint::Sha256([0x01; 32]).summary();
        assert_eq!(summary, "sha256:0101010101010101");

        assert_eq!(Fingerprint::Size(10).summary(), "size:10");
    }

    #[test]
    fn test_kinds_never_equal() {
        // Same leading bytes, different algorithm: must not compare equal.
        let md5 = Fingerprint::Md5([0; 16]);
        let sha = Fingerprint::Sha256([0; 32]);
        assert_ne!(md5, sha);
        assert_ne!(md5.method(), sha.method());
    }
}
