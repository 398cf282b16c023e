//! Deduplication engine for twinfile.
//!
//! This crate deletes the non-retained members of duplicate groups under
//! an explicit retention policy, behind a confirmation gate. Deletion is
//! deliberately serial so per-file failures stay attributable and no two
//! operations can race on the same path.

mod dedupe;

pub use dedupe::{
    apply, retained_member, DedupeOptions, DeleteError, DeletionResult, RetentionPolicy,
};
