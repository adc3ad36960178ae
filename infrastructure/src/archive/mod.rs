//! Run archive
//!
//! Persists the results of a batch of recipe runs as one pretty-printed
//! JSON document per batch.

mod json_archive;

pub use json_archive::{
    ArchiveConfig, ArchiveError, ArchivedPrompt, JsonRunArchive, RecipeRun, RunArchive, RunStatus,
};
