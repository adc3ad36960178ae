//! Infrastructure layer for story-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod archive;
pub mod config;
pub mod deck;
pub mod logging;
pub mod openrouter;

// Re-export commonly used types
pub use archive::{
    ArchiveConfig, ArchiveError, ArchivedPrompt, JsonRunArchive, RecipeRun, RunArchive, RunStatus,
};
pub use config::{
    ConfigLoader, FileConfig, FileDebateConfig, FileDeckConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig,
};
pub use deck::{DeckLoadError, JsonDeckLoader};
pub use logging::JsonlDecisionLogger;
pub use openrouter::gateway::{OpenRouterConfig, OpenRouterGateway};
