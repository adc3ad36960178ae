//! JSONL file writer for decision events.
//!
//! Each [`DecisionEvent`] becomes one JSON line with `type` and `timestamp`.
//! The logger follows the run it is attached to: every line between
//! `sequence_started` and `sequence_completed` is stamped with the recipe
//! name, and each `decision_finalized` line gets its 1-based `position` in
//! that recipe, so a batch log can be split per recipe and per decision.

use council_application::ports::decision_logger::{DecisionEvent, DecisionLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Writer plus the recipe currently being logged.
struct LogState {
    writer: BufWriter<File>,
    recipe: Option<String>,
    decisions: usize,
}

impl LogState {
    /// Update the run tracking for `event_type` and stamp `fields`.
    fn annotate(&mut self, event_type: &str, fields: &mut Map<String, Value>) {
        match event_type {
            "sequence_started" => {
                self.recipe = fields
                    .get("recipe")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                self.decisions = 0;
            }
            "decision_finalized" => {
                self.decisions += 1;
                fields.insert("position".to_string(), Value::from(self.decisions));
            }
            _ => {}
        }

        if let Some(recipe) = &self.recipe {
            fields
                .entry("recipe")
                .or_insert_with(|| Value::String(recipe.clone()));
        }

        if event_type == "sequence_completed" {
            self.recipe = None;
        }
    }
}

/// JSONL decision logger that writes one JSON object per line.
///
/// Thread-safe via a `Mutex` around the writer and run tracking. Flushes on `Drop`.
pub struct JsonlDecisionLogger {
    state: Mutex<LogState>,
    path: PathBuf,
}

impl JsonlDecisionLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create decision log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create decision log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            state: Mutex::new(LogState {
                writer: BufWriter::new(file),
                recipe: None,
                decisions: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DecisionLogger for JsonlDecisionLogger {
    fn log(&self, event: DecisionEvent) {
        let mut fields = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.annotate(event.event_type, &mut fields);

        fields.insert(
            "type".to_string(),
            Value::String(event.event_type.to_string()),
        );
        fields.insert(
            "timestamp".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );

        let Ok(line) = serde_json::to_string(&Value::Object(fields)) else {
            return;
        };
        let _ = writeln!(state.writer, "{}", line);
        let _ = state.writer.flush();
    }
}

impl Drop for JsonlDecisionLogger {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.writer.flush();
        }
    }
}
