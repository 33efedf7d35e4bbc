//! JSONL file writer for council conversation records.
//!
//! Each completed deliberation becomes a single JSON line carrying the
//! durable record plus its conversation key and a timestamp. Ranking
//! metadata never reaches this file; it dies with the request.

use chrono::{SecondsFormat, Utc};
use council_application::ports::conversation_store::{ConversationStore, RecordKey};
use council_domain::CouncilRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation store that appends one JSON object per record.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line
/// and on `Drop`.
pub struct JsonlConversationStore {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationStore {
    /// Open the store at the given path, creating the file (and parent
    /// directories) if they don't exist. Existing records are kept.
    /// Returns `None` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationStore for JsonlConversationStore {
    fn append(&self, key: &RecordKey, record: &CouncilRecord) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        // Merge the record with its key and timestamp into one object
        let Ok(serde_json::Value::Object(mut map)) = serde_json::to_value(record) else {
            return;
        };
        map.insert(
            "conversation_id".to_string(),
            serde_json::Value::String(key.conversation_id.clone()),
        );
        map.insert(
            "message_index".to_string(),
            serde_json::Value::Number(key.message_index.into()),
        );
        map.insert(
            "timestamp".to_string(),
            serde_json::Value::String(timestamp),
        );

        let Ok(line) = serde_json::to_string(&serde_json::Value::Object(map)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // a crash may lose at most the in-flight line
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationStore {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{RecordedAnswer, RecordedRanking};
    use std::io::Read;

    fn sample_record() -> CouncilRecord {
        CouncilRecord {
            role: "assistant".to_string(),
            stage1: vec![
                RecordedAnswer {
                    model: "openai/gpt-5.1".to_string(),
                    response: "Paris.".to_string(),
                },
                RecordedAnswer {
                    model: "x-ai/grok-4".to_string(),
                    response: "It's Paris.".to_string(),
                },
            ],
            stage2: vec![RecordedRanking {
                model: "openai/gpt-5.1".to_string(),
                ranking: "FINAL RANKING:\n1. Response B".to_string(),
            }],
            stage3: RecordedAnswer {
                model: "google/gemini-3-pro-preview".to_string(),
                response: "The capital of France is Paris.".to_string(),
            },
        }
    }

    #[test]
    fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations.jsonl");
        let store = JsonlConversationStore::open(&path).unwrap();

        store.append(&RecordKey::new("conv-1", 0), &sample_record());
        store.append(&RecordKey::new("conv-1", 2), &sample_record());
        drop(store);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["conversation_id"], "conv-1");
        assert_eq!(first["message_index"], 0);
        assert_eq!(first["role"], "assistant");
        assert_eq!(first["stage1"][0]["model"], "openai/gpt-5.1");
        assert_eq!(first["stage2"][0]["ranking"], "FINAL RANKING:\n1. Response B");
        assert_eq!(
            first["stage3"]["response"],
            "The capital of France is Paris."
        );
        assert!(first.get("timestamp").is_some());
        // ranking metadata must never be written
        assert!(first.get("metadata").is_none());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["message_index"], 2);
    }

    #[test]
    fn test_reopen_appends_after_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations.jsonl");

        {
            let store = JsonlConversationStore::open(&path).unwrap();
            store.append(&RecordKey::new("conv-1", 0), &sample_record());
        }
        {
            let store = JsonlConversationStore::open(&path).unwrap();
            store.append(&RecordKey::new("conv-2", 0), &sample_record());
        }

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content.trim().lines().count(), 2);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("log.jsonl");
        let store = JsonlConversationStore::open(&path);
        assert!(store.is_some());
        assert!(path.exists());
    }
}
