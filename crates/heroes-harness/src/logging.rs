//! Test logging setup and the JSONL run log.
//!
//! # JSONL schema
//!
//! ```json
//! {"event":"bind","item_count":10,"list_items":10,"run_id":"list_interaction_seed0","seq":0}
//! {"cause":null,"checksum":"blake3:9f2c…","event":"resolve","found":true,"index":0,"passes":1,"run_id":"list_interaction_seed0","seq":1}
//! {"event":"assert","index":0,"outcome":"pass","run_id":"list_interaction_seed0","seq":2}
//! {"checked":10,"event":"complete","outcome":"pass","run_id":"list_interaction_seed0","seq":3}
//! ```
//!
//! A failed lookup has `"found":false`, a `null` checksum and the lookup
//! failure as `cause`:
//!
//! ```json
//! {"cause":"row 1 is out of range (item count 1)","checksum":null,"event":"resolve","found":false,"index":1,"passes":0,"run_id":"list_interaction_seed0","seq":4}
//! ```
//!
//! Keys are emitted in sorted order.

use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use crate::config::HarnessConfig;

/// Environment variable holding the tracing filter for tests.
pub const ENV_LOG_FILTER: &str = "HEROES_LOG";

/// Install a test-friendly tracing subscriber. Safe to call from every test.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Ordered structured record of one harness run.
#[derive(Debug, Clone)]
pub struct RunLog {
    run_id: String,
    seq: u64,
    lines: Vec<String>,
    mirror_stderr: bool,
}

impl RunLog {
    /// Run ids are `<prefix>_seed<seed>` so reruns with the same seed line up.
    #[must_use]
    pub fn new(prefix: &str, config: &HarnessConfig) -> Self {
        Self {
            run_id: format!("{prefix}_seed{}", config.seed),
            seq: 0,
            lines: Vec::new(),
            mirror_stderr: config.jsonl_stderr,
        }
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Append one event. Object fields in `fields` are merged into the line;
    /// envelope keys win over fields with the same name.
    pub fn record(&mut self, event: &str, fields: Value) {
        let mut line = Map::new();
        line.insert("run_id".into(), json!(self.run_id));
        line.insert("seq".into(), json!(self.seq));
        line.insert("event".into(), json!(event));
        match fields {
            Value::Object(extra) => {
                for (key, value) in extra {
                    line.entry(key).or_insert(value);
                }
            }
            Value::Null => {}
            other => {
                line.insert("data".into(), other);
            }
        }
        self.seq += 1;

        let rendered = Value::Object(line).to_string();
        if self.mirror_stderr {
            eprintln!("{rendered}");
        }
        self.lines.push(rendered);
    }

    /// Every recorded line, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines whose `event` equals `event`, parsed back into JSON.
    #[must_use]
    pub fn events(&self, event: &str) -> Vec<Value> {
        self.lines
            .iter()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter(|value| value["event"] == event)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_embeds_seed() {
        let log = RunLog::new("heroes", &HarnessConfig::default().with_seed(7));
        assert_eq!(log.run_id(), "heroes_seed7");
    }

    #[test]
    fn records_sorted_json_line() {
        let mut log = RunLog::new("heroes", &HarnessConfig::default());
        log.record("bind", json!({"item_count": 3}));
        log.record("complete", Value::Null);
        assert_eq!(
            log.lines()[0],
            r#"{"event":"bind","item_count":3,"run_id":"heroes_seed0","seq":0}"#
        );
        assert_eq!(log.events("complete")[0]["seq"], 1);
    }

    #[test]
    fn envelope_keys_cannot_be_overwritten() {
        let mut log = RunLog::new("heroes", &HarnessConfig::default());
        log.record("assert", json!({"event": "spoofed", "index": 2}));
        let events = log.events("assert");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["index"], 2);
    }

    #[test]
    fn non_object_fields_are_nested() {
        let mut log = RunLog::new("heroes", &HarnessConfig::default());
        log.record("note", json!([1, 2]));
        assert_eq!(log.events("note")[0]["data"], json!([1, 2]));
    }

    #[test]
    fn init_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }
}
