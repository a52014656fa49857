use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use serde::Serialize;
use crate::scope::event::{Event, Features};
#[derive(Serialize)]
struct FeatureRecord {
    timestamp: u64,
    channel: u16,
    peak: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    baseline: Option<f64>,
}
/// Optional DAQ-style log of extracted features, one JSON object per line.
/// Write errors are swallowed: recording is a side channel and must never
/// stall or kill ingestion.
pub struct FeatureRecorder {
    writer: Option<BufWriter<File>>,
}
impl FeatureRecorder {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        log::info!("recording features to {}", path.display());
        Ok(Self {
            writer: Some(BufWriter::new(file)),
        })
    }
    pub fn write(&mut self, event: &Event, features: &Features) {
        if let Some(w) = &mut self.writer {
            let record = FeatureRecord {
                timestamp: event.timestamp,
                channel: event.channel,
                peak: features.peak,
                baseline: features.baseline,
            };
            if let Ok(line) = serde_json::to_string(&record) {
                writeln!(w, "{line}").ok();
            }
        }
    }
    pub fn stop(&mut self) {
        if let Some(mut w) = self.writer.take() {
            w.flush().ok();
            log::info!("feature recording saved");
        }
    }
    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }
}
impl Drop for FeatureRecorder {
    fn drop(&mut self) {
        self.stop();
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn writes_one_json_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.jsonl");
        let mut recorder = FeatureRecorder::create(&path).unwrap();
        let event = Event {
            timestamp: 42,
            channel: 3,
            samples: vec![1, 2],
        };
        recorder.write(
            &event,
            &Features {
                peak: 2.0,
                baseline: Some(1.5),
            },
        );
        recorder.write(
            &event,
            &Features {
                peak: 2.0,
                baseline: None,
            },
        );
        recorder.stop();
        assert!(!recorder.is_recording());
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["timestamp"], 42);
        assert_eq!(first["baseline"], 1.5);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(second.get("baseline").is_none());
    }
}
