//! Text log sink
//!
//! Formats normalized events as one line each: seconds elapsed since the
//! first record (monotonic, 18 columns with microsecond precision), the
//! subtype label uppercased with internal whitespace removed and padded to
//! a fixed width, the node identifiers comma-joined in decode order, and
//! the payload in parentheses.
//!
//! Recording is best-effort: a failed write is logged and dropped, never
//! propagated past this boundary.

use sim_log_decoder::{NormalizedEvent, SubtypeRegistry};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Writes normalized events as formatted text lines
pub struct TextSink {
    out: Box<dyn Write + Send>,
    start: Option<Instant>,
    label_width: usize,
}

impl TextSink {
    /// Create a sink over an arbitrary writer. The registry is only used
    /// to size the label column; it is not retained.
    pub fn new(out: Box<dyn Write + Send>, registry: &SubtypeRegistry) -> Self {
        let label_width = registry
            .known_labels()
            .map(|label| compact_label(label).len())
            .max()
            .unwrap_or(0);
        Self {
            out,
            start: None,
            label_width,
        }
    }

    /// Sink writing to standard output
    pub fn stdout(registry: &SubtypeRegistry) -> Self {
        Self::new(Box::new(io::stdout()), registry)
    }

    /// Sink writing to a file, created or truncated
    pub fn to_file(path: &Path, registry: &SubtypeRegistry) -> io::Result<Self> {
        Ok(Self::new(Box::new(File::create(path)?), registry))
    }

    /// Record one event. The first record pins the time origin; later
    /// timestamps are non-decreasing.
    pub fn record(&mut self, event: &NormalizedEvent, registry: &SubtypeRegistry) {
        let elapsed = self.start.get_or_insert_with(Instant::now).elapsed();
        let label = compact_label(&registry.label(event.kind, event.subtype));
        let nodes = event
            .nodes
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let payload = match event.payload_str() {
            Some(token) => token.to_string(),
            None => format!("{:02x?}", event.payload),
        };

        let width = (self.label_width + 1).max(label.len() + 1);
        let result = writeln!(
            self.out,
            "{:<18.6} {:<width$} [{}] ({})",
            elapsed.as_secs_f64(),
            label,
            nodes,
            payload,
            width = width,
        )
        .and_then(|_| self.out.flush());

        if let Err(e) = result {
            log::warn!("could not write to the log sink: {}", e);
        }
    }
}

/// Uppercase a label and strip internal whitespace: "node join" -> "NODEJOIN"
fn compact_label(label: &str) -> String {
    label.split_whitespace().collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_log_decoder::EventKind;
    use std::fs;

    #[test]
    fn test_compact_label() {
        assert_eq!(compact_label("node join"), "NODEJOIN");
        assert_eq!(compact_label("AKM link state"), "AKMLINKSTATE");
        assert_eq!(compact_label("unknown-42"), "UNKNOWN-42");
    }

    #[test]
    fn test_record_line_format() {
        let registry = SubtypeRegistry::with_defaults();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");

        let mut sink = TextSink::to_file(&path, &registry).unwrap();
        sink.record(
            &NormalizedEvent {
                kind: EventKind::TwoNodes,
                subtype: 4,
                nodes: vec![2, 3],
                payload: b"AUTHENTICATED".to_vec(),
            },
            &registry,
        );
        sink.record(
            &NormalizedEvent {
                kind: EventKind::OneNode,
                subtype: 1,
                nodes: vec![5],
                payload: vec![],
            },
            &registry,
        );

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("AKMLINKSTATE"));
        assert!(lines[0].contains("[2, 3]"));
        assert!(lines[0].contains("(AUTHENTICATED)"));
        assert!(lines[1].contains("NODEJOIN"));
        assert!(lines[1].contains("[5]"));

        // Label columns line up: the node list starts at the same offset.
        let bracket_a = lines[0].find('[').unwrap();
        let bracket_b = lines[1].find('[').unwrap();
        assert_eq!(bracket_a, bracket_b);
    }

    #[test]
    fn test_unknown_subtype_uses_fallback_label() {
        let registry = SubtypeRegistry::with_defaults();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");

        let mut sink = TextSink::to_file(&path, &registry).unwrap();
        sink.record(
            &NormalizedEvent {
                kind: EventKind::ManyNodes,
                subtype: 42,
                nodes: vec![1, 2, 3],
                payload: vec![],
            },
            &registry,
        );

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("UNKNOWN-42"));
        assert!(content.contains("[1, 2, 3]"));
    }
}
