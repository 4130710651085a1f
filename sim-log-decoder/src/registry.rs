//! Subtype label registry
//!
//! Maps (message kind, subtype code) pairs to human-readable labels.
//! Producers may start emitting new subtypes before the logger learns their
//! names, so a lookup never fails: codes absent from the table resolve to a
//! deterministic `unknown-<code>` label. The registry is populated at
//! startup and read-only afterwards.

use crate::types::EventKind;
use std::borrow::Cow;
use std::collections::HashMap;

/// Labels seeded by [`SubtypeRegistry::with_defaults`]
const DEFAULT_LABELS: &[(EventKind, u8, &str)] = &[
    (EventKind::OneNode, 1, "node join"),
    (EventKind::OneNode, 2, "node exit"),
    (EventKind::OneNode, 3, "node out of sync"),
    (EventKind::OneNode, 6, "AKM node state"),
    (EventKind::TwoNodes, 4, "AKM link state"),
];

/// Lookup table for subtype labels with a guaranteed fallback
#[derive(Debug, Clone, Default)]
pub struct SubtypeRegistry {
    labels: HashMap<(EventKind, u8), String>,
}

impl SubtypeRegistry {
    /// Create an empty registry (every lookup hits the fallback rule)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the simulation's built-in subtypes
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &(kind, code, label) in DEFAULT_LABELS {
            registry.insert(kind, code, label);
        }
        registry
    }

    /// Register a label, replacing any previous one for the same code
    pub fn insert(&mut self, kind: EventKind, code: u8, label: impl Into<String>) {
        self.labels.insert((kind, code), label.into());
    }

    /// Look up the label for a subtype code.
    ///
    /// Two-step lookup: the closed table first, then the deterministic
    /// fallback. Never fails, and the same code always yields the same
    /// label.
    pub fn label(&self, kind: EventKind, code: u8) -> Cow<'_, str> {
        match self.labels.get(&(kind, code)) {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => Cow::Owned(format!("unknown-{}", code)),
        }
    }

    /// Iterate over all registered labels (used by sinks to size columns)
    pub fn known_labels(&self) -> impl Iterator<Item = &str> {
        self.labels.values().map(String::as_str)
    }

    /// Number of registered labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if no labels are registered
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
