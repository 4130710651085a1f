//! Core types for the simulation log decoder library
//!
//! This module defines the fundamental types the dispatcher and decoders
//! produce when processing multicast datagrams. A decoded event is built
//! atomically from one datagram fragment and never mutated afterwards.

use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Marker byte selecting the event-log message family.
pub const LOG_HEADER: u8 = 128;

/// Single-byte control datagram asking the logger to shut down.
pub const SIM_END: u8 = 3;

/// Marker byte of outbound data frames (reachability reports).
pub const DATA_FRAME: u8 = 2;

/// Message kind carried in byte 1 of an event-log datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Event about a single node (join, exit, out of sync, ...)
    OneNode,
    /// Event about a pair of nodes (link authentication state)
    TwoNodes,
    /// Event listing a variable number of nodes
    ManyNodes,
}

impl EventKind {
    /// Map a wire code to a kind. Unknown codes belong to future producers
    /// and are not an error; the dispatcher ignores them.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(EventKind::OneNode),
            2 => Some(EventKind::TwoNodes),
            3 => Some(EventKind::ManyNodes),
            _ => None,
        }
    }

    /// Wire code for this kind
    pub fn code(self) -> u8 {
        match self {
            EventKind::OneNode => 1,
            EventKind::TwoNodes => 2,
            EventKind::ManyNodes => 3,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::OneNode => write!(f, "one-node"),
            EventKind::TwoNodes => write!(f, "two-nodes"),
            EventKind::ManyNodes => write!(f, "many-nodes"),
        }
    }
}

/// A decoded event-log record - the primary output of the dispatcher
///
/// `nodes` holds exactly 1 identifier for [`EventKind::OneNode`], exactly 2
/// for [`EventKind::TwoNodes`] and the declared count for
/// [`EventKind::ManyNodes`], always in wire order. `payload` is whatever
/// trailed the fixed structure; decoders never interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    /// Message kind (byte 1 of the datagram)
    pub kind: EventKind,
    /// Fine-grained event code within the kind
    pub subtype: u8,
    /// Node identifiers in the order they appeared on the wire
    pub nodes: Vec<u16>,
    /// Opaque trailing bytes (usually an ASCII status token)
    pub payload: Vec<u8>,
}

impl NormalizedEvent {
    /// Payload interpreted as a status token, if it is valid UTF-8
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

/// Errors that can occur while decoding a message body
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The fixed-size prefix, or the byte span implied by a declared node
    /// count, exceeds the available buffer.
    #[error("truncated {context}: need {needed} bytes, buffer has {available}")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },
}

/// Outcome of a dispatch call that produced no event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Datagram does not belong to the event-log family, or carries an
    /// unrecognized message kind. Not an error; processing continues.
    Ignored,
    /// The single-byte simulation-end control message was received. The
    /// caller must schedule delayed process termination.
    ShutdownRequested,
    /// The datagram was structurally malformed and has been dropped.
    ParseFailed(EventKind),
}
