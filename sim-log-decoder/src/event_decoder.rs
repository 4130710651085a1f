//! Event decoders for the three log message shapes
//!
//! Each decoder consumes a message body (datagram with the 2-byte header
//! already stripped) and produces a [`NormalizedEvent`]. All multi-byte
//! integers in the event protocol are unsigned big-endian; there is no
//! signed field anywhere. Bytes trailing the fixed structure are kept
//! verbatim as the opaque payload.

use crate::types::{DecodeError, EventKind, NormalizedEvent, Result};
use byteorder::{BigEndian, ByteOrder};

/// Event decoder - turns message bodies into normalized records
pub struct EventDecoder;

impl EventDecoder {
    /// Decode a message body according to its kind
    pub fn decode(kind: EventKind, body: &[u8]) -> Result<NormalizedEvent> {
        match kind {
            EventKind::OneNode => Self::decode_one_node(body),
            EventKind::TwoNodes => Self::decode_two_nodes(body),
            EventKind::ManyNodes => Self::decode_many_nodes(body),
        }
    }

    /// One-node event: subtype (1 byte) + node id (2 bytes)
    pub fn decode_one_node(body: &[u8]) -> Result<NormalizedEvent> {
        const FIXED: usize = 3;
        Self::require("one-node event", body, FIXED)?;

        let node_id = BigEndian::read_u16(&body[1..3]);
        log::trace!("parsing a one node event for node {}", node_id);

        Ok(NormalizedEvent {
            kind: EventKind::OneNode,
            subtype: body[0],
            nodes: vec![node_id],
            payload: body[FIXED..].to_vec(),
        })
    }

    /// Two-nodes event: subtype (1 byte) + two node ids (2 bytes each),
    /// order preserved as received
    pub fn decode_two_nodes(body: &[u8]) -> Result<NormalizedEvent> {
        const FIXED: usize = 5;
        Self::require("two-nodes event", body, FIXED)?;

        let node_a = BigEndian::read_u16(&body[1..3]);
        let node_b = BigEndian::read_u16(&body[3..5]);
        log::trace!(
            "parsing a two nodes event between node {} and node {}",
            node_a,
            node_b
        );

        Ok(NormalizedEvent {
            kind: EventKind::TwoNodes,
            subtype: body[0],
            nodes: vec![node_a, node_b],
            payload: body[FIXED..].to_vec(),
        })
    }

    /// Many-nodes event: subtype (1 byte) + count (2 bytes) + count node ids
    /// (2 bytes each). A count whose span exceeds the buffer is a decode
    /// failure, never a silent truncation.
    pub fn decode_many_nodes(body: &[u8]) -> Result<NormalizedEvent> {
        const FIXED: usize = 3;
        Self::require("many-nodes event", body, FIXED)?;

        let count = BigEndian::read_u16(&body[1..3]) as usize;
        let end = FIXED + count * 2;
        Self::require("many-nodes event", body, end)?;

        let nodes = body[FIXED..end]
            .chunks_exact(2)
            .map(BigEndian::read_u16)
            .collect();
        log::trace!("parsing a many nodes event with {} nodes", count);

        Ok(NormalizedEvent {
            kind: EventKind::ManyNodes,
            subtype: body[0],
            nodes,
            payload: body[end..].to_vec(),
        })
    }

    fn require(context: &'static str, body: &[u8], needed: usize) -> Result<()> {
        if body.len() < needed {
            return Err(DecodeError::Truncated {
                context,
                needed,
                available: body.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_node() {
        let event = EventDecoder::decode_one_node(&[1, 0x00, 0x05]).unwrap();
        assert_eq!(event.kind, EventKind::OneNode);
        assert_eq!(event.subtype, 1);
        assert_eq!(event.nodes, vec![5]);
        assert!(event.payload.is_empty());
    }

    #[test]
    fn test_one_node_big_endian_id() {
        let event = EventDecoder::decode_one_node(&[2, 0x01, 0x02]).unwrap();
        assert_eq!(event.nodes, vec![0x0102]);
    }

    #[test]
    fn test_one_node_with_payload() {
        let event = EventDecoder::decode_one_node(b"\x06\x00\x09AUTHENTICATED").unwrap();
        assert_eq!(event.subtype, 6);
        assert_eq!(event.nodes, vec![9]);
        assert_eq!(event.payload_str(), Some("AUTHENTICATED"));
    }

    #[test]
    fn test_one_node_truncated() {
        let err = EventDecoder::decode_one_node(&[1, 0x00]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                context: "one-node event",
                needed: 3,
                available: 2,
            }
        );
    }

    #[test]
    fn test_two_nodes_preserves_order() {
        let event = EventDecoder::decode_two_nodes(&[4, 0x00, 0x03, 0x00, 0x02]).unwrap();
        assert_eq!(event.subtype, 4);
        // Wire order, not sorted.
        assert_eq!(event.nodes, vec![3, 2]);
    }

    #[test]
    fn test_many_nodes() {
        let body = [5, 0x00, 0x03, 0x00, 0x0A, 0x00, 0x0B, 0x00, 0x0C];
        let event = EventDecoder::decode_many_nodes(&body).unwrap();
        assert_eq!(event.subtype, 5);
        assert_eq!(event.nodes, vec![10, 11, 12]);
        assert!(event.payload.is_empty());
    }

    #[test]
    fn test_many_nodes_zero_count() {
        let event = EventDecoder::decode_many_nodes(&[5, 0x00, 0x00, b'x']).unwrap();
        assert!(event.nodes.is_empty());
        assert_eq!(event.payload, b"x");
    }

    #[test]
    fn test_many_nodes_count_overrun() {
        // Declared count of 4 nodes, only 2 present: hard failure, never a
        // partial result.
        let body = [5, 0x00, 0x04, 0x00, 0x0A, 0x00, 0x0B];
        let err = EventDecoder::decode_many_nodes(&body).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                context: "many-nodes event",
                needed: 11,
                available: 7,
            }
        );
    }
}
