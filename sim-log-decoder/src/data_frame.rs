//! Outbound data-frame decoding
//!
//! Data frames (marker byte [`DATA_FRAME`]) carry per-node reachability
//! reports: which neighbours a node could and could not hear during the
//! last exchange. The event dispatcher leaves this family alone; viewers
//! and other consumers decode it separately with [`ReachabilityReport`].
//!
//! Layout after the marker byte, all fields big-endian: reporting node id
//! (2 bytes), good-node count (2 bytes) and that many node ids, bad-node
//! count (2 bytes) and that many node ids, then miscellaneous trailing
//! data.

use crate::types::{DecodeError, Result};
use byteorder::{BigEndian, ByteOrder};

pub use crate::types::DATA_FRAME;

const CONTEXT: &str = "reachability report";

/// A node's view of which neighbours it can and cannot reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityReport {
    /// The reporting node
    pub node: u16,
    /// Neighbours heard successfully, in wire order
    pub good_nodes: Vec<u16>,
    /// Neighbours that failed, in wire order
    pub bad_nodes: Vec<u16>,
    /// Miscellaneous trailing data, kept verbatim
    pub payload: Vec<u8>,
}

impl ReachabilityReport {
    /// Decode the body of a data frame (marker byte already stripped)
    pub fn decode(body: &[u8]) -> Result<Self> {
        let mut offset = 0;
        let node = read_u16(body, &mut offset)?;
        let good_nodes = read_node_list(body, &mut offset)?;
        let bad_nodes = read_node_list(body, &mut offset)?;

        Ok(Self {
            node,
            good_nodes,
            bad_nodes,
            payload: body[offset..].to_vec(),
        })
    }
}

fn read_u16(buf: &[u8], offset: &mut usize) -> Result<u16> {
    let end = *offset + 2;
    if buf.len() < end {
        return Err(DecodeError::Truncated {
            context: CONTEXT,
            needed: end,
            available: buf.len(),
        });
    }
    let value = BigEndian::read_u16(&buf[*offset..end]);
    *offset = end;
    Ok(value)
}

fn read_node_list(buf: &[u8], offset: &mut usize) -> Result<Vec<u16>> {
    let count = read_u16(buf, offset)? as usize;
    let end = *offset + count * 2;
    if buf.len() < end {
        return Err(DecodeError::Truncated {
            context: CONTEXT,
            needed: end,
            available: buf.len(),
        });
    }
    let nodes = buf[*offset..end].chunks_exact(2).map(BigEndian::read_u16).collect();
    *offset = end;
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_report() {
        // Node 1 heard nodes 2 and 3, failed to hear node 4.
        let body = [
            0x00, 0x01, // node
            0x00, 0x02, 0x00, 0x02, 0x00, 0x03, // 2 good nodes
            0x00, 0x01, 0x00, 0x04, // 1 bad node
            b'o', b'k', // trailing data
        ];
        let report = ReachabilityReport::decode(&body).unwrap();
        assert_eq!(report.node, 1);
        assert_eq!(report.good_nodes, vec![2, 3]);
        assert_eq!(report.bad_nodes, vec![4]);
        assert_eq!(report.payload, b"ok");
    }

    #[test]
    fn test_decode_empty_lists() {
        let body = [0x00, 0x09, 0x00, 0x00, 0x00, 0x00];
        let report = ReachabilityReport::decode(&body).unwrap();
        assert_eq!(report.node, 9);
        assert!(report.good_nodes.is_empty());
        assert!(report.bad_nodes.is_empty());
        assert!(report.payload.is_empty());
    }

    #[test]
    fn test_count_overrun_fails() {
        // Good-node count of 3 with only one id present.
        let body = [0x00, 0x01, 0x00, 0x03, 0x00, 0x02];
        let err = ReachabilityReport::decode(&body).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                context: "reachability report",
                needed: 10,
                available: 6,
            }
        );
    }

    #[test]
    fn test_missing_bad_list_fails() {
        let body = [0x00, 0x01, 0x00, 0x00];
        assert!(ReachabilityReport::decode(&body).is_err());
    }
}
