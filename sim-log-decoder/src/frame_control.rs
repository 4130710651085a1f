//! IEEE 802.15.4 frame-control decoding
//!
//! Decodes the 16-bit frame-control field at the start of a MAC header and
//! derives addressing sizes, PAN-ID presence and the MAC payload offset.
//! The field is little-endian on the wire; the event-log protocol is
//! big-endian. The asymmetry is a property of the two underlying wire
//! formats and is preserved here.
//!
//! Independent of the event protocol: this decoder is applied to payloads
//! that are 802.15.4 frames, never to event-log datagrams.

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// Errors raised while interpreting a frame-control field
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Fewer than the two frame-control bytes were supplied
    #[error("frame-control field needs 2 bytes, got {0}")]
    MalformedHeader(usize),
    /// Addressing mode 1 is reserved by the standard and has no size
    #[error("address mode {0} is reserved")]
    ReservedAddressMode(u8),
    /// PAN-ID compression asserted with only one address present
    #[error("PAN-ID compression requires both addresses to be present")]
    InvalidCompressionFlag,
}

/// MAC frame type (bits 0-2 of the frame-control field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Beacon,
    Data,
    Ack,
    MacCommand,
    Reserved(u8),
}

impl FrameType {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => FrameType::Beacon,
            1 => FrameType::Data,
            2 => FrameType::Ack,
            3 => FrameType::MacCommand,
            other => FrameType::Reserved(other),
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameType::Beacon => write!(f, "Beacon"),
            FrameType::Data => write!(f, "Data"),
            FrameType::Ack => write!(f, "Acknowledgment"),
            FrameType::MacCommand => write!(f, "MAC command"),
            FrameType::Reserved(v) => write!(f, "Reserved({})", v),
        }
    }
}

/// Addressing mode for the source or destination field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// No address carried (mode 0)
    Absent,
    /// 16-bit short address (mode 2)
    Short,
    /// 64-bit extended address (mode 3)
    Extended,
}

impl AddressMode {
    /// Map a 2-bit mode field. Mode 1 is reserved and fails; it must never
    /// resolve to a size.
    fn from_bits(bits: u8) -> Result<Self, FrameError> {
        match bits & 0x03 {
            0 => Ok(AddressMode::Absent),
            2 => Ok(AddressMode::Short),
            3 => Ok(AddressMode::Extended),
            reserved => Err(FrameError::ReservedAddressMode(reserved)),
        }
    }

    /// Size of the address field in bytes
    pub fn size(self) -> usize {
        match self {
            AddressMode::Absent => 0,
            AddressMode::Short => 2,
            AddressMode::Extended => 8,
        }
    }

    /// True if an address is carried at all
    pub fn is_present(self) -> bool {
        !matches!(self, AddressMode::Absent)
    }
}

/// Decoded 16-bit frame-control field
///
/// Decoded once from the first two header bytes; immutable afterwards.
/// Bit accessors are pure and cheap, so the raw value is all that is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameControl {
    raw: u16,
}

impl FrameControl {
    /// Decode the frame-control field from the start of a MAC header
    pub fn decode(header: &[u8]) -> Result<Self, FrameError> {
        if header.len() < 2 {
            return Err(FrameError::MalformedHeader(header.len()));
        }
        Ok(Self {
            raw: LittleEndian::read_u16(&header[..2]),
        })
    }

    /// The raw 16-bit field
    pub fn raw(self) -> u16 {
        self.raw
    }

    /// Frame type (bits 0-2)
    pub fn frame_type(self) -> FrameType {
        FrameType::from_bits((self.raw & 0x0007) as u8)
    }

    /// Security-enabled flag (bit 3)
    pub fn security_enabled(self) -> bool {
        self.raw & 0x0008 != 0
    }

    /// Frame-pending flag (bit 4)
    pub fn frame_pending(self) -> bool {
        self.raw & 0x0010 != 0
    }

    /// Acknowledgment-requested flag (bit 5)
    pub fn ack_requested(self) -> bool {
        self.raw & 0x0020 != 0
    }

    /// PAN-ID-compression flag (bit 6)
    pub fn pan_id_compressed(self) -> bool {
        self.raw & 0x0040 != 0
    }

    /// Frame version (bits 12-13)
    pub fn frame_version(self) -> u8 {
        ((self.raw & 0x3000) >> 12) as u8
    }

    /// Destination addressing mode (bits 10-11)
    pub fn dst_addr_mode(self) -> Result<AddressMode, FrameError> {
        AddressMode::from_bits(((self.raw & 0x0C00) >> 10) as u8)
    }

    /// Source addressing mode (bits 14-15)
    pub fn src_addr_mode(self) -> Result<AddressMode, FrameError> {
        AddressMode::from_bits(((self.raw & 0xC000) >> 14) as u8)
    }

    /// True if the header carries a source PAN identifier
    pub fn src_pan_present(self) -> Result<bool, FrameError> {
        Ok(self.pan_presence()?.0)
    }

    /// True if the header carries a destination PAN identifier
    pub fn dst_pan_present(self) -> Result<bool, FrameError> {
        Ok(self.pan_presence()?.1)
    }

    /// PAN-ID presence is a pure function of (source present, destination
    /// present, compression flag):
    ///
    /// | src | dst | compressed | src PAN | dst PAN |
    /// |-----|-----|------------|---------|---------|
    /// | yes | yes | yes        | no      | yes     |
    /// | yes | yes | no         | yes     | yes     |
    /// | yes | no  | no         | yes     | no      |
    /// | no  | yes | no         | no      | yes     |
    /// | no  | no  | any        | no      | no      |
    ///
    /// Compression with only one address present is a protocol violation,
    /// not a recoverable default.
    fn pan_presence(self) -> Result<(bool, bool), FrameError> {
        let src = self.src_addr_mode()?.is_present();
        let dst = self.dst_addr_mode()?.is_present();
        match (src, dst, self.pan_id_compressed()) {
            (true, true, true) => Ok((false, true)),
            (true, true, false) => Ok((true, true)),
            (true, false, false) => Ok((true, false)),
            (false, true, false) => Ok((false, true)),
            (false, false, _) => Ok((false, false)),
            (true, false, true) | (false, true, true) => {
                Err(FrameError::InvalidCompressionFlag)
            }
        }
    }

    /// Byte offset of the MAC payload within the frame: frame control and
    /// sequence number, plus 2 bytes for each PAN ID actually present,
    /// plus the address fields.
    pub fn mac_payload_offset(self) -> Result<usize, FrameError> {
        let (src_pan, dst_pan) = self.pan_presence()?;
        let mut offset = 3;
        if src_pan {
            offset += 2;
        }
        if dst_pan {
            offset += 2;
        }
        offset += self.src_addr_mode()?.size();
        offset += self.dst_addr_mode()?.size();
        Ok(offset)
    }
}
