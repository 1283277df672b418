//! GTP-U header parse/build (§4.1) — 8-byte minimum header plus optional
//! E/S/PN extension bytes. Only message type 0xFF (G-PDU) carries user data.

use crate::error::UpfError;
use crate::types::Teid;

/// GTP-U message type for a payload-carrying packet (G-PDU).
pub const MSG_TYPE_GPDU: u8 = 0xff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GtpuHeader {
    pub version: u8,
    pub protocol_type: bool,
    pub has_extension: bool,
    pub has_sequence: bool,
    pub has_npdu: bool,
    pub message_type: u8,
    pub length: u16,
    pub teid: Teid,
}

impl GtpuHeader {
    pub fn new(teid: Teid, payload_len: u16) -> Self {
        GtpuHeader {
            version: 1,
            protocol_type: true,
            has_extension: false,
            has_sequence: false,
            has_npdu: false,
            message_type: MSG_TYPE_GPDU,
            length: payload_len,
            teid,
        }
    }

    fn header_len(&self) -> usize {
        let mut len = 8;
        if self.has_extension || self.has_sequence || self.has_npdu {
            len += 4;
        }
        len
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.header_len()];
        let flags = (self.version << 5)
            | ((self.protocol_type as u8) << 4)
            | ((self.has_extension as u8) << 2)
            | ((self.has_sequence as u8) << 1)
            | (self.has_npdu as u8);
        buf[0] = flags;
        buf[1] = self.message_type;
        buf[2..4].copy_from_slice(&self.length.to_be_bytes());
        buf[4..8].copy_from_slice(&self.teid.value().to_be_bytes());
        if buf.len() > 8 {
            // Sequence number / N-PDU number / next extension header byte,
            // all zero: this core never sets these flags itself.
        }
        buf
    }

    /// Parses the fixed header and returns `(header, payload_offset)`. For
    /// non-G-PDU message types the caller should not treat the remainder as
    /// user data (§4.1's "only 0xFF carries user data").
    pub fn unmarshal(data: &[u8]) -> Result<(Self, usize), UpfError> {
        if data.len() < 8 {
            return Err(UpfError::TooShort {
                context: "GTP-U header",
                expected: 8,
                actual: data.len(),
            });
        }
        let flags = data[0];
        let version = flags >> 5;
        let protocol_type = (flags & 0x10) != 0;
        let has_extension = (flags & 0x04) != 0;
        let has_sequence = (flags & 0x02) != 0;
        let has_npdu = (flags & 0x01) != 0;
        let message_type = data[1];
        let length = u16::from_be_bytes([data[2], data[3]]);
        let teid = Teid::new(u32::from_be_bytes([data[4], data[5], data[6], data[7]]));

        let mut offset = 8;
        if has_extension || has_sequence || has_npdu {
            if data.len() < offset + 4 {
                return Err(UpfError::TooShort {
                    context: "GTP-U optional header",
                    expected: offset + 4,
                    actual: data.len(),
                });
            }
            offset += 3; // sequence number (2 bytes) + N-PDU number (1 byte)
            let mut next_ext = data[offset];
            offset += 1;
            // Walk any chained extension headers: each is `len*4` bytes,
            // the last byte of which is the next extension header type.
            while next_ext != 0 {
                if data.len() < offset + 1 {
                    return Err(UpfError::TooShort {
                        context: "GTP-U extension header",
                        expected: offset + 1,
                        actual: data.len(),
                    });
                }
                let ext_len = data[offset] as usize * 4;
                if ext_len == 0 || data.len() < offset + ext_len {
                    return Err(UpfError::TooShort {
                        context: "GTP-U extension header",
                        expected: offset + ext_len.max(1),
                        actual: data.len(),
                    });
                }
                next_ext = data[offset + ext_len - 1];
                offset += ext_len;
            }
        }

        Ok((
            GtpuHeader {
                version,
                protocol_type,
                has_extension,
                has_sequence,
                has_npdu,
                message_type,
                length,
                teid,
            },
            offset,
        ))
    }

    pub fn carries_user_data(&self) -> bool {
        self.message_type == MSG_TYPE_GPDU
    }
}
