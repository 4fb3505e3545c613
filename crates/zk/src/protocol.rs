// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Packet layout and TCP framing.
//!
//! A packet is an 8-byte header (`command`, `checksum`, `session_id`,
//! `reply_id`, all u16 LE) followed by command data. Over TCP each packet
//! is wrapped in a frame: two magic words and a u32 LE payload length.

use crate::error::{Result, ZkError};

/// First frame magic word.
pub const FRAME_MAGIC_1: u16 = 0x5050;
/// Second frame magic word.
pub const FRAME_MAGIC_2: u16 = 0x7D82;

/// Modulus used for checksums and reply id wrapping.
pub const USHRT_MAX: u16 = 65535;

/// Reply id used for the first packet of a session.
pub const INITIAL_REPLY_ID: u16 = USHRT_MAX - 1;

pub const HEADER_LEN: usize = 8;

/// Largest chunk requested per `READ_BUFFER` over TCP.
pub const MAX_CHUNK: u32 = 0xFFC0;

/// Largest staged buffer accepted from a terminal. Attendance logs of
/// several hundred thousand 40-byte entries stay well below it.
pub const MAX_BUFFER_SIZE: u32 = 64 * 1024 * 1024;

pub mod command {
    pub const CONNECT: u16 = 1000;
    pub const EXIT: u16 = 1001;
    pub const ENABLE_DEVICE: u16 = 1002;
    pub const DISABLE_DEVICE: u16 = 1003;
    pub const GET_FREE_SIZES: u16 = 50;
    pub const USERTEMP_RRQ: u16 = 9;
    pub const ATTLOG_RRQ: u16 = 13;
    pub const FREE_DATA: u16 = 1502;
    pub const PREPARE_BUFFER: u16 = 1503;
    pub const READ_BUFFER: u16 = 1504;

    /// Function code selecting the user table in `USERTEMP_RRQ`.
    pub const FCT_USER: i32 = 5;
}

pub mod reply {
    pub const PREPARE_DATA: u16 = 1500;
    pub const DATA: u16 = 1501;
    pub const ACK_OK: u16 = 2000;
    pub const ACK_ERROR: u16 = 2001;
    pub const ACK_DATA: u16 = 2002;
    pub const ACK_UNAUTH: u16 = 2005;
}

/// Checksum over a packet with its checksum field zeroed.
pub fn checksum(bytes: &[u8]) -> u16 {
    let max = i64::from(USHRT_MAX);
    let mut sum: i64 = 0;
    let mut words = bytes.chunks_exact(2);
    for word in words.by_ref() {
        sum += i64::from(u16::from_le_bytes([word[0], word[1]]));
        if sum > max {
            sum -= max;
        }
    }
    if let [odd] = words.remainder() {
        sum += i64::from(*odd);
    }
    while sum > max {
        sum -= max;
    }
    sum = !sum;
    while sum < 0 {
        sum += max;
    }
    sum as u16
}

/// Reply id carried by the packet following one sent with `reply_id`.
pub fn next_reply_id(reply_id: u16) -> u16 {
    let next = u32::from(reply_id) + 1;
    if next >= u32::from(USHRT_MAX) {
        (next - u32::from(USHRT_MAX)) as u16
    } else {
        next as u16
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub command: u16,
    pub checksum: u16,
    pub session_id: u16,
    pub reply_id: u16,
    pub data: Vec<u8>,
}

impl Packet {
    /// Builds an outgoing request.
    ///
    /// The checksum covers the header with the current `reply_id`; the
    /// transmitted header carries the next one.
    pub fn request(command: u16, session_id: u16, reply_id: u16, data: Vec<u8>) -> Self {
        let unsigned = Packet { command, checksum: 0, session_id, reply_id, data };
        let checksum = checksum(&unsigned.encode());
        Packet { checksum, reply_id: next_reply_id(reply_id), ..unsigned }
    }

    /// Builds a reply echoing the request's session and reply ids.
    pub fn reply(command: u16, session_id: u16, reply_id: u16, data: Vec<u8>) -> Self {
        let unsigned = Packet { command, checksum: 0, session_id, reply_id, data };
        let checksum = checksum(&unsigned.encode());
        Packet { checksum, ..unsigned }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.data.len());
        buf.extend_from_slice(&self.command.to_le_bytes());
        buf.extend_from_slice(&self.checksum.to_le_bytes());
        buf.extend_from_slice(&self.session_id.to_le_bytes());
        buf.extend_from_slice(&self.reply_id.to_le_bytes());
        buf.extend_from_slice(&self.data);
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(ZkError::Malformed(format!("packet of {} bytes is shorter than its header", bytes.len())));
        }
        let word = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        Ok(Packet {
            command: word(0),
            checksum: word(2),
            session_id: word(4),
            reply_id: word(6),
            data: bytes[HEADER_LEN..].to_vec(),
        })
    }
}

/// Length-prefixed frames over an async byte stream.
pub mod framing {
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

    use super::{Packet, FRAME_MAGIC_1, FRAME_MAGIC_2};
    use crate::error::{Result, ZkError};

    /// Maximum frame payload (16MB) to keep a corrupt length from allocating unbounded memory.
    const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

    pub async fn write_packet<W: AsyncWrite + Unpin>(writer: &mut W, packet: &Packet) -> Result<()> {
        let payload = packet.encode();
        let len = u32::try_from(payload.len()).map_err(|_| ZkError::Malformed("packet too large".to_string()))?;
        let mut frame = Vec::with_capacity(8 + payload.len());
        frame.extend_from_slice(&FRAME_MAGIC_1.to_le_bytes());
        frame.extend_from_slice(&FRAME_MAGIC_2.to_le_bytes());
        frame.extend_from_slice(&len.to_le_bytes());
        frame.extend_from_slice(&payload);
        writer.write_all(&frame).await?;
        writer.flush().await?;
        Ok(())
    }

    pub async fn read_packet<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Packet> {
        let mut head = [0u8; 8];
        reader.read_exact(&mut head).await?;
        let magic = (u16::from_le_bytes([head[0], head[1]]), u16::from_le_bytes([head[2], head[3]]));
        if magic != (FRAME_MAGIC_1, FRAME_MAGIC_2) {
            return Err(ZkError::Malformed(format!("bad frame magic {:04x} {:04x}", magic.0, magic.1)));
        }
        let len = u32::from_le_bytes([head[4], head[5], head[6], head[7]]) as usize;
        if len > MAX_FRAME_SIZE {
            return Err(ZkError::Malformed(format!("frame too large: {} bytes (max {})", len, MAX_FRAME_SIZE)));
        }

        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload).await?;
        Packet::decode(&payload)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
