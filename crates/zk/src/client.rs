// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Async TCP client for a single terminal.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{lookup_host, TcpStream};
use tracing::{debug, warn};

use crate::error::{Result, ZkError};
use crate::protocol::{command, framing, reply, Packet, INITIAL_REPLY_ID, MAX_BUFFER_SIZE, MAX_CHUNK};
use crate::records::{self, AttendanceRecord, Sizes, User};

/// An open session with a terminal.
///
/// Every request/response exchange is bounded by the timeout given at
/// connect time. The terminal handles one request at a time, so all
/// operations take `&mut self`.
pub struct ZkClient {
    stream: TcpStream,
    peer: SocketAddr,
    session_id: u16,
    reply_id: u16,
    timeout: Duration,
}

impl ZkClient {
    /// Opens a TCP connection and performs the `CONNECT` handshake.
    pub async fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let stream = tokio::time::timeout(timeout, open_stream(host, port))
            .await
            .map_err(|_| ZkError::Timeout(timeout))??;
        let peer = stream.peer_addr()?;

        let mut client = ZkClient { stream, peer, session_id: 0, reply_id: INITIAL_REPLY_ID, timeout };
        let response = client.exchange(command::CONNECT, Vec::new()).await?;
        match response.command {
            reply::ACK_OK => {
                client.session_id = response.session_id;
                debug!(%peer, session_id = client.session_id, "terminal session opened");
                Ok(client)
            }
            reply::ACK_UNAUTH => Err(ZkError::AuthRequired),
            code => Err(ZkError::Rejected { command: command::CONNECT, code }),
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn session_id(&self) -> u16 {
        self.session_id
    }

    /// Stops the terminal from recording new events.
    pub async fn disable_device(&mut self) -> Result<()> {
        self.command_ok(command::DISABLE_DEVICE, Vec::new()).await.map(drop)
    }

    /// Lets the terminal record new events again.
    pub async fn enable_device(&mut self) -> Result<()> {
        self.command_ok(command::ENABLE_DEVICE, Vec::new()).await.map(drop)
    }

    pub async fn read_sizes(&mut self) -> Result<Sizes> {
        let response = self.command_ok(command::GET_FREE_SIZES, Vec::new()).await?;
        records::decode_sizes(&response.data)
    }

    pub async fn get_users(&mut self) -> Result<Vec<User>> {
        let sizes = self.read_sizes().await?;
        if sizes.users == 0 {
            return Ok(Vec::new());
        }
        let blob = self.read_with_buffer(command::USERTEMP_RRQ, command::FCT_USER, 0).await?;
        records::decode_users(&blob, sizes.users)
    }

    /// Reads the full attendance log.
    pub async fn get_attendance(&mut self) -> Result<Vec<AttendanceRecord>> {
        let sizes = self.read_sizes().await?;
        if sizes.records == 0 {
            return Ok(Vec::new());
        }
        let users = self.get_users().await?;
        let blob = self.read_with_buffer(command::ATTLOG_RRQ, 0, 0).await?;
        let records = records::decode_attendance(&blob, sizes.records, &users)?;
        debug!(count = records.len(), reported = sizes.records, "attendance log read");
        Ok(records)
    }

    /// Reads a table through the terminal's transfer buffer.
    ///
    /// Small tables come back inline in a `DATA` reply. Larger ones are
    /// staged on the terminal and pulled in chunks, after which the buffer
    /// is freed.
    pub async fn read_with_buffer(&mut self, table: u16, fct: i32, ext: i32) -> Result<Vec<u8>> {
        let mut request = vec![1u8];
        request.extend_from_slice(&(table as i16).to_le_bytes());
        request.extend_from_slice(&fct.to_le_bytes());
        request.extend_from_slice(&ext.to_le_bytes());

        let response = self.command_ok(command::PREPARE_BUFFER, request).await?;
        if response.command == reply::DATA {
            return Ok(response.data);
        }
        if response.data.len() < 5 {
            return Err(ZkError::Malformed(format!("buffer reply of {} bytes", response.data.len())));
        }
        let size = u32::from_le_bytes([response.data[1], response.data[2], response.data[3], response.data[4]]);
        if size > MAX_BUFFER_SIZE {
            return Err(ZkError::Malformed(format!("staged buffer of {} bytes (max {})", size, MAX_BUFFER_SIZE)));
        }

        let mut blob = Vec::with_capacity(size as usize);
        let mut start = 0u32;
        while start < size {
            let len = (size - start).min(MAX_CHUNK);
            let chunk = self.read_chunk(start, len).await?;
            blob.extend_from_slice(&chunk);
            start += len;
        }
        self.free_data().await?;
        Ok(blob)
    }

    async fn read_chunk(&mut self, start: u32, len: u32) -> Result<Vec<u8>> {
        let mut request = Vec::with_capacity(8);
        request.extend_from_slice(&(start as i32).to_le_bytes());
        request.extend_from_slice(&(len as i32).to_le_bytes());

        let response = self.command_ok(command::READ_BUFFER, request).await?;
        match response.command {
            reply::DATA => Ok(response.data),
            reply::PREPARE_DATA => {
                if response.data.len() < 4 {
                    return Err(ZkError::Malformed("prepare-data reply without size".to_string()));
                }
                let size = u32::from_le_bytes([response.data[0], response.data[1], response.data[2], response.data[3]]);
                if size > len {
                    return Err(ZkError::Malformed(format!("chunk of {} bytes for a {}-byte request", size, len)));
                }
                let size = size as usize;
                let mut data = Vec::with_capacity(size);
                while data.len() < size {
                    let packet = self.receive().await?;
                    if packet.command != reply::DATA {
                        return Err(ZkError::Malformed(format!("expected data packet, got {}", packet.command)));
                    }
                    data.extend_from_slice(&packet.data);
                }
                let closing = self.receive().await?;
                if closing.command != reply::ACK_OK {
                    warn!(code = closing.command, "chunk transfer not closed with ACK_OK");
                }
                data.truncate(size);
                Ok(data)
            }
            code => Err(ZkError::Rejected { command: command::READ_BUFFER, code }),
        }
    }

    pub async fn free_data(&mut self) -> Result<()> {
        self.command_ok(command::FREE_DATA, Vec::new()).await.map(drop)
    }

    /// Ends the session and shuts the socket down.
    pub async fn disconnect(mut self) -> Result<()> {
        let result = self.command_ok(command::EXIT, Vec::new()).await.map(drop);
        let _ = self.stream.shutdown().await;
        debug!(peer = %self.peer, "terminal session closed");
        result
    }

    /// Sends a command and fails unless the terminal acknowledged it.
    async fn command_ok(&mut self, cmd: u16, data: Vec<u8>) -> Result<Packet> {
        let response = self.exchange(cmd, data).await?;
        match response.command {
            reply::ACK_OK | reply::ACK_DATA | reply::DATA | reply::PREPARE_DATA => Ok(response),
            code => Err(ZkError::Rejected { command: cmd, code }),
        }
    }

    async fn exchange(&mut self, cmd: u16, data: Vec<u8>) -> Result<Packet> {
        let request = Packet::request(cmd, self.session_id, self.reply_id, data);
        let timeout = self.timeout;
        tokio::time::timeout(timeout, framing::write_packet(&mut self.stream, &request))
            .await
            .map_err(|_| ZkError::Timeout(timeout))??;
        self.receive().await
    }

    async fn receive(&mut self) -> Result<Packet> {
        let timeout = self.timeout;
        let packet = tokio::time::timeout(timeout, framing::read_packet(&mut self.stream))
            .await
            .map_err(|_| ZkError::Timeout(timeout))??;
        self.reply_id = packet.reply_id;
        Ok(packet)
    }
}

async fn open_stream(host: &str, port: u16) -> Result<TcpStream> {
    let mut last_err = None;
    for addr in lookup_host((host, port)).await? {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(match last_err {
        Some(e) => ZkError::Io(e),
        None => ZkError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, format!("no address for {}", host))),
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
