// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Loopback fake terminal and table encoders for tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::protocol::{command, framing, reply, Packet};
use crate::records::{encode_time, AttendanceRecord, User};

/// Session id handed out by the fake terminal.
pub const FAKE_SESSION_ID: u16 = 0x2A2A;

/// Behaviour of a [`FakeTerminal`].
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    pub users: Vec<User>,
    pub records: Vec<AttendanceRecord>,
    /// User entry size: 28 or 72.
    pub user_layout: usize,
    /// Attendance entry size: 8, 16 or 40.
    pub attendance_layout: usize,
    /// Serve the attendance log through staged chunk reads instead of inline.
    pub chunked: bool,
    /// Answer `CONNECT` with `ACK_UNAUTH`.
    pub require_auth: bool,
    /// Answer this command with `ACK_ERROR`.
    pub reject: Option<u16>,
    /// Never answer this command.
    pub stall: Option<u16>,
    /// Staged size to report for a chunked log instead of the real one.
    pub advertised_size: Option<u32>,
    /// Size to announce in each `PREPARE_DATA` instead of the chunk length.
    pub announced_chunk: Option<u32>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            users: Vec::new(),
            records: Vec::new(),
            user_layout: 72,
            attendance_layout: 40,
            chunked: false,
            require_auth: false,
            reject: None,
            stall: None,
            advertised_size: None,
            announced_chunk: None,
        }
    }
}

/// A terminal listening on a loopback port, serving connections one at a time.
pub struct FakeTerminal {
    addr: SocketAddr,
    commands: Arc<Mutex<Vec<u16>>>,
    task: JoinHandle<()>,
}

impl FakeTerminal {
    pub async fn start(config: TerminalConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let commands = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&commands);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                serve(stream, &config, &log).await;
            }
        });
        Ok(FakeTerminal { addr, commands, task })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Commands received so far, in order.
    pub fn commands(&self) -> Vec<u16> {
        self.commands.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, cmd: u16) -> usize {
        self.commands().iter().filter(|c| **c == cmd).count()
    }
}

impl Drop for FakeTerminal {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut stream: TcpStream, config: &TerminalConfig, log: &Mutex<Vec<u16>>) {
    let users_blob = users_blob(&config.users, config.user_layout);
    let attendance_blob = attendance_blob(&config.records, config.attendance_layout);
    let mut staged: Vec<u8> = Vec::new();

    while let Ok(request) = framing::read_packet(&mut stream).await {
        if let Ok(mut log) = log.lock() {
            log.push(request.command);
        }
        if config.stall == Some(request.command) {
            continue;
        }

        let mut replies = Vec::new();
        let mut respond = |code: u16, data: Vec<u8>| {
            replies.push(Packet::reply(code, FAKE_SESSION_ID, request.reply_id, data));
        };

        if config.reject == Some(request.command) {
            respond(reply::ACK_ERROR, Vec::new());
        } else {
            match request.command {
                command::CONNECT if config.require_auth => respond(reply::ACK_UNAUTH, Vec::new()),
                command::GET_FREE_SIZES => {
                    respond(reply::ACK_OK, sizes_reply(config.users.len() as i32, config.records.len() as i32))
                }
                command::PREPARE_BUFFER => {
                    let table = u16::from_le_bytes([request.data[1], request.data[2]]);
                    let blob = if table == command::ATTLOG_RRQ { &attendance_blob } else { &users_blob };
                    if config.chunked && table == command::ATTLOG_RRQ {
                        staged = blob.clone();
                        let mut data = vec![0u8];
                        data.extend_from_slice(&config.advertised_size.unwrap_or(staged.len() as u32).to_le_bytes());
                        respond(reply::ACK_OK, data);
                    } else {
                        respond(reply::DATA, blob.clone());
                    }
                }
                command::READ_BUFFER => {
                    let word = |i: usize| {
                        i32::from_le_bytes([request.data[i], request.data[i + 1], request.data[i + 2], request.data[i + 3]])
                            as usize
                    };
                    let (start, len) = (word(0), word(4));
                    let chunk = staged.get(start..start + len).unwrap_or_default().to_vec();
                    let announced = config.announced_chunk.unwrap_or(chunk.len() as u32);
                    respond(reply::PREPARE_DATA, announced.to_le_bytes().to_vec());
                    let (head, tail) = chunk.split_at(chunk.len() / 2);
                    respond(reply::DATA, head.to_vec());
                    respond(reply::DATA, tail.to_vec());
                    respond(reply::ACK_OK, Vec::new());
                }
                command::FREE_DATA => {
                    staged.clear();
                    respond(reply::ACK_OK, Vec::new());
                }
                _ => respond(reply::ACK_OK, Vec::new()),
            }
        }

        for packet in &replies {
            if framing::write_packet(&mut stream, packet).await.is_err() {
                return;
            }
        }
        if request.command == command::EXIT {
            return;
        }
    }
}

/// `GET_FREE_SIZES` reply body with the given user and record counts.
pub fn sizes_reply(users: i32, records: i32) -> Vec<u8> {
    let mut fields = [0i32; 20];
    fields[4] = users;
    fields[8] = records;
    fields[15] = 3000;
    fields[16] = 100_000;
    fields.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Encodes a user table with the given entry size (28 or 72).
pub fn users_blob(users: &[User], layout: usize) -> Vec<u8> {
    let mut body = Vec::new();
    for user in users {
        let mut e = vec![0u8; layout];
        e[0..2].copy_from_slice(&user.uid.to_le_bytes());
        e[2] = user.privilege;
        if layout == 28 {
            put_str(&mut e[3..8], &user.password);
            put_str(&mut e[8..16], &user.name);
            e[16..20].copy_from_slice(&user.card.to_le_bytes());
            e[21] = user.group_id.parse().unwrap_or(0);
            e[24..28].copy_from_slice(&user.user_id.parse::<u32>().unwrap_or(0).to_le_bytes());
        } else {
            put_str(&mut e[3..11], &user.password);
            put_str(&mut e[11..35], &user.name);
            e[35..39].copy_from_slice(&user.card.to_le_bytes());
            put_str(&mut e[40..47], &user.group_id);
            put_str(&mut e[48..72], &user.user_id);
        }
        body.extend_from_slice(&e);
    }
    with_total(body)
}

/// Encodes an attendance log with the given entry size (8, 16 or 40).
pub fn attendance_blob(records: &[AttendanceRecord], layout: usize) -> Vec<u8> {
    let mut body = Vec::new();
    for record in records {
        let mut e = vec![0u8; layout];
        let time = encode_time(record.timestamp).to_le_bytes();
        match layout {
            8 => {
                e[0..2].copy_from_slice(&record.uid.to_le_bytes());
                e[2] = record.status;
                e[3..7].copy_from_slice(&time);
                e[7] = record.punch;
            }
            16 => {
                e[0..4].copy_from_slice(&record.user_id.parse::<u32>().unwrap_or(0).to_le_bytes());
                e[4..8].copy_from_slice(&time);
                e[8] = record.status;
                e[9] = record.punch;
            }
            _ => {
                e[0..2].copy_from_slice(&record.uid.to_le_bytes());
                put_str(&mut e[2..26], &record.user_id);
                e[26] = record.status;
                e[27..31].copy_from_slice(&time);
                e[31] = record.punch;
            }
        }
        body.extend_from_slice(&e);
    }
    with_total(body)
}

fn with_total(body: Vec<u8>) -> Vec<u8> {
    let mut blob = (body.len() as u32).to_le_bytes().to_vec();
    blob.extend_from_slice(&body);
    blob
}

fn put_str(field: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    let n = bytes.len().min(field.len().saturating_sub(1));
    field[..n].copy_from_slice(&bytes[..n]);
}
