// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decoding of the record tables returned by buffered reads.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Result, ZkError};

/// Decodes a packed device timestamp into naive local time.
///
/// Returns `None` when the packed fields do not form a valid date.
pub fn decode_time(packed: u32) -> Option<NaiveDateTime> {
    let mut t = packed;
    let second = t % 60;
    t /= 60;
    let minute = t % 60;
    t /= 60;
    let hour = t % 24;
    t /= 24;
    let day = t % 31 + 1;
    t /= 31;
    let month = t % 12 + 1;
    t /= 12;
    let year = i32::try_from(t).ok()? + 2000;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Packs a timestamp the way the terminal stores it.
pub fn encode_time(time: NaiveDateTime) -> u32 {
    let years = (time.year() - 2000).max(0) as u32;
    ((((years * 12 + time.month0()) * 31 + time.day0()) * 24 + time.hour()) * 60 + time.minute()) * 60
        + time.second()
}

/// Table counters reported by `GET_FREE_SIZES`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sizes {
    pub users: u32,
    pub fingers: u32,
    pub records: u32,
    pub cards: u32,
    pub users_capacity: u32,
    pub records_capacity: u32,
}

pub fn decode_sizes(data: &[u8]) -> Result<Sizes> {
    if data.len() < 80 {
        return Err(ZkError::Malformed(format!("size reply of {} bytes, expected at least 80", data.len())));
    }
    let field = |i: usize| {
        let v = i32::from_le_bytes([data[i * 4], data[i * 4 + 1], data[i * 4 + 2], data[i * 4 + 3]]);
        v.max(0) as u32
    };
    Ok(Sizes {
        users: field(4),
        fingers: field(6),
        records: field(8),
        cards: field(12),
        users_capacity: field(15),
        records_capacity: field(16),
    })
}

/// An enrolled user as stored on the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Internal slot number.
    pub uid: u16,
    /// Identifier shown on the terminal and used in punches.
    pub user_id: String,
    pub name: String,
    pub privilege: u8,
    pub password: String,
    pub group_id: String,
    pub card: u32,
}

/// A single attendance log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub uid: u16,
    pub user_id: String,
    pub timestamp: NaiveDateTime,
    pub status: u8,
    pub punch: u8,
}

/// Decodes the user table blob (u32 total size, then fixed-size entries).
pub fn decode_users(blob: &[u8], count: u32) -> Result<Vec<User>> {
    let Some((total, body)) = split_total(blob) else {
        return Ok(Vec::new());
    };
    if count == 0 {
        return Ok(Vec::new());
    }
    let entry = total / count as usize;
    let decode: fn(&[u8]) -> User = match entry {
        28 => decode_user_28,
        72 => decode_user_72,
        size => return Err(ZkError::UnsupportedEntrySize { kind: "user", size }),
    };
    Ok(body.chunks_exact(entry).map(decode).collect())
}

fn decode_user_28(e: &[u8]) -> User {
    let user_id = u32::from_le_bytes([e[24], e[25], e[26], e[27]]).to_string();
    User {
        uid: u16::from_le_bytes([e[0], e[1]]),
        name: display_name(c_string(&e[8..16]), &user_id),
        privilege: e[2],
        password: c_string(&e[3..8]),
        group_id: e[21].to_string(),
        card: u32::from_le_bytes([e[16], e[17], e[18], e[19]]),
        user_id,
    }
}

fn decode_user_72(e: &[u8]) -> User {
    let user_id = c_string(&e[48..72]);
    User {
        uid: u16::from_le_bytes([e[0], e[1]]),
        name: display_name(c_string(&e[11..35]), &user_id),
        privilege: e[2],
        password: c_string(&e[3..11]),
        group_id: c_string(&e[40..47]),
        card: u32::from_le_bytes([e[35], e[36], e[37], e[38]]),
        user_id,
    }
}

fn display_name(name: String, user_id: &str) -> String {
    if name.is_empty() {
        format!("NN-{}", user_id)
    } else {
        name
    }
}

/// Decodes the attendance log blob.
///
/// `users` resolves slot numbers for the compact 8-byte layout, which does
/// not carry the user id itself. Entries with undecodable timestamps are
/// skipped.
pub fn decode_attendance(blob: &[u8], count: u32, users: &[User]) -> Result<Vec<AttendanceRecord>> {
    let Some((total, body)) = split_total(blob) else {
        return Ok(Vec::new());
    };
    if count == 0 {
        return Ok(Vec::new());
    }
    let entry = total / count as usize;
    let decode: fn(&[u8], &[User]) -> RawEntry = match entry {
        8 => decode_entry_8,
        16 => decode_entry_16,
        40 => decode_entry_40,
        size => return Err(ZkError::UnsupportedEntrySize { kind: "attendance", size }),
    };

    let mut records = Vec::new();
    for e in body.chunks_exact(entry) {
        let raw = decode(e, users);
        match decode_time(raw.packed_time) {
            Some(timestamp) => records.push(AttendanceRecord {
                uid: raw.uid,
                user_id: raw.user_id,
                timestamp,
                status: raw.status,
                punch: raw.punch,
            }),
            None => tracing::warn!(
                user_id = %raw.user_id,
                packed = raw.packed_time,
                "skipping attendance entry with invalid timestamp"
            ),
        }
    }
    Ok(records)
}

struct RawEntry {
    uid: u16,
    user_id: String,
    status: u8,
    packed_time: u32,
    punch: u8,
}

fn decode_entry_8(e: &[u8], users: &[User]) -> RawEntry {
    let uid = u16::from_le_bytes([e[0], e[1]]);
    let user_id =
        users.iter().find(|u| u.uid == uid).map(|u| u.user_id.clone()).unwrap_or_else(|| uid.to_string());
    RawEntry { uid, user_id, status: e[2], packed_time: u32::from_le_bytes([e[3], e[4], e[5], e[6]]), punch: e[7] }
}

fn decode_entry_16(e: &[u8], _users: &[User]) -> RawEntry {
    RawEntry {
        uid: 0,
        user_id: u32::from_le_bytes([e[0], e[1], e[2], e[3]]).to_string(),
        status: e[8],
        packed_time: u32::from_le_bytes([e[4], e[5], e[6], e[7]]),
        punch: e[9],
    }
}

fn decode_entry_40(e: &[u8], _users: &[User]) -> RawEntry {
    RawEntry {
        uid: u16::from_le_bytes([e[0], e[1]]),
        user_id: c_string(&e[2..26]),
        status: e[26],
        packed_time: u32::from_le_bytes([e[27], e[28], e[29], e[30]]),
        punch: e[31],
    }
}

/// Splits off the leading u32 total size. Blobs of four bytes or fewer are empty.
fn split_total(blob: &[u8]) -> Option<(usize, &[u8])> {
    if blob.len() <= 4 {
        return None;
    }
    let total = u32::from_le_bytes([blob[0], blob[1], blob[2], blob[3]]) as usize;
    Some((total, &blob[4..]))
}

/// Reads a NUL-terminated string, dropping invalid UTF-8.
fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).replace('\u{FFFD}', "").trim().to_string()
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
