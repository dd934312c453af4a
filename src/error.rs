/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::ipmi::ipmi::{IPMI_CC_RESP_COULD_NOT_BE_PRV, IPMI_CC_UNSPECIFIED_ERROR};
use std::collections::HashMap;
use std::fmt;

// 值-字符串映射类型
type ValStrMap = HashMap<u8, &'static str>;

pub fn val2str(val: u8, map: &ValStrMap) -> &'static str {
    map.get(&val).copied().unwrap_or("Unknown value")
}

lazy_static::lazy_static! {
    pub static ref COMPLETION_CODE_VALS: ValStrMap = {
        let mut m = HashMap::new();
        m.insert(0x00, "Command completed normally");
        m.insert(0xc0, "Node busy");
        m.insert(0xc1, "Invalid command");
        m.insert(0xc2, "Invalid command on LUN");
        m.insert(0xc3, "Timeout");
        m.insert(0xc4, "Out of space");
        m.insert(0xc5, "Reservation cancelled or invalid");
        m.insert(0xc6, "Request data truncated");
        m.insert(0xc7, "Request data length invalid");
        m.insert(0xc8, "Request data field length limit exceeded");
        m.insert(0xc9, "Parameter out of range");
        m.insert(0xca, "Cannot return number of requested data bytes");
        m.insert(0xcb, "Requested sensor, data, or record not found");
        m.insert(0xcc, "Invalid data field in request");
        m.insert(0xcd, "Command illegal for specified sensor or record type");
        m.insert(0xce, "Command response could not be provided");
        m.insert(0xcf, "Cannot execute duplicated request");
        m.insert(0xd0, "SDR Repository in update mode");
        m.insert(0xd1, "Device firmeware in update mode");
        m.insert(0xd2, "BMC initialization in progress");
        m.insert(0xd3, "Destination unavailable");
        m.insert(0xd4, "Insufficient privilege level");
        m.insert(0xd5, "Command not supported in present state");
        m.insert(0xd6, "Cannot execute command, command disabled");
        m.insert(0xff, "Unspecified error");
        m
    };
}

/// Firmware version string parse failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing left after cutting the leading 'v'
    Empty,
    /// A required token had no parsable numeric value
    Malformed(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty version string"),
            ParseError::Malformed(tok) => write!(f, "malformed version token: '{}'", tok),
        }
    }
}

impl std::error::Error for ParseError {}

/// Application command error types
#[derive(Debug, Clone)]
pub enum AppError {
    /// A collaborator could not be reached or had no usable object
    ProviderUnavailable(String),
    /// Text did not match the expected byte-count/hex shape
    Format(String),
    /// Version string malformed or empty
    Parse(ParseError),
    /// Descriptor file missing or content corrupt
    Descriptor(String),
    /// System error (file I/O)
    System(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ProviderUnavailable(msg) => write!(f, "Provider unavailable: {}", msg),
            AppError::Format(msg) => write!(f, "Format error: {}", msg),
            AppError::Parse(err) => write!(f, "Version parse error: {}", err),
            AppError::Descriptor(msg) => write!(f, "Device descriptor error: {}", msg),
            AppError::System(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::System(error.to_string())
    }
}

impl From<ParseError> for AppError {
    fn from(error: ParseError) -> Self {
        AppError::Parse(error)
    }
}

impl AppError {
    /// IPMI completion code reported for this error
    pub fn completion_code(&self) -> u8 {
        match self {
            AppError::Format(_) => IPMI_CC_RESP_COULD_NOT_BE_PRV,
            _ => IPMI_CC_UNSPECIFIED_ERROR,
        }
    }
}

/// 便利类型别名
pub type AppResult<T> = Result<T, AppError>;
