/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{AppError, AppResult};
use crate::providers::DescriptorSource;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const DEV_ID_FILE: &str = "/usr/share/ipmi-providers/dev_id.json";

/// Static identity fields of the Device ID record, as shipped by the
/// platform. Absent fields read as 0; an `aux` of 0 means "no override" and
/// never erases an AUX revision derived from the version string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceDescriptor {
    #[serde(default)]
    pub id: u8,
    #[serde(default)]
    pub revision: u8,
    #[serde(default)]
    pub addn_dev_support: u8,
    #[serde(default)]
    pub manuf_id: u32,
    #[serde(default)]
    pub prod_id: u16,
    #[serde(default)]
    pub aux: u32,
}

/// Reads the descriptor from a JSON file.
pub struct FileDescriptorSource {
    path: PathBuf,
}

impl FileDescriptorSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileDescriptorSource {
    fn default() -> Self {
        Self::new(DEV_ID_FILE)
    }
}

impl DescriptorSource for FileDescriptorSource {
    fn read(&self) -> AppResult<DeviceDescriptor> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Descriptor(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Descriptor(format!("{}: {}", self.path.display(), e)))
    }
}
