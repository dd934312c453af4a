/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{AppError, AppResult};

pub mod descriptor;
pub mod software;

pub use descriptor::{DeviceDescriptor, FileDescriptorSource};
pub use software::{
    select_active_bmc_version, Activation, InventoryVersionProvider, SoftwareInventory,
    SoftwareObject, VersionPurpose,
};

/// Version string of the running firmware, as selected among the software
/// objects the platform exposes. The lookup is a synchronous round-trip to
/// another process; no timeout or retry happens here.
pub trait VersionProvider: Send {
    fn active_version(&self) -> AppResult<String>;
}

/// Whether the BMC is currently in its Ready state.
pub trait StateProvider: Send {
    fn is_ready(&self) -> AppResult<bool>;
}

/// Static identity fields for the Get Device ID response.
pub trait DescriptorSource: Send {
    fn read(&self) -> AppResult<DeviceDescriptor>;
}

/// Textual RFC4122 UUID of a platform identity object.
pub trait GuidSource: Send {
    fn uuid_text(&self) -> AppResult<String>;
}

/// Fixed version string, or none at all. Used by the inspection binary and
/// tests in place of the platform software inventory.
pub struct StaticVersion(pub Option<String>);

impl VersionProvider for StaticVersion {
    fn active_version(&self) -> AppResult<String> {
        self.0
            .clone()
            .ok_or_else(|| AppError::ProviderUnavailable("no version string configured".into()))
    }
}

/// Fixed readiness answer.
pub struct StaticState(pub bool);

impl StateProvider for StaticState {
    fn is_ready(&self) -> AppResult<bool> {
        Ok(self.0)
    }
}

/// Fixed UUID text, or none at all.
pub struct StaticGuid(pub Option<String>);

impl GuidSource for StaticGuid {
    fn uuid_text(&self) -> AppResult<String> {
        self.0
            .clone()
            .ok_or_else(|| AppError::ProviderUnavailable("no UUID source configured".into()))
    }
}
