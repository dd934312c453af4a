/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{AppError, AppResult};
use crate::providers::VersionProvider;

/// What a software object is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPurpose {
    Bmc,
    Host,
    Other,
}

/// Activation state of a software object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Active,
    Activating,
    Ready,
    Invalid,
    Failed,
}

/// One entry of the platform software inventory.
#[derive(Debug, Clone)]
pub struct SoftwareObject {
    pub purpose: VersionPurpose,
    pub activation: Activation,
    /// Redundancy priority; a smaller number is a higher priority.
    pub priority: u8,
    pub version: String,
}

/// Lists the software objects implementing the redundancy-priority
/// interface. The walk itself (object discovery, property reads) lives on
/// the far side of this seam.
pub trait SoftwareInventory: Send {
    fn software_objects(&self) -> AppResult<Vec<SoftwareObject>>;
}

/// Pick the version of the Active, BMC-purpose object with the numerically
/// lowest priority. The comparison is strict, so among equal priorities the
/// first-seen object wins.
pub fn select_active_bmc_version(objects: &[SoftwareObject]) -> Option<&str> {
    let mut min_priority = 0xFFu8;
    let mut selected = None;
    for obj in objects {
        if obj.purpose != VersionPurpose::Bmc || obj.activation != Activation::Active {
            continue;
        }
        if obj.priority < min_priority {
            min_priority = obj.priority;
            selected = Some(obj.version.as_str());
        }
    }
    selected
}

/// `VersionProvider` over a software inventory.
pub struct InventoryVersionProvider<I> {
    inventory: I,
}

impl<I: SoftwareInventory> InventoryVersionProvider<I> {
    pub fn new(inventory: I) -> Self {
        Self { inventory }
    }
}

impl<I: SoftwareInventory> VersionProvider for InventoryVersionProvider<I> {
    fn active_version(&self) -> AppResult<String> {
        let objects = self.inventory.software_objects()?;
        select_active_bmc_version(&objects)
            .map(str::to_owned)
            .ok_or_else(|| {
                AppError::ProviderUnavailable("no Active BMC software object found".into())
            })
    }
}
