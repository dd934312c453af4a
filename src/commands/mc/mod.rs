/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::AppResult;
use crate::helper::htoipmi24;
use crate::ipmi::registry::{IpmiCommandHandler, IpmiRequest, IpmiResponse};
use crate::providers::{DescriptorSource, StateProvider, VersionProvider};
use bitflags::bitflags;
use ipmi_macros::AsBytes;

pub mod version;

pub use version::{parse_version, Revision};

// Bit masks from the IPMI spec
pub const IPM_DEV_DEVICE_ID_REV_MASK: u8 = 0x0F; // BCD-encoded
pub const IPM_DEV_DEVICE_ID_SDR_MASK: u8 = 0x80; // 1 = provides SDRs
pub const IPM_DEV_FWREV1_AVAIL_MASK: u8 = 0x80; // 0 = normal operation
pub const IPM_DEV_FWREV1_MAJOR_MASK: u8 = 0x7F; // Major firmware revision

bitflags! {
    /// Additional Device Support byte of the Device ID response
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AdditionalDeviceSupport: u8 {
        const SENSOR_DEVICE = 1 << 0;
        const SDR_REPOSITORY_DEVICE = 1 << 1;
        const SEL_DEVICE = 1 << 2;
        const FRU_INVENTORY_DEVICE = 1 << 3;
        const IPMB_EVENT_RECEIVER = 1 << 4;
        const IPMB_EVENT_GENERATOR = 1 << 5;
        const BRIDGE = 1 << 6;
        const CHASSIS_DEVICE = 1 << 7;
    }
}

impl AdditionalDeviceSupport {
    /// Names of the set bits, in bit order.
    pub fn descriptions(&self) -> Vec<&'static str> {
        (0..8)
            .filter(|i| self.bits() & (1 << i) != 0)
            .map(|i| match i {
                0 => "Sensor Device",
                1 => "SDR Repository Device",
                2 => "SEL Device",
                3 => "FRU Inventory Device",
                4 => "IPMB Event Receiver",
                5 => "IPMB Event Generator",
                6 => "Bridge",
                _ => "Chassis Device",
            })
            .collect()
    }
}

/// IPMI Device ID Response Structure
/// This is the full payload of the Get Device ID command, packed in wire
/// order: all fields are bytes or byte arrays, so #[repr(C)] carries no
/// padding.
#[repr(C)]
#[derive(Debug, Default, Clone, PartialEq, Eq, AsBytes)]
pub struct DevIdRecord {
    pub device_id: u8,
    pub device_revision: u8,
    pub fw_rev1: u8,
    pub fw_rev2: u8,
    pub ipmi_version: u8,
    pub adtl_device_support: u8,
    pub manufacturer_id: [u8; 3],
    pub product_id: [u8; 2],
    pub aux_fw_rev: [u8; 4],
}

impl DevIdRecord {
    pub fn format_device_info(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Device ID                 : {}\n", self.device_id));
        output.push_str(&format!(
            "Device Revision           : {}\n",
            self.device_revision & IPM_DEV_DEVICE_ID_REV_MASK
        ));
        // Firmware revision prints as major.minor with minor as packed BCD
        output.push_str(&format!(
            "Firmware Revision         : {}.{:02x}\n",
            self.fw_rev1 & IPM_DEV_FWREV1_MAJOR_MASK,
            self.fw_rev2
        ));
        output.push_str(&format!(
            "IPMI Version              : {}.{}\n",
            self.ipmi_version & 0x0f,
            (self.ipmi_version & 0xf0) >> 4
        ));
        output.push_str(&format!(
            "Manufacturer ID           : {}\n",
            crate::helper::ipmi24toh(&self.manufacturer_id)
        ));
        output.push_str(&format!(
            "Product ID                : {} (0x{:02x}{:02x})\n",
            u16::from_le_bytes(self.product_id),
            self.product_id[1],
            self.product_id[0]
        ));
        output.push_str(&format!(
            "Device Available          : {}\n",
            if self.fw_rev1 & IPM_DEV_FWREV1_AVAIL_MASK != 0 {
                "no"
            } else {
                "yes"
            }
        ));
        output.push_str(&format!(
            "Provides Device SDRs      : {}\n",
            if self.device_revision & IPM_DEV_DEVICE_ID_SDR_MASK != 0 {
                "yes"
            } else {
                "no"
            }
        ));
        output.push_str("Additional Device Support :\n");
        let support = AdditionalDeviceSupport::from_bits_retain(self.adtl_device_support);
        for desc in support.descriptions() {
            output.push_str(&format!("    {}\n", desc));
        }
        output.push_str("Aux Firmware Rev Info     : \n");
        for &aux_rev in &self.aux_fw_rev {
            output.push_str(&format!("    0x{:02x}\n", aux_rev));
        }

        output
    }
}

/// Assembles the Get Device ID response and owns its cache.
///
/// Identity fields are expensive (a version lookup plus a descriptor file
/// read), so they are computed once and kept for the process lifetime. The
/// availability bit in fw_rev1 reflects the BMC state *now* and is
/// recomputed on every request. A failed descriptor read leaves the cache
/// uninitialized so the next request retries the whole derivation.
#[derive(Debug, Default)]
pub struct DeviceIdBuilder {
    initialized: bool,
    record: DevIdRecord,
}

impl DeviceIdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_or_refresh(
        &mut self,
        version: &dyn VersionProvider,
        state: &dyn StateProvider,
        descriptor: &dyn DescriptorSource,
    ) -> AppResult<DevIdRecord> {
        if !self.initialized {
            // Version lookup and parse are best-effort: on failure the
            // revision fields keep their zero defaults
            let parsed = version
                .active_version()
                .and_then(|ver| parse_version(&ver).map_err(Into::into));
            match parsed {
                Ok(rev) => {
                    // bit7 identifies if the device is available
                    // 0=normal operation
                    // 1=device firmware, SDR update,
                    // or self-initialization in progress.
                    // The availability may change in run time, so mask here
                    // and initialize later.
                    self.record.fw_rev1 = rev.major & IPM_DEV_FWREV1_MAJOR_MASK;

                    let minor = rev.minor.min(99);
                    self.record.fw_rev2 = (minor % 10 + (minor / 10) * 16) as u8;
                    self.record.aux_fw_rev = rev.aux;
                }
                Err(e) => log::error!("Failed to derive firmware revision: {}", e),
            }

            // IPMI Spec version 2.0
            self.record.ipmi_version = 2;

            // Request-fatal: without the descriptor there is no identity to
            // report. The cache stays uninitialized so the next request
            // retries.
            let desc = descriptor.read().map_err(|e| {
                log::error!("Failed to read device descriptor: {}", e);
                e
            })?;

            self.record.device_id = desc.id;
            self.record.device_revision = desc.revision;
            self.record.adtl_device_support = desc.addn_dev_support;
            self.record.manufacturer_id = htoipmi24(desc.manuf_id);
            self.record.product_id = desc.prod_id.to_le_bytes();

            // AUX F/W Revision Info is MSB first. Only a non-zero value
            // overrides the revision derived from the version string.
            if desc.aux != 0 {
                self.record.aux_fw_rev = desc.aux.to_be_bytes();
            }

            // Don't re-read the providers once everything succeeded
            self.initialized = true;
        }

        // Set availability to the actual current BMC state
        self.record.fw_rev1 &= IPM_DEV_FWREV1_MAJOR_MASK;
        let ready = state.is_ready().unwrap_or_else(|e| {
            log::error!("Failed to read BMC state: {}", e);
            false
        });
        if !ready {
            self.record.fw_rev1 |= IPM_DEV_FWREV1_AVAIL_MASK;
        }

        Ok(self.record.clone())
    }
}

/// Get Device ID command handler
pub struct DeviceIdCommand {
    builder: DeviceIdBuilder,
    version: Box<dyn VersionProvider>,
    state: Box<dyn StateProvider>,
    descriptor: Box<dyn DescriptorSource>,
}

impl DeviceIdCommand {
    pub fn new(
        version: Box<dyn VersionProvider>,
        state: Box<dyn StateProvider>,
        descriptor: Box<dyn DescriptorSource>,
    ) -> Self {
        Self {
            builder: DeviceIdBuilder::new(),
            version,
            state,
            descriptor,
        }
    }
}

impl IpmiCommandHandler for DeviceIdCommand {
    fn execute(&mut self, _req: &IpmiRequest) -> IpmiResponse {
        match self.builder.build_or_refresh(
            self.version.as_ref(),
            self.state.as_ref(),
            self.descriptor.as_ref(),
        ) {
            Ok(record) => IpmiResponse::ok(record.as_bytes().to_vec()),
            Err(e) => IpmiResponse::error(e.completion_code()),
        }
    }

    fn description(&self) -> &'static str {
        "Get Device ID"
    }
}
