/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::ipmi::ipmi::{IPMI_CC_INV_CMD, MAX_IPMI_BUFFER};
use crate::ipmi::registry::{IpmiCommandHandler, IpmiRequest, IpmiResponse};

/// Get BT Interface Capabilities.
///
/// Per IPMI 2.0 spec, the advertised input and output buffer sizes are the
/// max buffer size minus one byte to leave room for the length byte.
pub struct BtCapabilitiesCommand;

impl IpmiCommandHandler for BtCapabilitiesCommand {
    fn execute(&mut self, _req: &IpmiRequest) -> IpmiResponse {
        IpmiResponse::ok(vec![
            0x01,
            (MAX_IPMI_BUFFER - 1) as u8,
            (MAX_IPMI_BUFFER - 1) as u8,
            0x0A,
            0x01,
        ])
    }

    fn description(&self) -> &'static str {
        "Get BT Interface Capabilities"
    }
}

/// Set ACPI Power State: accepted and ignored.
pub struct SetAcpiPowerStateCommand;

impl IpmiCommandHandler for SetAcpiPowerStateCommand {
    fn execute(&mut self, _req: &IpmiRequest) -> IpmiResponse {
        log::debug!("Set ACPI Power State ignored");
        IpmiResponse::ok(Vec::new())
    }

    fn description(&self) -> &'static str {
        "Set ACPI Power State"
    }
}

/// Fallback for unregistered application commands: an invalid-command code
/// with a fixed marker payload.
pub struct WildcardCommand;

impl IpmiCommandHandler for WildcardCommand {
    fn execute(&mut self, req: &IpmiRequest) -> IpmiResponse {
        log::debug!(
            "Wildcard handler reached for netfn 0x{:02x} cmd 0x{:02x}",
            req.netfn,
            req.cmd
        );
        IpmiResponse {
            ccode: IPMI_CC_INV_CMD,
            data: b"THIS IS WILDCARD".to_vec(),
        }
    }

    fn description(&self) -> &'static str {
        "Wildcard Command"
    }
}
