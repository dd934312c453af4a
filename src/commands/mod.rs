/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::ipmi::ipmi::{
    PrivilegeLevel, IPMI_CMD_GET_CAP_BIT, IPMI_CMD_GET_DEVICE_GUID, IPMI_CMD_GET_DEVICE_ID,
    IPMI_CMD_GET_SELF_TEST_RESULTS, IPMI_CMD_GET_SYS_GUID, IPMI_CMD_SET_ACPI, IPMI_CMD_WILDCARD,
    IPMI_NETFN_APP,
};
use crate::ipmi::registry::CommandRegistry;
use crate::providers::{DescriptorSource, GuidSource, StateProvider, VersionProvider};

// 子模块声明
pub mod guid;
pub mod mc;
pub mod selftest;
pub mod stubs;

/// The collaborators the application commands consume. Each lookup is a
/// synchronous call into another process; building this set is the
/// responsibility of whoever owns the transport.
pub struct AppProviders {
    pub version: Box<dyn VersionProvider>,
    pub state: Box<dyn StateProvider>,
    pub descriptor: Box<dyn DescriptorSource>,
    /// Legacy chassis identity object
    pub device_guid: Box<dyn GuidSource>,
    /// BMC inventory identity object
    pub system_guid: Box<dyn GuidSource>,
}

/// Register every application-netfn command this crate implements.
pub fn register_netfn_app_functions(registry: &mut CommandRegistry, providers: AppProviders) {
    let AppProviders {
        version,
        state,
        descriptor,
        device_guid,
        system_guid,
    } = providers;

    // <Get BT Interface Capabilities>
    registry.register(
        IPMI_NETFN_APP,
        IPMI_CMD_GET_CAP_BIT,
        PrivilegeLevel::User,
        Box::new(stubs::BtCapabilitiesCommand),
    );

    // <Wildcard Command>
    registry.register(
        IPMI_NETFN_APP,
        IPMI_CMD_WILDCARD,
        PrivilegeLevel::User,
        Box::new(stubs::WildcardCommand),
    );

    // <Get Device ID>
    registry.register(
        IPMI_NETFN_APP,
        IPMI_CMD_GET_DEVICE_ID,
        PrivilegeLevel::User,
        Box::new(mc::DeviceIdCommand::new(version, state, descriptor)),
    );

    // <Get Self Test Results>
    registry.register(
        IPMI_NETFN_APP,
        IPMI_CMD_GET_SELF_TEST_RESULTS,
        PrivilegeLevel::User,
        Box::new(selftest::SelfTestCommand),
    );

    // <Get Device GUID>
    registry.register(
        IPMI_NETFN_APP,
        IPMI_CMD_GET_DEVICE_GUID,
        PrivilegeLevel::User,
        Box::new(guid::GuidCommand::device(device_guid)),
    );

    // <Set ACPI Power State>
    registry.register(
        IPMI_NETFN_APP,
        IPMI_CMD_SET_ACPI,
        PrivilegeLevel::Administrator,
        Box::new(stubs::SetAcpiPowerStateCommand),
    );

    // <Get System GUID Command>
    registry.register(
        IPMI_NETFN_APP,
        IPMI_CMD_GET_SYS_GUID,
        PrivilegeLevel::User,
        Box::new(guid::GuidCommand::system(system_guid)),
    );
}
