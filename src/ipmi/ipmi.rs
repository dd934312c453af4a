/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

// Per IPMI 2.0 spec, request and response buffers advertised through the BT
// capabilities command are the max buffer size minus the length byte.
pub const MAX_IPMI_BUFFER: usize = 64;

// Network Function Codes
pub const IPMI_NETFN_CHASSIS: u8 = 0x0;
pub const IPMI_NETFN_BRIDGE: u8 = 0x2;
pub const IPMI_NETFN_SE: u8 = 0x4;
pub const IPMI_NETFN_APP: u8 = 0x6;
pub const IPMI_NETFN_FIRMWARE: u8 = 0x8;
pub const IPMI_NETFN_STORAGE: u8 = 0xa;
pub const IPMI_NETFN_TRANSPORT: u8 = 0xc;

// Application netfn command codes handled here
pub const IPMI_CMD_GET_DEVICE_ID: u8 = 0x01;
pub const IPMI_CMD_GET_SELF_TEST_RESULTS: u8 = 0x04;
pub const IPMI_CMD_SET_ACPI: u8 = 0x06;
pub const IPMI_CMD_GET_DEVICE_GUID: u8 = 0x08;
pub const IPMI_CMD_GET_CAP_BIT: u8 = 0x36;
pub const IPMI_CMD_GET_SYS_GUID: u8 = 0x37;
pub const IPMI_CMD_WILDCARD: u8 = 0xFF;

/*
 * CC
 * See IPMI specification table 5-2 Generic Completion Codes
 */
pub const IPMI_CC_OK: u8 = 0x00;
pub const IPMI_CC_NODE_BUSY: u8 = 0xc0;
pub const IPMI_CC_INV_CMD: u8 = 0xc1;
pub const IPMI_CC_INV_CMD_FOR_LUN: u8 = 0xc2;
pub const IPMI_CC_TIMEOUT: u8 = 0xc3;
pub const IPMI_CC_OUT_OF_SPACE: u8 = 0xc4;
pub const IPMI_CC_RES_CANCELED: u8 = 0xc5;
pub const IPMI_CC_REQ_DATA_TRUNC: u8 = 0xc6;
pub const IPMI_CC_REQ_DATA_INV_LENGTH: u8 = 0xc7;
pub const IPMI_CC_REQ_DATA_FIELD_EXCEED: u8 = 0xc8;
pub const IPMI_CC_PARAM_OUT_OF_RANGE: u8 = 0xc9;
pub const IPMI_CC_CANT_RET_NUM_REQ_BYTES: u8 = 0xca;
pub const IPMI_CC_REQ_DATA_NOT_PRESENT: u8 = 0xcb;
pub const IPMI_CC_INV_DATA_FIELD_IN_REQ: u8 = 0xcc;
pub const IPMI_CC_ILL_SENSOR_OR_RECORD: u8 = 0xcd;
pub const IPMI_CC_RESP_COULD_NOT_BE_PRV: u8 = 0xce;
pub const IPMI_CC_CANT_RESP_DUPLI_REQ: u8 = 0xcf;
pub const IPMI_CC_CANT_RESP_SDRR_UPDATE: u8 = 0xd0;
pub const IPMI_CC_CANT_RESP_FIRM_UPDATE: u8 = 0xd1;
pub const IPMI_CC_CANT_RESP_BMC_INIT: u8 = 0xd2;
pub const IPMI_CC_DESTINATION_UNAVAILABLE: u8 = 0xd3;
pub const IPMI_CC_INSUFFICIENT_PRIVILEGES: u8 = 0xd4;
pub const IPMI_CC_NOT_SUPPORTED_PRESENT_STATE: u8 = 0xd5;
pub const IPMI_CC_ILLEGAL_COMMAND_DISABLED: u8 = 0xd6;
pub const IPMI_CC_UNSPECIFIED_ERROR: u8 = 0xff;

/// Minimum privilege level a command is registered with. Enforcement belongs
/// to the session layer; the registry only carries the level as metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrivilegeLevel {
    Callback,
    User,
    Operator,
    Administrator,
}
