/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
mod cli;

use clap::Parser;
use cli::{Cli, MainCommand};
use utipmid::commands::mc::{parse_version, DevIdRecord};
use utipmid::commands::{register_netfn_app_functions, AppProviders};
use utipmid::error::{val2str, COMPLETION_CODE_VALS};
use utipmid::helper::buf2str;
use utipmid::ipmi::ipmi::{
    IPMI_CMD_GET_DEVICE_GUID, IPMI_CMD_GET_DEVICE_ID, IPMI_CMD_GET_SELF_TEST_RESULTS,
    IPMI_CMD_GET_SYS_GUID, IPMI_NETFN_APP,
};
use utipmid::ipmi::registry::{CommandRegistry, IpmiRequest, IpmiResponse};
use utipmid::logging;
use utipmid::providers::{FileDescriptorSource, StaticGuid, StaticState, StaticVersion};

fn main() {
    let cli = Cli::parse();
    logging::setup_logger(cli.global.verbose);

    match cli.command {
        MainCommand::ParseVersion { version } => match parse_version(&version) {
            Ok(rev) => {
                println!("Major            : 0x{:02x}", rev.major);
                println!("Minor            : {}", rev.minor);
                println!("Aux Firmware Rev : {}", buf2str(&rev.aux, 4));
                println!("Dirty            : {}", rev.aux[3] & 1 != 0);
            }
            Err(e) => {
                log::error!("Cannot parse '{}': {}", version, e);
                std::process::exit(1);
            }
        },

        MainCommand::DeviceId {
            version_string,
            not_ready,
        } => {
            let rsp = dispatch_one(
                &cli.global.dev_id_file,
                version_string,
                !not_ready,
                None,
                IPMI_CMD_GET_DEVICE_ID,
            );
            if rsp.fail() {
                std::process::exit(1);
            }
            match DevIdRecord::from_le_bytes(&rsp.data) {
                Ok(record) => print!("{}", record.format_device_info()),
                Err(e) => log::error!("Malformed Device ID record: {}", e),
            }
        }

        MainCommand::DeviceGuid { uuid } => {
            let rsp = dispatch_one(
                &cli.global.dev_id_file,
                None,
                true,
                Some(uuid),
                IPMI_CMD_GET_DEVICE_GUID,
            );
            if rsp.fail() {
                std::process::exit(1);
            }
        }

        MainCommand::SystemGuid { uuid } => {
            let rsp = dispatch_one(
                &cli.global.dev_id_file,
                None,
                true,
                Some(uuid),
                IPMI_CMD_GET_SYS_GUID,
            );
            if rsp.fail() {
                std::process::exit(1);
            }
        }

        MainCommand::SelfTest => {
            dispatch_one(
                &cli.global.dev_id_file,
                None,
                true,
                None,
                IPMI_CMD_GET_SELF_TEST_RESULTS,
            );
        }
    }
}

/// Wire static providers into a registry, dispatch a single request, print
/// the raw response.
fn dispatch_one(
    dev_id_file: &std::path::Path,
    version_string: Option<String>,
    ready: bool,
    uuid: Option<String>,
    cmd: u8,
) -> IpmiResponse {
    let mut registry = CommandRegistry::new();
    register_netfn_app_functions(
        &mut registry,
        AppProviders {
            version: Box::new(StaticVersion(version_string)),
            state: Box::new(StaticState(ready)),
            descriptor: Box::new(FileDescriptorSource::new(dev_id_file)),
            device_guid: Box::new(StaticGuid(uuid.clone())),
            system_guid: Box::new(StaticGuid(uuid)),
        },
    );

    let rsp = registry.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, cmd));
    println!(
        "Completion Code : 0x{:02x} ({})",
        rsp.ccode,
        val2str(rsp.ccode, &COMPLETION_CODE_VALS)
    );
    if !rsp.data.is_empty() {
        println!("Response Data   : {}", buf2str(&rsp.data, rsp.data.len()));
    }
    rsp
}
