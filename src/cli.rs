/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use utipmid::providers::descriptor::DEV_ID_FILE;

// 主命令结构
#[derive(Parser, Debug)]
#[command(
    name = "utipmid",
    version = "0.2.0",
    about = "BMC-side IPMI application command core",
    max_term_width = 100
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: MainCommand,
}

// 全局参数
#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(short = 'v', action = ArgAction::Count, help = "Verbose (can use multiple times)")]
    pub verbose: u8,

    /// Device descriptor file with the static identity fields
    #[arg(long, default_value = DEV_ID_FILE)]
    pub dev_id_file: PathBuf,
}

// 主命令枚举
#[derive(Subcommand, Debug)]
pub enum MainCommand {
    /// Build and print the Get Device ID response
    DeviceId {
        /// Firmware version string; without one the revision fields stay 0
        #[arg(long)]
        version_string: Option<String>,

        /// Report the BMC as not ready (sets bit 7 of the firmware byte)
        #[arg(long)]
        not_ready: bool,
    },

    /// Encode the Get Device GUID response for a UUID
    DeviceGuid { uuid: String },

    /// Encode the Get System GUID response for a UUID
    SystemGuid { uuid: String },

    /// Print the Get Self Test Results response
    SelfTest,

    /// Parse a firmware version string and print the derived revision
    ParseVersion { version: String },
}
