/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::ipmi::ipmi::{PrivilegeLevel, IPMI_CC_INV_CMD, IPMI_CC_OK, IPMI_CMD_WILDCARD};
use std::collections::HashMap;

/// One inbound IPMI message, already unwrapped from its transport framing.
#[derive(Debug, Clone, Default)]
pub struct IpmiRequest {
    pub netfn: u8,
    pub cmd: u8,
    pub data: Vec<u8>,
}

impl IpmiRequest {
    pub fn new(netfn: u8, cmd: u8) -> Self {
        Self {
            netfn,
            cmd,
            data: Vec::new(),
        }
    }
}

/// Completion code plus response payload. The transport layer prepends the
/// completion code byte when it frames the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpmiResponse {
    pub ccode: u8,
    pub data: Vec<u8>,
}

impl IpmiResponse {
    pub fn ok(data: Vec<u8>) -> Self {
        Self {
            ccode: IPMI_CC_OK,
            data,
        }
    }

    pub fn error(ccode: u8) -> Self {
        Self {
            ccode,
            data: Vec::new(),
        }
    }

    #[inline]
    pub fn fail(&self) -> bool {
        self.ccode != 0
    }
}

// 统一的命令处理接口
pub trait IpmiCommandHandler: Send {
    /// 执行IPMI命令
    fn execute(&mut self, req: &IpmiRequest) -> IpmiResponse;

    /// 获取命令描述（用于日志和错误报告）
    fn description(&self) -> &'static str;
}

struct RegisteredCommand {
    privilege: PrivilegeLevel,
    handler: Box<dyn IpmiCommandHandler>,
}

/// Table of (netfn, cmd) -> handler registrations.
///
/// Dispatch takes `&mut self`, so handler state (such as the device identity
/// cache) is exclusively borrowed for the duration of a request. Requests are
/// therefore serialized per registry; callers that want to dispatch from
/// several threads must wrap the registry in a `Mutex`.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<(u8, u8), RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for (netfn, cmd). A later registration for the
    /// same pair replaces the earlier one.
    pub fn register(
        &mut self,
        netfn: u8,
        cmd: u8,
        privilege: PrivilegeLevel,
        handler: Box<dyn IpmiCommandHandler>,
    ) {
        log::debug!(
            "Registering netfn 0x{:02x} cmd 0x{:02x} ({})",
            netfn,
            cmd,
            handler.description()
        );
        self.handlers
            .insert((netfn, cmd), RegisteredCommand { privilege, handler });
    }

    pub fn privilege_of(&self, netfn: u8, cmd: u8) -> Option<PrivilegeLevel> {
        self.handlers.get(&(netfn, cmd)).map(|entry| entry.privilege)
    }

    /// Route a request to its handler. Unknown commands fall back to the
    /// wildcard entry registered for the same netfn, if any.
    pub fn dispatch(&mut self, req: &IpmiRequest) -> IpmiResponse {
        let key = if self.handlers.contains_key(&(req.netfn, req.cmd)) {
            (req.netfn, req.cmd)
        } else {
            (req.netfn, IPMI_CMD_WILDCARD)
        };

        match self.handlers.get_mut(&key) {
            Some(entry) => {
                log::debug!("Executing {}", entry.handler.description());
                entry.handler.execute(req)
            }
            None => {
                log::warn!(
                    "No handler for netfn 0x{:02x} cmd 0x{:02x}",
                    req.netfn,
                    req.cmd
                );
                IpmiResponse::error(IPMI_CC_INV_CMD)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipmi::ipmi::IPMI_NETFN_APP;

    struct Fixed(u8, &'static [u8]);

    impl IpmiCommandHandler for Fixed {
        fn execute(&mut self, _req: &IpmiRequest) -> IpmiResponse {
            IpmiResponse {
                ccode: self.0,
                data: self.1.to_vec(),
            }
        }
        fn description(&self) -> &'static str {
            "Fixed bytes"
        }
    }

    #[test]
    fn test_dispatch_exact_match() {
        let mut reg = CommandRegistry::new();
        reg.register(
            IPMI_NETFN_APP,
            0x01,
            PrivilegeLevel::User,
            Box::new(Fixed(0, b"abc")),
        );
        let rsp = reg.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, 0x01));
        assert_eq!(rsp.ccode, IPMI_CC_OK);
        assert_eq!(rsp.data, b"abc");
    }

    #[test]
    fn test_dispatch_wildcard_fallback() {
        let mut reg = CommandRegistry::new();
        reg.register(
            IPMI_NETFN_APP,
            IPMI_CMD_WILDCARD,
            PrivilegeLevel::User,
            Box::new(Fixed(IPMI_CC_INV_CMD, b"wild")),
        );
        let rsp = reg.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, 0x42));
        assert_eq!(rsp.ccode, IPMI_CC_INV_CMD);
        assert_eq!(rsp.data, b"wild");
    }

    #[test]
    fn test_dispatch_unknown_netfn() {
        let mut reg = CommandRegistry::new();
        let rsp = reg.dispatch(&IpmiRequest::new(0x0a, 0x01));
        assert!(rsp.fail());
        assert!(rsp.data.is_empty());
    }

    #[test]
    fn test_privilege_metadata() {
        let mut reg = CommandRegistry::new();
        reg.register(
            IPMI_NETFN_APP,
            0x06,
            PrivilegeLevel::Administrator,
            Box::new(Fixed(0, b"")),
        );
        assert_eq!(
            reg.privilege_of(IPMI_NETFN_APP, 0x06),
            Some(PrivilegeLevel::Administrator)
        );
        assert_eq!(reg.privilege_of(IPMI_NETFN_APP, 0x01), None);
    }
}
