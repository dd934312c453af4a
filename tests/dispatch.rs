/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use utipmid::commands::mc::{DevIdRecord, IPM_DEV_FWREV1_AVAIL_MASK};
use utipmid::commands::{register_netfn_app_functions, AppProviders};
use utipmid::error::{AppError, AppResult};
use utipmid::ipmi::ipmi::{
    IPMI_CC_INV_CMD, IPMI_CC_UNSPECIFIED_ERROR, IPMI_CMD_GET_CAP_BIT, IPMI_CMD_GET_DEVICE_GUID,
    IPMI_CMD_GET_DEVICE_ID, IPMI_CMD_GET_SELF_TEST_RESULTS, IPMI_CMD_GET_SYS_GUID,
    IPMI_NETFN_APP,
};
use utipmid::ipmi::registry::{CommandRegistry, IpmiRequest};
use utipmid::providers::{
    DescriptorSource, DeviceDescriptor, StateProvider, StaticGuid, StaticVersion,
};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

struct SharedState(Arc<AtomicBool>);

impl StateProvider for SharedState {
    fn is_ready(&self) -> AppResult<bool> {
        Ok(self.0.load(Ordering::Relaxed))
    }
}

struct FlakyDescriptor {
    failures_left: AtomicU32,
    reads: Arc<AtomicU32>,
}

impl DescriptorSource for FlakyDescriptor {
    fn read(&self) -> AppResult<DeviceDescriptor> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let left = self.failures_left.load(Ordering::Relaxed);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::Relaxed);
            return Err(AppError::Descriptor("file not found".into()));
        }
        Ok(DeviceDescriptor {
            id: 32,
            revision: 1,
            addn_dev_support: 0x8d,
            manuf_id: 0xC265,
            prod_id: 0x3000,
            aux: 0,
        })
    }
}

fn build_registry(
    ready: Arc<AtomicBool>,
    descriptor_failures: u32,
    descriptor_reads: Arc<AtomicU32>,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_netfn_app_functions(
        &mut registry,
        AppProviders {
            version: Box::new(StaticVersion(Some(
                "v2.2r180608p10-g65edf7d-dirty".into(),
            ))),
            state: Box::new(SharedState(ready)),
            descriptor: Box::new(FlakyDescriptor {
                failures_left: AtomicU32::new(descriptor_failures),
                reads: descriptor_reads,
            }),
            device_guid: Box::new(StaticGuid(Some(
                "61a39523-78f2-11e5-9862-e6402cfc3223".into(),
            ))),
            system_guid: Box::new(StaticGuid(None)),
        },
    );
    registry
}

#[test]
fn test_device_id_end_to_end() {
    let ready = Arc::new(AtomicBool::new(true));
    let mut registry = build_registry(ready.clone(), 0, Arc::new(AtomicU32::new(0)));

    let rsp = registry.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, IPMI_CMD_GET_DEVICE_ID));
    assert_eq!(rsp.ccode, 0);
    assert_eq!(rsp.data.len(), 15);

    let record = DevIdRecord::from_le_bytes(&rsp.data).unwrap();
    assert_eq!(record.device_id, 32);
    assert_eq!(record.fw_rev1, 0x02);
    assert_eq!(record.fw_rev2, 0x02);
    assert_eq!(record.ipmi_version, 2);
    assert_eq!(record.manufacturer_id, [0x65, 0xc2, 0x00]);
    assert_eq!(record.product_id, [0x00, 0x30]);
    assert_eq!(record.aux_fw_rev, [0x18, 0x06, 0x08, 0x15]);
}

#[test]
fn test_device_id_availability_follows_state() {
    let ready = Arc::new(AtomicBool::new(true));
    let mut registry = build_registry(ready.clone(), 0, Arc::new(AtomicU32::new(0)));

    let req = IpmiRequest::new(IPMI_NETFN_APP, IPMI_CMD_GET_DEVICE_ID);
    let first = registry.dispatch(&req);

    ready.store(false, Ordering::Relaxed);
    let second = registry.dispatch(&req);

    ready.store(true, Ordering::Relaxed);
    let third = registry.dispatch(&req);

    assert_eq!(first.data, third.data);
    assert_eq!(second.data[2] & IPM_DEV_FWREV1_AVAIL_MASK, 0x80);
    // Only bit 7 of the firmware revision byte moves
    let mut unmasked = second.data.clone();
    unmasked[2] &= !IPM_DEV_FWREV1_AVAIL_MASK;
    assert_eq!(unmasked, first.data);
}

#[test]
fn test_device_id_descriptor_retry_then_cache() {
    let ready = Arc::new(AtomicBool::new(true));
    let reads = Arc::new(AtomicU32::new(0));
    let mut registry = build_registry(ready, 2, reads.clone());

    let req = IpmiRequest::new(IPMI_NETFN_APP, IPMI_CMD_GET_DEVICE_ID);

    // Two failing reads, each surfaced as an unspecified error
    for _ in 0..2 {
        let rsp = registry.dispatch(&req);
        assert_eq!(rsp.ccode, IPMI_CC_UNSPECIFIED_ERROR);
        assert!(rsp.data.is_empty());
    }

    // Third request initializes, further ones come from the cache
    assert_eq!(registry.dispatch(&req).ccode, 0);
    assert_eq!(registry.dispatch(&req).ccode, 0);
    assert_eq!(reads.load(Ordering::Relaxed), 3);
}

#[test]
fn test_device_guid_and_missing_system_guid() {
    let ready = Arc::new(AtomicBool::new(true));
    let mut registry = build_registry(ready, 0, Arc::new(AtomicU32::new(0)));

    let rsp = registry.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, IPMI_CMD_GET_DEVICE_GUID));
    assert_eq!(rsp.ccode, 0);
    assert_eq!(rsp.data.len(), 16);
    // Reversed byte order: last text pair first
    assert_eq!(rsp.data[0], 0x23);
    assert_eq!(rsp.data[15], 0x61);

    // The system GUID source is not configured in this fixture
    let rsp = registry.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, IPMI_CMD_GET_SYS_GUID));
    assert_eq!(rsp.ccode, IPMI_CC_UNSPECIFIED_ERROR);
    assert!(rsp.data.is_empty());
}

#[test]
fn test_stub_commands_and_wildcard_fallback() {
    let ready = Arc::new(AtomicBool::new(true));
    let mut registry = build_registry(ready, 0, Arc::new(AtomicU32::new(0)));

    let rsp = registry.dispatch(&IpmiRequest::new(
        IPMI_NETFN_APP,
        IPMI_CMD_GET_SELF_TEST_RESULTS,
    ));
    assert_eq!(rsp.ccode, 0);
    assert_eq!(rsp.data, vec![0x56, 0x00]);

    let rsp = registry.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, IPMI_CMD_GET_CAP_BIT));
    assert_eq!(rsp.data, vec![0x01, 63, 63, 0x0A, 0x01]);

    // Unregistered command on the application netfn lands on the wildcard
    let rsp = registry.dispatch(&IpmiRequest::new(IPMI_NETFN_APP, 0x42));
    assert_eq!(rsp.ccode, IPMI_CC_INV_CMD);
    assert_eq!(rsp.data, b"THIS IS WILDCARD".to_vec());
}
