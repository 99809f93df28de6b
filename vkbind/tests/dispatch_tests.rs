// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for entry point resolution.
//!
//! The stub driver in `common` exports a fixed set of commands and records
//! which resolver every lookup went through.

mod common;

use std::ffi::c_void;

use common::{DEVICE, INSTANCE, Lookup, get_instance_proc_addr, hide, take_calls, take_lookups};
use vkbind::{DispatchTable, Error, Loader, Tier};
use vkbind_sys::{CommandPool, Device, Flags, Instance, ResultCode};

fn as_address<F: Copy>(function: Option<F>) -> Option<usize> {
    // Fn pointers and usize have the same size on every supported target.
    function.map(|function| unsafe { std::mem::transmute_copy::<F, usize>(&function) })
}

#[test]
fn bootstrap_resolves_only_global_commands() {
    common::setup_logging();
    let table = DispatchTable::new(get_instance_proc_addr);

    assert!(table.create_instance.is_some());
    assert!(table.enumerate_instance_version.is_some());
    // The stub does not export these two.
    assert!(table.enumerate_instance_extension_properties.is_none());
    assert!(table.enumerate_instance_layer_properties.is_none());
    assert!(table.destroy_instance.is_none());
    assert!(table.destroy_buffer.is_none());
    assert!(
        take_lookups()
            .iter()
            .all(|lookup| lookup.resolver == "instance" && lookup.handle == 0)
    );
}

#[test]
fn bootstrap_commands_are_callable() {
    common::setup_logging();
    let table = DispatchTable::new(get_instance_proc_addr);

    let mut version = 0;
    let result = unsafe { (table.enumerate_instance_version.unwrap())(&mut version) };

    assert_eq!(result, ResultCode::SUCCESS);
    assert_eq!(version >> 22, 1);
    assert_eq!(take_calls()[0].name, "vkEnumerateInstanceVersion");
}

#[test]
fn from_raw_bootstraps_like_new() {
    common::setup_logging();
    let address = get_instance_proc_addr as usize as *const c_void;

    let table = unsafe { DispatchTable::from_raw(address) };

    assert!(table.create_instance.is_some());
    assert_eq!(
        table.get_instance_proc_addr() as usize,
        get_instance_proc_addr as usize
    );
}

#[test]
#[should_panic(expected = "must not be null")]
fn from_raw_rejects_a_null_resolver() {
    let _ = unsafe { DispatchTable::from_raw(std::ptr::null()) };
}

#[test]
fn instance_phase_resolves_instance_and_device_commands() {
    common::setup_logging();
    let mut table = DispatchTable::new(get_instance_proc_addr);
    take_lookups();

    unsafe { table.init_instance(Instance::from_raw(INSTANCE)) };

    assert_eq!(table.instance(), Instance::from_raw(INSTANCE));
    assert!(table.destroy_instance.is_some());
    assert!(table.get_device_proc_addr.is_some());
    assert!(table.destroy_buffer.is_some());
    assert!(table.create_device.is_none());
    let lookups = take_lookups();
    assert!(lookups.contains(&Lookup {
        resolver: "instance",
        handle: INSTANCE,
        name: "vkDestroyBuffer".to_owned(),
    }));
    assert!(lookups.iter().all(|lookup| lookup.resolver == "instance"));
}

#[test]
fn device_phase_uses_the_device_resolver() {
    common::setup_logging();
    let mut table = DispatchTable::new(get_instance_proc_addr);
    unsafe { table.init_instance(Instance::from_raw(INSTANCE)) };
    take_lookups();

    unsafe { table.init_device(Device::from_raw(DEVICE)) };

    assert_eq!(table.device(), Device::from_raw(DEVICE));
    let lookups = take_lookups();
    assert!(!lookups.is_empty());
    assert!(
        lookups
            .iter()
            .all(|lookup| lookup.resolver == "device" && lookup.handle == DEVICE)
    );
    // Instance commands are not looked up again.
    assert!(!lookups.iter().any(|lookup| lookup.name == "vkDestroyInstance"));
}

#[test]
fn device_phase_falls_back_to_the_instance_resolver() {
    common::setup_logging();
    hide("vkGetDeviceProcAddr");
    let mut table = DispatchTable::new(get_instance_proc_addr);
    unsafe { table.init_instance(Instance::from_raw(INSTANCE)) };
    assert!(table.get_device_proc_addr.is_none());
    take_lookups();

    unsafe { table.init_device(Device::from_raw(DEVICE)) };

    let lookups = take_lookups();
    assert!(
        lookups
            .iter()
            .all(|lookup| lookup.resolver == "instance" && lookup.handle == INSTANCE)
    );
    assert!(table.destroy_device.is_some());
}

#[test]
fn device_phase_overrides_instance_results() {
    common::setup_logging();
    let mut table = DispatchTable::new(get_instance_proc_addr);
    unsafe { table.init_instance(Instance::from_raw(INSTANCE)) };
    assert!(table.free_memory.is_some());

    hide("vkFreeMemory");
    unsafe { table.init_device(Device::from_raw(DEVICE)) };

    assert!(table.free_memory.is_none());
}

#[test]
fn promotion_fills_the_legacy_slot_from_the_core_name() {
    let table = common::device_table();

    assert!(table.trim_command_pool.is_some());
    assert_eq!(
        as_address(table.trim_command_pool),
        as_address(table.trim_command_pool_khr)
    );

    unsafe {
        (table.trim_command_pool_khr.unwrap())(Device::from_raw(DEVICE), CommandPool::from_raw(9), 0)
    };
    assert_eq!(take_calls()[0].name, "vkTrimCommandPool");
}

#[test]
fn promotion_fills_the_core_slot_from_the_legacy_name() {
    let table = common::device_table();

    assert!(table.get_device_group_peer_memory_features.is_some());
    assert_eq!(
        as_address(table.get_device_group_peer_memory_features),
        as_address(table.get_device_group_peer_memory_features_khr)
    );

    let mut features: Flags = 0;
    unsafe {
        (table.get_device_group_peer_memory_features.unwrap())(
            Device::from_raw(DEVICE),
            0,
            0,
            1,
            &mut features,
        )
    };
    assert_eq!(features, 0b1111);
    assert_eq!(take_calls()[0].name, "vkGetDeviceGroupPeerMemoryFeaturesKHR");
}

#[test]
fn promotion_leaves_pairs_with_no_resolved_member_empty() {
    let table = common::device_table();

    assert!(table.enumerate_physical_device_groups.is_none());
    assert!(table.enumerate_physical_device_groups_khr.is_none());
    assert!(!table.is_resolved("vkEnumeratePhysicalDeviceGroups"));
}

#[test]
fn promotion_applies_after_the_instance_phase() {
    common::setup_logging();
    let mut table = DispatchTable::new(get_instance_proc_addr);

    unsafe { table.init_instance(Instance::from_raw(INSTANCE)) };

    assert_eq!(
        as_address(table.trim_command_pool),
        as_address(table.trim_command_pool_khr)
    );
    assert!(table.trim_command_pool_khr.is_some());
}

#[test]
fn summary_reports_every_slot() {
    let table = common::device_table();
    let summary = table.summary();

    assert_eq!(summary.entries, table.entry_points());
    assert_eq!(summary.resolved + summary.unavailable, summary.entries.len());
    assert_eq!(
        summary.resolved,
        summary.entries.iter().filter(|entry| entry.resolved).count()
    );
    let get_instance_proc_addr = &summary.entries[0];
    assert_eq!(get_instance_proc_addr.name, "vkGetInstanceProcAddr");
    assert_eq!(get_instance_proc_addr.tier, Tier::Bootstrap);
    assert!(get_instance_proc_addr.resolved);
    let destroy_buffer = summary
        .entries
        .iter()
        .find(|entry| entry.name == "vkDestroyBuffer")
        .unwrap();
    assert_eq!(destroy_buffer.tier, Tier::Device);
    assert!(destroy_buffer.resolved);
}

#[test]
fn is_resolved_answers_by_command_name() {
    let table = common::device_table();

    assert!(table.is_resolved("vkDestroyBuffer"));
    assert!(table.is_resolved("vkTrimCommandPoolKHR"));
    assert!(!table.is_resolved("vkCreateDevice"));
    assert!(!table.is_resolved("vkNotACommand"));
}

#[test]
fn summary_serializes_to_json() {
    let table = common::device_table();

    let json = serde_json::to_value(table.summary()).unwrap();

    assert_eq!(json["resolved"], table.summary().resolved);
    let first = &json["entries"][0];
    assert_eq!(first["name"], "vkGetInstanceProcAddr");
    assert_eq!(first["tier"], "bootstrap");
    assert_eq!(first["resolved"], true);
}

#[test]
fn debug_output_names_the_handles() {
    let table = common::device_table();

    let text = format!("{table:?}");

    assert!(text.starts_with("DispatchTable"));
    assert!(text.contains("resolved"));
    assert!(table.library().is_none());
}

#[test]
fn loading_from_a_missing_library_fails() {
    common::setup_logging();

    let result = Loader::open("libvkbind-does-not-exist.so.0");

    assert!(matches!(result, Err(Error::LibLoading(_))));
}
