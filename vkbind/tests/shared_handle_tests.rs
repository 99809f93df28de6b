// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for reference-counted handle ownership.

mod common;

use common::{ALLOCATOR_MARKER, Call, DEVICE, INSTANCE, device_table, take_calls};
use vkbind::{
    NoParent, OwnerDestroy, OwnerFree, OwnerRelease, PoolFree, ResourceCategory, Shared, Unique,
};
use vkbind_sys::{
    Buffer, CommandBuffer, CommandPool, Device, DeviceMemory, Instance,
    PerformanceConfigurationINTEL, SurfaceKHR,
};

fn call(name: &'static str, args: &[u64]) -> Call {
    Call {
        name,
        args: args.to_vec(),
    }
}

fn shared_device() -> Shared<Device> {
    Shared::new(
        Device::from_raw(DEVICE),
        OwnerDestroy {
            owner: NoParent,
            allocator: None,
        },
        device_table(),
    )
}

#[test]
fn last_clone_releases_the_handle() {
    let dispatch = device_table();
    let memory = Shared::new(
        DeviceMemory::from_raw(11),
        OwnerFree {
            owner: Device::from_raw(DEVICE),
            allocator: Some(common::allocator()),
        },
        dispatch,
    );
    let copies = vec![memory.clone(), memory.clone()];
    assert_eq!(memory.strong_count(), 3);

    drop(memory);
    drop(copies);

    assert_eq!(
        take_calls(),
        vec![call("vkFreeMemory", &[DEVICE, 11, ALLOCATOR_MARKER])]
    );
}

#[test]
fn dropping_one_clone_keeps_the_handle_alive() {
    let dispatch = device_table();
    let configuration = Shared::new(
        PerformanceConfigurationINTEL::from_raw(5),
        OwnerRelease {
            owner: Device::from_raw(DEVICE),
        },
        dispatch,
    );
    let other = configuration.clone();

    drop(configuration);
    assert!(take_calls().is_empty());
    assert_eq!(*other, PerformanceConfigurationINTEL::from_raw(5));
    assert_eq!(other.strong_count(), 1);

    drop(other);
    assert_eq!(
        take_calls(),
        vec![call("vkReleasePerformanceConfigurationINTEL", &[DEVICE, 5])]
    );
}

#[test]
fn children_keep_their_parent_alive() {
    let device = shared_device();
    let buffer = Shared::with_parent(
        Buffer::from_raw(7),
        OwnerDestroy {
            owner: *device,
            allocator: None,
        },
        &device,
    );
    assert_eq!(device.strong_count(), 2);

    drop(device);
    assert!(take_calls().is_empty());

    drop(buffer);
    assert_eq!(
        take_calls(),
        vec![
            call("vkDestroyBuffer", &[DEVICE, 7, 0]),
            call("vkDestroyDevice", &[DEVICE, 0]),
        ]
    );
}

#[test]
fn pool_children_are_freed_before_their_owner() {
    let device = shared_device();
    let command_buffer = Shared::with_parent(
        CommandBuffer::from_raw(0x30),
        PoolFree {
            owner: *device,
            pool: CommandPool::from_raw(9),
        },
        &device,
    );
    let command_buffers = vec![command_buffer.clone(), command_buffer];
    drop(device);

    drop(command_buffers);

    assert_eq!(
        take_calls(),
        vec![
            call("vkFreeCommandBuffers", &[DEVICE, 9, 0x30]),
            call("vkDestroyDevice", &[DEVICE, 0]),
        ]
    );
}

#[test]
fn instance_children_release_before_the_instance() {
    let instance = Shared::new(
        Instance::from_raw(INSTANCE),
        OwnerDestroy {
            owner: NoParent,
            allocator: None,
        },
        device_table(),
    );
    let surface = Shared::with_parent(
        SurfaceKHR::from_raw(3),
        OwnerDestroy {
            owner: *instance,
            allocator: None,
        },
        &instance,
    );

    drop(instance);
    drop(surface);

    assert_eq!(
        take_calls(),
        vec![
            call("vkDestroySurfaceKHR", &[INSTANCE, 3, 0]),
            call("vkDestroyInstance", &[INSTANCE, 0]),
        ]
    );
}

#[test]
#[should_panic(expected = "not through its parent")]
fn child_strategy_must_name_the_parent() {
    let device = shared_device();
    let _buffer = Shared::with_parent(
        Buffer::from_raw(7),
        OwnerDestroy {
            owner: Device::from_raw(0x9999),
            allocator: None,
        },
        &device,
    );
}

#[test]
fn null_handles_are_never_released() {
    let dispatch = device_table();
    let buffer = Shared::new(
        Buffer::null(),
        OwnerDestroy {
            owner: Device::from_raw(DEVICE),
            allocator: None,
        },
        dispatch,
    );
    assert!(buffer.is_null());

    drop(buffer);
    assert!(take_calls().is_empty());
}

#[test]
fn converting_from_unique_moves_ownership() {
    let dispatch = device_table();
    let unique = Unique::new(
        Buffer::from_raw(7),
        OwnerDestroy {
            owner: Device::from_raw(DEVICE),
            allocator: Some(common::allocator()),
        },
        dispatch.clone(),
    );

    let shared = Shared::from(unique);
    let clone = shared.clone();
    assert!(take_calls().is_empty());
    assert_eq!(shared.get(), Buffer::from_raw(7));
    assert_eq!(shared.strategy().category(), ResourceCategory::Destroy);
    assert!(std::sync::Arc::ptr_eq(shared.dispatch(), &dispatch));

    drop(shared);
    drop(clone);
    assert_eq!(
        take_calls(),
        vec![call("vkDestroyBuffer", &[DEVICE, 7, ALLOCATOR_MARKER])]
    );
}

#[test]
fn debug_output_includes_the_parent() {
    let device = shared_device();
    let buffer = Shared::with_parent(
        Buffer::from_raw(7),
        OwnerDestroy {
            owner: *device,
            allocator: None,
        },
        &device,
    );

    let text = format!("{buffer:?}");

    assert!(text.starts_with("Shared"));
    assert!(text.contains("parent: Some(Shared"));
    drop(buffer);
    drop(device);
    take_calls();
}
