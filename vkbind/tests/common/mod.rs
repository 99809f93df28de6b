// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! A stub Vulkan implementation shared by the integration tests.
//!
//! The stub entry points record every call in a per-thread log instead of
//! touching a driver. Each test runs on its own thread, so tests never see
//! each other's calls.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    ffi::{CStr, c_char},
    mem,
    sync::Arc,
};

use vkbind::DispatchTable;
use vkbind_sys::*;

/// Ensures logging is initialized only once across all tests.
static LOG_ONCE: std::sync::Once = std::sync::Once::new();

pub fn setup_logging() {
    // Initialize logging once (respects RUST_LOG environment variable)
    LOG_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_test_writer()
            .init();
    });
}

pub const INSTANCE: u64 = 0x1000;
pub const DEVICE: u64 = 0x2000;
/// Marker stored in `AllocationCallbacks::p_user_data` by the tests.
pub const ALLOCATOR_MARKER: u64 = 0xA110C;

/// One recorded call: the entry point name and its handle-like arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub name: &'static str,
    pub args: Vec<u64>,
}

/// One name lookup through a resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lookup {
    pub resolver: &'static str,
    pub handle: u64,
    pub name: String,
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
    static LOOKUPS: RefCell<Vec<Lookup>> = const { RefCell::new(Vec::new()) };
    static HIDDEN: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn record(name: &'static str, args: &[u64]) {
    CALLS.with_borrow_mut(|calls| {
        calls.push(Call {
            name,
            args: args.to_vec(),
        })
    });
}

/// Returns and clears the calls recorded on this thread.
pub fn take_calls() -> Vec<Call> {
    CALLS.with_borrow_mut(mem::take)
}

/// Returns and clears the lookups recorded on this thread.
pub fn take_lookups() -> Vec<Lookup> {
    LOOKUPS.with_borrow_mut(mem::take)
}

/// Makes both resolvers answer "not found" for `name` on this thread.
pub fn hide(name: &'static str) {
    HIDDEN.with_borrow_mut(|hidden| hidden.push(name));
}

pub fn allocator() -> AllocationCallbacks {
    AllocationCallbacks {
        p_user_data: ALLOCATOR_MARKER as usize as *mut _,
        ..Default::default()
    }
}

fn allocator_marker(allocator: *const AllocationCallbacks) -> u64 {
    if allocator.is_null() {
        0
    } else {
        unsafe { (*allocator).p_user_data as usize as u64 }
    }
}

/// A table bootstrapped from the stub and initialized for [`INSTANCE`] and
/// [`DEVICE`].
pub fn device_table() -> Arc<DispatchTable> {
    setup_logging();
    let mut table = DispatchTable::new(get_instance_proc_addr);
    unsafe {
        table.init_instance(Instance::from_raw(INSTANCE));
        table.init_device(Device::from_raw(DEVICE));
    }
    take_lookups();
    Arc::new(table)
}

pub unsafe extern "system" fn get_instance_proc_addr(
    instance: Instance,
    p_name: *const c_char,
) -> PFN_vkVoidFunction {
    let name = unsafe { CStr::from_ptr(p_name) };
    resolve("instance", instance.as_raw(), name)
}

unsafe extern "system" fn get_device_proc_addr(
    device: Device,
    p_name: *const c_char,
) -> PFN_vkVoidFunction {
    let name = unsafe { CStr::from_ptr(p_name) };
    resolve("device", device.as_raw(), name)
}

macro_rules! exported {
    ($name:expr; $($symbol:literal => $function:ident as $ty:ty,)*) => {
        match $name {
            $($symbol => Some(unsafe { mem::transmute::<$ty, unsafe extern "system" fn()>($function) }),)*
            _ => None,
        }
    };
}

fn resolve(resolver: &'static str, handle: u64, name: &CStr) -> PFN_vkVoidFunction {
    let name = name.to_str().ok()?;
    LOOKUPS.with_borrow_mut(|lookups| {
        lookups.push(Lookup {
            resolver,
            handle,
            name: name.to_owned(),
        })
    });
    if HIDDEN.with_borrow(|hidden| hidden.iter().any(|hidden| *hidden == name)) {
        return None;
    }
    // Promoted pairs are exported deliberately lopsided: only the core name
    // of vkTrimCommandPool, only the KHR name of the peer memory query, and
    // neither name of the device group enumeration.
    exported! { name;
        "vkGetInstanceProcAddr" => get_instance_proc_addr as PFN_vkGetInstanceProcAddr,
        "vkCreateInstance" => create_instance as PFN_vkCreateInstance,
        "vkEnumerateInstanceVersion" => enumerate_instance_version as PFN_vkEnumerateInstanceVersion,
        "vkDestroyInstance" => destroy_instance as PFN_vkDestroyInstance,
        "vkGetDeviceProcAddr" => get_device_proc_addr as PFN_vkGetDeviceProcAddr,
        "vkDestroySurfaceKHR" => destroy_surface_khr as PFN_vkDestroySurfaceKHR,
        "vkDestroyDevice" => destroy_device as PFN_vkDestroyDevice,
        "vkFreeMemory" => free_memory as PFN_vkFreeMemory,
        "vkDestroyBuffer" => destroy_buffer as PFN_vkDestroyBuffer,
        "vkDestroyCommandPool" => destroy_command_pool as PFN_vkDestroyCommandPool,
        "vkTrimCommandPool" => trim_command_pool as PFN_vkTrimCommandPool,
        "vkFreeCommandBuffers" => free_command_buffers as PFN_vkFreeCommandBuffers,
        "vkFreeDescriptorSets" => free_descriptor_sets as PFN_vkFreeDescriptorSets,
        "vkGetDeviceGroupPeerMemoryFeaturesKHR" =>
            get_device_group_peer_memory_features_khr as PFN_vkGetDeviceGroupPeerMemoryFeatures,
        "vkReleasePerformanceConfigurationINTEL" =>
            release_performance_configuration_intel as PFN_vkReleasePerformanceConfigurationINTEL,
    }
}

unsafe extern "system" fn create_instance(
    _p_create_info: *const InstanceCreateInfo,
    p_allocator: *const AllocationCallbacks,
    p_instance: *mut Instance,
) -> ResultCode {
    record("vkCreateInstance", &[allocator_marker(p_allocator)]);
    unsafe { p_instance.write(Instance::from_raw(INSTANCE)) };
    ResultCode::SUCCESS
}

unsafe extern "system" fn enumerate_instance_version(p_api_version: *mut u32) -> ResultCode {
    record("vkEnumerateInstanceVersion", &[]);
    unsafe { p_api_version.write((1 << 22) | (3 << 12)) };
    ResultCode::SUCCESS
}

unsafe extern "system" fn destroy_instance(
    instance: Instance,
    p_allocator: *const AllocationCallbacks,
) {
    record(
        "vkDestroyInstance",
        &[instance.as_raw(), allocator_marker(p_allocator)],
    );
}

unsafe extern "system" fn destroy_surface_khr(
    instance: Instance,
    surface: SurfaceKHR,
    p_allocator: *const AllocationCallbacks,
) {
    record(
        "vkDestroySurfaceKHR",
        &[instance.as_raw(), surface.as_raw(), allocator_marker(p_allocator)],
    );
}

unsafe extern "system" fn destroy_device(device: Device, p_allocator: *const AllocationCallbacks) {
    record(
        "vkDestroyDevice",
        &[device.as_raw(), allocator_marker(p_allocator)],
    );
}

unsafe extern "system" fn free_memory(
    device: Device,
    memory: DeviceMemory,
    p_allocator: *const AllocationCallbacks,
) {
    record(
        "vkFreeMemory",
        &[device.as_raw(), memory.as_raw(), allocator_marker(p_allocator)],
    );
}

unsafe extern "system" fn destroy_buffer(
    device: Device,
    buffer: Buffer,
    p_allocator: *const AllocationCallbacks,
) {
    record(
        "vkDestroyBuffer",
        &[device.as_raw(), buffer.as_raw(), allocator_marker(p_allocator)],
    );
}

unsafe extern "system" fn destroy_command_pool(
    device: Device,
    command_pool: CommandPool,
    p_allocator: *const AllocationCallbacks,
) {
    record(
        "vkDestroyCommandPool",
        &[device.as_raw(), command_pool.as_raw(), allocator_marker(p_allocator)],
    );
}

unsafe extern "system" fn trim_command_pool(device: Device, command_pool: CommandPool, flags: Flags) {
    record(
        "vkTrimCommandPool",
        &[device.as_raw(), command_pool.as_raw(), u64::from(flags)],
    );
}

unsafe extern "system" fn free_command_buffers(
    device: Device,
    command_pool: CommandPool,
    command_buffer_count: u32,
    p_command_buffers: *const CommandBuffer,
) {
    let mut args = vec![device.as_raw(), command_pool.as_raw()];
    let buffers = unsafe { std::slice::from_raw_parts(p_command_buffers, command_buffer_count as usize) };
    args.extend(buffers.iter().map(|buffer| buffer.as_raw()));
    record("vkFreeCommandBuffers", &args);
}

unsafe extern "system" fn free_descriptor_sets(
    device: Device,
    descriptor_pool: DescriptorPool,
    descriptor_set_count: u32,
    p_descriptor_sets: *const DescriptorSet,
) -> ResultCode {
    let mut args = vec![device.as_raw(), descriptor_pool.as_raw()];
    let sets = unsafe { std::slice::from_raw_parts(p_descriptor_sets, descriptor_set_count as usize) };
    args.extend(sets.iter().map(|set| set.as_raw()));
    record("vkFreeDescriptorSets", &args);
    ResultCode::SUCCESS
}

unsafe extern "system" fn get_device_group_peer_memory_features_khr(
    device: Device,
    heap_index: u32,
    local_device_index: u32,
    remote_device_index: u32,
    p_peer_memory_features: *mut Flags,
) {
    record(
        "vkGetDeviceGroupPeerMemoryFeaturesKHR",
        &[
            device.as_raw(),
            u64::from(heap_index),
            u64::from(local_device_index),
            u64::from(remote_device_index),
        ],
    );
    unsafe { p_peer_memory_features.write(0b1111) };
}

unsafe extern "system" fn release_performance_configuration_intel(
    device: Device,
    configuration: PerformanceConfigurationINTEL,
) -> ResultCode {
    record(
        "vkReleasePerformanceConfigurationINTEL",
        &[device.as_raw(), configuration.as_raw()],
    );
    ResultCode::SUCCESS
}
