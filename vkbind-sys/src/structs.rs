// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Chainable records and the plain structures they reference.
//!
//! Every chainable record starts with `s_type` followed by `p_next`, so a
//! pointer to any of them can be reinterpreted as [`BaseInStructure`] or
//! [`BaseOutStructure`] to walk a chain.

use std::{
    ffi::{c_char, c_void},
    mem,
};

use crate::{
    Bool32, Buffer, CommandPool, DeviceSize, Flags, MAX_DESCRIPTION_SIZE, MAX_DEVICE_GROUP_SIZE,
    MAX_EXTENSION_NAME_SIZE, PFN_vkAllocationFunction, PFN_vkDebugUtilsMessengerCallbackEXT,
    PFN_vkFreeFunction, PFN_vkInternalAllocationNotification, PFN_vkInternalFreeNotification,
    PFN_vkReallocationFunction, PhysicalDevice, StructureType,
};

// Zero is a valid value for every field of the records below: integers,
// raw pointers, handles and nullable function pointers.
macro_rules! tagged_default {
    ($name:ident = $s_type:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self {
                    s_type: StructureType::$s_type,
                    ..unsafe { mem::zeroed() }
                }
            }
        }
    };
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct BaseInStructure {
    pub s_type: StructureType,
    pub p_next: *const BaseInStructure,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct BaseOutStructure {
    pub s_type: StructureType,
    pub p_next: *mut BaseOutStructure,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct AllocationCallbacks {
    pub p_user_data: *mut c_void,
    pub pfn_allocation: PFN_vkAllocationFunction,
    pub pfn_reallocation: PFN_vkReallocationFunction,
    pub pfn_free: PFN_vkFreeFunction,
    pub pfn_internal_allocation: PFN_vkInternalAllocationNotification,
    pub pfn_internal_free: PFN_vkInternalFreeNotification,
}

impl Default for AllocationCallbacks {
    fn default() -> Self {
        unsafe { mem::zeroed() }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ExtensionProperties {
    pub extension_name: [c_char; MAX_EXTENSION_NAME_SIZE],
    pub spec_version: u32,
}

impl Default for ExtensionProperties {
    fn default() -> Self {
        unsafe { mem::zeroed() }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct LayerProperties {
    pub layer_name: [c_char; MAX_EXTENSION_NAME_SIZE],
    pub spec_version: u32,
    pub implementation_version: u32,
    pub description: [c_char; MAX_DESCRIPTION_SIZE],
}

impl Default for LayerProperties {
    fn default() -> Self {
        unsafe { mem::zeroed() }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ApplicationInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub p_application_name: *const c_char,
    pub application_version: u32,
    pub p_engine_name: *const c_char,
    pub engine_version: u32,
    pub api_version: u32,
}
tagged_default!(ApplicationInfo = APPLICATION_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct InstanceCreateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub p_application_info: *const ApplicationInfo,
    pub enabled_layer_count: u32,
    pub pp_enabled_layer_names: *const *const c_char,
    pub enabled_extension_count: u32,
    pub pp_enabled_extension_names: *const *const c_char,
}
tagged_default!(InstanceCreateInfo = INSTANCE_CREATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DebugUtilsMessengerCreateInfoEXT {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub message_severity: Flags,
    pub message_type: Flags,
    pub pfn_user_callback: PFN_vkDebugUtilsMessengerCallbackEXT,
    pub p_user_data: *mut c_void,
}
tagged_default!(DebugUtilsMessengerCreateInfoEXT = DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ValidationFeaturesEXT {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub enabled_validation_feature_count: u32,
    pub p_enabled_validation_features: *const i32,
    pub disabled_validation_feature_count: u32,
    pub p_disabled_validation_features: *const i32,
}
tagged_default!(ValidationFeaturesEXT = VALIDATION_FEATURES_EXT);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DeviceQueueCreateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub queue_family_index: u32,
    pub queue_count: u32,
    pub p_queue_priorities: *const f32,
}
tagged_default!(DeviceQueueCreateInfo = DEVICE_QUEUE_CREATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DeviceCreateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub queue_create_info_count: u32,
    pub p_queue_create_infos: *const DeviceQueueCreateInfo,
    pub enabled_layer_count: u32,
    pub pp_enabled_layer_names: *const *const c_char,
    pub enabled_extension_count: u32,
    pub pp_enabled_extension_names: *const *const c_char,
    /// Points at a `VkPhysicalDeviceFeatures`, or null.
    pub p_enabled_features: *const c_void,
}
tagged_default!(DeviceCreateInfo = DEVICE_CREATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PhysicalDeviceVariablePointersFeatures {
    pub s_type: StructureType,
    pub p_next: *mut c_void,
    pub variable_pointers_storage_buffer: Bool32,
    pub variable_pointers: Bool32,
}
tagged_default!(PhysicalDeviceVariablePointersFeatures = PHYSICAL_DEVICE_VARIABLE_POINTERS_FEATURES);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PhysicalDevice16BitStorageFeatures {
    pub s_type: StructureType,
    pub p_next: *mut c_void,
    pub storage_buffer_16bit_access: Bool32,
    pub uniform_and_storage_buffer_16bit_access: Bool32,
    pub storage_push_constant16: Bool32,
    pub storage_input_output16: Bool32,
}
tagged_default!(PhysicalDevice16BitStorageFeatures = PHYSICAL_DEVICE_16BIT_STORAGE_FEATURES);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DevicePrivateDataCreateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub private_data_slot_request_count: u32,
}
tagged_default!(DevicePrivateDataCreateInfo = DEVICE_PRIVATE_DATA_CREATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MemoryAllocateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub allocation_size: DeviceSize,
    pub memory_type_index: u32,
}
tagged_default!(MemoryAllocateInfo = MEMORY_ALLOCATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MemoryAllocateFlagsInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub device_mask: u32,
}
tagged_default!(MemoryAllocateFlagsInfo = MEMORY_ALLOCATE_FLAGS_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MemoryDedicatedAllocateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    /// Raw `VkImage` value, or zero.
    pub image: u64,
    pub buffer: Buffer,
}
tagged_default!(MemoryDedicatedAllocateInfo = MEMORY_DEDICATED_ALLOCATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct BufferCreateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub size: DeviceSize,
    pub usage: Flags,
    pub sharing_mode: i32,
    pub queue_family_index_count: u32,
    pub p_queue_family_indices: *const u32,
}
tagged_default!(BufferCreateInfo = BUFFER_CREATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CommandPoolCreateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub queue_family_index: u32,
}
tagged_default!(CommandPoolCreateInfo = COMMAND_POOL_CREATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CommandBufferAllocateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub command_pool: CommandPool,
    pub level: i32,
    pub command_buffer_count: u32,
}
tagged_default!(CommandBufferAllocateInfo = COMMAND_BUFFER_ALLOCATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct DescriptorPoolSize {
    pub ty: i32,
    pub descriptor_count: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DescriptorPoolCreateInfo {
    pub s_type: StructureType,
    pub p_next: *const c_void,
    pub flags: Flags,
    pub max_sets: u32,
    pub pool_size_count: u32,
    pub p_pool_sizes: *const DescriptorPoolSize,
}
tagged_default!(DescriptorPoolCreateInfo = DESCRIPTOR_POOL_CREATE_INFO);

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PhysicalDeviceGroupProperties {
    pub s_type: StructureType,
    pub p_next: *mut c_void,
    pub physical_device_count: u32,
    pub physical_devices: [PhysicalDevice; MAX_DEVICE_GROUP_SIZE],
    pub subset_allocation: Bool32,
}
tagged_default!(PhysicalDeviceGroupProperties = PHYSICAL_DEVICE_GROUP_PROPERTIES);
