// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Structure tags and extension relations of the records in `vkbind-sys`.

use vkbind_sys::{
    ApplicationInfo, BufferCreateInfo, CommandBufferAllocateInfo, CommandPoolCreateInfo,
    DebugUtilsMessengerCreateInfoEXT, DescriptorPoolCreateInfo, DeviceCreateInfo,
    DevicePrivateDataCreateInfo, DeviceQueueCreateInfo, InstanceCreateInfo,
    MemoryAllocateFlagsInfo, MemoryAllocateInfo, MemoryDedicatedAllocateInfo,
    PhysicalDevice16BitStorageFeatures, PhysicalDeviceGroupProperties,
    PhysicalDeviceVariablePointersFeatures, StructureType, ValidationFeaturesEXT,
};

use crate::chain::{Extends, TaggedStructure};

macro_rules! tagged_structures {
    ($($name:ident => $s_type:ident $([$duplicates:ident])?;)*) => {
        $(
            unsafe impl TaggedStructure for $name {
                const STRUCTURE_TYPE: StructureType = StructureType::$s_type;
                const ALLOW_DUPLICATE: bool = tagged_structures!(@duplicates $($duplicates)?);
            }
        )*
    };
    (@duplicates) => { false };
    (@duplicates allow_duplicate) => { true };
}

macro_rules! extends {
    ($($head:ident: $($ext:ident),+;)*) => {
        $($(impl Extends<$head> for $ext {})+)*
    };
}

tagged_structures! {
    ApplicationInfo => APPLICATION_INFO;
    InstanceCreateInfo => INSTANCE_CREATE_INFO;
    DebugUtilsMessengerCreateInfoEXT => DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT [allow_duplicate];
    ValidationFeaturesEXT => VALIDATION_FEATURES_EXT;
    DeviceQueueCreateInfo => DEVICE_QUEUE_CREATE_INFO;
    DeviceCreateInfo => DEVICE_CREATE_INFO;
    PhysicalDeviceVariablePointersFeatures => PHYSICAL_DEVICE_VARIABLE_POINTERS_FEATURES;
    PhysicalDevice16BitStorageFeatures => PHYSICAL_DEVICE_16BIT_STORAGE_FEATURES;
    DevicePrivateDataCreateInfo => DEVICE_PRIVATE_DATA_CREATE_INFO [allow_duplicate];
    MemoryAllocateInfo => MEMORY_ALLOCATE_INFO;
    MemoryAllocateFlagsInfo => MEMORY_ALLOCATE_FLAGS_INFO;
    MemoryDedicatedAllocateInfo => MEMORY_DEDICATED_ALLOCATE_INFO;
    BufferCreateInfo => BUFFER_CREATE_INFO;
    CommandPoolCreateInfo => COMMAND_POOL_CREATE_INFO;
    CommandBufferAllocateInfo => COMMAND_BUFFER_ALLOCATE_INFO;
    DescriptorPoolCreateInfo => DESCRIPTOR_POOL_CREATE_INFO;
    PhysicalDeviceGroupProperties => PHYSICAL_DEVICE_GROUP_PROPERTIES;
}

extends! {
    InstanceCreateInfo: DebugUtilsMessengerCreateInfoEXT, ValidationFeaturesEXT;
    DeviceCreateInfo:
        PhysicalDeviceVariablePointersFeatures,
        PhysicalDevice16BitStorageFeatures,
        DevicePrivateDataCreateInfo;
    MemoryAllocateInfo: MemoryAllocateFlagsInfo, MemoryDedicatedAllocateInfo;
}
