// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! # vkbind-sys: raw types of the Vulkan C boundary
//!
//! This crate holds the `#[repr(C)]` vocabulary that crosses the native
//! boundary: handles, structure tags, result codes, the chainable records
//! and the entry-point signatures used by [`vkbind`].
//!
//! ## Overview
//!
//! `vkbind-sys` exposes:
//! - Handle types: dispatchable handles are opaque pointers, non-dispatchable
//!   handles are 64-bit values
//! - [`StructureType`] tags and the [`BaseInStructure`]/[`BaseOutStructure`]
//!   prefix shared by every chainable record
//! - Entry-point signatures (`PFN_vk*`) as non-nullable function pointer types
//!
//! ## Usage
//!
//! **Most users should NOT use this crate directly.** The [`vkbind`] crate
//! provides:
//! - Type-checked structure chains
//! - RAII ownership of handles
//! - A dispatch table resolving entry points at runtime
//!
//! ## Safety
//!
//! Nothing here is checked. Layouts must match the C headers exactly, record
//! `p_next` fields are raw links, and null checks are the caller's
//! responsibility.
//!
//! [`vkbind`]: https://docs.rs/vkbind

#![allow(non_camel_case_types)]
#![allow(clippy::missing_safety_doc)]

mod functions;
mod handles;
mod structs;

pub use functions::*;
pub use handles::*;
pub use structs::*;

pub type Bool32 = u32;
pub type DeviceSize = u64;
pub type Flags = u32;

pub const TRUE: Bool32 = 1;
pub const FALSE: Bool32 = 0;

pub const MAX_EXTENSION_NAME_SIZE: usize = 256;
pub const MAX_DESCRIPTION_SIZE: usize = 256;
pub const MAX_DEVICE_GROUP_SIZE: usize = 32;

/// Tag identifying the concrete type of a chainable record.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StructureType(i32);

impl StructureType {
    pub const APPLICATION_INFO: Self = Self(0);
    pub const INSTANCE_CREATE_INFO: Self = Self(1);
    pub const DEVICE_QUEUE_CREATE_INFO: Self = Self(2);
    pub const DEVICE_CREATE_INFO: Self = Self(3);
    pub const MEMORY_ALLOCATE_INFO: Self = Self(5);
    pub const BUFFER_CREATE_INFO: Self = Self(12);
    pub const DESCRIPTOR_POOL_CREATE_INFO: Self = Self(33);
    pub const COMMAND_POOL_CREATE_INFO: Self = Self(39);
    pub const COMMAND_BUFFER_ALLOCATE_INFO: Self = Self(40);
    pub const MEMORY_ALLOCATE_FLAGS_INFO: Self = Self(1_000_060_000);
    pub const PHYSICAL_DEVICE_GROUP_PROPERTIES: Self = Self(1_000_070_000);
    pub const PHYSICAL_DEVICE_16BIT_STORAGE_FEATURES: Self = Self(1_000_083_000);
    pub const PHYSICAL_DEVICE_VARIABLE_POINTERS_FEATURES: Self = Self(1_000_120_000);
    pub const MEMORY_DEDICATED_ALLOCATE_INFO: Self = Self(1_000_127_001);
    pub const DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT: Self = Self(1_000_128_004);
    pub const VALIDATION_FEATURES_EXT: Self = Self(1_000_247_000);
    pub const DEVICE_PRIVATE_DATA_CREATE_INFO: Self = Self(1_000_295_001);

    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

/// Status code returned by native entry points.
///
/// Non-negative values are successes, negative values are errors.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResultCode(i32);

impl ResultCode {
    pub const SUCCESS: Self = Self(0);
    pub const NOT_READY: Self = Self(1);
    pub const TIMEOUT: Self = Self(2);
    pub const INCOMPLETE: Self = Self(5);
    pub const ERROR_OUT_OF_HOST_MEMORY: Self = Self(-1);
    pub const ERROR_OUT_OF_DEVICE_MEMORY: Self = Self(-2);
    pub const ERROR_INITIALIZATION_FAILED: Self = Self(-3);
    pub const ERROR_DEVICE_LOST: Self = Self(-4);
    pub const ERROR_MEMORY_MAP_FAILED: Self = Self(-5);
    pub const ERROR_LAYER_NOT_PRESENT: Self = Self(-6);
    pub const ERROR_EXTENSION_NOT_PRESENT: Self = Self(-7);
    pub const ERROR_FEATURE_NOT_PRESENT: Self = Self(-8);
    pub const ERROR_INCOMPATIBLE_DRIVER: Self = Self(-9);
    pub const ERROR_TOO_MANY_OBJECTS: Self = Self(-10);
    pub const ERROR_FORMAT_NOT_SUPPORTED: Self = Self(-11);
    pub const ERROR_FRAGMENTED_POOL: Self = Self(-12);
    pub const ERROR_UNKNOWN: Self = Self(-13);
    pub const ERROR_OUT_OF_POOL_MEMORY: Self = Self(-1_000_069_000);

    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    pub const fn as_raw(self) -> i32 {
        self.0
    }
}
