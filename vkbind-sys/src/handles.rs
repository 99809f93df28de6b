// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Opaque handle types.

use std::{ffi::c_void, ptr};

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(*mut c_void);

        // Safety: a handle is an identifier; synchronizing the object behind
        // it is the native API's contract with the caller.
        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}

        impl $name {
            pub const fn null() -> Self {
                Self(ptr::null_mut())
            }

            pub fn is_null(self) -> bool {
                self.0.is_null()
            }

            pub fn from_raw(raw: u64) -> Self {
                Self(raw as usize as *mut c_void)
            }

            pub fn as_raw(self) -> u64 {
                self.0 as usize as u64
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::null()
            }
        }
    };
}

macro_rules! define_non_dispatchable_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            pub const fn null() -> Self {
                Self(0)
            }

            pub fn is_null(self) -> bool {
                self.0 == 0
            }

            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn as_raw(self) -> u64 {
                self.0
            }
        }
    };
}

define_handle!(
    /// Per-application connection to the Vulkan loader.
    Instance
);
define_handle!(PhysicalDevice);
define_handle!(
    /// Logical device created from a physical device.
    Device
);
define_handle!(Queue);
define_handle!(CommandBuffer);

define_non_dispatchable_handle!(DeviceMemory);
define_non_dispatchable_handle!(Buffer);
define_non_dispatchable_handle!(CommandPool);
define_non_dispatchable_handle!(DescriptorPool);
define_non_dispatchable_handle!(DescriptorSet);
define_non_dispatchable_handle!(SurfaceKHR);
define_non_dispatchable_handle!(DebugUtilsMessengerEXT);
define_non_dispatchable_handle!(PerformanceConfigurationINTEL);
