// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Runtime resolution of entry points.
//!
//! A [`DispatchTable`] fills in its slots in three phases. It starts from the
//! bootstrap resolver `vkGetInstanceProcAddr` and resolves the few global
//! commands. [`DispatchTable::init_instance`] then resolves everything an
//! instance provides, device commands included, and
//! [`DispatchTable::init_device`] re-resolves the device commands through the
//! device itself, skipping the loader's trampolines.
//!
//! Some commands were promoted from vendor extensions into the core API, so
//! the same behavior may be exported under two names. After every phase, a
//! pair with only one resolved member gets the resolved address copied into
//! the other slot.
//!
//! There is no process-wide table: create one, share it through an [`Arc`]
//! and pass it to whatever needs it.

use std::{
    ffi::{CStr, c_void},
    fmt, mem,
    sync::Arc,
};

use serde::Serialize;
use tracing::{debug, info};
use vkbind_sys::*;

use crate::{Error, Loader, Result};

type VoidFunction = unsafe extern "system" fn();

/// The resolution phase that fills an entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bootstrap,
    Instance,
    Device,
}

/// State of one slot of a [`DispatchTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EntryPoint {
    pub name: &'static str,
    pub tier: Tier,
    pub resolved: bool,
}

impl EntryPoint {
    fn new(name: &'static CStr, tier: Tier, resolved: bool) -> Self {
        Self {
            name: name.to_str().unwrap_or("<non-utf8>"),
            tier,
            resolved,
        }
    }
}

/// Counts and per-slot details of a [`DispatchTable`], ready for serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub resolved: usize,
    pub unavailable: usize,
    pub entries: Vec<EntryPoint>,
}

#[derive(Clone, Copy)]
enum Resolver {
    Instance(PFN_vkGetInstanceProcAddr, Instance),
    Device(PFN_vkGetDeviceProcAddr, Device),
}

impl Resolver {
    unsafe fn lookup(self, name: &CStr) -> Option<VoidFunction> {
        let function = unsafe {
            match self {
                Resolver::Instance(resolve, instance) => resolve(instance, name.as_ptr()),
                Resolver::Device(resolve, device) => resolve(device, name.as_ptr()),
            }
        };
        if function.is_none() {
            debug!("Entry point {:?} is unavailable.", name);
        }
        function
    }
}

macro_rules! dispatch_table {
    (
        bootstrap { $($b_field:ident: $b_ty:ty = $b_name:literal;)* }
        instance { $($i_field:ident: $i_ty:ty = $i_name:literal;)* }
        device { $($d_field:ident: $d_ty:ty = $d_name:literal;)* }
        promoted { $($core:ident <=> $legacy:ident;)* }
    ) => {
        /// Resolved entry points, one optional slot per command.
        ///
        /// Slots are `None` until their phase has run, and stay `None` if the
        /// implementation does not export the command.
        pub struct DispatchTable {
            get_instance_proc_addr: PFN_vkGetInstanceProcAddr,
            instance: Instance,
            device: Device,
            library: Option<Arc<Loader>>,
            $(pub $b_field: Option<$b_ty>,)*
            $(pub $i_field: Option<$i_ty>,)*
            $(pub $d_field: Option<$d_ty>,)*
        }

        impl DispatchTable {
            fn unresolved(get_instance_proc_addr: PFN_vkGetInstanceProcAddr) -> Self {
                Self {
                    get_instance_proc_addr,
                    instance: Instance::null(),
                    device: Device::null(),
                    library: None,
                    $($b_field: None,)*
                    $($i_field: None,)*
                    $($d_field: None,)*
                }
            }

            fn resolve_bootstrap(&mut self, resolver: Resolver) {
                $(self.$b_field = unsafe { resolver.lookup($b_name) }
                    .map(|function| unsafe { mem::transmute::<VoidFunction, $b_ty>(function) });)*
            }

            fn resolve_instance(&mut self, resolver: Resolver) {
                $(self.$i_field = unsafe { resolver.lookup($i_name) }
                    .map(|function| unsafe { mem::transmute::<VoidFunction, $i_ty>(function) });)*
            }

            fn resolve_device(&mut self, resolver: Resolver) {
                $(self.$d_field = unsafe { resolver.lookup($d_name) }
                    .map(|function| unsafe { mem::transmute::<VoidFunction, $d_ty>(function) });)*
            }

            fn apply_promotions(&mut self) {
                $(
                    match (self.$core, self.$legacy) {
                        (None, Some(legacy)) => {
                            debug!("Using {} for {}.", stringify!($legacy), stringify!($core));
                            self.$core = Some(legacy);
                        }
                        (Some(core), None) => {
                            debug!("Using {} for {}.", stringify!($core), stringify!($legacy));
                            self.$legacy = Some(core);
                        }
                        _ => {}
                    }
                )*
            }

            /// Lists every slot with its tier and whether it is resolved.
            pub fn entry_points(&self) -> Vec<EntryPoint> {
                vec![
                    EntryPoint::new(c"vkGetInstanceProcAddr", Tier::Bootstrap, true),
                    $(EntryPoint::new($b_name, Tier::Bootstrap, self.$b_field.is_some()),)*
                    $(EntryPoint::new($i_name, Tier::Instance, self.$i_field.is_some()),)*
                    $(EntryPoint::new($d_name, Tier::Device, self.$d_field.is_some()),)*
                ]
            }
        }
    };
}

dispatch_table! {
    bootstrap {
        create_instance: PFN_vkCreateInstance = c"vkCreateInstance";
        enumerate_instance_version: PFN_vkEnumerateInstanceVersion = c"vkEnumerateInstanceVersion";
        enumerate_instance_extension_properties: PFN_vkEnumerateInstanceExtensionProperties =
            c"vkEnumerateInstanceExtensionProperties";
        enumerate_instance_layer_properties: PFN_vkEnumerateInstanceLayerProperties =
            c"vkEnumerateInstanceLayerProperties";
    }
    instance {
        destroy_instance: PFN_vkDestroyInstance = c"vkDestroyInstance";
        enumerate_physical_devices: PFN_vkEnumeratePhysicalDevices = c"vkEnumeratePhysicalDevices";
        enumerate_physical_device_groups: PFN_vkEnumeratePhysicalDeviceGroups =
            c"vkEnumeratePhysicalDeviceGroups";
        enumerate_physical_device_groups_khr: PFN_vkEnumeratePhysicalDeviceGroups =
            c"vkEnumeratePhysicalDeviceGroupsKHR";
        create_device: PFN_vkCreateDevice = c"vkCreateDevice";
        get_device_proc_addr: PFN_vkGetDeviceProcAddr = c"vkGetDeviceProcAddr";
        destroy_surface_khr: PFN_vkDestroySurfaceKHR = c"vkDestroySurfaceKHR";
        create_debug_utils_messenger_ext: PFN_vkCreateDebugUtilsMessengerEXT =
            c"vkCreateDebugUtilsMessengerEXT";
        destroy_debug_utils_messenger_ext: PFN_vkDestroyDebugUtilsMessengerEXT =
            c"vkDestroyDebugUtilsMessengerEXT";
    }
    device {
        destroy_device: PFN_vkDestroyDevice = c"vkDestroyDevice";
        get_device_queue: PFN_vkGetDeviceQueue = c"vkGetDeviceQueue";
        allocate_memory: PFN_vkAllocateMemory = c"vkAllocateMemory";
        free_memory: PFN_vkFreeMemory = c"vkFreeMemory";
        create_buffer: PFN_vkCreateBuffer = c"vkCreateBuffer";
        destroy_buffer: PFN_vkDestroyBuffer = c"vkDestroyBuffer";
        create_command_pool: PFN_vkCreateCommandPool = c"vkCreateCommandPool";
        destroy_command_pool: PFN_vkDestroyCommandPool = c"vkDestroyCommandPool";
        trim_command_pool: PFN_vkTrimCommandPool = c"vkTrimCommandPool";
        trim_command_pool_khr: PFN_vkTrimCommandPool = c"vkTrimCommandPoolKHR";
        allocate_command_buffers: PFN_vkAllocateCommandBuffers = c"vkAllocateCommandBuffers";
        free_command_buffers: PFN_vkFreeCommandBuffers = c"vkFreeCommandBuffers";
        create_descriptor_pool: PFN_vkCreateDescriptorPool = c"vkCreateDescriptorPool";
        destroy_descriptor_pool: PFN_vkDestroyDescriptorPool = c"vkDestroyDescriptorPool";
        free_descriptor_sets: PFN_vkFreeDescriptorSets = c"vkFreeDescriptorSets";
        get_device_group_peer_memory_features: PFN_vkGetDeviceGroupPeerMemoryFeatures =
            c"vkGetDeviceGroupPeerMemoryFeatures";
        get_device_group_peer_memory_features_khr: PFN_vkGetDeviceGroupPeerMemoryFeatures =
            c"vkGetDeviceGroupPeerMemoryFeaturesKHR";
        release_performance_configuration_intel: PFN_vkReleasePerformanceConfigurationINTEL =
            c"vkReleasePerformanceConfigurationINTEL";
    }
    promoted {
        enumerate_physical_device_groups <=> enumerate_physical_device_groups_khr;
        trim_command_pool <=> trim_command_pool_khr;
        get_device_group_peer_memory_features <=> get_device_group_peer_memory_features_khr;
    }
}

impl DispatchTable {
    /// Creates a table from the bootstrap resolver and resolves the global
    /// commands through it.
    pub fn new(get_instance_proc_addr: PFN_vkGetInstanceProcAddr) -> Self {
        let mut table = Self::unresolved(get_instance_proc_addr);
        table.resolve_bootstrap(Resolver::Instance(get_instance_proc_addr, Instance::null()));
        table.log_phase(Tier::Bootstrap);
        table
    }

    /// Creates a table from an untyped bootstrap resolver address.
    ///
    /// # Panics
    ///
    /// Panics if `get_instance_proc_addr` is null.
    ///
    /// # Safety
    ///
    /// A non-null `get_instance_proc_addr` must point to a function with the
    /// signature of `vkGetInstanceProcAddr`.
    pub unsafe fn from_raw(get_instance_proc_addr: *const c_void) -> Self {
        assert!(
            !get_instance_proc_addr.is_null(),
            "the vkGetInstanceProcAddr address must not be null"
        );
        Self::new(unsafe {
            mem::transmute::<*const c_void, PFN_vkGetInstanceProcAddr>(get_instance_proc_addr)
        })
    }

    /// Creates a table from the bootstrap resolver exported by `library`.
    ///
    /// The table keeps the library loaded for as long as it lives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEntryPoint`] if the library does not export
    /// `vkGetInstanceProcAddr`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use vkbind::{DispatchTable, Loader};
    ///
    /// # fn main() -> vkbind::Result<()> {
    /// let table = DispatchTable::load(Arc::new(Loader::new()?))?;
    /// println!("{} of the global commands resolved", table.summary().resolved);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(library: Arc<Loader>) -> Result<Self> {
        let get_instance_proc_addr = unsafe {
            library.get_proc_address::<PFN_vkGetInstanceProcAddr>(c"vkGetInstanceProcAddr")
        }
        .ok_or(Error::MissingEntryPoint("vkGetInstanceProcAddr"))?;
        let mut table = Self::new(get_instance_proc_addr);
        table.library = Some(library);
        Ok(table)
    }

    /// Resolves the instance and device commands through `instance`.
    ///
    /// Device commands obtained here go through the loader's dispatch
    /// trampolines; call [`Self::init_device`] afterwards to bypass them for
    /// a single device.
    ///
    /// # Safety
    ///
    /// `instance` must be a valid instance created through this table's
    /// bootstrap resolver, and must outlive every use of the resolved slots.
    pub unsafe fn init_instance(&mut self, instance: Instance) {
        self.instance = instance;
        let resolver = Resolver::Instance(self.get_instance_proc_addr, instance);
        self.resolve_instance(resolver);
        self.resolve_device(resolver);
        self.apply_promotions();
        self.log_phase(Tier::Instance);
    }

    /// Re-resolves the device commands for `device`.
    ///
    /// Uses `vkGetDeviceProcAddr` when it is resolved, and the instance
    /// resolver otherwise.
    ///
    /// # Safety
    ///
    /// `device` must be a valid device created from this table's instance,
    /// and must outlive every use of the resolved slots.
    pub unsafe fn init_device(&mut self, device: Device) {
        self.device = device;
        let resolver = match self.get_device_proc_addr {
            Some(get_device_proc_addr) => Resolver::Device(get_device_proc_addr, device),
            None => Resolver::Instance(self.get_instance_proc_addr, self.instance),
        };
        self.resolve_device(resolver);
        self.apply_promotions();
        self.log_phase(Tier::Device);
    }

    pub fn get_instance_proc_addr(&self) -> PFN_vkGetInstanceProcAddr {
        self.get_instance_proc_addr
    }

    /// The instance passed to [`Self::init_instance`], or null.
    pub fn instance(&self) -> Instance {
        self.instance
    }

    /// The device passed to [`Self::init_device`], or null.
    pub fn device(&self) -> Device {
        self.device
    }

    /// The library this table was loaded from, if any.
    pub fn library(&self) -> Option<&Arc<Loader>> {
        self.library.as_ref()
    }

    /// Returns whether the command called `name` (e.g. `"vkCreateDevice"`) is
    /// resolved. Unknown names are reported as unresolved.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.entry_points()
            .iter()
            .any(|entry| entry.resolved && entry.name == name)
    }

    pub fn summary(&self) -> ResolutionSummary {
        let entries = self.entry_points();
        let resolved = entries.iter().filter(|entry| entry.resolved).count();
        ResolutionSummary {
            resolved,
            unavailable: entries.len() - resolved,
            entries,
        }
    }

    fn log_phase(&self, tier: Tier) {
        let entries = self.entry_points();
        let resolved = entries.iter().filter(|entry| entry.resolved).count();
        info!(
            "Resolved {} of {} entry points after the {:?} phase.",
            resolved,
            entries.len(),
            tier
        );
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary();
        f.debug_struct("DispatchTable")
            .field("instance", &self.instance)
            .field("device", &self.device)
            .field("library", &self.library.as_ref().map(|library| library.name()))
            .field("resolved", &summary.resolved)
            .field("unavailable", &summary.unavailable)
            .finish_non_exhaustive()
    }
}
