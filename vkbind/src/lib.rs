// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! # vkbind - structure chains, unique handles and dispatch for Vulkan
//!
//! Safe building blocks for calling the Vulkan C API from Rust. The raw
//! boundary types live in [`vkbind_sys`]; this crate adds the three pieces
//! every binding layer needs on top of them.
//!
//! ## Overview
//!
//! ### Key Concepts
//!
//! - **Structure chain**: a head record plus extension records linked
//!   through their `p_next` fields ([`StructureChain`]). Which records may
//!   extend which head is checked at compile time.
//! - **Unique handle**: exclusive ownership of a native handle that
//!   releases it exactly once ([`Unique`]), with the release verb chosen by
//!   the handle's [`ResourceCategory`]. [`Shared`] is the reference-counted
//!   variant that also keeps its parent alive.
//! - **Dispatch table**: entry points resolved at runtime in bootstrap,
//!   instance and device phases ([`DispatchTable`]), with aliasing between
//!   core and vendor-suffixed names of promoted commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────┐   vkGetInstanceProcAddr   ┌───────────────┐
//! │ Loader │ ────────────────────────► │ DispatchTable │ ◄── init_instance / init_device
//! └────────┘                           └───────┬───────┘
//!                                              │ Arc
//!                                              ▼
//!                      Unique<H> / Shared<H> ──► release verb of H
//!
//! StructureChain<(Head, Ext...)> ──► as_ptr() ──► vkCreate*(...)
//! ```
//!
//! ## Examples
//!
//! ### Bootstrapping a dispatch table
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vkbind::{DispatchTable, Loader};
//!
//! # fn main() -> Result<(), vkbind::Error> {
//! // Opens libvulkan (or $VKBIND_LIBRARY) and resolves the global commands.
//! let dispatch = DispatchTable::load(Arc::new(Loader::new()?))?;
//! if !dispatch.is_resolved("vkEnumerateInstanceVersion") {
//!     println!("Vulkan 1.0 loader");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Building a device create info chain
//!
//! ```
//! use vkbind::StructureChain;
//! use vkbind_sys::{DeviceCreateInfo, PhysicalDevice16BitStorageFeatures, TRUE};
//!
//! let mut chain = StructureChain::<(DeviceCreateInfo, PhysicalDevice16BitStorageFeatures)>::default();
//! chain
//!     .get_mut::<PhysicalDevice16BitStorageFeatures>()
//!     .storage_buffer_16bit_access = TRUE;
//! assert_eq!(chain.linked_types().len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! - [`DispatchTable`] is read-only once its phases have run; share it
//!   through an `Arc` after the last `init_*` call
//! - [`StructureChain`] and [`Unique`] are single-owner values without
//!   internal synchronization
//! - [`Shared`] counts its clones without atomics and stays on the thread
//!   that created it

mod chain;
mod dispatch;
mod error;
mod handle;
mod loader;
mod registry;
mod release;
mod shared;

pub mod config;

pub use chain::{ChainElements, ElementMut, Extends, Member, StructureChain, TaggedStructure};
pub use dispatch::{DispatchTable, EntryPoint, ResolutionSummary, Tier};
pub use error::{Error, Result};
pub use handle::{Handle, NoParent, Resource, Unique, unique_to_raw};
pub use loader::Loader;
pub use release::{
    OwnerDestroy, OwnerFree, OwnerRelease, PoolFree, ReleaseStrategy, ResourceCategory,
};
pub use shared::Shared;
