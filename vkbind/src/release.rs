// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! The four ways an owned handle is given back.
//!
//! Every [`Resource`] names exactly one of the strategy records below as its
//! [`Resource::Strategy`], so handing an owner the wrong kind of strategy is
//! a type error:
//!
//! ```compile_fail
//! # use std::sync::Arc;
//! # use vkbind::{DispatchTable, OwnerDestroy, Unique};
//! # use vkbind_sys::{Device, DeviceMemory};
//! # fn run(device: Device, dispatch: Arc<DispatchTable>) {
//! // Device memory is freed, not destroyed.
//! let memory = Unique::new(
//!     DeviceMemory::from_raw(1),
//!     OwnerDestroy { owner: device, allocator: None },
//!     dispatch,
//! );
//! # }
//! ```
//!
//! [`ReleaseStrategy`] is the type-erased view of the same information, used
//! for inspection and logging.

use serde::Serialize;
use vkbind_sys::AllocationCallbacks;

use crate::Resource;

/// The release verb a handle type uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    /// `vkDestroy*(owner, handle, allocator)`.
    Destroy,
    /// `vkFree*(owner, handle, allocator)`.
    Free,
    /// `vkRelease*(owner, handle)`.
    Release,
    /// `vkFree*(owner, pool, 1, &handle)`.
    PoolFree,
}

/// Context for `vkDestroy*`.
#[derive(Clone, Copy, Debug)]
pub struct OwnerDestroy<O> {
    pub owner: O,
    pub allocator: Option<AllocationCallbacks>,
}

/// Context for `vkFree*` on individually allocated objects.
#[derive(Clone, Copy, Debug)]
pub struct OwnerFree<O> {
    pub owner: O,
    pub allocator: Option<AllocationCallbacks>,
}

/// Context for `vkRelease*`.
#[derive(Clone, Copy, Debug)]
pub struct OwnerRelease<O> {
    pub owner: O,
}

/// Context for returning a pool-allocated object to its pool.
#[derive(Clone, Copy, Debug)]
pub struct PoolFree<O, P> {
    pub owner: O,
    pub pool: P,
}

/// How, and in which context, an owned handle is given back.
#[derive(Clone, Copy, Debug)]
pub enum ReleaseStrategy<H: Resource> {
    Destroy(OwnerDestroy<H::Owner>),
    Free(OwnerFree<H::Owner>),
    Release(OwnerRelease<H::Owner>),
    PoolFree(PoolFree<H::Owner, H::Pool>),
}

impl<H: Resource> ReleaseStrategy<H> {
    pub fn category(&self) -> ResourceCategory {
        match self {
            Self::Destroy(_) => ResourceCategory::Destroy,
            Self::Free(_) => ResourceCategory::Free,
            Self::Release(_) => ResourceCategory::Release,
            Self::PoolFree(_) => ResourceCategory::PoolFree,
        }
    }

    pub fn owner(&self) -> H::Owner {
        match self {
            Self::Destroy(OwnerDestroy { owner, .. })
            | Self::Free(OwnerFree { owner, .. })
            | Self::Release(OwnerRelease { owner })
            | Self::PoolFree(PoolFree { owner, .. }) => *owner,
        }
    }

    pub fn allocator(&self) -> Option<&AllocationCallbacks> {
        match self {
            Self::Destroy(OwnerDestroy { allocator, .. })
            | Self::Free(OwnerFree { allocator, .. }) => allocator.as_ref(),
            Self::Release(_) | Self::PoolFree(_) => None,
        }
    }

    pub fn pool(&self) -> Option<H::Pool> {
        match self {
            Self::PoolFree(PoolFree { pool, .. }) => Some(*pool),
            _ => None,
        }
    }
}
