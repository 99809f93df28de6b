// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Exclusive ownership of native handles.
//!
//! A [`Unique`] owns one handle and releases it exactly once, either when it
//! is dropped or when [`Unique::reset`] replaces it. How a handle is released
//! depends on its type: most are destroyed, device memory is freed, a few
//! vendor objects are released, and pool-allocated objects are freed back to
//! their pool. [`Resource::Strategy`] names the record carrying the context
//! that verb needs, so every handle type accepts exactly one kind of
//! strategy.
//!
//! The release entry points are taken from the [`DispatchTable`] handed to
//! the wrapper, never from a global. The same machinery backs the
//! reference-counted [`Shared`](crate::Shared).

use std::{fmt, mem, ptr, sync::Arc};

use tracing::{error, trace, warn};
use vkbind_sys::{
    AllocationCallbacks, Buffer, CommandBuffer, CommandPool, DebugUtilsMessengerEXT,
    DescriptorPool, DescriptorSet, Device, DeviceMemory, Instance, PerformanceConfigurationINTEL,
    ResultCode, SurfaceKHR,
};

use crate::{
    DispatchTable, Error, OwnerDestroy, OwnerFree, OwnerRelease, PoolFree, ReleaseStrategy,
    ResourceCategory,
};

/// A plain, copyable native handle value with a null state.
pub trait Handle: Copy + Eq + fmt::Debug {
    fn null() -> Self;

    fn is_null(&self) -> bool {
        *self == Self::null()
    }

    /// Returns the handle as the 64-bit value used for diagnostics.
    fn as_raw(&self) -> u64;
}

macro_rules! impl_handle {
    ($($handle:ident),* $(,)?) => {
        $(
            impl Handle for $handle {
                fn null() -> Self {
                    $handle::null()
                }

                fn as_raw(&self) -> u64 {
                    $handle::as_raw(*self)
                }
            }
        )*
    };
}

impl_handle!(
    Instance,
    Device,
    DeviceMemory,
    Buffer,
    CommandPool,
    CommandBuffer,
    DescriptorPool,
    DescriptorSet,
    SurfaceKHR,
    DebugUtilsMessengerEXT,
    PerformanceConfigurationINTEL,
);

/// Stand-in owner or pool for handles that have none.
///
/// Instances and devices are destroyed on their own; only pool-allocated
/// handles have a pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NoParent;

impl Handle for NoParent {
    fn null() -> Self {
        NoParent
    }

    fn as_raw(&self) -> u64 {
        0
    }
}

/// A handle type that can be owned by a [`Unique`] or a [`Shared`](crate::Shared).
pub trait Resource: Handle {
    /// The handle the release call is issued on, or [`NoParent`].
    type Owner: Handle;
    /// The pool the handle was allocated from, or [`NoParent`].
    type Pool: Handle;
    /// The strategy record this type is released with.
    type Strategy: Copy + fmt::Debug;
    const CATEGORY: ResourceCategory;

    /// Wraps `strategy` in the type-erased [`ReleaseStrategy`].
    fn describe(strategy: &Self::Strategy) -> ReleaseStrategy<Self>;

    /// Issues the release call for `self`.
    ///
    /// Returns `false` without doing anything if the entry point is not
    /// resolved in `dispatch`.
    ///
    /// # Safety
    ///
    /// `self` must be a live, non-null handle owned by the caller and created
    /// through the same owner and pool that `strategy` names.
    unsafe fn release_with(self, dispatch: &DispatchTable, strategy: &Self::Strategy) -> bool;
}

fn allocator_ptr(allocator: Option<&AllocationCallbacks>) -> *const AllocationCallbacks {
    allocator.map_or(ptr::null(), ptr::from_ref)
}

/// What a release call returned: nothing, or a result code worth reporting.
trait ReleaseOutcome {
    fn report(self, handle: &dyn fmt::Debug);
}

impl ReleaseOutcome for () {
    fn report(self, _handle: &dyn fmt::Debug) {}
}

impl ReleaseOutcome for ResultCode {
    fn report(self, handle: &dyn fmt::Debug) {
        if let Err(err) = Error::from_result(self) {
            warn!("Release of {:?} reported {}.", handle, err);
        }
    }
}

macro_rules! resource {
    ($handle:ident: Destroy by $slot:ident) => {
        resource!(@impl $handle, NoParent, NoParent, Destroy, OwnerDestroy<NoParent>,
            |this, dispatch, strategy| match dispatch.$slot {
                Some(destroy) => {
                    ReleaseOutcome::report(
                        unsafe { destroy(this, allocator_ptr(strategy.allocator.as_ref())) },
                        &this,
                    );
                    true
                }
                None => false,
            });
    };
    ($handle:ident: Destroy of $owner:ident by $slot:ident) => {
        resource!(@impl $handle, $owner, NoParent, Destroy, OwnerDestroy<$owner>,
            |this, dispatch, strategy| match dispatch.$slot {
                Some(destroy) => {
                    ReleaseOutcome::report(
                        unsafe {
                            destroy(strategy.owner, this, allocator_ptr(strategy.allocator.as_ref()))
                        },
                        &this,
                    );
                    true
                }
                None => false,
            });
    };
    ($handle:ident: Free of $owner:ident by $slot:ident) => {
        resource!(@impl $handle, $owner, NoParent, Free, OwnerFree<$owner>,
            |this, dispatch, strategy| match dispatch.$slot {
                Some(free) => {
                    ReleaseOutcome::report(
                        unsafe {
                            free(strategy.owner, this, allocator_ptr(strategy.allocator.as_ref()))
                        },
                        &this,
                    );
                    true
                }
                None => false,
            });
    };
    ($handle:ident: Release of $owner:ident by $slot:ident) => {
        resource!(@impl $handle, $owner, NoParent, Release, OwnerRelease<$owner>,
            |this, dispatch, strategy| match dispatch.$slot {
                Some(release) => {
                    ReleaseOutcome::report(unsafe { release(strategy.owner, this) }, &this);
                    true
                }
                None => false,
            });
    };
    ($handle:ident: PoolFree of $owner:ident in $pool:ident by $slot:ident) => {
        resource!(@impl $handle, $owner, $pool, PoolFree, PoolFree<$owner, $pool>,
            |this, dispatch, strategy| match dispatch.$slot {
                Some(free) => {
                    ReleaseOutcome::report(
                        unsafe { free(strategy.owner, strategy.pool, 1, &this) },
                        &this,
                    );
                    true
                }
                None => false,
            });
    };
    (@impl $handle:ident, $owner:ident, $pool:ident, $variant:ident, $strategy_ty:ty,
        |$this:ident, $dispatch:ident, $strategy:ident| $body:expr) => {
        impl Resource for $handle {
            type Owner = $owner;
            type Pool = $pool;
            type Strategy = $strategy_ty;
            const CATEGORY: ResourceCategory = ResourceCategory::$variant;

            fn describe(strategy: &Self::Strategy) -> ReleaseStrategy<Self> {
                ReleaseStrategy::$variant(*strategy)
            }

            unsafe fn release_with(
                self,
                $dispatch: &DispatchTable,
                $strategy: &Self::Strategy,
            ) -> bool {
                let $this = self;
                $body
            }
        }
    };
}

resource!(Instance: Destroy by destroy_instance);
resource!(Device: Destroy by destroy_device);
resource!(SurfaceKHR: Destroy of Instance by destroy_surface_khr);
resource!(DebugUtilsMessengerEXT: Destroy of Instance by destroy_debug_utils_messenger_ext);
resource!(Buffer: Destroy of Device by destroy_buffer);
resource!(CommandPool: Destroy of Device by destroy_command_pool);
resource!(DescriptorPool: Destroy of Device by destroy_descriptor_pool);
resource!(DeviceMemory: Free of Device by free_memory);
resource!(PerformanceConfigurationINTEL: Release of Device by release_performance_configuration_intel);
resource!(CommandBuffer: PoolFree of Device in CommandPool by free_command_buffers);
resource!(DescriptorSet: PoolFree of Device in DescriptorPool by free_descriptor_sets);

/// Releases `handle` through `dispatch`, reporting an unresolved entry point.
///
/// `handle` must be non-null and owned by the caller.
pub(crate) fn release_owned<H: Resource>(
    handle: H,
    strategy: &H::Strategy,
    dispatch: &DispatchTable,
) {
    trace!("Releasing {:?} ({:?}).", handle, H::CATEGORY);
    let released = unsafe { handle.release_with(dispatch, strategy) };
    if !released {
        error!(
            "Cannot release {:?}: its {:?} entry point is not resolved; the handle leaks.",
            handle,
            H::CATEGORY
        );
    }
    debug_assert!(
        released,
        "released {handle:?} through an unresolved entry point"
    );
}

/// Exclusive owner of a single native handle.
///
/// `Unique` cannot be copied or cloned: ownership moves with the value, and
/// the moved-from binding is statically unusable, so it can never release
/// the handle a second time. Dropping a `Unique` releases the handle it
/// holds unless it is null.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use vkbind::{DispatchTable, Loader, OwnerDestroy, Unique};
/// use vkbind_sys::{Buffer, Device};
///
/// # fn run(device: Device, buffer: Buffer) -> vkbind::Result<()> {
/// let dispatch = Arc::new(DispatchTable::load(Arc::new(Loader::new()?))?);
/// let buffer = Unique::new(
///     buffer,
///     OwnerDestroy {
///         owner: device,
///         allocator: None,
///     },
///     dispatch,
/// );
/// // vkDestroyBuffer runs here.
/// drop(buffer);
/// # Ok(())
/// # }
/// ```
///
/// Ownership moves; the old binding cannot be used afterwards:
///
/// ```compile_fail
/// # use vkbind::Unique;
/// # use vkbind_sys::Buffer;
/// # fn transfer(buffer: Unique<Buffer>) {
/// let moved = buffer;
/// let again = buffer;
/// # }
/// ```
#[derive(Debug)]
pub struct Unique<H: Resource> {
    handle: H,
    strategy: H::Strategy,
    dispatch: Arc<DispatchTable>,
}

impl<H: Resource> Unique<H> {
    /// Takes ownership of `handle`.
    pub fn new(handle: H, strategy: H::Strategy, dispatch: Arc<DispatchTable>) -> Self {
        Self {
            handle,
            strategy,
            dispatch,
        }
    }

    /// Returns the owned handle without giving up ownership.
    pub fn get(&self) -> H {
        self.handle
    }

    /// Gives write access to the stored handle, for APIs that fill it in.
    ///
    /// Overwriting a non-null value through this reference leaks it.
    pub fn get_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn strategy(&self) -> ReleaseStrategy<H> {
        H::describe(&self.strategy)
    }

    pub fn dispatch(&self) -> &Arc<DispatchTable> {
        &self.dispatch
    }

    /// Replaces the owned handle, releasing the previous one.
    ///
    /// Nothing is released if `handle` equals the current value or if the
    /// current value is null.
    pub fn reset(&mut self, handle: H) {
        if self.handle == handle {
            return;
        }
        let previous = mem::replace(&mut self.handle, handle);
        if !previous.is_null() {
            release_owned(previous, &self.strategy, &self.dispatch);
        }
    }

    /// Gives up ownership and returns the handle without releasing it.
    ///
    /// The wrapper is left holding null.
    #[must_use = "the returned handle is no longer released automatically"]
    pub fn release(&mut self) -> H {
        mem::replace(&mut self.handle, H::null())
    }

    /// Consumes the wrapper and returns the handle without releasing it.
    #[must_use = "the returned handle is no longer released automatically"]
    pub fn into_inner(mut self) -> H {
        self.release()
    }

    /// Splits the wrapper without releasing the handle.
    pub(crate) fn into_parts(mut self) -> (H, H::Strategy, Arc<DispatchTable>) {
        let handle = self.release();
        (handle, self.strategy, self.dispatch.clone())
    }
}

impl<H: Resource> std::ops::Deref for Unique<H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.handle
    }
}

impl<H: Resource> Drop for Unique<H> {
    fn drop(&mut self) {
        self.reset(H::null());
    }
}

/// Copies the raw handles out of a batch of owners, keeping ownership.
pub fn unique_to_raw<H: Resource>(handles: &[Unique<H>]) -> Vec<H> {
    handles.iter().map(Unique::get).collect()
}
