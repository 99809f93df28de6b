// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Reference-counted ownership of native handles.
//!
//! A [`Shared`] is released once, when its last clone is dropped. A handle
//! created through [`Shared::with_parent`] also holds a reference to the
//! `Shared` of its owner, so a device outlives every buffer made from it
//! even if the caller drops the device first.
//!
//! Like [`Unique`], a `Shared` belongs to one thread: its release context may
//! carry raw allocator pointers.

use std::{fmt, ops::Deref, rc::Rc, sync::Arc};

use crate::{DispatchTable, ReleaseStrategy, Resource, Unique, handle::release_owned};

struct Owned<H: Resource> {
    handle: H,
    strategy: H::Strategy,
    dispatch: Arc<DispatchTable>,
    // Dropped after the handle is released.
    parent: Option<Rc<dyn fmt::Debug>>,
}

impl<H: Resource> Drop for Owned<H> {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            release_owned(self.handle, &self.strategy, &self.dispatch);
        }
    }
}

impl<H: Resource> fmt::Debug for Owned<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("handle", &self.handle)
            .field("strategy", &self.strategy)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

/// Shared owner of a single native handle.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use vkbind::{DispatchTable, NoParent, OwnerDestroy, Shared};
/// use vkbind_sys::{Buffer, Device};
///
/// # fn run(dispatch: Arc<DispatchTable>, device: Device, buffer: Buffer) {
/// let device = Shared::new(device, OwnerDestroy { owner: NoParent, allocator: None }, dispatch);
/// let buffer = Shared::with_parent(
///     buffer,
///     OwnerDestroy { owner: *device, allocator: None },
///     &device,
/// );
/// drop(device);
/// // vkDestroyBuffer runs first, then vkDestroyDevice.
/// drop(buffer);
/// # }
/// ```
pub struct Shared<H: Resource> {
    owned: Rc<Owned<H>>,
}

impl<H: Resource> Shared<H> {
    /// Takes ownership of `handle`.
    pub fn new(handle: H, strategy: H::Strategy, dispatch: Arc<DispatchTable>) -> Self {
        Self {
            owned: Rc::new(Owned {
                handle,
                strategy,
                dispatch,
                parent: None,
            }),
        }
    }

    /// Takes ownership of `handle` and keeps `parent` alive until it is
    /// released.
    ///
    /// The release call uses the parent's dispatch table.
    ///
    /// # Panics
    ///
    /// Panics if `strategy` names an owner other than `parent`.
    pub fn with_parent(handle: H, strategy: H::Strategy, parent: &Shared<H::Owner>) -> Self
    where
        H::Owner: Resource + 'static,
    {
        let owner = H::describe(&strategy).owner();
        assert_eq!(
            owner,
            parent.get(),
            "{handle:?} is released through {owner:?}, not through its parent"
        );
        let keep_alive: Rc<dyn fmt::Debug> = parent.owned.clone();
        Self {
            owned: Rc::new(Owned {
                handle,
                strategy,
                dispatch: parent.dispatch().clone(),
                parent: Some(keep_alive),
            }),
        }
    }

    pub fn get(&self) -> H {
        self.owned.handle
    }

    pub fn is_null(&self) -> bool {
        self.owned.handle.is_null()
    }

    pub fn strategy(&self) -> ReleaseStrategy<H> {
        H::describe(&self.owned.strategy)
    }

    pub fn dispatch(&self) -> &Arc<DispatchTable> {
        &self.owned.dispatch
    }

    /// Returns how many `Shared` values, clones and children included, refer
    /// to this handle.
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.owned)
    }
}

impl<H: Resource> Clone for Shared<H> {
    fn clone(&self) -> Self {
        Self {
            owned: Rc::clone(&self.owned),
        }
    }
}

impl<H: Resource> Deref for Shared<H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.owned.handle
    }
}

impl<H: Resource> fmt::Debug for Shared<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.owned, f)
    }
}

impl<H: Resource> From<Unique<H>> for Shared<H> {
    fn from(unique: Unique<H>) -> Self {
        let (handle, strategy, dispatch) = unique.into_parts();
        Self::new(handle, strategy, dispatch)
    }
}
