// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Type-checked structure chains.
//!
//! A [`StructureChain`] owns a tuple of records whose first element is the
//! head. Every other element must implement [`Extends`] for the head type,
//! and a record type may only appear more than once if it opts in through
//! [`TaggedStructure::ALLOW_DUPLICATE`]. Both rules are checked at compile
//! time.
//!
//! The logical topology lives in an index table, not in the records
//! themselves. The records sit in one heap allocation that never moves, and
//! their `p_next` fields are rewritten from the index table whenever it
//! changes, so moving a chain keeps every pointer valid and cloning one only
//! has to copy the table and rewrite the pointers for the new allocation.
//!
//! # Examples
//!
//! ```
//! use vkbind::StructureChain;
//! use vkbind_sys::{
//!     DeviceCreateInfo, PhysicalDevice16BitStorageFeatures,
//!     PhysicalDeviceVariablePointersFeatures, TRUE,
//! };
//!
//! let mut chain = StructureChain::<(
//!     DeviceCreateInfo,
//!     PhysicalDeviceVariablePointersFeatures,
//!     PhysicalDevice16BitStorageFeatures,
//! )>::default();
//! chain
//!     .get_mut::<PhysicalDeviceVariablePointersFeatures>()
//!     .variable_pointers = TRUE;
//!
//! // Leave the 16-bit storage features out of this request.
//! chain.unlink::<PhysicalDevice16BitStorageFeatures>();
//! assert!(!chain.is_linked::<PhysicalDevice16BitStorageFeatures>());
//!
//! let create_info = chain.as_ptr(); // hand this to vkCreateDevice
//! # let _ = create_info;
//! ```
//!
//! Chains that break the extension rules do not compile:
//!
//! ```compile_fail
//! use vkbind::StructureChain;
//! use vkbind_sys::{DeviceCreateInfo, ValidationFeaturesEXT};
//!
//! // ValidationFeaturesEXT extends InstanceCreateInfo, not DeviceCreateInfo.
//! let chain = StructureChain::<(DeviceCreateInfo, ValidationFeaturesEXT)>::default();
//! ```
//!
//! ```compile_fail
//! use vkbind::StructureChain;
//! use vkbind_sys::{DeviceCreateInfo, PhysicalDeviceVariablePointersFeatures};
//!
//! // The head must come first.
//! let chain =
//!     StructureChain::<(PhysicalDeviceVariablePointersFeatures, DeviceCreateInfo)>::default();
//! ```
//!
//! ```compile_fail
//! use vkbind::StructureChain;
//! use vkbind_sys::{DeviceCreateInfo, PhysicalDeviceVariablePointersFeatures};
//!
//! // PhysicalDeviceVariablePointersFeatures does not allow duplicates.
//! let chain = StructureChain::<(
//!     DeviceCreateInfo,
//!     PhysicalDeviceVariablePointersFeatures,
//!     PhysicalDeviceVariablePointersFeatures,
//! )>::default();
//! ```
//!
//! Addressing a type the chain does not declare, or unlinking the head, is
//! rejected too:
//!
//! ```compile_fail
//! use vkbind::StructureChain;
//! use vkbind_sys::{DeviceCreateInfo, DevicePrivateDataCreateInfo, PhysicalDeviceVariablePointersFeatures};
//!
//! let chain = StructureChain::<(DeviceCreateInfo, PhysicalDeviceVariablePointersFeatures)>::default();
//! let _ = chain.get::<DevicePrivateDataCreateInfo>();
//! ```
//!
//! ```compile_fail
//! use vkbind::StructureChain;
//! use vkbind_sys::{DeviceCreateInfo, PhysicalDeviceVariablePointersFeatures};
//!
//! let mut chain = StructureChain::<(DeviceCreateInfo, PhysicalDeviceVariablePointersFeatures)>::default();
//! chain.unlink::<DeviceCreateInfo>();
//! ```

use std::{
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
    ptr,
    ptr::NonNull,
};

use vkbind_sys::{BaseOutStructure, StructureType};

/// A record that starts with an `s_type` tag followed by a `p_next` link.
///
/// # Safety
///
/// The implementing type must be `#[repr(C)]` with a layout starting like
/// [`BaseOutStructure`], and [`Self::STRUCTURE_TYPE`] must not be shared
/// with any other implementing type: chains find elements by their tag and
/// cast accordingly.
pub unsafe trait TaggedStructure: Sized {
    /// The tag identifying this record type.
    const STRUCTURE_TYPE: StructureType;
    /// Whether a chain may contain this record type more than once.
    const ALLOW_DUPLICATE: bool = false;
}

/// Declares that `Self` may be chained behind the head record `Head`.
pub trait Extends<Head: TaggedStructure>: TaggedStructure {}

/// Compile-time description of one declared chain element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Member {
    pub structure_type: StructureType,
    pub allow_duplicate: bool,
}

impl Member {
    pub const fn of<T: TaggedStructure>() -> Self {
        Self {
            structure_type: T::STRUCTURE_TYPE,
            allow_duplicate: T::ALLOW_DUPLICATE,
        }
    }
}

/// A tuple of records that can form a [`StructureChain`].
///
/// Implemented for tuples of one to eight records whose first element is
/// the head and whose remaining elements all extend it.
///
/// # Safety
///
/// [`Self::MEMBERS`] must describe the tuple's elements in order, and
/// [`Self::element`] must return a pointer to the element at `index`.
pub unsafe trait ChainElements: Sized {
    /// The head record type, element 0.
    type Head: TaggedStructure;
    /// One optional `next` index per element.
    type Links: AsRef<[Option<usize>]> + AsMut<[Option<usize>]> + Copy + fmt::Debug;

    /// The declared element types, in declaration order.
    const MEMBERS: &'static [Member];

    /// Links visiting every element in declaration order.
    fn linear_links() -> Self::Links;

    /// Returns a pointer to the element at `index` without creating a reference.
    ///
    /// # Safety
    ///
    /// `base` must point to a live tuple and `index` must be in range.
    unsafe fn element(base: *mut Self, index: usize) -> *mut BaseOutStructure;
}

macro_rules! impl_chain_elements {
    ($len:literal; $head:ident $(, $index:tt: $ext:ident)*) => {
        unsafe impl<$head: TaggedStructure $(, $ext: Extends<$head>)*> ChainElements
            for ($head, $($ext,)*)
        {
            type Head = $head;
            type Links = [Option<usize>; $len];

            const MEMBERS: &'static [Member] = &[Member::of::<$head>() $(, Member::of::<$ext>())*];

            fn linear_links() -> Self::Links {
                let mut links = [None; $len];
                for (index, link) in links.iter_mut().enumerate().take($len - 1) {
                    *link = Some(index + 1);
                }
                links
            }

            unsafe fn element(base: *mut Self, index: usize) -> *mut BaseOutStructure {
                unsafe {
                    match index {
                        0 => ptr::addr_of_mut!((*base).0).cast(),
                        $($index => ptr::addr_of_mut!((*base).$index).cast(),)*
                        _ => unreachable!("chain element index {index} out of range"),
                    }
                }
            }
        }
    };
}

impl_chain_elements!(1; H);
impl_chain_elements!(2; H, 1: A);
impl_chain_elements!(3; H, 1: A, 2: B);
impl_chain_elements!(4; H, 1: A, 2: B, 3: C);
impl_chain_elements!(5; H, 1: A, 2: B, 3: C, 4: D);
impl_chain_elements!(6; H, 1: A, 2: B, 3: C, 4: D, 5: E);
impl_chain_elements!(7; H, 1: A, 2: B, 3: C, 4: D, 5: E, 6: F);
impl_chain_elements!(8; H, 1: A, 2: B, 3: C, 4: D, 5: E, 6: F, 7: G);

const fn has_forbidden_duplicate(members: &[Member]) -> bool {
    let mut index = 1;
    while index < members.len() {
        if !members[index].allow_duplicate {
            let mut earlier = 1;
            while earlier < index {
                if members[earlier].structure_type.as_raw()
                    == members[index].structure_type.as_raw()
                {
                    return true;
                }
                earlier += 1;
            }
        }
        index += 1;
    }
    false
}

const fn position(members: &[Member], structure_type: StructureType, which: usize) -> usize {
    let mut remaining = which;
    let mut index = 0;
    while index < members.len() {
        if members[index].structure_type.as_raw() == structure_type.as_raw() {
            if remaining == 0 {
                return index;
            }
            remaining -= 1;
        }
        index += 1;
    }
    panic!("the requested structure is not part of this chain");
}

const fn non_head(index: usize) -> usize {
    assert!(index != 0, "the head of a structure chain cannot be unlinked or relinked");
    index
}

/// An owned, linked chain of records anchored at a head record.
///
/// Elements are addressed by type. When a type appears more than once, the
/// `*_nth` variants take a zero-based occurrence index; the plain variants
/// address the first occurrence.
pub struct StructureChain<C: ChainElements> {
    elements: NonNull<C>,
    links: C::Links,
    _owned: PhantomData<C>,
}

impl<C: ChainElements> StructureChain<C> {
    /// Builds a chain from the given records, linked in declaration order.
    ///
    /// Each element's `s_type` is set to its declared tag; incoming `p_next`
    /// values are overwritten.
    pub fn new(elements: C) -> Self {
        const {
            assert!(
                !has_forbidden_duplicate(C::MEMBERS),
                "a structure type appears twice in the chain but does not allow duplicates"
            )
        };
        let elements = NonNull::from(Box::leak(Box::new(elements)));
        let mut chain = Self {
            elements,
            links: C::linear_links(),
            _owned: PhantomData,
        };
        for (index, member) in C::MEMBERS.iter().enumerate() {
            unsafe { (*chain.element(index)).s_type = member.structure_type };
        }
        chain.write_links();
        chain
    }

    /// Returns all elements at once, in declaration order.
    pub fn elements(&self) -> &C {
        unsafe { self.elements.as_ref() }
    }

    pub fn head(&self) -> &C::Head {
        unsafe { &*self.element(0).cast::<C::Head>() }
    }

    pub fn head_mut(&mut self) -> ElementMut<'_, C::Head> {
        ElementMut::new(self.element(0))
    }

    /// Returns the first element of type `T`.
    pub fn get<T: TaggedStructure>(&self) -> &T {
        self.get_nth::<T, 0>()
    }

    /// Returns occurrence `WHICH` of type `T`.
    pub fn get_nth<T: TaggedStructure, const WHICH: usize>(&self) -> &T {
        let index = const { position(C::MEMBERS, T::STRUCTURE_TYPE, WHICH) };
        unsafe { &*self.element(index).cast::<T>() }
    }

    /// Returns the first element of type `T` for modification.
    ///
    /// The record may be overwritten wholesale through the guard; its tag and
    /// link are put back when the guard is dropped.
    pub fn get_mut<T: TaggedStructure>(&mut self) -> ElementMut<'_, T> {
        self.get_nth_mut::<T, 0>()
    }

    pub fn get_nth_mut<T: TaggedStructure, const WHICH: usize>(&mut self) -> ElementMut<'_, T> {
        let index = const { position(C::MEMBERS, T::STRUCTURE_TYPE, WHICH) };
        ElementMut::new(self.element(index))
    }

    /// Replaces the first element of type `T`, keeping its place in the chain.
    pub fn assign<T: TaggedStructure>(&mut self, value: T) -> &mut Self {
        self.assign_nth::<T, 0>(value)
    }

    pub fn assign_nth<T: TaggedStructure, const WHICH: usize>(&mut self, value: T) -> &mut Self {
        let index = const { position(C::MEMBERS, T::STRUCTURE_TYPE, WHICH) };
        let element = self.element(index);
        unsafe {
            let next = (*element).p_next;
            *element.cast::<T>() = value;
            (*element).s_type = T::STRUCTURE_TYPE;
            (*element).p_next = next;
        }
        self
    }

    /// Returns whether the first element of type `T` is reachable from the head.
    pub fn is_linked<T: TaggedStructure>(&self) -> bool {
        self.is_linked_nth::<T, 0>()
    }

    pub fn is_linked_nth<T: TaggedStructure, const WHICH: usize>(&self) -> bool {
        let index = const { position(C::MEMBERS, T::STRUCTURE_TYPE, WHICH) };
        index == 0 || self.predecessor(index).is_some()
    }

    /// Removes the first element of type `T` from the chain, keeping its storage.
    ///
    /// # Panics
    ///
    /// Panics if the element is not currently linked.
    pub fn unlink<T: TaggedStructure>(&mut self) {
        self.unlink_nth::<T, 0>()
    }

    pub fn unlink_nth<T: TaggedStructure, const WHICH: usize>(&mut self) {
        let index = const { non_head(position(C::MEMBERS, T::STRUCTURE_TYPE, WHICH)) };
        let Some(predecessor) = self.predecessor(index) else {
            panic!(
                "cannot unlink {:?} #{}: it is not linked into this chain",
                T::STRUCTURE_TYPE,
                WHICH
            );
        };
        let links = self.links.as_mut();
        links[predecessor] = links[index];
        self.write_link(predecessor);
    }

    /// Puts an unlinked element of type `T` back, directly behind the head.
    ///
    /// # Panics
    ///
    /// Panics if the element is already linked.
    pub fn relink<T: TaggedStructure>(&mut self) {
        self.relink_nth::<T, 0>()
    }

    pub fn relink_nth<T: TaggedStructure, const WHICH: usize>(&mut self) {
        let index = const { non_head(position(C::MEMBERS, T::STRUCTURE_TYPE, WHICH)) };
        assert!(
            self.predecessor(index).is_none(),
            "cannot relink {:?} #{}: it is already linked into this chain",
            T::STRUCTURE_TYPE,
            WHICH
        );
        let links = self.links.as_mut();
        links[index] = links[0];
        links[0] = Some(index);
        self.write_link(index);
        self.write_link(0);
    }

    /// Returns the tags of the linked elements, head first.
    pub fn linked_types(&self) -> Vec<StructureType> {
        let links = self.links.as_ref();
        let mut types = vec![C::MEMBERS[0].structure_type];
        let mut current = 0;
        while let Some(next) = links[current] {
            types.push(C::MEMBERS[next].structure_type);
            current = next;
        }
        types
    }

    /// Returns a pointer to the head, suitable for passing to a native call.
    pub fn as_ptr(&self) -> *const C::Head {
        self.element(0).cast_const().cast()
    }

    /// Returns a mutable pointer to the head for calls that fill the chain.
    ///
    /// The callee may write the records' payloads but must leave every
    /// `p_next` as it found it.
    pub fn as_mut_ptr(&mut self) -> *mut C::Head {
        self.element(0).cast()
    }

    fn element(&self, index: usize) -> *mut BaseOutStructure {
        unsafe { C::element(self.elements.as_ptr(), index) }
    }

    fn predecessor(&self, target: usize) -> Option<usize> {
        let links = self.links.as_ref();
        let mut current = 0;
        while let Some(next) = links[current] {
            if next == target {
                return Some(current);
            }
            current = next;
        }
        None
    }

    fn write_link(&mut self, index: usize) {
        let next = match self.links.as_ref()[index] {
            Some(next) => self.element(next),
            None => ptr::null_mut(),
        };
        unsafe { (*self.element(index)).p_next = next };
    }

    fn write_links(&mut self) {
        for index in 0..C::MEMBERS.len() {
            self.write_link(index);
        }
    }
}

/// Write access to one element of a [`StructureChain`].
///
/// Dereferences to the record. On drop the record's `s_type` and `p_next`
/// are restored, so the chain's path stays intact even if the record was
/// replaced as a whole.
pub struct ElementMut<'a, T: TaggedStructure> {
    element: &'a mut T,
    next: *mut BaseOutStructure,
}

impl<'a, T: TaggedStructure> ElementMut<'a, T> {
    fn new(element: *mut BaseOutStructure) -> Self {
        // Callers hold `&mut StructureChain` for 'a, and `element` points into
        // its allocation.
        let next = unsafe { (*element).p_next };
        Self {
            element: unsafe { &mut *element.cast::<T>() },
            next,
        }
    }
}

impl<T: TaggedStructure> Deref for ElementMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.element
    }
}

impl<T: TaggedStructure> DerefMut for ElementMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.element
    }
}

impl<T: TaggedStructure> Drop for ElementMut<'_, T> {
    fn drop(&mut self) {
        let base = ptr::from_mut(&mut *self.element).cast::<BaseOutStructure>();
        unsafe {
            (*base).s_type = T::STRUCTURE_TYPE;
            (*base).p_next = self.next;
        }
    }
}

impl<T: TaggedStructure + fmt::Debug> fmt::Debug for ElementMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.element, f)
    }
}

impl<C: ChainElements + Default> Default for StructureChain<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: ChainElements> From<C> for StructureChain<C> {
    fn from(elements: C) -> Self {
        Self::new(elements)
    }
}

impl<C: ChainElements + Clone> Clone for StructureChain<C> {
    fn clone(&self) -> Self {
        let elements = NonNull::from(Box::leak(Box::new(self.elements().clone())));
        let mut chain = Self {
            elements,
            links: self.links,
            _owned: PhantomData,
        };
        chain.write_links();
        chain
    }
}

impl<C: ChainElements> Drop for StructureChain<C> {
    fn drop(&mut self) {
        drop(unsafe { Box::from_raw(self.elements.as_ptr()) });
    }
}

impl<C: ChainElements> fmt::Debug for StructureChain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureChain")
            .field("linked", &self.linked_types())
            .finish_non_exhaustive()
    }
}
