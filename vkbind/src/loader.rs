// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Dynamic loading of the Vulkan loader library.

use std::{
    ffi::{CStr, OsStr},
    path::Path,
};

use tracing::{debug, info};

use crate::{Error, Result, config};

/// An opened loader library.
///
/// The library stays mapped for as long as the `Loader` lives. Entry points
/// obtained through it, directly or through a [`crate::DispatchTable`]
/// created by [`crate::DispatchTable::load`], must not outlive it.
#[derive(Debug)]
pub struct Loader {
    library: libloading::Library,
    name: String,
}

impl Loader {
    /// Opens the first loadable library among [`config::library_candidates`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryNotFound`] if none of the candidates opens.
    pub fn new() -> Result<Self> {
        let candidates = config::library_candidates();
        for candidate in &candidates {
            match Self::open(candidate) {
                Ok(loader) => return Ok(loader),
                Err(error) => debug!("Could not open \"{}\": {}", candidate.display(), error),
            }
        }
        Err(Error::LibraryNotFound {
            candidates: candidates
                .iter()
                .map(|candidate| candidate.display().to_string())
                .collect(),
        })
    }

    /// Opens an explicit library by name or path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibLoading`] if the library cannot be opened.
    pub fn open<P: AsRef<OsStr>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // Loading runs the library's initializers; that is the contract of
        // opening a loader library at all.
        let library = unsafe { libloading::Library::new(path)? };
        let name = Path::new(path).display().to_string();
        info!("Opened loader library \"{}\".", name);
        Ok(Self { library, name })
    }

    /// Returns the name or path the library was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an exported symbol, returning `None` if it is absent.
    ///
    /// # Safety
    ///
    /// `F` must be the function pointer type matching the symbol's real
    /// signature, and the returned pointer must not outlive `self`.
    pub unsafe fn get_proc_address<F: Copy>(&self, name: &CStr) -> Option<F> {
        unsafe {
            self.library
                .get::<F>(name.to_bytes_with_nul())
                .ok()
                .map(|symbol| *symbol)
        }
    }
}
