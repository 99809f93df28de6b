// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for vkbind operations.
//!
//! This module maps native result codes to an idiomatic Rust error enum and
//! adds the failures that happen on the Rust side of the boundary (opening
//! the library, converting names).
//!
//! Broken call contracts (unlinking an element that is not linked, releasing
//! through the wrong strategy, an unresolved bootstrap resolver) are not
//! represented here: they panic.

use vkbind_sys::ResultCode;

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when using vkbind.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A negative result code without a dedicated variant.
    #[error("Unknown error: {0:?}")]
    Unknown(ResultCode),

    /// A host memory allocation failed.
    #[error("Out of host memory")]
    OutOfHostMemory,

    /// A device memory allocation failed.
    #[error("Out of device memory")]
    OutOfDeviceMemory,

    /// Initialization of an object could not be completed.
    #[error("Initialization failed")]
    InitializationFailed,

    /// The logical or physical device has been lost.
    #[error("Device lost")]
    DeviceLost,

    /// A requested layer is not present or could not be loaded.
    #[error("Layer not present")]
    LayerNotPresent,

    /// A requested extension is not supported.
    #[error("Extension not present")]
    ExtensionNotPresent,

    /// A requested feature is not supported.
    #[error("Feature not present")]
    FeatureNotPresent,

    /// The requested API version is not supported by the driver.
    #[error("Incompatible driver")]
    IncompatibleDriver,

    /// Too many objects of the type have already been created.
    #[error("Too many objects")]
    TooManyObjects,

    /// A pool allocation failed because the pool is exhausted.
    #[error("Out of pool memory")]
    OutOfPoolMemory,

    /// None of the candidate libraries could be opened.
    #[error("No loadable library among {candidates:?}")]
    LibraryNotFound {
        /// The names or paths that were tried, in order.
        candidates: Vec<String>,
    },

    /// A symbol needed to bootstrap the dispatch table is missing from the library.
    #[error("Missing entry point: {0}")]
    MissingEntryPoint(&'static str),

    /// A generic error for Rust-level failures not tied to a result code.
    #[error("Other error: {0}")]
    Other(String),

    /// Failed to convert a Rust string to a C-compatible null-terminated string.
    #[error("Null string: {0}")]
    NulString(#[from] std::ffi::NulError),

    /// Failed to load or interact with the dynamic library.
    #[error("Loading library: {0}")]
    LibLoading(#[from] libloading::Error),
}

impl Error {
    /// Converts a native result code to a Rust [`Result`].
    ///
    /// Success codes (`SUCCESS`, `INCOMPLETE`, `NOT_READY`, ...) are all
    /// non-negative and map to `Ok(())`; the caller inspects the raw code if
    /// it needs to tell them apart.
    ///
    /// # Examples
    ///
    /// ```
    /// use vkbind::Error;
    /// use vkbind_sys::ResultCode;
    ///
    /// assert!(Error::from_result(ResultCode::INCOMPLETE).is_ok());
    /// assert!(matches!(
    ///     Error::from_result(ResultCode::ERROR_DEVICE_LOST),
    ///     Err(Error::DeviceLost)
    /// ));
    /// ```
    pub fn from_result(code: ResultCode) -> Result<()> {
        if code.as_raw() >= 0 {
            return Ok(());
        }
        Err(match code {
            ResultCode::ERROR_OUT_OF_HOST_MEMORY => Error::OutOfHostMemory,
            ResultCode::ERROR_OUT_OF_DEVICE_MEMORY => Error::OutOfDeviceMemory,
            ResultCode::ERROR_INITIALIZATION_FAILED => Error::InitializationFailed,
            ResultCode::ERROR_DEVICE_LOST => Error::DeviceLost,
            ResultCode::ERROR_LAYER_NOT_PRESENT => Error::LayerNotPresent,
            ResultCode::ERROR_EXTENSION_NOT_PRESENT => Error::ExtensionNotPresent,
            ResultCode::ERROR_FEATURE_NOT_PRESENT => Error::FeatureNotPresent,
            ResultCode::ERROR_INCOMPATIBLE_DRIVER => Error::IncompatibleDriver,
            ResultCode::ERROR_TOO_MANY_OBJECTS => Error::TooManyObjects,
            ResultCode::ERROR_OUT_OF_POOL_MEMORY => Error::OutOfPoolMemory,
            other => Error::Unknown(other),
        })
    }
}
