// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration for locating the Vulkan loader library.
//!
//! The candidates are tried in order by [`crate::Loader::new`]. Setting
//! [`LIBRARY_ENV_VAR`] replaces the platform defaults with a single explicit
//! name or path.

use std::path::PathBuf;

/// Environment variable naming the library to load instead of the defaults.
pub const LIBRARY_ENV_VAR: &str = "VKBIND_LIBRARY";

/// Returns the platform's default loader library names, most preferred first.
#[cfg(windows)]
pub fn default_library_names() -> &'static [&'static str] {
    &["vulkan-1.dll"]
}

/// Returns the platform's default loader library names, most preferred first.
///
/// Apps shipped as frameworks cannot carry bare dylibs, and modern macOS no
/// longer searches `/usr/local/lib` on its own, hence the longer list.
#[cfg(target_os = "macos")]
pub fn default_library_names() -> &'static [&'static str] {
    &[
        "libvulkan.dylib",
        "libvulkan.1.dylib",
        "libMoltenVK.dylib",
        "vulkan.framework/vulkan",
        "MoltenVK.framework/MoltenVK",
        "/usr/local/lib/libvulkan.dylib",
    ]
}

/// Returns the platform's default loader library names, most preferred first.
#[cfg(all(not(windows), not(target_os = "macos")))]
pub fn default_library_names() -> &'static [&'static str] {
    &["libvulkan.so", "libvulkan.so.1"]
}

/// Returns the library candidates to try, honoring [`LIBRARY_ENV_VAR`].
///
/// # Examples
///
/// ```no_run
/// use vkbind::config::library_candidates;
///
/// for candidate in library_candidates() {
///     println!("would try {}", candidate.display());
/// }
/// ```
pub fn library_candidates() -> Vec<PathBuf> {
    match std::env::var_os(LIBRARY_ENV_VAR) {
        Some(path) if !path.is_empty() => vec![PathBuf::from(path)],
        _ => default_library_names()
            .iter()
            .map(PathBuf::from)
            .collect(),
    }
}
