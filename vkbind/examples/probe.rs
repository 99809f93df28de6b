// SPDX-FileCopyrightText: 2025 Contributors to the vkbind project.
// SPDX-License-Identifier: Apache-2.0

//! Reports which entry points the installed Vulkan loader provides.
//!
//! Without `--create-instance` only the global commands are resolved. With
//! it, a throwaway instance is created so the instance and device tiers can
//! be resolved too; the instance is destroyed again on exit.
//!
//! ```text
//! cargo run --example probe -- --create-instance --pretty
//! ```

mod common;

use std::{ffi::CString, ptr, sync::Arc};

use clap::Parser;
use tracing::{info, warn};
use vkbind::{DispatchTable, Error, Loader, NoParent, OwnerDestroy, StructureChain, Unique};
use vkbind_sys::{ApplicationInfo, Instance, InstanceCreateInfo, ValidationFeaturesEXT};

#[derive(Debug, Parser)]
#[command(version, about = "Print the entry point resolution report as JSON")]
struct Args {
    /// Library to load instead of the platform defaults.
    #[arg(long, env = vkbind::config::LIBRARY_ENV_VAR)]
    library: Option<String>,

    /// Create an instance and resolve the instance-level commands as well.
    #[arg(long)]
    create_instance: bool,

    /// Only list entry points that could not be resolved.
    #[arg(long)]
    unavailable: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,

    /// Log more on stderr; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    common::setup_logging(args.verbose);

    let loader = match &args.library {
        Some(library) => Loader::open(library)?,
        None => Loader::new()?,
    };
    let mut dispatch = DispatchTable::load(Arc::new(loader))?;

    let instance = if args.create_instance {
        let instance = create_instance(&dispatch)?;
        unsafe { dispatch.init_instance(instance) };
        Some(instance)
    } else {
        None
    };

    let dispatch = Arc::new(dispatch);
    // The table is shared once its last phase has run; wrap the instance after.
    let _instance = instance.map(|instance| {
        Unique::new(
            instance,
            OwnerDestroy {
                owner: NoParent,
                allocator: None,
            },
            dispatch.clone(),
        )
    });

    let mut summary = dispatch.summary();
    if args.unavailable {
        summary.entries.retain(|entry| !entry.resolved);
    }
    let report = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{report}");
    Ok(())
}

fn create_instance(dispatch: &DispatchTable) -> Result<Instance, Error> {
    let Some(create) = dispatch.create_instance else {
        return Err(Error::MissingEntryPoint("vkCreateInstance"));
    };

    let application_name = CString::new("vkbind-probe")?;
    let application = ApplicationInfo {
        p_application_name: application_name.as_ptr(),
        api_version: 1 << 22,
        ..Default::default()
    };
    let mut chain = StructureChain::<(InstanceCreateInfo, ValidationFeaturesEXT)>::default();
    chain.head_mut().p_application_info = &application;
    // Validation features only mean something with the validation layer.
    chain.unlink::<ValidationFeaturesEXT>();

    let mut instance = Instance::null();
    let result = unsafe { create(chain.as_ptr(), ptr::null(), &mut instance) };
    if let Err(error) = Error::from_result(result) {
        warn!("vkCreateInstance failed: {}", error);
        return Err(error);
    }
    info!("Created instance {:?}.", instance);
    Ok(instance)
}
