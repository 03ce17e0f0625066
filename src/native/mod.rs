//! Native Module
//!
//! Delivers encoded commands to the engine's single exported function.
//!
//! ## Responsibilities
//! - Pick the library artifact for the process pointer width
//! - Load it once per process and resolve the entry point
//! - Serialize calls into the (non-reentrant) engine

mod library;

use std::ffi::CStr;

use once_cell::sync::OnceCell;

use crate::config::Config;
use crate::error::Result;

pub use library::{EntryPoint, NativeLibrary};

/// Anything that can execute an encoded command.
///
/// The engine writes a null-terminated response into `response` and returns
/// its status: 1 = success, 0 = busy, < 0 = error.
pub trait NativeEngine {
    fn call(&self, command: &CStr, response: &mut [u8]) -> i32;
}

impl<T: NativeEngine + ?Sized> NativeEngine for &T {
    fn call(&self, command: &CStr, response: &mut [u8]) -> i32 {
        (**self).call(command, response)
    }
}

/// Process-wide library handle, loaded on first use and never unloaded
static LIBRARY: OnceCell<NativeLibrary> = OnceCell::new();

/// Get the process-wide library, loading it on first use.
///
/// Only the config of the first successful call is used for loading; later
/// configs get the already loaded library. A failed load is retried on the
/// next call.
pub fn global(config: &Config) -> Result<&'static NativeLibrary> {
    if let Some(library) = LIBRARY.get() {
        return Ok(library);
    }
    LIBRARY.get_or_try_init(|| NativeLibrary::open(config))
}
