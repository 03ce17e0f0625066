//! Native library loading and entry point lookup.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use parking_lot::Mutex;

use super::NativeEngine;
use crate::config::Config;
use crate::error::{Result, SmpError};

/// Exported command function:
/// `int SoundMexPro(const char* command, char* response, int response_size)`
pub type EntryPoint = unsafe extern "C" fn(*const c_char, *mut c_char, c_int) -> c_int;

/// The loaded engine library and its resolved entry point.
pub struct NativeLibrary {
    /// Resolved command function, valid while `library` is loaded
    entry: EntryPoint,

    /// Serializes calls; the engine is not reentrant
    call_lock: Mutex<()>,

    /// Path to the library (for debugging)
    path: PathBuf,

    /// The underlying library handle
    _library: Library,
}

impl NativeLibrary {
    /// Load the library matching the current pointer width from the
    /// configured directory.
    pub fn open(config: &Config) -> Result<Self> {
        let path = Self::resolve_path(config)?;
        Self::load(path)
    }

    /// Load a library from an explicit path and resolve its entry point.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let library = unsafe { Library::new(path) }.map_err(|e| {
            SmpError::LibraryLoad(format!("'{}': {}", path.display(), e))
        })?;

        let symbol_name = Self::entry_symbol();
        let entry = {
            let symbol: Symbol<'_, EntryPoint> =
                unsafe { library.get(symbol_name.as_bytes()) }.map_err(|e| {
                    SmpError::SymbolNotFound(format!(
                        "'{}' in '{}': {}",
                        symbol_name,
                        path.display(),
                        e
                    ))
                })?;
            *symbol
        };

        tracing::info!("Loaded native engine from {}", path.display());

        Ok(Self {
            entry,
            call_lock: Mutex::new(()),
            path: path.to_path_buf(),
            _library: library,
        })
    }

    /// Full path of the library for the given config
    pub fn resolve_path(config: &Config) -> Result<PathBuf> {
        let dir = match &config.library_dir {
            Some(dir) => dir.clone(),
            None => {
                let exe = std::env::current_exe()?;
                exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                    SmpError::Config(format!(
                        "cannot determine directory of executable '{}'",
                        exe.display()
                    ))
                })?
            }
        };

        Ok(dir.join(Self::library_file_name(&config.library_stem)))
    }

    /// Platform- and width-specific library file name.
    ///
    /// 32-bit and 64-bit processes load distinct artifacts.
    pub fn library_file_name(stem: &str) -> String {
        let bits = usize::BITS;

        #[cfg(target_os = "windows")]
        {
            format!("{}{}.dll", stem, bits)
        }
        #[cfg(target_os = "macos")]
        {
            format!("lib{}{}.dylib", stem, bits)
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            format!("lib{}{}.so", stem, bits)
        }
    }

    /// Name of the exported command function.
    ///
    /// The 32-bit build exports it with a leading underscore.
    pub fn entry_symbol() -> &'static str {
        if cfg!(target_pointer_width = "32") {
            "_SoundMexPro"
        } else {
            "SoundMexPro"
        }
    }

    /// Get the path of this library.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NativeEngine for NativeLibrary {
    fn call(&self, command: &CStr, response: &mut [u8]) -> i32 {
        let capacity = c_int::try_from(response.len()).unwrap_or(c_int::MAX);

        let _guard = self.call_lock.lock();
        unsafe { (self.entry)(command.as_ptr(), response.as_mut_ptr().cast::<c_char>(), capacity) }
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary").field("path", &self.path).finish()
    }
}
