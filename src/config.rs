//! Configuration for the SoundMexPro bridge
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a bridge client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Native Library Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the native library.
    /// `None` resolves to the directory of the running executable.
    pub library_dir: Option<PathBuf>,

    /// Library file stem; the pointer width and platform suffix are appended:
    ///   {stem}32.dll / {stem}64.dll           (Windows)
    ///   lib{stem}64.so / lib{stem}64.dylib    (elsewhere)
    pub library_stem: String,

    // -------------------------------------------------------------------------
    // Call Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the response buffer handed to the engine (in bytes)
    pub response_capacity: usize,

    /// What to do when the engine returns a status other than 1
    pub status_policy: StatusPolicy,

    /// Reject argument names/values containing `;`, `=` or `,`
    pub strict_arguments: bool,

    /// Largest `recgetdata` buffer the client allocates (in bytes)
    pub record_buffer_limit: usize,
}

/// Handling of non-success engine statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any status other than 1 becomes an `Err` (busy and error are distinct variants)
    Raise,

    /// Return the decoded response; the caller inspects `Response::status()`
    Embed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_dir: None,
            library_stem: "SoundMexProPy".to_string(),
            response_capacity: 32 * 1024, // 32 KB
            status_policy: StatusPolicy::Raise,
            strict_arguments: false,
            record_buffer_limit: 1024 * 1024 * 1024, // 1 GB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the directory the native library is loaded from
    pub fn library_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.library_dir = Some(path.into());
        self
    }

    /// Set the library file stem
    pub fn library_stem(mut self, stem: impl Into<String>) -> Self {
        self.config.library_stem = stem.into();
        self
    }

    /// Set the response buffer capacity (in bytes)
    pub fn response_capacity(mut self, bytes: usize) -> Self {
        self.config.response_capacity = bytes;
        self
    }

    /// Set the status policy
    pub fn status_policy(mut self, policy: StatusPolicy) -> Self {
        self.config.status_policy = policy;
        self
    }

    /// Enable or disable delimiter validation of arguments
    pub fn strict_arguments(mut self, strict: bool) -> Self {
        self.config.strict_arguments = strict;
        self
    }

    /// Set the largest record buffer `recgetdata` may allocate (in bytes)
    pub fn record_buffer_limit(mut self, bytes: usize) -> Self {
        self.config.record_buffer_limit = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
