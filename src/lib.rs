//! # soundmexpro
//!
//! Command-marshaling bridge to the SoundMexPro native audio engine:
//! - Flat `key=value;` command encoding, with sample buffers passed by address
//! - One-time loading of the width-specific engine library
//! - Typed decoding of the engine's text responses
//! - Two-call buffer transfer for recorded data (`recgetdata`)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                               │
//! │           (status policy, recgetdata transfer)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼────────────────────────┐
//!          │            │                        │
//!          ▼            ▼                        ▼
//!   ┌─────────────┐ ┌─────────────┐      ┌─────────────┐
//!   │   Encoder   │ │   Native    │      │   Decoder   │
//!   │ (protocol)  │ │  (library)  │      │ (protocol)  │
//!   └─────────────┘ └──────┬──────┘      └─────────────┘
//!                          │
//!                          ▼
//!                  ┌───────────────┐
//!                  │ SoundMexPro() │
//!                  │  native call  │
//!                  └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use soundmexpro::{soundmexpro, Command};
//!
//! let retvals = soundmexpro(&Command::new("init").arg("driver", "ASIO4ALL"))?;
//! println!("version: {:?}", retvals.get("version"));
//! # Ok::<(), soundmexpro::SmpError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod buffer;
pub mod protocol;
pub mod native;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SmpError, Result};
pub use config::{Config, StatusPolicy};
pub use buffer::{BufferArg, SampleBuffer};
pub use protocol::{Arg, Command, Response, Status, Value};
pub use native::{NativeEngine, NativeLibrary};
pub use client::{soundmexpro, Client};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the bridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
