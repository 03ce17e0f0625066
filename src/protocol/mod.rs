//! Protocol Module
//!
//! Defines the flat text protocol spoken with the native engine.
//!
//! ## Request
//! ```text
//! command=<name>;<key>=<value>;<key>=<v1>,<v2>,...;
//! ```
//! Sample buffers travel by address:
//! ```text
//! data=<address>;samples=<n>;channels=<c>;
//! ```
//!
//! ## Response
//! ```text
//! <key>=<value>;<key>=<v1>,<v2>,...;
//! ```
//!
//! ### Value Types
//! Each response value is classified, in this order, as:
//! - string (keys `getchannels` / `getactivechannels` only)
//! - int or int list (every element parses as an integer)
//! - float or float list (every element parses as a float)
//! - string or string list (enclosing quotes stripped)
//!
//! ### Status Codes
//! - 1: success
//! - 0: busy
//! - < 0: error

mod command;
mod response;
mod value;
mod codec;

pub use command::{Arg, Command};
pub use response::{Response, Status, SUCCESS_KEY};
pub use value::Value;
pub use codec::{
    classify, decode_response, decode_text, encode_command, encode_request, response_text,
    DATA_DEST_KEY, STRING_ONLY_KEYS,
};
