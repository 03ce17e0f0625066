//! Protocol codec
//!
//! Encoding of commands and decoding of engine responses.
//!
//! ## Command Format
//! ```text
//! command=<name>;<key1>=<value1>;<key2>=<v2a>,<v2b>,<v2c>;...\0
//! ```
//! A buffer argument expands to three segments:
//! ```text
//! <key>=<address>;samples=<n>;channels=<c>;
//! ```
//!
//! ## Response Format
//! ```text
//! <key1>=<value1>;<key2>=<v2a>,<v2b>;...\0        (Windows-1252)
//! ```
//!
//! Nothing is escaped. Names and values must not contain `;`, `=` or `,`.

use std::ffi::CString;

use encoding_rs::WINDOWS_1252;

use super::{Arg, Command, Response, Status, Value};
use crate::error::{Result, SmpError};

/// Segment terminator
pub const SEPARATOR: char = ';';

/// Key/value delimiter
pub const ASSIGN: char = '=';

/// List element delimiter
pub const LIST_SEPARATOR: char = ',';

/// Buffer argument the engine writes into
pub const DATA_DEST_KEY: &str = "datadest";

/// Keys whose values are channel names and never converted to numbers
pub const STRING_ONLY_KEYS: [&str; 2] = ["getchannels", "getactivechannels"];

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to a null-terminated command string
///
/// Delimiters inside names or values are not checked; see `encode_request`
/// for the validating variant.
pub fn encode_command(command: &Command<'_>) -> Result<CString> {
    encode_request(
        &command.name,
        command.args.iter().map(|(k, v)| (k.as_str(), v)),
        false,
    )
}

/// Encode a command name and arguments to a null-terminated command string
///
/// With `strict` set, names and textual values containing a delimiter are
/// rejected instead of silently corrupting the command. A read-only buffer
/// passed as `datadest` is always rejected.
pub fn encode_request<'x, 'a: 'x, I>(name: &str, args: I, strict: bool) -> Result<CString>
where
    I: IntoIterator<Item = (&'x str, &'x Arg<'a>)>,
{
    if strict {
        check_token("command", name)?;
    }

    let mut cmd = String::with_capacity(64);
    cmd.push_str("command=");
    cmd.push_str(name);
    cmd.push(SEPARATOR);

    for (key, value) in args {
        check_destination(key, value)?;
        if strict {
            check_token(key, key)?;
            check_arg(key, value)?;
        }
        encode_arg(&mut cmd, key, value);
    }

    CString::new(cmd).map_err(|e| {
        SmpError::Protocol(format!(
            "command \"{}\" contains a NUL byte at position {}",
            name,
            e.nul_position()
        ))
    })
}

/// Append one `key=value;` segment (three for buffers)
fn encode_arg(cmd: &mut String, key: &str, value: &Arg<'_>) {
    use std::fmt::Write;

    // Writing to a String cannot fail
    let _ = match value {
        Arg::Buffer(buffer) => write!(
            cmd,
            "{}={};samples={};channels={};",
            key,
            buffer.address(),
            buffer.samples(),
            buffer.channels()
        ),
        Arg::Int(v) => write!(cmd, "{}={};", key, v),
        Arg::Float(v) => write!(cmd, "{}={};", key, format_float(*v)),
        Arg::IntList(v) => write!(cmd, "{}={};", key, join(v.iter().map(i64::to_string))),
        Arg::FloatList(v) => write!(cmd, "{}={};", key, join(v.iter().map(|x| format_float(*x)))),
        Arg::Str(s) => write!(cmd, "{}={};", key, s),
        Arg::StrList(v) => write!(cmd, "{}={};", key, v.join(",")),
    };
}

/// Render a float so that it always reads back as a float (`2.0`, not `2`)
fn format_float(v: f64) -> String {
    format!("{:?}", v)
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}

fn check_destination(key: &str, value: &Arg<'_>) -> Result<()> {
    match value {
        Arg::Buffer(buffer) if key == DATA_DEST_KEY && !buffer.is_writable() => {
            Err(SmpError::InvalidArgument(format!(
                "argument \"{}\": the engine writes into this buffer, lend it with as_arg_mut",
                key
            )))
        }
        _ => Ok(()),
    }
}

fn check_arg(key: &str, value: &Arg<'_>) -> Result<()> {
    match value {
        Arg::Str(s) => check_token(key, s),
        Arg::StrList(list) => list.iter().try_for_each(|s| check_token(key, s)),
        _ => Ok(()),
    }
}

fn check_token(key: &str, token: &str) -> Result<()> {
    match token.find([SEPARATOR, ASSIGN, LIST_SEPARATOR]) {
        Some(pos) => Err(SmpError::InvalidArgument(format!(
            "argument \"{}\": \"{}\" contains reserved delimiter '{}'",
            key,
            token,
            &token[pos..pos + 1]
        ))),
        None => Ok(()),
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode the text content of a response buffer
///
/// Reads up to the first NUL byte (or the end of the buffer) as Windows-1252.
pub fn response_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(&bytes[..end]);
    text.into_owned()
}

/// Decode a response buffer
///
/// Decoding is total: every byte sequence yields a response. The `success`
/// key holds the raw status code.
pub fn decode_response(bytes: &[u8], status: i32) -> Response {
    decode_text(&response_text(bytes), status)
}

/// Decode response text (`key=value;key=v1,v2;...`)
pub fn decode_text(text: &str, status: i32) -> Response {
    let mut response = Response::new(Status::from_code(status));

    for item in text.split(SEPARATOR).filter(|item| !item.is_empty()) {
        // A bare key without '=' decodes to an empty string
        let (key, raw) = item.split_once(ASSIGN).unwrap_or((item, ""));
        response.insert(key, classify(key, raw));
    }

    response
}

/// Infer the type of one raw value
///
/// Order matters: string-only keys, then all-int, then all-float, then
/// strings with enclosing quotes stripped.
pub fn classify(key: &str, raw: &str) -> Value {
    let parts: Vec<&str> = raw.split(LIST_SEPARATOR).collect();

    if !STRING_ONLY_KEYS.contains(&key) {
        if let Some(ints) = parse_all::<i64>(&parts) {
            return if ints.len() == 1 {
                Value::Int(ints[0])
            } else {
                Value::IntList(ints)
            };
        }

        if let Some(floats) = parse_all::<f64>(&parts) {
            return if floats.len() == 1 {
                Value::Float(floats[0])
            } else {
                Value::FloatList(floats)
            };
        }
    }

    let mut strings: Vec<String> = parts.iter().map(|s| strip_quotes(s).to_string()).collect();
    if strings.len() == 1 {
        Value::Str(strings.remove(0))
    } else {
        Value::StrList(strings)
    }
}

fn parse_all<T: std::str::FromStr>(parts: &[&str]) -> Option<Vec<T>> {
    parts.iter().map(|p| p.trim().parse::<T>().ok()).collect()
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c: char| c == '"' || c == '\'')
}
