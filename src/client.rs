//! Client Module
//!
//! Ties encoding, native invocation and decoding together.
//!
//! ## Responsibilities
//! - Encode a command and hand it to the engine with a fresh response buffer
//! - Apply the configured status policy
//! - Decode the response into typed values
//! - Run the two-call buffer transfer behind `recgetdata`

use crate::buffer::SampleBuffer;
use crate::config::{Config, StatusPolicy};
use crate::error::{Result, SmpError};
use crate::native::{self, NativeEngine, NativeLibrary};
use crate::protocol::{
    decode_response, encode_request, response_text, Arg, Command, Response, Status, Value,
    DATA_DEST_KEY,
};

/// Command whose data buffer must be allocated by the caller
pub const RECORD_DATA_COMMAND: &str = "recgetdata";

/// Command reporting the record buffer size per channel
pub const RECORD_SIZE_COMMAND: &str = "recbufsize";

/// Command returning the text of the last error
pub const LAST_ERROR_COMMAND: &str = "getlasterror";

/// Key the recorded data is returned under
const DATA_KEY: &str = "data";

/// Buffer shape keys replaced by `data` in the final response
const SHAPE_KEYS: [&str; 2] = ["channels", "bufsize"];

/// A command client over a native engine
///
/// ## Call Model
///
/// Every call blocks until the engine returns. Each call allocates its own
/// response buffer; the engine itself serializes concurrent callers (see
/// `NativeLibrary`).
pub struct Client<E: NativeEngine> {
    /// The engine commands are delivered to
    engine: E,

    /// Client configuration
    config: Config,
}

impl<E: NativeEngine> Client<E> {
    /// Create a client over the given engine
    pub fn new(engine: E, config: Config) -> Result<Self> {
        if config.response_capacity == 0 {
            return Err(SmpError::Config(
                "response capacity must be greater than zero".to_string(),
            ));
        }
        if i32::try_from(config.response_capacity).is_err() {
            return Err(SmpError::Config(format!(
                "response capacity {} exceeds the engine's int range",
                config.response_capacity
            )));
        }

        Ok(Self { engine, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a command and decode the response
    ///
    /// `recgetdata` is expanded into a sizing call plus the real call; its
    /// response carries the recorded samples under `data`.
    pub fn call(&self, command: &Command<'_>) -> Result<Response> {
        if command.name == RECORD_DATA_COMMAND {
            return self.call_record_data(command);
        }
        self.execute(
            &command.name,
            command.args.iter().map(|(k, v)| (k.as_str(), v)),
        )
    }

    /// Send a command without arguments
    pub fn send(&self, name: &str) -> Result<Response> {
        self.call(&Command::new(name))
    }

    /// Text of the engine's last error
    pub fn last_error(&self) -> Result<String> {
        let response = self.send(LAST_ERROR_COMMAND)?;
        Ok(response
            .get("error")
            .map(|value| value.to_string())
            .unwrap_or_default())
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// One encode → invoke → decode round trip
    fn execute<'x, 'a: 'x, I>(&self, name: &str, args: I) -> Result<Response>
    where
        I: IntoIterator<Item = (&'x str, &'x Arg<'a>)>,
    {
        let encoded = encode_request(name, args, self.config.strict_arguments)?;
        let mut buffer = vec![0u8; self.config.response_capacity];

        tracing::debug!("Sending command \"{}\"", name);
        tracing::trace!("Command string: {}", encoded.to_string_lossy());

        let code = self.engine.call(&encoded, &mut buffer);
        self.finish(name, code, &buffer)
    }

    /// Apply the status policy and decode
    fn finish(&self, name: &str, code: i32, buffer: &[u8]) -> Result<Response> {
        let status = Status::from_code(code);

        if !status.is_success() {
            tracing::warn!("Command \"{}\" returned status {}", name, code);

            if self.config.status_policy == StatusPolicy::Raise {
                return Err(match status {
                    Status::Busy => SmpError::Busy {
                        command: name.to_string(),
                    },
                    _ => SmpError::Engine {
                        command: name.to_string(),
                        code,
                        message: response_text(buffer).trim().to_string(),
                    },
                });
            }
        }

        let response = decode_response(buffer, code);
        tracing::trace!("Response to \"{}\": {} keys", name, response.len());
        Ok(response)
    }

    /// `recgetdata`: size the buffer with `recbufsize`, then let the engine fill it
    fn call_record_data(&self, command: &Command<'_>) -> Result<Response> {
        let args = || {
            command
                .args
                .iter()
                .filter(|(k, _)| k != DATA_DEST_KEY)
                .map(|(k, v)| (k.as_str(), v))
        };

        let sizing = self.execute(RECORD_SIZE_COMMAND, args())?;
        if !sizing.status().is_success() {
            return Ok(sizing);
        }

        let (samples, channels) = record_shape(&sizing, self.config.record_buffer_limit)?;
        tracing::debug!(
            "Allocating record buffer: {} samples x {} channels",
            samples,
            channels
        );

        let mut data =
            SampleBuffer::<f32>::try_zeros(samples, channels, self.config.record_buffer_limit)
                .map_err(|e| SmpError::Protocol(format!("record buffer: {}", e)))?;
        let mut response = {
            let dest = Arg::Buffer(data.as_arg_mut());
            self.execute(
                RECORD_DATA_COMMAND,
                args().chain(std::iter::once((DATA_DEST_KEY, &dest))),
            )?
        };
        if !response.status().is_success() {
            return Ok(response);
        }

        for key in SHAPE_KEYS {
            response.remove(key);
        }
        response.insert(DATA_KEY, Value::Samples(data));

        Ok(response)
    }
}

impl Client<&'static NativeLibrary> {
    /// Create a client over the process-wide native library
    pub fn global(config: Config) -> Result<Self> {
        let library = native::global(&config)?;
        Self::new(library, config)
    }
}

/// Send a command through the process-wide library with the default config
pub fn soundmexpro(command: &Command<'_>) -> Result<Response> {
    Client::global(Config::default())?.call(command)
}

/// Record buffer shape from a `recbufsize` response
///
/// `value` is the buffer size, or one size per channel; the first size is
/// used for all channels. The total must fit in `limit` bytes of `f32`.
fn record_shape(sizing: &Response, limit: usize) -> Result<(usize, usize)> {
    let sizes = sizing
        .get("value")
        .and_then(Value::as_int_list)
        .ok_or_else(|| {
            SmpError::Protocol(format!(
                "\"{}\" returned no integer 'value'",
                RECORD_SIZE_COMMAND
            ))
        })?;

    let first = sizes.first().copied().unwrap_or(0);
    let samples = usize::try_from(first).map_err(|_| {
        SmpError::Protocol(format!(
            "\"{}\" returned invalid buffer size {}",
            RECORD_SIZE_COMMAND, first
        ))
    })?;
    let channels = sizes.len();

    let bytes = samples
        .checked_mul(channels)
        .and_then(|n| n.checked_mul(std::mem::size_of::<f32>()));
    match bytes {
        Some(bytes) if bytes <= limit => Ok((samples, channels)),
        _ => Err(SmpError::Protocol(format!(
            "\"{}\" reported {} samples x {} channels, more than the {} byte record limit",
            RECORD_SIZE_COMMAND, samples, channels, limit
        ))),
    }
}
