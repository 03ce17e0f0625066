//! Sample buffers exchanged with the engine by address
//!
//! The engine reads and writes sample data directly through a pointer that
//! travels as a decimal integer inside the command string. Data must be
//! non-interleaved: all samples of channel 0, then all samples of channel 1, ...
//!
//! ```text
//! ┌──────────── channel 0 ────────────┬──────────── channel 1 ────────────┐
//! │ s0  s1  s2  ...  s(samples-1)      │ s0  s1  s2  ...  s(samples-1)      │
//! └────────────────────────────────────┴────────────────────────────────────┘
//! ```

use std::marker::PhantomData;

use crate::error::{Result, SmpError};

/// Sample types the engine understands
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {}

impl Sample for f32 {}
impl Sample for f64 {}

/// Owned, non-interleaved sample buffer of shape `samples × channels`
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer<T: Sample = f32> {
    /// Channel-major sample data
    data: Vec<T>,
    /// Samples per channel
    samples: usize,
    /// Number of channels
    channels: usize,
}

impl<T: Sample> SampleBuffer<T> {
    /// Create a zero-filled buffer
    ///
    /// Panics if `samples * channels` overflows; use `try_zeros` for shapes
    /// that come from the engine.
    pub fn zeros(samples: usize, channels: usize) -> Self {
        let len = samples
            .checked_mul(channels)
            .unwrap_or_else(|| panic!("buffer shape {}x{} overflows", samples, channels));
        Self {
            data: vec![T::default(); len],
            samples,
            channels,
        }
    }

    /// Create a zero-filled buffer of at most `max_bytes` bytes
    ///
    /// Fails instead of panicking or aborting when the shape overflows,
    /// exceeds the limit, or cannot be allocated.
    pub fn try_zeros(samples: usize, channels: usize, max_bytes: usize) -> Result<Self> {
        let bytes = samples
            .checked_mul(channels)
            .and_then(|len| len.checked_mul(std::mem::size_of::<T>()))
            .ok_or_else(|| {
                SmpError::InvalidArgument(format!(
                    "buffer shape {}x{} overflows",
                    samples, channels
                ))
            })?;
        if bytes > max_bytes || bytes > isize::MAX as usize {
            return Err(SmpError::InvalidArgument(format!(
                "buffer shape {}x{} needs {} bytes (limit {})",
                samples, channels, bytes, max_bytes
            )));
        }

        let len = samples * channels;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            SmpError::InvalidArgument(format!(
                "cannot allocate {}x{} buffer: {}",
                samples, channels, e
            ))
        })?;
        data.resize(len, T::default());

        Ok(Self {
            data,
            samples,
            channels,
        })
    }

    /// Create a buffer from one vector per channel
    ///
    /// All channels must have the same length.
    pub fn from_channels(channels: Vec<Vec<T>>) -> Result<Self> {
        let samples = channels.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = channels.iter().position(|c| c.len() != samples) {
            return Err(SmpError::InvalidArgument(format!(
                "channel {} has {} samples, expected {}",
                bad,
                channels[bad].len(),
                samples
            )));
        }

        let count = channels.len();
        Ok(Self {
            data: channels.into_iter().flatten().collect(),
            samples,
            channels: count,
        })
    }

    /// Create a buffer from interleaved frames `[L0, R0, L1, R1, ...]`
    ///
    /// The data is reordered into the engine's non-interleaved layout.
    pub fn from_interleaved(interleaved: &[T], channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(SmpError::InvalidArgument(
                "interleaved buffer needs at least one channel".to_string(),
            ));
        }
        if interleaved.len() % channels != 0 {
            return Err(SmpError::InvalidArgument(format!(
                "sample count {} is not divisible by channel count {}",
                interleaved.len(),
                channels
            )));
        }

        let samples = interleaved.len() / channels;
        let mut data = Vec::with_capacity(interleaved.len());
        for channel in 0..channels {
            data.extend(interleaved.iter().skip(channel).step_by(channels).copied());
        }

        Ok(Self {
            data,
            samples,
            channels,
        })
    }

    /// Samples per channel
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Shape as `(samples, channels)`
    pub fn shape(&self) -> (usize, usize) {
        (self.samples, self.channels)
    }

    /// All samples, channel-major
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// All samples of one channel
    pub fn channel(&self, channel: usize) -> Option<&[T]> {
        if channel < self.channels {
            let start = channel * self.samples;
            Some(&self.data[start..start + self.samples])
        } else {
            None
        }
    }

    /// Get a sample at the given position and channel
    pub fn get(&self, sample: usize, channel: usize) -> Option<T> {
        if sample < self.samples && channel < self.channels {
            Some(self.data[channel * self.samples + sample])
        } else {
            None
        }
    }

    /// Set a sample at the given position and channel
    ///
    /// Returns false if the position is out of range.
    pub fn set(&mut self, sample: usize, channel: usize, value: T) -> bool {
        if sample < self.samples && channel < self.channels {
            self.data[channel * self.samples + sample] = value;
            true
        } else {
            false
        }
    }

    /// Convert back to interleaved frames
    pub fn to_interleaved(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        for sample in 0..self.samples {
            for channel in 0..self.channels {
                out.push(self.data[channel * self.samples + sample]);
            }
        }
        out
    }

    /// Borrow the buffer for the engine to read from (`data`)
    ///
    /// The result is read-only: the encoder refuses to send it as
    /// `datadest`, which the engine writes into. Use `as_arg_mut` there.
    pub fn as_arg(&self) -> BufferArg<'_> {
        BufferArg {
            address: self.data.as_ptr() as usize,
            samples: self.samples,
            channels: self.channels,
            writable: false,
            _borrow: PhantomData,
        }
    }

    /// Borrow the buffer for the engine to write into (`datadest`)
    pub fn as_arg_mut(&mut self) -> BufferArg<'_> {
        BufferArg {
            address: self.data.as_mut_ptr() as usize,
            samples: self.samples,
            channels: self.channels,
            writable: true,
            _borrow: PhantomData,
        }
    }
}

/// A buffer lent to the engine for the duration of one call
///
/// The borrow keeps the owning `SampleBuffer` alive and untouched until the
/// command carrying this argument has been dropped. The engine only ever sees
/// the address; no ownership is transferred.
#[derive(Debug)]
pub struct BufferArg<'a> {
    address: usize,
    samples: usize,
    channels: usize,
    writable: bool,
    _borrow: PhantomData<&'a mut [u8]>,
}

impl BufferArg<'_> {
    /// Base address of the first sample
    pub fn address(&self) -> usize {
        self.address
    }

    /// Samples per channel
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Number of channels (1 for mono data)
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// True if built from a mutable borrow, so the engine may write into it
    pub fn is_writable(&self) -> bool {
        self.writable
    }
}
