//! Command definitions
//!
//! A command is a name plus an ordered list of named arguments.

use crate::buffer::BufferArg;

/// A single command argument
#[derive(Debug)]
pub enum Arg<'a> {
    Int(i64),
    Float(f64),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    Str(String),
    StrList(Vec<String>),

    /// Sample data passed by address (`data` / `datadest`)
    Buffer(BufferArg<'a>),
}

/// A command to send to the engine
#[derive(Debug)]
pub struct Command<'a> {
    /// Command name (`init`, `loadmem`, `recgetdata`, ...)
    pub name: String,

    /// Arguments in encoding order
    pub args: Vec<(String, Arg<'a>)>,
}

impl<'a> Command<'a> {
    /// Create a command without arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Arg<'a>>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }

    /// Append an argument in place
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Arg<'a>>) {
        self.args.push((key.into(), value.into()));
    }

    /// Look up an argument by name
    pub fn get(&self, key: &str) -> Option<&Arg<'a>> {
        self.args.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

// =============================================================================
// Conversions
// =============================================================================

// Only types that widen losslessly into i64
macro_rules! arg_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::Int(i64::from(v))
                }
            }

            impl From<Vec<$t>> for Arg<'_> {
                fn from(v: Vec<$t>) -> Self {
                    Arg::IntList(v.into_iter().map(i64::from).collect())
                }
            }

            impl From<&[$t]> for Arg<'_> {
                fn from(v: &[$t]) -> Self {
                    Arg::IntList(v.iter().map(|&x| i64::from(x)).collect())
                }
            }
        )*
    };
}

arg_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<f32> for Arg<'_> {
    fn from(v: f32) -> Self {
        Arg::Float(v as f64)
    }
}

impl From<Vec<f64>> for Arg<'_> {
    fn from(v: Vec<f64>) -> Self {
        Arg::FloatList(v)
    }
}

impl From<&[f64]> for Arg<'_> {
    fn from(v: &[f64]) -> Self {
        Arg::FloatList(v.to_vec())
    }
}

impl From<bool> for Arg<'_> {
    fn from(v: bool) -> Self {
        Arg::Int(i64::from(v))
    }
}

impl From<&str> for Arg<'_> {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg<'_> {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<Vec<String>> for Arg<'_> {
    fn from(v: Vec<String>) -> Self {
        Arg::StrList(v)
    }
}

impl From<Vec<&str>> for Arg<'_> {
    fn from(v: Vec<&str>) -> Self {
        Arg::StrList(v.into_iter().map(str::to_string).collect())
    }
}

impl<'a> From<BufferArg<'a>> for Arg<'a> {
    fn from(v: BufferArg<'a>) -> Self {
        Arg::Buffer(v)
    }
}
