//! Decoded response values
//!
//! Every value in a response is one of these variants. The decoder picks the
//! variant from the text content; consumers match on it explicitly.

use crate::buffer::SampleBuffer;

/// A typed response value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    Str(String),
    StrList(Vec<String>),

    /// Recorded data delivered by the buffer transfer (`recgetdata`)
    Samples(SampleBuffer<f32>),
}

impl Value {
    /// The value as a single integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a single float; integers are widened
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The value as a single string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a list of integers; a single integer is a list of one
    pub fn as_int_list(&self) -> Option<Vec<i64>> {
        match self {
            Value::Int(v) => Some(vec![*v]),
            Value::IntList(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// The value as a list of floats; integers are widened
    pub fn as_float_list(&self) -> Option<Vec<f64>> {
        match self {
            Value::Int(v) => Some(vec![*v as f64]),
            Value::Float(v) => Some(vec![*v]),
            Value::IntList(v) => Some(v.iter().map(|&x| x as f64).collect()),
            Value::FloatList(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// The value as a list of strings; a single string is a list of one
    pub fn as_str_list(&self) -> Option<Vec<String>> {
        match self {
            Value::Str(s) => Some(vec![s.clone()]),
            Value::StrList(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// The recorded sample data
    pub fn as_samples(&self) -> Option<&SampleBuffer<f32>> {
        match self {
            Value::Samples(buffer) => Some(buffer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join<T: std::fmt::Display>(items: &[T]) -> String {
            items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(",")
        }

        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::IntList(v) => write!(f, "{}", join(v)),
            Value::FloatList(v) => write!(f, "{}", join(v)),
            Value::Str(s) => write!(f, "{}", s),
            Value::StrList(v) => write!(f, "{}", join(v)),
            Value::Samples(b) => write!(f, "<{}x{} samples>", b.samples(), b.channels()),
        }
    }
}
