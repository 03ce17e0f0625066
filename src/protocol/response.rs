//! Response definitions
//!
//! A decoded engine reply: the call status plus the typed key/value pairs.

use std::collections::HashMap;

use super::Value;

/// Reserved key holding the raw status code
pub const SUCCESS_KEY: &str = "success";

/// Engine call status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 1: command executed
    Success,

    /// 0: engine busy, command may be retried
    Busy,

    /// Anything else, usually negative
    Error(i32),
}

impl Status {
    /// Classify a raw status code
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Status::Success,
            0 => Status::Busy,
            other => Status::Error(other),
        }
    }

    /// The raw status code
    pub fn code(&self) -> i32 {
        match self {
            Status::Success => 1,
            Status::Busy => 0,
            Status::Error(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

/// A decoded response
///
/// Keys keep the order in which the engine reported them, starting with the
/// reserved `success` key.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Call status
    status: Status,

    /// Decoded values in report order
    values: Vec<(String, Value)>,

    /// Key -> position in `values`
    index: HashMap<String, usize>,
}

impl Response {
    /// Create an empty response carrying only the `success` key
    pub fn new(status: Status) -> Self {
        let mut index = HashMap::new();
        index.insert(SUCCESS_KEY.to_string(), 0);
        Self {
            status,
            values: vec![(SUCCESS_KEY.to_string(), Value::Int(i64::from(status.code())))],
            index,
        }
    }

    /// Call status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.values[i].1)
    }

    /// True if the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or replace a value; a replaced key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.values[i].1, value));
        }
        self.index.insert(key.clone(), self.values.len());
        self.values.push((key, value));
        None
    }

    /// Remove a value by key; later keys keep their relative order
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.index.remove(key)?;
        for i in self.index.values_mut() {
            if *i > removed {
                *i -= 1;
            }
        }
        Some(self.values.remove(removed).1)
    }

    /// Keys in report order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    /// Key/value pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys, including `success`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
