//! Typed driver registry.
//!
//! Implementations register themselves under a name from the
//! composition root; nothing happens through initialization side
//! effects. Constructors take an options map with enumerated keys
//! (e.g. `file`, `expiration`, `providers`, `verify_request_hostname`).

use std::collections::HashMap;

/// Configuration options handed to a driver constructor.
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Constructs a driver from its options.
pub type Constructor<T> = fn(&Options) -> Result<T, DriverError>;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("unknown driver: {0}")]
    UnknownDriver(String),
    #[error("invalid option {key}: {reason}")]
    InvalidOption { key: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maps driver names to constructors for one kind of component.
pub struct Registry<T> {
    constructors: HashMap<String, Constructor<T>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, constructor: Constructor<T>) {
        self.constructors.insert(name.into(), constructor);
    }

    pub fn create(&self, name: &str, options: &Options) -> Result<T, DriverError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| DriverError::UnknownDriver(name.to_string()))?;
        constructor(options)
    }

    pub fn drivers(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a string option, falling back to a default.
pub(crate) fn string_option(options: &Options, key: &str, default: &str) -> Result<String, DriverError> {
    match options.get(key) {
        None => Ok(default.to_string()),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(DriverError::InvalidOption {
            key: key.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}

/// Reads a boolean option, falling back to a default.
pub(crate) fn bool_option(options: &Options, key: &str, default: bool) -> Result<bool, DriverError> {
    match options.get(key) {
        None => Ok(default),
        Some(serde_json::Value::Bool(b)) => Ok(*b),
        Some(other) => Err(DriverError::InvalidOption {
            key: key.to_string(),
            reason: format!("expected a boolean, got {}", other),
        }),
    }
}

/// Reads an unsigned integer option, falling back to a default.
pub(crate) fn u64_option(options: &Options, key: &str, default: u64) -> Result<u64, DriverError> {
    match options.get(key) {
        None => Ok(default),
        Some(serde_json::Value::Number(n)) => n.as_u64().ok_or_else(|| DriverError::InvalidOption {
            key: key.to_string(),
            reason: format!("expected an unsigned integer, got {}", n),
        }),
        Some(other) => Err(DriverError::InvalidOption {
            key: key.to_string(),
            reason: format!("expected an unsigned integer, got {}", other),
        }),
    }
}
