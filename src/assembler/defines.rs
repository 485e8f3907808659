use crate::common;
use std::collections::HashMap;
use std::fmt::Display;

/// Compile-time parameters supplied alongside a program source, as repeated
/// `key[=value]` arguments. A bare `key` stands for the value `1`, so flag
/// defines still read back as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Defines {
    map: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Malformed(String, String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Malformed(key, value) => {
                write!(f, "Define '{}' has non-numeric value '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Defines {
    pub fn new() -> Self {
        Defines::default()
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_owned(), value.to_owned());
    }

    pub fn insert_arg(&mut self, arg: &str) {
        match arg.split_once('=') {
            Some((key, value)) => self.insert(key, value),
            None => self.insert(arg, "1"),
        }
    }

    pub fn of_args<'a, I: IntoIterator<Item = &'a str>>(args: I) -> Self {
        let mut defines = Defines::new();
        for arg in args {
            defines.insert_arg(arg);
        }
        defines
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Numeric lookup with a fallback: an absent key yields `default`, a
    /// present key must parse as a radix-prefixed or decimal integer.
    pub fn get_int(&self, key: &str, default: u32) -> Result<u32, Error> {
        match self.lookup(key) {
            None => Ok(default),
            Some(value) => common::parse_radix_int(value)
                .ok_or_else(|| Error::Malformed(key.to_owned(), value.to_owned())),
        }
    }
}
