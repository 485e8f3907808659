use super::{parse, tokenize};
use crate::rom::compile;
use crate::script::ops;
use derive_more::Constructor;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Loc {
    line: usize,
}

impl Loc {
    pub fn line(self) -> usize {
        self.line
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}", self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Located<T> {
    loc: Loc,
    val: T,
}

impl<T> Located<T> {
    pub fn loc(&self) -> Loc {
        self.loc
    }

    pub fn value(self) -> T {
        self.val
    }

    pub fn map<S, F>(self, f: F) -> Located<S>
    where
        F: FnOnce(T) -> S,
    {
        Located::new(self.loc, f(self.val))
    }
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}: {}", self.loc, self.val)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Tokenize(Located<String>),
    Parse(Located<String>),
    Compile(String),
    Encode(String),
}

impl From<Located<tokenize::Error>> for Error {
    fn from(err: Located<tokenize::Error>) -> Self {
        Error::Tokenize(err.map(|err| format!("{}", err)))
    }
}

impl From<Located<parse::Error>> for Error {
    fn from(err: Located<parse::Error>) -> Self {
        Error::Parse(err.map(|err| format!("{}", err)))
    }
}

impl From<compile::Error> for Error {
    fn from(err: compile::Error) -> Self {
        Error::Compile(format!("{}", err))
    }
}

impl From<ops::Error> for Error {
    fn from(err: ops::Error) -> Self {
        Error::Encode(format!("{}", err))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assembly Error (in ")?;
        match self {
            Error::Tokenize(_) => write!(f, "Tokenizer"),
            Error::Parse(_) => write!(f, "Parser"),
            Error::Compile(_) => write!(f, "Compiler"),
            Error::Encode(_) => write!(f, "Encoder"),
        }?;
        write!(f, "): ")?;
        match self {
            Error::Tokenize(msg) => write!(f, "{}", msg),
            Error::Parse(msg) => write!(f, "{}", msg),
            Error::Compile(msg) => write!(f, "{}", msg),
            Error::Encode(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}
