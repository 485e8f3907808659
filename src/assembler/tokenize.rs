use super::types::{Loc, Located};
use crate::common;
use std::fmt::Display;

const COMMENT_CHAR: char = '#';
const LABEL_DEF_CHAR: char = ':';
const DEFINE_CHAR: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `name:` — gives the next instruction's address a name.
    LabelDef(String),
    /// A mnemonic or a bare label reference.
    Name(String),
    Num(u32),
    /// `$name` — substituted from the define table.
    Define(String),
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LabelDef(name) => write!(f, "{}{}", name, LABEL_DEF_CHAR),
            Token::Name(name) => write!(f, "{}", name),
            Token::Num(num) => write!(f, "{:#x}", num),
            Token::Define(name) => write!(f, "{}{}", DEFINE_CHAR, name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MalformedNumber(String),
    EmptyLabelName,
    EmptyDefineName,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedNumber(word) => write!(f, "Could not parse numeric '{}'", word),
            Error::EmptyLabelName => write!(f, "Label definition with an empty name"),
            Error::EmptyDefineName => write!(f, "Define reference with an empty name"),
        }
    }
}

fn tokenize_word(word: &str) -> Result<Token, Error> {
    if let Some(name) = word.strip_suffix(LABEL_DEF_CHAR) {
        if name.is_empty() {
            return Err(Error::EmptyLabelName);
        }
        return Ok(Token::LabelDef(name.to_owned()));
    }

    if let Some(name) = word.strip_prefix(DEFINE_CHAR) {
        if name.is_empty() {
            return Err(Error::EmptyDefineName);
        }
        return Ok(Token::Define(name.to_owned()));
    }

    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return common::parse_radix_int(word)
            .map(Token::Num)
            .ok_or_else(|| Error::MalformedNumber(word.to_owned()));
    }

    Ok(Token::Name(word.to_owned()))
}

pub fn tokenize_line(line: &str) -> Result<Vec<Token>, Error> {
    let code = match line.find(COMMENT_CHAR) {
        Some(idx) => &line[..idx],
        None => line,
    };

    code.split_whitespace().map(tokenize_word).collect()
}

/// Tokenizes a whole source, one token list per line (empty for blank and
/// comment-only lines), each tagged with its 1-based line number.
pub fn tokenize(source: &str) -> Result<Vec<(Loc, Vec<Token>)>, Located<Error>> {
    source
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let loc = Loc::new(idx + 1);
            tokenize_line(line)
                .map(|tokens| (loc, tokens))
                .map_err(|err| Located::new(loc, err))
        })
        .collect()
}
