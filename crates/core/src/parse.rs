//! Reading generated headers back into bytes.
//!
//! Only the shape produced by [`crate::render::render_header`] is
//! understood: one `unsigned char` array with a braced hex body followed by
//! its `unsigned int <name>_len` companion. Token case is not enforced.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("No `unsigned char <name>[] = {{` declaration found")]
    MissingArrayDecl,

    #[error("Array `{name}` is not closed with `}};`")]
    UnterminatedArray { name: String },

    #[error("Invalid byte token `{token}` on line {line}")]
    BadToken { line: usize, token: String },

    #[error("No `unsigned int {name}_len = <n>;` declaration found")]
    MissingLength { name: String },

    #[error("Length declaration for `{found}` does not match array `{expected}`")]
    NameMismatch { expected: String, found: String },

    #[error("Invalid length value `{0}`")]
    BadLength(String),
}

/// A header decoded back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub name: String,
    pub bytes: Vec<u8>,
    pub declared_len: usize,
}

impl ParsedHeader {
    /// True when the `_len` constant matches the number of bytes in the body.
    pub fn is_consistent(&self) -> bool {
        self.declared_len == self.bytes.len()
    }
}

pub fn parse_header(text: &str) -> Result<ParsedHeader, ParseError> {
    let mut lines = text.lines().enumerate();

    let name = loop {
        let Some((_, line)) = lines.next() else {
            return Err(ParseError::MissingArrayDecl);
        };
        if let Some(name) = array_decl_name(line.trim()) {
            break name.to_string();
        }
    };

    let mut bytes = Vec::new();
    let mut closed = false;
    for (idx, line) in lines.by_ref() {
        let line = line.trim();
        if line == "};" {
            closed = true;
            break;
        }
        for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let byte = parse_token(token)
                .ok_or_else(|| ParseError::BadToken { line: idx + 1, token: token.to_string() })?;
            bytes.push(byte);
        }
    }
    if !closed {
        return Err(ParseError::UnterminatedArray { name });
    }

    for (_, line) in lines {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("unsigned int ") else {
            continue;
        };
        let Some((lhs, rhs)) = rest.split_once('=') else {
            continue;
        };
        let Some(found) = lhs.trim().strip_suffix("_len") else {
            continue;
        };
        if found != name {
            return Err(ParseError::NameMismatch { expected: name, found: found.to_string() });
        }
        let value = rhs.trim().trim_end_matches(';').trim();
        let declared_len =
            value.parse::<usize>().map_err(|_| ParseError::BadLength(value.to_string()))?;
        return Ok(ParsedHeader { name, bytes, declared_len });
    }

    Err(ParseError::MissingLength { name })
}

fn array_decl_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("unsigned char ")?;
    let (name, tail) = rest.split_once("[]")?;
    if tail.trim() != "= {" {
        return None;
    }
    Some(name.trim())
}

fn parse_token(token: &str) -> Option<u8> {
    let digits = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X"))?;
    if digits.len() != 2 {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}
