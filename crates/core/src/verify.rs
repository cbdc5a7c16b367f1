//! Checking a generated header against itself and, optionally, its source
//! asset.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::parse::{parse_header, ParseError, ParsedHeader};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Malformed header {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },

    #[error("`{name}_len` declares {declared} bytes but the array holds {actual}")]
    LengthMismatch { name: String, declared: usize, actual: usize },

    #[error("Header bytes differ from {asset}: {detail}")]
    ContentMismatch { asset: PathBuf, detail: String },
}

/// Summary of a header that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedHeader {
    pub header: PathBuf,
    pub name: String,
    pub bytes: usize,
}

/// Parse `header`, check its length constant, and compare the array body
/// with `asset` when given.
pub fn verify_header(header: &Path, asset: Option<&Path>) -> Result<VerifiedHeader, VerifyError> {
    let text = fs::read_to_string(header)
        .map_err(|source| VerifyError::Read { path: header.to_path_buf(), source })?;
    let parsed = parse_header(&text)
        .map_err(|source| VerifyError::Parse { path: header.to_path_buf(), source })?;
    debug!("Parsed `{}` ({} bytes) from {}", parsed.name, parsed.bytes.len(), header.display());

    if !parsed.is_consistent() {
        return Err(VerifyError::LengthMismatch {
            name: parsed.name,
            declared: parsed.declared_len,
            actual: parsed.bytes.len(),
        });
    }

    if let Some(asset) = asset {
        let original = fs::read(asset)
            .map_err(|source| VerifyError::Read { path: asset.to_path_buf(), source })?;
        if let Some(detail) = describe_mismatch(&parsed, &original) {
            return Err(VerifyError::ContentMismatch { asset: asset.to_path_buf(), detail });
        }
    }

    Ok(VerifiedHeader {
        header: header.to_path_buf(),
        name: parsed.name,
        bytes: parsed.declared_len,
    })
}

fn describe_mismatch(parsed: &ParsedHeader, original: &[u8]) -> Option<String> {
    if let Some(offset) = parsed.bytes.iter().zip(original).position(|(a, b)| a != b) {
        return Some(format!(
            "first difference at offset {offset} (header 0x{:02x}, asset 0x{:02x})",
            parsed.bytes[offset], original[offset]
        ));
    }
    if parsed.bytes.len() != original.len() {
        return Some(format!(
            "header has {} bytes, asset has {}",
            parsed.bytes.len(),
            original.len()
        ));
    }
    None
}
