use std::path::Path;

use anyhow::{Context, Result};
use png2c_core::verify::{verify_header, VerifiedHeader};

/// Check that a generated header is well formed and, with `input`, that it
/// still matches the asset it was generated from.
pub fn verify_command(header: &Path, input: Option<&Path>) -> Result<VerifiedHeader> {
    let verified = verify_header(header, input)
        .with_context(|| format!("Verification failed for {}", header.display()))?;

    println!("OK {} ({}, {} bytes)", verified.header.display(), verified.name, verified.bytes);
    Ok(verified)
}
