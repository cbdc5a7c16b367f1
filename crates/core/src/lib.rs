//! png2c-core
//!
//! Core library for embedding binary assets into C programs.
//!
//! Each asset is read as an opaque byte stream and rendered as an
//! `unsigned char` array plus an `unsigned int <name>_len` constant in a
//! `.h` file next to it (or in a configured output directory). Nothing here
//! decodes images; a PNG is just bytes.
//!
//! All substantive logic lives here so frontends stay thin and the behavior
//! is testable without spawning processes.

pub mod config;
pub mod convert;
pub mod ident;
pub mod layout;
pub mod parse;
pub mod render;
pub mod verify;

pub use config::{ConfigError, ConvertConfig};
pub use convert::{convert_all, convert_batch, Conversion, ConvertError, ConvertResult, Converter};
pub use ident::{derive_identifier, OverrideTable};
pub use render::render_header;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
