pub mod config;
pub mod convert;
pub mod util;
pub mod verify;

pub use config::*;
pub use convert::*;
pub use util::*;
pub use verify::*;
