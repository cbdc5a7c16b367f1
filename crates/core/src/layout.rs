use std::path::{Path, PathBuf};

/// Extension given to generated headers.
pub const HEADER_EXTENSION: &str = "h";

/// Compute where the header for `input` goes.
///
/// Only the final extension is replaced (`a.png.png` -> `a.png.h`); a file
/// without an extension gets `.h` appended. With `out_dir` set the header is
/// placed there under the same file name, otherwise next to the input.
///
/// This does *not* touch the filesystem.
pub fn header_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let sibling = input.with_extension(HEADER_EXTENSION);
    match (out_dir, sibling.file_name()) {
        (Some(dir), Some(file_name)) => dir.join(file_name),
        _ => sibling,
    }
}

/// Join `path` onto `base` unless it is already absolute.
pub fn resolve_against(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
