//! Rendering of byte buffers as C array declarations.

/// Number of `0xNN` tokens per line inside the braces.
pub const BYTES_PER_LINE: usize = 16;

/// Indentation placed before every line of hex tokens.
pub const LINE_INDENT: &str = "  ";

/// Render the braced body: lines of up to [`BYTES_PER_LINE`] lowercase
/// `0xNN` tokens, each indented by two spaces, joined by `,\n`.
///
/// An empty buffer yields an empty string.
pub fn hex_block(data: &[u8]) -> String {
    // "0xNN, " is six characters; plus indent and the ",\n" separator.
    let mut out = String::with_capacity(data.len() * 6 + (data.len() / BYTES_PER_LINE + 1) * 4);
    for (line_idx, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        if line_idx > 0 {
            out.push_str(",\n");
        }
        out.push_str(LINE_INDENT);
        for (i, byte) in chunk.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("0x{byte:02x}"));
        }
    }
    out
}

/// Render a complete header for `data` under the array name `name`.
///
/// ```text
/// unsigned char <name>[] = {
/// <hex block>
/// };
/// unsigned int <name>_len = <len>;
/// ```
pub fn render_header(name: &str, data: &[u8]) -> String {
    let body = hex_block(data);
    let mut out = String::with_capacity(body.len() + name.len() * 2 + 64);
    out.push_str(&format!("unsigned char {name}[] = {{\n"));
    out.push_str(&body);
    out.push('\n');
    out.push_str("};\n");
    out.push_str(&format!("unsigned int {name}_len = {};\n", data.len()));
    out
}
