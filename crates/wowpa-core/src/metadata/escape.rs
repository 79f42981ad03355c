/// Sanitize a NUL-terminated byte buffer in place for embedding in JSON text.
///
/// The last byte is forced to NUL so an unterminated read still ends inside
/// the buffer. Every double quote, backslash and ASCII control character
/// before the first NUL becomes a space.
pub fn escape(buffer: &mut [u8]) {
    let Some(last) = buffer.last_mut() else {
        return;
    };
    *last = 0;

    for byte in buffer.iter_mut().take_while(|b| **b != 0) {
        if matches!(*byte, b'"' | b'\\') || byte.is_ascii_control() {
            *byte = b' ';
        }
    }
}

/// The bytes up to (not including) the first NUL.
pub fn terminated(buffer: &[u8]) -> &[u8] {
    let len = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    &buffer[..len]
}
